//! Built-in demo scenes.

use nalgebra::Point3;

use crate::algebra::{Color, Vec3};
use crate::camera::PinholeCamera;
use crate::error::SceneError;
use crate::light::Light;
use crate::scene::Scene;
use crate::shape::Shape;
use crate::surface::{Material, Surface};

pub const NAMES: [&str; 3] = ["spheres", "boxes", "mirrors"];

pub fn by_name(name: &str) -> Option<Result<Scene, SceneError>> {
    match name {
        "spheres" => Some(spheres()),
        "boxes" => Some(boxes()),
        "mirrors" => Some(mirrors()),
        _ => None,
    }
}

fn camera() -> Result<PinholeCamera, SceneError> {
    PinholeCamera::new(
        Point3::new(0., 1., 6.),
        Vec3::new(0., -0.15, -1.),
        Vec3::new(0., 1., 0.),
        2.,
    )
}

fn floor(color: Color) -> Result<Surface, SceneError> {
    Surface::new(
        Shape::plane(Vec3::new(0., 1., 0.), Point3::new(0., -1., 0.))?,
        Material::default().ka(color * 0.2).kd(color).ks(Color::repeat(0.2)),
    )
}

fn colored(color: Color) -> Material {
    Material::default().ka(color * 0.2).kd(color)
}

pub fn spheres() -> Result<Scene, SceneError> {
    Ok(Scene::new()
        .with_name("spheres")
        .with_camera(camera()?)
        .with_ambient(Color::repeat(0.2))
        .with_background(Color::new(0.05, 0.05, 0.1))
        .with_max_recursion_level(3)
        .with_reflections(true)
        .with_refractions(true)
        // red
        .add_surface(Surface::new(
            Shape::sphere(Point3::new(0., 0., 0.), 1.)?,
            colored(Color::new(1., 0., 0.)).shininess(500).kr(Color::repeat(0.2)),
        )?)
        // blue
        .add_surface(Surface::new(
            Shape::sphere(Point3::new(2., 0., -1.), 1.)?,
            colored(Color::new(0., 0., 1.)).shininess(500).kr(Color::repeat(0.3)),
        )?)
        // clear ball
        .add_surface(Surface::new(
            Shape::sphere(Point3::new(-1.2, -0.5, 1.5), 0.5)?,
            colored(Color::repeat(0.05))
                .ks(Color::repeat(0.9))
                .shininess(100)
                .kt(Color::repeat(0.8))
                .refractive_index(1.33),
        )?)
        .add_surface(floor(Color::new(1., 1., 0.))?)
        .add_light(Light::point(Point3::new(2., 4., 3.), Color::repeat(0.7)).attenuation(1., 0.02, 0.01))
        .add_light(Light::directional(Vec3::new(-1., -4., -4.), Color::repeat(0.3))))
}

pub fn boxes() -> Result<Scene, SceneError> {
    Ok(Scene::new()
        .with_name("boxes")
        .with_camera(camera()?)
        .with_max_recursion_level(2)
        .with_reflections(true)
        .add_surface(Surface::new(
            Shape::axis_aligned_box(Point3::new(-2., -1., -1.), Point3::new(-0.5, 0.5, 0.5))?,
            colored(Color::new(0., 1., 1.)).shininess(1000).kr(Color::repeat(0.3)),
        )?)
        .add_surface(Surface::new(
            Shape::axis_aligned_box(Point3::new(0.5, -1., -2.), Point3::new(1.5, 1.5, -1.))?,
            colored(Color::new(1., 0.6, 0.)),
        )?)
        .add_surface(Surface::new(
            Shape::triangle(
                Point3::new(-1., -1., -3.),
                Point3::new(1., -1., -3.),
                Point3::new(0., 1.5, -3.),
            )?,
            colored(Color::new(0.2, 0.8, 0.2)),
        )?)
        .add_surface(floor(Color::repeat(0.8))?)
        .add_light(Light::spot(Point3::new(0., 4., 2.), Vec3::new(0., -1., -0.5), Color::repeat(0.9)))
        .add_light(Light::point(Point3::new(-3., 2., 4.), Color::repeat(0.4))))
}

pub fn mirrors() -> Result<Scene, SceneError> {
    let mirror = Material::default()
        .ka(Color::zeros())
        .kd(Color::repeat(0.05))
        .ks(Color::repeat(0.5))
        .shininess(200)
        .kr(Color::repeat(0.9));
    Ok(Scene::new()
        .with_name("mirrors")
        .with_camera(camera()?)
        .with_max_recursion_level(5)
        .with_reflections(true)
        .with_refractions(true)
        .add_surface(Surface::new(Shape::plane(Vec3::new(1., 0., 0.2), Point3::new(-3., 0., 0.))?, mirror.clone())?)
        .add_surface(Surface::new(Shape::plane(Vec3::new(-1., 0., 0.2), Point3::new(3., 0., 0.))?, mirror)?)
        .add_surface(Surface::new(
            Shape::sphere(Point3::new(0., 0., -1.), 1.)?,
            colored(Color::new(1., 0.2, 0.6)).shininess(50),
        )?)
        .add_surface(Surface::new(
            Shape::axis_aligned_box(Point3::new(-0.5, -1., 1.), Point3::new(0.5, 0., 2.))?,
            colored(Color::repeat(0.05))
                .kt(Color::new(0.7, 0.9, 0.7))
                .kr(Color::repeat(0.1))
                .refractive_index(1.5),
        )?)
        .add_surface(floor(Color::new(0.6, 0.6, 0.7))?)
        .add_light(Light::point(Point3::new(0., 3., 3.), Color::repeat(0.8)).attenuation(1., 0.05, 0.)))
}
