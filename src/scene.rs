use std::fmt;

use nalgebra::{Point3, Unit};

use crate::algebra::{reflect, refract, Color, Ray, Vec3};
use crate::camera::PinholeCamera;
use crate::light::Light;
use crate::shape::Hit;
use crate::surface::Surface;

/// Everything needed to render: camera, lights, surfaces and the global
/// render switches. Built up with the chaining `with_*`/`add_*` calls and
/// never modified while a render pass runs.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    camera: Option<PinholeCamera>,
    ambient: Color,
    background: Color,
    lights: Vec<Light>,
    surfaces: Vec<Surface>,
    max_recursion_level: u32,
    anti_aliasing_factor: u32,
    render_reflections: bool,
    render_refractions: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            camera: None,
            ambient: Color::repeat(0.1),
            background: Color::new(0., 0.5, 1.),
            lights: Vec::new(),
            surfaces: Vec::new(),
            max_recursion_level: 1,
            anti_aliasing_factor: 1,
            render_reflections: false,
            render_refractions: false,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_camera(mut self, camera: PinholeCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_max_recursion_level(mut self, max_recursion_level: u32) -> Self {
        self.max_recursion_level = max_recursion_level;
        self
    }

    pub fn with_anti_aliasing_factor(mut self, anti_aliasing_factor: u32) -> Self {
        self.anti_aliasing_factor = anti_aliasing_factor;
        self
    }

    pub fn with_reflections(mut self, render_reflections: bool) -> Self {
        self.render_reflections = render_reflections;
        self
    }

    pub fn with_refractions(mut self, render_refractions: bool) -> Self {
        self.render_refractions = render_refractions;
        self
    }

    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn add_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> Option<&PinholeCamera> {
        self.camera.as_ref()
    }

    pub fn max_recursion_level(&self) -> u32 {
        self.max_recursion_level
    }

    pub fn anti_aliasing_factor(&self) -> u32 {
        self.anti_aliasing_factor
    }

    pub fn background(&self) -> &Color {
        &self.background
    }

    /// Linear color seen along `ray`, `depth` bounces away from the camera.
    /// Not clamped.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        if depth > self.max_recursion_level {
            return Color::zeros();
        }

        let (surface, hit) = match self.closest_intersection(ray) {
            Some(found) => found,
            None => return self.background,
        };
        let p = ray.at(hit.t);
        // shade the side the ray arrives from
        let n = if hit.normal.dot(&ray.direction) > 0. { -hit.normal } else { hit.normal };

        let mut color = surface.ka().component_mul(&self.ambient) + self.compute_lighting(surface, ray, &p, &n);

        if self.render_reflections && surface.is_reflecting() {
            let reflected = Ray::new(p, reflect(&ray.direction, &n)).offset(&n);
            color += surface.kr().component_mul(&self.trace(&reflected, depth + 1));
        }

        if self.render_refractions && surface.is_transparent() {
            if let Some(direction) = refract(&ray.direction, &n, surface.n1(&hit), surface.n2(&hit)) {
                let refracted = Ray { origin: p, direction }.offset(&n);
                color += surface.kt().component_mul(&self.trace(&refracted, depth + 1));
            }
        }

        color
    }

    /// Diffuse and specular light reaching `p` from every unshadowed light.
    fn compute_lighting(&self, surface: &Surface, ray: &Ray, p: &Point3<f64>, n: &Unit<Vec3>) -> Color {
        self.lights
            .iter()
            .filter_map(|light| {
                let to_light = light.ray_to_light(p).offset(n);
                if self.surfaces.iter().any(|s| light.is_occluded_by(s, &to_light)) {
                    return None;
                }
                let intensity = light.intensity(p, &to_light);
                let diffuse = diffuse(surface, &to_light.direction, n);
                let specular = specular(surface, &to_light.direction, n, &ray.direction);
                Some((diffuse + specular).component_mul(&intensity))
            })
            .fold(Color::zeros(), |acc, c| acc + c)
    }

    /// Nearest hit along `ray`. On equal `t` the surface added first wins.
    fn closest_intersection(&self, ray: &Ray) -> Option<(&Surface, Hit)> {
        self.surfaces
            .iter()
            .filter_map(|surface| surface.intersect(ray).map(|hit| (surface, hit)))
            .fold(None, |acc, (surface, hit)| match acc {
                Some((_, min_hit)) if min_hit.t <= hit.t => acc,
                _ => Some((surface, hit)),
            })
    }
}

fn diffuse(surface: &Surface, l: &Unit<Vec3>, n: &Unit<Vec3>) -> Color {
    surface.kd() * n.dot(l).max(0.)
}

/// Phong highlight. A cosine at or below zero means the highlight faces
/// away and contributes nothing, whatever the shininess.
fn specular(surface: &Surface, l: &Unit<Vec3>, n: &Unit<Vec3>, v: &Unit<Vec3>) -> Color {
    let r = reflect(&-l.into_inner(), n);
    let r_dot_v = r.dot(&-v.into_inner());
    if r_dot_v <= 0. {
        return Color::zeros();
    }
    surface.ks() * r_dot_v.powi(surface.shininess())
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.camera {
            Some(camera) => writeln!(f, "Camera: {}", camera)?,
            None => writeln!(f, "Camera: none")?,
        }
        writeln!(f, "Ambient: {:?}", self.ambient.as_slice())?;
        writeln!(f, "Background Color: {:?}", self.background.as_slice())?;
        writeln!(f, "Max recursion level: {}", self.max_recursion_level)?;
        writeln!(f, "Anti aliasing factor: {}", self.anti_aliasing_factor)?;
        writeln!(f, "Reflections: {}", self.render_reflections)?;
        writeln!(f, "Refractions: {}", self.render_refractions)?;
        writeln!(f, "Light sources:")?;
        for light in &self.lights {
            writeln!(f, "  {}", light)?;
        }
        writeln!(f, "Surfaces:")?;
        for surface in &self.surfaces {
            writeln!(f, "  {}", surface)?;
        }
        Ok(())
    }
}
