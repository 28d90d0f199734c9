use std::fmt;

use nalgebra::{Point3, Unit};

use crate::algebra::{Color, Ray, Vec3};
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Omnidirectional light with `1 / (kc + kl*d + kq*d^2)` falloff.
    Point {
        position: Point3<f64>,
        intensity: Color,
        kc: f64,
        kl: f64,
        kq: f64,
    },
    /// Light arriving from infinitely far away along `direction`.
    Directional {
        direction: Unit<Vec3>,
        intensity: Color,
    },
    Spot {
        position: Point3<f64>,
        direction: Unit<Vec3>,
        intensity: Color,
        kc: f64,
        kl: f64,
        kq: f64,
    },
}

impl Light {
    pub fn point(position: Point3<f64>, intensity: Color) -> Self {
        Self::Point { position, intensity, kc: 1., kl: 0., kq: 0. }
    }

    pub fn directional(direction: Vec3, intensity: Color) -> Self {
        Self::Directional { direction: Unit::new_normalize(direction), intensity }
    }

    pub fn spot(position: Point3<f64>, direction: Vec3, intensity: Color) -> Self {
        Self::Spot {
            position,
            direction: Unit::new_normalize(direction),
            intensity,
            kc: 1.,
            kl: 0.,
            kq: 0.,
        }
    }

    /// Replaces the distance attenuation factors. Directional lights have none.
    pub fn attenuation(self, kc: f64, kl: f64, kq: f64) -> Self {
        match self {
            Self::Point { position, intensity, .. } => Self::Point { position, intensity, kc, kl, kq },
            Self::Spot { position, direction, intensity, .. } => {
                Self::Spot { position, direction, intensity, kc, kl, kq }
            }
            directional @ Self::Directional { .. } => directional,
        }
    }

    pub fn ray_to_light(&self, p: &Point3<f64>) -> Ray {
        match self {
            Self::Point { position, .. } | Self::Spot { position, .. } => Ray::through(*p, position),
            Self::Directional { direction, .. } => Ray::new(*p, -direction.into_inner()),
        }
    }

    /// Whether `surface` blocks `ray`, a ray produced by `ray_to_light`.
    pub fn is_occluded_by(&self, surface: &Surface, ray: &Ray) -> bool {
        match surface.intersect(ray) {
            None => false,
            Some(hit) => match self {
                Self::Point { position, .. } | Self::Spot { position, .. } => {
                    hit.t < (position - ray.origin).norm()
                }
                Self::Directional { .. } => true,
            },
        }
    }

    pub fn intensity(&self, p: &Point3<f64>, ray: &Ray) -> Color {
        match self {
            Self::Point { position, intensity, kc, kl, kq } => {
                intensity / falloff(position, p, *kc, *kl, *kq)
            }
            Self::Directional { intensity, .. } => *intensity,
            Self::Spot { position, direction, intensity, kc, kl, kq } => {
                let cone = direction.dot(&-ray.direction.into_inner()).max(0.);
                intensity * cone / falloff(position, p, *kc, *kl, *kq)
            }
        }
    }
}

fn falloff(position: &Point3<f64>, p: &Point3<f64>, kc: f64, kl: f64, kq: f64) -> f64 {
    let d = (position - p).norm();
    kc + kl * d + kq * d * d
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point { position, intensity, .. } => {
                write!(f, "point light at {} intensity {:?}", position, intensity.as_slice())
            }
            Self::Directional { direction, intensity } => write!(
                f,
                "directional light along {:?} intensity {:?}",
                direction.as_slice(),
                intensity.as_slice()
            ),
            Self::Spot { position, direction, intensity, .. } => write!(
                f,
                "spot light at {} along {:?} intensity {:?}",
                position,
                direction.as_slice(),
                intensity.as_slice()
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shape::Shape;
    use crate::surface::Material;
    use approx::assert_relative_eq;

    fn blocker_at(z: f64) -> Surface {
        Surface::new(
            Shape::sphere(Point3::new(0., 0., z), 0.5).unwrap(),
            Material::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_point_light_occlusion_stops_at_light() {
        let light = Light::point(Point3::new(0., 0., 4.), Color::repeat(1.));
        let ray = light.ray_to_light(&Point3::origin());
        assert!(light.is_occluded_by(&blocker_at(2.), &ray));
        assert!(!light.is_occluded_by(&blocker_at(6.), &ray));
    }

    #[test]
    fn test_directional_light_is_blocked_anywhere_along_ray() {
        let light = Light::directional(Vec3::new(0., 0., -1.), Color::repeat(1.));
        let ray = light.ray_to_light(&Point3::origin());
        assert_relative_eq!(ray.direction.into_inner(), Vec3::new(0., 0., 1.));
        assert!(light.is_occluded_by(&blocker_at(100.), &ray));
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = Light::point(Point3::new(0., 0., 2.), Color::repeat(1.)).attenuation(1., 0., 0.25);
        let ray = light.ray_to_light(&Point3::origin());
        assert_relative_eq!(light.intensity(&Point3::origin(), &ray), Color::repeat(0.5));
    }

    #[test]
    fn test_spot_light_dark_behind_cone() {
        let light = Light::spot(Point3::new(0., 0., 2.), Vec3::new(0., 0., 1.), Color::repeat(1.));
        let ray = light.ray_to_light(&Point3::origin());
        assert_eq!(light.intensity(&Point3::origin(), &ray), Color::zeros());

        let facing = Light::spot(Point3::new(0., 0., 2.), Vec3::new(0., 0., -1.), Color::repeat(1.));
        assert_relative_eq!(facing.intensity(&Point3::origin(), &ray), Color::repeat(1.));
    }
}
