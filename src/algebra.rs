use image::Rgb;
use nalgebra::{Point3, Unit, Vector3};

pub type Vec3 = Vector3<f64>;
pub type Color = Vector3<f64>;

/// Hits closer than this are treated as self-intersections.
pub const EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vec3>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    /// Ray from `origin` aimed at `target`.
    pub fn through(origin: Point3<f64>, target: &Point3<f64>) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * t
    }

    /// Pushes the origin off a surface, onto the side the ray travels into.
    pub fn offset(self, normal: &Unit<Vec3>) -> Self {
        let side = if self.direction.dot(normal) >= 0. { 1. } else { -1. };
        Self {
            origin: self.origin + normal.into_inner() * (side * EPSILON),
            direction: self.direction,
        }
    }
}

pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2. * v.dot(n) * n
}

/// Snell refraction of `v` through a surface with normal `n`, going from
/// index `n1` into index `n2`. `None` on total internal reflection.
pub fn refract(v: &Unit<Vec3>, n: &Unit<Vec3>, n1: f64, n2: f64) -> Option<Unit<Vec3>> {
    let n = if v.dot(n) > 0. { -n.into_inner() } else { n.into_inner() };
    let ratio = n1 / n2;
    let cos_i = -v.dot(&n);
    let sin2_t = ratio * ratio * (1. - cos_i * cos_i);
    if sin2_t > 1. {
        return None;
    }
    let cos_t = (1. - sin2_t).sqrt();
    Some(Unit::new_normalize(
        ratio * v.into_inner() + (ratio * cos_i - cos_t) * n,
    ))
}

pub fn to_rgb(color: &Color) -> Rgb<u8> {
    Rgb::from([
        (color.x.min(1.).max(0.) * 255.) as u8,
        (color.y.min(1.).max(0.) * 255.) as u8,
        (color.z.min(1.).max(0.) * 255.) as u8,
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reflect_off_floor() {
        let r = reflect(&Vec3::new(1., -1., 0.), &Vec3::new(0., 1., 0.));
        assert_eq!(r, Vec3::new(1., 1., 0.));
    }

    #[test]
    fn test_refract_same_index_passes_straight() {
        let v = Unit::new_normalize(Vec3::new(1., -1., 0.));
        let n = Unit::new_normalize(Vec3::new(0., 1., 0.));
        let r = refract(&v, &n, 1.5, 1.5).unwrap();
        assert_relative_eq!(r.into_inner(), v.into_inner(), epsilon = 1e-12);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        let v = Unit::new_normalize(Vec3::new(1., -1., 0.));
        let n = Unit::new_normalize(Vec3::new(0., 1., 0.));
        let r = refract(&v, &n, 1., 1.5).unwrap();
        // sin(theta_t) = sin(45deg) / 1.5
        assert_relative_eq!(r.x, (0.5f64).sqrt() / 1.5, epsilon = 1e-12);
        assert!(r.y < 0.);
    }

    #[test]
    fn test_total_internal_reflection() {
        let v = Unit::new_normalize(Vec3::new(1., -0.2, 0.));
        let n = Unit::new_normalize(Vec3::new(0., 1., 0.));
        assert_eq!(refract(&v, &n, 1.5, 1.), None);
    }

    #[test]
    fn test_offset_moves_to_leaving_side() {
        let n = Unit::new_normalize(Vec3::new(0., 1., 0.));
        let up = Ray::new(Point3::origin(), Vec3::new(1., 1., 0.)).offset(&n);
        assert!(up.origin.y > 0.);
        let down = Ray::new(Point3::origin(), Vec3::new(1., -1., 0.)).offset(&n);
        assert!(down.origin.y < 0.);
    }

    #[test]
    fn test_to_rgb_clamps() {
        assert_eq!(to_rgb(&Color::new(2., -1., 0.5)), Rgb::from([255, 0, 127]));
    }
}
