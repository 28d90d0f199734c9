use nalgebra::{Point3, Unit, Vector3};

use crate::algebra::{Ray, Vec3, EPSILON};
use crate::error::SceneError;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { center: Point3<f64>, radius: f64 },
    Plane { normal: Unit<Vec3>, point: Point3<f64> },
    AxisAlignedBox { a: Point3<f64>, b: Point3<f64> },
    Triangle { p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, normal: Unit<Vec3> },
}

/// Where a ray meets a shape.
///
/// `normal` always points out of the surface. `within` is set when the ray
/// started inside a closed solid, i.e. the hit is on the way out.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Hit {
    pub t: f64,
    pub normal: Unit<Vec3>,
    pub within: bool,
}

impl Shape {
    pub fn sphere(center: Point3<f64>, radius: f64) -> Result<Self, SceneError> {
        if !(radius > 0. && radius.is_finite()) {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self::Sphere { center, radius })
    }

    pub fn plane(normal: Vec3, point: Point3<f64>) -> Result<Self, SceneError> {
        let normal = Unit::try_new(normal, EPSILON).ok_or(SceneError::DegeneratePlane)?;
        Ok(Self::Plane { normal, point })
    }

    /// Box spanned by its minimum corner `a` and maximum corner `b`.
    pub fn axis_aligned_box(a: Point3<f64>, b: Point3<f64>) -> Result<Self, SceneError> {
        if (0..3).any(|i| !(a[i] <= b[i])) {
            return Err(SceneError::InvalidBox { a, b });
        }
        Ok(Self::AxisAlignedBox { a, b })
    }

    pub fn triangle(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Result<Self, SceneError> {
        let normal = Unit::try_new((p1 - p0).cross(&(p2 - p0)), EPSILON)
            .ok_or(SceneError::DegenerateTriangle(p0, p1, p2))?;
        Ok(Self::Triangle { p0, p1, p2, normal })
    }

    /// Nearest hit in front of the ray origin, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Self::Sphere { center, radius } => {
                let co = ray.origin - center;
                let d = ray.direction.into_inner();

                let a = d.dot(&d);
                let b = 2. * co.dot(&d);
                let c = co.dot(&co) - radius * radius;
                let (t1, t2) = solve_quadratic(a, b, c)?;
                let (t_near, t_far) = (t1.min(t2), t1.max(t2));
                let (t, within) = if t_near > EPSILON {
                    (t_near, false)
                } else if t_far > EPSILON {
                    (t_far, true)
                } else {
                    return None;
                };
                Some(Hit {
                    t,
                    normal: Unit::new_normalize(ray.at(t) - center),
                    within,
                })
            }
            Self::Plane { normal, point } => {
                let t = intersect_plane(ray, normal, point)?;
                Some(Hit { t, normal: *normal, within: false })
            }
            Self::AxisAlignedBox { a, b } => intersect_box(ray, a, b),
            Self::Triangle { p0, p1, p2, normal } => {
                let t = intersect_plane(ray, normal, p0)?;
                let p = ray.at(t);
                let inside = [(p0, p1), (p1, p2), (p2, p0)]
                    .iter()
                    .all(|(from, to)| (*to - *from).cross(&(p - *from)).dot(normal) >= 0.);
                if inside {
                    Some(Hit { t, normal: *normal, within: false })
                } else {
                    None
                }
            }
        }
    }
}

fn intersect_plane(ray: &Ray, normal: &Unit<Vec3>, point: &Point3<f64>) -> Option<f64> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Tests the ray against each of the six face planes and keeps the closest
/// face hit that lands inside the face rectangle.
fn intersect_box(ray: &Ray, a: &Point3<f64>, b: &Point3<f64>) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for axis in 0..3 {
        if ray.direction[axis] == 0. {
            continue;
        }
        for (corner, side) in [(a, -1.), (b, 1.)] {
            let t = (corner[axis] - ray.origin[axis]) / ray.direction[axis];
            if t <= EPSILON {
                continue;
            }
            let p = ray.at(t);
            if !in_face(&p, a, b, axis) {
                continue;
            }
            if best.map_or(true, |hit| t.abs() < hit.t.abs()) {
                let mut normal = Vector3::zeros();
                normal[axis] = side;
                best = Some(Hit {
                    t,
                    normal: Unit::new_unchecked(normal),
                    within: false,
                });
            }
        }
    }
    let within = (0..3).all(|i| a[i] < ray.origin[i] && ray.origin[i] < b[i]);
    best.map(|hit| Hit { within, ..hit })
}

/// Whether `p` lies inside the box extent on the two axes other than `axis`.
fn in_face(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>, axis: usize) -> bool {
    (0..3)
        .filter(|&i| i != axis)
        .all(|i| is_between(a[i], b[i], p[i]))
}

fn is_between(a: f64, b: f64, p: f64) -> bool {
    a.min(b) <= p && p <= a.max(b)
}

fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4. * a * c;
    let disc_sqrt = discriminant.sqrt();
    if !disc_sqrt.is_nan() {
        let root1 = (-b + disc_sqrt) / (2. * a);
        let root2 = (-b - disc_sqrt) / (2. * a);
        Some((root1, root2))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Shape {
        Shape::axis_aligned_box(Point3::new(0., 0., 0.), Point3::new(1., 1., 1.)).unwrap()
    }

    #[test]
    fn test_box_near_face() {
        let ray = Ray::new(Point3::new(-1., 0.5, 0.5), Vec3::new(1., 0., 0.));
        let hit = unit_box().intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 1.);
        assert_relative_eq!(ray.at(hit.t), Point3::new(0., 0.5, 0.5));
        assert_eq!(hit.normal.into_inner(), Vec3::new(-1., 0., 0.));
        assert!(!hit.within);
    }

    #[test]
    fn test_box_miss() {
        let ray = Ray::new(Point3::new(-1., 0.5, 0.5), Vec3::new(0., 1., 0.));
        assert_eq!(unit_box().intersect(&ray), None);
    }

    #[test]
    fn test_box_far_face_normal_points_out() {
        let ray = Ray::new(Point3::new(0.5, 3., 0.5), Vec3::new(0., -1., 0.));
        let hit = unit_box().intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 2.);
        assert_eq!(hit.normal.into_inner(), Vec3::new(0., 1., 0.));
    }

    #[test]
    fn test_box_from_inside() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.25), Vec3::new(0., 0., 1.));
        let hit = unit_box().intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 0.75);
        assert_eq!(hit.normal.into_inner(), Vec3::new(0., 0., 1.));
        assert!(hit.within);
    }

    #[test]
    fn test_box_behind_ray() {
        let ray = Ray::new(Point3::new(-1., 0.5, 0.5), Vec3::new(-1., 0., 0.));
        assert_eq!(unit_box().intersect(&ray), None);
    }

    #[test]
    fn test_box_rejects_inverted_corners() {
        let err = Shape::axis_aligned_box(Point3::new(1., 0., 0.), Point3::new(0., 1., 1.));
        assert!(matches!(err, Err(SceneError::InvalidBox { .. })));

        let nan = Shape::axis_aligned_box(Point3::new(f64::NAN, 0., 0.), Point3::new(1., 1., 1.));
        assert!(matches!(nan, Err(SceneError::InvalidBox { .. })));
    }

    #[test]
    fn test_sphere_hit_and_exit() {
        let sphere = Shape::sphere(Point3::new(0., 0., 3.), 1.).unwrap();
        let outside = Ray::new(Point3::origin(), Vec3::new(0., 0., 1.));
        let hit = sphere.intersect(&outside).unwrap();
        assert_relative_eq!(hit.t, 2.);
        assert_relative_eq!(hit.normal.into_inner(), Vec3::new(0., 0., -1.));
        assert!(!hit.within);

        let inside = Ray::new(Point3::new(0., 0., 3.), Vec3::new(0., 0., 1.));
        let hit = sphere.intersect(&inside).unwrap();
        assert_relative_eq!(hit.t, 1.);
        assert_relative_eq!(hit.normal.into_inner(), Vec3::new(0., 0., 1.));
        assert!(hit.within);
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        assert_eq!(
            Shape::sphere(Point3::origin(), 0.),
            Err(SceneError::InvalidRadius(0.))
        );
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Shape::plane(Vec3::new(0., 1., 0.), Point3::new(0., -1., 0.)).unwrap();
        let ray = Ray::new(Point3::origin(), Vec3::new(1., 0., 0.));
        assert_eq!(plane.intersect(&ray), None);

        let down = Ray::new(Point3::origin(), Vec3::new(0., -1., 0.));
        assert_relative_eq!(plane.intersect(&down).unwrap().t, 1.);
    }

    #[test]
    fn test_triangle_inside_and_outside() {
        let triangle = Shape::triangle(
            Point3::new(-1., -1., 2.),
            Point3::new(1., -1., 2.),
            Point3::new(0., 1., 2.),
        )
        .unwrap();
        let center = Ray::new(Point3::origin(), Vec3::new(0., 0., 1.));
        assert_relative_eq!(triangle.intersect(&center).unwrap().t, 2.);

        let corner = Ray::through(Point3::origin(), &Point3::new(1., 1., 2.));
        assert_eq!(triangle.intersect(&corner), None);
    }

    #[test]
    fn test_triangle_rejects_collinear_points() {
        let result = Shape::triangle(
            Point3::new(0., 0., 0.),
            Point3::new(1., 1., 1.),
            Point3::new(2., 2., 2.),
        );
        assert!(matches!(result, Err(SceneError::DegenerateTriangle(..))));
    }
}
