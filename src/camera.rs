use std::fmt;

use nalgebra::{Point3, Unit};

use crate::algebra::{Ray, Vec3, EPSILON};
use crate::error::SceneError;

#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    position: Point3<f64>,
    towards: Unit<Vec3>,
    up: Unit<Vec3>,
    right: Unit<Vec3>,
    distance_to_plane: f64,
}

impl PinholeCamera {
    /// `up` need not be orthogonal to `towards`; it is re-derived from the
    /// right vector.
    pub fn new(
        position: Point3<f64>,
        towards: Vec3,
        up: Vec3,
        distance_to_plane: f64,
    ) -> Result<Self, SceneError> {
        if !(distance_to_plane > 0. && distance_to_plane.is_finite()) {
            return Err(SceneError::InvalidPlaneDistance(distance_to_plane));
        }
        let towards = Unit::try_new(towards, EPSILON).ok_or(SceneError::DegenerateCamera)?;
        let right = Unit::try_new(towards.cross(&up), EPSILON).ok_or(SceneError::DegenerateCamera)?;
        let up = Unit::new_normalize(right.cross(&towards.into_inner()));
        Ok(Self {
            position,
            towards,
            up,
            right,
            distance_to_plane,
        })
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// Fixes the image resolution and the world-space width of the image
    /// plane for one render pass.
    pub fn projection(&self, height: u32, width: u32, plane_width: f64) -> Projection {
        Projection {
            position: self.position,
            center: self.position + self.towards.into_inner() * self.distance_to_plane,
            right: self.right.into_inner(),
            up: self.up.into_inner(),
            half_width: (width / 2) as f64,
            half_height: (height / 2) as f64,
            pixel_width: plane_width / width as f64,
        }
    }
}

impl fmt::Display for PinholeCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pinhole camera at {} towards {:?} up {:?} plane distance {}",
            self.position,
            self.towards.as_slice(),
            self.up.as_slice(),
            self.distance_to_plane
        )
    }
}

/// A camera bound to a target resolution.
#[derive(Debug, Clone)]
pub struct Projection {
    position: Point3<f64>,
    center: Point3<f64>,
    right: Vec3,
    up: Vec3,
    half_width: f64,
    half_height: f64,
    pixel_width: f64,
}

impl Projection {
    /// World-space point on the image plane for pixel `(x, y)`, with `y`
    /// growing downwards.
    pub fn transform(&self, x: u32, y: u32) -> Point3<f64> {
        self.center + self.right * ((x as f64 - self.half_width) * self.pixel_width)
            - self.up * ((y as f64 - self.half_height) * self.pixel_width)
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// Primary rays shot through pixel `(x, y)`. A single ray through the
    /// pixel's grid point on the image plane; supersampling would add more
    /// here.
    pub fn primary_rays(&self, x: u32, y: u32) -> impl Iterator<Item = Ray> {
        std::iter::once(Ray::through(self.position, &self.transform(x, y)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PinholeCamera {
        PinholeCamera::new(Point3::origin(), Vec3::new(0., 0., -1.), Vec3::new(0., 1., 0.), 1.).unwrap()
    }

    #[test]
    fn test_center_pixel_looks_straight_ahead() {
        let projection = camera().projection(100, 200, 2.);
        assert_relative_eq!(projection.transform(100, 50), Point3::new(0., 0., -1.));
    }

    #[test]
    fn test_pixel_axes() {
        let projection = camera().projection(100, 200, 2.);
        // one pixel is 0.01 wide
        assert_relative_eq!(projection.transform(0, 0), Point3::new(-1., 0.5, -1.), epsilon = 1e-12);
        assert_relative_eq!(projection.transform(110, 60), Point3::new(0.1, -0.1, -1.), epsilon = 1e-12);
    }

    #[test]
    fn test_up_is_orthogonalized() {
        let camera = PinholeCamera::new(
            Point3::origin(),
            Vec3::new(0., 0., -1.),
            Vec3::new(0., 1., -1.),
            1.,
        )
        .unwrap();
        let projection = camera.projection(2, 2, 2.);
        assert_relative_eq!(projection.transform(1, 0), Point3::new(0., 1., -1.), epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_up_is_rejected() {
        let result = PinholeCamera::new(Point3::origin(), Vec3::new(0., 1., 0.), Vec3::new(0., 2., 0.), 1.);
        assert_eq!(result, Err(SceneError::DegenerateCamera));
    }

    #[test]
    fn test_plane_distance_must_be_positive() {
        for distance in [0., -1., f64::NAN, f64::INFINITY] {
            let result = PinholeCamera::new(Point3::origin(), Vec3::new(0., 0., -1.), Vec3::new(0., 1., 0.), distance);
            assert!(matches!(result, Err(SceneError::InvalidPlaneDistance(_))));
        }
    }
}
