//! Whitted-style recursive ray tracer.
//!
//! A [`Scene`] is assembled from surfaces, lights and a pinhole camera, then
//! rendered to an [`image::RgbImage`] with one parallel task per pixel.

pub mod algebra;
pub mod camera;
pub mod error;
pub mod light;
pub mod render;
pub mod scene;
pub mod scenes;
pub mod shape;
pub mod surface;

pub use algebra::{Color, Ray, Vec3};
pub use camera::{PinholeCamera, Projection};
pub use error::{RenderError, SceneError};
pub use light::Light;
pub use render::default_threads;
pub use scene::Scene;
pub use shape::{Hit, Shape};
pub use surface::{Material, Surface};
