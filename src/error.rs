//! Error types for scene construction and rendering.

use nalgebra::Point3;
use thiserror::Error;

/// Invariant violations caught while a scene is being built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Box minimum corner is not component-wise below its maximum corner.
    #[error("box corner {a} is not component-wise <= {b}")]
    InvalidBox { a: Point3<f64>, b: Point3<f64> },

    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("plane normal must be non-zero")]
    DegeneratePlane,

    #[error("triangle {0}, {1}, {2} has no area")]
    DegenerateTriangle(Point3<f64>, Point3<f64>, Point3<f64>),

    #[error("shininess must not be negative, got {0}")]
    InvalidShininess(i32),

    #[error("refractive index must be positive and finite, got {0}")]
    InvalidRefractiveIndex(f64),

    /// Camera towards and up vectors are parallel or zero.
    #[error("camera basis is degenerate")]
    DegenerateCamera,

    #[error("camera image plane distance must be positive and finite, got {0}")]
    InvalidPlaneDistance(f64),
}

/// Errors that abort a render pass. No partial image is produced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image plane width must be positive and finite, got {0}")]
    InvalidPlaneWidth(f64),

    #[error("anti-aliasing factor must be 1, 2 or 3, got {0}")]
    InvalidAntiAliasing(u32),

    #[error("scene has no camera")]
    MissingCamera,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A single pixel task failed; the whole render is abandoned.
    #[error("pixel task ({x}, {y}) failed: {reason}")]
    Pixel { x: u32, y: u32, reason: String },
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
