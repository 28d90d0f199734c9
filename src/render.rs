//! Parallel render driver: one rayon task per pixel, run on a worker pool
//! that lives only as long as a single render call.

use std::panic::{self, AssertUnwindSafe};

use image::{Rgb, RgbImage};
use log::info;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::algebra::{to_rgb, Color};
use crate::camera::Projection;
use crate::error::{RenderError, Result};
use crate::scene::Scene;

pub const MIN_THREADS: usize = 2;

/// Worker count used by `Scene::render`: the available hardware
/// parallelism, never less than `MIN_THREADS`.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(MIN_THREADS)
        .max(MIN_THREADS)
}

/// State bound to one render call. Dropping it tears down the pool.
struct RenderContext<'a> {
    scene: &'a Scene,
    projection: Projection,
    pool: ThreadPool,
}

impl<'a> RenderContext<'a> {
    fn new(scene: &'a Scene, width: u32, height: u32, plane_width: f64, threads: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if !(plane_width > 0. && plane_width.is_finite()) {
            return Err(RenderError::InvalidPlaneWidth(plane_width));
        }
        if !(1..=3).contains(&scene.anti_aliasing_factor()) {
            return Err(RenderError::InvalidAntiAliasing(scene.anti_aliasing_factor()));
        }
        let camera = scene.camera().ok_or(RenderError::MissingCamera)?;
        let projection = camera.projection(height, width, plane_width);

        let threads = threads.max(MIN_THREADS);
        info!("Initialize executor. Using {} threads to render {}", threads, scene.name());
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("render-{}", i))
            .build()?;

        Ok(Self { scene, projection, pool })
    }

    /// Traces every pixel in parallel. Fails on the first pixel task that
    /// fails.
    fn shoot(&self, width: u32, height: u32) -> Result<Vec<(u32, u32, Rgb<u8>)>> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x, y));
            }
        }

        self.pool.install(|| {
            pixels
                .into_par_iter()
                .map(|(x, y)| self.render_pixel(x, y).map(|color| (x, y, color)))
                .collect()
        })
    }

    fn render_pixel(&self, x: u32, y: u32) -> Result<Rgb<u8>> {
        let traced = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut color = Color::zeros();
            let mut samples = 0;
            for ray in self.projection.primary_rays(x, y) {
                color += self.scene.trace(&ray, 0);
                samples += 1;
            }
            color / samples as f64
        }));

        match traced {
            Ok(color) if color.iter().all(|c| c.is_finite()) => Ok(to_rgb(&color)),
            Ok(color) => Err(RenderError::Pixel {
                x,
                y,
                reason: format!("non-finite color {:?}", color.as_slice()),
            }),
            Err(payload) => Err(RenderError::Pixel { x, y, reason: panic_message(payload) }),
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}

impl Scene {
    /// Renders the scene using `default_threads()` workers.
    pub fn render(&self, width: u32, height: u32, plane_width: f64) -> Result<RgbImage> {
        self.render_with_threads(width, height, plane_width, default_threads())
    }

    /// Renders the scene on a fresh pool of `threads` workers (at least
    /// `MIN_THREADS`). Either every pixel is traced or an error is returned.
    pub fn render_with_threads(
        &self,
        width: u32,
        height: u32,
        plane_width: f64,
        threads: usize,
    ) -> Result<RgbImage> {
        let context = RenderContext::new(self, width, height, plane_width, threads)?;

        let factor = self.anti_aliasing_factor() as u64;
        info!(
            "Starting to shoot {} rays over {}",
            width as u64 * height as u64 * factor * factor,
            self.name()
        );
        let pixels = context.shoot(width, height)?;
        info!("Done shooting rays.");

        info!("Waiting for results...");
        let mut image = RgbImage::new(width, height);
        for (x, y, color) in pixels {
            image.put_pixel(x, y, color);
        }

        info!("Ray tracing of {} has been completed.", self.name());
        Ok(image)
    }
}
