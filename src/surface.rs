use std::fmt;

use crate::algebra::{Color, Ray};
use crate::error::SceneError;
use crate::shape::{Hit, Shape};

/// Refractive index of the medium surrounding every surface.
pub const AIR_INDEX: f64 = 1.;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ka: Color,
    pub kd: Color,
    pub ks: Color,
    pub kr: Color,
    pub kt: Color,
    pub shininess: i32,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Color::repeat(0.1),
            kd: Color::repeat(0.7),
            ks: Color::repeat(0.7),
            kr: Color::zeros(),
            kt: Color::zeros(),
            shininess: 10,
            refractive_index: 1.5,
        }
    }
}

impl Material {
    pub fn ka(mut self, ka: Color) -> Self {
        self.ka = ka;
        self
    }

    pub fn kd(mut self, kd: Color) -> Self {
        self.kd = kd;
        self
    }

    pub fn ks(mut self, ks: Color) -> Self {
        self.ks = ks;
        self
    }

    pub fn kr(mut self, kr: Color) -> Self {
        self.kr = kr;
        self
    }

    pub fn kt(mut self, kt: Color) -> Self {
        self.kt = kt;
        self
    }

    pub fn shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn refractive_index(mut self, refractive_index: f64) -> Self {
        self.refractive_index = refractive_index;
        self
    }
}

/// A shape together with the material it is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub shape: Shape,
    pub material: Material,
}

impl Surface {
    pub fn new(shape: Shape, material: Material) -> Result<Self, SceneError> {
        if material.shininess < 0 {
            return Err(SceneError::InvalidShininess(material.shininess));
        }
        let index = material.refractive_index;
        if !(index > 0. && index.is_finite()) {
            return Err(SceneError::InvalidRefractiveIndex(index));
        }
        Ok(Self { shape, material })
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.shape.intersect(ray)
    }

    pub fn ka(&self) -> &Color {
        &self.material.ka
    }

    pub fn kd(&self) -> &Color {
        &self.material.kd
    }

    pub fn ks(&self) -> &Color {
        &self.material.ks
    }

    pub fn kr(&self) -> &Color {
        &self.material.kr
    }

    pub fn kt(&self) -> &Color {
        &self.material.kt
    }

    pub fn shininess(&self) -> i32 {
        self.material.shininess
    }

    pub fn is_reflecting(&self) -> bool {
        self.material.kr != Color::zeros()
    }

    pub fn is_transparent(&self) -> bool {
        self.material.kt != Color::zeros()
    }

    /// Index of the medium the ray travels in before crossing the surface.
    pub fn n1(&self, hit: &Hit) -> f64 {
        if hit.within {
            self.material.refractive_index
        } else {
            AIR_INDEX
        }
    }

    /// Index of the medium on the other side of the surface.
    pub fn n2(&self, hit: &Hit) -> f64 {
        if hit.within {
            AIR_INDEX
        } else {
            self.material.refractive_index
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.shape, self.material)
    }
}
