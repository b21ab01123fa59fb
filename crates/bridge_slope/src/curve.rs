//! Quadratic fit through three anchor points.

use crate::{
    error::{Result, SlopeError},
    geometry::Point,
};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// y = a·x² + b·x + c
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Parabola {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Solve `[x², x, 1] · (a, b, c)ᵀ = y` for the three points.
    ///
    /// Fails with [`SlopeError::SingularSystem`] when two points share an x coordinate.
    /// Narrow but distinct spacings are solved; there is no size threshold.
    pub fn solve(points: &[Point; 3]) -> Result<Self> {
        let [p0, p1, p2] = points;
        if p0.x == p1.x || p0.x == p2.x || p1.x == p2.x {
            return Err(SlopeError::SingularSystem);
        }

        let x = Matrix3::from_fn(|row, col| match col {
            0 => points[row].x * points[row].x,
            1 => points[row].x,
            _ => 1.0,
        });
        let y = Vector3::new(points[0].y, points[1].y, points[2].y);

        // det can still underflow to zero for extremely narrow spacings
        let inverse = x.try_inverse().ok_or(SlopeError::SingularSystem)?;
        let coeffs = inverse * y;
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(SlopeError::SingularSystem);
        }
        Ok(Self::new(coeffs[0], coeffs[1], coeffs[2]))
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    pub fn coefficients(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }
}

impl fmt::Display for Parabola {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x^2 + {}x + {}", self.a, self.b, self.c)
    }
}
