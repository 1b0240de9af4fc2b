//! Configuration — a point in the robot's configuration space.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Most arms plus a gripper fit inline.
type Coords = SmallVec<[f64; 8]>;

/// A point in configuration space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Coords);

impl Configuration {
    pub fn zeros(dim: usize) -> Self {
        Self(SmallVec::from_elem(0.0, dim))
    }

    pub fn from_slice(coords: &[f64]) -> Self {
        Self(SmallVec::from_slice(coords))
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Linear interpolation: `self` at `s = 0`, `other` at `s = 1`.
    pub fn interpolate(&self, other: &Configuration, s: f64) -> Configuration {
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| a + (b - a) * s)
                .collect(),
        )
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &Configuration) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (b - a) * (b - a))
            .sum::<f64>()
            .sqrt()
    }

    pub fn approx_eq(&self, other: &Configuration, eps: f64) -> bool {
        self.dim() == other.dim()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Deref for Configuration {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for Configuration {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl From<Vec<f64>> for Configuration {
    fn from(v: Vec<f64>) -> Self {
        Self(SmallVec::from_vec(v))
    }
}

impl<const N: usize> From<[f64; N]> for Configuration {
    fn from(a: [f64; N]) -> Self {
        Self::from_slice(&a)
    }
}

impl FromIterator<f64> for Configuration {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
