//! Sampled collision checking.
//!
//! The path is evaluated every `step` time units and each sample is tested
//! against the registered obstacles. Collisions between two samples are
//! missed; choose `step` accordingly.

use std::sync::Arc;

use super::{Obstacle, PathValidation, Validation, ValidationReport};
use crate::config::ValidationConfig;
use crate::model::{Path, TimeRange, TIME_EPS};
use crate::Result;

#[derive(Debug, Clone)]
pub struct DiscretizedValidation {
    step: f64,
    obstacles: Vec<Arc<dyn Obstacle>>,
}

impl DiscretizedValidation {
    pub fn new(step: f64) -> Self {
        debug_assert!(step > 0.0, "sampling step must be positive");
        Self { step, obstacles: Vec::new() }
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(config.step)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn obstacles(&self) -> &[Arc<dyn Obstacle>] {
        &self.obstacles
    }

    /// Ascending sample times, always including both ends of `range`.
    /// Samples are produced on demand and can be walked from either end.
    fn sample_times(&self, range: TimeRange) -> impl DoubleEndedIterator<Item = f64> + use<> {
        let (start, step) = (range.start, self.step);
        let interior = if step > 0.0 && step.is_finite() {
            ((range.end - TIME_EPS - start) / step).ceil().max(0.0) as u64
        } else {
            u64::from(range.length() > TIME_EPS)
        };
        (0..interior)
            .map(move |k| start + k as f64 * step)
            .chain(std::iter::once(range.end))
    }

    fn check(&self, path: &Path, t: f64) -> Result<Option<ValidationReport>> {
        let q = path.eval(t)?;
        Ok(self
            .obstacles
            .iter()
            .find(|o| o.collides(&q))
            .map(|o| ValidationReport {
                obstacle: o.name().to_string(),
                time: t,
                config: q,
            }))
    }
}

impl PathValidation for DiscretizedValidation {
    fn validate(&self, path: &Path, reverse: bool) -> Result<Validation> {
        let range = path.time_range();
        if reverse {
            let mut first_free = range.end;
            for t in self.sample_times(range).rev() {
                if let Some(report) = self.check(path, t)? {
                    let part = path.extract(TimeRange::new(first_free, range.end))?;
                    return Ok(Validation::truncated(part, Some(report)));
                }
                first_free = t;
            }
        } else {
            let mut last_free = range.start;
            for t in self.sample_times(range) {
                if let Some(report) = self.check(path, t)? {
                    let part = path.extract(TimeRange::new(range.start, last_free))?;
                    return Ok(Validation::truncated(part, Some(report)));
                }
                last_free = t;
            }
        }
        Ok(Validation::accepted(path.clone()))
    }

    fn add_obstacle(&mut self, obstacle: Arc<dyn Obstacle>) -> Result<()> {
        tracing::debug!(obstacle = %obstacle.name(), "obstacle registered");
        self.obstacles.push(obstacle);
        Ok(())
    }
}
