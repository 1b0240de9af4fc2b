//! Paths through configuration space.
//!
//! A [`Path`] is either a [`LeafPath`] (one straight interpolation, possibly
//! constrained) or a [`PathVector`] (an ordered list of sub-paths). Both are
//! parametrised by time and evaluate to a [`Configuration`]; evaluation of a
//! constrained leaf can fail when the constraints cannot be projected.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Configuration, EdgeId};
use crate::constraint::ConstraintSet;
use crate::{Error, Result};

/// Slack for time comparisons at range boundaries.
pub const TIME_EPS: f64 = 1e-9;

// ============================================================================
// TimeRange
// ============================================================================

/// Closed time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Zero-length range at `t`.
    pub fn point(t: f64) -> Self {
        Self { start: t, end: t }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start - TIME_EPS && t <= self.end + TIME_EPS
    }

    pub fn contains_range(&self, other: &TimeRange) -> bool {
        other.start <= other.end && self.contains(other.start) && self.contains(other.end)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

// ============================================================================
// LeafPath
// ============================================================================

/// Straight interpolation from `from` to `to`, parametrised over `base` and
/// restricted to the window `range` of it.
#[derive(Debug, Clone)]
pub struct LeafPath {
    from: Configuration,
    to: Configuration,
    base: TimeRange,
    range: TimeRange,
    constraints: Option<Arc<ConstraintSet>>,
    edge: Option<EdgeId>,
}

impl LeafPath {
    /// Interpolation over `[0, distance(from, to)]`.
    pub fn straight(from: Configuration, to: Configuration) -> Self {
        let length = from.distance(&to);
        Self::over(from, to, TimeRange::new(0.0, length))
    }

    /// Interpolation over an explicit parametrisation interval.
    pub fn over(from: Configuration, to: Configuration, range: TimeRange) -> Self {
        debug_assert_eq!(from.dim(), to.dim(), "endpoints must share a dimension");
        Self {
            from,
            to,
            base: range,
            range,
            constraints: None,
            edge: None,
        }
    }

    /// Project every evaluated configuration onto `constraints`.
    pub fn with_constraints(mut self, constraints: Arc<ConstraintSet>) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_edge(mut self, edge: EdgeId) -> Self {
        self.edge = Some(edge);
        self
    }

    pub fn time_range(&self) -> TimeRange {
        self.range
    }

    pub fn output_size(&self) -> usize {
        self.from.dim()
    }

    pub fn constraints(&self) -> Option<&Arc<ConstraintSet>> {
        self.constraints.as_ref()
    }

    /// Edge of the constraint graph that built this path, if any.
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    pub fn eval(&self, t: f64) -> Result<Configuration> {
        if !self.range.contains(t) {
            return Err(Error::InvalidPath(format!(
                "time {t} outside of path range {}",
                self.range
            )));
        }
        let span = self.base.length();
        let s = if span > 0.0 {
            ((t - self.base.start) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut q = self.from.interpolate(&self.to, s);
        if let Some(constraints) = &self.constraints {
            if !constraints.project(&mut q) {
                return Err(Error::Projection {
                    time: t,
                    context: format!("constraints '{}' cannot be satisfied", constraints.name()),
                });
            }
        }
        Ok(q)
    }

    /// Restrict to a sub-window. The parametrisation is unchanged, so the
    /// extracted path evaluates identically on `range`.
    pub fn extract(&self, range: TimeRange) -> Result<LeafPath> {
        if !self.range.contains_range(&range) {
            return Err(Error::InvalidPath(format!(
                "cannot extract {range} from path over {}",
                self.range
            )));
        }
        let mut part = self.clone();
        part.range = TimeRange::new(
            range.start.max(self.range.start),
            range.end.min(self.range.end),
        );
        Ok(part)
    }
}

impl PartialEq for LeafPath {
    fn eq(&self, other: &Self) -> bool {
        let same_constraints = match (&self.constraints, &other.constraints) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.from == other.from
            && self.to == other.to
            && self.base == other.base
            && self.range == other.range
            && self.edge == other.edge
            && same_constraints
    }
}

// ============================================================================
// PathVector
// ============================================================================

/// Ordered concatenation of sub-paths, parametrised over `[0, Σ lengths]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathVector {
    output_size: usize,
    paths: Vec<Path>,
}

impl PathVector {
    pub fn new(output_size: usize) -> Self {
        Self { output_size, paths: Vec::new() }
    }

    pub fn from_paths(output_size: usize, paths: impl IntoIterator<Item = Path>) -> Result<Self> {
        let mut vector = Self::new(output_size);
        for path in paths {
            vector.append(path)?;
        }
        Ok(vector)
    }

    /// Append a sub-path. Composites are nested, not flattened.
    pub fn append(&mut self, path: Path) -> Result<()> {
        if path.output_size() != self.output_size {
            return Err(Error::InvalidPath(format!(
                "cannot append a path of dimension {} to a vector of dimension {}",
                path.output_size(),
                self.output_size
            )));
        }
        self.paths.push(path);
        Ok(())
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    pub fn path_at_rank(&self, rank: usize) -> Option<&Path> {
        self.paths.get(rank)
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(0.0, self.paths.iter().map(Path::length).sum())
    }

    /// Sub-path covering `t`, with `t` translated into its own time.
    fn locate(&self, t: f64) -> Result<(&Path, f64)> {
        let mut offset = 0.0;
        for (i, path) in self.paths.iter().enumerate() {
            let len = path.length();
            let last = i + 1 == self.paths.len();
            if t <= offset + len + TIME_EPS || last {
                let local = (path.time_range().start + (t - offset))
                    .clamp(path.time_range().start, path.time_range().end);
                return Ok((path, local));
            }
            offset += len;
        }
        Err(Error::InvalidPath("evaluating an empty path vector".into()))
    }

    pub fn eval(&self, t: f64) -> Result<Configuration> {
        if !self.time_range().contains(t) {
            return Err(Error::InvalidPath(format!(
                "time {t} outside of path range {}",
                self.time_range()
            )));
        }
        let (path, local) = self.locate(t)?;
        path.eval(local)
    }

    pub fn extract(&self, range: TimeRange) -> Result<PathVector> {
        if !self.time_range().contains_range(&range) {
            return Err(Error::InvalidPath(format!(
                "cannot extract {range} from path vector over {}",
                self.time_range()
            )));
        }
        let mut part = PathVector::new(self.output_size);
        if range.length() <= TIME_EPS {
            let (path, local) = self.locate(range.start)?;
            part.append(path.extract(TimeRange::point(local))?)?;
            return Ok(part);
        }
        let mut offset = 0.0;
        for path in &self.paths {
            let len = path.length();
            let lo = range.start.max(offset);
            let hi = range.end.min(offset + len);
            if hi - lo > TIME_EPS {
                let sub = path.time_range().start;
                part.append(path.extract(TimeRange::new(sub + lo - offset, sub + hi - offset))?)?;
            }
            offset += len;
        }
        Ok(part)
    }
}

// ============================================================================
// Path
// ============================================================================

/// A leaf interpolation or a composite of sub-paths.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    Leaf(LeafPath),
    Composite(PathVector),
}

impl Path {
    pub fn time_range(&self) -> TimeRange {
        match self {
            Path::Leaf(leaf) => leaf.time_range(),
            Path::Composite(vector) => vector.time_range(),
        }
    }

    pub fn length(&self) -> f64 {
        self.time_range().length()
    }

    pub fn output_size(&self) -> usize {
        match self {
            Path::Leaf(leaf) => leaf.output_size(),
            Path::Composite(vector) => vector.output_size(),
        }
    }

    pub fn eval(&self, t: f64) -> Result<Configuration> {
        match self {
            Path::Leaf(leaf) => leaf.eval(t),
            Path::Composite(vector) => vector.eval(t),
        }
    }

    pub fn initial(&self) -> Result<Configuration> {
        self.eval(self.time_range().start)
    }

    pub fn end(&self) -> Result<Configuration> {
        self.eval(self.time_range().end)
    }

    pub fn extract(&self, range: TimeRange) -> Result<Path> {
        match self {
            Path::Leaf(leaf) => leaf.extract(range).map(Path::Leaf),
            Path::Composite(vector) => vector.extract(range).map(Path::Composite),
        }
    }

    /// Tag every leaf as built by `edge`.
    pub fn with_edge(self, edge: EdgeId) -> Path {
        match self {
            Path::Leaf(leaf) => Path::Leaf(leaf.with_edge(edge)),
            Path::Composite(vector) => Path::Composite(PathVector {
                output_size: vector.output_size,
                paths: vector.paths.into_iter().map(|p| p.with_edge(edge)).collect(),
            }),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafPath> {
        match self {
            Path::Leaf(leaf) => Some(leaf),
            Path::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&PathVector> {
        match self {
            Path::Leaf(_) => None,
            Path::Composite(vector) => Some(vector),
        }
    }
}

impl From<LeafPath> for Path {
    fn from(leaf: LeafPath) -> Self {
        Path::Leaf(leaf)
    }
}

impl From<PathVector> for Path {
    fn from(vector: PathVector) -> Self {
        Path::Composite(vector)
    }
}

// ============================================================================
// Tests
// ============================================================================
