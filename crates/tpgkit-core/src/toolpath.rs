//! Motion primitives and the toolpath sink.
//!
//! A tool path generator never owns the toolpath it writes to. The host
//! hands it a [`ToolpathSink`] and the generator only appends.

use crate::error::ToolpathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of tool movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    /// Move at maximum speed, not cutting
    Rapid,
    /// Move at feed rate, cutting
    Feed,
}

impl MotionKind {
    /// Keyword used in the text form
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Rapid => "rapid",
            Self::Feed => "feed",
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

impl FromStr for MotionKind {
    type Err = ToolpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rapid" => Ok(Self::Rapid),
            "feed" => Ok(Self::Feed),
            other => Err(ToolpathError::UnknownMotionKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// A single rapid or feed move to an absolute target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionPrimitive {
    pub kind: MotionKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionPrimitive {
    /// Creates a rapid move.
    pub fn rapid(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: MotionKind::Rapid,
            x,
            y,
            z,
        }
    }

    /// Creates a feed move.
    pub fn feed(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: MotionKind::Feed,
            x,
            y,
            z,
        }
    }

    /// Straight-line distance to another primitive's target.
    pub fn distance_to(&self, other: &MotionPrimitive) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Text form: `rapid(0,0,0.1)`.
impl fmt::Display for MotionPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{},{})", self.kind, self.x, self.y, self.z)
    }
}

impl FromStr for MotionPrimitive {
    type Err = ToolpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| ToolpathError::Malformed {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let text = s.trim();
        let open = text.find('(').ok_or_else(|| malformed("missing '('"))?;
        let args = text[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| malformed("missing ')'"))?;
        let kind: MotionKind = text[..open].parse()?;

        let coords = args
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| malformed(&e.to_string()))?;
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(malformed("coordinates must be finite"));
        }

        match coords.as_slice() {
            [x, y, z] => Ok(Self {
                kind,
                x: *x,
                y: *y,
                z: *z,
            }),
            _ => Err(malformed("expected three coordinates")),
        }
    }
}

/// Append-only collector of motion primitives owned by the host.
pub trait ToolpathSink {
    /// Append one primitive.
    fn add_primitive(&mut self, primitive: MotionPrimitive);

    /// Append a rapid move.
    fn rapid(&mut self, x: f64, y: f64, z: f64) {
        self.add_primitive(MotionPrimitive::rapid(x, y, z));
    }

    /// Append a feed move.
    fn feed(&mut self, x: f64, y: f64, z: f64) {
        self.add_primitive(MotionPrimitive::feed(x, y, z));
    }
}

impl ToolpathSink for Vec<MotionPrimitive> {
    fn add_primitive(&mut self, primitive: MotionPrimitive) {
        self.push(primitive);
    }
}

/// A complete toolpath made up of ordered primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    pub primitives: Vec<MotionPrimitive>,
}

impl Toolpath {
    /// Creates a new empty toolpath.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionPrimitive> {
        self.primitives.iter()
    }

    /// Text form of every primitive, one per entry.
    pub fn to_text_lines(&self) -> Vec<String> {
        self.primitives.iter().map(ToString::to_string).collect()
    }

    /// Builds a toolpath from text-form lines, skipping blank ones.
    pub fn from_text_lines<I, S>(lines: I) -> Result<Self, ToolpathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let primitives = lines
            .into_iter()
            .filter(|l| !l.as_ref().trim().is_empty())
            .map(|l| l.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { primitives })
    }

    /// Total travelled distance between consecutive targets.
    pub fn total_length(&self) -> f64 {
        self.primitives
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    /// Distance travelled while cutting.
    pub fn feed_length(&self) -> f64 {
        self.primitives
            .windows(2)
            .filter(|w| w[1].kind == MotionKind::Feed)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

impl ToolpathSink for Toolpath {
    fn add_primitive(&mut self, primitive: MotionPrimitive) {
        self.primitives.push(primitive);
    }
}
