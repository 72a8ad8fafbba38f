use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete "emotional distance" indicator, 0 (farthest) to 4 (closest).
///
/// The value can only be built through [`EmotionLevel::new`], deserialization
/// or [`EmotionLevel::clamp_delta`], so it never leaves `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EmotionLevel(u8);

/// Display text per level, farthest first.
const LABELS: [&str; 5] = [
    "離れたい",
    "どちらかといえば離れたい",
    "どちらともいえない",
    "どちらかといえば近づきたい",
    "近づきたい",
];

impl EmotionLevel {
    pub const MIN: EmotionLevel = EmotionLevel(0);
    pub const NEUTRAL: EmotionLevel = EmotionLevel(2);
    pub const MAX: EmotionLevel = EmotionLevel(4);

    pub fn new(value: i64) -> Result<Self, CoreError> {
        if (0..=4).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::EmotionOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `current + delta`, clamped to `0..=4`.
    pub fn clamp_delta(self, delta: i8) -> Self {
        let next = (self.0 as i16 + delta as i16).clamp(Self::MIN.0 as i16, Self::MAX.0 as i16);
        Self(next as u8)
    }

    /// Applies a single user step. Returns `None` when the scale is already
    /// at the bound in that direction.
    pub fn step(self, delta: EmotionDelta) -> Option<Self> {
        let next = self.clamp_delta(delta.as_i8());
        (next != self).then_some(next)
    }

    pub fn label(self) -> &'static str {
        LABELS[usize::from(self.0)]
    }

    pub fn all() -> impl Iterator<Item = EmotionLevel> {
        (Self::MIN.0..=Self::MAX.0).map(EmotionLevel)
    }
}

impl Default for EmotionLevel {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<i64> for EmotionLevel {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmotionLevel> for i64 {
    fn from(level: EmotionLevel) -> Self {
        level.0 as i64
    }
}

impl fmt::Display for EmotionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One user step on the emotion scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionDelta {
    /// Towards 4 (right arrow).
    Closer,
    /// Towards 0 (left arrow).
    Farther,
}

impl EmotionDelta {
    pub fn as_i8(self) -> i8 {
        match self {
            EmotionDelta::Closer => 1,
            EmotionDelta::Farther => -1,
        }
    }
}
