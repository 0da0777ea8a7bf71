//! Display rotation and the mapping between framebuffer and oriented space.
//!
//! Framebuffer space is the unrotated pixel grid, origin top-left. Oriented
//! space is what the user sees once the display is turned clockwise by the
//! configured rotation; for 90 and 270 its width and height are swapped.

use crate::error::DisplayError;
use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Clockwise display rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// True when width and height trade places.
    pub fn is_portrait(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    pub fn oriented_size(self, size: UVec2) -> UVec2 {
        if self.is_portrait() {
            UVec2::new(size.y, size.x)
        } else {
            size
        }
    }

    /// Map a framebuffer point into oriented space. `size` is the framebuffer size.
    pub fn to_oriented(self, point: Vec2, size: Vec2) -> Vec2 {
        match self {
            Self::Deg0 => point,
            Self::Deg90 => Vec2::new(size.y - point.y, point.x),
            Self::Deg180 => size - point,
            Self::Deg270 => Vec2::new(point.y, size.x - point.x),
        }
    }

    /// Inverse of [`Rotation::to_oriented`]. `size` is still the framebuffer size.
    pub fn from_oriented(self, point: Vec2, size: Vec2) -> Vec2 {
        match self {
            Self::Deg0 => point,
            Self::Deg90 => Vec2::new(point.y, size.y - point.x),
            Self::Deg180 => size - point,
            Self::Deg270 => Vec2::new(size.x - point.y, point.x),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = DisplayError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or_else(|| {
            DisplayError::InvalidParameter(format!(
                "rotation must be one of 0, 90, 180, 270, got {degrees}"
            ))
        })
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}
