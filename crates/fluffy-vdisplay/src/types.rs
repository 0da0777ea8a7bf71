use crate::error::{DisplayError, DisplayResult};
use crate::transform::Rotation;
use glam::UVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters per inch, for converting pixel density to physical size.
const MM_PER_INCH: f32 = 25.4;

/// Process-unique identifier of a virtual display. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisplayId(pub(crate) u32);

impl DisplayId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_uvec2(self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

impl From<UVec2> for Resolution {
    fn from(v: UVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Physical pixel grid vs. the resolution reported to the rest of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveResolution {
    pub physical: Resolution,
    pub logical: Resolution,
    /// Integer factor from logical to physical pixels (1 or 2).
    pub scale: u32,
}

impl EffectiveResolution {
    /// hiDPI halves the logical resolution, rounding down but never below 1.
    pub fn new(width: u32, height: u32, hi_dpi: bool) -> Self {
        let physical = Resolution::new(width, height);
        if hi_dpi {
            Self {
                physical,
                logical: Resolution::new((width / 2).max(1), (height / 2).max(1)),
                scale: 2,
            }
        } else {
            Self {
                physical,
                logical: physical,
                scale: 1,
            }
        }
    }
}

/// Lifecycle state of a registry-owned display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    Active,
    Destroyed,
}

/// A validated virtual display configuration.
///
/// Fields are private: the only way to obtain one is through [`VirtualDisplayConfig::new`],
/// so every instance satisfies the positivity and rotation constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDisplayConfig {
    width: u32,
    height: u32,
    ppi: u32,
    hi_dpi: bool,
    name: String,
    rotation: Rotation,
}

impl VirtualDisplayConfig {
    /// Validate raw parameters. Nothing is allocated when this fails.
    pub fn new(
        width: i32,
        height: i32,
        ppi: i32,
        hi_dpi: bool,
        name: impl Into<String>,
        rotation: i32,
    ) -> DisplayResult<Self> {
        let width = positive("width", width)?;
        let height = positive("height", height)?;
        let ppi = positive("ppi", ppi)?;
        let rotation = Rotation::try_from(rotation)?;
        Ok(Self {
            width,
            height,
            ppi,
            hi_dpi,
            name: name.into(),
            rotation,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ppi(&self) -> u32 {
        self.ppi
    }

    pub fn hi_dpi(&self) -> bool {
        self.hi_dpi
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn effective_resolution(&self) -> EffectiveResolution {
        EffectiveResolution::new(self.width, self.height, self.hi_dpi)
    }

    /// Physical width and height in millimeters.
    pub fn physical_size_mm(&self) -> (f32, f32) {
        let ppi = self.ppi as f32;
        (
            MM_PER_INCH * self.width as f32 / ppi,
            MM_PER_INCH * self.height as f32 / ppi,
        )
    }

    /// Logical resolution as the user sees it after rotation.
    pub fn oriented_bounds(&self) -> Resolution {
        let logical = self.effective_resolution().logical;
        self.rotation.oriented_size(logical.as_uvec2()).into()
    }
}

fn positive(field: &'static str, value: i32) -> DisplayResult<u32> {
    if value > 0 {
        Ok(value as u32)
    } else {
        Err(DisplayError::InvalidParameter(format!(
            "{field} must be positive, got {value}"
        )))
    }
}
