pub mod display;
pub mod error;
pub mod host;
pub mod registry;
pub mod transform;
pub mod types;

pub use display::{DisplayHandle, VirtualDisplay};
pub use error::{DisplayError, DisplayResult, HostError};
pub use host::SimulatedHost;
pub use registry::VirtualDisplayRegistry;
pub use transform::Rotation;
pub use types::{DisplayId, DisplayState, EffectiveResolution, Resolution, VirtualDisplayConfig};

/// Refresh rate every virtual display is registered with.
pub const DEFAULT_REFRESH_HZ: f32 = 60.0;

/// Everything the host display subsystem needs to present a virtual display.
#[derive(Debug, Clone, PartialEq)]
pub struct HostDisplayDescriptor {
    /// Registry-assigned display ID.
    pub id: DisplayId,
    pub name: String,
    /// Backing pixel grid.
    pub physical: Resolution,
    /// Resolution reported to the rest of the system.
    pub logical: Resolution,
    /// Physical size in millimeters, derived from the pixel density.
    pub size_mm: (f32, f32),
    pub rotation: Rotation,
    pub hi_dpi: bool,
    pub refresh_hz: f32,
}

impl HostDisplayDescriptor {
    pub(crate) fn for_display(display: &VirtualDisplay) -> Self {
        let config = display.config();
        let resolution = display.effective_resolution();
        Self {
            id: display.id(),
            name: config.name().to_owned(),
            physical: resolution.physical,
            logical: resolution.logical,
            size_mm: config.physical_size_mm(),
            rotation: config.rotation(),
            hi_dpi: config.hi_dpi(),
            refresh_hz: DEFAULT_REFRESH_HZ,
        }
    }
}

/// Trait for the platform service that actually presents virtual displays.
///
/// The registry calls into it while holding its lock, so implementations see
/// register/unregister calls strictly one at a time.
pub trait HostDisplaySubsystem: Send {
    /// Make a new virtual display visible to the operating environment.
    fn register(&mut self, descriptor: &HostDisplayDescriptor) -> Result<(), HostError>;
    /// Remove a previously registered virtual display.
    fn unregister(&mut self, id: DisplayId) -> Result<(), HostError>;
}
