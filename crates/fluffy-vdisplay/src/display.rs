use crate::types::{DisplayId, DisplayState, EffectiveResolution, Resolution, VirtualDisplayConfig};
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A registry-owned virtual display.
///
/// Configuration is fixed at creation; changing it means destroy and recreate.
#[derive(Debug)]
pub struct VirtualDisplay {
    id: DisplayId,
    config: VirtualDisplayConfig,
    effective_resolution: EffectiveResolution,
    destroyed: AtomicBool,
}

impl VirtualDisplay {
    pub(crate) fn new(id: DisplayId, config: VirtualDisplayConfig) -> Self {
        let effective_resolution = config.effective_resolution();
        Self {
            id,
            config,
            effective_resolution,
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> DisplayId {
        self.id
    }

    pub fn config(&self) -> &VirtualDisplayConfig {
        &self.config
    }

    pub fn effective_resolution(&self) -> EffectiveResolution {
        self.effective_resolution
    }

    pub fn physical_size_mm(&self) -> (f32, f32) {
        self.config.physical_size_mm()
    }

    pub fn oriented_bounds(&self) -> Resolution {
        self.config.oriented_bounds()
    }

    pub fn state(&self) -> DisplayState {
        if self.destroyed.load(Ordering::Acquire) {
            DisplayState::Destroyed
        } else {
            DisplayState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == DisplayState::Active
    }

    pub(crate) fn mark_destroyed(&self) {
        self.destroyed.store(true, Ordering::Release);
    }
}

/// Read-only view of a display owned by a [`VirtualDisplayRegistry`].
///
/// Cloning a handle does not duplicate the display. A handle outlives its
/// display: after destroy it keeps reporting the config with state `Destroyed`.
///
/// [`VirtualDisplayRegistry`]: crate::VirtualDisplayRegistry
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    pub(crate) display: Arc<VirtualDisplay>,
}

impl DisplayHandle {
    pub(crate) fn new(display: Arc<VirtualDisplay>) -> Self {
        Self { display }
    }

    /// Whether both handles point at the same registry entry.
    pub fn same_display(&self, other: &DisplayHandle) -> bool {
        Arc::ptr_eq(&self.display, &other.display)
    }
}

impl Deref for DisplayHandle {
    type Target = VirtualDisplay;

    fn deref(&self) -> &VirtualDisplay {
        &self.display
    }
}
