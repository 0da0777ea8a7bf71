use crate::display::{DisplayHandle, VirtualDisplay};
use crate::error::{DisplayError, DisplayResult};
use crate::types::{DisplayId, VirtualDisplayConfig};
use crate::{HostDisplayDescriptor, HostDisplaySubsystem};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Owns every active virtual display and the host subsystem they live on.
///
/// All state sits behind one mutex. ID allocation, host registration and
/// table insertion happen under a single lock acquisition, so concurrent
/// creations never observe each other half-done.
pub struct VirtualDisplayRegistry<H: HostDisplaySubsystem> {
    inner: Mutex<RegistryState<H>>,
}

struct RegistryState<H> {
    /// Next ID to hand out. 0 once `u32::MAX` has been issued.
    next_id: u32,
    displays: BTreeMap<DisplayId, Arc<VirtualDisplay>>,
    /// Destroyed displays the host failed to release.
    pending_release: BTreeSet<DisplayId>,
    host: H,
}

impl<H: HostDisplaySubsystem> RegistryState<H> {
    fn allocate_id(&mut self) -> DisplayResult<DisplayId> {
        let id = self.next_id;
        if id == 0 {
            return Err(DisplayError::IdsExhausted);
        }
        self.next_id = id.wrapping_add(1);
        Ok(DisplayId(id))
    }

    /// Retry host deregistration for displays whose release failed earlier.
    fn release_pending(&mut self) {
        let host = &mut self.host;
        self.pending_release.retain(|&id| match host.unregister(id) {
            Ok(()) => {
                info!(%id, "Released virtual display left behind by the host");
                false
            }
            Err(e) => {
                debug!(%id, %e, "Host still holds virtual display");
                true
            }
        });
    }

    fn unregister_or_defer(&mut self, id: DisplayId) -> DisplayResult<()> {
        self.host.unregister(id).map_err(|e| {
            warn!(%id, %e, "Host failed to deregister virtual display, will retry");
            self.pending_release.insert(id);
            DisplayError::HostDeregistrationFailed {
                id,
                reason: e.to_string(),
            }
        })
    }
}

impl<H: HostDisplaySubsystem> VirtualDisplayRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            inner: Mutex::new(RegistryState {
                next_id: 1,
                displays: BTreeMap::new(),
                pending_release: BTreeSet::new(),
                host,
            }),
        }
    }

    /// Validate raw parameters and create a virtual display.
    pub fn create_virtual_display(
        &self,
        width: i32,
        height: i32,
        ppi: i32,
        hi_dpi: bool,
        name: &str,
        rotation: i32,
    ) -> DisplayResult<DisplayHandle> {
        let config = VirtualDisplayConfig::new(width, height, ppi, hi_dpi, name, rotation)
            .inspect_err(|e| {
                debug!(width, height, ppi, rotation, %e, "Rejected virtual display parameters");
            })?;
        self.create(config)
    }

    /// Create a virtual display from an already validated config.
    ///
    /// On any host failure the registry is left exactly as it was, except
    /// that the allocated ID is retired rather than handed out again.
    pub fn create(&self, config: VirtualDisplayConfig) -> DisplayResult<DisplayHandle> {
        let mut state = self.lock();
        state.release_pending();
        let id = state.allocate_id()?;
        let vd = VirtualDisplay::new(id, config);
        let descriptor = HostDisplayDescriptor::for_display(&vd);

        if let Err(e) = state.host.register(&descriptor) {
            warn!(%id, name = %descriptor.name, %e, "Host refused virtual display");
            return Err(e.into());
        }

        let vd = Arc::new(vd);
        state.displays.insert(id, Arc::clone(&vd));
        info!(
            %id,
            name = %descriptor.name,
            physical = %descriptor.physical,
            logical = %descriptor.logical,
            ppi = vd.config().ppi(),
            rotation = descriptor.rotation.degrees(),
            active = state.displays.len(),
            "Virtual display created"
        );
        Ok(DisplayHandle::new(vd))
    }

    /// Destroy the display behind `handle` and deregister it from the host.
    ///
    /// The display is removed and marked destroyed even if the host fails to
    /// deregister it; that failure is still reported and the release is
    /// retried on the next create, `destroy_all` or drop.
    pub fn destroy(&self, handle: &DisplayHandle) -> DisplayResult<()> {
        let mut state = self.lock();
        let id = handle.id();
        let owned = state
            .displays
            .get(&id)
            .is_some_and(|d| Arc::ptr_eq(d, &handle.display));
        if !owned {
            warn!(%id, "Destroy requested for unknown or destroyed display");
            return Err(DisplayError::InvalidHandle(id));
        }

        state.displays.remove(&id);
        handle.display.mark_destroyed();
        state.unregister_or_defer(id)?;
        info!(%id, active = state.displays.len(), "Virtual display destroyed");
        Ok(())
    }

    /// Destroy by ID, for callers that only kept the identifier.
    pub fn destroy_id(&self, id: DisplayId) -> DisplayResult<()> {
        let handle = self.get(id).ok_or(DisplayError::InvalidHandle(id))?;
        self.destroy(&handle)
    }

    /// Destroy every active display. Returns how many were destroyed.
    ///
    /// Keeps going past host failures and reports the first one at the end.
    pub fn destroy_all(&self) -> DisplayResult<usize> {
        let mut state = self.lock();
        state.release_pending();
        let displays = std::mem::take(&mut state.displays);
        let count = displays.len();
        let mut first_error = None;

        for (id, vd) in displays {
            vd.mark_destroyed();
            if let Err(e) = state.unregister_or_defer(id) {
                first_error.get_or_insert(e);
            }
        }

        info!(count, "Destroyed all virtual displays");
        match first_error {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }

    pub fn get(&self, id: DisplayId) -> Option<DisplayHandle> {
        self.lock()
            .displays
            .get(&id)
            .map(|d| DisplayHandle::new(Arc::clone(d)))
    }

    /// All active displays, ordered by ID.
    pub fn list(&self) -> Vec<DisplayHandle> {
        self.lock()
            .displays
            .values()
            .map(|d| DisplayHandle::new(Arc::clone(d)))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.lock().displays.len()
    }

    #[cfg(test)]
    fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.lock().host)
    }

    #[cfg(test)]
    fn with_host_mut<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.lock().host)
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState<H>> {
        // Every mutation is a single insert or remove, so a panic elsewhere
        // cannot leave the table inconsistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H: HostDisplaySubsystem> Drop for VirtualDisplayRegistry<H> {
    fn drop(&mut self) {
        let state = self
            .inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        state.release_pending();
        let displays = std::mem::take(&mut state.displays);
        for (id, vd) in displays {
            vd.mark_destroyed();
            if let Err(e) = state.host.unregister(id) {
                warn!(%id, %e, "Host failed to deregister virtual display on shutdown");
            }
        }
        for id in &state.pending_release {
            warn!(%id, "Host never released virtual display");
        }
    }
}
