use crate::error::HostError;
use crate::types::DisplayId;
use crate::{HostDisplayDescriptor, HostDisplaySubsystem};
use std::collections::BTreeMap;
use tracing::info;

/// In-process host display subsystem.
///
/// Tracks registrations and enforces a display limit the way a native
/// virtual display service would, without presenting anything. Used by the
/// application shell when no platform backend is available, and by tests.
#[derive(Debug)]
pub struct SimulatedHost {
    capacity: u32,
    registered: BTreeMap<DisplayId, HostDisplayDescriptor>,
    fail_next_register: Option<String>,
    fail_next_unregister: Option<String>,
}

impl SimulatedHost {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            registered: BTreeMap::new(),
            fail_next_register: None,
            fail_next_unregister: None,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    pub fn is_registered(&self, id: DisplayId) -> bool {
        self.registered.contains_key(&id)
    }

    pub fn descriptor(&self, id: DisplayId) -> Option<&HostDisplayDescriptor> {
        self.registered.get(&id)
    }

    /// Make the next `register` call fail with `reason`.
    #[cfg(test)]
    pub(crate) fn fail_next_registration(&mut self, reason: impl Into<String>) {
        self.fail_next_register = Some(reason.into());
    }

    /// Make the next `unregister` call fail with `reason`.
    #[cfg(test)]
    pub(crate) fn fail_next_unregistration(&mut self, reason: impl Into<String>) {
        self.fail_next_unregister = Some(reason.into());
    }
}

impl HostDisplaySubsystem for SimulatedHost {
    fn register(&mut self, descriptor: &HostDisplayDescriptor) -> Result<(), HostError> {
        if let Some(reason) = self.fail_next_register.take() {
            return Err(HostError::Failed(reason));
        }
        if self.registered.len() >= self.capacity as usize {
            return Err(HostError::CapacityReached {
                limit: self.capacity,
            });
        }
        if self.registered.contains_key(&descriptor.id) {
            return Err(HostError::Failed(format!(
                "display {} is already registered",
                descriptor.id
            )));
        }

        info!(
            id = %descriptor.id,
            name = %descriptor.name,
            physical = %descriptor.physical,
            logical = %descriptor.logical,
            rotation = descriptor.rotation.degrees(),
            "Virtual display registered (simulated)"
        );
        self.registered.insert(descriptor.id, descriptor.clone());
        Ok(())
    }

    fn unregister(&mut self, id: DisplayId) -> Result<(), HostError> {
        if let Some(reason) = self.fail_next_unregister.take() {
            return Err(HostError::Failed(reason));
        }
        self.registered
            .remove(&id)
            .ok_or_else(|| HostError::Failed(format!("display {id} is not registered")))?;
        info!(
            %id,
            remaining = self.registered.len(),
            "Virtual display unregistered (simulated)"
        );
        Ok(())
    }
}
