//! Latest-value holder with a fixed-capacity observer list
//!
//! Observers are borrowed for `'a` and notified synchronously, in
//! registration order, every time a value is set. Dispatch takes
//! `&mut self`, so an observer cannot reach back into the value while
//! it is being notified.

use heapless::Vec;

/// Receives values published by a [`LiveValue`]
///
/// `None` means "no value": the source is inactive or was reset.
pub trait Observer<T> {
    fn on_changed(&self, value: Option<T>);
}

/// Identifies a registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObserverId(u16);

/// Errors when registering an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObserveError {
    /// Observer list is at capacity
    Full,
}

/// Latest value plus the observers to notify
pub struct LiveValue<'a, T, const N: usize> {
    value: Option<T>,
    observers: Vec<(ObserverId, &'a dyn Observer<T>), N>,
    next_id: u16,
}

impl<'a, T: Copy, const N: usize> Default for LiveValue<'a, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Copy, const N: usize> LiveValue<'a, T, N> {
    /// Create an empty value with no observers
    pub const fn new() -> Self {
        Self {
            value: None,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register an observer
    ///
    /// If a value is present it is delivered to the new observer
    /// immediately.
    pub fn observe(&mut self, observer: &'a dyn Observer<T>) -> Result<ObserverId, ObserveError> {
        if self.observers.is_full() {
            return Err(ObserveError::Full);
        }

        // Ids wrap; skip any still held by a long-lived observer
        let mut id = ObserverId(self.next_id);
        while self.contains(id) {
            id = ObserverId(id.0.wrapping_add(1));
        }
        self.next_id = id.0.wrapping_add(1);

        self.observers
            .push((id, observer))
            .map_err(|_| ObserveError::Full)?;

        if let Some(value) = self.value {
            observer.on_changed(Some(value));
        }
        Ok(id)
    }

    /// Unregister an observer
    ///
    /// Returns false if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        match self.observers.iter().position(|(oid, _)| *oid == id) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Store a value and notify every observer
    pub fn set_value(&mut self, value: Option<T>) {
        self.value = value;
        for (_, observer) in self.observers.iter() {
            observer.on_changed(value);
        }
    }

    /// Latest value
    pub fn value(&self) -> Option<T> {
        self.value
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Check if `id` is registered
    pub fn contains(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|(oid, _)| *oid == id)
    }
}
