//! Reference-counted activation gate
//!
//! Tracks how many subscribers hold a resource and reports the 0→1 and
//! 1→0 transitions, which is where the resource is acquired and released.

/// Result of a subscriber count change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activation {
    /// First subscriber arrived: acquire the resource
    Activated,
    /// Last subscriber left: release the resource
    Deactivated,
    /// Count changed without crossing zero
    Unchanged,
}

/// Subscriber counter with 0↔1 edge reporting
///
/// The count is bounded by the observer capacity of the owning value plus
/// one owner subscription, far below `usize::MAX`.
#[derive(Debug, Clone, Default)]
pub struct ActivationGate {
    subscribers: usize,
}

impl ActivationGate {
    /// Create a gate with no subscribers
    pub const fn new() -> Self {
        Self { subscribers: 0 }
    }

    /// Register one subscriber
    pub fn acquire(&mut self) -> Activation {
        self.subscribers += 1;
        if self.subscribers == 1 {
            Activation::Activated
        } else {
            Activation::Unchanged
        }
    }

    /// Drop one subscriber
    ///
    /// Releasing an idle gate is a no-op.
    pub fn release(&mut self) -> Activation {
        match self.subscribers {
            0 => Activation::Unchanged,
            1 => {
                self.subscribers = 0;
                Activation::Deactivated
            }
            _ => {
                self.subscribers -= 1;
                Activation::Unchanged
            }
        }
    }

    /// Check if at least one subscriber is registered
    pub fn is_active(&self) -> bool {
        self.subscribers > 0
    }

    /// Current subscriber count
    pub fn subscribers(&self) -> usize {
        self.subscribers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_and_last_subscriber() {
        let mut gate = ActivationGate::new();
        assert!(!gate.is_active());

        assert_eq!(gate.acquire(), Activation::Activated);
        assert_eq!(gate.acquire(), Activation::Unchanged);
        assert_eq!(gate.subscribers(), 2);

        assert_eq!(gate.release(), Activation::Unchanged);
        assert!(gate.is_active());
        assert_eq!(gate.release(), Activation::Deactivated);
        assert!(!gate.is_active());
    }

    #[test]
    fn test_release_when_idle() {
        let mut gate = ActivationGate::new();
        assert_eq!(gate.release(), Activation::Unchanged);
        assert_eq!(gate.release(), Activation::Unchanged);
        assert_eq!(gate.subscribers(), 0);

        // Still activates normally afterwards
        assert_eq!(gate.acquire(), Activation::Activated);
    }

    #[test]
    fn test_many_subscribers_balance() {
        let mut gate = ActivationGate::new();
        assert_eq!(gate.acquire(), Activation::Activated);
        for _ in 1..300 {
            assert_eq!(gate.acquire(), Activation::Unchanged);
        }
        assert_eq!(gate.subscribers(), 300);

        for _ in 1..300 {
            assert_eq!(gate.release(), Activation::Unchanged);
        }
        assert!(gate.is_active());
        assert_eq!(gate.release(), Activation::Deactivated);
    }

    proptest! {
        /// Activations and deactivations alternate, and each matches a
        /// zero crossing of the subscriber count.
        #[test]
        fn prop_transitions_match_zero_crossings(ops in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut gate = ActivationGate::new();
            let mut count: u32 = 0;
            let mut active = false;

            for acquire in ops {
                let before = count;
                let result = if acquire {
                    count += 1;
                    gate.acquire()
                } else {
                    count = count.saturating_sub(1);
                    gate.release()
                };

                match result {
                    Activation::Activated => {
                        prop_assert!(!active);
                        prop_assert_eq!(before, 0);
                        active = true;
                    }
                    Activation::Deactivated => {
                        prop_assert!(active);
                        prop_assert_eq!(count, 0);
                        active = false;
                    }
                    Activation::Unchanged => {
                        prop_assert_eq!(before == 0, count == 0);
                    }
                }
                prop_assert_eq!(gate.is_active(), count > 0);
            }
        }
    }
}
