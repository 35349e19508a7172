//! Events that trigger button state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// A polarity-adjusted reading arrived (true = pressed)
    Level(bool),
    /// The published value was reset (no subscribers, or source gone)
    Cleared,
}

impl From<Option<bool>> for ButtonEvent {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(pressed) => ButtonEvent::Level(pressed),
            None => ButtonEvent::Cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_published_value() {
        assert_eq!(ButtonEvent::from(Some(true)), ButtonEvent::Level(true));
        assert_eq!(ButtonEvent::from(Some(false)), ButtonEvent::Level(false));
        assert_eq!(ButtonEvent::from(None), ButtonEvent::Cleared);
    }
}
