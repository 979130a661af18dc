//! Navigation events produced from encoder rotation and the push button

/// Navigation event consumed by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    /// Encoder turned one step clockwise
    Next,
    /// Encoder turned one step counter-clockwise
    Previous,
    /// Button pressed
    Select,
    /// Button held past the long-press time
    LongPress,
}

impl NavEvent {
    /// Event for one step in the direction of `steps`
    pub fn from_step(steps: i32) -> Option<Self> {
        match steps.signum() {
            1 => Some(NavEvent::Next),
            -1 => Some(NavEvent::Previous),
            _ => None,
        }
    }

    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, NavEvent::Next | NavEvent::Previous)
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(self, NavEvent::Select | NavEvent::LongPress)
    }

    /// Returns the rotation direction as a signed delta (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            NavEvent::Next => 1,
            NavEvent::Previous => -1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_step() {
        assert_eq!(NavEvent::from_step(3), Some(NavEvent::Next));
        assert_eq!(NavEvent::from_step(-1), Some(NavEvent::Previous));
        assert_eq!(NavEvent::from_step(0), None);
    }

    #[test]
    fn test_rotation_delta() {
        assert_eq!(NavEvent::Next.rotation_delta(), 1);
        assert_eq!(NavEvent::Previous.rotation_delta(), -1);
        assert_eq!(NavEvent::Select.rotation_delta(), 0);
    }

    #[test]
    fn test_classification() {
        assert!(NavEvent::Next.is_rotation());
        assert!(!NavEvent::Next.is_button());
        assert!(NavEvent::LongPress.is_button());
        assert!(!NavEvent::Select.is_rotation());
    }
}
