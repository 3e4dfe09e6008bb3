//! Input translation
//!
//! Platform events collapse into a handful of semantic actions.

/// Key code that flaps (and restarts after a crash)
pub const ACTION_KEY: &str = "Space";
/// Key code that mutes and unmutes sound
pub const MUTE_KEY: &str = "KeyM";

/// A platform input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Key pressed, identified by its physical code (`KeyboardEvent.code`)
    KeyDown(String),
    /// Mouse/pointer press on the play area
    PointerDown,
    /// Finger down on the play area
    TouchStart,
    /// Start or restart button
    StartButton,
}

/// Semantic action the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a new run (menu or game over)
    Start,
    /// Flap if running
    Flap,
    /// Restart after a crash, then flap
    ActionKey,
    /// Mute or unmute sound effects
    ToggleMute,
}

/// Result of translating a raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub action: Action,
    /// Platform default (page scroll, emulated mouse events) must be suppressed
    pub suppress_default: bool,
}

/// Map a platform event to an action, if it has one
pub fn translate(input: &RawInput) -> Option<Binding> {
    let (action, suppress_default) = match input {
        RawInput::KeyDown(code) if code == ACTION_KEY => (Action::ActionKey, true),
        RawInput::KeyDown(code) if code == MUTE_KEY => (Action::ToggleMute, false),
        RawInput::KeyDown(_) => return None,
        RawInput::PointerDown => (Action::Flap, false),
        RawInput::TouchStart => (Action::Flap, true),
        RawInput::StartButton => (Action::Start, false),
    };
    Some(Binding {
        action,
        suppress_default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_action_key() {
        let binding = translate(&RawInput::KeyDown("Space".into())).unwrap();
        assert_eq!(binding.action, Action::ActionKey);
        assert!(binding.suppress_default);
    }

    #[test]
    fn test_m_toggles_mute() {
        let binding = translate(&RawInput::KeyDown("KeyM".into())).unwrap();
        assert_eq!(binding.action, Action::ToggleMute);
        assert!(!binding.suppress_default);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(translate(&RawInput::KeyDown("KeyA".into())), None);
        assert_eq!(translate(&RawInput::KeyDown("Enter".into())), None);
    }

    #[test]
    fn test_pointer_and_touch_flap() {
        let pointer = translate(&RawInput::PointerDown).unwrap();
        assert_eq!(pointer.action, Action::Flap);
        assert!(!pointer.suppress_default);

        let touch = translate(&RawInput::TouchStart).unwrap();
        assert_eq!(touch.action, Action::Flap);
        assert!(touch.suppress_default);
    }

    #[test]
    fn test_start_button() {
        assert_eq!(
            translate(&RawInput::StartButton).map(|b| b.action),
            Some(Action::Start)
        );
    }
}
