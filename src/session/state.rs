//! Session lifecycle states.

/// The lifecycle of one camera session attempt.
///
/// ```text
/// Idle → Opening → Opened → ConfiguringSession → SessionReady
///                                                    ↓ ↑
///                                              CapturingStill
/// ```
///
/// `Closed` is reachable from every state and re-enterable: a fresh
/// surface-available event starts the next attempt. `Error` absorbs
/// every failed attempt until the device is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No device activity; waiting for a display surface.
    Idle,
    /// Device open requested; waiting for the platform callback.
    Opening,
    /// Device handle received; session configuration about to start.
    Opened,
    /// Session configuration requested; waiting for the callback.
    ConfiguringSession,
    /// Repeating preview running; still captures may be submitted.
    SessionReady,
    /// One-shot still request in flight to the platform.
    CapturingStill,
    /// Device closed; session and preview request are gone with it.
    Closed,
    /// Terminal failure; manual relaunch required.
    Error,
}

impl SessionState {
    /// Returns `true` when a still capture may be submitted.
    pub fn can_capture(self) -> bool {
        self == Self::SessionReady
    }

    /// Returns `true` for states a surface-available event may start from.
    pub fn can_open(self) -> bool {
        matches!(self, Self::Idle | Self::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ready_state_captures() {
        for state in [
            SessionState::Idle,
            SessionState::Opening,
            SessionState::Opened,
            SessionState::ConfiguringSession,
            SessionState::CapturingStill,
            SessionState::Closed,
            SessionState::Error,
        ] {
            assert!(!state.can_capture(), "{state:?} must not capture");
        }
        assert!(SessionState::SessionReady.can_capture());
    }

    #[test]
    fn test_open_only_from_idle_or_closed() {
        assert!(SessionState::Idle.can_open());
        assert!(SessionState::Closed.can_open());
        assert!(!SessionState::Opening.can_open());
        assert!(!SessionState::SessionReady.can_open());
        assert!(!SessionState::Error.can_open());
    }
}
