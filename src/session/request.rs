//! Capture request descriptions handed to the backend.

/// How often the platform should run a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Resubmitted continuously until replaced or canceled (preview).
    Repeating,
    /// Executed exactly once (still capture).
    OneShot,
}

/// Which surface a request writes into.
///
/// Preview and still requests target disjoint surfaces, so the two
/// request streams never contend for a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTarget {
    /// The live preview sink.
    Preview,
    /// The still-capture sink.
    Still,
}

/// A capture request as submitted to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Repeating or one-shot.
    pub kind: RequestKind,
    /// The single surface this request writes into.
    pub target: RequestTarget,
    /// Face-priority scene mode hint.
    pub face_priority: bool,
    /// Simple face-detection statistics hint.
    pub face_detect: bool,
}

impl CaptureRequest {
    /// The continuous preview request: preview surface only, with
    /// face-priority scene mode and simple face detection enabled.
    pub fn repeating_preview() -> Self {
        Self {
            kind: RequestKind::Repeating,
            target: RequestTarget::Preview,
            face_priority: true,
            face_detect: true,
        }
    }

    /// A one-shot still request targeting the still surface only.
    pub fn one_shot_still() -> Self {
        Self {
            kind: RequestKind::OneShot,
            target: RequestTarget::Still,
            face_priority: false,
            face_detect: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_request_shape() {
        let request = CaptureRequest::repeating_preview();
        assert_eq!(request.kind, RequestKind::Repeating);
        assert_eq!(request.target, RequestTarget::Preview);
        assert!(request.face_priority);
        assert!(request.face_detect);
    }

    #[test]
    fn test_still_request_shape() {
        let request = CaptureRequest::one_shot_still();
        assert_eq!(request.kind, RequestKind::OneShot);
        assert_eq!(request.target, RequestTarget::Still);
        assert!(!request.face_priority);
    }
}
