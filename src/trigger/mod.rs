//! Capture triggers and lifecycle registration.
//!
//! Two independent stimuli map to "request one still capture": a manual
//! user action routed from the UI, and the platform broadcast that
//! fires when headphones are pulled out (audio "becoming noisy"). A
//! second broadcast, the plug-state change, is observed for logging
//! only.
//!
//! Listeners follow the hosting screen's lifecycle: registered when it
//! becomes active, unregistered when it goes inactive. Both operations
//! are idempotent, so repeated lifecycle callbacks never double-fire a
//! trigger or fault on a missing registration.

use tracing::{debug, info};

/// Receives capture requests from the trigger layer.
pub trait CaptureRequester {
    /// Requests one still capture; ignored unless a session is ready.
    fn request_capture(&self);
}

/// Receives the display surface's creation event.
pub trait SurfaceListener {
    /// The display surface became available for preview.
    fn on_surface_created(&self);
}

/// A headphone broadcast from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadphoneEvent {
    /// Audio output is about to move to the speaker: headphones were
    /// just unplugged. Treated purely as a capture trigger.
    BecomingNoisy,
    /// Plug state changed. Per the platform contract the payload is an
    /// integer with `0` meaning unplugged; logged, never a trigger.
    PlugChanged {
        /// Raw platform payload, `0` = unplugged.
        state: i32,
    },
}

/// Routes trigger stimuli to a [`CaptureRequester`] while registered.
pub struct EventTriggers<C: CaptureRequester> {
    requester: C,
    registered: bool,
}

impl<C: CaptureRequester> EventTriggers<C> {
    /// Creates an unregistered trigger router.
    pub fn new(requester: C) -> Self {
        Self {
            requester,
            registered: false,
        }
    }

    /// Registers the listeners. Returns `false` when already registered.
    pub fn register(&mut self) -> bool {
        if self.registered {
            debug!("trigger listeners already registered");
            return false;
        }
        self.registered = true;
        debug!("trigger listeners registered");
        true
    }

    /// Unregisters the listeners. A second call is a no-op.
    pub fn unregister(&mut self) -> bool {
        if !self.registered {
            debug!("trigger listeners already unregistered");
            return false;
        }
        self.registered = false;
        debug!("trigger listeners unregistered");
        true
    }

    /// Returns whether the listeners are currently registered.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Manual user action: take a picture.
    pub fn take_picture(&self) {
        if !self.registered {
            debug!("manual trigger ignored: not registered");
            return;
        }
        info!("take picture requested");
        self.requester.request_capture();
    }

    /// Delivers a headphone broadcast.
    pub fn on_broadcast(&self, event: HeadphoneEvent) {
        if !self.registered {
            debug!(?event, "broadcast ignored: not registered");
            return;
        }
        match event {
            HeadphoneEvent::BecomingNoisy => {
                info!("noisy audio received");
                self.requester.request_capture();
            }
            HeadphoneEvent::PlugChanged { state } => {
                debug!(
                    "headphone {}",
                    if state == 0 { "unplugged" } else { "plugged" }
                );
            }
        }
    }
}

/// Idempotent registration guard for the surface-available listener.
///
/// Mirrors the remove-then-add dance platforms require on each screen
/// resume: however many times `register` runs, one surface event
/// reaches the listener exactly once.
pub struct SurfaceListenerRegistration<L: SurfaceListener> {
    listener: L,
    registered: bool,
}

impl<L: SurfaceListener> SurfaceListenerRegistration<L> {
    /// Creates an unregistered guard around the listener.
    pub fn new(listener: L) -> Self {
        Self {
            listener,
            registered: false,
        }
    }

    /// Registers the listener; repeated calls collapse to one.
    pub fn register(&mut self) {
        if !self.registered {
            debug!("surface listener registered");
        }
        self.registered = true;
    }

    /// Unregisters the listener; safe when already unregistered.
    pub fn unregister(&mut self) {
        self.registered = false;
    }

    /// Fires the surface-created event to the listener, if registered.
    pub fn surface_created(&self) {
        if self.registered {
            self.listener.on_surface_created();
        } else {
            debug!("surface event dropped: listener not registered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct CountingRequester {
        count: Arc<AtomicUsize>,
    }

    impl CountingRequester {
        fn captures(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }

    impl CaptureRequester for CountingRequester {
        fn request_capture(&self) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl SurfaceListener for CountingRequester {
        fn on_surface_created(&self) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_manual_trigger_requests_one_capture() {
        let requester = CountingRequester::default();
        let mut triggers = EventTriggers::new(requester.clone());
        triggers.register();

        triggers.take_picture();
        assert_eq!(requester.captures(), 1);
    }

    #[test]
    fn test_noisy_broadcast_requests_one_capture() {
        let requester = CountingRequester::default();
        let mut triggers = EventTriggers::new(requester.clone());
        triggers.register();

        triggers.on_broadcast(HeadphoneEvent::BecomingNoisy);
        assert_eq!(requester.captures(), 1);
    }

    #[test]
    fn test_plug_broadcast_never_triggers() {
        let requester = CountingRequester::default();
        let mut triggers = EventTriggers::new(requester.clone());
        triggers.register();

        triggers.on_broadcast(HeadphoneEvent::PlugChanged { state: 0 });
        triggers.on_broadcast(HeadphoneEvent::PlugChanged { state: 1 });
        assert_eq!(requester.captures(), 0);
    }

    #[test]
    fn test_unregistered_triggers_are_ignored() {
        let requester = CountingRequester::default();
        let mut triggers = EventTriggers::new(requester.clone());

        triggers.take_picture();
        triggers.on_broadcast(HeadphoneEvent::BecomingNoisy);
        assert_eq!(requester.captures(), 0);

        triggers.register();
        triggers.unregister();
        triggers.take_picture();
        assert_eq!(requester.captures(), 0);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let requester = CountingRequester::default();
        let mut triggers = EventTriggers::new(requester.clone());

        assert!(triggers.register());
        assert!(!triggers.register());
        triggers.on_broadcast(HeadphoneEvent::BecomingNoisy);
        assert_eq!(requester.captures(), 1);

        assert!(triggers.unregister());
        assert!(!triggers.unregister());
    }

    #[test]
    fn test_double_surface_registration_fires_once() {
        let listener = CountingRequester::default();
        let mut registration = SurfaceListenerRegistration::new(listener.clone());

        registration.register();
        registration.register();
        registration.surface_created();
        assert_eq!(listener.captures(), 1);
    }

    #[test]
    fn test_unregistered_surface_event_is_dropped() {
        let listener = CountingRequester::default();
        let mut registration = SurfaceListenerRegistration::new(listener.clone());

        registration.surface_created();
        assert_eq!(listener.captures(), 0);

        registration.register();
        registration.unregister();
        registration.surface_created();
        assert_eq!(listener.captures(), 0);
    }
}
