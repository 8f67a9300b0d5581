//! Connection between a host's resize/mode notifications and a session.
//!
//! The host may keep a [`ViewportHandle`] in a resize listener that outlives
//! the map. Once the owning [`ViewportResponder`] disconnects or is dropped,
//! every handle goes inert and later notifications are ignored.

use crate::core::map::MapSession;
use crate::core::viewport::Viewport;
use crate::input::controller::InteractionMode;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Owns the session for as long as the map is mounted
pub struct ViewportResponder {
    session: Rc<RefCell<MapSession>>,
    connected: Rc<Cell<bool>>,
}

/// Cheap handle passed to host callbacks
#[derive(Clone)]
pub struct ViewportHandle {
    session: Weak<RefCell<MapSession>>,
    connected: Rc<Cell<bool>>,
}

impl ViewportResponder {
    pub fn connect(session: MapSession) -> Self {
        log::debug!("viewport responder connected");
        Self {
            session: Rc::new(RefCell::new(session)),
            connected: Rc::new(Cell::new(true)),
        }
    }

    pub fn handle(&self) -> ViewportHandle {
        ViewportHandle {
            session: Rc::downgrade(&self.session),
            connected: self.connected.clone(),
        }
    }

    pub fn session(&self) -> &Rc<RefCell<MapSession>> {
        &self.session
    }

    /// Stops every handle from reaching the session
    pub fn disconnect(&mut self) {
        if self.connected.replace(false) {
            log::debug!("viewport responder disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

impl Drop for ViewportResponder {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl ViewportHandle {
    /// Host size changed. Returns whether the session was reached.
    pub fn resize(&self, viewport: Viewport) -> bool {
        self.with_session(|session| session.resize(viewport))
    }

    pub fn set_mode(&self, mode: InteractionMode) -> bool {
        self.with_session(|session| {
            session.set_mode(mode);
        })
    }

    pub fn relayout(&self) -> bool {
        self.with_session(MapSession::relayout)
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get() && self.session.strong_count() > 0
    }

    fn with_session(&self, f: impl FnOnce(&mut MapSession)) -> bool {
        if !self.connected.get() {
            return false;
        }
        let Some(session) = self.session.upgrade() else {
            return false;
        };
        // re-entrant notifications are dropped
        let Ok(mut session) = session.try_borrow_mut() else {
            log::warn!("viewport notification dropped: session busy");
            return false;
        };
        f(&mut session);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::MapBuilder;

    fn responder() -> ViewportResponder {
        let session = MapBuilder::new()
            .with_viewport(Viewport::new(800.0, 1200.0))
            .build()
            .unwrap();
        ViewportResponder::connect(session)
    }

    #[test]
    fn test_handle_resizes_session() {
        let responder = responder();
        let handle = responder.handle();
        assert!(handle.resize(Viewport::new(400.0, 600.0)));
        let session = responder.session().borrow();
        assert_eq!(session.viewport(), Viewport::new(400.0, 600.0));
        assert_eq!(session.layout_passes(), 2);
    }

    #[test]
    fn test_disconnected_handle_is_inert() {
        let mut responder = responder();
        let handle = responder.handle();
        responder.disconnect();
        assert!(!responder.is_connected());
        assert!(!handle.resize(Viewport::new(400.0, 600.0)));
        assert!(!handle.is_connected());
        assert_eq!(responder.session().borrow().layout_passes(), 1);
    }

    #[test]
    fn test_handle_outlives_responder() {
        let handle = responder().handle();
        assert!(!handle.is_connected());
        assert!(!handle.relayout());
        assert!(!handle.set_mode(InteractionMode::Expanded));
    }

    #[test]
    fn test_busy_session_drops_notification() {
        let responder = responder();
        let handle = responder.handle();
        let _borrowed = responder.session().borrow_mut();
        assert!(!handle.relayout());
    }
}
