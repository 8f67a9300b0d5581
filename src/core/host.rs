use crate::input::events::Cursor;
use std::cell::RefCell;
use std::rc::Rc;

/// Page-level side effects the map asks its host to perform
pub trait HostPage {
    /// Send the page to `url`
    fn navigate(&mut self, url: &str);

    /// Lock or release page scrolling while the map is expanded
    fn set_scroll_lock(&mut self, locked: bool);

    fn set_cursor(&mut self, _cursor: Cursor) {}
}

/// Host that ignores every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl HostPage for NullHost {
    fn navigate(&mut self, url: &str) {
        log::debug!("navigation to {} ignored", url);
    }

    fn set_scroll_lock(&mut self, _locked: bool) {}
}

/// Host that remembers what it was asked to do
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingHost {
    pub navigations: Vec<String>,
    pub scroll_locked: bool,
    pub cursor: Cursor,
}

impl HostPage for RecordingHost {
    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}

/// Shared host, so the caller can keep inspecting it after handing it over
impl<H: HostPage> HostPage for Rc<RefCell<H>> {
    fn navigate(&mut self, url: &str) {
        self.borrow_mut().navigate(url);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.borrow_mut().set_scroll_lock(locked);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.borrow_mut().set_cursor(cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_recording_host() {
        let shared = Rc::new(RefCell::new(RecordingHost::default()));
        let mut handle: Box<dyn HostPage> = Box::new(shared.clone());
        handle.navigate("/language/sma");
        handle.set_scroll_lock(true);
        handle.set_cursor(Cursor::ZoomIn);

        let host = shared.borrow();
        assert_eq!(host.navigations, vec!["/language/sma".to_string()]);
        assert!(host.scroll_locked);
        assert_eq!(host.cursor, Cursor::ZoomIn);
    }
}
