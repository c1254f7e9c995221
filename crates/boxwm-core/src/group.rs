//! Window groups: windows sharing one logical leader.

use boxwm_common::WindowHandle;

/// Members of one `WM_HINTS` window group, in join order.
///
/// The group handle is the leader named by the clients; it is frequently
/// an unmapped window the manager never manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowGroup {
    handle: WindowHandle,
    members: Vec<WindowHandle>,
}

impl WindowGroup {
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            members: Vec::new(),
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn members(&self) -> &[WindowHandle] {
        &self.members
    }

    pub fn contains(&self, window: WindowHandle) -> bool {
        self.members.contains(&window)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn add(&mut self, window: WindowHandle) {
        if !self.contains(window) {
            self.members.push(window);
        }
    }

    pub fn remove(&mut self, window: WindowHandle) {
        self.members.retain(|w| *w != window);
    }
}
