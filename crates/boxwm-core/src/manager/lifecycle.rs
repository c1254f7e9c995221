//! Iconify, deiconify, show, close and moving windows between workspaces.

use boxwm_common::{WindowHandle, WmEvent};
use tracing::debug;

use super::WindowManager;
use crate::platform::WindowSystem;
use crate::state::{Attrib, WmState};

impl<D: WindowSystem> WindowManager<D> {
    /// Iconify `window` and its transient tree.
    ///
    /// A transient whose owner is still showing iconifies the owner
    /// instead, which brings the transient along.
    pub fn iconify(&mut self, window: WindowHandle) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        if w.is_iconic() {
            return true;
        }
        if let Some(owner) = w.owner().window() {
            if self.registry.get(owner).is_some_and(|o| !o.is_iconic()) {
                return self.iconify(owner);
            }
        }
        if !self.validate_client(window) {
            return false;
        }
        let transients = w.transients().to_vec();

        if let Some(w) = self.registry.get_mut(window) {
            w.flags.iconic = true;
            w.flags.visible = false;
        }
        for t in transients {
            self.iconify(t);
        }

        self.remove_from_workspace(window);
        self.display.unmap(window);
        self.set_state(window, WmState::Iconic);
        let number = self.screen.add_icon(window);
        if let Some(w) = self.registry.get_mut(window) {
            w.window_number = Some(number);
        }

        self.persist_attributes(window);
        self.publish(WmEvent::WindowIconified(window));
        debug!(window = %window, "iconified");
        true
    }

    /// Bring `window` back onto a workspace: its saved one if still valid,
    /// otherwise the current one.
    ///
    /// With `reassociate` its transients come back too (without raising);
    /// with `raise` the window itself is raised.
    pub fn deiconify(&mut self, window: WindowHandle, reassociate: bool, raise: bool) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        let iconic = w.is_iconic();
        let saved = w.attributes.workspace;
        let saved_valid = w.attributes.flags.contains(Attrib::WORKSPACE)
            && saved < self.screen.workspace_count();
        let target = if saved_valid {
            saved
        } else {
            self.screen.current_id()
        };

        if iconic || reassociate {
            self.reassociate_window(window, target);
        }

        self.show_window(window);

        if reassociate {
            let transients = self
                .registry
                .get(window)
                .map(|w| w.transients().to_vec())
                .unwrap_or_default();
            for t in transients {
                self.deiconify(t, true, false);
            }
        }
        if raise {
            self.raise_window(window);
        }
        true
    }

    /// Mark `window` normal and map it if its workspace is showing.
    pub(super) fn show_window(&mut self, window: WindowHandle) {
        let current = self.screen.current_id();
        let Some(w) = self.registry.get_mut(window) else {
            return;
        };
        if w.flags.iconic {
            return;
        }
        let visible = w.workspace == Some(current);
        w.flags.visible = visible;
        self.set_state(window, WmState::Normal);
        if visible {
            self.display.map(window);
        }
    }

    /// Ask the client to close. Clients that did not opt into the polite
    /// close protocol are left alone.
    pub fn close(&mut self, window: WindowHandle) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        if !w.protocols().delete_window {
            debug!(window = %window, "close ignored, no delete protocol");
            return false;
        }
        self.display.send_delete_window(window);
        true
    }

    /// Move `window` onto workspace `id`, taking it off its old workspace or
    /// out of the icon list. The window is unmapped if `id` is hidden.
    pub fn reassociate_window(&mut self, window: WindowHandle, id: u32) -> bool {
        if id >= self.screen.workspace_count() {
            return false;
        }
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        if w.workspace() == Some(id) {
            return true;
        }

        let was_iconic = w.is_iconic();
        if was_iconic {
            self.remove_icon(window);
            if let Some(w) = self.registry.get_mut(window) {
                w.flags.iconic = false;
            }
        } else {
            self.remove_from_workspace(window);
        }
        self.add_to_workspace(window, id);

        if id != self.screen.current_id() {
            if let Some(w) = self.registry.get_mut(window) {
                w.flags.visible = false;
            }
            self.display.unmap(window);
        } else if !was_iconic {
            self.show_window(window);
        }
        self.persist_attributes(window);
        debug!(window = %window, workspace = id, "reassociated");
        true
    }

    /// Drop `window` from the icon list and renumber the icons after it.
    pub(super) fn remove_icon(&mut self, window: WindowHandle) {
        let Some(index) = self.screen.remove_icon(window) else {
            return;
        };
        let shifted: Vec<WindowHandle> = self.screen.icons()[index..].to_vec();
        for (offset, h) in shifted.into_iter().enumerate() {
            if let Some(w) = self.registry.get_mut(h) {
                w.window_number = Some(index + offset);
            }
        }
        if let Some(w) = self.registry.get_mut(window) {
            w.window_number = None;
        }
    }
}
