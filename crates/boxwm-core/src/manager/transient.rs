//! Resolving the transient-for property into an owner link.

use boxwm_common::WindowHandle;
use tracing::debug;

use super::WindowManager;
use crate::platform::WindowSystem;

impl<D: WindowSystem> WindowManager<D> {
    /// Re-read `window`'s transient-for property and relink it.
    ///
    /// A property naming no window (or the root) makes the window modal to
    /// the whole screen. A property naming the window's own group leader
    /// resolves to a representative member of that group. Links that would
    /// close an ownership loop are refused and the window stays a normal
    /// top-level window.
    pub fn resolve_transient(&mut self, window: WindowHandle) {
        if !self.registry.contains(window) {
            return;
        }
        self.registry.unlink_transient(window);
        if let Some(w) = self.registry.get_mut(window) {
            w.flags.modal = false;
        }

        let Some(hint) = self.display.transient_for(window) else {
            return;
        };
        if hint == window {
            return;
        }

        if hint.is_none() || hint == self.display.root() {
            self.registry.set_modal_root(window);
            if let Some(w) = self.registry.get_mut(window) {
                w.flags.modal = true;
            }
            debug!(window = %window, "transient for the root");
            return;
        }

        let group = self.registry.get(window).and_then(|w| w.group());
        let owner = if self.registry.contains(hint) {
            Some(hint)
        } else if group == Some(hint) {
            self.registry
                .group_representative(hint, window, self.focused)
        } else {
            None
        };
        let Some(owner) = owner else {
            debug!(window = %window, hint = %hint, "transient owner is not managed");
            return;
        };

        if self.registry.link_transient(window, owner) {
            let modal = self.display.wants_modal(window);
            if let Some(w) = self.registry.get_mut(window) {
                w.flags.modal = modal;
            }
            debug!(window = %window, owner = %owner, modal, "linked transient");
        }
    }
}
