//! Workspace membership, stacking and workspace switching.

use boxwm_common::{WindowHandle, WmEvent};
use boxwm_config::schema::FocusModel;
use tracing::debug;

use super::WindowManager;
use crate::platform::WindowSystem;
use crate::workspace::CASCADE_STEP;

impl<D: WindowSystem> WindowManager<D> {
    // -- Membership --

    /// Append `window` to workspace `id` and put it in front.
    pub(super) fn add_to_workspace(&mut self, window: WindowHandle, id: u32) -> bool {
        let Some(workspace) = self.screen.workspace_mut(id) else {
            return false;
        };
        let number = workspace.add(window);
        if let Some(w) = self.registry.get_mut(window) {
            w.workspace = Some(id);
            w.window_number = Some(number);
            w.attributes.set_workspace(id);
        }
        self.publish(WmEvent::WindowAdded {
            window,
            workspace: id,
        });
        true
    }

    /// Take `window` out of its workspace, renumber the members after it and
    /// pick a new focus if it held (or was remembered as) the focus.
    pub(super) fn remove_from_workspace(&mut self, window: WindowHandle) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        let Some(id) = w.workspace else {
            return false;
        };
        let owner = w.owner().window();
        let was_focused = self.focused == Some(window);

        let Some(workspace) = self.screen.workspace_mut(id) else {
            return false;
        };
        let was_last_focus = workspace.last_focus() == Some(window);
        let Some(index) = workspace.remove(window) else {
            return false;
        };
        if workspace.is_empty() {
            *workspace.cascade_mut() = (CASCADE_STEP, CASCADE_STEP);
        }
        let shifted: Vec<WindowHandle> = workspace.windows()[index..].to_vec();

        for (offset, h) in shifted.into_iter().enumerate() {
            if let Some(m) = self.registry.get_mut(h) {
                m.window_number = Some(index + offset);
            }
        }
        if let Some(w) = self.registry.get_mut(window) {
            w.workspace = None;
            w.window_number = None;
            if was_focused {
                w.flags.focused = false;
            }
        }
        // The leaving window must not satisfy the fallback's own
        // "already focused" check.
        if was_focused {
            self.focused = None;
        }

        if (was_focused || was_last_focus) && !self.shutting_down {
            self.focus_fallback(id, window, owner, was_last_focus);
        }
        true
    }

    // -- Stacking --

    /// Raise `window` together with its whole transient tree: the top-most
    /// owner first, then every transient in pre-order, each moved to the
    /// front of its workspace. The display gets one restack.
    pub fn raise_window(&mut self, window: WindowHandle) -> bool {
        if !self.registry.contains(window) {
            return false;
        }
        let ancestor = self.registry.top_ancestor(window);
        let mut order = vec![ancestor];
        order.extend(self.registry.transient_preorder(ancestor));

        for h in order {
            let Some(id) = self
                .registry
                .get(h)
                .filter(|w| !w.is_iconic())
                .and_then(|w| w.workspace())
            else {
                continue;
            };
            if let Some(workspace) = self.screen.workspace_mut(id) {
                workspace.raise_in_stack(h);
            }
        }

        self.restack_current();
        self.publish(WmEvent::WindowRaised(window));
        true
    }

    /// Mirror of [`raise_window`](Self::raise_window): transients go back
    /// first in reverse pre-order, the owner last, so the owner ends at the
    /// very back with its tree just above it.
    pub fn lower_window(&mut self, window: WindowHandle) -> bool {
        if !self.registry.contains(window) {
            return false;
        }
        let ancestor = self.registry.top_ancestor(window);
        let mut order = self.registry.transient_preorder(ancestor);
        order.reverse();
        order.push(ancestor);

        for h in order {
            let Some(id) = self
                .registry
                .get(h)
                .filter(|w| !w.is_iconic())
                .and_then(|w| w.workspace())
            else {
                continue;
            };
            if let Some(workspace) = self.screen.workspace_mut(id) {
                workspace.lower_in_stack(h);
            }
        }

        self.restack_current();
        self.publish(WmEvent::WindowLowered(window));
        true
    }

    /// Send the current workspace's stacking list, front to back.
    fn restack_current(&mut self) {
        let order = self.screen.current_workspace().stacking().to_vec();
        if !order.is_empty() {
            self.display.restack(&order);
        }
    }

    // -- Workspaces --

    /// Unmap every member back to front and remember the focused window.
    fn hide_workspace(&mut self, id: u32) {
        let focused_here = self
            .focused
            .filter(|f| self.registry.get(*f).and_then(|w| w.workspace()) == Some(id));
        let Some(workspace) = self.screen.workspace_mut(id) else {
            return;
        };
        workspace.set_last_focus(focused_here);
        let order: Vec<WindowHandle> = workspace.stacking().iter().rev().copied().collect();

        self.set_focused_window(None);
        for h in order {
            if let Some(w) = self.registry.get_mut(h) {
                w.flags.visible = false;
            }
            self.display.unmap(h);
        }
    }

    /// Map every member front to back, then restore focus if configured to.
    fn show_workspace(&mut self, id: u32) {
        let Some(workspace) = self.screen.workspace(id) else {
            return;
        };
        let order = workspace.stacking().to_vec();
        let mut target = workspace.last_focus();
        let top = workspace.top();

        for h in order {
            self.show_window(h);
        }
        self.restack_current();

        let config = self.screen.config();
        if config.focus_last {
            if config.focus_model == FocusModel::Click && target.is_none() {
                target = top;
                if let Some(workspace) = self.screen.workspace_mut(id) {
                    workspace.set_last_focus(top);
                }
            }
            if let Some(target) = target {
                self.set_input_focus(target);
            }
        }
    }

    /// Switch to workspace `id`. Returns false for the current or an
    /// unknown id.
    pub fn change_workspace(&mut self, id: u32) -> bool {
        let current = self.screen.current_id();
        if id == current || id >= self.screen.workspace_count() {
            return false;
        }
        debug!(from = current, to = id, "changing workspace");
        self.hide_workspace(current);
        self.screen.set_current(id);
        self.show_workspace(id);
        self.publish(WmEvent::CurrentWorkspaceChanged(id));
        true
    }

    pub fn add_workspace(&mut self) -> u32 {
        let id = self.screen.add_workspace();
        self.publish(WmEvent::WorkspaceCountChanged(self.screen.workspace_count()));
        id
    }

    /// Drop the last workspace, iconifying its members. The screen always
    /// keeps one workspace.
    pub fn remove_last_workspace(&mut self) -> bool {
        let count = self.screen.workspace_count();
        if count <= 1 {
            return false;
        }
        let last = count - 1;
        if self.screen.current_id() == last {
            self.change_workspace(last - 1);
        }

        let members = self
            .screen
            .workspace(last)
            .map(|ws| ws.windows().to_vec())
            .unwrap_or_default();
        for h in members {
            self.iconify(h);
        }
        // Anything that refused to iconify moves down a workspace.
        let leftovers = self
            .screen
            .workspace(last)
            .map(|ws| ws.windows().to_vec())
            .unwrap_or_default();
        for h in leftovers {
            self.reassociate_window(h, last - 1);
        }

        if self.screen.pop_workspace().is_none() {
            return false;
        }
        debug!(workspace = last, "removed workspace");
        self.publish(WmEvent::WorkspaceCountChanged(self.screen.workspace_count()));
        true
    }
}
