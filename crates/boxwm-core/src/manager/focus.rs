//! Input focus: acquisition, bookkeeping, fallback, cycling and the
//! pointer-driven handlers.

use boxwm_common::{WindowHandle, WmEvent};
use boxwm_config::schema::FocusModel;
use tracing::{debug, trace};

use super::WindowManager;
use crate::event::Event;
use crate::hints::FocusMode;
use crate::platform::WindowSystem;

impl<D: WindowSystem> WindowManager<D> {
    /// Try to give `window` the input focus.
    ///
    /// Refused for iconic windows, windows that are going away and windows
    /// on a hidden workspace. A modal transient takes the focus in place of
    /// its owner. Returns whether the manager set the focus itself; a
    /// globally-active client that is only sent a take-focus message
    /// reports false.
    pub fn set_input_focus(&mut self, window: WindowHandle) -> bool {
        if self.focused == Some(window) {
            return true;
        }
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        if w.is_iconic()
            || w.workspace() != Some(self.screen.current_id())
            || !self.validate_client(window)
        {
            return false;
        }
        let mode = w.focus_mode;
        let take_focus = w.protocols.take_focus;

        if let Some(modal) = self.registry.modal_transient(window) {
            if modal != window {
                debug!(window = %window, modal = %modal, "focus redirected to modal transient");
                return self.set_input_focus(modal);
            }
        }

        let focused = match mode {
            FocusMode::Passive | FocusMode::LocallyActive => {
                self.display.set_input_focus(Some(window));
                self.set_focused_window(Some(window));
                true
            }
            FocusMode::GloballyActive | FocusMode::NoInput => false,
        };
        if take_focus {
            self.display.send_take_focus(window);
        }
        focused
    }

    /// Record `window` as the focused window, clearing the previous one.
    /// `None` hands the input focus to the pointer root.
    pub fn set_focused_window(&mut self, window: Option<WindowHandle>) {
        if let Some(old) = self.focused.take() {
            if let Some(w) = self.registry.get_mut(old) {
                w.flags.focused = false;
            }
        }

        let window = window.filter(|h| self.registry.contains(*h));
        match window {
            Some(h) => {
                self.focus_serial += 1;
                let serial = self.focus_serial;
                let mut workspace = None;
                if let Some(w) = self.registry.get_mut(h) {
                    w.flags.focused = true;
                    w.focus_serial = serial;
                    workspace = w.workspace;
                }
                if let Some(ws) = workspace.and_then(|id| self.screen.workspace_mut(id)) {
                    ws.set_last_focus(Some(h));
                }
                self.focused = Some(h);
            }
            None => self.display.set_input_focus(None),
        }
        self.publish(WmEvent::WindowFocused(window));
    }

    /// Pick a new focus after `old` left workspace `id`.
    ///
    /// On the visible workspace, `owner` is tried first, then the stacking
    /// list front to back. On a hidden workspace only the remembered focus
    /// is replaced, by the new front window.
    pub(super) fn focus_fallback(
        &mut self,
        id: u32,
        old: WindowHandle,
        owner: Option<WindowHandle>,
        was_last_focus: bool,
    ) {
        if id != self.screen.current_id() {
            if was_last_focus {
                if let Some(ws) = self.screen.workspace_mut(id) {
                    let top = ws.top();
                    ws.set_last_focus(top);
                }
            }
            return;
        }

        if let Some(owner) = owner.filter(|o| *o != old) {
            if self.set_input_focus(owner) {
                return;
            }
        }

        let stacking = self
            .screen
            .workspace(id)
            .map(|ws| ws.stacking().to_vec())
            .unwrap_or_default();
        for candidate in stacking.into_iter().filter(|h| *h != old) {
            if self.set_input_focus(candidate) {
                debug!(window = %candidate, "fallback focus");
                return;
            }
        }
        self.set_focused_window(None);
    }

    /// Focus the next window in the current workspace's window list.
    pub fn next_focus(&mut self) -> bool {
        self.cycle_focus(true)
    }

    /// Focus the previous window in the current workspace's window list.
    pub fn prev_focus(&mut self) -> bool {
        self.cycle_focus(false)
    }

    fn cycle_focus(&mut self, forward: bool) -> bool {
        let workspace = self.screen.current_workspace();
        let focused = self.focused.filter(|f| workspace.contains(*f));

        let candidates = match focused {
            Some(from) if workspace.len() > 1 => workspace.cycle_from(from, forward),
            _ => workspace.top().into_iter().collect(),
        };
        for candidate in candidates {
            if self.set_input_focus(candidate) {
                self.raise_window(candidate);
                return true;
            }
        }
        false
    }

    /// Raise the focused window.
    pub fn raise_focus(&mut self) -> bool {
        match self.focused {
            Some(window) => self.raise_window(window),
            None => false,
        }
    }

    /// Switch focus models. Click-to-focus turns off auto-raise and
    /// click-raise.
    pub fn toggle_focus_model(&mut self, model: FocusModel) {
        let config = self.screen.config_mut();
        config.focus_model = model;
        if model == FocusModel::Click {
            config.auto_raise = false;
            config.click_raise = false;
            self.timers.clear_auto_raise();
        }
        debug!(?model, "focus model");
    }

    // -- Pointer and focus events --

    /// Pointer entered `window`. Queued leave events for the same window
    /// are drained first: if the pointer already left, nothing happens.
    pub(super) fn enter(&mut self, window: WindowHandle) {
        let config = self.screen.config();
        if config.focus_model != FocusModel::Sloppy {
            return;
        }
        let auto_raise = config.auto_raise;
        if !self.registry.get(window).is_some_and(|w| w.is_visible()) {
            return;
        }

        let left = self
            .events
            .drain_matching(|e| matches!(e, Event::LeaveNotify { window: w } if *w == window))
            > 0;
        if left {
            trace!(window = %window, "pointer already left");
            return;
        }

        if self.focused != Some(window) && self.set_input_focus(window) {
            self.display.install_colormap(window);
        }
        if auto_raise && self.focused == Some(window) {
            self.arm_auto_raise(window);
        }
    }

    pub(super) fn leave(&mut self, window: WindowHandle) {
        if !self.registry.contains(window) {
            return;
        }
        self.display.uninstall_colormap(window);
        self.timers.cancel_auto_raise(window);
    }

    pub(super) fn focus_in(&mut self, window: WindowHandle) {
        if self.registry.contains(window) && self.focused != Some(window) {
            self.set_focused_window(Some(window));
        }
    }

    /// Focus left `window`. A queued focus-in is handled right away;
    /// otherwise the manager's idea of the focus is reconciled with the
    /// display's.
    pub(super) fn focus_out(&mut self, window: WindowHandle) {
        if self.focused.is_none() {
            return;
        }
        if let Some(Event::FocusIn { window: next }) = self
            .events
            .take_first(|e| matches!(e, Event::FocusIn { .. }))
        {
            self.focus_in(next);
            return;
        }

        let actual = self
            .display
            .input_focus()
            .filter(|h| *h != self.display.root() && self.registry.contains(*h));
        trace!(window = %window, ?actual, "focus out");
        if actual != self.focused {
            self.set_focused_window(actual);
        }
    }

    /// A button went down over `window`.
    pub(super) fn button_press(&mut self, window: WindowHandle, button: u32) {
        if !self.registry.contains(window) {
            return;
        }
        match button {
            1 => {
                if self.focused != Some(window) {
                    self.set_input_focus(window);
                }
                let config = self.screen.config();
                if config.focus_model == FocusModel::Click || config.click_raise {
                    self.raise_window(window);
                }
            }
            2 => {
                self.lower_window(window);
            }
            _ => {}
        }
    }
}
