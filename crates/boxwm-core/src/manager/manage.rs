//! Adopting windows, releasing them, startup and shutdown.

use boxwm_common::{ManageError, MapState, Rect, WindowHandle, WmEvent};
use tracing::{debug, info, warn};

use super::WindowManager;
use crate::gravity::{apply_gravity, restore_gravity};
use crate::hints::{preset_decorations, Capabilities, FocusMode, Functions, SizeHints, WmHints};
use crate::platform::{WindowAttributes, WindowSystem};
use crate::state::{Attrib, AttributesRecord, WmState};
use crate::window::ManagedWindow;
use crate::workspace::{cascade_place, clamp_to_area, smart_place};

/// Title used when a client sets none.
pub const UNNAMED: &str = "Unnamed";

impl<D: WindowSystem> WindowManager<D> {
    /// Adopt every existing top-level window, then compute the usable area.
    ///
    /// Icon windows, override-redirect windows and windows that are
    /// neither mapped nor iconic are left alone.
    pub fn start(&mut self) {
        info!("adopting existing windows");
        self.startup = true;

        let windows = self.display.top_level_windows();
        let icon_windows: Vec<WindowHandle> = windows
            .iter()
            .filter_map(|w| self.display.wm_hints(*w).and_then(|h| h.icon_window))
            .collect();

        for window in windows {
            if icon_windows.contains(&window) {
                continue;
            }
            let Some(attrs) = self.display.window_attributes(window) else {
                continue;
            };
            let iconic = self.display.wm_state(window) == Some(WmState::Iconic);
            if attrs.override_redirect || (attrs.map_state != MapState::Viewable && !iconic) {
                continue;
            }
            if let Err(err) = self.manage(window) {
                debug!(%err, "not managed at startup");
            }
        }

        self.startup = false;
        self.update_available_area();
        if self.focused.is_none() {
            self.set_focused_window(None);
        }
        info!(windows = self.registry.len(), "startup complete");
    }

    /// Bring a window under management.
    ///
    /// The server is grabbed from reparenting until the window is
    /// registered and stacked, so clients never see a half-built frame.
    pub fn manage(&mut self, window: WindowHandle) -> Result<(), ManageError> {
        if self.registry.contains(window) {
            return Err(ManageError::AlreadyManaged(window));
        }
        let attrs = self
            .display
            .window_attributes(window)
            .ok_or(ManageError::Vanished(window))?;
        if attrs.override_redirect {
            return Err(ManageError::OverrideRedirect(window));
        }
        if !self.validate_client(window) {
            return Err(ManageError::Vanished(window));
        }

        let wm_hints = self.display.wm_hints(window).unwrap_or_default();
        if wm_hints.initial_state == Some(WmState::Withdrawn) {
            return Err(ManageError::StartsWithdrawn(window));
        }
        let is_icon_window = self.registry.handles().iter().any(|h| {
            self.display
                .wm_hints(*h)
                .and_then(|hints| hints.icon_window)
                == Some(window)
        });
        if is_icon_window {
            return Err(ManageError::IconWindow(window));
        }

        let iconic = {
            let mut wm = self.grab();
            wm.adopt(window, attrs, &wm_hints)
        };

        let Some(w) = self.registry.get(window) else {
            return Err(ManageError::Vanished(window));
        };
        let owner_focused = w.owner().window().is_some() && w.owner().window() == self.focused;
        let on_current = w.workspace() == Some(self.screen.current_id());
        if !self.startup
            && !iconic
            && on_current
            && (self.screen.config().focus_new || owner_focused)
        {
            self.set_input_focus(window);
        }

        info!(window = %window, "managed");
        Ok(())
    }

    /// Register, decorate, place and frame a window. Runs under the grab.
    /// Returns whether the window starts iconic.
    fn adopt(&mut self, window: WindowHandle, attrs: WindowAttributes, wm_hints: &WmHints) -> bool {
        let screen_rect = self.screen.rect();
        // Read before anything writes a new state to the window.
        let iconic = wm_hints.initial_state == Some(WmState::Iconic)
            || (self.startup && self.display.wm_state(window) == Some(WmState::Iconic));
        let normal = self.display.normal_hints(window);
        let size_hints = SizeHints::from_normal(normal.as_ref(), screen_rect);
        let protocols = self.display.protocols(window);

        let mut w = ManagedWindow::new(window, attrs.rect, size_hints);
        w.name = self
            .display
            .name(window)
            .unwrap_or_else(|| UNNAMED.to_string());
        w.icon_name = self
            .display
            .icon_name(window)
            .unwrap_or_else(|| w.name.clone());
        w.old_border_width = attrs.border_width;
        w.protocols = protocols;
        w.focus_mode = FocusMode::from_hints(wm_hints.input, protocols.take_focus);
        w.flags.shaped = self.display.is_shaped(window);
        self.registry.insert(w);

        if let Some(group) = wm_hints.window_group {
            if !group.is_none() && group != window {
                self.registry.join_group(window, group);
            }
        }
        self.resolve_transient(window);

        let transient = self.registry.get(window).is_some_and(|w| w.is_transient());
        let extended = self.display.extended_hints(window);
        let legacy = self.display.mwm_hints(window);
        let caps = Capabilities::merge(
            &protocols,
            legacy.as_ref(),
            extended.as_ref(),
            transient,
            size_hints.is_fixed(),
        );
        if let Some(w) = self.registry.get_mut(window) {
            w.functions = caps.functions;
            w.set_decorations(caps.decorations, &self.frame);
        }

        let restored_workspace = self.restore_attributes(window);
        let requested_workspace = extended
            .filter(|ext| ext.flags.contains(Attrib::WORKSPACE))
            .map(|ext| ext.workspace);
        let owner_workspace = self
            .registry
            .get(window)
            .and_then(|w| w.owner().window())
            .and_then(|o| self.registry.get(o))
            .and_then(|o| o.workspace());
        let workspace = restored_workspace
            .or(requested_workspace)
            .or(owner_workspace)
            .filter(|id| *id < self.screen.workspace_count())
            .unwrap_or_else(|| self.screen.current_id());

        let Some((margin, client)) = self.registry.get(window).map(|w| (w.margin, w.client)) else {
            return false;
        };
        let mut frame = apply_gravity(client, &margin, size_hints.gravity);
        let take_as_given = self.startup || transient || size_hints.position_requested;
        if !take_as_given || !frame.intersects(&screen_rect) {
            let (x, y) = self.place_window(workspace, (frame.width, frame.height));
            frame.set_pos(x, y);
        }
        let client = margin.client_within(frame);
        if let Some(w) = self.registry.get_mut(window) {
            w.client = client;
        }

        self.display.set_border_width(window, 0);
        self.display.reparent_into_frame(window, frame, client);
        if self.registry.get(window).is_some_and(|w| w.flags.shaped) {
            self.display.apply_shape(window);
        }
        self.display.send_configure_notify(window, client);

        self.add_to_workspace(window, workspace);
        if self
            .registry
            .get(window)
            .is_some_and(|w| w.maximized.is_maximized())
        {
            self.remaximize(window);
        }
        if iconic {
            self.iconify(window);
        }
        // A transient's iconify goes to its owner; catch one left behind.
        let iconic = self.registry.get(window).is_some_and(|w| w.is_iconic());
        if !iconic {
            self.show_window(window);
            self.raise_window(window);
        }
        self.persist_attributes(window);
        iconic
    }

    /// Re-apply the attribute record a previous manager left on the
    /// window. Returns the saved workspace, if any.
    pub fn restore_attributes(&mut self, window: WindowHandle) -> Option<u32> {
        let words = self.display.attributes_record(window)?;
        let Some(record) = AttributesRecord::from_words(&words) else {
            warn!(window = %window, len = words.len(), "ignoring malformed attribute record");
            return None;
        };

        let frame = &self.frame;
        let w = self.registry.get_mut(window)?;
        w.attributes = record;

        if record.flags.contains(Attrib::DECORATION) {
            let decorations = preset_decorations(
                w.decorations,
                record.decoration,
                w.functions,
                w.is_transient(),
            );
            w.set_decorations(decorations, frame);
        }

        let mode = record.maximize_mode();
        if mode.is_maximized() && w.functions.contains(Functions::MAXIMIZE) {
            w.maximized = mode;
        } else {
            w.attributes.clear_maximized();
        }

        debug!(window = %window, ?record, "restored attributes");
        record
            .flags
            .contains(Attrib::WORKSPACE)
            .then_some(record.workspace)
    }

    /// Release a window. With `remap` the client is left mapped (manager
    /// exit); without it the client is marked withdrawn.
    pub fn unmanage(&mut self, window: WindowHandle, remap: bool) -> bool {
        let reparented = self.reparent_pending(window);
        self.release(window, remap, reparented)
    }

    /// `reparented`: the client already moved itself out of the frame,
    /// so it must not be reparented to the root again.
    pub(super) fn release(&mut self, window: WindowHandle, remap: bool, reparented: bool) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        let workspace = w.workspace.unwrap_or(w.attributes.workspace);
        let iconic = w.is_iconic();
        let old_border_width = w.old_border_width;
        let restored = restore_gravity(w.frame_rect(), &w.margin, w.size_hints.gravity);

        let mut wm = self.grab();
        wm.timers.cancel_auto_raise(window);

        if iconic {
            wm.remove_icon(window);
        } else {
            wm.remove_from_workspace(window);
        }
        if wm.focused == Some(window) {
            wm.focused = None;
        }

        if wm.display.validate(window) {
            wm.display.set_border_width(window, old_border_width);
            if !reparented {
                wm.display.reparent_to_root(window, restored.x, restored.y);
            }
            if remap {
                wm.display.map(window);
            } else {
                wm.display.set_wm_state(window, WmState::Withdrawn);
            }
        }
        wm.display.destroy_frame(window);
        wm.registry.remove(window);
        wm.publish(WmEvent::WindowRemoved { window, workspace });
        drop(wm);

        info!(window = %window, remap, "unmanaged");
        true
    }

    /// Release every window with its client left mapped, then give focus
    /// back to the pointer root.
    pub fn shutdown(&mut self) {
        info!("shutting down");
        self.shutting_down = true;
        self.timers.clear();

        let handles: Vec<WindowHandle> = self.registry.handles().iter().rev().copied().collect();
        for window in handles {
            self.unmanage(window, true);
        }
        self.focused = None;
        self.display.set_input_focus(None);
        self.publish(WmEvent::Shutdown);
    }

    /// Position for a new frame of `size` on `workspace`.
    pub(super) fn place_window(&mut self, workspace: u32, size: (i32, i32)) -> (i32, i32) {
        let area = self.screen.usable_area();
        let config = self.screen.config().clone();

        let obstacles: Vec<Rect> = self
            .screen
            .workspace(workspace)
            .map(|ws| {
                ws.windows()
                    .iter()
                    .filter_map(|h| self.registry.get(*h))
                    .map(|w| w.frame_rect())
                    .collect()
            })
            .unwrap_or_default();

        let smart = smart_place(
            area,
            &obstacles,
            size,
            config.placement,
            config.row_direction,
            config.col_direction,
            config.border_width as i32,
        );
        let position = match (smart, self.screen.workspace_mut(workspace)) {
            (Some(position), _) => position,
            (None, Some(ws)) => cascade_place(area, ws.cascade_mut()),
            (None, None) => (area.x, area.y),
        };
        clamp_to_area(position, size, area)
    }
}
