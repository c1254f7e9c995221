//! Geometry: configure, maximize, client configure requests, attribute
//! change requests and live reconfiguration.

use boxwm_common::{Rect, WindowHandle, WmEvent};
use boxwm_config::schema::FocusModel;
use boxwm_config::BoxConfig;
use tracing::{debug, info};

use super::WindowManager;
use crate::event::{ConfigureRequest, StackMode};
use crate::gravity::{apply_gravity, restore_gravity};
use crate::hints::{preset_decorations, Decorations, ExtendedHints, Functions};
use crate::platform::WindowSystem;
use crate::state::{Attrib, DecorationPreset, MaximizeMode};

impl<D: WindowSystem> WindowManager<D> {
    /// Move and/or resize `window`'s frame to `frame`.
    ///
    /// A resize reconfigures frame and client together and reapplies the
    /// shape. A pure move only repositions and sends the client a
    /// synthetic configure notify with its new root position.
    pub fn configure(&mut self, window: WindowHandle, frame: Rect) -> bool {
        if !self.validate_client(window) {
            return false;
        }
        let Some(w) = self.registry.get_mut(window) else {
            return false;
        };
        let old_frame = w.frame_rect();
        let old_client = w.client;
        let client = w.margin.client_within(frame);
        if old_frame == frame && old_client == client {
            return true;
        }
        w.client = client;
        let shaped = w.flags.shaped;

        let resized = old_frame.width != frame.width
            || old_frame.height != frame.height
            || old_client.width != client.width
            || old_client.height != client.height;

        self.display.configure(window, frame, client);
        if resized {
            if shaped {
                self.display.apply_shape(window);
            }
        } else {
            self.display.send_configure_notify(window, client);
        }

        self.publish(WmEvent::WindowConfigured { window, frame });
        true
    }

    /// Toggle maximization from a maximize control: 1 full, 2 vertical,
    /// 3 horizontal. A maximized window is always restored to the exact
    /// geometry it had before, whichever control was used.
    pub fn maximize(&mut self, window: WindowHandle, button: u32) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        if w.maximized.is_maximized() {
            return self.unmaximize(window);
        }
        self.maximize_to(window, MaximizeMode::from_button(button))
    }

    fn maximize_to(&mut self, window: WindowHandle, mode: MaximizeMode) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        if !mode.is_maximized() || !w.functions.contains(Functions::MAXIMIZE) {
            return false;
        }
        let premax = w.frame_rect();
        let frame = self.maximized_frame(window, mode, premax);

        if let Some(w) = self.registry.get_mut(window) {
            w.maximized = mode;
            w.attributes.set_maximized(mode, premax);
        }
        self.configure(window, frame);
        self.persist_attributes(window);
        debug!(window = %window, ?mode, "maximized");
        true
    }

    fn unmaximize(&mut self, window: WindowHandle) -> bool {
        let Some(w) = self.registry.get_mut(window) else {
            return false;
        };
        let premax = w.attributes.premax;
        w.maximized = MaximizeMode::None;
        w.attributes.clear_maximized();

        if premax.is_valid() && premax.width > 0 && premax.height > 0 {
            self.configure(window, premax);
        }
        self.persist_attributes(window);
        debug!(window = %window, ?premax, "restored from maximize");
        true
    }

    /// Refit a maximized window to the current available area.
    pub fn remaximize(&mut self, window: WindowHandle) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        let mode = w.maximized;
        if !mode.is_maximized() {
            return false;
        }
        let frame = self.maximized_frame(window, mode, w.frame_rect());
        self.configure(window, frame)
    }

    /// `base` with the maximized axes stretched over the available area,
    /// then shrunk to what the size hints allow.
    fn maximized_frame(&self, window: WindowHandle, mode: MaximizeMode, base: Rect) -> Rect {
        let area = self.screen.available_area();
        let Some(w) = self.registry.get(window) else {
            return base;
        };
        let mut frame = base;
        if mode.horizontal() {
            frame.x = area.x;
            frame.width = area.width;
        }
        if mode.vertical() {
            frame.y = area.y;
            frame.height = area.height;
        }
        let client = w.margin.client_within(frame);
        let (width, height) = w.size_hints.constrain(client.width, client.height);
        frame.set_size(
            width + w.margin.horizontal(),
            height + w.margin.vertical(),
        );
        frame
    }

    /// Handle a client's configure request.
    ///
    /// Unmanaged windows get exactly what they ask for. Maximized windows
    /// have their client geometry applied as-is and keep their state.
    pub fn configure_request(&mut self, window: WindowHandle, request: ConfigureRequest) -> bool {
        let Some(w) = self.registry.get(window) else {
            let Some(attrs) = self.display.window_attributes(window) else {
                return false;
            };
            let rect = requested_rect(attrs.rect, &request);
            self.display.configure(window, rect, rect);
            return true;
        };
        if w.is_iconic() {
            return false;
        }
        let maximized = w.maximized.is_maximized();
        let margin = w.margin;
        let client = w.client;
        let frame = w.frame_rect();

        if let Some(width) = request.border_width {
            if let Some(w) = self.registry.get_mut(window) {
                w.old_border_width = width;
            }
        }

        let geometry = request.x.is_some()
            || request.y.is_some()
            || request.width.is_some()
            || request.height.is_some();
        if geometry {
            if maximized {
                let client = requested_rect(client, &request);
                let frame = margin.frame_around(client);
                if let Some(w) = self.registry.get_mut(window) {
                    w.client = client;
                }
                self.display.configure(window, frame, client);
                self.publish(WmEvent::WindowConfigured { window, frame });
                return true;
            }

            let mut target = frame;
            if request.x.is_some() || request.y.is_some() {
                let x = request.x.unwrap_or(client.x);
                let y = request.y.unwrap_or(client.y);
                target.set_pos(x - margin.left, y - margin.top);
            }
            if let Some(width) = request.width {
                target.width = width + margin.horizontal();
            }
            if let Some(height) = request.height {
                target.height = height + margin.vertical();
            }
            self.configure(window, target);
        }

        match request.stack {
            Some(StackMode::Above | StackMode::TopIf) => {
                self.raise_window(window);
            }
            Some(StackMode::Below | StackMode::BottomIf) => {
                self.lower_window(window);
            }
            Some(StackMode::Opposite) | None => {}
        }
        true
    }

    /// Apply a change-attributes request: maximize state, workspace and
    /// decoration preset, each only when its flag is set.
    pub fn change_extended_hints(&mut self, window: WindowHandle, hints: ExtendedHints) -> bool {
        let Some(w) = self.registry.get(window) else {
            return false;
        };
        let current_mode = w.maximized;
        let is_iconic = w.is_iconic();

        if hints.flags.intersects(Attrib::MAX_HORIZ | Attrib::MAX_VERT) {
            let mode = MaximizeMode::from_attrib(hints.flags, hints.attrib);
            if mode != current_mode {
                if current_mode.is_maximized() {
                    self.unmaximize(window);
                }
                if mode.is_maximized() {
                    self.maximize_to(window, mode);
                }
            }
        }

        if hints.flags.contains(Attrib::WORKSPACE)
            && !is_iconic
            && hints.workspace < self.screen.workspace_count()
        {
            let mut moving = vec![window];
            moving.extend(self.registry.transient_preorder(window));
            for h in moving {
                let on_target = self
                    .registry
                    .get(h)
                    .is_some_and(|w| w.workspace() == Some(hints.workspace));
                if !on_target {
                    self.reassociate_window(h, hints.workspace);
                }
            }
        }

        if hints.flags.contains(Attrib::DECORATION) {
            self.change_decoration(window, hints.decoration);
        }

        self.persist_attributes(window);
        true
    }

    /// Switch `window` to a decoration preset.
    pub fn change_decoration(&mut self, window: WindowHandle, preset: DecorationPreset) -> bool {
        let Some(w) = self.registry.get_mut(window) else {
            return false;
        };
        let decorations =
            preset_decorations(w.decorations, preset, w.functions, w.is_transient());
        w.attributes.set_decoration(preset);
        self.redecorate(window, decorations);
        self.persist_attributes(window);
        true
    }

    /// Replace `window`'s decorations and refit the frame to the new
    /// margins, keeping the point its gravity anchors fixed on screen.
    pub(super) fn redecorate(&mut self, window: WindowHandle, decorations: Decorations) {
        let frame_config = self.frame.clone();
        let Some(w) = self.registry.get_mut(window) else {
            return;
        };
        let gravity = w.size_hints.gravity;
        let reference = restore_gravity(w.frame_rect(), &w.margin, gravity);
        let old_margin = w.set_decorations(decorations, &frame_config);
        if old_margin == w.margin {
            return;
        }
        let frame = apply_gravity(reference, &w.margin, gravity);
        self.configure(window, frame);
    }

    /// Apply the configuration queued by
    /// [`request_reconfigure`](Self::request_reconfigure), if any.
    pub fn reconfigure(&mut self) {
        if let Some(config) = self.pending_config.take() {
            self.apply_config(&config);
        }
    }

    /// Apply a new configuration to the running manager: workspace count
    /// and names, focus model, frame margins of every window.
    pub fn apply_config(&mut self, config: &BoxConfig) {
        info!("applying configuration");
        self.frame = config.frame.clone();
        self.timing = config.timing.clone();
        *self.screen.config_mut() = config.screen.clone();
        if config.screen.focus_model == FocusModel::Click {
            self.toggle_focus_model(FocusModel::Click);
        }

        let wanted = config.screen.workspaces.max(1);
        while self.screen.workspace_count() < wanted {
            self.add_workspace();
        }
        while self.screen.workspace_count() > wanted {
            if !self.remove_last_workspace() {
                break;
            }
        }
        for id in 0..self.screen.workspace_count() {
            let name = config.screen.workspace_name(id);
            if let Some(workspace) = self.screen.workspace_mut(id) {
                workspace.set_name(name);
            }
        }

        let handles = self.registry.handles().to_vec();
        for window in handles {
            let Some(w) = self.registry.get(window) else {
                continue;
            };
            let decorations = w.decorations;
            let maximized = w.maximized.is_maximized();
            self.redecorate(window, decorations);
            if maximized {
                self.remaximize(window);
            }
        }

        self.publish(WmEvent::Reconfigured);
    }
}

/// `base` with whichever fields the request sets replaced.
fn requested_rect(base: Rect, request: &ConfigureRequest) -> Rect {
    Rect::new(
        request.x.unwrap_or(base.x),
        request.y.unwrap_or(base.y),
        request.width.unwrap_or(base.width),
        request.height.unwrap_or(base.height),
    )
}
