//! Event dispatch.
//!
//! Events are handled strictly one at a time. Handlers may look ahead in
//! the queue but never re-enter [`WindowManager::dispatch`].

use std::time::Instant;

use boxwm_common::{WindowHandle, WmEvent};
use tracing::{debug, trace};

use super::manage::UNNAMED;
use super::WindowManager;
use crate::event::{ClientMessage, Event, EventKind, Property};
use crate::hints::{Decorations, FocusMode, Functions, SizeHints};
use crate::platform::WindowSystem;
use crate::state::WmState;

impl<D: WindowSystem> WindowManager<D> {
    /// Queue an event for [`process_pending`](Self::process_pending).
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Advance the clock to `now`, firing due timers, then dispatch the
    /// queue. Timers armed by these events count from `now`.
    pub fn process_pending_at(&mut self, now: Instant) -> usize {
        self.tick(now);
        self.process_pending()
    }

    /// Dispatch every queued event, collapsing motion and expose bursts.
    /// Returns how many events were dispatched.
    ///
    /// Timers armed here count from the last [`tick`](Self::tick); use
    /// [`process_pending_at`](Self::process_pending_at) when the clock
    /// may be stale.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.pop() {
            let event = self.events.coalesce(event);
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    pub fn dispatch(&mut self, event: Event) {
        trace!(?event, "dispatch");
        match event {
            Event::MapRequest { window } => self.map_request(window),
            Event::UnmapNotify { window } | Event::DestroyNotify { window } => {
                self.unmanage(window, false);
            }
            Event::ReparentNotify { window, parent } => {
                trace!(window = %window, parent = %parent, "client reparented away");
                self.release(window, false, true);
            }
            Event::ConfigureRequest { window, request } => {
                self.configure_request(window, request);
            }
            Event::PropertyNotify { window, property } => self.property_changed(window, property),
            Event::EnterNotify { window } => self.enter(window),
            Event::LeaveNotify { window } => self.leave(window),
            Event::FocusIn { window } => self.focus_in(window),
            Event::FocusOut { window } => self.focus_out(window),
            Event::MotionNotify { window, x, y } => {
                trace!(window = %window, x, y, "motion");
            }
            Event::Expose { window } => {
                trace!(window = %window, "expose");
            }
            Event::ButtonPress { window, button } => self.button_press(window, button),
            Event::ClientMessage { window, message } => self.client_message(window, message),
            Event::ShapeNotify { window } => self.shape_changed(window),
            Event::StrutAdded { id, strut } => self.add_strut(id, strut),
            Event::StrutRemoved { id } => {
                self.remove_strut(id);
            }
        }
    }

    fn map_request(&mut self, window: WindowHandle) {
        let Some(w) = self.registry.get(window) else {
            if let Err(err) = self.manage(window) {
                debug!(%err, "map request not managed");
            }
            return;
        };

        if w.is_iconic() {
            self.deiconify(window, true, true);
        } else {
            self.show_window(window);
            self.raise_window(window);
        }
        if self.screen.config().focus_new && self.registry.get(window).is_some_and(|w| w.is_visible()) {
            self.set_input_focus(window);
        }
    }

    fn shape_changed(&mut self, window: WindowHandle) {
        let shaped = self.display.is_shaped(window);
        let Some(w) = self.registry.get_mut(window) else {
            return;
        };
        w.flags.shaped = shaped;
        if shaped {
            self.display.apply_shape(window);
        }
    }

    /// Re-read a property the client changed.
    pub fn property_changed(&mut self, window: WindowHandle, property: Property) {
        if !self.registry.contains(window) || !self.validate_client(window) {
            return;
        }
        match property {
            Property::Name => {
                let name = self
                    .display
                    .name(window)
                    .unwrap_or_else(|| UNNAMED.to_string());
                if let Some(w) = self.registry.get_mut(window) {
                    w.name = name.clone();
                }
                self.publish(WmEvent::WindowNameChanged { window, name });
            }
            Property::IconName => {
                let icon_name = self.display.icon_name(window);
                if let Some(w) = self.registry.get_mut(window) {
                    let fallback = w.name.clone();
                    w.icon_name = icon_name.unwrap_or(fallback);
                }
            }
            Property::Hints => {
                let hints = self.display.wm_hints(window).unwrap_or_default();
                if let Some(w) = self.registry.get_mut(window) {
                    w.focus_mode = FocusMode::from_hints(hints.input, w.protocols.take_focus);
                }
                match hints.window_group.filter(|g| !g.is_none() && *g != window) {
                    Some(group) => self.registry.join_group(window, group),
                    None => self.registry.leave_group(window),
                }
            }
            Property::NormalHints => self.normal_hints_changed(window),
            Property::TransientFor => {
                self.resolve_transient(window);
                let transient = self.registry.get(window).is_some_and(|w| w.is_transient());
                if transient {
                    let decorations = self.registry.get(window).map(|w| {
                        w.decorations - (Decorations::MAXIMIZE | Decorations::HANDLE)
                    });
                    if let Some(w) = self.registry.get_mut(window) {
                        w.functions.remove(Functions::MAXIMIZE);
                    }
                    if let Some(decorations) = decorations {
                        self.redecorate(window, decorations);
                    }
                }
            }
            Property::Protocols => {
                let protocols = self.display.protocols(window);
                let input = self.display.wm_hints(window).and_then(|h| h.input);
                let Some(w) = self.registry.get_mut(window) else {
                    return;
                };
                w.protocols = protocols;
                w.focus_mode = FocusMode::from_hints(input, protocols.take_focus);
                w.functions.set(Functions::CLOSE, protocols.delete_window);
                let close = protocols.delete_window && w.decorations.contains(Decorations::TITLEBAR);
                w.decorations.set(Decorations::CLOSE, close);
            }
        }
    }

    /// Size hints changed: a fixed size drops resize and maximize, a
    /// resizable one gets them back, and the client is fitted to the new
    /// limits.
    fn normal_hints_changed(&mut self, window: WindowHandle) {
        let normal = self.display.normal_hints(window);
        let size_hints = SizeHints::from_normal(normal.as_ref(), self.screen.rect());
        let Some(w) = self.registry.get_mut(window) else {
            return;
        };
        w.size_hints = size_hints;

        let mut decorations = w.decorations;
        if size_hints.bounded {
            if size_hints.is_fixed() {
                decorations.remove(Decorations::MAXIMIZE | Decorations::HANDLE);
                w.functions.remove(Functions::RESIZE | Functions::MAXIMIZE);
            } else {
                if !w.is_transient() {
                    decorations.insert(Decorations::MAXIMIZE | Decorations::HANDLE);
                    w.functions.insert(Functions::MAXIMIZE);
                }
                w.functions.insert(Functions::RESIZE);
            }
        }

        let client = w.client;
        let (width, height) = size_hints.constrain(client.width, client.height);
        if decorations != w.decorations {
            self.redecorate(window, decorations);
        }
        let Some(w) = self.registry.get(window) else {
            return;
        };
        if (width, height) != (w.client.width, w.client.height) {
            let mut frame = w.frame_rect();
            frame.set_size(width + w.margin.horizontal(), height + w.margin.vertical());
            self.configure(window, frame);
        }
    }

    pub fn client_message(&mut self, window: WindowHandle, message: ClientMessage) {
        match message {
            ClientMessage::ChangeWorkspace { workspace } => {
                self.change_workspace(workspace);
            }
            ClientMessage::CycleFocus { forward } => {
                if forward {
                    self.next_focus();
                } else {
                    self.prev_focus();
                }
            }
            ClientMessage::ChangeState { state } => match state {
                WmState::Iconic => {
                    self.iconify(window);
                }
                WmState::Normal => {
                    self.deiconify(window, true, true);
                }
                WmState::Withdrawn => {}
            },
            ClientMessage::Focus => {
                if self.registry.get(window).is_some_and(|w| w.is_iconic()) {
                    self.deiconify(window, false, false);
                }
                if self.registry.get(window).is_some_and(|w| w.is_visible())
                    && self.set_input_focus(window)
                {
                    self.raise_window(window);
                    self.display.install_colormap(window);
                }
            }
            ClientMessage::ChangeAttributes { hints } => {
                self.change_extended_hints(window, hints);
            }
            ClientMessage::Close => {
                self.close(window);
            }
        }
    }

    /// Whether a reparent event for `window` is queued.
    pub fn reparent_pending(&self, window: WindowHandle) -> bool {
        self.events.has_pending(window, &[EventKind::ReparentNotify])
    }
}
