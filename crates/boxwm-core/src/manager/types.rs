//! Core type and constructors for WindowManager.

use std::time::Instant;

use boxwm_common::{EventBus, WindowHandle, WmEvent};
use boxwm_config::schema::{FrameConfig, TimingConfig};
use boxwm_config::BoxConfig;

use super::timers::Timers;
use crate::event::{EventKind, EventQueue};
use crate::platform::WindowSystem;
use crate::registry::Registry;
use crate::screen::Screen;
use crate::window::ManagedWindow;

/// Ties the registry and screen to a windowing system and dispatches
/// inbound events to them. Everything runs on the caller's thread.
pub struct WindowManager<D: WindowSystem> {
    pub(super) display: D,
    pub(super) registry: Registry,
    pub(super) screen: Screen,
    pub(super) frame: FrameConfig,
    pub(super) timing: TimingConfig,
    /// Events received but not yet dispatched.
    pub(super) events: EventQueue,
    pub(super) bus: EventBus,
    pub(super) focused: Option<WindowHandle>,
    /// Set while adopting windows that existed before startup.
    pub(super) startup: bool,
    pub(super) shutting_down: bool,
    pub(super) timers: Timers,
    /// Clock for timer deadlines, advanced by `tick`.
    pub(super) now: Instant,
    pub(super) focus_serial: u64,
    pub(super) pending_config: Option<BoxConfig>,
}

impl<D: WindowSystem> WindowManager<D> {
    pub fn new(display: D, config: &BoxConfig) -> Self {
        let screen = Screen::new(display.screen_rect(), config.screen.clone());
        Self {
            display,
            registry: Registry::new(),
            screen,
            frame: config.frame.clone(),
            timing: config.timing.clone(),
            events: EventQueue::new(),
            bus: EventBus::default(),
            focused: None,
            startup: false,
            shutting_down: false,
            timers: Timers::default(),
            now: Instant::now(),
            focus_serial: 0,
            pending_config: None,
        }
    }

    // -- Accessors --

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn window(&self, window: WindowHandle) -> Option<&ManagedWindow> {
        self.registry.get(window)
    }

    pub fn focused_window(&self) -> Option<WindowHandle> {
        self.focused
    }

    pub fn frame_config(&self) -> &FrameConfig {
        &self.frame
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<WmEvent> {
        self.bus.subscribe()
    }

    // -- Internal helpers --

    pub(super) fn publish(&self, event: WmEvent) {
        self.bus.publish(event);
    }

    /// The window still exists and no destroy or unmap for it is queued.
    /// Operations that fail this check are dropped: the queued event
    /// will clean up.
    pub(super) fn validate_client(&self, window: WindowHandle) -> bool {
        self.display.validate(window)
            && !self
                .events
                .has_pending(window, &[EventKind::DestroyNotify, EventKind::UnmapNotify])
    }

    /// Write a window's attribute record to the display.
    pub(super) fn persist_attributes(&mut self, window: WindowHandle) {
        if let Some(w) = self.registry.get(window) {
            let words = w.attributes.to_words();
            self.display.set_attributes_record(window, &words);
        }
    }

    pub(super) fn set_state(&mut self, window: WindowHandle, state: crate::state::WmState) {
        if let Some(w) = self.registry.get_mut(window) {
            w.state = state;
            self.display.set_wm_state(window, state);
        }
    }
}
