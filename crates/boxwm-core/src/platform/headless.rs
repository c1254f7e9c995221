//! In-memory windowing system.
//!
//! Keeps a table of client windows and records every request the core
//! makes, so tests and the replay driver can assert on observable calls
//! (restack batches, focus changes, property writes) without a display.

use std::collections::BTreeMap;

use boxwm_common::{MapState, Rect, WindowHandle};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{WindowAttributes, WindowSystem};
use crate::hints::{ExtendedHints, MwmHints, NormalHints, Protocols, WmHints};
use crate::state::WmState;

/// A client window and its properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientWindow {
    pub rect: Rect,
    pub border_width: u32,
    pub override_redirect: bool,
    pub map_state: MapState,
    pub name: Option<String>,
    pub icon_name: Option<String>,
    pub wm_hints: Option<WmHints>,
    pub normal_hints: Option<NormalHints>,
    pub mwm_hints: Option<MwmHints>,
    pub extended_hints: Option<ExtendedHints>,
    pub transient_for: Option<WindowHandle>,
    pub protocols: Protocols,
    pub wm_state: Option<WmState>,
    pub attributes: Option<Vec<u32>>,
    pub shaped: bool,
    pub modal: bool,
    /// Currently wrapped in a manager frame.
    pub framed: bool,
}

impl ClientWindow {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Default::default()
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn mapped(mut self) -> Self {
        self.map_state = MapState::Viewable;
        self
    }

    pub fn override_redirect(mut self) -> Self {
        self.override_redirect = true;
        self
    }

    pub fn transient_for(mut self, owner: WindowHandle) -> Self {
        self.transient_for = Some(owner);
        self
    }

    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }

    pub fn with_protocols(mut self, protocols: Protocols) -> Self {
        self.protocols = protocols;
        self
    }

    pub fn with_wm_hints(mut self, hints: WmHints) -> Self {
        self.wm_hints = Some(hints);
        self
    }

    pub fn with_normal_hints(mut self, hints: NormalHints) -> Self {
        self.normal_hints = Some(hints);
        self
    }

    pub fn with_mwm_hints(mut self, hints: MwmHints) -> Self {
        self.mwm_hints = Some(hints);
        self
    }

    pub fn with_extended_hints(mut self, hints: ExtendedHints) -> Self {
        self.extended_hints = Some(hints);
        self
    }
}

/// One request made against the headless display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum DisplayCall {
    GrabServer,
    UngrabServer,
    SetWmState { window: WindowHandle, state: WmState },
    SetAttributes { window: WindowHandle, words: Vec<u32> },
    SetBorderWidth { window: WindowHandle, width: u32 },
    ReparentIntoFrame { window: WindowHandle, frame: Rect, client: Rect },
    DestroyFrame { window: WindowHandle },
    Configure { window: WindowHandle, frame: Rect, client: Rect },
    ConfigureNotify { window: WindowHandle, client: Rect },
    Map { window: WindowHandle },
    Unmap { window: WindowHandle },
    ReparentToRoot { window: WindowHandle, x: i32, y: i32 },
    Restack { windows: Vec<WindowHandle> },
    SetInputFocus { window: Option<WindowHandle> },
    TakeFocus { window: WindowHandle },
    DeleteWindow { window: WindowHandle },
    InstallColormap { window: WindowHandle },
    UninstallColormap { window: WindowHandle },
    ApplyShape { window: WindowHandle },
}

pub struct HeadlessDisplay {
    screen: Rect,
    windows: BTreeMap<WindowHandle, ClientWindow>,
    /// Startup stacking order, bottom to top.
    order: Vec<WindowHandle>,
    focus: Option<WindowHandle>,
    grab_depth: u32,
    calls: Vec<DisplayCall>,
}

impl HeadlessDisplay {
    pub const ROOT: WindowHandle = WindowHandle(0x100);

    pub fn new(screen: Rect) -> Self {
        Self {
            screen,
            windows: BTreeMap::new(),
            order: Vec::new(),
            focus: None,
            grab_depth: 0,
            calls: Vec::new(),
        }
    }

    /// Create (or replace) a client window.
    pub fn add_window(&mut self, handle: WindowHandle, window: ClientWindow) {
        if self.windows.insert(handle, window).is_none() {
            self.order.push(handle);
        }
    }

    /// The client disappears from the server.
    pub fn destroy(&mut self, handle: WindowHandle) -> Option<ClientWindow> {
        self.order.retain(|w| *w != handle);
        if self.focus == Some(handle) {
            self.focus = None;
        }
        self.windows.remove(&handle)
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&ClientWindow> {
        self.windows.get(&handle)
    }

    pub fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut ClientWindow> {
        self.windows.get_mut(&handle)
    }

    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DisplayCall> {
        std::mem::take(&mut self.calls)
    }

    /// Every restack batch sent so far, oldest first.
    pub fn restacks(&self) -> Vec<Vec<WindowHandle>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DisplayCall::Restack { windows } => Some(windows.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn grab_depth(&self) -> u32 {
        self.grab_depth
    }

    /// Simulate focus moving without the manager asking.
    pub fn force_focus(&mut self, window: Option<WindowHandle>) {
        self.focus = window;
    }

    fn record(&mut self, call: DisplayCall) {
        trace!(?call, "display request");
        self.calls.push(call);
    }

    fn with_window(&mut self, handle: WindowHandle, f: impl FnOnce(&mut ClientWindow)) {
        if let Some(window) = self.windows.get_mut(&handle) {
            f(window);
        }
    }
}

impl WindowSystem for HeadlessDisplay {
    fn root(&self) -> WindowHandle {
        Self::ROOT
    }

    fn screen_rect(&self) -> Rect {
        self.screen
    }

    fn top_level_windows(&self) -> Vec<WindowHandle> {
        self.order.clone()
    }

    fn window_attributes(&self, window: WindowHandle) -> Option<WindowAttributes> {
        self.windows.get(&window).map(|w| WindowAttributes {
            rect: w.rect,
            border_width: w.border_width,
            override_redirect: w.override_redirect,
            map_state: w.map_state,
        })
    }

    fn validate(&self, window: WindowHandle) -> bool {
        self.windows.contains_key(&window)
    }

    fn name(&self, window: WindowHandle) -> Option<String> {
        self.windows.get(&window).and_then(|w| w.name.clone())
    }

    fn icon_name(&self, window: WindowHandle) -> Option<String> {
        self.windows.get(&window).and_then(|w| w.icon_name.clone())
    }

    fn wm_hints(&self, window: WindowHandle) -> Option<WmHints> {
        self.windows.get(&window).and_then(|w| w.wm_hints)
    }

    fn normal_hints(&self, window: WindowHandle) -> Option<NormalHints> {
        self.windows.get(&window).and_then(|w| w.normal_hints)
    }

    fn mwm_hints(&self, window: WindowHandle) -> Option<MwmHints> {
        self.windows.get(&window).and_then(|w| w.mwm_hints)
    }

    fn extended_hints(&self, window: WindowHandle) -> Option<ExtendedHints> {
        self.windows.get(&window).and_then(|w| w.extended_hints)
    }

    fn transient_for(&self, window: WindowHandle) -> Option<WindowHandle> {
        self.windows.get(&window).and_then(|w| w.transient_for)
    }

    fn protocols(&self, window: WindowHandle) -> Protocols {
        self.windows
            .get(&window)
            .map(|w| w.protocols)
            .unwrap_or_default()
    }

    fn wants_modal(&self, window: WindowHandle) -> bool {
        self.windows.get(&window).is_some_and(|w| w.modal)
    }

    fn wm_state(&self, window: WindowHandle) -> Option<WmState> {
        self.windows.get(&window).and_then(|w| w.wm_state)
    }

    fn attributes_record(&self, window: WindowHandle) -> Option<Vec<u32>> {
        self.windows.get(&window).and_then(|w| w.attributes.clone())
    }

    fn input_focus(&self) -> Option<WindowHandle> {
        self.focus
    }

    fn is_shaped(&self, window: WindowHandle) -> bool {
        self.windows.get(&window).is_some_and(|w| w.shaped)
    }

    fn grab_server(&mut self) {
        self.grab_depth += 1;
        self.record(DisplayCall::GrabServer);
    }

    fn ungrab_server(&mut self) {
        self.grab_depth = self.grab_depth.saturating_sub(1);
        self.record(DisplayCall::UngrabServer);
    }

    fn set_wm_state(&mut self, window: WindowHandle, state: WmState) {
        self.with_window(window, |w| w.wm_state = Some(state));
        self.record(DisplayCall::SetWmState { window, state });
    }

    fn set_attributes_record(&mut self, window: WindowHandle, words: &[u32]) {
        self.with_window(window, |w| w.attributes = Some(words.to_vec()));
        self.record(DisplayCall::SetAttributes {
            window,
            words: words.to_vec(),
        });
    }

    fn set_border_width(&mut self, window: WindowHandle, width: u32) {
        self.with_window(window, |w| w.border_width = width);
        self.record(DisplayCall::SetBorderWidth { window, width });
    }

    fn reparent_into_frame(&mut self, window: WindowHandle, frame: Rect, client: Rect) {
        self.with_window(window, |w| {
            w.framed = true;
            w.rect = client;
        });
        self.record(DisplayCall::ReparentIntoFrame {
            window,
            frame,
            client,
        });
    }

    fn destroy_frame(&mut self, window: WindowHandle) {
        self.with_window(window, |w| w.framed = false);
        self.record(DisplayCall::DestroyFrame { window });
    }

    fn configure(&mut self, window: WindowHandle, frame: Rect, client: Rect) {
        self.with_window(window, |w| w.rect = client);
        self.record(DisplayCall::Configure {
            window,
            frame,
            client,
        });
    }

    fn send_configure_notify(&mut self, window: WindowHandle, client: Rect) {
        self.record(DisplayCall::ConfigureNotify { window, client });
    }

    fn map(&mut self, window: WindowHandle) {
        self.with_window(window, |w| w.map_state = MapState::Viewable);
        self.record(DisplayCall::Map { window });
    }

    fn unmap(&mut self, window: WindowHandle) {
        self.with_window(window, |w| w.map_state = MapState::Unmapped);
        self.record(DisplayCall::Unmap { window });
    }

    fn reparent_to_root(&mut self, window: WindowHandle, x: i32, y: i32) {
        self.with_window(window, |w| {
            w.framed = false;
            w.rect.set_pos(x, y);
        });
        self.record(DisplayCall::ReparentToRoot { window, x, y });
    }

    fn restack(&mut self, front_to_back: &[WindowHandle]) {
        self.record(DisplayCall::Restack {
            windows: front_to_back.to_vec(),
        });
    }

    fn set_input_focus(&mut self, window: Option<WindowHandle>) {
        self.focus = window;
        self.record(DisplayCall::SetInputFocus { window });
    }

    fn send_take_focus(&mut self, window: WindowHandle) {
        self.record(DisplayCall::TakeFocus { window });
    }

    fn send_delete_window(&mut self, window: WindowHandle) {
        self.record(DisplayCall::DeleteWindow { window });
    }

    fn install_colormap(&mut self, window: WindowHandle) {
        self.record(DisplayCall::InstallColormap { window });
    }

    fn uninstall_colormap(&mut self, window: WindowHandle) {
        self.record(DisplayCall::UninstallColormap { window });
    }

    fn apply_shape(&mut self, window: WindowHandle) {
        self.record(DisplayCall::ApplyShape { window });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> HeadlessDisplay {
        HeadlessDisplay::new(Rect::new(0, 0, 800, 600))
    }

    #[test]
    fn unknown_windows_do_not_validate() {
        let d = display();
        assert!(!d.validate(WindowHandle(5)));
        assert!(d.window_attributes(WindowHandle(5)).is_none());
        assert_eq!(d.protocols(WindowHandle(5)), Protocols::default());
    }

    #[test]
    fn requests_update_window_state() {
        let mut d = display();
        let w = WindowHandle(2);
        d.add_window(w, ClientWindow::new(Rect::new(10, 10, 100, 100)).named("xterm"));

        d.reparent_into_frame(w, Rect::new(9, 0, 102, 120), Rect::new(10, 19, 100, 100));
        d.map(w);
        d.set_wm_state(w, WmState::Normal);

        let client = d.window(w).unwrap();
        assert!(client.framed);
        assert_eq!(client.map_state, MapState::Viewable);
        assert_eq!(client.wm_state, Some(WmState::Normal));
        assert_eq!(client.rect, Rect::new(10, 19, 100, 100));
        assert_eq!(d.name(w).as_deref(), Some("xterm"));
        assert_eq!(d.calls().len(), 3);
    }

    #[test]
    fn grabs_nest() {
        let mut d = display();
        d.grab_server();
        d.grab_server();
        assert_eq!(d.grab_depth(), 2);
        d.ungrab_server();
        d.ungrab_server();
        d.ungrab_server();
        assert_eq!(d.grab_depth(), 0);
    }

    #[test]
    fn destroy_clears_focus() {
        let mut d = display();
        let w = WindowHandle(2);
        d.add_window(w, ClientWindow::default());
        d.set_input_focus(Some(w));
        assert_eq!(d.input_focus(), Some(w));
        d.destroy(w);
        assert_eq!(d.input_focus(), None);
        assert!(d.top_level_windows().is_empty());
    }

    #[test]
    fn restacks_are_collected_in_order() {
        let mut d = display();
        d.restack(&[WindowHandle(3), WindowHandle(2)]);
        d.map(WindowHandle(9));
        d.restack(&[WindowHandle(2)]);
        assert_eq!(
            d.restacks(),
            vec![
                vec![WindowHandle(3), WindowHandle(2)],
                vec![WindowHandle(2)]
            ]
        );
    }

    #[test]
    fn client_window_deserializes_with_defaults() {
        let window: ClientWindow = serde_json::from_str(
            r#"{"rect":{"x":0,"y":0,"width":300,"height":200},"name":"dialog","transient_for":2}"#,
        )
        .unwrap();
        assert_eq!(window.name.as_deref(), Some("dialog"));
        assert_eq!(window.transient_for, Some(WindowHandle(2)));
        assert_eq!(window.map_state, MapState::Unmapped);
        assert!(!window.override_redirect);
    }
}
