//! The windowing-system collaborator.
//!
//! Everything the core needs from the display server goes through
//! [`WindowSystem`]. Queries take `&self`; requests take `&mut self`.
//! Requests are fire-and-forget: a request against a window that has gone
//! away is silently dropped by the server, and the core learns about the
//! loss through a later destroy or unmap event.
//!
//! Implementations must not report events caused by the manager's own
//! requests: unmaps issued while hiding or iconifying and the reparent
//! into a frame never reach the event queue. An unmap or reparent that
//! does arrive is taken to come from the client.

use boxwm_common::{MapState, Rect, WindowHandle};
use serde::{Deserialize, Serialize};

use crate::hints::{ExtendedHints, MwmHints, NormalHints, Protocols, WmHints};
use crate::state::WmState;

pub mod headless;

pub use headless::{ClientWindow, DisplayCall, HeadlessDisplay};

/// Basic attributes of a window as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowAttributes {
    pub rect: Rect,
    pub border_width: u32,
    pub override_redirect: bool,
    pub map_state: MapState,
}

/// Abstract capabilities of the display server.
pub trait WindowSystem {
    // -- Queries --

    fn root(&self) -> WindowHandle;
    fn screen_rect(&self) -> Rect;
    /// Children of the root at startup, bottom to top.
    fn top_level_windows(&self) -> Vec<WindowHandle>;
    fn window_attributes(&self, window: WindowHandle) -> Option<WindowAttributes>;
    /// The window still exists on the server.
    fn validate(&self, window: WindowHandle) -> bool;

    fn name(&self, window: WindowHandle) -> Option<String>;
    fn icon_name(&self, window: WindowHandle) -> Option<String>;
    fn wm_hints(&self, window: WindowHandle) -> Option<WmHints>;
    fn normal_hints(&self, window: WindowHandle) -> Option<NormalHints>;
    fn mwm_hints(&self, window: WindowHandle) -> Option<MwmHints>;
    fn extended_hints(&self, window: WindowHandle) -> Option<ExtendedHints>;
    /// `Some(WindowHandle::NONE)` is a transient-for property naming no window.
    fn transient_for(&self, window: WindowHandle) -> Option<WindowHandle>;
    fn protocols(&self, window: WindowHandle) -> Protocols;
    /// The client asked for modal state on itself.
    fn wants_modal(&self, window: WindowHandle) -> bool;
    fn wm_state(&self, window: WindowHandle) -> Option<WmState>;
    /// Raw words of the persisted attribute record.
    fn attributes_record(&self, window: WindowHandle) -> Option<Vec<u32>>;
    fn input_focus(&self) -> Option<WindowHandle>;
    fn is_shaped(&self, window: WindowHandle) -> bool;

    // -- Requests --

    fn grab_server(&mut self);
    fn ungrab_server(&mut self);

    fn set_wm_state(&mut self, window: WindowHandle, state: WmState);
    fn set_attributes_record(&mut self, window: WindowHandle, words: &[u32]);

    fn set_border_width(&mut self, window: WindowHandle, width: u32);
    /// Wrap the client in a new frame at `frame`, client placed at `client`.
    fn reparent_into_frame(&mut self, window: WindowHandle, frame: Rect, client: Rect);
    /// Destroy the frame created by `reparent_into_frame`.
    fn destroy_frame(&mut self, window: WindowHandle);
    /// Move/resize the frame and client together.
    fn configure(&mut self, window: WindowHandle, frame: Rect, client: Rect);
    /// Synthetic configure notify telling the client its root position.
    fn send_configure_notify(&mut self, window: WindowHandle, client: Rect);
    fn map(&mut self, window: WindowHandle);
    fn unmap(&mut self, window: WindowHandle);
    fn reparent_to_root(&mut self, window: WindowHandle, x: i32, y: i32);
    /// One atomic restack, front to back.
    fn restack(&mut self, front_to_back: &[WindowHandle]);

    /// `None` gives focus to the pointer root.
    fn set_input_focus(&mut self, window: Option<WindowHandle>);
    fn send_take_focus(&mut self, window: WindowHandle);
    fn send_delete_window(&mut self, window: WindowHandle);

    fn install_colormap(&mut self, window: WindowHandle);
    fn uninstall_colormap(&mut self, window: WindowHandle);
    fn apply_shape(&mut self, window: WindowHandle);
}
