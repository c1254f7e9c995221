//! Per-client state owned by the registry.

use boxwm_common::{Rect, WindowHandle};
use boxwm_config::schema::FrameConfig;
use serde::Serialize;

use crate::geometry::Margin;
use crate::hints::{frame_margin, Decorations, FocusMode, Functions, Protocols, SizeHints};
use crate::state::{AttributesRecord, MaximizeMode, WmState};

/// Who a window is transient for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "window", rename_all = "kebab-case")]
pub enum Owner {
    #[default]
    None,
    Window(WindowHandle),
    /// Transient for the whole screen; always modal.
    ModalRoot,
}

impl Owner {
    pub fn window(self) -> Option<WindowHandle> {
        match self {
            Owner::Window(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_transient(self) -> bool {
        self != Owner::None
    }
}

/// Classification flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowFlags {
    pub iconic: bool,
    pub visible: bool,
    pub focused: bool,
    pub modal: bool,
    pub shaped: bool,
    pub moving: bool,
    pub resizing: bool,
}

/// A managed client window.
///
/// Cross references (`owner`, `transients`, `group`) are plain handles
/// resolved through the [`Registry`](crate::registry::Registry), which
/// keeps both sides of each link consistent.
#[derive(Debug, Clone)]
pub struct ManagedWindow {
    pub(crate) handle: WindowHandle,
    pub(crate) name: String,
    pub(crate) icon_name: String,
    /// Content area in root coordinates.
    pub(crate) client: Rect,
    pub(crate) margin: Margin,
    /// Border width the client had before it was framed.
    pub(crate) old_border_width: u32,
    pub(crate) size_hints: SizeHints,
    pub(crate) decorations: Decorations,
    pub(crate) functions: Functions,
    pub(crate) focus_mode: FocusMode,
    pub(crate) protocols: Protocols,
    pub(crate) flags: WindowFlags,
    pub(crate) maximized: MaximizeMode,
    pub(crate) owner: Owner,
    pub(crate) transients: Vec<WindowHandle>,
    pub(crate) group: Option<WindowHandle>,
    /// `None` while iconified.
    pub(crate) workspace: Option<u32>,
    /// Index in the workspace window list or in the icon list.
    pub(crate) window_number: Option<usize>,
    pub(crate) state: WmState,
    pub(crate) attributes: AttributesRecord,
    /// Serial of the last time this window gained focus; 0 if never.
    pub(crate) focus_serial: u64,
}

impl ManagedWindow {
    pub fn new(handle: WindowHandle, client: Rect, size_hints: SizeHints) -> Self {
        Self {
            handle,
            name: String::new(),
            icon_name: String::new(),
            client,
            margin: Margin::default(),
            old_border_width: 0,
            size_hints,
            decorations: Decorations::empty(),
            functions: Functions::empty(),
            focus_mode: FocusMode::Passive,
            protocols: Protocols::default(),
            flags: WindowFlags::default(),
            maximized: MaximizeMode::None,
            owner: Owner::None,
            transients: Vec::new(),
            group: None,
            workspace: None,
            window_number: None,
            state: WmState::Withdrawn,
            attributes: AttributesRecord::default(),
            focus_serial: 0,
        }
    }

    // -- Accessors --

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub fn client_rect(&self) -> Rect {
        self.client
    }

    pub fn frame_rect(&self) -> Rect {
        self.margin.frame_around(self.client)
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn old_border_width(&self) -> u32 {
        self.old_border_width
    }

    pub fn size_hints(&self) -> &SizeHints {
        &self.size_hints
    }

    pub fn decorations(&self) -> Decorations {
        self.decorations
    }

    pub fn functions(&self) -> Functions {
        self.functions
    }

    pub fn focus_mode(&self) -> FocusMode {
        self.focus_mode
    }

    pub fn protocols(&self) -> Protocols {
        self.protocols
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn is_iconic(&self) -> bool {
        self.flags.iconic
    }

    pub fn is_visible(&self) -> bool {
        self.flags.visible
    }

    pub fn is_focused(&self) -> bool {
        self.flags.focused
    }

    pub fn is_modal(&self) -> bool {
        self.flags.modal
    }

    pub fn maximize_mode(&self) -> MaximizeMode {
        self.maximized
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn is_transient(&self) -> bool {
        self.owner.is_transient()
    }

    pub fn transients(&self) -> &[WindowHandle] {
        &self.transients
    }

    pub fn group(&self) -> Option<WindowHandle> {
        self.group
    }

    pub fn workspace(&self) -> Option<u32> {
        self.workspace
    }

    pub fn window_number(&self) -> Option<usize> {
        self.window_number
    }

    pub fn state(&self) -> WmState {
        self.state
    }

    pub fn attributes(&self) -> &AttributesRecord {
        &self.attributes
    }

    pub fn focus_serial(&self) -> u64 {
        self.focus_serial
    }

    /// Not iconic and willing to take input focus from the manager.
    pub fn accepts_focus(&self) -> bool {
        !self.flags.iconic && self.focus_mode.accepts_focus()
    }

    // -- Decorations --

    /// Replace the decoration set and recompute the frame margin.
    /// Returns the previous margin.
    pub(crate) fn set_decorations(&mut self, decorations: Decorations, frame: &FrameConfig) -> Margin {
        let old = self.margin;
        self.decorations = decorations;
        self.margin = frame_margin(decorations, frame);
        old
    }
}
