//! Client hints and the decoration/function merge.
//!
//! Capabilities start from a full default set and pass through a fixed
//! sequence of stages, each of which can only take capabilities away:
//!
//! | stage | source | effect |
//! |---|---|---|
//! | defaults | protocols | everything; close only with graceful-close support |
//! | legacy | Motif hints | keep only the listed decorations/functions |
//! | extended | private hints | apply a decoration preset |
//! | constraints | transience, size hints | drop maximize/handle/resize |
//!
//! The legacy stage runs only when the extended hints carry no decoration.

use bitflags::bitflags;
use boxwm_common::{Rect, WindowHandle};
use boxwm_config::schema::FrameConfig;
use serde::{Deserialize, Serialize};

use crate::geometry::Margin;
use crate::gravity::Gravity;
use crate::state::{Attrib, DecorationPreset, WmState};

bitflags! {
    /// Frame chrome present around a client.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Decorations: u32 {
        const TITLEBAR = 1 << 0;
        const HANDLE = 1 << 1;
        const BORDER = 1 << 2;
        const ICONIFY = 1 << 3;
        const MAXIMIZE = 1 << 4;
        const CLOSE = 1 << 5;
    }
}

bitflags! {
    /// Operations the user may perform on a window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Functions: u32 {
        const RESIZE = 1 << 0;
        const MOVE = 1 << 1;
        const ICONIFY = 1 << 2;
        const MAXIMIZE = 1 << 3;
        const CLOSE = 1 << 4;
    }
}

/// How a client takes keyboard focus (ICCCM 4.1.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusMode {
    #[default]
    Passive,
    LocallyActive,
    GloballyActive,
    NoInput,
}

impl FocusMode {
    pub fn from_hints(input: Option<bool>, take_focus: bool) -> FocusMode {
        match (input, take_focus) {
            (Some(true), true) => FocusMode::LocallyActive,
            (Some(false), true) => FocusMode::GloballyActive,
            (Some(false), false) => FocusMode::NoInput,
            _ => FocusMode::Passive,
        }
    }

    /// Whether the manager itself assigns input focus.
    pub fn accepts_focus(self) -> bool {
        matches!(self, FocusMode::Passive | FocusMode::LocallyActive)
    }
}

/// `WM_PROTOCOLS` entries the manager cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Protocols {
    pub delete_window: bool,
    pub take_focus: bool,
}

/// Raw `WM_HINTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WmHints {
    pub input: Option<bool>,
    pub initial_state: Option<WmState>,
    pub icon_window: Option<WindowHandle>,
    pub window_group: Option<WindowHandle>,
}

/// Raw `WM_NORMAL_HINTS`; `None` fields were not set by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalHints {
    pub min_size: Option<(i32, i32)>,
    pub max_size: Option<(i32, i32)>,
    pub resize_inc: Option<(i32, i32)>,
    pub base_size: Option<(i32, i32)>,
    pub gravity: Option<Gravity>,
    pub user_position: bool,
    pub program_position: bool,
}

/// Size constraints after defaults and sanity clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub width_inc: i32,
    pub height_inc: i32,
    pub base_width: i32,
    pub base_height: i32,
    pub gravity: Gravity,
    /// Both a minimum and a maximum were supplied.
    pub bounded: bool,
    pub position_requested: bool,
}

impl SizeHints {
    /// Defaults: minimum 1x1, increment 1, base 0, maximum the full screen
    /// (not the usable area, which changes under the client), gravity
    /// north-west. A maximum below the minimum is raised to the minimum.
    pub fn from_normal(raw: Option<&NormalHints>, screen: Rect) -> SizeHints {
        let mut hints = SizeHints {
            min_width: 1,
            min_height: 1,
            max_width: screen.width,
            max_height: screen.height,
            width_inc: 1,
            height_inc: 1,
            base_width: 0,
            base_height: 0,
            gravity: Gravity::NorthWest,
            bounded: false,
            position_requested: false,
        };

        let Some(raw) = raw else {
            return hints;
        };

        if let Some((w, h)) = raw.min_size {
            if w >= 0 {
                hints.min_width = w;
            }
            if h >= 0 {
                hints.min_height = h;
            }
        }
        if let Some((w, h)) = raw.max_size {
            hints.max_width = w.max(hints.min_width);
            hints.max_height = h.max(hints.min_height);
        }
        if let Some((w, h)) = raw.resize_inc {
            hints.width_inc = w.max(1);
            hints.height_inc = h.max(1);
        }
        if let Some((w, h)) = raw.base_size {
            hints.base_width = w.max(0);
            hints.base_height = h.max(0);
        }
        if let Some(gravity) = raw.gravity {
            hints.gravity = gravity;
        }
        hints.bounded = raw.min_size.is_some() && raw.max_size.is_some();
        hints.position_requested = raw.user_position || raw.program_position;
        hints
    }

    /// The client cannot be resized: min and max were both given and agree.
    pub fn is_fixed(&self) -> bool {
        self.bounded && self.max_width <= self.min_width && self.max_height <= self.min_height
    }

    /// Clamp a client size into range and snap it down to the resize
    /// increments.
    pub fn constrain(&self, width: i32, height: i32) -> (i32, i32) {
        fn axis(value: i32, min: i32, max: i32, base: i32, inc: i32) -> i32 {
            let clamped = value.clamp(min, max.max(min));
            if inc <= 1 || clamped <= base {
                return clamped;
            }
            let snapped = base + (clamped - base) / inc * inc;
            snapped.max(min)
        }
        (
            axis(
                width,
                self.min_width,
                self.max_width,
                self.base_width,
                self.width_inc,
            ),
            axis(
                height,
                self.min_height,
                self.max_height,
                self.base_height,
                self.height_inc,
            ),
        )
    }
}

/// `_MOTIF_WM_HINTS` bits.
pub mod mwm {
    pub const FUNC_ALL: u32 = 1 << 0;
    pub const FUNC_RESIZE: u32 = 1 << 1;
    pub const FUNC_MOVE: u32 = 1 << 2;
    pub const FUNC_MINIMIZE: u32 = 1 << 3;
    pub const FUNC_MAXIMIZE: u32 = 1 << 4;
    pub const FUNC_CLOSE: u32 = 1 << 5;

    pub const DECOR_ALL: u32 = 1 << 0;
    pub const DECOR_BORDER: u32 = 1 << 1;
    pub const DECOR_RESIZEH: u32 = 1 << 2;
    pub const DECOR_TITLE: u32 = 1 << 3;
    pub const DECOR_MENU: u32 = 1 << 4;
    pub const DECOR_MINIMIZE: u32 = 1 << 5;
    pub const DECOR_MAXIMIZE: u32 = 1 << 6;
}

/// Legacy (Motif) decoration/function hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MwmHints {
    pub functions: Option<u32>,
    pub decorations: Option<u32>,
}

/// The manager's private hints property, also used as the payload of the
/// change-attributes client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedHints {
    pub flags: Attrib,
    pub attrib: Attrib,
    pub workspace: u32,
    pub stack: u32,
    pub decoration: DecorationPreset,
}

/// Merged decorations and functions for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub decorations: Decorations,
    pub functions: Functions,
}

impl Capabilities {
    pub fn defaults(protocols: &Protocols) -> Capabilities {
        let mut caps = Capabilities {
            decorations: Decorations::TITLEBAR
                | Decorations::HANDLE
                | Decorations::BORDER
                | Decorations::ICONIFY
                | Decorations::MAXIMIZE,
            functions: Functions::RESIZE
                | Functions::MOVE
                | Functions::ICONIFY
                | Functions::MAXIMIZE,
        };
        if protocols.delete_window {
            caps.decorations |= Decorations::CLOSE;
            caps.functions |= Functions::CLOSE;
        }
        caps
    }

    pub fn apply_legacy(mut self, hints: &MwmHints) -> Capabilities {
        if let Some(bits) = hints.decorations {
            if bits & mwm::DECOR_ALL == 0 {
                let mut keep = Decorations::CLOSE;
                for (bit, decoration) in [
                    (mwm::DECOR_BORDER, Decorations::BORDER),
                    (mwm::DECOR_RESIZEH, Decorations::HANDLE),
                    (mwm::DECOR_TITLE, Decorations::TITLEBAR),
                    (mwm::DECOR_MINIMIZE, Decorations::ICONIFY),
                    (mwm::DECOR_MAXIMIZE, Decorations::MAXIMIZE),
                ] {
                    if bits & bit != 0 {
                        keep |= decoration;
                    }
                }
                self.decorations &= keep;
            }
        }
        if let Some(bits) = hints.functions {
            if bits & mwm::FUNC_ALL == 0 {
                let mut keep = Functions::empty();
                for (bit, function) in [
                    (mwm::FUNC_RESIZE, Functions::RESIZE),
                    (mwm::FUNC_MOVE, Functions::MOVE),
                    (mwm::FUNC_MINIMIZE, Functions::ICONIFY),
                    (mwm::FUNC_MAXIMIZE, Functions::MAXIMIZE),
                    (mwm::FUNC_CLOSE, Functions::CLOSE),
                ] {
                    if bits & bit != 0 {
                        keep |= function;
                    }
                }
                self.functions &= keep;
            }
        }
        self
    }

    pub fn apply_extended(self, hints: &ExtendedHints) -> Capabilities {
        if hints.flags.contains(Attrib::DECORATION) {
            self.restrict_to_preset(hints.decoration)
        } else {
            self
        }
    }

    pub fn restrict_to_preset(mut self, preset: DecorationPreset) -> Capabilities {
        match preset {
            DecorationPreset::None => self.decorations = Decorations::empty(),
            DecorationPreset::Normal => {}
            DecorationPreset::Tiny => {
                self.decorations
                    .remove(Decorations::BORDER | Decorations::HANDLE | Decorations::MAXIMIZE);
                self.functions
                    .remove(Functions::RESIZE | Functions::MAXIMIZE);
            }
            DecorationPreset::Tool => {
                self.decorations.remove(
                    Decorations::ICONIFY
                        | Decorations::BORDER
                        | Decorations::HANDLE
                        | Decorations::MAXIMIZE,
                );
                self.functions
                    .remove(Functions::RESIZE | Functions::MAXIMIZE | Functions::ICONIFY);
            }
        }
        self
    }

    pub fn apply_constraints(mut self, transient: bool, fixed_size: bool) -> Capabilities {
        if transient {
            self.decorations
                .remove(Decorations::MAXIMIZE | Decorations::HANDLE);
            self.functions.remove(Functions::MAXIMIZE);
        }
        if fixed_size {
            self.decorations
                .remove(Decorations::MAXIMIZE | Decorations::HANDLE);
            self.functions
                .remove(Functions::RESIZE | Functions::MAXIMIZE);
        }
        self
    }

    /// The full manage-time merge.
    pub fn merge(
        protocols: &Protocols,
        legacy: Option<&MwmHints>,
        extended: Option<&ExtendedHints>,
        transient: bool,
        fixed_size: bool,
    ) -> Capabilities {
        let caps = Capabilities::defaults(protocols);
        let caps = match extended {
            Some(ext) if ext.flags.contains(Attrib::DECORATION) => caps.apply_extended(ext),
            _ => match legacy {
                Some(mwm) => caps.apply_legacy(mwm),
                None => caps,
            },
        };
        caps.apply_constraints(transient, fixed_size)
    }
}

/// Decorations for a preset chosen after the window is managed (restart
/// restore or a change-attributes request), checked against the
/// functions the window already has.
pub fn preset_decorations(
    current: Decorations,
    preset: DecorationPreset,
    functions: Functions,
    transient: bool,
) -> Decorations {
    let normal = Decorations::TITLEBAR
        | Decorations::HANDLE
        | Decorations::BORDER
        | Decorations::ICONIFY
        | Decorations::MAXIMIZE;

    let mut decorations = match preset {
        DecorationPreset::None => Decorations::empty(),
        DecorationPreset::Normal => current | normal,
        DecorationPreset::Tiny => {
            (current | Decorations::TITLEBAR | Decorations::ICONIFY)
                - (Decorations::BORDER | Decorations::HANDLE | Decorations::MAXIMIZE)
        }
        DecorationPreset::Tool => {
            (current | Decorations::TITLEBAR)
                - (Decorations::ICONIFY | Decorations::BORDER | Decorations::HANDLE)
        }
    };

    if !functions.contains(Functions::RESIZE) || transient {
        decorations.remove(Decorations::MAXIMIZE | Decorations::HANDLE);
    }
    if !functions.contains(Functions::MAXIMIZE) {
        decorations.remove(Decorations::MAXIMIZE);
    }
    if !functions.contains(Functions::ICONIFY) {
        decorations.remove(Decorations::ICONIFY);
    }
    decorations.set(
        Decorations::CLOSE,
        decorations.contains(Decorations::TITLEBAR) && functions.contains(Functions::CLOSE),
    );
    decorations
}

/// Frame insets implied by a decoration set.
pub fn frame_margin(decorations: Decorations, frame: &FrameConfig) -> Margin {
    let border = if decorations.contains(Decorations::BORDER) {
        frame.border_width as i32
    } else {
        0
    };
    let mut margin = Margin::uniform(border);
    if decorations.contains(Decorations::TITLEBAR) {
        margin.top += frame.title_height as i32;
    }
    if decorations.contains(Decorations::HANDLE) {
        margin.bottom += frame.handle_height as i32;
    }
    margin
}
