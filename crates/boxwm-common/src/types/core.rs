use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a window on the windowing system.
///
/// `WindowHandle::NONE` is the null handle; clients use it (and the root
/// window) in transient hints to mean "modal to the whole screen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    pub const NONE: WindowHandle = WindowHandle(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Map state as reported by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapState {
    #[default]
    Unmapped,
    Unviewable,
    Viewable,
}
