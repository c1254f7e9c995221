//! State persisted on each client so a restarted manager can recover it.
//!
//! Two properties are written: the ICCCM state tag and a fixed nine-word
//! attribute record. Both are opaque to everything except this crate.

use bitflags::bitflags;
use boxwm_common::Rect;
use serde::{Deserialize, Serialize};

/// ICCCM `WM_STATE` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WmState {
    Withdrawn = 0,
    #[default]
    Normal = 1,
    Iconic = 3,
}

impl WmState {
    pub fn from_u32(value: u32) -> Option<WmState> {
        match value {
            0 => Some(WmState::Withdrawn),
            1 => Some(WmState::Normal),
            3 => Some(WmState::Iconic),
            _ => None,
        }
    }
}

bitflags! {
    /// Attribute bits used both as "which fields are set" (`flags`) and as
    /// their values (`attrib`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Attrib: u32 {
        const SHADED = 1 << 0;
        const MAX_HORIZ = 1 << 1;
        const MAX_VERT = 1 << 2;
        const OMNIPRESENT = 1 << 3;
        const WORKSPACE = 1 << 4;
        const STACK = 1 << 5;
        const DECORATION = 1 << 6;
    }
}

/// Decoration style a client (or the user) can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationPreset {
    None = 0,
    #[default]
    Normal = 1,
    Tiny = 2,
    Tool = 3,
}

impl DecorationPreset {
    /// Unknown values fall back to `Normal`.
    pub fn from_u32(value: u32) -> DecorationPreset {
        match value {
            0 => DecorationPreset::None,
            2 => DecorationPreset::Tiny,
            3 => DecorationPreset::Tool,
            _ => DecorationPreset::Normal,
        }
    }
}

/// Which axes a maximized window fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaximizeMode {
    #[default]
    None,
    Full,
    Vertical,
    Horizontal,
}

impl MaximizeMode {
    /// Map a maximize control to a mode: 1 full, 2 vertical, 3 horizontal.
    pub fn from_button(button: u32) -> MaximizeMode {
        match button {
            1 => MaximizeMode::Full,
            2 => MaximizeMode::Vertical,
            3 => MaximizeMode::Horizontal,
            _ => MaximizeMode::None,
        }
    }

    /// Decode a maximize request from a flags/attrib pair.
    pub fn from_attrib(flags: Attrib, attrib: Attrib) -> MaximizeMode {
        let both = Attrib::MAX_HORIZ | Attrib::MAX_VERT;
        if flags.contains(both) {
            if attrib.intersects(both) {
                MaximizeMode::Full
            } else {
                MaximizeMode::None
            }
        } else if flags.contains(Attrib::MAX_VERT) {
            if attrib.contains(Attrib::MAX_VERT) {
                MaximizeMode::Vertical
            } else {
                MaximizeMode::None
            }
        } else if flags.contains(Attrib::MAX_HORIZ) && attrib.contains(Attrib::MAX_HORIZ) {
            MaximizeMode::Horizontal
        } else {
            MaximizeMode::None
        }
    }

    pub fn attrib(self) -> Attrib {
        match self {
            MaximizeMode::None => Attrib::empty(),
            MaximizeMode::Full => Attrib::MAX_HORIZ | Attrib::MAX_VERT,
            MaximizeMode::Vertical => Attrib::MAX_VERT,
            MaximizeMode::Horizontal => Attrib::MAX_HORIZ,
        }
    }

    pub fn is_maximized(self) -> bool {
        self != MaximizeMode::None
    }

    pub fn horizontal(self) -> bool {
        matches!(self, MaximizeMode::Full | MaximizeMode::Horizontal)
    }

    pub fn vertical(self) -> bool {
        matches!(self, MaximizeMode::Full | MaximizeMode::Vertical)
    }
}

/// Number of 32-bit words in the encoded attribute record.
pub const RECORD_WORDS: usize = 9;

/// Per-window attributes persisted across a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributesRecord {
    pub flags: Attrib,
    pub attrib: Attrib,
    pub workspace: u32,
    pub stack: u32,
    pub decoration: DecorationPreset,
    /// Frame geometry saved before maximizing; zero when not maximized.
    pub premax: Rect,
}

impl AttributesRecord {
    pub fn to_words(&self) -> [u32; RECORD_WORDS] {
        [
            self.flags.bits(),
            self.attrib.bits(),
            self.workspace,
            self.stack,
            self.decoration as u32,
            self.premax.x as u32,
            self.premax.y as u32,
            self.premax.width as u32,
            self.premax.height as u32,
        ]
    }

    /// Decode a record; anything but exactly nine words is rejected.
    pub fn from_words(words: &[u32]) -> Option<AttributesRecord> {
        let words: &[u32; RECORD_WORDS] = words.try_into().ok()?;
        Some(AttributesRecord {
            flags: Attrib::from_bits_retain(words[0]),
            attrib: Attrib::from_bits_retain(words[1]),
            workspace: words[2],
            stack: words[3],
            decoration: DecorationPreset::from_u32(words[4]),
            premax: Rect::new(
                words[5] as i32,
                words[6] as i32,
                words[7] as i32,
                words[8] as i32,
            ),
        })
    }

    pub fn maximize_mode(&self) -> MaximizeMode {
        MaximizeMode::from_attrib(self.flags, self.attrib)
    }

    pub fn set_workspace(&mut self, workspace: u32) {
        self.flags |= Attrib::WORKSPACE;
        self.workspace = workspace;
    }

    pub fn set_maximized(&mut self, mode: MaximizeMode, premax: Rect) {
        let both = Attrib::MAX_HORIZ | Attrib::MAX_VERT;
        self.flags.remove(both);
        self.attrib.remove(both);
        self.flags |= mode.attrib();
        self.attrib |= mode.attrib();
        self.premax = premax;
    }

    pub fn clear_maximized(&mut self) {
        self.set_maximized(MaximizeMode::None, Rect::default());
    }

    pub fn set_decoration(&mut self, preset: DecorationPreset) {
        self.flags |= Attrib::DECORATION;
        self.decoration = preset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wm_state_values() {
        assert_eq!(WmState::from_u32(0), Some(WmState::Withdrawn));
        assert_eq!(WmState::from_u32(1), Some(WmState::Normal));
        assert_eq!(WmState::from_u32(3), Some(WmState::Iconic));
        assert_eq!(WmState::from_u32(2), None);
        assert_eq!(WmState::Iconic as u32, 3);
    }

    #[test]
    fn record_survives_encoding_with_negative_premax() {
        let mut record = AttributesRecord::default();
        record.set_workspace(3);
        record.set_decoration(DecorationPreset::Tool);
        record.set_maximized(MaximizeMode::Vertical, Rect::new(-20, -5, 640, 480));

        let words = record.to_words();
        assert_eq!(words.len(), RECORD_WORDS);
        assert_eq!(AttributesRecord::from_words(&words), Some(record));
    }

    #[test]
    fn record_rejects_wrong_length() {
        assert_eq!(AttributesRecord::from_words(&[0; 5]), None);
        assert_eq!(AttributesRecord::from_words(&[0; 10]), None);
    }

    #[test]
    fn unknown_decoration_is_normal() {
        assert_eq!(DecorationPreset::from_u32(42), DecorationPreset::Normal);
    }

    #[test]
    fn maximize_from_attrib_table() {
        let both = Attrib::MAX_HORIZ | Attrib::MAX_VERT;
        assert_eq!(MaximizeMode::from_attrib(both, both), MaximizeMode::Full);
        assert_eq!(
            MaximizeMode::from_attrib(both, Attrib::MAX_VERT),
            MaximizeMode::Full
        );
        assert_eq!(MaximizeMode::from_attrib(both, Attrib::empty()), MaximizeMode::None);
        assert_eq!(
            MaximizeMode::from_attrib(Attrib::MAX_VERT, Attrib::MAX_VERT),
            MaximizeMode::Vertical
        );
        assert_eq!(
            MaximizeMode::from_attrib(Attrib::MAX_HORIZ, Attrib::MAX_HORIZ),
            MaximizeMode::Horizontal
        );
        assert_eq!(
            MaximizeMode::from_attrib(Attrib::empty(), both),
            MaximizeMode::None
        );
    }

    #[test]
    fn clear_maximized_resets_premax() {
        let mut record = AttributesRecord::default();
        record.set_maximized(MaximizeMode::Full, Rect::new(1, 2, 3, 4));
        assert_eq!(record.maximize_mode(), MaximizeMode::Full);
        record.clear_maximized();
        assert_eq!(record.maximize_mode(), MaximizeMode::None);
        assert_eq!(record.premax, Rect::default());
        assert!(!record.flags.intersects(Attrib::MAX_HORIZ | Attrib::MAX_VERT));
    }

    #[test]
    fn maximize_buttons() {
        assert_eq!(MaximizeMode::from_button(1), MaximizeMode::Full);
        assert_eq!(MaximizeMode::from_button(2), MaximizeMode::Vertical);
        assert_eq!(MaximizeMode::from_button(3), MaximizeMode::Horizontal);
        assert_eq!(MaximizeMode::from_button(0), MaximizeMode::None);
        assert!(MaximizeMode::Full.horizontal() && MaximizeMode::Full.vertical());
        assert!(!MaximizeMode::Vertical.horizontal());
    }
}
