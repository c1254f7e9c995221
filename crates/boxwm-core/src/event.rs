//! Inbound events from the windowing system and the pending-event queue.
//!
//! Events are dispatched one at a time. A handler may look ahead in the
//! queue (for a pending destroy, a pending focus-in, queued leave events)
//! but never recurses into the dispatcher.

use std::collections::VecDeque;

use boxwm_common::WindowHandle;
use serde::{Deserialize, Serialize};

use crate::geometry::Strut;
use crate::hints::ExtendedHints;
use crate::state::WmState;

/// Stacking request carried by a configure request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackMode {
    Above,
    Below,
    TopIf,
    BottomIf,
    Opposite,
}

/// Fields a client asked to change; `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigureRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub border_width: Option<u32>,
    pub stack: Option<StackMode>,
}

/// Client properties whose change the manager reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Name,
    IconName,
    Hints,
    NormalHints,
    TransientFor,
    Protocols,
}

/// Requests sent by clients (or pagers) as client messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum ClientMessage {
    /// `WM_CHANGE_STATE`: iconic iconifies, normal deiconifies.
    ChangeState { state: WmState },
    /// Switch the screen to another workspace.
    ChangeWorkspace { workspace: u32 },
    /// Focus and raise the target window.
    Focus,
    /// Focus the next (or previous) window on the current workspace.
    CycleFocus { forward: bool },
    /// Change extended attributes (maximize, workspace, decoration).
    ChangeAttributes { hints: ExtendedHints },
    /// Politely ask the target to close.
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    MapRequest { window: WindowHandle },
    UnmapNotify { window: WindowHandle },
    DestroyNotify { window: WindowHandle },
    ReparentNotify { window: WindowHandle, parent: WindowHandle },
    ConfigureRequest {
        window: WindowHandle,
        #[serde(flatten)]
        request: ConfigureRequest,
    },
    PropertyNotify { window: WindowHandle, property: Property },
    EnterNotify { window: WindowHandle },
    LeaveNotify { window: WindowHandle },
    FocusIn { window: WindowHandle },
    FocusOut { window: WindowHandle },
    MotionNotify { window: WindowHandle, x: i32, y: i32 },
    Expose { window: WindowHandle },
    ButtonPress { window: WindowHandle, button: u32 },
    ClientMessage {
        window: WindowHandle,
        #[serde(flatten)]
        message: ClientMessage,
    },
    ShapeNotify { window: WindowHandle },
    StrutAdded { id: u64, strut: Strut },
    StrutRemoved { id: u64 },
}

/// Payload-free discriminant of [`Event`], used for queue lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MapRequest,
    UnmapNotify,
    DestroyNotify,
    ReparentNotify,
    ConfigureRequest,
    PropertyNotify,
    EnterNotify,
    LeaveNotify,
    FocusIn,
    FocusOut,
    MotionNotify,
    Expose,
    ButtonPress,
    ClientMessage,
    ShapeNotify,
    StrutAdded,
    StrutRemoved,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::MapRequest { .. } => EventKind::MapRequest,
            Event::UnmapNotify { .. } => EventKind::UnmapNotify,
            Event::DestroyNotify { .. } => EventKind::DestroyNotify,
            Event::ReparentNotify { .. } => EventKind::ReparentNotify,
            Event::ConfigureRequest { .. } => EventKind::ConfigureRequest,
            Event::PropertyNotify { .. } => EventKind::PropertyNotify,
            Event::EnterNotify { .. } => EventKind::EnterNotify,
            Event::LeaveNotify { .. } => EventKind::LeaveNotify,
            Event::FocusIn { .. } => EventKind::FocusIn,
            Event::FocusOut { .. } => EventKind::FocusOut,
            Event::MotionNotify { .. } => EventKind::MotionNotify,
            Event::Expose { .. } => EventKind::Expose,
            Event::ButtonPress { .. } => EventKind::ButtonPress,
            Event::ClientMessage { .. } => EventKind::ClientMessage,
            Event::ShapeNotify { .. } => EventKind::ShapeNotify,
            Event::StrutAdded { .. } => EventKind::StrutAdded,
            Event::StrutRemoved { .. } => EventKind::StrutRemoved,
        }
    }

    /// The window the event is about, if any.
    pub fn window(&self) -> Option<WindowHandle> {
        match self {
            Event::MapRequest { window }
            | Event::UnmapNotify { window }
            | Event::DestroyNotify { window }
            | Event::ReparentNotify { window, .. }
            | Event::ConfigureRequest { window, .. }
            | Event::PropertyNotify { window, .. }
            | Event::EnterNotify { window }
            | Event::LeaveNotify { window }
            | Event::FocusIn { window }
            | Event::FocusOut { window }
            | Event::MotionNotify { window, .. }
            | Event::Expose { window }
            | Event::ButtonPress { window, .. }
            | Event::ClientMessage { window, .. }
            | Event::ShapeNotify { window } => Some(*window),
            Event::StrutAdded { .. } | Event::StrutRemoved { .. } => None,
        }
    }

    fn is_burst(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::MotionNotify | EventKind::Expose
        )
    }
}

/// FIFO of events not yet dispatched.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.pending.iter()
    }

    /// Whether an event of one of `kinds` is queued for `window`.
    pub fn has_pending(&self, window: WindowHandle, kinds: &[EventKind]) -> bool {
        self.pending
            .iter()
            .any(|e| e.window() == Some(window) && kinds.contains(&e.kind()))
    }

    /// Remove and return the first queued event matching `pred`.
    pub fn take_first(&mut self, pred: impl Fn(&Event) -> bool) -> Option<Event> {
        let index = self.pending.iter().position(pred)?;
        self.pending.remove(index)
    }

    /// Remove every queued event matching `pred`, returning how many went.
    pub fn drain_matching(&mut self, pred: impl Fn(&Event) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| !pred(e));
        before - self.pending.len()
    }

    /// Collapse a motion/expose burst: queued events of the same kind for
    /// the same window are dropped and the newest one is returned in place
    /// of `event`. Other events pass through unchanged.
    pub fn coalesce(&mut self, event: Event) -> Event {
        if !event.is_burst() {
            return event;
        }
        let kind = event.kind();
        let window = event.window();
        let mut latest = event;
        self.pending.retain(|queued| {
            if queued.kind() == kind && queued.window() == window {
                latest = queued.clone();
                false
            } else {
                true
            }
        });
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(id: u64) -> WindowHandle {
        WindowHandle(id)
    }

    #[test]
    fn pending_lookahead_matches_window_and_kind() {
        let mut queue = EventQueue::new();
        queue.push(Event::UnmapNotify { window: w(1) });
        queue.push(Event::DestroyNotify { window: w(2) });

        assert!(queue.has_pending(w(1), &[EventKind::UnmapNotify, EventKind::DestroyNotify]));
        assert!(queue.has_pending(w(2), &[EventKind::DestroyNotify]));
        assert!(!queue.has_pending(w(2), &[EventKind::UnmapNotify]));
        assert!(!queue.has_pending(w(3), &[EventKind::DestroyNotify]));
    }

    #[test]
    fn take_first_removes_only_one() {
        let mut queue = EventQueue::new();
        queue.push(Event::FocusIn { window: w(1) });
        queue.push(Event::Expose { window: w(1) });
        queue.push(Event::FocusIn { window: w(2) });

        let taken = queue.take_first(|e| e.kind() == EventKind::FocusIn);
        assert_eq!(taken, Some(Event::FocusIn { window: w(1) }));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Event::Expose { window: w(1) }));
    }

    #[test]
    fn coalesce_keeps_newest_motion() {
        let mut queue = EventQueue::new();
        queue.push(Event::MotionNotify { window: w(1), x: 2, y: 2 });
        queue.push(Event::Expose { window: w(1) });
        queue.push(Event::MotionNotify { window: w(2), x: 9, y: 9 });
        queue.push(Event::MotionNotify { window: w(1), x: 3, y: 3 });

        let first = Event::MotionNotify { window: w(1), x: 1, y: 1 };
        let merged = queue.coalesce(first);
        assert_eq!(merged, Event::MotionNotify { window: w(1), x: 3, y: 3 });
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn coalesce_ignores_non_burst_events() {
        let mut queue = EventQueue::new();
        queue.push(Event::MapRequest { window: w(1) });
        let event = Event::MapRequest { window: w(1) };
        assert_eq!(queue.coalesce(event.clone()), event);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn drain_matching_counts() {
        let mut queue = EventQueue::new();
        queue.push(Event::LeaveNotify { window: w(1) });
        queue.push(Event::LeaveNotify { window: w(1) });
        queue.push(Event::LeaveNotify { window: w(2) });
        let drained =
            queue.drain_matching(|e| *e == Event::LeaveNotify { window: w(1) });
        assert_eq!(drained, 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn events_parse_from_json_lines() {
        let event: Event =
            serde_json::from_str(r#"{"type":"map_request","window":7}"#).unwrap();
        assert_eq!(event, Event::MapRequest { window: w(7) });

        let event: Event = serde_json::from_str(
            r#"{"type":"configure_request","window":3,"width":200,"stack":"above"}"#,
        )
        .unwrap();
        match event {
            Event::ConfigureRequest { window, request } => {
                assert_eq!(window, w(3));
                assert_eq!(request.width, Some(200));
                assert_eq!(request.x, None);
                assert_eq!(request.stack, Some(StackMode::Above));
            }
            other => panic!("unexpected {other:?}"),
        }

        let event: Event = serde_json::from_str(
            r#"{"type":"client_message","window":3,"message":"change_state","state":"iconic"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            Event::ClientMessage {
                window: w(3),
                message: ClientMessage::ChangeState {
                    state: WmState::Iconic
                }
            }
        );
    }

    #[test]
    fn strut_events_have_no_window() {
        let event = Event::StrutRemoved { id: 4 };
        assert_eq!(event.window(), None);
        assert_eq!(event.kind(), EventKind::StrutRemoved);
    }
}
