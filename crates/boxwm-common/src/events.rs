use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{Rect, WindowHandle};

/// Change notifications for observers outside the core (panels, session
/// protocol broadcasters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WmEvent {
    CurrentWorkspaceChanged(u32),
    WorkspaceCountChanged(u32),
    /// `None` when focus went back to the root window.
    WindowFocused(Option<WindowHandle>),
    WindowAdded { window: WindowHandle, workspace: u32 },
    WindowRemoved { window: WindowHandle, workspace: u32 },
    WindowRaised(WindowHandle),
    WindowLowered(WindowHandle),
    WindowConfigured { window: WindowHandle, frame: Rect },
    WindowIconified(WindowHandle),
    WindowNameChanged { window: WindowHandle, name: String },
    UsableAreaChanged(Rect),
    Reconfigured,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<WmEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WmEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: WmEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
