//! Headless replay: feed a JSON-lines script through the window manager
//! and summarize the resulting state.
//!
//! Each line is one step:
//!
//! ```text
//! {"op":"create","window":2,"client":{"rect":{"x":0,"y":0,"width":300,"height":200},"name":"xterm"}}
//! {"op":"event","event":{"type":"map_request","window":2}}
//! {"op":"tick","ms":500}
//! {"op":"destroy","window":2}
//! ```
//!
//! Consecutive `event` steps are queued together before being processed,
//! so handlers see the later ones as lookahead.

use std::io::BufRead;
use std::time::{Duration, Instant};

use boxwm_common::{Rect, WindowHandle, WmError, WmEvent};
use boxwm_config::BoxConfig;
use boxwm_core::{ClientWindow, Event, HeadlessDisplay, WindowManager};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Adopt the windows already on the display.
    Start,
    /// A client creates a window. It is not managed until it asks to be
    /// mapped.
    Create {
        window: WindowHandle,
        #[serde(default)]
        client: ClientWindow,
    },
    /// Replace a window's properties, as a client rewriting them would.
    /// Follow with a `property_notify` event for the manager to notice.
    Update {
        window: WindowHandle,
        client: ClientWindow,
    },
    /// The client window disappears.
    Destroy { window: WindowHandle },
    Event { event: Event },
    /// Advance the clock, firing due timers.
    Tick { ms: u64 },
    /// Ask for a reconfigure with this config (debounced).
    Reconfigure {
        #[serde(default)]
        config: BoxConfig,
    },
    Shutdown,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceSummary {
    pub id: u32,
    pub name: String,
    pub windows: Vec<WindowHandle>,
    pub stacking: Vec<WindowHandle>,
    pub last_focus: Option<WindowHandle>,
}

#[derive(Debug, Serialize)]
pub struct WindowSummary {
    pub window: WindowHandle,
    pub name: String,
    pub workspace: Option<u32>,
    pub number: Option<usize>,
    pub frame: Rect,
    pub iconic: bool,
    pub maximized: bool,
    pub owner: Option<WindowHandle>,
    pub transients: Vec<WindowHandle>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub steps: usize,
    pub dispatched: usize,
    pub notifications: usize,
    pub display_calls: usize,
    pub current_workspace: u32,
    pub focused: Option<WindowHandle>,
    pub usable_area: Rect,
    pub icons: Vec<WindowHandle>,
    pub workspaces: Vec<WorkspaceSummary>,
    pub windows: Vec<WindowSummary>,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_step(line: &str) -> serde_json::Result<Option<Step>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Drives a [`WindowManager`] over a [`HeadlessDisplay`].
pub struct Replay {
    wm: WindowManager<HeadlessDisplay>,
    notifications: broadcast::Receiver<WmEvent>,
    received: usize,
    started: Instant,
    elapsed: Duration,
    steps: usize,
    dispatched: usize,
}

impl Replay {
    pub fn new(screen: Rect, config: &BoxConfig) -> Self {
        let wm = WindowManager::new(HeadlessDisplay::new(screen), config);
        let notifications = wm.subscribe();
        let started = Instant::now();
        let mut replay = Self {
            wm,
            notifications,
            received: 0,
            started,
            elapsed: Duration::ZERO,
            steps: 0,
            dispatched: 0,
        };
        replay.wm.tick(started);
        replay
    }

    pub fn apply(&mut self, step: Step) {
        self.steps += 1;
        if let Step::Event { event } = step {
            self.wm.push_event(event);
            return;
        }
        self.flush();

        match step {
            Step::Start => self.wm.start(),
            Step::Create { window, client } => {
                debug!(window = %window, "client created");
                self.wm.display_mut().add_window(window, client);
            }
            Step::Update { window, client } => {
                self.wm.display_mut().add_window(window, client);
            }
            Step::Destroy { window } => {
                self.wm.display_mut().destroy(window);
                self.wm.push_event(Event::DestroyNotify { window });
                self.flush();
            }
            Step::Tick { ms } => {
                self.elapsed += Duration::from_millis(ms);
                self.wm.tick(self.started + self.elapsed);
            }
            Step::Reconfigure { config } => self.wm.request_reconfigure(config),
            Step::Shutdown => self.wm.shutdown(),
            Step::Event { .. } => {}
        }
        self.drain_notifications();
    }

    /// Dispatch everything queued so far.
    pub fn flush(&mut self) {
        self.dispatched += self.wm.process_pending_at(self.started + self.elapsed);
        self.drain_notifications();
    }

    fn drain_notifications(&mut self) {
        loop {
            match self.notifications.try_recv() {
                Ok(event) => {
                    debug!(?event, "notification");
                    self.received += 1;
                }
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    self.received += missed as usize;
                }
                Err(_) => break,
            }
        }
    }

    /// Run every step read from `reader`, then summarize.
    pub fn run(mut self, reader: impl BufRead) -> Result<Summary, WmError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let step = parse_step(&line)
                .map_err(|e| WmError::Replay(format!("line {}: {e}", index + 1)))?;
            if let Some(step) = step {
                self.apply(step);
            }
        }
        self.flush();
        info!(steps = self.steps, dispatched = self.dispatched, "replay finished");
        Ok(self.summary())
    }

    pub fn summary(&self) -> Summary {
        let screen = self.wm.screen();
        let workspaces = screen
            .workspaces()
            .iter()
            .map(|ws| WorkspaceSummary {
                id: ws.id(),
                name: ws.name().to_string(),
                windows: ws.windows().to_vec(),
                stacking: ws.stacking().to_vec(),
                last_focus: ws.last_focus(),
            })
            .collect();

        let windows = self
            .wm
            .registry()
            .iter()
            .map(|w| WindowSummary {
                window: w.handle(),
                name: w.name().to_string(),
                workspace: w.workspace(),
                number: w.window_number(),
                frame: w.frame_rect(),
                iconic: w.is_iconic(),
                maximized: w.maximize_mode().is_maximized(),
                owner: w.owner().window(),
                transients: w.transients().to_vec(),
            })
            .collect();

        Summary {
            steps: self.steps,
            dispatched: self.dispatched,
            notifications: self.received,
            display_calls: self.wm.display().calls().len(),
            current_workspace: screen.current_id(),
            focused: self.wm.focused_window(),
            usable_area: screen.usable_area(),
            icons: screen.icons().to_vec(),
            workspaces,
            windows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
# two windows, the second a dialog for the first
{"op":"create","window":2,"client":{"rect":{"x":0,"y":0,"width":300,"height":200},"name":"editor"}}
{"op":"event","event":{"type":"map_request","window":2}}
{"op":"create","window":3,"client":{"rect":{"x":10,"y":10,"width":100,"height":80},"transient_for":2}}
{"op":"event","event":{"type":"map_request","window":3}}
{"op":"event","event":{"type":"motion_notify","window":3,"x":1,"y":1}}
{"op":"event","event":{"type":"motion_notify","window":3,"x":2,"y":2}}
{"op":"tick","ms":10}
"#;

    #[test]
    fn script_builds_transient_pair() {
        let replay = Replay::new(Rect::new(0, 0, 800, 600), &BoxConfig::default());
        let summary = replay.run(SCRIPT.as_bytes()).unwrap();

        assert_eq!(summary.steps, 7);
        // The motion pair collapses into one dispatch.
        assert_eq!(summary.dispatched, 3);
        assert_eq!(summary.windows.len(), 2);
        assert_eq!(summary.focused, Some(WindowHandle(3)));
        assert_eq!(
            summary.workspaces[0].stacking,
            vec![WindowHandle(3), WindowHandle(2)]
        );
        let dialog = summary
            .windows
            .iter()
            .find(|w| w.window == WindowHandle(3))
            .unwrap();
        assert_eq!(dialog.owner, Some(WindowHandle(2)));
        assert!(summary.notifications > 0);
    }

    #[test]
    fn destroy_step_unmanages() {
        let mut replay = Replay::new(Rect::new(0, 0, 800, 600), &BoxConfig::default());
        for line in [
            r#"{"op":"create","window":2}"#,
            r#"{"op":"event","event":{"type":"map_request","window":2}}"#,
            r#"{"op":"destroy","window":2}"#,
        ] {
            replay.apply(parse_step(line).unwrap().unwrap());
        }
        let summary = replay.summary();
        assert!(summary.windows.is_empty());
        assert!(summary.workspaces[0].windows.is_empty());
        assert_eq!(summary.focused, None);
    }

    #[test]
    fn bad_line_reports_line_number() {
        let replay = Replay::new(Rect::new(0, 0, 800, 600), &BoxConfig::default());
        let err = replay
            .run("{\"op\":\"tick\",\"ms\":1}\n{\"op\":\"warp\"}\n".as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(parse_step("   ").unwrap().is_none());
        assert!(parse_step("# note").unwrap().is_none());
        assert!(parse_step("{\"op\":\"shutdown\"}").unwrap().is_some());
    }
}
