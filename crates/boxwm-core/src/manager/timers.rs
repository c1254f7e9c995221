//! One-shot timers: auto-raise and reconfigure debounce.
//!
//! Nothing sleeps. Deadlines are stored and `tick` fires whatever has
//! expired, so the event thread never blocks.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use boxwm_common::WindowHandle;
use boxwm_config::BoxConfig;
use tracing::debug;

use super::WindowManager;
use crate::platform::WindowSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    AutoRaise(WindowHandle),
    Reconfigure,
}

#[derive(Debug, Default)]
pub struct Timers {
    auto_raise: HashMap<WindowHandle, Instant>,
    reconfigure: Option<Instant>,
}

impl Timers {
    pub fn arm_auto_raise(&mut self, window: WindowHandle, deadline: Instant) {
        self.auto_raise.insert(window, deadline);
    }

    pub fn cancel_auto_raise(&mut self, window: WindowHandle) -> bool {
        self.auto_raise.remove(&window).is_some()
    }

    pub fn clear_auto_raise(&mut self) {
        self.auto_raise.clear();
    }

    pub fn auto_raise_pending(&self, window: WindowHandle) -> bool {
        self.auto_raise.contains_key(&window)
    }

    /// Re-arming replaces the previous deadline.
    pub fn arm_reconfigure(&mut self, deadline: Instant) {
        self.reconfigure = Some(deadline);
    }

    pub fn reconfigure_pending(&self) -> bool {
        self.reconfigure.is_some()
    }

    /// Remove and return every timer due at `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(Instant, TimerKind)> = Vec::new();
        self.auto_raise.retain(|window, deadline| {
            if *deadline <= now {
                due.push((*deadline, TimerKind::AutoRaise(*window)));
                false
            } else {
                true
            }
        });
        if let Some(deadline) = self.reconfigure {
            if deadline <= now {
                self.reconfigure = None;
                due.push((deadline, TimerKind::Reconfigure));
            }
        }
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, kind)| kind).collect()
    }

    pub fn clear(&mut self) {
        self.auto_raise.clear();
        self.reconfigure = None;
    }
}

impl<D: WindowSystem> WindowManager<D> {
    /// Advance the clock and fire expired timers.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        for timer in self.timers.expire(now) {
            match timer {
                TimerKind::AutoRaise(window) => {
                    // Focus may have moved on since the timer was armed.
                    if self.focused == Some(window) {
                        debug!(window = %window, "auto-raise");
                        self.raise_window(window);
                    }
                }
                TimerKind::Reconfigure => self.reconfigure(),
            }
        }
    }

    /// Queue a new configuration. Repeated requests inside the debounce
    /// window collapse into one reconfigure with the newest config.
    pub fn request_reconfigure(&mut self, config: BoxConfig) {
        self.pending_config = Some(config);
        let delay = Duration::from_millis(self.timing.reconfigure_delay_ms);
        self.timers.arm_reconfigure(self.now + delay);
    }

    /// Deadline counts from the manager's clock, the `now` of the last
    /// `tick`.
    pub(super) fn arm_auto_raise(&mut self, window: WindowHandle) {
        let delay = Duration::from_millis(self.timing.auto_raise_delay_ms);
        self.timers.arm_auto_raise(window, self.now + delay);
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_returns_due_timers_in_deadline_order() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.arm_reconfigure(start + Duration::from_millis(100));
        timers.arm_auto_raise(WindowHandle(1), start + Duration::from_millis(50));
        timers.arm_auto_raise(WindowHandle(2), start + Duration::from_millis(500));

        assert!(timers.expire(start).is_empty());
        let due = timers.expire(start + Duration::from_millis(200));
        assert_eq!(
            due,
            vec![TimerKind::AutoRaise(WindowHandle(1)), TimerKind::Reconfigure]
        );
        assert!(timers.auto_raise_pending(WindowHandle(2)));
        assert!(!timers.reconfigure_pending());
    }

    #[test]
    fn rearming_reconfigure_pushes_deadline_out() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.arm_reconfigure(start + Duration::from_millis(100));
        timers.arm_reconfigure(start + Duration::from_millis(300));
        assert!(timers.expire(start + Duration::from_millis(150)).is_empty());
        assert_eq!(
            timers.expire(start + Duration::from_millis(300)),
            vec![TimerKind::Reconfigure]
        );
    }

    #[test]
    fn cancel_auto_raise() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.arm_auto_raise(WindowHandle(1), start);
        assert!(timers.cancel_auto_raise(WindowHandle(1)));
        assert!(!timers.cancel_auto_raise(WindowHandle(1)));
        assert!(timers.expire(start).is_empty());
    }
}
