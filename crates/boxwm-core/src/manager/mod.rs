//! The WindowManager ties the registry, screen and windowing system
//! together and owns the event dispatch loop.

mod area;
mod configure;
mod dispatch;
mod focus;
mod grab;
mod lifecycle;
mod manage;
mod stacking;
mod timers;
mod transient;
mod types;

pub use grab::ServerGrab;
pub use manage::UNNAMED;
pub use timers::{TimerKind, Timers};
pub use types::*;
