pub mod event;
pub mod geometry;
pub mod gravity;
pub mod group;
pub mod hints;
pub mod manager;
pub mod platform;
pub mod registry;
pub mod screen;
pub mod state;
pub mod window;
pub mod workspace;

pub use event::{ClientMessage, ConfigureRequest, Event, EventQueue, Property, StackMode};
pub use geometry::{Margin, Strut};
pub use manager::WindowManager;
pub use platform::{ClientWindow, DisplayCall, HeadlessDisplay, WindowSystem};
pub use registry::Registry;
pub use screen::Screen;
pub use window::{ManagedWindow, Owner};
pub use workspace::Workspace;
