pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, ManageError, WmError};
pub use events::{EventBus, WmEvent};
pub use types::{MapState, Rect, WindowHandle};

pub type Result<T> = std::result::Result<T, WmError>;
