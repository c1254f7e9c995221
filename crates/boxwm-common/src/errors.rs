use std::path::PathBuf;

use crate::types::WindowHandle;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Why a single window could not be brought under management.
///
/// These never reach the user; the manage attempt for that window is
/// abandoned and every other window is unaffected.
#[derive(Debug, thiserror::Error)]
pub enum ManageError {
    #[error("window {0} vanished before it could be managed")]
    Vanished(WindowHandle),

    #[error("window {0} is override-redirect")]
    OverrideRedirect(WindowHandle),

    #[error("window {0} is already managed")]
    AlreadyManaged(WindowHandle),

    #[error("window {0} is another client's icon window")]
    IconWindow(WindowHandle),

    #[error("window {0} asked to start withdrawn")]
    StartsWithdrawn(WindowHandle),
}

#[derive(Debug, thiserror::Error)]
pub enum WmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manage(#[from] ManageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("replay error: {0}")]
    Replay(String),

    #[error("{0}")]
    Other(String),
}
