mod atomic;
mod doctor;
mod logging;
mod paths;
mod profiles;
mod settings;

pub use doctor::{DoctorLevel, run_doctor};
pub use logging::init_logging;
pub use paths::{DEFAULT_WORKSPACE_DIR, WorkspacePaths};
pub use profiles::{ProfilesSource, load_or_create_profiles, save_profiles};
pub use settings::{WorkspaceSettings, load_or_create_settings, save_settings};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("invalid workspace state: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
