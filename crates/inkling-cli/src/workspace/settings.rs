use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::atomic::{backup_file, write_bytes_atomic};
use super::{WorkspacePaths, WorkspaceResult};

pub const DEFAULT_DATA_FILE: &str = "journal_profiles.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Id of the profile the session opens with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_profile: Option<String>,
    /// File name of the profile collection under `data/`.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            active_profile: None,
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

/// Load settings, writing defaults on first run.
///
/// An unreadable file is copied to `settings.toml.bak` and defaults are
/// returned. The file itself is replaced by the next save.
pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if !path.exists() {
        let settings = WorkspaceSettings::default();
        save_settings(paths, &settings)?;
        return Ok(settings);
    }

    match read_settings(&path) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            let backup = backup_file(&path)?;
            warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %err,
                "settings unreadable, using defaults"
            );
            Ok(WorkspaceSettings::default())
        }
    }
}

fn read_settings(path: &Path) -> WorkspaceResult<WorkspaceSettings> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &WorkspaceSettings) -> WorkspaceResult<()> {
    let path = paths.settings_path();
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_paths(label: &str) -> WorkspacePaths {
        let root = std::env::temp_dir()
            .join(format!("inkling_settings_{label}_{}", uuid::Uuid::new_v4()));
        let paths = WorkspacePaths::new(root);
        paths.ensure_dirs().expect("create workspace dirs");
        paths
    }

    #[test]
    fn first_load_writes_defaults() {
        let paths = temp_paths("create");

        let settings = load_or_create_settings(&paths).expect("load");

        assert_eq!(settings, WorkspaceSettings::default());
        let stored = std::fs::read_to_string(paths.settings_path()).expect("read settings");
        assert!(stored.contains("data_file = \"journal_profiles.json\""));
    }

    #[test]
    fn unreadable_file_is_backed_up_before_defaults_are_saved() {
        let paths = temp_paths("broken");
        let broken = "active_profile = [\n";
        std::fs::write(paths.settings_path(), broken).expect("write broken settings");

        let mut settings = load_or_create_settings(&paths).expect("load");
        assert_eq!(settings, WorkspaceSettings::default());

        settings.active_profile = Some("user_1".to_string());
        save_settings(&paths, &settings).expect("save");

        let backup = paths.config_dir.join("settings.toml.bak");
        assert_eq!(std::fs::read_to_string(backup).expect("read backup"), broken);
        assert_eq!(load_or_create_settings(&paths).expect("reload"), settings);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let paths = temp_paths("partial");
        std::fs::write(paths.settings_path(), "active_profile = \"user_9\"\n").expect("write");

        let settings = load_or_create_settings(&paths).expect("load");

        assert_eq!(settings.active_profile.as_deref(), Some("user_9"));
        assert_eq!(settings.data_file, DEFAULT_DATA_FILE);
        assert!(!paths.config_dir.join("settings.toml.bak").exists());
    }
}
