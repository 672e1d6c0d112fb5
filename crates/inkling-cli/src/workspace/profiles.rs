use std::path::{Path, PathBuf};

use tracing::{info, warn};

use inkling_core::{Profile, ProfileCollection, default_collection};

use super::atomic::{backup_file, write_json_atomic};
use super::{WorkspaceError, WorkspacePaths, WorkspaceResult, WorkspaceSettings};

/// Where the in-memory collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilesSource {
    /// Parsed from the data file.
    Loaded,
    /// No data file yet; defaults were written.
    Created,
    /// Data file present but unusable. It was copied to `backup` and defaults
    /// are kept in memory until the next save.
    Recovered { reason: String, backup: PathBuf },
}

/// Load the profile collection, falling back to the built-in rule set.
pub fn load_or_create_profiles(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
) -> WorkspaceResult<(ProfileCollection, ProfilesSource)> {
    let path = paths.profiles_path(&settings.data_file);
    if !path.exists() {
        let profiles = default_collection();
        save_profiles(paths, settings, &profiles)?;
        info!(path = %path.display(), "created default profiles");
        return Ok((profiles, ProfilesSource::Created));
    }

    match read_profiles(&path) {
        Ok(profiles) => {
            info!(path = %path.display(), profiles = profiles.len(), "profiles loaded");
            Ok((profiles, ProfilesSource::Loaded))
        }
        Err(err) => {
            let backup = backup_file(&path)?;
            warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %err,
                "profiles unreadable, using defaults"
            );
            let source = ProfilesSource::Recovered {
                reason: err.to_string(),
                backup,
            };
            Ok((default_collection(), source))
        }
    }
}

/// Parse the data file; an empty array counts as unusable.
pub fn read_profiles(path: &Path) -> WorkspaceResult<ProfileCollection> {
    let content = std::fs::read_to_string(path)?;
    let profiles: Vec<Profile> = serde_json::from_str(&content)?;
    ProfileCollection::from_profiles(profiles)
        .ok_or_else(|| WorkspaceError::Invalid("profile list is empty".to_string()))
}

pub fn save_profiles(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    profiles: &ProfileCollection,
) -> WorkspaceResult<()> {
    let path = paths.profiles_path(&settings.data_file);
    write_json_atomic(&path, profiles)?;
    info!(path = %path.display(), profiles = profiles.len(), "profiles saved");
    Ok(())
}
