use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::model::{directory_name, Profile};

pub const DEFAULT_PROFILE_DIR: &str = "Default";
pub const PROFILE_DIR_PREFIX: &str = "Profile";
pub const PREFERENCES_FILE_NAME: &str = "Preferences";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("profiles directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("read failed for '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in '{}': {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ProfileProvider {
    fn provider_name(&self) -> &'static str;
    fn discover(&self) -> Result<Vec<Profile>, ProviderError>;
}

/// Scans a Chrome user-data directory (e.g. `~/.config/google-chrome`) for signed-in profiles.
pub struct ChromeProfileProvider {
    profiles_dir: PathBuf,
}

impl ChromeProfileProvider {
    pub fn new(profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
        }
    }
}

impl ProfileProvider for ChromeProfileProvider {
    fn provider_name(&self) -> &'static str {
        "chrome"
    }

    fn discover(&self) -> Result<Vec<Profile>, ProviderError> {
        if !self.profiles_dir.is_dir() {
            return Err(ProviderError::MissingDirectory(self.profiles_dir.clone()));
        }

        let profiles = candidate_folders(&self.profiles_dir)
            .iter()
            .filter_map(|folder| read_profile(folder))
            .collect();
        Ok(profiles)
    }
}

/// Serves a fixed list of profiles; used where no real user-data directory should be touched.
pub struct FixtureProvider {
    profiles: Vec<Profile>,
}

impl FixtureProvider {
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }
}

impl ProfileProvider for FixtureProvider {
    fn provider_name(&self) -> &'static str {
        "fixture"
    }

    fn discover(&self) -> Result<Vec<Profile>, ProviderError> {
        Ok(self.profiles.clone())
    }
}

/// `Default` followed by every immediate `Profile*` subdirectory.
pub fn candidate_folders(profiles_dir: &Path) -> Vec<PathBuf> {
    let mut out = vec![profiles_dir.join(DEFAULT_PROFILE_DIR)];

    let walker = WalkDir::new(profiles_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                log::warn!(
                    "skipping unreadable entry in '{}': {error}",
                    profiles_dir.display()
                );
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if directory_name(entry.path()).starts_with(PROFILE_DIR_PREFIX) {
            out.push(entry.into_path());
        }
    }
    out
}

/// Builds a profile from `<folder>/Preferences`, or `None` when the folder holds no usable
/// signed-in account. Read and parse failures are logged; absent data is skipped quietly.
pub fn read_profile(folder: &Path) -> Option<Profile> {
    // The folder travels back to the host as JSON text.
    if folder.to_str().is_none() {
        log::warn!("skipping profile folder with non-utf8 path: {}", folder.display());
        return None;
    }

    let preferences_path = folder.join(PREFERENCES_FILE_NAME);
    if !preferences_path.is_file() {
        return None;
    }

    let preferences = match read_preferences(&preferences_path) {
        Ok(preferences) => preferences,
        Err(error) => {
            log::error!("error reading preferences: {error}");
            return None;
        }
    };

    let (name, email) = account_identity(&preferences)?;
    Some(Profile::new(name, email, folder))
}

fn read_preferences(path: &Path) -> Result<Value, ProviderError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ProviderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ProviderError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// `account_info[0].full_name` and `account_info[0].email`, both non-empty strings.
pub fn account_identity(preferences: &Value) -> Option<(&str, &str)> {
    let account = preferences
        .get("account_info")?
        .as_array()?
        .first()?
        .as_object()?;

    let name = account.get("full_name")?.as_str()?;
    let email = account.get("email")?.as_str()?;
    if name.is_empty() || email.is_empty() {
        return None;
    }
    Some((name, email))
}
