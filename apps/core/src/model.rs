use std::path::{Path, PathBuf};

use serde::Serialize;

pub const PROFILE_PICTURE_FILE_NAME: &str = "Google Profile Picture.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub icon_path: PathBuf,
    pub profile_folder: PathBuf,
    #[serde(skip)]
    normalized_name: String,
    #[serde(skip)]
    normalized_email: String,
}

impl Profile {
    pub fn new(name: &str, email: &str, profile_folder: &Path) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            icon_path: profile_folder.join(PROFILE_PICTURE_FILE_NAME),
            profile_folder: profile_folder.to_path_buf(),
            normalized_name: normalize_for_search(name),
            normalized_email: normalize_for_search(email),
        }
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    pub fn normalized_email(&self) -> &str {
        &self.normalized_email
    }

    /// Base name of the profile folder, e.g. `Default` or `Profile 1`.
    pub fn directory_name(&self) -> String {
        directory_name(&self.profile_folder)
    }

    /// The icon to render: the profile picture when it exists on disk, otherwise `fallback`.
    pub fn display_icon(&self, fallback: &str) -> String {
        if self.icon_path.is_file() {
            self.icon_path.to_string_lossy().into_owned()
        } else {
            fallback.to_string()
        }
    }
}

pub fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn normalize_for_search(input: &str) -> String {
    input.to_lowercase()
}
