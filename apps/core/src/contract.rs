use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Profile;

pub const NO_PROFILES_TITLE: &str = "No profiles found";

/// What the host should send back when the user presses enter on a result item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ItemAction {
    OpenProfile { profile_folder: PathBuf },
    DoNothing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultItem {
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub on_enter: ItemAction,
    #[serde(default)]
    pub keep_app_open: bool,
}

impl ResultItem {
    pub fn for_profile(profile: &Profile, fallback_icon: &str) -> Self {
        Self {
            icon: profile.display_icon(fallback_icon),
            name: profile.name.clone(),
            description: profile.email.clone(),
            on_enter: ItemAction::OpenProfile {
                profile_folder: profile.profile_folder.clone(),
            },
            keep_app_open: false,
        }
    }

    pub fn no_profiles(fallback_icon: &str) -> Self {
        Self {
            icon: fallback_icon.to_string(),
            name: NO_PROFILES_TITLE.to_string(),
            description: String::new(),
            on_enter: ItemAction::DoNothing,
            keep_app_open: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryEvent {
    #[serde(default)]
    pub argument: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResultList {
    pub items: Vec<ResultItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum HostEvent {
    Query(QueryEvent),
    ItemEnter(ItemAction),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum HostResponse {
    RenderResultList(RenderResultList),
    DoNothing,
}

/// The two callbacks a host launcher drives a plugin with.
pub trait ExtensionHandler {
    fn on_query(&self, event: &QueryEvent) -> HostResponse;
    fn on_item_enter(&self, action: &ItemAction) -> HostResponse;

    fn handle_event(&self, event: &HostEvent) -> HostResponse {
        match event {
            HostEvent::Query(query) => self.on_query(query),
            HostEvent::ItemEnter(action) => self.on_item_enter(action),
        }
    }
}
