use std::path::{Path, PathBuf};

use crate::action_executor::{
    launch_profile, resolve_browser_path, DetachedSpawner, LaunchCommand, LaunchError,
    ProcessSpawner,
};
use crate::config::{validate, Config, ConfigError};
use crate::contract::{
    ExtensionHandler, HostResponse, ItemAction, QueryEvent, RenderResultList, ResultItem,
};
use crate::discovery::{ChromeProfileProvider, ProfileProvider};
use crate::model::Profile;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),
}

/// Profiles are scanned and the browser resolved once, at construction; every event after
/// that reads the same snapshot.
pub struct CoreService<S = DetachedSpawner> {
    config: Config,
    profiles: Vec<Profile>,
    browser_path: PathBuf,
    spawner: S,
}

impl CoreService<DetachedSpawner> {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ConfigError::Invalid)?;
        let provider = ChromeProfileProvider::new(config.profiles_dir.clone());
        let browser_path = resolve_browser_path(config.browser_command.trim());
        Self::with_provider(config, &provider, browser_path)
    }

    pub fn with_provider(
        config: Config,
        provider: &dyn ProfileProvider,
        browser_path: PathBuf,
    ) -> Result<Self, ServiceError> {
        validate(&config).map_err(ConfigError::Invalid)?;
        let profiles = load_profiles(provider);
        Ok(Self {
            config,
            profiles,
            browser_path,
            spawner: DetachedSpawner,
        })
    }
}

impl<S: ProcessSpawner> CoreService<S> {
    pub fn with_spawner<T: ProcessSpawner>(self, spawner: T) -> CoreService<T> {
        CoreService {
            config: self.config,
            profiles: self.profiles,
            browser_path: self.browser_path,
            spawner,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn browser_path(&self) -> &Path {
        &self.browser_path
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn search(&self, query: &str) -> Vec<Profile> {
        crate::search::rank(&self.profiles, query)
    }

    pub fn render(&self, query: &str) -> RenderResultList {
        let fallback_icon = self.config.fallback_icon.as_str();
        let mut items: Vec<ResultItem> = self
            .search(query)
            .iter()
            .map(|profile| ResultItem::for_profile(profile, fallback_icon))
            .collect();

        if items.is_empty() {
            items.push(ResultItem::no_profiles(fallback_icon));
        }
        RenderResultList { items }
    }

    pub fn launch(&self, profile_folder: &Path) -> Result<LaunchCommand, ServiceError> {
        let command = launch_profile(&self.spawner, &self.browser_path, profile_folder)?;
        log::info!(
            "launched '{}' {}",
            command.program.display(),
            command.args.join(" ")
        );
        Ok(command)
    }
}

impl<S: ProcessSpawner> ExtensionHandler for CoreService<S> {
    fn on_query(&self, event: &QueryEvent) -> HostResponse {
        let query = event.argument.as_deref().unwrap_or_default();
        HostResponse::RenderResultList(self.render(query))
    }

    fn on_item_enter(&self, action: &ItemAction) -> HostResponse {
        match action {
            ItemAction::OpenProfile { profile_folder } => {
                if let Err(error) = self.launch(profile_folder) {
                    log::error!(
                        "could not open profile '{}': {error}",
                        profile_folder.display()
                    );
                }
            }
            ItemAction::DoNothing => {}
        }
        HostResponse::DoNothing
    }
}

fn load_profiles(provider: &dyn ProfileProvider) -> Vec<Profile> {
    match provider.discover() {
        Ok(profiles) => {
            log::info!(
                "provider={} discovered_profiles={}",
                provider.provider_name(),
                profiles.len()
            );
            profiles
        }
        Err(error) => {
            log::warn!("provider={} failed: {error}", provider.provider_name());
            Vec::new()
        }
    }
}
