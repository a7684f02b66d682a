use std::path::PathBuf;

const COMPOSE_FILE: &str = "docker-compose.yml";
const CONFIG_DIR: &str = "config";
const SERVICES_FILE: &str = "services.yaml";
const SETTINGS_FILE: &str = "settings.yaml";
const WIDGETS_FILE: &str = "widgets.yaml";
const BOOKMARKS_FILE: &str = "bookmarks.yaml";

/// Where every generated file lives, relative to one output root.
///
/// ```text
/// <root>/docker-compose.yml
/// <root>/config/services.yaml
/// <root>/config/settings.yaml
/// <root>/config/widgets.yaml
/// <root>/config/bookmarks.yaml
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn compose_file(&self) -> PathBuf {
        self.root.join(COMPOSE_FILE)
    }

    /// Directory mounted into the dashboard container.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn services_file(&self) -> PathBuf {
        self.config_dir().join(SERVICES_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir().join(SETTINGS_FILE)
    }

    /// Files the dashboard expects to exist but that are never templated.
    pub fn placeholder_files(&self) -> [PathBuf; 2] {
        let config_dir = self.config_dir();
        [config_dir.join(WIDGETS_FILE), config_dir.join(BOOKMARKS_FILE)]
    }
}
