use crate::style;
use crate::util::GLOBAL_STYLESHEET;
use indexmap::IndexSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Project configuration file read from the workspace root.
pub const PROJECT_CONFIG_FILE: &str = "project.config.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Optional subroot holding the app's sources (and `app.wxss`).
    #[serde(rename = "miniprogramRoot")]
    pub miniprogram_root: Option<String>,
}

/// Read the project configuration. A missing or malformed file is treated
/// as "no configuration", never as an error.
pub fn read_config(workspace_root: &Path) -> Option<ProjectConfig> {
    let config_path = workspace_root.join(PROJECT_CONFIG_FILE);
    let raw = fs::read_to_string(&config_path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %config_path.display(), error = %err, "ignoring malformed project config");
            None
        }
    }
}

/// Path of the project's global stylesheet: `<root>/[subroot/]app.wxss`.
/// Existence is the caller's concern.
pub fn global_stylesheet_path(workspace_root: &Path) -> Option<PathBuf> {
    let config = read_config(workspace_root)?;
    Some(match config.miniprogram_root {
        Some(subroot) => workspace_root.join(subroot).join(GLOBAL_STYLESHEET),
        None => workspace_root.join(GLOBAL_STYLESHEET),
    })
}

/// Class names declared by the global stylesheet and its imports.
pub fn collect_global_class_names(workspace_root: Option<&Path>) -> IndexSet<String> {
    match existing_global_stylesheet(workspace_root) {
        Some(path) => style::collect_class_names(&path, workspace_root),
        None => IndexSet::new(),
    }
}

/// Root-scoped custom properties declared by the global stylesheet and its
/// imports.
pub fn collect_global_variables(workspace_root: Option<&Path>) -> IndexSet<String> {
    match existing_global_stylesheet(workspace_root) {
        Some(path) => style::collect_root_variables(&path, workspace_root),
        None => IndexSet::new(),
    }
}

fn existing_global_stylesheet(workspace_root: Option<&Path>) -> Option<PathBuf> {
    let root = workspace_root?;
    let path = global_stylesheet_path(root)?;
    path.exists().then_some(path)
}
