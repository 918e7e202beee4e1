mod sheet;

use indexmap::IndexSet;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Type selector whose rules hold the project's global custom properties.
pub const ROOT_SCOPE_SELECTOR: &str = "page";

#[derive(Clone, Copy)]
enum Target {
    ClassNames,
    RootVariables,
}

/// Class-selector names visible from a stylesheet, following `@import`
/// chains. Missing or unparsable files contribute nothing.
pub fn collect_class_names(path: &Path, workspace_root: Option<&Path>) -> IndexSet<String> {
    let mut names = IndexSet::new();
    let mut visited = HashSet::new();
    collect_into(path, workspace_root, Target::ClassNames, &mut visited, &mut names);
    names
}

/// Root-scoped custom-property names visible from a stylesheet, following
/// `@import` chains.
pub fn collect_root_variables(path: &Path, workspace_root: Option<&Path>) -> IndexSet<String> {
    let mut variables = IndexSet::new();
    let mut visited = HashSet::new();
    collect_into(path, workspace_root, Target::RootVariables, &mut visited, &mut variables);
    variables
}

fn collect_into(
    path: &Path,
    workspace_root: Option<&Path>,
    target: Target,
    visited: &mut HashSet<PathBuf>,
    out: &mut IndexSet<String>,
) {
    // Import graphs are usually trees, but a cycle must not hang the editor.
    let identity = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(identity) {
        return;
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(_) => return,
    };
    let sheet = match sheet::parse(source) {
        Ok(sheet) => sheet,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unparsable stylesheet");
            return;
        }
    };

    match target {
        Target::ClassNames => out.extend(sheet.class_names()),
        Target::RootVariables => out.extend(sheet.root_variables(ROOT_SCOPE_SELECTOR)),
    }

    for import in sheet.import_paths() {
        let resolved = resolve_import(path, &import, workspace_root);
        collect_into(&resolved, workspace_root, target, visited, out);
    }
}

/// `@import` resolution: a leading `/` is workspace-root-relative, anything
/// else resolves against the importing file's directory.
fn resolve_import(owner: &Path, import: &str, workspace_root: Option<&Path>) -> PathBuf {
    if let Some(rooted) = import.strip_prefix('/') {
        match workspace_root {
            Some(root) => root.join(rooted),
            None => PathBuf::from(import),
        }
    } else {
        owner.parent().unwrap_or(Path::new(".")).join(import)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_imports_against_owner_dir() {
        let resolved = resolve_import(
            Path::new("/proj/pages/index.wxss"),
            "../shared/common.wxss",
            Some(Path::new("/proj")),
        );
        assert_eq!(resolved, PathBuf::from("/proj/pages/../shared/common.wxss"));
    }

    #[test]
    fn resolves_absolute_imports_against_workspace_root() {
        let resolved = resolve_import(
            Path::new("/proj/pages/index.wxss"),
            "/shared/common.wxss",
            Some(Path::new("/proj")),
        );
        assert_eq!(resolved, PathBuf::from("/proj/shared/common.wxss"));
    }

    #[test]
    fn missing_file_yields_empty_set() {
        assert!(collect_class_names(Path::new("/nonexistent/a.wxss"), None).is_empty());
    }
}
