//! Path expansion and normalization utilities.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use path_clean::PathClean;

use crate::error::{Error, Result};

/// Preset document used when nothing else is configured.
pub const DEFAULT_PRESET_PATH: &str = "varietyzbot/src/config/channels/varietyz.json";

/// Message catalog used when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "varietyzbot/src/config/channelMessages.json";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "presetlint.toml";

/// Expand a config-provided path and resolve it relative to a base directory.
pub fn expand_path(raw: &str, base_dir: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|error| Error::PathExpansion {
        path: raw.to_string(),
        source: error,
    })?;
    let expanded_path = PathBuf::from(expanded.as_ref());
    let resolved = if expanded_path.is_relative() {
        base_dir.join(expanded_path)
    } else {
        expanded_path
    };
    Ok(normalize_path(&resolved))
}

/// Normalize a path by canonicalizing when possible and cleaning otherwise.
pub fn normalize_path(path: &Path) -> PathBuf {
    match dunce::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => path.clean(),
    }
}

/// Render a path for display, using a tilde prefix for the home directory.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn resolves_relative_paths_against_base() {
        let dir = tempdir().expect("tempdir");
        let resolved = expand_path("presets/../varietyz.json", dir.path()).expect("expand");
        assert!(resolved.ends_with("varietyz.json"));
        assert!(!resolved.to_string_lossy().contains(".."));
    }

    #[test]
    fn keeps_absolute_paths() {
        let dir = tempdir().expect("tempdir");
        let absolute = dir.path().join("a.json");
        let raw = absolute.to_string_lossy().into_owned();
        let resolved = expand_path(&raw, Path::new("/elsewhere")).expect("expand");
        assert_eq!(resolved, normalize_path(&absolute));
    }

    #[test]
    fn rejects_unknown_variables() {
        let error = expand_path("$PRESETLINT_SURELY_UNSET_VAR/a.json", Path::new("."))
            .expect_err("expansion should fail");
        assert!(matches!(error, Error::PathExpansion { .. }));
    }
}
