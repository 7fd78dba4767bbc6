//! Catalog directory path resolution.

use std::path::PathBuf;

/// Environment variable naming the default catalog directory.
pub const CATALOG_ENV_VAR: &str = "FORMSHARE_CATALOG_DIR";

/// Get the catalog directory configured through the environment, if any.
///
/// Explicit paths (such as a `--catalog` flag) take precedence over this.
pub fn catalog_root_from_env() -> Option<PathBuf> {
    std::env::var_os(CATALOG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Resolve the catalog directory: the explicit path if given, else the
/// environment variable.
pub fn resolve_catalog_root(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(catalog_root_from_env)
}
