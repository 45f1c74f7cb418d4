use std::path::PathBuf;

use anyhow::{Context, Result};

pub const APP_NAME: &str = "gopaths";

/// Variable the composed search path is installed into.
pub const TARGET_VAR: &str = "GOPATH";
/// Records the managed segment last appended to `GOPATH`.
pub const MANAGED_VAR: &str = "GOPATHS_MANAGED";
pub const CONFIG_DIR_VAR: &str = "GOPATHS_CONFIG_DIR";
pub const LOG_VAR: &str = "GOPATHS_LOG";

const DEFAULT_CONFIG_SUBDIR: &str = ".config/gopaths";
const REPOS_FILE: &str = "repos.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub config_dir: PathBuf,
}

impl Settings {
    /// Resolution order: explicit flag, `GOPATHS_CONFIG_DIR`, then `~/.config/gopaths`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_DIR_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve_with(explicit, from_env, home_dir)
    }

    fn resolve_with(
        explicit: Option<PathBuf>,
        from_env: Option<PathBuf>,
        home: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let config_dir = match explicit.or(from_env) {
            Some(dir) => dir,
            None => home()
                .context("resolving default config directory")?
                .join(DEFAULT_CONFIG_SUBDIR),
        };
        Ok(Self { config_dir })
    }

    pub fn repos_path(&self) -> PathBuf {
        self.config_dir.join(REPOS_FILE)
    }
}

fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_home() -> Result<PathBuf> {
        anyhow::bail!("no home in tests")
    }

    #[test]
    fn explicit_dir_wins_over_env() {
        let settings = Settings::resolve_with(
            Some(PathBuf::from("/flag/dir")),
            Some(PathBuf::from("/env/dir")),
            no_home,
        )
        .expect("settings");
        assert_eq!(settings.config_dir, PathBuf::from("/flag/dir"));
        assert_eq!(settings.repos_path(), PathBuf::from("/flag/dir/repos.toml"));
    }

    #[test]
    fn env_dir_used_without_flag() {
        let settings =
            Settings::resolve_with(None, Some(PathBuf::from("/env/dir")), no_home).expect("settings");
        assert_eq!(settings.config_dir, PathBuf::from("/env/dir"));
    }

    #[test]
    fn falls_back_to_home_config() {
        let settings = Settings::resolve_with(None, None, || Ok(PathBuf::from("/home/u")))
            .expect("settings");
        assert_eq!(
            settings.repos_path(),
            PathBuf::from("/home/u/.config/gopaths/repos.toml")
        );
    }

    #[test]
    fn missing_home_is_reported() {
        let err = Settings::resolve_with(None, None, no_home).expect_err("no home");
        assert!(format!("{err:#}").contains("default config directory"));
    }
}
