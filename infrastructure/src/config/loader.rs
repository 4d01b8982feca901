//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "llm-arena";
const PROJECT_FILES: [&str; 2] = ["arena.toml", ".arena.toml"];
const ENV_PREFIX: &str = "ARENA_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ARENA_*` environment variables (`ARENA_DEBATE__ROUNDS=2`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./arena.toml` or `./.arena.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/llm-arena/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let files: Vec<PathBuf> = Self::global_config_path()
            .into_iter()
            .chain(Self::project_config_path())
            .filter(|p| p.exists())
            .collect();

        let mut figment = Self::file_figment(&files);
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults with `files` merged on top, later files winning
    fn file_figment(files: &[PathBuf]) -> Figment {
        files.iter().fold(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
    }

    /// Merge only the given files over the defaults (no environment)
    pub fn load_files(files: &[PathBuf]) -> Result<FileConfig, ConfigError> {
        Self::file_figment(files)
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/llm-arena/config.toml if set,
    /// otherwise falls back to ~/.config/llm-arena/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Describe the config sources in priority order (for `llm-arena config`)
    pub fn describe_sources(config_path: Option<&PathBuf>) -> Vec<String> {
        let mut lines = vec![format!("[     ] Env:     {}* (split on __)", ENV_PREFIX)];

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "  !  " };
            lines.push(format!("[{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("[FOUND] Project: {}", path.display())),
            None => lines.push("[     ] Project: ./arena.toml or ./.arena.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("[{}] Global:  {}", mark, path.display()));
        }

        lines.push("[     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::Participant;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.debate.rounds, 3);
        assert_eq!(config.judges.panel.len(), 3);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("llm-arena"));
    }

    #[test]
    fn test_later_files_win_and_defaults_fill_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("arena.toml");
        fs::write(
            &global,
            "[debate]\nrounds = 5\nmoderator = \"gemini\"\n\n[providers.openai]\nmodel = \"gpt-5-mini\"\n",
        )
        .unwrap();
        fs::write(&project, "[debate]\nrounds = 2\n").unwrap();

        let config = ConfigLoader::load_files(&[global, project]).unwrap();
        assert_eq!(config.debate.rounds, 2);
        assert_eq!(config.debate.moderator, "gemini");
        assert!(config.debate.interventions);
        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-5-mini"));
        assert_eq!(config.providers.get(Participant::Gemini).model, None);
    }

    #[test]
    fn test_invalid_file_is_extract_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[debate]\nrounds = \"three\"\n").unwrap();

        let err = ConfigLoader::load_files(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
    }

    #[test]
    fn test_project_config_lookup() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::project_config_in(dir.path()).is_none());

        fs::write(dir.path().join(".arena.toml"), "").unwrap();
        let found = ConfigLoader::project_config_in(dir.path()).unwrap();
        assert!(found.ends_with(".arena.toml"));

        fs::write(dir.path().join("arena.toml"), "").unwrap();
        let found = ConfigLoader::project_config_in(dir.path()).unwrap();
        assert!(found.ends_with("arena.toml"));
        assert!(!found.ends_with(".arena.toml"));
    }
}
