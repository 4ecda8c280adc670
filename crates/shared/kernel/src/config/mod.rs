use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the optional configuration file (`lectern.toml`, `lectern.json`, ...).
pub const DEFAULT_CONFIG_NAME: &str = "lectern";

/// Prefix of environment overrides, e.g. `LECTERN__STORAGE__DATA_DIR`.
pub const ENV_PREFIX: &str = "LECTERN";

#[lectern_derive::lectern_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file, then environment overrides.
///
/// 1. **File**: an explicit `path` must exist. Without one, `lectern.*` in the working
///    directory is used if present, so every setting can fall back to its default.
/// 2. **Environment**: variables prefixed with `LECTERN__`, nested with `__`
///    (`LECTERN__PLAYER__EMBED_BASE` maps to `player.embed_base`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source cannot be parsed,
/// or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use lectern_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn load_with_env<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_NAME), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Parses configuration from an in-memory TOML document without environment overrides.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the document is malformed or does not fit `T`.
pub fn parse_toml<T>(document: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(File::from_str(document, FileFormat::Toml))
        .build()
        .context("Failed to parse config document")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_domain::Tier;
    use lectern_domain::config::{LecternConfig, StorageBackend};
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        environment().source(Some(map))
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let cfg: LecternConfig = load_with_env(None::<&str>, env(&[])).unwrap();
        assert_eq!(cfg.release.tick_millis, 1000);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("absent.toml");
        let result: Result<LecternConfig, _> = load_with_env(Some(&missing), env(&[]));
        assert!(matches!(result, Err(ConfigError::Config { .. })));
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("lectern.toml");
        std::fs::write(
            &file,
            "[storage]\nbackend = \"memory\"\n\n[player]\nembed_base = \"https://file.test\"\n",
        )
        .unwrap();

        let cfg: LecternConfig = load_with_env(
            Some(&file),
            env(&[("LECTERN__PLAYER__EMBED_BASE", "https://env.test")]),
        )
        .unwrap();

        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.player.embed_base, "https://env.test");
    }

    #[test]
    fn toml_document_replaces_secret_table() {
        let cfg: LecternConfig =
            parse_toml("[session.secrets]\nopensesame = \"diamond\"\n").unwrap();
        assert_eq!(cfg.session.secrets.len(), 1);
        assert_eq!(cfg.session.secrets.get("opensesame"), Some(&Tier::Diamond));
    }
}
