use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::resolve::ResolveContext;

pub const API_TOKEN_ENV: &str = "JIRA_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Missing required config value `{0}`")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Login + API token (Jira Cloud).
    #[default]
    Basic,
    /// Personal access token (Jira Server / Data Center).
    Bearer,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SprintmeshConfig {
    /// Jira base URL, e.g. https://example.atlassian.net
    pub server: Option<String>,
    pub login: Option<String>,
    pub auth_type: Option<AuthType>,
    pub project: Option<ProjectConfig>,
    pub board: Option<BoardConfig>,
}

impl SprintmeshConfig {
    /// Field-by-field merge; values set on `self` win over `fallback`.
    pub fn or(self, fallback: SprintmeshConfig) -> SprintmeshConfig {
        let project_key = self
            .project
            .and_then(|p| p.key)
            .or(fallback.project.and_then(|p| p.key));
        let board_id = self
            .board
            .and_then(|b| b.id)
            .or(fallback.board.and_then(|b| b.id));
        SprintmeshConfig {
            server: self.server.or(fallback.server),
            login: self.login.or(fallback.login),
            auth_type: self.auth_type.or(fallback.auth_type),
            project: project_key.map(|key| ProjectConfig { key: Some(key) }),
            board: board_id.map(|id| BoardConfig { id: Some(id) }),
        }
    }
}

/// Values given on the command line; they win over every config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub server: Option<String>,
    pub project: Option<String>,
    pub board: Option<u64>,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: String,
    pub login: Option<String>,
    pub auth_type: AuthType,
    pub project_key: String,
    pub board_id: Option<u64>,
    pub api_token: Option<String>,
}

impl Settings {
    pub fn resolve_context(&self) -> ResolveContext {
        ResolveContext {
            server: self.server.clone(),
            project_key: self.project_key.clone(),
            board_ids: self.board_id.into_iter().collect(),
        }
    }
}

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".sprintmesh.toml", ".sprintmeshrc"]
}

pub fn resolve_user_home_dir() -> Option<PathBuf> {
    for var in ["HOME", "USERPROFILE"] {
        if let Ok(value) = std::env::var(var) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
    }
    None
}

pub fn resolve_sprintmesh_home_dir() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("SPRINTMESH_HOME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    resolve_user_home_dir().map(|home| home.join(".sprintmesh"))
}

pub fn global_config_path() -> Option<PathBuf> {
    resolve_sprintmesh_home_dir().map(|home| home.join("config.toml"))
}

pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for candidate in start.ancestors() {
        for name in config_filename_candidates() {
            if candidate.join(name).is_file() {
                return Some(candidate.to_path_buf());
            }
        }
    }
    None
}

pub fn load_config_file(path: &Path) -> Result<SprintmeshConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str::<SprintmeshConfig>(&text)?)
}

/// Project config in `root`, if one of the candidate files exists there.
pub fn load_config(root: &Path) -> Result<Option<SprintmeshConfig>, ConfigError> {
    for name in config_filename_candidates() {
        let path = root.join(name);
        if path.is_file() {
            return load_config_file(&path).map(Some);
        }
    }
    Ok(None)
}

pub fn load_global_config() -> Result<Option<SprintmeshConfig>, ConfigError> {
    let Some(path) = global_config_path() else {
        return Ok(None);
    };
    if !path.is_file() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Layer config sources: an explicit `--config` file replaces project
/// discovery; otherwise the nearest project config (walking up from `start`)
/// wins over the global one, field by field.
pub fn load_layered_config(
    start: &Path,
    explicit: Option<&Path>,
) -> Result<SprintmeshConfig, ConfigError> {
    let primary = match explicit {
        Some(path) => Some(load_config_file(path)?),
        None => match find_config_root(start) {
            Some(root) => load_config(&root)?,
            None => None,
        },
    };
    let global = load_global_config()?.unwrap_or_default();
    Ok(primary.unwrap_or_default().or(global))
}

pub fn resolve_settings(start: &Path, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let config = load_layered_config(start, overrides.config_path.as_deref())?;
    let server = non_empty(overrides.server.clone())
        .or(non_empty(config.server))
        .ok_or(ConfigError::Missing("server"))?;
    let project_key = non_empty(overrides.project.clone())
        .or(non_empty(config.project.and_then(|p| p.key)))
        .ok_or(ConfigError::Missing("project.key"))?;
    Ok(Settings {
        server,
        login: non_empty(config.login),
        auth_type: config.auth_type.unwrap_or_default(),
        project_key: project_key.to_uppercase(),
        board_id: overrides.board.or(config.board.and_then(|b| b.id)),
        api_token: non_empty(std::env::var(API_TOKEN_ENV).ok()),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
        let _guard = crate::test_env::lock();
        f()
    }

    struct EnvGuard {
        sprintmesh_home: Option<OsString>,
        token: Option<OsString>,
    }

    impl EnvGuard {
        fn capture() -> Self {
            Self {
                sprintmesh_home: std::env::var_os("SPRINTMESH_HOME"),
                token: std::env::var_os(API_TOKEN_ENV),
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = self.sprintmesh_home.as_ref() {
                std::env::set_var("SPRINTMESH_HOME", value);
            } else {
                std::env::remove_var("SPRINTMESH_HOME");
            }

            if let Some(value) = self.token.as_ref() {
                std::env::set_var(API_TOKEN_ENV, value);
            } else {
                std::env::remove_var(API_TOKEN_ENV);
            }
        }
    }

    #[test]
    fn parses_full_config() {
        let text = r#"
server = "https://jira.example.com"
login = "me@example.com"
auth_type = "bearer"

[project]
key = "ISSUE"

[board]
id = 12
"#;
        let config: SprintmeshConfig = toml::from_str(text).expect("config");
        assert_eq!(config.server.as_deref(), Some("https://jira.example.com"));
        assert_eq!(config.auth_type, Some(AuthType::Bearer));
        assert_eq!(config.project.and_then(|p| p.key).as_deref(), Some("ISSUE"));
        assert_eq!(config.board.and_then(|b| b.id), Some(12));
    }

    #[test]
    fn merge_prefers_primary_per_field() {
        let primary = SprintmeshConfig {
            server: Some("https://project".into()),
            project: Some(ProjectConfig { key: None }),
            ..Default::default()
        };
        let global = SprintmeshConfig {
            server: Some("https://global".into()),
            login: Some("me".into()),
            project: Some(ProjectConfig {
                key: Some("GLOB".into()),
            }),
            board: Some(BoardConfig { id: Some(3) }),
            ..Default::default()
        };
        let merged = primary.or(global);
        assert_eq!(merged.server.as_deref(), Some("https://project"));
        assert_eq!(merged.login.as_deref(), Some("me"));
        assert_eq!(merged.project.and_then(|p| p.key).as_deref(), Some("GLOB"));
        assert_eq!(merged.board.and_then(|b| b.id), Some(3));
    }

    #[test]
    fn settings_layer_project_over_global_then_overrides() {
        with_env_lock(|| {
            let _env = EnvGuard::capture();
            let repo = TempDir::new().expect("repo tempdir");
            let home = TempDir::new().expect("home tempdir");
            std::env::set_var("SPRINTMESH_HOME", home.path());
            std::env::set_var(API_TOKEN_ENV, "secret");

            // Nothing configured at all.
            let err = resolve_settings(repo.path(), &Overrides::default()).unwrap_err();
            assert!(matches!(err, ConfigError::Missing("server")));

            std::fs::write(
                home.path().join("config.toml"),
                "server = \"https://global.example.com\"\n[project]\nkey = \"glob\"\n[board]\nid = 1\n",
            )
            .expect("global config");
            let settings = resolve_settings(repo.path(), &Overrides::default()).expect("global");
            assert_eq!(settings.server, "https://global.example.com");
            assert_eq!(settings.project_key, "GLOB");
            assert_eq!(settings.board_id, Some(1));
            assert_eq!(settings.api_token.as_deref(), Some("secret"));

            // Project config found from a nested directory.
            std::fs::write(
                repo.path().join(".sprintmesh.toml"),
                "[project]\nkey = \"ISSUE\"\n",
            )
            .expect("project config");
            let nested = repo.path().join("a").join("b");
            std::fs::create_dir_all(&nested).expect("nested");
            let settings = resolve_settings(&nested, &Overrides::default()).expect("project");
            assert_eq!(settings.server, "https://global.example.com");
            assert_eq!(settings.project_key, "ISSUE");

            let overrides = Overrides {
                board: Some(9),
                project: Some("cli".into()),
                ..Default::default()
            };
            let settings = resolve_settings(&nested, &overrides).expect("overrides");
            assert_eq!(settings.project_key, "CLI");
            assert_eq!(settings.board_id, Some(9));
            assert_eq!(settings.resolve_context().board_ids, vec![9]);
        });
    }

    #[test]
    fn explicit_config_path_must_exist() {
        with_env_lock(|| {
            let _env = EnvGuard::capture();
            let home = TempDir::new().expect("home tempdir");
            std::env::set_var("SPRINTMESH_HOME", home.path());
            let overrides = Overrides {
                config_path: Some(home.path().join("missing.toml")),
                ..Default::default()
            };
            let err = resolve_settings(home.path(), &overrides).unwrap_err();
            assert!(matches!(err, ConfigError::Io(_)));
        });
    }

    #[test]
    fn invalid_toml_is_reported() {
        let temp = TempDir::new().expect("tempdir");
        std::fs::write(temp.path().join(".sprintmeshrc"), "server = [").expect("write");
        assert!(matches!(
            load_config(temp.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
