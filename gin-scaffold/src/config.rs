//! Configuration management for gin-scaffold
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `GIN_SCAFFOLD_` prefix)
//! 2. `./gin-scaffold.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # gin-scaffold.toml
//! templates_dir = "/opt/gin-scaffold/templates"
//! workspace_var = "GOPATH"
//! route_marker = "// ROUTES"
//! router_file = "routes.go"
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "gin-scaffold.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GIN_SCAFFOLD_";

/// Complete gin-scaffold configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Templates root override
    pub templates_dir: Option<PathBuf>,

    /// Environment variable listing workspace roots (path-list syntax)
    pub workspace_var: String,

    /// Marker line prefix route registrations are inserted after
    pub route_marker: String,

    /// File receiving route registrations, relative to the project root
    pub router_file: Option<PathBuf>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            workspace_var: "GOPATH".to_string(),
            route_marker: "// ROUTES".to_string(),
            router_file: None,
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration from defaults, `./gin-scaffold.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self> {
        Self::figment(Path::new(CONFIG_FILE)).extract().map_err(Box::new).map_err(Into::into)
    }

    /// Provider chain used by [`Self::load`], with an explicit config file
    #[must_use]
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Resolve the templates root
    ///
    /// Order: configured `templates_dir`, a `templates/` directory next to the
    /// executable or the build workspace, then the user config directory.
    #[must_use]
    pub fn templates_root(&self) -> PathBuf {
        if let Some(dir) = &self.templates_dir {
            return dir.clone();
        }

        if let Some(dir) = Self::find_installed_templates() {
            return dir;
        }

        Self::user_templates_dir()
    }

    /// `templates/` beside the installed binary or in the source workspace
    fn find_installed_templates() -> Option<PathBuf> {
        let exe_dirs = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .into_iter()
            .flat_map(|dir| {
                // bin/ → install prefix, target/<profile>/ → workspace root
                let up_one = dir.parent().map(Path::to_path_buf);
                let up_two = dir.parent().and_then(Path::parent).map(Path::to_path_buf);
                [Some(dir), up_one, up_two]
            })
            .flatten();

        let manifest_root = Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .map(Path::to_path_buf);

        exe_dirs
            .chain(manifest_root)
            .map(|dir| dir.join("templates"))
            .find(|dir| dir.is_dir())
    }

    /// `$XDG_CONFIG_HOME/gin-scaffold/templates`
    #[must_use]
    pub fn user_templates_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("gin-scaffold")
            .join("templates")
    }

    /// Package root of `cwd` inside the workspace named by `workspace_var`
    ///
    /// Empty when `cwd` lies outside every workspace `src/` directory.
    #[must_use]
    pub fn package_root(&self, cwd: &Path) -> String {
        let workspaces = std::env::var_os(&self.workspace_var).unwrap_or_default();
        package_root(cwd, std::env::split_paths(&workspaces))
    }
}

/// Path of `cwd` relative to the last workspace whose `src/` contains it
///
/// Matching ignores case; the returned path keeps the case of `cwd` and uses
/// forward slashes.
///
/// # Examples
///
/// ```
/// # use gin_scaffold::config::package_root;
/// # use std::path::{Path, PathBuf};
/// let roots = vec![PathBuf::from("/home/me/go")];
/// assert_eq!(
///     package_root(Path::new("/home/me/go/src/github.com/acme"), roots),
///     "github.com/acme"
/// );
/// ```
pub fn package_root(cwd: &Path, workspaces: impl IntoIterator<Item = PathBuf>) -> String {
    let cwd = to_slash(cwd);
    let cwd_lower = cwd.to_lowercase();

    workspaces
        .into_iter()
        .filter(|workspace| !workspace.as_os_str().is_empty())
        .filter_map(|workspace| {
            let src = format!("{}/src/", to_slash(&workspace).trim_end_matches('/'));
            cwd_lower
                .starts_with(&src.to_lowercase())
                .then(|| cwd.get(src.len()..).unwrap_or_default().to_string())
        })
        .last()
        .unwrap_or_default()
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
