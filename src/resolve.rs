//! Resolution: discover, load, and merge every configuration layer.
//!
//! # Priority
//!
//! Layers are merged with the following priority (highest to lowest):
//!
//! 1. **Metadata** - `configs` / `config` naming the files that contributed
//! 2. **Arguments** - the tokenized command line
//! 3. **Environment** - variables prefixed with `<name>_`
//! 4. **Files** - in discovery order, later files overriding earlier ones
//! 5. **Defaults** - the object supplied by the caller
//!
//! An explicit file named by `<name>_config` or `--config` must exist; it is
//! appended after the discovered files.

use std::iter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::args;
use crate::defaults::{CONFIG_KEY, CONFIGS_KEY, env_prefix};
use crate::env::{self, EnvSnapshot};
use crate::error::ConfigError;
use crate::loader::{self, FileSystem, StdFileSystem};
use crate::merge::merge_layers;
use crate::parser::{ConfigObject, Parsed, ParserRegistry};
use crate::paths::{self, SearchScope};

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;

/// Host facts that shape candidate discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Whether the host is Windows.
    pub is_windows: bool,
    /// User home directory, if known.
    pub home: Option<PathBuf>,
    /// Working directory for the upward dotfile search.
    pub cwd: PathBuf,
}

impl Platform {
    /// Detects the current host.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            is_windows: cfg!(windows),
            home: dirs::home_dir(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    fn scope(&self) -> SearchScope<'_> {
        SearchScope {
            is_windows: self.is_windows,
            home: self.home.as_deref(),
            cwd: &self.cwd,
        }
    }
}

/// Outcome of a resolution call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The merged configuration.
    pub config: ConfigObject,
    /// Files that contributed, in merge order.
    pub contributions: Vec<PathBuf>,
}

impl Resolution {
    /// The highest-priority contributing file, if any.
    #[must_use]
    pub fn active_file(&self) -> Option<&Path> {
        self.contributions.last().map(PathBuf::as_path)
    }

    /// Consumes the resolution, returning only the merged configuration.
    #[must_use]
    pub fn into_config(self) -> ConfigObject {
        self.config
    }
}

/// Resolves configuration against explicit host inputs.
///
/// # Examples
///
/// ```
/// use layered_rc::env::EnvSnapshot;
/// use layered_rc::loader::StdFileSystem;
/// use layered_rc::resolve::{Platform, Resolver};
/// use serde_json::{Map, json};
///
/// let platform = Platform { is_windows: true, home: None, cwd: "/nonexistent".into() };
/// let env: EnvSnapshot = [("demo_port", "8080")].into_iter().collect();
/// let resolver = Resolver::new(platform, env, StdFileSystem);
///
/// let resolution = resolver
///     .resolve("demo", &json!({"port": 80, "host": "localhost"}), Some(&Map::new()))
///     .unwrap();
/// assert_eq!(resolution.config["port"], "8080");
/// assert!(resolution.contributions.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<F = StdFileSystem> {
    registry: ParserRegistry,
    platform: Platform,
    env: EnvSnapshot,
    fs: F,
}

impl Resolver<StdFileSystem> {
    /// Creates a resolver for the running process.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(Platform::detect(), EnvSnapshot::from_process(), StdFileSystem)
    }
}

impl<F: FileSystem> Resolver<F> {
    /// Creates a resolver with the default parser registry.
    #[must_use]
    pub fn new(platform: Platform, env: EnvSnapshot, fs: F) -> Self {
        Self {
            registry: ParserRegistry::default(),
            platform,
            env,
            fs,
        }
    }

    /// Replaces the parser registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ParserRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The parser registry in use.
    #[must_use]
    pub const fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Resolves configuration for `name`.
    ///
    /// When `argv` is `None` the process arguments are tokenized with
    /// [`args::parse`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidName`] if `name` contains a NUL byte
    /// - [`ConfigError::InvalidDefaults`] if `defaults` is not an object
    /// - [`ConfigError::ExplicitConfigNotFound`] if an explicit file is missing
    /// - [`ConfigError::UnknownParser`] if a readable file has an unregistered extension
    pub fn resolve(
        &self,
        name: &str,
        defaults: &Value,
        argv: Option<&ConfigObject>,
    ) -> Result<Resolution, ConfigError> {
        validate_name(name)?;
        let Value::Object(defaults) = defaults else {
            return Err(ConfigError::invalid_defaults(defaults));
        };
        let process_argv;
        let argv = if let Some(argv) = argv {
            argv
        } else {
            process_argv = args::parse(std::env::args().skip(1));
            &process_argv
        };

        let env = env::decode(&env_prefix(name), &self.env);
        let discovered = paths::enumerate(name, &self.registry, self.platform.scope(), &self.fs);

        let mut explicit = Vec::new();
        for value in [env.get(CONFIG_KEY), argv.get(CONFIG_KEY)].into_iter().flatten() {
            let Some(path) = explicit_path(value) else {
                tracing::warn!(value = %value, "Ignoring non-path `config` value");
                continue;
            };
            if !self.fs.exists(&path) {
                return Err(ConfigError::ExplicitConfigNotFound { path });
            }
            explicit.push(path);
        }

        let candidates = paths::dedup(discovered.into_iter().chain(explicit).collect());
        tracing::debug!(name, candidates = candidates.len(), "Resolving configuration");

        let mut files = Vec::new();
        let mut contributions = Vec::new();
        for path in &candidates {
            let Some(contents) = loader::load(&self.fs, path) else {
                continue;
            };
            match self.registry.parse(&contents, path)? {
                Parsed::Config(config) => {
                    tracing::debug!(path = %path.display(), "Config file contributes");
                    files.push(config);
                    contributions.push(path.clone());
                }
                Parsed::Rejected => {
                    tracing::warn!(path = %path.display(), "Config file rejected by its parser, skipping");
                }
                Parsed::Failed(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Config file failed to parse, skipping");
                }
            }
        }

        let metadata = (!contributions.is_empty()).then(|| metadata_layer(&contributions));
        let config = merge_layers(
            iter::once(defaults)
                .chain(&files)
                .chain([&env, argv])
                .chain(metadata.as_ref()),
        );

        Ok(Resolution {
            config,
            contributions,
        })
    }
}

/// Resolves configuration for the running process.
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve(
    name: &str,
    defaults: &Value,
    argv: Option<&ConfigObject>,
    registry: Option<&ParserRegistry>,
) -> Result<ConfigObject, ConfigError> {
    let mut resolver = Resolver::from_process();
    if let Some(registry) = registry {
        resolver = resolver.with_registry(registry.clone());
    }
    resolver
        .resolve(name, defaults, argv)
        .map(Resolution::into_config)
}

/// Any string is accepted except one holding a NUL byte, which no path can carry.
fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.contains('\0') {
        return Err(ConfigError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Reads an explicit `config` value; empty strings are treated as unset.
fn explicit_path(value: &Value) -> Option<PathBuf> {
    match value {
        Value::String(path) if !path.is_empty() => Some(PathBuf::from(path)),
        Value::Number(number) => Some(PathBuf::from(number.to_string())),
        _ => None,
    }
}

/// Builds `{configs: [...], config: <last>}` from the contribution record.
fn metadata_layer(contributions: &[PathBuf]) -> ConfigObject {
    let paths: Vec<Value> = contributions
        .iter()
        .map(|path| Value::String(path.to_string_lossy().into_owned()))
        .collect();

    let mut out = Map::new();
    if let Some(last) = paths.last() {
        out.insert(CONFIG_KEY.to_string(), last.clone());
    }
    out.insert(CONFIGS_KEY.to_string(), Value::Array(paths));
    out
}
