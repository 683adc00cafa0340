//! Well-known names and locations.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// System-wide configuration root on Unix-like platforms.
pub const ETC: &str = "/etc";

/// Local system configuration root on Unix-like platforms.
pub const LOCAL_ETC: &str = "/usr/local/etc";

/// Suffix appended to the application name for dotfiles (`.<name>rc`).
pub const RC_SUFFIX: &str = "rc";

/// File name used inside per-application configuration directories.
pub const CONFIG_FILE_STEM: &str = "config";

/// Separator between an application name and its environment keys.
pub const ENV_SEPARATOR: &str = "_";

/// Delimiter for nested keys in environment variable names.
pub const ENV_DELIMITER: &str = "__";

/// Key naming an explicit config file, in both environment and arguments.
pub const CONFIG_KEY: &str = "config";

/// Metadata key listing every contributing file in merge order.
pub const CONFIGS_KEY: &str = "configs";

/// Registry token for extension-less, conventionally named files.
pub const AMBIGUOUS: &str = "";

/// Builds the environment prefix for an application (`<name>_`).
#[must_use]
pub fn env_prefix(name: &str) -> String {
    format!("{name}{ENV_SEPARATOR}")
}
