//! End-to-end resolution against real files in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use layered_rc::env::EnvSnapshot;
use layered_rc::loader::StdFileSystem;
use layered_rc::parser::{self, ParseResult};
use layered_rc::{ConfigError, ConfigObject, ParserRegistry, Platform, Resolver};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A fake user home plus a nested project directory inside it.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("home/me/.config/tool")).unwrap();
        fs::create_dir_all(root.path().join("work/project/src")).unwrap();
        Self { root }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        fs::write(&path, contents).unwrap();
        path
    }

    fn resolver(&self, env: &[(&str, &str)]) -> Resolver {
        let platform = Platform {
            is_windows: true,
            home: Some(self.path("home/me")),
            cwd: self.path("work/project/src"),
        };
        Resolver::new(platform, env.iter().copied().collect::<EnvSnapshot>(), StdFileSystem)
    }
}

fn object(value: Value) -> ConfigObject {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn commented_json_dotfile_in_project_contributes() {
    let sandbox = Sandbox::new();
    let rc = sandbox.write(
        "work/project/.toolrc",
        "{\n  // json overrides default\n  \"option\": false,\n  /* env overrides json */\n  \"envOption\": 24\n}\n",
    );

    let config = sandbox
        .resolver(&[])
        .resolve("tool", &json!({"option": true}), Some(&ConfigObject::new()))
        .unwrap()
        .config;

    assert_eq!(config["option"], json!(false));
    assert_eq!(config["envOption"], json!(24));
    assert_eq!(config["config"], json!(lossy(&rc)));
    assert_eq!(config["configs"], json!([lossy(&rc)]));
}

#[test]
fn home_and_project_layers_stack() {
    let sandbox = Sandbox::new();
    let xdg = sandbox.write(
        "home/me/.config/tool/config.json",
        r#"{"server": {"host": "home", "port": 1}}"#,
    );
    let json_rc = sandbox.write("home/me/.toolrc.json", r#"{"server": {"port": 2}, "tags": ["a"]}"#);
    let project = sandbox.write("work/.toolrc.ini", "tags[] = b\ntags[] = c\n");

    let resolution = sandbox
        .resolver(&[("TOOL_server__host", "env")])
        .resolve("tool", &json!({"server": {"tls": false}}), Some(&ConfigObject::new()))
        .unwrap();

    assert_eq!(resolution.contributions, vec![xdg, json_rc, project.clone()]);
    assert_eq!(resolution.active_file(), Some(project.as_path()));
    assert_eq!(
        resolution.config["server"],
        json!({"host": "env", "port": 2, "tls": false})
    );
    assert_eq!(resolution.config["tags"], json!(["b", "c"]));
}

#[test]
fn explicit_config_from_env_and_argv_contributes_once() {
    let sandbox = Sandbox::new();
    let explicit = sandbox.write("custom.json", r#"{"from": "explicit"}"#);
    let explicit_text = lossy(&explicit);
    let argv = object(json!({"config": explicit_text}));

    let resolution = sandbox
        .resolver(&[("tool_config", explicit_text.as_str())])
        .resolve("tool", &json!({}), Some(&argv))
        .unwrap();

    assert_eq!(resolution.contributions, vec![explicit]);
    assert_eq!(resolution.config["from"], json!("explicit"));
}

#[test]
fn explicit_config_missing_fails_before_merging() {
    let sandbox = Sandbox::new();
    sandbox.write("work/project/.toolrc", "a = 1");
    let missing = sandbox.path("nowhere/toolrc");
    let argv = object(json!({"config": lossy(&missing)}));

    let err = sandbox
        .resolver(&[])
        .resolve("tool", &json!({}), Some(&argv))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "Explicitly passed config file could not be found at: {}",
            missing.display()
        )
    );
}

#[test]
fn custom_registry_adds_candidates_and_parsers() {
    fn key_value(contents: &str) -> ParseResult {
        let map = contents
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), Value::String(v.trim().to_string())))
            .collect();
        Ok(Some(map))
    }

    let sandbox = Sandbox::new();
    let yml = sandbox.write("home/me/.toolrc.yml", "mode: fast\n");
    let registry = ParserRegistry::default().with("yml", key_value);

    let resolution = sandbox
        .resolver(&[])
        .with_registry(registry)
        .resolve("tool", &json!({"mode": "slow"}), Some(&ConfigObject::new()))
        .unwrap();

    assert_eq!(resolution.contributions, vec![yml]);
    assert_eq!(resolution.config["mode"], json!("fast"));
}

#[test]
fn explicit_file_without_registered_extension_aborts() {
    let sandbox = Sandbox::new();
    let explicit = sandbox.write("settings.yaml", "mode: fast\n");
    let argv = object(json!({"config": lossy(&explicit)}));

    let err = sandbox
        .resolver(&[])
        .resolve("tool", &json!({}), Some(&argv))
        .unwrap_err();

    assert!(matches!(err, ConfigError::UnknownParser { .. }));
    assert!(err.to_string().ends_with("Valid parsers: '', json, ini"));
}

#[test]
fn ini_and_json_encodings_resolve_identically() {
    let structure = object(json!({
        "name": "tool",
        "debug": false,
        "db": {"host": "localhost", "user": "admin"}
    }));

    let sandbox = Sandbox::new();
    sandbox.write("work/project/.toolrc", &parser::ini::encode(&structure));
    let from_ini = sandbox
        .resolver(&[])
        .resolve("tool", &json!({}), Some(&ConfigObject::new()))
        .unwrap();

    let other = Sandbox::new();
    other.write(
        "work/project/.toolrc",
        &serde_json::to_string(&structure).unwrap(),
    );
    let from_json = other
        .resolver(&[])
        .resolve("tool", &json!({}), Some(&ConfigObject::new()))
        .unwrap();

    let strip = |mut config: ConfigObject| {
        config.remove("config");
        config.remove("configs");
        config
    };
    assert_eq!(strip(from_ini.config), strip(from_json.config.clone()));
    assert_eq!(strip(from_json.config), structure);
}

#[test]
fn discovered_file_without_registered_extension_aborts() {
    let sandbox = Sandbox::new();
    sandbox.write("home/me/.config/tool/config", "[server]\nhost = home\n");

    let err = sandbox
        .resolver(&[])
        .resolve("tool", &json!({}), Some(&ConfigObject::new()))
        .unwrap_err();

    assert!(matches!(err, ConfigError::UnknownParser { .. }));
}
