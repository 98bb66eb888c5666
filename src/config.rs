use std::fmt::{self, Debug, Formatter};
use std::fs::{self, DirBuilder, File, OpenOptions, Permissions};
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use indoc::indoc;
use log::{debug, warn};
use validator::Validate;

use crate::core::{EmptyResult, Error, ErrorKind, GenericResult};

const USERNAME_KEY: &str = "gh_username";
const API_KEY_KEY: &str = "gh_apikey";
const PROJECTS_DIR_KEY: &str = "projects_dir";

const TEMPLATE: &str = indoc!("
    gh_apikey    = github api key
    gh_username  = github username
    projects_dir = /absolute/path/to/dir
");

#[derive(Clone, Default, PartialEq, Validate)]
pub struct Config {
    #[validate(length(min = 1, message = "gh_username"))]
    pub username: String,

    #[validate(length(min = 1, message = "gh_apikey"))]
    pub api_key: String,

    #[validate(length(min = 1, message = "projects_dir"))]
    pub projects_dir: String,
}

impl Config {
    pub fn load(path: &Path) -> GenericResult<Config> {
        debug!("Loading configuration from {path:?}...");

        let file = File::open(path).map_err(|e| Error::new(
            ErrorKind::Config, format!("Failed to open config file {path:?}: {e}")))?;

        Config::parse(BufReader::new(file))
    }

    pub fn parse<R: BufRead>(reader: R) -> GenericResult<Config> {
        let mut config = Config::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| Error::new(
                ErrorKind::Config, format!("Failed to read config file: {e}")))?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('=');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => (key.trim(), value.trim()),
                _ => return Err!(Config,
                    "Invalid config line {line_number}: expected a single `key = value` pair"),
            };

            match key {
                USERNAME_KEY => config.username = value.to_owned(),
                API_KEY_KEY => config.api_key = value.to_owned(),
                PROJECTS_DIR_KEY => config.projects_dir = value.to_owned(),
                _ => warn!("Unknown config field: {key}."),
            }
        }

        config.check()?;
        Ok(config)
    }

    pub fn projects_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.projects_dir).to_string())
    }

    fn check(&self) -> EmptyResult {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let mut missing: Vec<String> = errors.field_errors().values()
            .flat_map(|&errors| errors)
            .filter_map(|error| error.message.as_ref().map(ToString::to_string))
            .collect();
        missing.sort();

        Err!(Config, "Config is missing required fields: {}", missing.join(", "))
    }
}

impl Debug for Config {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.debug_struct("Config")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("projects_dir", &self.projects_dir)
            .finish()
    }
}

pub fn default_path() -> GenericResult<PathBuf> {
    let config_dir = match dirs::config_dir() {
        Some(path) => path,
        None => return Err!(Config, "Failed to get user config dir"),
    };
    Ok(config_dir.join(env!("CARGO_PKG_NAME")).join("config"))
}

pub fn generate(path: &Path) -> EmptyResult {
    if let Some(parent) = path.parent() {
        DirBuilder::new().recursive(true).mode(0o700).create(parent).map_err(|e| Error::new(
            ErrorKind::Filesystem, format!("Failed to create config folder {parent:?}: {e}")))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).mode(0o644).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err!(Config, "{path:?} already exists. Remove it first to generate a new one");
        },
        Err(err) => return Err!(Filesystem, "Failed to create {path:?}: {err}"),
    };

    file.write_all(TEMPLATE.as_bytes())
        .and_then(|_| fs::set_permissions(path, Permissions::from_mode(0o644)))
        .map_err(|e| Error::new(ErrorKind::Filesystem, format!("Failed to write {path:?}: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, Once};

    use assert_matches::assert_matches;
    use indoc::indoc;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use rstest::rstest;

    use super::*;

    #[rstest(data,
        case(indoc!("
            gh_username = octocat
            gh_apikey = secret
            projects_dir = /tmp/projs
        ")),
        case(indoc!("
            projects_dir=/tmp/projs
            gh_apikey=secret
            gh_username=octocat
        ")),
        case(indoc!("
            # Generated by create-project

              gh_apikey    =   secret
            gh_username\t= octocat\t
            projects_dir = /tmp/projs
        ")),
    )]
    fn parsing(data: &str) {
        let config = Config::parse(data.as_bytes()).unwrap();
        assert_eq!(config.username, "octocat");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.projects_dir, "/tmp/projs");
    }

    struct WarningCollector(Mutex<Vec<String>>);

    impl Log for WarningCollector {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                self.0.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static WARNINGS: WarningCollector = WarningCollector(Mutex::new(Vec::new()));

    fn collect_warnings() -> &'static WarningCollector {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&WARNINGS).unwrap();
            log::set_max_level(LevelFilter::Warn);
        });
        &WARNINGS
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let warnings = collect_warnings();

        let config = Config::parse(indoc!("
            gh_username = octocat
            gh_apikey = secret
            editor = vim
            projects_dir = /tmp/projs
        ").as_bytes()).unwrap();

        assert_eq!(config.projects_path(), PathBuf::from("/tmp/projs"));
        assert!(
            warnings.0.lock().unwrap().iter().any(|warning| warning == "Unknown config field: editor."),
            "{:?}", warnings.0.lock().unwrap(),
        );
    }

    #[rstest(data, missing,
        case("", "gh_apikey, gh_username, projects_dir"),
        case("gh_username = octocat\ngh_apikey = secret\n", "projects_dir"),
        case("gh_username = octocat\ngh_apikey =\nprojects_dir = /tmp\n", "gh_apikey"),
    )]
    fn missing_fields(data: &str, missing: &str) {
        let error = Config::parse(data.as_bytes()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Config);
        assert_eq!(error.message, format!("Config is missing required fields: {missing}"));
    }

    #[rstest(data, line,
        case("gh_username octocat\n", 1),
        case("gh_username = octocat\n\ngh_apikey = a=b\n", 3),
    )]
    fn malformed_lines(data: &str, line: usize) {
        let error = Config::parse(data.as_bytes()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Config);
        assert!(error.message.starts_with(&format!("Invalid config line {line}:")), "{}", error.message);
    }

    #[test]
    fn missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let error = Config::load(&temp_dir.path().join("config")).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Config);
    }

    #[test]
    fn api_key_is_not_printed() {
        let config = Config {
            username: "octocat".to_owned(),
            api_key: "secret".to_owned(),
            projects_dir: "/tmp/projs".to_owned(),
        };
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn generation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_dir = temp_dir.path().join("nested").join(env!("CARGO_PKG_NAME"));
        let path = config_dir.join("config");

        generate(&path).unwrap();

        assert_eq!(fs::metadata(&config_dir).unwrap().permissions().mode() & 0o777, 0o700);
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o644);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.username, "github username");
        assert_eq!(config.api_key, "github api key");
        assert_eq!(config.projects_dir, "/absolute/path/to/dir");

        assert_matches!(generate(&path), Err(Error {kind: ErrorKind::Config, ..}));
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }
}
