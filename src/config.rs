use std::env;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::error::ConfigError;

pub const DUMP_ENV: &str = "JDLINK_DUMP";
pub const DEFAULT_DUMP_FILE: &str = "javadoc_dump.txt";

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub archives: Vec<PathBuf>,
    pub dump: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub fail_on_missing: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::build(cli, env::var_os(DUMP_ENV).map(PathBuf::from))
    }

    fn build(cli: &Cli, dump_from_env: Option<PathBuf>) -> Result<Self, ConfigError> {
        if cli.archives.is_empty() {
            return Err(ConfigError::NoArchives);
        }

        let dump = resolve_dump_path(cli.dump.as_deref(), dump_from_env);
        if !dump.is_file() {
            return Err(ConfigError::DumpNotFound { path: dump });
        }

        Ok(Self {
            archives: cli.archives.clone(),
            dump,
            format: cli.format,
            output: cli.output.clone(),
            fail_on_missing: cli.fail_on_missing,
        })
    }
}

/// `--dump`, then `$JDLINK_DUMP`, then `./javadoc_dump.txt`.
pub fn resolve_dump_path(flag: Option<&Path>, from_env: Option<PathBuf>) -> PathBuf {
    if let Some(p) = flag {
        return p.to_path_buf();
    }
    if let Some(p) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return p;
    }
    PathBuf::from(DEFAULT_DUMP_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn temp_file(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "jdlink_check_config_{}_{}_{}",
            std::process::id(),
            nanos,
            name
        ));
        std::fs::write(&path, "a.b.C=p=1\n").unwrap();
        path
    }

    #[test]
    fn dump_path_precedence() {
        let flag = PathBuf::from("/tmp/flag.txt");
        let env = PathBuf::from("/tmp/env.txt");
        assert_eq!(resolve_dump_path(Some(flag.as_path()), Some(env.clone())), flag);
        assert_eq!(resolve_dump_path(None, Some(env.clone())), env);
        assert_eq!(resolve_dump_path(None, Some(PathBuf::new())), PathBuf::from(DEFAULT_DUMP_FILE));
        assert_eq!(resolve_dump_path(None, None), PathBuf::from(DEFAULT_DUMP_FILE));
    }

    #[test]
    fn no_archives_is_a_config_error() {
        let cli = Cli::parse_from(["jdlink-check"]);
        assert!(matches!(Config::build(&cli, None), Err(ConfigError::NoArchives)));
    }

    #[test]
    fn missing_dump_is_a_config_error() {
        let cli = Cli::parse_from(["jdlink-check", "--dump", "/nonexistent/dump.txt", "a.jar"]);
        let err = Config::build(&cli, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DumpNotFound { ref path } if path == Path::new("/nonexistent/dump.txt")
        ));
    }

    #[test]
    fn builds_from_cli() {
        let dump = temp_file("dump.txt");
        let cli = Cli::parse_from([
            "jdlink-check",
            "--format",
            "json",
            "--fail-on-missing",
            "a-sources.jar",
            "b-sources.jar",
        ]);
        let config = Config::build(&cli, Some(dump.clone())).unwrap();
        assert_eq!(config.dump, dump);
        assert_eq!(
            config.archives,
            vec![PathBuf::from("a-sources.jar"), PathBuf::from("b-sources.jar")]
        );
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.fail_on_missing);
        let _ = std::fs::remove_file(dump);
    }
}
