//! File configuration: load defaults from disk and merge them under CLI values.
//!
//! The config file is a flat list of `key = value` lines:
//!
//! ```toml
//! parallel = 8
//! fetch_tool = "yt-dlp"
//! fetch_timeout_secs = 600
//! verbosity = "verbose"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::cli::Args;

/// File-backed defaults for CLI options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileConfig {
    /// Default worker count.
    pub(crate) parallel: Option<u16>,
    /// Default fetch tool program.
    pub(crate) fetch_tool: Option<String>,
    /// Default per-invocation timeout in seconds (0 disables).
    pub(crate) fetch_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub(crate) verbosity: Option<VerbositySetting>,
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

/// Which options were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) parallel: bool,
    pub(crate) fetch_tool: bool,
    pub(crate) timeout: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

/// Parses process arguments, remembering which values came from the command line.
pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    (args, sources_from_matches(&matches))
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        parallel: is_commandline_value(matches, "parallel"),
        fetch_tool: is_commandline_value(matches, "fetch_tool"),
        timeout: is_commandline_value(matches, "timeout"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills in options the user did not pass from the file config.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    if !cli_sources.parallel
        && let Some(parallel) = file_config.parallel
    {
        args.parallel = parallel;
    }

    if !cli_sources.fetch_tool
        && let Some(fetch_tool) = &file_config.fetch_tool
    {
        args.fetch_tool = fetch_tool.clone();
    }

    if !cli_sources.timeout
        && let Some(timeout) = file_config.fetch_timeout_secs
    {
        args.timeout = timeout;
    }

    if !cli_sources.verbose
        && !cli_sources.quiet
        && let Some(verbosity) = file_config.verbosity
    {
        match verbosity {
            VerbositySetting::Default => {
                args.verbose = 0;
                args.quiet = false;
            }
            VerbositySetting::Verbose => args.verbose = 1,
            VerbositySetting::Debug => args.verbose = 2,
            VerbositySetting::Quiet => args.quiet = true,
        }
    }

    args
}

/// Resolves the tracing filter level from verbosity flags.
pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/tiktok-archiver/config.toml`
/// 2. `$HOME/.config/tiktok-archiver/config.toml`
pub(crate) fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("tiktok-archiver")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("tiktok-archiver")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub(crate) fn load_default_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = resolve_default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_file_config(&path).map(Some)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };
        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "parallel" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `parallel` value on line {line_no}"))?;
                if !(1..=u64::from(u16::MAX)).contains(&parsed) {
                    bail!(
                        "Invalid config value for `parallel`: {parsed}. Expected range: 1..={}",
                        u16::MAX
                    );
                }
                cfg.parallel = Some(u16::try_from(parsed)?);
            }
            "fetch_tool" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `fetch_tool` value on line {line_no}"))?;
                if parsed.trim().is_empty() {
                    bail!("Invalid config value for `fetch_tool`: must not be empty");
                }
                cfg.fetch_tool = Some(parsed);
            }
            "fetch_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `fetch_timeout_secs` value on line {line_no}")
                })?;
                cfg.fetch_timeout_secs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> (Args, CliValueSources) {
        let mut argv = vec!["tiktok-archiver", "export", "out"];
        argv.extend_from_slice(extra);
        let matches = Args::command().try_get_matches_from(argv).unwrap();
        let args = Args::from_arg_matches(&matches).unwrap();
        (args, sources_from_matches(&matches))
    }

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
# defaults for my machine
parallel = 8
fetch_tool = "yt-dlp"   # newer fork
fetch_timeout_secs = 600
verbosity = "verbose"
"#,
        )
        .expect("config should parse");
        assert_eq!(
            cfg,
            FileConfig {
                parallel: Some(8),
                fetch_tool: Some("yt-dlp".to_string()),
                fetch_timeout_secs: Some(600),
                verbosity: Some(VerbositySetting::Verbose),
            }
        );
    }

    #[test]
    fn test_parse_config_rejects_zero_parallel() {
        let err = parse_config_str("parallel = 0").expect_err("invalid parallel expected");
        assert!(err.to_string().contains("parallel"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config_str("concurrency = 4").expect_err("unknown key expected");
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("fetch_tool = yt-dlp").expect_err("quoted string expected");
        assert!(err.to_string().contains("fetch_tool"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("parallel 8").expect_err("syntax error expected");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_hash_inside_string_is_kept() {
        let cfg = parse_config_str(r#"fetch_tool = "/opt/tools#2/yt-dlp""#).unwrap();
        assert_eq!(cfg.fetch_tool.as_deref(), Some("/opt/tools#2/yt-dlp"));
    }

    #[test]
    fn test_apply_config_defaults_fills_unset_values() {
        let (parsed, sources) = args(&[]);
        let cfg = FileConfig {
            parallel: Some(4),
            fetch_tool: Some("yt-dlp".to_string()),
            fetch_timeout_secs: Some(30),
            verbosity: Some(VerbositySetting::Quiet),
        };
        let merged = apply_config_defaults(parsed, &sources, Some(&cfg));
        assert_eq!(merged.parallel, 4);
        assert_eq!(merged.fetch_tool, "yt-dlp");
        assert_eq!(merged.timeout, 30);
        assert!(merged.quiet);
    }

    #[test]
    fn test_apply_config_defaults_cli_values_win() {
        let (parsed, sources) = args(&["--parallel", "2", "--fetch-tool", "youtube-dl", "-v"]);
        let cfg = FileConfig {
            parallel: Some(4),
            fetch_tool: Some("yt-dlp".to_string()),
            fetch_timeout_secs: None,
            verbosity: Some(VerbositySetting::Quiet),
        };
        let merged = apply_config_defaults(parsed, &sources, Some(&cfg));
        assert_eq!(merged.parallel, 2);
        assert_eq!(merged.fetch_tool, "youtube-dl");
        assert_eq!(merged.verbose, 1);
        assert!(!merged.quiet);
    }

    #[test]
    fn test_apply_config_defaults_without_file_is_identity() {
        let (parsed, sources) = args(&["--parallel", "3"]);
        let merged = apply_config_defaults(parsed.clone(), &sources, None);
        assert_eq!(merged.parallel, parsed.parallel);
        assert_eq!(merged.fetch_tool, parsed.fetch_tool);
    }

    #[test]
    fn test_resolve_default_log_level() {
        let (mut parsed, _) = args(&[]);
        assert_eq!(resolve_default_log_level(&parsed), "info");
        parsed.verbose = 1;
        assert_eq!(resolve_default_log_level(&parsed), "debug");
        parsed.verbose = 3;
        assert_eq!(resolve_default_log_level(&parsed), "trace");
        parsed.quiet = true;
        assert_eq!(resolve_default_log_level(&parsed), "error");
    }

    #[test]
    fn test_load_file_config_names_file_on_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "parallel = lots\n").unwrap();
        let err = load_file_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
