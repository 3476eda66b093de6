use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of report columns.
pub const DEFAULT_COLUMNS: u32 = 2;
/// Default alarm character.
pub const DEFAULT_ALARM: char = '!';
/// Default systolic alarm threshold (0 disables the check).
pub const DEFAULT_THRESHOLD: u32 = 135;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Blood-pressure log report generator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bp-report",
    about = "Extract, classify and reflow blood-pressure readings from a log",
    version
)]
pub struct Settings {
    /// Input log file (reads stdin when omitted)
    pub infile: Option<PathBuf>,

    /// Number of report columns
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: u32,

    /// Character used to flag readings above the alarm threshold
    #[arg(short, long, default_value = "!")]
    pub alarm: String,

    /// Systolic pressure that triggers the alarm flag (0 disables)
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u32,

    /// Annotate each reading with its severity level and append the
    /// per-band breakdown table
    #[arg(short, long)]
    pub report: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.bp-report/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<bool>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.bp-report/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".bp-report").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return settings;
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). The input file is never loaded
        // from last-used.
        if !is_arg_explicitly_set(&matches, "columns") {
            if let Some(v) = last.columns {
                settings.columns = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "alarm") {
            if let Some(v) = last.alarm {
                settings.alarm = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "threshold") {
            if let Some(v) = last.threshold {
                settings.threshold = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "report") && !settings.report {
            if let Some(v) = last.report {
                settings.report = v;
            }
        }

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// Column count with the zero case corrected to the default.
    pub fn effective_columns(&self) -> usize {
        if self.columns == 0 {
            tracing::warn!(
                "Column count must be positive; falling back to {}",
                DEFAULT_COLUMNS
            );
            return DEFAULT_COLUMNS as usize;
        }
        self.columns as usize
    }

    /// Alarm symbol reduced to a single character.
    ///
    /// A value wrapped in a matching quote pair (an artefact of shell
    /// quoting, e.g. `-a "'*'"`) is unwrapped first. Anything still longer
    /// than one character is replaced by the default with a warning.
    pub fn alarm_char(&self) -> char {
        let raw = self.alarm.as_str();
        let unwrapped = unwrap_quotes(raw);
        let mut chars = unwrapped.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                tracing::warn!(
                    "Alarm symbol {:?} is not a single character; falling back to '{}'",
                    raw,
                    DEFAULT_ALARM
                );
                DEFAULT_ALARM
            }
        }
    }
}

/// Strip one surrounding pair of matching single or double quotes.
fn unwrap_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 3 && (bytes[0] == b'\'' || bytes[0] == b'"') && bytes[0] == bytes[bytes.len() - 1]
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            columns: Some(s.columns),
            alarm: Some(s.alarm.clone()),
            threshold: Some(s.threshold),
            report: Some(s.report),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
