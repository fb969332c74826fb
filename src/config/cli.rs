use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::format::Locale;
use crate::domain::model::ToastKind;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dashkit")]
#[command(about = "Talk to the dashboard API and format values the way the dashboard shows them")]
pub struct CliConfig {
    /// TOML file with [api] and [format] sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL that relative request paths resolve against
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Minutes east of UTC used when rendering dates
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// GET a URL and print the JSON body
    Get { url: String },
    /// POST a JSON body to a URL and print the JSON response
    Post {
        url: String,
        #[arg(long, default_value = "{}")]
        data: String,
    },
    /// DELETE a URL and print the JSON body
    Delete { url: String },
    /// Show dashboard statistics
    Stats,
    /// Check server health
    Health,
    /// Print a number with thousands separators
    FormatNumber {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print a date in the configured locale
    FormatDate { value: String },
    /// Bind widgets for a page described by an element manifest
    Widgets { manifest: PathBuf },
    /// Queue a notification and print it
    Toast {
        message: String,
        #[arg(long, default_value = "success")]
        kind: ToastKind,
    },
}

impl CliConfig {
    /// Loads the config file, if any, and applies command-line overrides on top.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_toml(&file);
        if let Some(base_url) = &self.base_url {
            settings.base_url = Some(base_url.clone());
        }
        if let Some(locale) = self.locale {
            settings.format.locale = locale;
        }
        if let Some(offset) = self.utc_offset_minutes {
            settings.format.utc_offset_minutes = offset;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_subcommands() {
        let cli = CliConfig::parse_from(["dashkit", "post", "/api/generate", "--data", "{\"a\":1}"]);
        match cli.command {
            Command::Post { url, data } => {
                assert_eq!(url, "/api/generate");
                assert_eq!(data, "{\"a\":1}");
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = CliConfig::parse_from(["dashkit", "toast", "Saved", "--kind", "warning"]);
        assert!(matches!(
            cli.command,
            Command::Toast { kind: ToastKind::Warning, .. }
        ));
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://file.local\"\n[format]\nlocale = \"en-US\"\nutc_offset_minutes = 0"
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = CliConfig::parse_from([
            "dashkit",
            "--config",
            path.as_str(),
            "--locale",
            "ko-KR",
            "--utc-offset-minutes",
            "-60",
            "stats",
        ]);

        let settings = cli.settings().unwrap();
        assert_eq!(settings.base_url.as_deref(), Some("http://file.local"));
        assert_eq!(settings.format.locale, Locale::KoKr);
        assert_eq!(settings.format.utc_offset_minutes, -60);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from(["dashkit", "--config", "/nonexistent/dashkit.toml", "health"]);
        assert!(cli.settings().is_err());
    }
}
