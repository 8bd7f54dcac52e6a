use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "visible-text")]
#[command(about = "Saves the visible text of web pages as plain-text documents")]
#[command(version)]
pub struct Args {
    /// Settings file (saveDirectory, isEnabled); defaults are used if it does not exist
    #[arg(long, global = true, default_value = "settings.json")]
    pub settings: PathBuf,

    /// Browser configuration file (webdriverUrl, settleDelayMs, captureTimeoutSecs)
    #[arg(long, global = true)]
    pub browser_config: Option<PathBuf>,

    /// WebDriver URL, overriding the browser configuration and WEBDRIVER_URL
    #[arg(long, global = true)]
    pub webdriver_url: Option<String>,

    /// Root directory for relative save paths
    #[arg(long, global = true, default_value = ".")]
    pub output_root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a page and save its text (honors isEnabled)
    Save {
        /// Page URL
        url: String,
    },
    /// Load a page and save its text, printing a status line
    SaveNow {
        /// Page URL
        url: String,
    },
    /// Load a page and print the extracted record as JSON
    Extract {
        /// Page URL
        url: String,
    },
    /// Load a page and store its raw snapshot as JSON
    Capture {
        /// Page URL
        url: String,

        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Extract and save the text of a stored snapshot
    SaveSnapshot {
        /// Snapshot file written by `capture`
        file: PathBuf,
    },
    /// Print a stored record JSON as a plain-text document
    Format {
        /// Record file written by `extract`
        file: PathBuf,
    },
    /// Show or change settings
    Config {
        /// New save directory (may be empty)
        #[arg(long)]
        save_dir: Option<String>,

        /// Switch auto-save on
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Switch auto-save off
        #[arg(long)]
        disable: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "visible-text",
            "save",
            "https://example.com/",
            "--webdriver-url",
            "http://localhost:9515",
        ])
        .unwrap();
        assert_eq!(args.webdriver_url.as_deref(), Some("http://localhost:9515"));
        assert_eq!(args.settings, PathBuf::from("settings.json"));
        assert!(matches!(args.command, Command::Save { url } if url == "https://example.com/"));
    }

    #[test]
    fn test_capture_requires_output() {
        assert!(Args::try_parse_from(["visible-text", "capture", "https://example.com/"]).is_err());
        let args =
            Args::try_parse_from(["visible-text", "capture", "https://example.com/", "-o", "page.json"]).unwrap();
        assert!(matches!(args.command, Command::Capture { output, .. } if output == PathBuf::from("page.json")));
    }

    #[test]
    fn test_enable_and_disable_conflict() {
        assert!(Args::try_parse_from(["visible-text", "config", "--enable", "--disable"]).is_err());
        let args = Args::try_parse_from(["visible-text", "config", "--save-dir", ""]).unwrap();
        assert!(matches!(args.command, Command::Config { save_dir: Some(dir), .. } if dir.is_empty()));
    }
}
