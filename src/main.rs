use clap::Parser;
use std::process::ExitCode;
use visible_text::config::{BrowserConfig, Settings};
use visible_text::messages::SaveResponse;
use visible_text::panel::SettingsPanel;
use visible_text::results::ExtractionRecord;
use visible_text::triggers::save_status;
use visible_text::{Result, ScrapeError, Session, format_record};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one command; `Ok(false)` means the command ran but reported a failure
async fn run(args: Args) -> Result<bool> {
    match &args.command {
        Command::Config {
            save_dir,
            enable,
            disable,
        } => configure(&args, save_dir.as_deref(), *enable, *disable),
        Command::Format { file } => {
            let contents = tokio::fs::read_to_string(file)
                .await
                .map_err(|e| ScrapeError::Config(format!("{}: {}", file.display(), e)))?;
            let record: ExtractionRecord = serde_json::from_str(&contents)?;
            print!("{}", format_record(&record));
            Ok(true)
        }
        Command::Save { url } => Ok(report(session(&args)?.save(url).await?)),
        Command::SaveNow { url } => {
            let status = session(&args)?.save_now(url).await;
            println!("{}", status);
            Ok(status.starts_with("Text content saved successfully"))
        }
        Command::Extract { url } => {
            let record = session(&args)?.extract(url).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(true)
        }
        Command::Capture { url, output } => {
            session(&args)?.capture(url, output).await?;
            println!("Snapshot saved to {}", output.display());
            Ok(true)
        }
        Command::SaveSnapshot { file } => Ok(report(session(&args)?.save_snapshot(file).await?)),
    }
}

/// Build a session from the settings and browser configuration files plus flags
fn session(args: &Args) -> Result<Session> {
    let settings = Settings::load_or_default(&args.settings)?;
    let browser = match &args.browser_config {
        Some(path) => BrowserConfig::from_file(path)?,
        None => BrowserConfig::default(),
    }
    .with_env_overrides();

    let mut session = Session::new()
        .with_settings(settings)
        .with_browser_config(browser)
        .with_output_root(&args.output_root);
    if let Some(webdriver_url) = &args.webdriver_url {
        session = session.with_webdriver_url(webdriver_url);
    }
    Ok(session)
}

fn report(response: SaveResponse) -> bool {
    let status = save_status(&response);
    if response.success {
        println!("{}", status);
    } else {
        eprintln!("{}", status);
    }
    response.success
}

fn configure(args: &Args, save_dir: Option<&str>, enable: bool, disable: bool) -> Result<bool> {
    let mut panel = SettingsPanel::open(&args.settings)?;

    if let Some(directory) = save_dir {
        println!("{}", panel.set_save_directory(directory)?);
    }
    if enable || disable {
        println!("{}", panel.set_enabled(enable)?);
    }

    println!("{}", panel.summary());
    Ok(true)
}
