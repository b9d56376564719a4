use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use roomdigest_core::{
    DigestConfig, DigestError, FixedOffsetClock, LocalClock, NotificationPayload, TimeFormatter,
    digest_view_to_raw_json,
};

const STDIN_SOURCE: &str = "<stdin>";

#[derive(Debug, Parser)]
#[command(
    name = "roomdigest",
    version,
    about = "Render a room's unread messages as a notification digest"
)]
struct Cli {
    /// Notification payload JSON file; `-` or omitted reads stdin
    payload: Option<PathBuf>,

    /// Locale for the footer and subject phrases (en, fr; fr-CA falls back to fr)
    #[arg(long)]
    locale: Option<String>,

    /// Footer phrase with {room_title} and {link} placeholders
    #[arg(long)]
    footer: Option<String>,

    /// strftime pattern for message times
    #[arg(long)]
    time_format: Option<String>,

    /// Render times at a fixed offset like +01:00 instead of the host zone
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Config file to use instead of $ROOMDIGEST_CONFIG or the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output the rendered fragments as JSON instead of the digest text
    #[arg(long)]
    raw: bool,

    /// Print a notification subject line before the digest
    #[arg(long)]
    subject: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> roomdigest_core::Result<()> {
    let mut config = match &cli.config {
        Some(path) => DigestConfig::load(path)?,
        None => DigestConfig::from_env_or_home()?,
    };
    apply_overrides(&mut config, &cli);
    debug!("effective config: {config:?}");

    let (source, raw) = read_payload(cli.payload.as_deref())?;
    let mut payload = NotificationPayload::from_json_str(&raw, &source)?;
    config.links().fill_payload_link(&mut payload)?;

    match config.utc_offset.as_deref() {
        Some(offset) => emit(&config, FixedOffsetClock::parse(offset)?, &payload, &cli),
        None => emit(&config, LocalClock, &payload, &cli),
    }
}

// --footer beats --locale, and either beats the config file.
fn apply_overrides(config: &mut DigestConfig, cli: &Cli) {
    if let Some(locale) = &cli.locale {
        config.locale = Some(locale.clone());
        config.footer_pattern = None;
    }
    if let Some(footer) = &cli.footer {
        config.footer_pattern = Some(footer.clone());
    }
    if let Some(time_format) = &cli.time_format {
        config.time_pattern = Some(time_format.clone());
    }
    if let Some(offset) = &cli.utc_offset {
        config.utc_offset = Some(offset.clone());
    }
}

fn read_payload(path: Option<&Path>) -> roomdigest_core::Result<(PathBuf, String)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let raw = std::fs::read_to_string(path).map_err(|source| DigestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok((path.to_path_buf(), raw))
        }
        _ => {
            let raw = io::read_to_string(io::stdin()).map_err(|source| DigestError::Io {
                path: PathBuf::from(STDIN_SOURCE),
                source,
            })?;
            Ok((PathBuf::from(STDIN_SOURCE), raw))
        }
    }
}

fn emit<F: TimeFormatter>(
    config: &DigestConfig,
    clock: F,
    payload: &NotificationPayload,
    cli: &Cli,
) -> roomdigest_core::Result<()> {
    let composer = config.build_composer(clock)?;

    if cli.raw {
        let view = composer.view(payload)?;
        print!("{}", digest_view_to_raw_json(&view)?);
        return Ok(());
    }

    let digest = composer.compose(payload)?;
    if cli.subject
        && let Some(subject) = composer.subject(payload)?
    {
        println!("{subject}\n");
    }
    println!("{digest}");

    Ok(())
}
