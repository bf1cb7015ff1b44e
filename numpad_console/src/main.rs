use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use numpad_console::{interactive, run_script, KindName, PadSession, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "numpad")]
#[command(version, about = "Numeric keypad entry harness")]
struct Cli {
    /// JSON config file; flags override its fields
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Numeric kind
    #[arg(long, short = 'k', value_enum)]
    kind: Option<KindName>,

    /// Initial value
    #[arg(long, short = 'v')]
    value: Option<String>,

    /// Maximum fraction digits (ignored for int)
    #[arg(long, short = 'p')]
    precision: Option<u32>,

    /// Inclusive upper bound
    #[arg(long, short = 'u')]
    upper_bound: Option<String>,

    /// Decimal separator character
    #[arg(long)]
    separator: Option<char>,

    /// Locale tag used to pick the separator, e.g. de-DE
    #[arg(long)]
    locale: Option<String>,

    /// Key script to run instead of reading stdin
    #[arg(long)]
    keys: Option<String>,
}

impl Cli {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(value) = &self.value {
            config.value = value.clone();
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(bound) = &self.upper_bound {
            config.upper_bound = Some(bound.clone());
        }
        if let Some(separator) = self.separator {
            config.separator = Some(separator);
        }
        if let Some(locale) = &self.locale {
            config.locale = Some(locale.clone());
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.session_config()?;
    log::debug!("Session config: {:?}", config);

    if let Some(script) = &cli.keys {
        println!("{}", run_script(&config, script)?);
        return Ok(());
    }

    let mut session = PadSession::from_config(&config)?;
    let stdin = io::stdin();
    interactive::run(&mut session, stdin.lock(), io::stdout().lock())
        .context("keypad session failed")?;

    Ok(())
}
