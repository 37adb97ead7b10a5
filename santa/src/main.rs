//! Auto-send Secret Santa letters.
//!
//! Reads the exchange from `santa.toml`, draws a single gift-giving cycle that
//! respects the forbidden pairs, records every letter, and prints or mails
//! them.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use santa::error::SantaError;
use santa::exchange::{Delivery, run_exchange, send_test_letter};
use santa::io::config::{SantaConfig, load_config};
use santa::io::mailer::SmtpMailer;
use santa::logging;

#[derive(Parser)]
#[command(name = "santa", version, about = "Auto-send Secret Santa letters!")]
struct Cli {
    /// Exchange configuration file.
    #[arg(short, long, default_value = "santa.toml")]
    config: PathBuf,

    /// Actually send email (and not dump to output).
    #[arg(long)]
    official: bool,

    /// Send a test email to check configuration.
    #[arg(long)]
    test_email: bool,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Uh oh, something failed: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), SantaError> {
    let config = load_config(&cli.config).map_err(SantaError::Config)?;
    if cli.test_email {
        return cmd_test_email(&config);
    }
    cmd_exchange(&config, cli.official)
}

fn cmd_exchange(config: &SantaConfig, official: bool) -> Result<(), SantaError> {
    let mailer = if official {
        Some(smtp_mailer(config)?)
    } else {
        None
    };
    let delivery = match &mailer {
        Some(mailer) => Delivery::Live(mailer),
        None => Delivery::DryRun,
    };

    let stdout = io::stdout();
    let summary = run_exchange(
        config,
        delivery,
        &mut rand::thread_rng(),
        &mut stdout.lock(),
    )?;

    println!("\nFinished!\n");
    println!("Mail record saved to: {}", summary.record_path.display());
    Ok(())
}

fn cmd_test_email(config: &SantaConfig) -> Result<(), SantaError> {
    config.smtp.require_user().map_err(SantaError::Config)?;
    let mailer = smtp_mailer(config)?;
    send_test_letter(config, &mailer)?;
    println!("Test letter sent to {}", config.smtp.user);
    Ok(())
}

fn smtp_mailer(config: &SantaConfig) -> Result<SmtpMailer, SantaError> {
    SmtpMailer::from_config(&config.smtp, config.sender()).map_err(SantaError::Config)
}
