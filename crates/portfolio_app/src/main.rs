mod platform;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use portfolio_core::prefs::{Accent, CursorVariant, PrefsMsg, Theme};
use portfolio_core::ContactForm;

use platform::config::AppConfig;
use platform::logging::LogDestination;

/// Send a message through the portfolio contact relay.
#[derive(Parser)]
#[command(name = "portfolio-contact", version)]
struct Cli {
    /// Path to the RON configuration file (defaults to ./portfolio.ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the contact form once
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Keep running until the status banner auto-dismisses
        #[arg(long)]
        linger: bool,
    },
    /// Show or change the persisted UI preferences
    Prefs {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long, conflicts_with = "theme")]
        toggle_theme: bool,
        #[arg(long)]
        cursor: Option<CursorVariant>,
        #[arg(long)]
        accent: Option<Accent>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log);

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Send {
            name,
            email,
            subject,
            message,
            linger,
        } => platform::send(&config, ContactForm::new(name, email, subject, message), linger).await,
        Commands::Prefs {
            theme,
            toggle_theme,
            cursor,
            accent,
        } => {
            let mut messages = Vec::new();
            messages.extend(theme.map(PrefsMsg::SetTheme));
            if toggle_theme {
                messages.push(PrefsMsg::ToggleTheme);
            }
            messages.extend(cursor.map(PrefsMsg::SetCursor));
            messages.extend(accent.map(PrefsMsg::SetAccent));
            platform::prefs(&config, platform::PrefsRequest { messages })
        }
    }
}
