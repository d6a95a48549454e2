mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::items::CategoryArg;
use fitsim_cli::config::load_catalog;
use fitsim_cli::output::OutputFormat;
use fitsim_cli::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ship fitting what-if simulations")]
struct Cli {
    /// Override the item catalog path.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog items.
    Items {
        /// Only show items in this category.
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Damage and range of every usable charge in cargo.
    Ammo {
        /// Loadout description (JSON).
        loadout: PathBuf,
    },
    /// Speed and lock range with and without boosts, including carried propulsion.
    Speed {
        /// Loadout description (JSON).
        loadout: PathBuf,
    },
    /// Bonuses applied by linked boosters.
    Boosts {
        /// Loadout description (JSON).
        loadout: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let palette = ColorPalette::for_flags(cli.no_color);
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Command::Items { category } => {
            commands::items::handle_items(&catalog, category, cli.format, palette)
        }
        Command::Ammo { loadout } => {
            commands::ammo::handle_ammo(&catalog, &loadout, cli.format, palette)
        }
        Command::Speed { loadout } => {
            commands::speed::handle_speed(&catalog, &loadout, cli.format, palette)
        }
        Command::Boosts { loadout } => {
            commands::boosts::handle_boosts(&catalog, &loadout, cli.format, palette)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
