//! Polls participants from a roster file at random, balancing times polled.
//!
//! The roster is a flat text file, one `name,polled,correct,attempted,excused`
//! record per line. A session repeatedly selects the next participant, asks
//! for an outcome on stdin, and writes the updated roster back on quit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rollcall::core::poller::Poller;
use rollcall::io::config::{config_path_for, load_config};
use rollcall::io::roster_store::{load_roster, save_roster};
use rollcall::session::run_session;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Polls participants from a roster at random, balancing times polled"
)]
struct Cli {
    /// Roster file, one `name,polled,correct,attempted,excused` record per line.
    roster: PathBuf,

    /// Fixed shuffle seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Config file. Defaults to `rollcall.toml` next to the roster.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave the roster file untouched when the session ends.
    #[arg(long)]
    no_save: bool,
}

fn main() {
    rollcall::logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_path_for(&cli.roster));
    let cfg = load_config(&config_path)?;

    let roster = load_roster(&cli.roster)?;
    let mut poller = match cli.seed.or(cfg.seed) {
        Some(seed) => Poller::with_seed(roster, seed),
        None => Poller::new(roster),
    }
    .with_context(|| format!("load roster {}", cli.roster.display()))?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = run_session(&mut poller, stdin.lock(), stdout.lock())?;

    if cfg.autosave && !cli.no_save {
        save_roster(&cli.roster, poller.roster(), cfg.backup)?;
        info!(path = %cli.roster.display(), "roster saved");
    }

    println!("polled {} participant(s) this session", outcome.total_polled);
    Ok(())
}
