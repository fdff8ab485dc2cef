//! OIPulse CLI — headless snapshot and watch-loop commands.
//!
//! Commands:
//! - `snapshot` — one fetch/analyze cycle, printed as text or JSON
//! - `watch` — repeated cycles on interval boundaries, journaled to CSV

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use oipulse_core::chain::{ChainProvider, FixtureProvider, NseProvider};
use oipulse_core::config::Config;
use oipulse_runner::{run_cycle, schedule, CycleReport, JournalEntry, SessionState, SignalJournal};

#[derive(Parser)]
#[command(
    name = "oipulse",
    about = "OIPulse CLI — NIFTY option-chain sentiment signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one fetch/analyze cycle and print the signal.
    Snapshot {
        /// Index symbol on the NSE option-chain endpoint.
        #[arg(long)]
        symbol: Option<String>,

        /// Read the chain from a JSON fixture instead of the live endpoint.
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the full cycle report as pretty JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run cycles on interval boundaries and journal every signal.
    Watch {
        /// Index symbol on the NSE option-chain endpoint.
        #[arg(long)]
        symbol: Option<String>,

        /// Read the chain from a JSON fixture instead of the live endpoint.
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minutes between refreshes. Overrides the config value.
        #[arg(long)]
        interval: Option<u32>,

        /// Directory for the per-day CSV journal.
        #[arg(long, default_value = "signals")]
        log_dir: PathBuf,

        /// Stop after this many successful cycles (0 = run until
        /// interrupted). Failed cycles retry at the next boundary and do
        /// not count.
        #[arg(long, default_value_t = 0)]
        cycles: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            symbol,
            fixture,
            config,
            json,
        } => run_snapshot(symbol, fixture, config, json),
        Commands::Watch {
            symbol,
            fixture,
            config,
            interval,
            log_dir,
            cycles,
        } => run_watch(symbol, fixture, config, interval, log_dir, cycles),
    }
}

fn load_config(path: Option<PathBuf>, symbol: Option<String>) -> Result<Config> {
    let mut cfg = match path {
        Some(p) => Config::load(&p).with_context(|| format!("loading {}", p.display()))?,
        None => Config::default(),
    };
    if let Some(sym) = symbol {
        cfg.fetch.symbol = sym;
    }
    Ok(cfg)
}

fn build_provider(cfg: &Config, fixture: Option<PathBuf>) -> Box<dyn ChainProvider> {
    match fixture {
        Some(path) => Box::new(FixtureProvider::new(path)),
        None => Box::new(NseProvider::new(cfg.fetch.clone(), cfg.signal.strike_step)),
    }
}

fn run_snapshot(
    symbol: Option<String>,
    fixture: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let cfg = load_config(config, symbol)?;
    let provider = build_provider(&cfg, fixture);
    let mut state = SessionState::new();

    let report = run_cycle(provider.as_ref(), &cfg.signal, &mut state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_watch(
    symbol: Option<String>,
    fixture: Option<PathBuf>,
    config: Option<PathBuf>,
    interval: Option<u32>,
    log_dir: PathBuf,
    cycles: u32,
) -> Result<()> {
    let cfg = load_config(config, symbol)?;
    let interval_mins = interval.unwrap_or(cfg.refresh_interval_mins);
    let provider = build_provider(&cfg, fixture);
    let journal = SignalJournal::new(&log_dir);
    let mut state = SessionState::new();

    println!(
        "Watching {} every {interval_mins}m via {} — journal in {}",
        cfg.fetch.symbol,
        provider.name(),
        log_dir.display()
    );

    let mut completed: u32 = 0;
    loop {
        if run_watch_cycle(provider.as_ref(), &cfg, &journal, &mut state) {
            completed += 1;
        }
        if cycles != 0 && completed >= cycles {
            break;
        }

        let now = chrono::Local::now().naive_local();
        let next = schedule::next_aligned(now, interval_mins);
        let wait = schedule::seconds_until(next, now);
        println!("Next cycle at {} ({wait}s)", next.format("%H:%M:%S"));
        thread::sleep(Duration::from_secs(wait as u64));
    }

    Ok(())
}

/// One watch iteration: cycle, print, journal append. Returns whether the
/// cycle succeeded — failures don't count toward `--cycles`.
fn run_watch_cycle(
    provider: &dyn ChainProvider,
    cfg: &Config,
    journal: &SignalJournal,
    state: &mut SessionState,
) -> bool {
    match run_cycle(provider, &cfg.signal, state) {
        Ok(report) => {
            print_report(&report);
            let entry = JournalEntry::from_report(&report);
            match journal.append(&entry) {
                Ok(path) => println!("Journaled to {}", path.display()),
                Err(e) => eprintln!("WARNING: journal append failed: {e}"),
            }
            true
        }
        // A failed cycle skips the journal and leaves the retained OI map
        // alone; the next boundary retries from clean state.
        Err(e) => {
            eprintln!("Cycle failed: {e}");
            false
        }
    }
}

fn print_report(report: &CycleReport) {
    let signal = &report.signal;

    println!();
    println!("=== {} @ {} ===", report.provider, report.fetched_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Spot:        {:.2}", signal.spot);
    println!("PCR:         {:.2}", signal.pcr);
    println!(
        "Signal:      {}  (confidence {}/5)",
        signal.signal.label(),
        signal.confidence_level()
    );
    if let Some(strike) = signal.suggested_strike {
        println!("ATM strike:  {strike}");
    }
    println!("Reasons:");
    for reason in &signal.reasons {
        println!("  - {reason}");
    }
    println!("OI shift:");
    for line in report.shift.lines() {
        println!("  - {line}");
    }
    if signal.signal.is_strong_buy() {
        if report.exit.exit_flag {
            println!("EXIT conditions met:");
            for reason in &report.exit.reasons {
                println!("  ! {reason}");
            }
        } else {
            println!("Exit monitor: holding, no triggers.");
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    use oipulse_core::domain::{ChainSnapshot, StrikeRow};

    fn write_fixture(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let snapshot = ChainSnapshot::new(
            24_500.0,
            vec![StrikeRow {
                strike: 24_500,
                ce_oi: 40_000,
                ce_oi_change: 0,
                ce_iv: 15.0,
                pe_oi: 40_000,
                pe_oi_change: 0,
                pe_iv: 15.0,
            }],
        );
        let path = dir.path().join("chain.json");
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();
        path
    }

    #[test]
    fn successful_watch_cycle_counts_and_journals() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = write_fixture(&dir);
        let cfg = Config::default();
        let journal = SignalJournal::new(dir.path().join("signals"));
        let mut state = SessionState::new();

        let provider = FixtureProvider::new(fixture);
        assert!(run_watch_cycle(&provider, &cfg, &journal, &mut state));
        let today = chrono::Local::now().date_naive();
        assert!(journal.file_for(today).exists());
    }

    #[test]
    fn failed_watch_cycle_does_not_count_or_journal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::default();
        let journal = SignalJournal::new(dir.path().join("signals"));
        let mut state = SessionState::new();

        let provider = FixtureProvider::new("/nonexistent/chain.json");
        assert!(!run_watch_cycle(&provider, &cfg, &journal, &mut state));
        assert!(!journal.dir().exists());
        assert!(state.last_oi.is_none());
    }
}
