//! PokerLab CLI — record players, sessions and intervals; chart profit.
//!
//! Commands:
//! - `player add|list` — register and list players
//! - `session add|list|recompute` — open sessions, list them, re-derive summaries
//! - `interval add|list` — record stack observations for a session
//! - `chart` — cumulative profit vs. hours as CSV or JSON
//! - `stats` — lifetime results for a player

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pokerlab_core::domain::{NewPlayer, NewSession, PlayerId, RawInterval, SessionId};
use pokerlab_runner::{
    init_logging, trajectory_json, write_trajectory_csv, write_trajectory_csv_file,
    JsonFileStore, LedgerService, PokerLabConfig,
};

#[derive(Parser)]
#[command(
    name = "pokerlab",
    about = "PokerLab CLI — poker session ledger and profit tracker"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./pokerlab.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record store file (overrides config).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `pokerlab_runner=trace` (overrides config).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Player management.
    Player {
        #[command(subcommand)]
        action: PlayerAction,
    },
    /// Session management.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Interval recording.
    Interval {
        #[command(subcommand)]
        action: IntervalAction,
    },
    /// Cumulative profit vs. hours across a player's sessions.
    Chart {
        #[arg(long)]
        player: u64,

        /// Write CSV to this file instead of stdout.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON instead of CSV.
        #[arg(long, default_value_t = false, conflicts_with = "csv")]
        json: bool,
    },
    /// Lifetime statistics for a player.
    Stats {
        #[arg(long)]
        player: u64,
    },
}

#[derive(Subcommand)]
enum PlayerAction {
    /// Register a new player.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },
    /// List all players.
    List,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Open a new session for a player.
    Add {
        #[arg(long)]
        player: u64,

        /// Session date (YYYY-MM-DD).
        #[arg(long)]
        date: String,

        #[arg(long)]
        location: String,

        /// Game description, e.g. "NLH 1-3".
        #[arg(long)]
        game: String,

        #[arg(long)]
        memo: Option<String>,
    },
    /// List a player's sessions in date order.
    List {
        #[arg(long)]
        player: u64,
    },
    /// Re-derive a session's buy-in, cash-out and duration from its intervals.
    Recompute {
        #[arg(long)]
        session: u64,
    },
}

#[derive(Subcommand)]
enum IntervalAction {
    /// Record a stack observation (and optional buy-in/add-on).
    Add {
        #[arg(long)]
        session: u64,

        /// Timestamp: RFC 3339, or YYYY-MM-DDTHH:MM[:SS] taken as UTC.
        #[arg(long)]
        at: String,

        #[arg(long)]
        stack: f64,

        /// Chips bought at this instant. 0 for a plain observation.
        #[arg(long, default_value_t = 0.0)]
        add_on: f64,
    },
    /// List a session's intervals in time order.
    List {
        #[arg(long)]
        session: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PokerLabConfig::load(cli.config.as_deref()).context("loading config")?;
    config.apply_overrides(cli.store, cli.log_level);
    init_logging(&config.logging);

    let store = JsonFileStore::open(&config.store.path)
        .with_context(|| format!("opening store {}", config.store.path.display()))?;
    tracing::debug!(store = %config.store.path.display(), "store ready");
    let mut service = LedgerService::new(store);

    match cli.command {
        Commands::Player { action } => run_player(&mut service, action),
        Commands::Session { action } => run_session(&mut service, action),
        Commands::Interval { action } => run_interval(&mut service, action),
        Commands::Chart { player, csv, json } => {
            run_chart(&service, PlayerId(player), csv, json, config.export.decimals)
        }
        Commands::Stats { player } => run_stats(&service, PlayerId(player)),
    }
}

type Service = LedgerService<JsonFileStore>;

fn run_player(service: &mut Service, action: PlayerAction) -> Result<()> {
    match action {
        PlayerAction::Add { name, email } => {
            let player = service.register_player(NewPlayer { name, email })?;
            println!("player {} registered", player.id);
        }
        PlayerAction::List => {
            for player in service.players()? {
                println!("{:>4}  {}  <{}>", player.id.0, player.name, player.email);
            }
        }
    }
    Ok(())
}

fn run_session(service: &mut Service, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::Add {
            player,
            date,
            location,
            game,
            memo,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("invalid session date '{date}'"))?;
            let session = service.open_session(
                PlayerId(player),
                NewSession {
                    date,
                    location,
                    game_type: game,
                    memo,
                },
            )?;
            println!("session {} opened", session.id);
        }
        SessionAction::List { player } => {
            for session in service.sessions_for_player(PlayerId(player))? {
                let numbers = match session.summary {
                    Some(s) => format!(
                        "buy-in {:>9.2}  cash-out {:>9.2}  {:>6.2}h  {:>+9.2}",
                        s.buy_in,
                        s.cash_out,
                        s.duration_hours,
                        s.profit()
                    ),
                    None => "no intervals".to_string(),
                };
                println!(
                    "{:>4}  {}  {:<16} {:<10} {}",
                    session.id.0, session.date, session.location, session.game_type, numbers
                );
            }
        }
        SessionAction::Recompute { session } => {
            let session = service.recompute_session(SessionId(session))?;
            if let Some(s) = session.summary {
                println!(
                    "session {}: buy-in {:.2}, cash-out {:.2}, {:.2}h",
                    session.id, s.buy_in, s.cash_out, s.duration_hours
                );
            }
        }
    }
    Ok(())
}

fn run_interval(service: &mut Service, action: IntervalAction) -> Result<()> {
    match action {
        IntervalAction::Add {
            session,
            at,
            stack,
            add_on,
        } => {
            let outcome = service.append_interval(
                SessionId(session),
                &RawInterval::new(at, stack, add_on),
            )?;
            let s = outcome.summary;
            println!(
                "interval {} recorded; session {}: buy-in {:.2}, cash-out {:.2}, {:.2}h",
                outcome.record.id, session, s.buy_in, s.cash_out, s.duration_hours
            );
        }
        IntervalAction::List { session } => {
            for record in service.intervals_for_session(SessionId(session))? {
                let iv = &record.interval;
                println!(
                    "{:>4}  {}  stack {:>9.2}  add-on {:>9.2}",
                    record.id.0,
                    iv.timestamp.to_rfc3339(),
                    iv.stack,
                    iv.add_on_amount
                );
            }
        }
    }
    Ok(())
}

fn run_chart(
    service: &Service,
    player: PlayerId,
    csv: Option<PathBuf>,
    json: bool,
    decimals: usize,
) -> Result<()> {
    let points = service.trajectory_for_player(player)?;

    if let Some(path) = csv {
        write_trajectory_csv_file(&path, &points, decimals)
            .with_context(|| format!("writing chart CSV {}", path.display()))?;
        println!("{} points written to {}", points.len(), path.display());
    } else if json {
        println!("{}", trajectory_json(&points)?);
    } else {
        write_trajectory_csv(std::io::stdout().lock(), &points, decimals)?;
    }
    Ok(())
}

fn run_stats(service: &Service, player: PlayerId) -> Result<()> {
    let stats = service.stats_for_player(player)?;
    println!("sessions      {}", stats.session_count);
    println!("buy-ins       {:.2}", stats.total_buy_in);
    println!("cash-outs     {:.2}", stats.total_cash_out);
    println!("net profit    {:+.2}", stats.net_profit);
    println!("hours         {:.2}", stats.total_hours);
    println!("hourly        {:+.2}", stats.hourly_rate);
    println!(
        "win rate      {:.1}% ({} of {})",
        stats.win_rate * 100.0,
        stats.winning_sessions,
        stats.session_count
    );
    if let (Some(best), Some(worst)) = (stats.best_session, stats.worst_session) {
        println!("best / worst  {:+.2} / {:+.2}", best, worst);
    }
    Ok(())
}
