// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meditrack command-line client
//!
//! Headless front end over the meditation gateway: saves sessions, shows
//! goals and progress, and falls back to cached values when offline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use meditrack_client::{
    config::Config,
    models::{sound::SOUND_CATALOG, GoalSettings, NewSession},
    services::{GoalView, ProgressView},
    time_utils::{format_clock, format_utc_rfc3339, local_today},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const OFFLINE_MESSAGE: &str = "Cannot reach the meditation server. Check your connection.";

#[derive(Parser)]
#[command(name = "meditrack", version, about = "Meditation tracking client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the server is reachable
    Status,
    /// Register this device and print the user id
    Register,
    /// Record a finished session
    Save {
        /// Session length in seconds
        #[arg(long)]
        duration: u32,
        /// Focus rating, 1-5
        #[arg(long)]
        focus: Option<u8>,
        /// Ambient sound label (defaults to the selected sound)
        #[arg(long)]
        sound: Option<String>,
    },
    /// Show or change the daily goal
    Goal {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },
    /// Show streaks and today's minutes
    Progress,
    /// Show the last seven days
    Week,
    /// List ambient sounds, optionally selecting one
    Sounds {
        #[arg(long)]
        select: Option<usize>,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    /// Store a new goal
    Set {
        #[arg(long)]
        daily_minutes: u32,
        #[arg(long)]
        days_per_week: u8,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.base_url, "Starting meditrack client");

    let state = AppState::init(config).context("Failed to initialize client")?;

    match cli.command {
        Command::Status => {
            if state.session_client.check_connectivity().await {
                println!("Server reachable at {}", state.config.base_url);
            } else {
                println!("{}", OFFLINE_MESSAGE);
            }
        }
        Command::Register => {
            let user_id = state.session_client.resolve_identity().await?;
            println!("Registered as user {}", user_id);
        }
        Command::Save {
            duration,
            focus,
            sound,
        } => save(&state, duration, focus, sound).await,
        Command::Goal { action: None } => show_goal(&state).await,
        Command::Goal {
            action:
                Some(GoalAction::Set {
                    daily_minutes,
                    days_per_week,
                }),
        } => {
            if !state.session_client.check_connectivity().await {
                println!("{}", OFFLINE_MESSAGE);
                return Ok(());
            }
            state
                .goals
                .update(GoalSettings {
                    daily_minutes,
                    days_per_week,
                })
                .await?;
            println!(
                "Goal saved: {} min/day, {} days/week",
                daily_minutes, days_per_week
            );
        }
        Command::Progress => show_progress(&state).await,
        Command::Week => show_week(&state).await?,
        Command::Sounds { select } => {
            if let Some(index) = select {
                if !state.cache.select_sound(index) {
                    anyhow::bail!("No sound with index {}", index);
                }
            }
            let selected = state.cache.selected_sound();
            for (index, sound) in SOUND_CATALOG.iter().enumerate() {
                let marker = if sound == selected { "*" } else { " " };
                println!("{} {} {}", marker, index, sound.name);
            }
        }
    }

    Ok(())
}

/// Saving is best-effort: a failure is reported but never fails the command.
async fn save(state: &AppState, duration: u32, focus: Option<u8>, sound: Option<String>) {
    let mut session = NewSession::new(duration);
    session.focus_rating = focus;
    session.sound_used = sound.or_else(|| {
        state
            .cache
            .selected_sound()
            .label()
            .map(str::to_string)
    });

    if !state.session_client.check_connectivity().await {
        println!("{}", OFFLINE_MESSAGE);
        println!("Session of {} not saved", format_clock(duration));
        return;
    }

    if state.session_client.save_session(session).await {
        println!("Session of {} saved", format_clock(duration));
    } else {
        println!("Session of {} not saved", format_clock(duration));
    }
}

async fn show_goal(state: &AppState) {
    if !state.session_client.check_connectivity().await {
        println!("{}", OFFLINE_MESSAGE);
        print_cached_goal(state.goals.cached_daily_minutes());
        return;
    }

    match state.goals.load().await {
        GoalView::Live(goal) => println!(
            "Goal: {} min/day, {} days/week (updated {})",
            goal.daily_minutes,
            goal.days_per_week,
            format_utc_rfc3339(goal.updated_at)
        ),
        GoalView::Cached { daily_minutes, .. } => print_cached_goal(Some(daily_minutes)),
        GoalView::Unavailable(e) => println!("Goal unavailable: {}", e),
    }
}

fn print_cached_goal(daily_minutes: Option<u32>) {
    match daily_minutes {
        Some(minutes) => println!("Goal (cached): {} min/day", minutes),
        None => println!("Goal unavailable"),
    }
}

async fn show_progress(state: &AppState) {
    let today = local_today();

    if !state.session_client.check_connectivity().await {
        println!("{}", OFFLINE_MESSAGE);
        print_cached_progress(
            state.progress.cached_today_minutes(today),
            state.goals.cached_daily_minutes(),
        );
        return;
    }

    match state.progress.load(today).await {
        ProgressView::Live(report) => {
            println!(
                "Today: {} / {} min",
                report.minutes_on(today),
                report.daily_goal_seconds / 60
            );
            println!(
                "Streak: {} days (longest {})",
                report.current_streak, report.longest_streak
            );
        }
        ProgressView::Cached {
            today_minutes,
            daily_goal_minutes,
            ..
        } => print_cached_progress(today_minutes, daily_goal_minutes),
    }
}

fn print_cached_progress(today_minutes: Option<u32>, daily_goal_minutes: Option<u32>) {
    let today = today_minutes.unwrap_or(0);
    match daily_goal_minutes {
        Some(goal) => println!("Today (cached): {} / {} min", today, goal),
        None => println!("Today (cached): {} min", today),
    }
}

async fn show_week(state: &AppState) -> anyhow::Result<()> {
    if !state.session_client.check_connectivity().await {
        println!("{}", OFFLINE_MESSAGE);
        return Ok(());
    }

    let summary = state.progress.weekly_summary(local_today()).await?;
    println!("Week {} to {}", summary.start, summary.end);
    println!("Sessions: {}", summary.total_sessions);
    println!("Minutes: {}", summary.total_minutes);
    match summary.average_focus {
        Some(avg) => println!("Average focus: {:.1}", avg),
        None => println!("Average focus: -"),
    }
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(
            "meditrack_client=debug"
                .parse()
                .expect("static directive is valid"),
        )
        .add_directive("info".parse().expect("static directive is valid"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
