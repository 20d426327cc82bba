// SPDX-License-Identifier: MIT

//! Workout-Export CLI
//!
//! Fetches the nested workout → sets → reps hierarchy for a user from
//! Firestore, then prints it, writes it to a JSON file, or renders a
//! per-set signal chart.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_export::{
    config::Config,
    db::FirestoreDb,
    services::{chart, export, WorkoutService},
};

#[derive(Parser)]
#[command(name = "workout-export", about = "Fetch workout data from Firestore")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a workout and print it as JSON, or write it to a file
    Fetch {
        /// User document ID
        user_id: String,
        /// Workout document ID
        workout_id: String,
        /// Write the JSON here instead of printing to stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render a per-set line chart of one signal over time
    Chart {
        /// User document ID
        user_id: String,
        /// Workout document ID
        workout_id: String,
        /// Name of the numeric signal array stored on each set
        #[arg(long, default_value = "velocityZ")]
        signal: String,
        /// Output SVG path
        #[arg(long, default_value = "chart.svg")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let db = FirestoreDb::new(&config).await?;
    let service = WorkoutService::new(db);

    match cli.command {
        Command::Fetch {
            user_id,
            workout_id,
            out,
        } => {
            let Some(workout) = service.fetch(&user_id, &workout_id).await? else {
                // Already logged at error level by the fetcher.
                std::process::exit(1);
            };

            match out {
                Some(path) => export::write_json(&workout, &path)?,
                None => println!("{}", serde_json::to_string_pretty(&workout)?),
            }
        }
        Command::Chart {
            user_id,
            workout_id,
            signal,
            out,
        } => {
            let Some(workout) = service.fetch(&user_id, &workout_id).await? else {
                std::process::exit(1);
            };

            chart::render_signal_chart(&workout, &signal, &out)?;
        }
    }

    Ok(())
}

fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_export=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
