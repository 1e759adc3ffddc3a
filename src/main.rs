mod app;
mod calculator;
mod config;
mod history;
mod logging;
mod storage;
mod time_selector;
mod ui;
mod wheel;

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::app::AppState;
use crate::config::{load_settings, resolve_history_path, state_dir};
use crate::history::format_currency;
use crate::logging::init_logging;
use crate::storage::{load_history, save_history};
use crate::ui::{print_history, run_dashboard};

#[derive(Debug, Parser)]
#[command(name = "waktumain", about = "Console rental time and cost calculator")]
struct Cli {
	/// History file; defaults to the state directory
	#[arg(long)]
	history: Option<PathBuf>,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Dashboard,
	Calculate {
		#[arg(long)]
		start: String,
		#[arg(long)]
		end: String,
		#[arg(long)]
		rate: Option<String>,
		/// Print the result without recording it
		#[arg(long)]
		no_save: bool,
	},
	History {
		#[arg(long, default_value_t = 20)]
		limit: usize,
	},
	ClearHistory,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	let state_dir = state_dir();
	let settings = load_settings(&state_dir)?;
	let _log_guard = match init_logging(&state_dir, &settings.log_level) {
		Ok(guard) => Some(guard),
		Err(err) => {
			eprintln!("warning: failed to initialise logging: {err}");
			None
		}
	};

	let history_path = resolve_history_path(cli.history, &state_dir);
	let history = load_history(&history_path)?;
	info!(path = %history_path.display(), "starting");
	let mut state = AppState::new(&settings, history);

	match cli.command.unwrap_or(Command::Dashboard) {
		Command::Dashboard => {
			run_dashboard(&mut state, &settings, &history_path)?;
		}
		Command::Calculate {
			start,
			end,
			rate,
			no_save,
		} => {
			state.set_start_time(start);
			state.set_end_time(end);
			if let Some(rate) = rate {
				state.set_hourly_rate(rate);
			}

			let total = state.calculate(Utc::now())?.total;
			if let Some(result) = &state.result {
				println!("duration {} ({:.2} h)", result.duration_label(), result.duration_hours());
			}
			println!("total {}", format_currency(total, &settings.currency_symbol));

			if !no_save {
				save_history(&history_path, &state.history)?;
				println!("recorded in {}", history_path.display());
			}
		}
		Command::History { limit } => {
			print_history(&state.history, limit, &settings.currency_symbol);
		}
		Command::ClearHistory => {
			state.clear_history();
			save_history(&history_path, &state.history)?;
			println!("history cleared");
		}
	}

	Ok(())
}
