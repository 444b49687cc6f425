#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "cadence-decode", about = "Decode Cadence JSON-CDC and CCF payloads")]
struct Cli {
	/// Log filter directive written to stderr (e.g. `debug`, `cadence_decode=trace`).
	#[arg(long = "log-level", global = true, default_value = "warn")]
	log_level: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the converted native value as JSON.
	Value(cmd::InputArgs),
	/// Print the converted fields of an event payload as JSON.
	Event(cmd::InputArgs),
	/// Print the typed value tree.
	Inspect(cmd::inspect::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cadence_decode::cadence::Result<()> {
	let cli = Cli::parse();
	cmd::logging::init(&cli.log_level);

	match cli.command {
		Commands::Value(args) => cmd::value::run(args),
		Commands::Event(args) => cmd::event::run(args),
		Commands::Inspect(args) => cmd::inspect::run(args),
	}
}
