use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "bl")]
#[command(about = "Browser lock - administer the stored lock record")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Lock record file (defaults to <config dir>/bl/record.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub store: Option<PathBuf>,

	/// JSON file overriding lock settings
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show lock state, saved session size and reminder status
	#[command(alias = "st")]
	Status,

	/// Set the password for the first time and print the recovery code
	Setup {
		#[arg(long)]
		password: String,
		#[arg(long)]
		confirm: String,
	},

	/// Replace the password and print a new recovery code
	ChangePassword {
		#[arg(long)]
		current: String,
		#[arg(long = "new")]
		new_password: String,
		#[arg(long)]
		confirm: String,
	},

	/// Clear the password with the recovery code
	Reset {
		#[arg(long)]
		recovery_code: String,
	},

	/// List the saved session addresses
	Session,
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Status => "status",
			Commands::Setup { .. } => "setup",
			Commands::ChangePassword { .. } => "change-password",
			Commands::Reset { .. } => "reset",
			Commands::Session => "session",
		}
	}
}
