use bl::protocol::RecordKey;
use bl::{LockState, RecordStore};
use colored::Colorize;

use super::CommandContext;
use crate::error::Result;
use crate::output::{StatusData, TextOutput};

pub async fn run(ctx: &CommandContext, now_ms: u64) -> Result<StatusData> {
	let record = ctx.store.get(&RecordKey::ALL).await?;
	let state = LockState::of(&record);
	let reminder_due = state == LockState::Unconfigured && record.next_reminder_at.is_none_or(|at| now_ms > at);

	Ok(StatusData {
		state,
		saved_tabs: record.saved_session.as_ref().map_or(0, Vec::len),
		has_window_bounds: record.window_bounds.is_some(),
		next_reminder_at: record.next_reminder_at,
		reminder_due,
		store: ctx.store.path().to_path_buf(),
	})
}

impl TextOutput for StatusData {
	fn render_text(&self) -> String {
		let state = match self.state {
			LockState::Locked => "locked".red().bold(),
			LockState::Unlocked => "unlocked".green().bold(),
			LockState::Unconfigured => "unconfigured".yellow().bold(),
		};
		let mut out = format!("State: {state}\nSaved tabs: {}\nStore: {}", self.saved_tabs, self.store.display());
		if self.state == LockState::Unconfigured {
			let reminder = if self.reminder_due { "due" } else { "scheduled" };
			out.push_str(&format!("\nSetup reminder: {reminder}"));
		}
		out
	}
}
