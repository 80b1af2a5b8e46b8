use bl::protocol::RecordKey;
use bl::{RecordStore, session};

use super::CommandContext;
use crate::error::Result;
use crate::output::{SessionData, TextOutput};

/// Saved session and what an unlock would reopen from it.
pub async fn run(ctx: &CommandContext) -> Result<SessionData> {
	let record = ctx.store.get(&[RecordKey::Locked, RecordKey::SavedSession]).await?;
	let saved = record.saved_session.clone().unwrap_or_default();

	let mut restores = session::dedup_preserving_order(saved.iter().cloned());
	if restores.is_empty() {
		restores.push(ctx.config.blank_page.clone());
	}

	Ok(SessionData {
		locked: record.is_locked(),
		saved,
		restores,
	})
}

impl TextOutput for SessionData {
	fn render_text(&self) -> String {
		if self.saved.is_empty() {
			return format!("No saved session (unlock opens {})", self.restores.join(", "));
		}
		self.restores.join("\n")
	}
}
