//! Single-flight guard for password verification.

use std::cell::Cell;

/// A busy flag owned by the coordinator.
///
/// Acquiring returns a guard that clears the flag when dropped, so every
/// outcome of the guarded work releases it. A holder can also give the flag
/// a deadline after which it counts as released even if the guard is still
/// alive.
#[derive(Debug, Default)]
pub(crate) struct BusyFlag {
	/// `None` when free, `Some(u64::MAX)` while held without a deadline.
	held_until: Cell<Option<u64>>,
	/// Bumped on every acquire so a lapsed guard cannot release its successor.
	generation: Cell<u64>,
}

impl BusyFlag {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Takes the flag unless another holder is active at `now_ms`.
	pub(crate) fn try_acquire(&self, now_ms: u64) -> Option<BusyGuard<'_>> {
		if self.is_held(now_ms) {
			return None;
		}
		let generation = self.generation.get().wrapping_add(1);
		self.generation.set(generation);
		self.held_until.set(Some(u64::MAX));
		Some(BusyGuard { flag: self, generation })
	}

	pub(crate) fn is_held(&self, now_ms: u64) -> bool {
		self.held_until.get().is_some_and(|until| now_ms < until)
	}
}

/// Holds a [`BusyFlag`] until dropped.
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
	flag: &'a BusyFlag,
	generation: u64,
}

impl BusyGuard<'_> {
	/// Lets the flag lapse at `deadline_ms` even if this guard is never dropped.
	pub(crate) fn expire_at(&self, deadline_ms: u64) {
		if self.is_current() {
			self.flag.held_until.set(Some(deadline_ms));
		}
	}

	fn is_current(&self) -> bool {
		self.flag.generation.get() == self.generation
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		if self.is_current() {
			self.flag.held_until.set(None);
		}
	}
}
