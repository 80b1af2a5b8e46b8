//! Password and recovery-code management against the record store.
//!
//! These operations only touch the store, so they are usable both by the
//! coordinator and by tools that administer a record without a browser.

use bl_protocol::{RecordKey, RecordPatch};
use rand::Rng;
use tracing::info;

use crate::digest::{self, digest_secret};
use crate::error::{Error, Result};
use crate::host::RecordStore;
use crate::recovery::RecoveryCode;
use crate::state::LockState;

/// Current state of the stored record.
pub async fn state<S: RecordStore + ?Sized>(store: &S) -> Result<LockState> {
	let record = store.get(&[RecordKey::CredentialHash, RecordKey::Locked]).await?;
	Ok(LockState::of(&record))
}

/// First-time setup: stores the password digest and a fresh recovery digest.
///
/// Returns the plaintext recovery code. It is not stored anywhere and cannot
/// be retrieved again.
pub async fn configure<S, R>(store: &S, secret: &str, rng: &mut R) -> Result<RecoveryCode>
where
	S: RecordStore + ?Sized,
	R: Rng + ?Sized,
{
	if secret.is_empty() {
		return Err(Error::EmptySecret);
	}
	let code = RecoveryCode::generate(rng);

	let record = store.get(&[RecordKey::CredentialHash]).await?;
	if record.is_configured() {
		return Err(Error::AlreadyConfigured);
	}

	store
		.set(RecordPatch::new().credential_hash(digest_secret(secret)).recovery_hash(code.digest()).locked(false))
		.await?;
	info!(target = "bl.setup", "password configured");
	Ok(code)
}

/// Replaces the password after checking the current one.
///
/// A new recovery code is issued in the same write; the previous code stops
/// working.
pub async fn change_secret<S, R>(store: &S, current: &str, new_secret: &str, rng: &mut R) -> Result<RecoveryCode>
where
	S: RecordStore + ?Sized,
	R: Rng + ?Sized,
{
	let code = RecoveryCode::generate(rng);

	let record = store.get(&[RecordKey::CredentialHash]).await?;
	if !record.is_configured() {
		return Err(Error::NotConfigured);
	}
	if !digest::matches(current, record.credential_hash.as_deref()) {
		return Err(Error::SecretMismatch);
	}
	if new_secret.is_empty() {
		return Err(Error::EmptySecret);
	}

	store
		.set(RecordPatch::new().credential_hash(digest_secret(new_secret)).recovery_hash(code.digest()))
		.await?;
	info!(target = "bl.setup", "password changed; recovery code rotated");
	Ok(code)
}

/// Drops the password and recovery digests so setup must run again.
pub async fn clear<S: RecordStore + ?Sized>(store: &S) -> Result<()> {
	store.remove(&[RecordKey::CredentialHash, RecordKey::RecoveryHash]).await
}

/// Clears the credentials when `code` is the current recovery code.
///
/// Windows are left alone; this is the reset offered while unlocked. A locked
/// record is refused, since clearing it would strand the lock surface with no
/// way to verify.
pub async fn reset_with_recovery_code<S: RecordStore + ?Sized>(store: &S, code: &str) -> Result<bool> {
	let record = store.get(&[RecordKey::RecoveryHash, RecordKey::Locked]).await?;
	if record.is_locked() {
		return Err(Error::Locked);
	}
	if !digest::matches(code.trim(), record.recovery_hash.as_deref()) {
		return Ok(false);
	}
	clear(store).await?;
	info!(target = "bl.setup", "credentials cleared with recovery code");
	Ok(true)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::store::MemoryStore;

	#[tokio::test]
	async fn configure_stores_digests_only() {
		let store = MemoryStore::new();
		let mut rng = StdRng::seed_from_u64(3);
		let code = configure(&store, "hunter2", &mut rng).await.unwrap();

		let record = store.record().unwrap();
		assert_eq!(record.credential_hash.as_deref(), Some(digest_secret("hunter2").as_str()));
		assert_eq!(record.recovery_hash.as_deref(), Some(code.digest().as_str()));
		assert_eq!(record.locked, Some(false));
		let raw = serde_json::to_string(&store.snapshot()).unwrap();
		assert!(!raw.contains("hunter2"));
		assert!(!raw.contains(code.as_str()));
	}

	#[tokio::test]
	async fn configure_rejects_empty_and_repeat_setup() {
		let store = MemoryStore::new();
		let mut rng = StdRng::seed_from_u64(3);
		assert!(matches!(configure(&store, "", &mut rng).await, Err(Error::EmptySecret)));
		configure(&store, "a", &mut rng).await.unwrap();
		assert!(matches!(configure(&store, "b", &mut rng).await, Err(Error::AlreadyConfigured)));
	}

	#[tokio::test]
	async fn change_secret_rotates_recovery_code() {
		let store = MemoryStore::new();
		let mut rng = StdRng::seed_from_u64(11);
		let first = configure(&store, "old", &mut rng).await.unwrap();

		assert!(matches!(change_secret(&store, "wrong", "new", &mut rng).await, Err(Error::SecretMismatch)));
		assert!(matches!(change_secret(&store, "old", "", &mut rng).await, Err(Error::EmptySecret)));

		let second = change_secret(&store, "old", "new", &mut rng).await.unwrap();
		assert_ne!(first, second);
		let record = store.record().unwrap();
		assert!(!digest::matches(first.as_str(), record.recovery_hash.as_deref()));
		assert!(digest::matches(second.as_str(), record.recovery_hash.as_deref()));
		assert!(digest::matches("new", record.credential_hash.as_deref()));
	}

	#[tokio::test]
	async fn reset_is_single_use() {
		let store = MemoryStore::new();
		let mut rng = StdRng::seed_from_u64(5);
		let code = configure(&store, "pw", &mut rng).await.unwrap();

		assert!(!reset_with_recovery_code(&store, "000000").await.unwrap());
		assert_eq!(state(&store).await.unwrap(), LockState::Unlocked);

		assert!(reset_with_recovery_code(&store, &format!(" {code} ")).await.unwrap());
		assert_eq!(state(&store).await.unwrap(), LockState::Unconfigured);
		assert!(!reset_with_recovery_code(&store, code.as_str()).await.unwrap());
	}

	#[tokio::test]
	async fn reset_refuses_locked_record() {
		let store = MemoryStore::new();
		let mut rng = StdRng::seed_from_u64(9);
		let code = configure(&store, "pw", &mut rng).await.unwrap();
		store.set(RecordPatch::new().locked(true)).await.unwrap();

		assert!(matches!(reset_with_recovery_code(&store, code.as_str()).await, Err(Error::Locked)));
		assert_eq!(state(&store).await.unwrap(), LockState::Locked);
	}
}
