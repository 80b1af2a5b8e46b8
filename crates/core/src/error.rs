//! Error types for lock transitions.

use thiserror::Error;

/// Errors raised by the coordinator and its host bindings.
#[derive(Debug, Error)]
pub enum Error {
	/// The persistence store rejected or failed a request.
	#[error("store error: {0}")]
	Store(String),

	/// The window manager failed a request.
	#[error("window manager error: {0}")]
	WindowManager(String),

	/// A secret was empty where one is required.
	#[error("secret must not be empty")]
	EmptySecret,

	/// The supplied secret does not match the configured one.
	#[error("secret does not match the configured password")]
	SecretMismatch,

	/// An operation that needs a password ran before one was configured.
	#[error("no password is configured")]
	NotConfigured,

	/// First-time setup ran while a password already exists.
	#[error("a password is already configured; change it instead")]
	AlreadyConfigured,

	/// The operation is only allowed while unlocked.
	#[error("the browser is locked; unlock it first")]
	Locked,

	/// Stored data could not be decoded.
	#[error("invalid record: {0}")]
	InvalidRecord(#[from] serde_json::Error),

	/// Configuration could not be applied.
	#[error("invalid configuration: {0}")]
	Config(String),
}

/// Result type for lock operations.
pub type Result<T> = std::result::Result<T, Error>;
