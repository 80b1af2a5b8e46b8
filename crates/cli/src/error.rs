use std::path::PathBuf;

use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Lock(#[from] bl::Error),

	#[error("io error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("password and confirmation do not match")]
	ConfirmationMismatch,

	#[error("recovery code rejected")]
	RecoveryRejected,

	#[error("no configuration directory; pass --store")]
	NoStorePath,
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Lock(bl::Error::SecretMismatch) | CliError::RecoveryRejected => ErrorCode::AuthFailed,
			CliError::Lock(bl::Error::NotConfigured) => ErrorCode::NotConfigured,
			CliError::Lock(bl::Error::AlreadyConfigured) => ErrorCode::AlreadyConfigured,
			CliError::Lock(bl::Error::Locked) => ErrorCode::Locked,
			CliError::Lock(bl::Error::EmptySecret) | CliError::ConfirmationMismatch => ErrorCode::InvalidInput,
			CliError::Lock(bl::Error::Config(_)) | CliError::NoStorePath => ErrorCode::ConfigError,
			CliError::Lock(bl::Error::Store(_) | bl::Error::InvalidRecord(_)) => ErrorCode::StoreError,
			CliError::Io { .. } => ErrorCode::IoError,
			CliError::Lock(_) => ErrorCode::InternalError,
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;
