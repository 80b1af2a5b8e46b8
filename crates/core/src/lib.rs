//! Browser lock coordinator.
//!
//! Gates a browser behind a password: on lock the open tabs are captured and
//! every window is replaced by a lock surface; on unlock the captured session
//! is reopened in a single window. The coordinator talks to the browser only
//! through the [`WindowManager`], [`RecordStore`] and [`Clock`] traits, so the
//! same state machine runs inside the extension's service worker and against
//! in-memory fakes in tests.
//!
//! # Example
//!
//! ```ignore
//! let coordinator = LockCoordinator::new(windows, store, clock, LockConfig::default());
//! let code = coordinator.configure("correct horse").await?;
//! coordinator.engage_lock(LockTrigger::Manual).await?;
//! assert!(coordinator.verify_secret("correct horse").await);
//! ```

mod busy;
pub mod config;
pub mod coordinator;
pub mod credentials;
pub mod digest;
pub mod error;
pub mod host;
pub mod recovery;
pub mod session;
pub mod state;
pub mod store;

pub use bl_protocol as protocol;
pub use config::{LockConfig, SurfaceSize};
pub use coordinator::LockCoordinator;
pub use error::{Error, Result};
pub use host::{Clock, RecordStore, WindowManager};
pub use recovery::RecoveryCode;
pub use state::{LockOutcome, LockState, LockTrigger};
pub use store::MemoryStore;
