//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Build state → Bind → Serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger → stop accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
