//! Vendor clients for emotion-analysis services.
//!
//! This crate provides:
//! - The [`Vendor`] capability trait and its closed dispatch
//! - HTTP clients for the Behavioral Signals and Hume AI job APIs
//! - A completion poller with timeout and progress observation
//! - An availability monitor for flaky services
//!
//! Clients submit, query, and fetch; they never retry. Retry policy lives
//! in the orchestrator (`affect-pipeline`) and covers the whole sequence.

pub mod behavioral_signals;
pub mod config;
pub mod error;
pub mod hume;
mod media;
pub mod monitor;
pub mod poll;
pub mod types;
pub mod vendor;

pub use behavioral_signals::BehavioralSignalsClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use hume::HumeClient;
pub use monitor::{Monitor, MonitorConfig};
pub use poll::{poll_until_terminal, PollConfig, PollObserver, TerminalStatus};
pub use vendor::{client_for, StatusReport, Vendor};
