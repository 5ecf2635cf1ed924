//! Request admission simulator.
//!
//! Requests arrive in random batches, wait in a [`nexus_pqueue::PriorityQueue`]
//! ordered by [`ByPriority`], and are served one per step. Every arrival and
//! departure is written to a line-oriented [`EventLog`].

pub mod config;
pub mod event_log;
pub mod request;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use event_log::{read_log, EventLog, LogEntry, ParseEntryError, ReadLogError};
pub use request::{ByPriority, Request, Served};
pub use sim::{SimError, Simulation, Summary};
