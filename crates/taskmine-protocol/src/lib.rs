//! Wire types shared by the taskmine server and console.
//!
//! Everything here is plain serde data: the simulation configuration as the
//! form submits it, and the simulation result as the engine reports it.
//! Neither side owns any behavior beyond (de)serialization and the
//! deferred-parse rules for the renewable-energy alpha token.

pub mod config;
pub mod result;

pub use config::{AlphaParam, RunOverrides, SimulationConfig};
pub use result::{MetricsHistory, MinerReport, SimulationResult, Summary};
