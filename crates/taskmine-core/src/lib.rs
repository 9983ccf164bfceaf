// Re-export the wire types so consumers reach them via taskmine_core::wire::*
pub use taskmine_protocol as wire;

// Internal Modules
pub mod batch;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod miner;
pub mod task;
pub mod validation;

mod util;
