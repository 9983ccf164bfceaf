//! Terminal front-end for the TaskMine simulation service.
//!
//! The controller in [`console`] holds the form and run state and talks to
//! the service through [`client`]; everything it shows goes through the
//! [`console::ConsoleSurface`] port, which [`term`] implements for stdout
//! and tests implement with a recording fake.

pub mod client;
pub mod console;
pub mod form;
pub mod term;
pub mod view;
