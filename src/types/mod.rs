//! Wire types for the agents API.

pub mod agent;
pub mod file;
pub mod run;
pub mod step;
pub mod thread;

pub use agent::*;
pub use file::*;
pub use run::*;
pub use step::*;
pub use thread::*;
