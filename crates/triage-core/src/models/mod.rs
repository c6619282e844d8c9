//! Domain models for the triage engine.

mod assessment;
mod disease;

pub use assessment::*;
pub use disease::*;
