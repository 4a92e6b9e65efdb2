//! Step definitions for framework negotiation BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
