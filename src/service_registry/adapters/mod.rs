//! Adapter implementations for service registry ports.

pub mod memory;
