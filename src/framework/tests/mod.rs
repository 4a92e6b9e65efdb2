//! Unit tests for the framework module.
//!
//! Tests cover configuration validation, capability negotiation, driver
//! status classification, settings loading, and the runner sequence.
