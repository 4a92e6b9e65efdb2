//! Ensemble: control-plane core for running many services under one cluster
//! framework.
//!
//! A single scheduler process registers one framework with the cluster and
//! multiplexes any number of independently managed services over that
//! connection. This crate provides the durable registry of those services and
//! the connection lifecycle around them.
//!
//! # Architecture
//!
//! Ensemble follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, file, etc.)
//!
//! # Modules
//!
//! - [`service_registry`]: Persistent registry and recovery of hosted services
//! - [`framework`]: Capability negotiation and the cluster connection
//! - [`process_exit`]: Exit-code catalogue and termination chokepoint

pub mod framework;
pub mod process_exit;
pub mod service_registry;
