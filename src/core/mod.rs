//! core
//!
//! Domain types and local configuration.
//!
//! # Modules
//!
//! - [`types`] - Typed snapshots of remote entities
//! - [`config`] - Local CLI configuration file
//!
//! Everything the platform owns is remote; the types here are transient
//! response snapshots and request payloads, never an authoritative
//! local copy.

pub mod config;
pub mod types;
