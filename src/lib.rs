//! ccd - Operator CLI for the Canary deployment platform
//!
//! ccd administers the platform's remote resources - authentication
//! keys, projects, per-project environments and variables, static
//! pages, and redirects - and triggers and observes deployments. Every
//! resource lives on the platform; the CLI holds no local copy and
//! every read is a fresh round trip.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`resolve`] - Entity resolvers (partial user input to complete payloads)
//! - [`api`] - Platform client: five verbs over a versioned REST surface
//! - [`core`] - Domain types and local configuration
//! - [`ui`] - Output formatting and interactive prompts
//!
//! # Error Flow
//!
//! No layer terminates the process. Typed errors (API, prompt,
//! validation) travel up through handlers as results; `main` maps them
//! to messages and a non-zero exit code in one place. A command that
//! issues several calls applies them strictly in order and stops at
//! the first fatal error - there is no retry, rollback, or
//! compensation.

pub mod api;
pub mod cli;
pub mod core;
pub mod resolve;
pub mod ui;
