//! resolve
//!
//! Entity resolvers: turn partial user intent into complete
//! create/update payloads before any platform call is made.
//!
//! # Design
//!
//! Each resource family gets one resolver. A resolver may read local
//! state (a git checkout, an env file, a deployable artifact) and may
//! fall back to interactive prompting through the
//! [`crate::ui::prompts::Prompter`] capability, but it never issues the
//! final platform call itself - that stays with the command handler, so
//! resolution logic is testable without a terminal or a server.
//!
//! Local validation failures abort before any network traffic.

pub mod auth_key;
pub mod envfile;
pub mod page;
pub mod project;
