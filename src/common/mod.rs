//! # Common Components
//!
//! Shared data structures used by the dispatcher and by front ends.
//!
//! ## Modules
//!
//! - [`messages`]: request/response shapes exchanged with the transport layer
//! - [`config`]: configuration parsing utilities

pub mod config;
pub mod messages;
