//! Shared types for the Festa event platform
//!
//! Request/response DTOs exchanged between event-server and its clients.

pub mod client;

pub use serde::{Deserialize, Serialize};
