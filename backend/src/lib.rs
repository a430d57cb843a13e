//! Article service with a per-session view allowance.
//!
//! Clients log in by username, browse the article list freely and may open a
//! limited number of article detail pages per session before being refused.

pub mod config;
pub mod error;
pub mod gate;
pub mod seed;
pub mod services;
pub mod session;
pub mod store;
