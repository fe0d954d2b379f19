//! Route handlers for the HTTP API.

pub mod health;
pub mod items;
