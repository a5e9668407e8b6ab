//! Infrastructure - adapters behind the port traits.

pub mod content;
pub mod memory;
pub mod ports;
