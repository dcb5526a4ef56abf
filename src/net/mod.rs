//! Network layer: credential slot, transport, endpoint methods, wire types.

pub mod api;
pub mod client;
pub mod token;
pub mod types;
