//! Shared UI components.

pub mod layout;
pub mod route_guard;
pub mod toast;
