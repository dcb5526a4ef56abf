//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State machines are plain structs with their transition rules inline, so
//! the lifecycle invariants can be tested natively; components wrap them in
//! `RwSignal` contexts and the async drivers reach them through small handle
//! traits.

pub mod actions;
pub mod notices;
pub mod session;
