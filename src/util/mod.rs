//! Small browser helpers.

pub mod nav;
