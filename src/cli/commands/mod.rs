//! CLI command modules

pub mod apply;
pub mod events;
pub mod validate;
