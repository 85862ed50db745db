//! Command implementations

pub(crate) mod common;
pub(crate) mod config;
pub(crate) mod lineage;
pub(crate) mod resolve;
