//! Command handlers

pub mod config;
pub mod plant;
pub mod status;
pub mod theme;
pub mod transfer;
