//! Cosmo Assist — scripted security-assistant conversation engine.

pub mod config;
pub mod conversation;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod transcript;
pub mod typing;
