//! # Chess2Earn Shared
//!
//! Shared configuration, response types, and validation utilities used by
//! every layer of the Chess2Earn backend.

pub mod config;
pub mod types;
pub mod utils;
