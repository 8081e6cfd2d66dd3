//! Domain models for the bank API

pub mod account;
pub mod status;
