// src/lib.rs — Library root for hackeval

pub mod cli;
pub mod evaluator;
pub mod infra;
pub mod provider;
pub mod store;
