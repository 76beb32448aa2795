//! HTTP surface for work order generation and downloads.

pub mod handlers;
pub mod models;
