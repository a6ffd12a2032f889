//! HTTP request handlers

pub mod health;
pub mod predict;
pub mod recommendations;
