//! HTTP request handlers

pub mod fare;
pub mod health;
