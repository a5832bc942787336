//! HTTP request handlers for the sensor API.

pub mod collections;
pub mod filter;
pub mod health;
