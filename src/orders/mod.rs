//! Committed orders: an order, its items and its payment are one record.

pub mod entity;
pub mod error;

pub use error::*;
