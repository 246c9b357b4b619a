//! Ticket stock: the catalog actor's record type and its reservation actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
