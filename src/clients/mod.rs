//! Typed handles over the store actors.

#[macro_use]
mod macros;
mod inventory_client;
mod order_client;

pub use inventory_client::*;
pub use order_client::*;
