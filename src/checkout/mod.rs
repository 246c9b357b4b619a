//! The checkout transaction: reserve stock, price the order, authorize the
//! charge, commit. Any failure before `Done` puts every reservation back.

mod error;
mod reservation_log;
mod service;
mod state;

pub use error::*;
pub use reservation_log::*;
pub use service::*;
pub use state::*;
