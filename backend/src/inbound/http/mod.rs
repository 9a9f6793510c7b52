//! HTTP inbound adapter: handlers, state, and error mapping.

pub mod bookings;
pub mod error;
pub mod health;
pub mod leads;
pub mod notify;
pub mod state;

pub use error::ApiResult;
