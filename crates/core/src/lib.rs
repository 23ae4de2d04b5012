//! # SalonBook Core
//!
//! Domain types and pure logic shared by the SalonBook client and CLI:
//! the REST models, the error taxonomy, weekly schedule normalization,
//! time-block validation with its expiry sweep, and the booking form
//! state machine.
//!
//! Nothing in this crate performs I/O. Callers pass in "now" and the salon
//! timezone explicitly so every rule can be exercised deterministically.

pub mod booking;
pub mod errors;
pub mod models;
pub mod schedule;
pub mod time_block;
