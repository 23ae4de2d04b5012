pub mod appointment;
pub mod salon;
pub mod service;
pub mod staff;
pub mod time_block;
