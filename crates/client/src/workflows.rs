pub mod appointments;
pub mod booking;
pub mod catalog;
pub mod time_blocks;
