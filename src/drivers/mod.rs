pub mod button;
pub mod lsm6ds3;

pub use button::PressFilter;
pub use lsm6ds3::{raw_to_milli_g, Lsm6ds3, LSM6DS3_ADDR};
