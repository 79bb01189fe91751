#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod drivers;
pub mod gesture_engine;
pub mod platform;
