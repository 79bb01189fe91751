use esp_hal::{uart::Uart, Async};
use greet::{
    drivers::Lsm6ds3,
    platform::{BusyDelay, HalI2c},
};

pub(crate) type SerialUart = Uart<'static, Async>;
pub(crate) type ImuDriver = Lsm6ds3<HalI2c<'static>, BusyDelay>;
