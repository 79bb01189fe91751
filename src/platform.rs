//! Bus and delay seams between the sensor drivers and the HAL.

#[cfg(feature = "esp-hal-runtime")]
use esp_hal::{
    i2c::master::{Error as I2cError, I2c},
    time::{Duration, Instant},
    Blocking,
};

pub trait DelayOps {
    fn delay_ms(&self, millis: u32);
}

impl<T: DelayOps + ?Sized> DelayOps for &T {
    fn delay_ms(&self, millis: u32) {
        (**self).delay_ms(millis);
    }
}

pub trait I2cOps {
    type Error;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error>;
    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;
    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Runs `op`, and on failure resets the bus, waits 1 ms and runs it once more.
pub fn retry_once<B, D, T>(
    bus: &mut B,
    delay: &D,
    mut op: impl FnMut(&mut B) -> Result<T, B::Error>,
) -> Result<T, B::Error>
where
    B: I2cOps + ?Sized,
    D: DelayOps + ?Sized,
{
    match op(bus) {
        Ok(value) => Ok(value),
        Err(_) => {
            let _ = bus.reset();
            delay.delay_ms(1);
            op(bus)
        }
    }
}

#[cfg(feature = "esp-hal-runtime")]
pub struct HalI2c<'d> {
    bus: I2c<'d, Blocking>,
}

#[cfg(feature = "esp-hal-runtime")]
impl<'d> HalI2c<'d> {
    pub fn new(bus: I2c<'d, Blocking>) -> Self {
        Self { bus }
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl I2cOps for HalI2c<'_> {
    type Error = I2cError;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(addr, bytes)
    }

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.write_read(addr, bytes, buffer)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        // Controller state is cleared by the HAL when the next transaction starts.
        Ok(())
    }
}

/// Spins on the HAL clock. Only used for the short settle waits during IMU bring-up.
#[cfg(feature = "esp-hal-runtime")]
#[derive(Clone, Copy, Default)]
pub struct BusyDelay;

#[cfg(feature = "esp-hal-runtime")]
impl BusyDelay {
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl DelayOps for BusyDelay {
    fn delay_ms(&self, millis: u32) {
        let start = Instant::now();
        let duration = Duration::from_millis(millis as u64);
        while start.elapsed() < duration {}
    }
}
