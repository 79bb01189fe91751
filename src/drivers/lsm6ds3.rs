use crate::{
    gesture_engine::Sample,
    platform::{retry_once, DelayOps, I2cOps},
};

pub const LSM6DS3_ADDR: u8 = 0x6B;

const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL1_XL: u8 = 0x10;
const REG_CTRL3_C: u8 = 0x12;
const REG_OUTX_L_XL: u8 = 0x28;
const WHO_AM_I_VALUE: u8 = 0x69;

// ODR_XL = 416 Hz, FS_XL = +/-4 g.
const CTRL1_XL_416HZ_4G: u8 = 0x68;
// BDU plus register auto-increment for burst reads.
const CTRL3_C_BDU_IF_INC: u8 = 0x44;

/// 0.122 mg/LSB at +/-4 g.
const MICRO_G_PER_LSB: i32 = 122;

/// LSM6DS3 accelerometer over any `I2cOps` bus.
pub struct Lsm6ds3<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C, D> Lsm6ds3<I2C, D>
where
    I2C: I2cOps,
    D: DelayOps,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, LSM6DS3_ADDR)
    }

    pub fn with_address(i2c: I2C, delay: D, addr: u8) -> Self {
        Self { i2c, delay, addr }
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Returns `Ok(false)` when something other than an LSM6DS3 answers.
    pub fn init_accelerometer(&mut self) -> Result<bool, I2C::Error> {
        if self.read_reg(REG_WHO_AM_I)? != WHO_AM_I_VALUE {
            return Ok(false);
        }

        self.write_reg(REG_CTRL3_C, CTRL3_C_BDU_IF_INC)?;
        self.write_reg(REG_CTRL1_XL, CTRL1_XL_416HZ_4G)?;
        // First conversion lands ~2.4 ms after ODR switch-on.
        self.delay.delay_ms(5);
        Ok(true)
    }

    pub fn read_accel_raw(&mut self) -> Result<(i16, i16, i16), I2C::Error> {
        let mut raw = [0u8; 6];
        self.write_read(&[REG_OUTX_L_XL], &mut raw)?;
        Ok((
            i16::from_le_bytes([raw[0], raw[1]]),
            i16::from_le_bytes([raw[2], raw[3]]),
            i16::from_le_bytes([raw[4], raw[5]]),
        ))
    }

    pub fn read_sample(&mut self) -> Result<Sample, I2C::Error> {
        let (x, y, z) = self.read_accel_raw()?;
        Ok(Sample::new(
            raw_to_milli_g(x),
            raw_to_milli_g(y),
            raw_to_milli_g(z),
        ))
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.write_read(&[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        let addr = self.addr;
        retry_once(&mut self.i2c, &self.delay, |bus| bus.write(addr, &[reg, value]))
    }

    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), I2C::Error> {
        let addr = self.addr;
        retry_once(&mut self.i2c, &self.delay, |bus| {
            bus.write_read(addr, bytes, buffer)
        })
    }
}

pub const fn raw_to_milli_g(raw: i16) -> i16 {
    (raw as i32 * MICRO_G_PER_LSB / 1_000) as i16
}
