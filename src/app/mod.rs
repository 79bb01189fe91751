mod buttons;
pub(crate) mod config;
mod console;
mod feedback;
mod gesture;
mod imu;
mod queue;
mod telemetry;
pub(crate) mod types;

use esp_hal::{
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c, SoftwareTimeout},
    time::{Duration as HalDuration, Rate},
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use greet::{
    drivers::Lsm6ds3,
    gesture_engine::config::active_config,
    platform::{BusyDelay, HalI2c},
};

use self::config::{I2C_FREQ_KHZ, I2C_TIMEOUT_MS, UART_BAUD};

pub(crate) fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = Uart::new(peripherals.UART0, uart_cfg)
        .expect("failed to init UART0")
        .with_rx(peripherals.GPIO3)
        .with_tx(peripherals.GPIO1)
        .into_async();

    let i2c_cfg = I2cConfig::default()
        .with_frequency(Rate::from_khz(I2C_FREQ_KHZ))
        .with_software_timeout(SoftwareTimeout::Transaction(HalDuration::from_millis(
            I2C_TIMEOUT_MS,
        )));
    let i2c = I2c::new(peripherals.I2C0, i2c_cfg)
        .expect("failed to init I2C0")
        .with_sda(peripherals.GPIO21)
        .with_scl(peripherals.GPIO22);
    let imu = Lsm6ds3::new(HalI2c::new(i2c), BusyDelay::new());

    let button_up = Input::new(
        peripherals.GPIO32,
        InputConfig::default().with_pull(Pull::Up),
    );
    let button_down = Input::new(
        peripherals.GPIO33,
        InputConfig::default().with_pull(Pull::Up),
    );

    let motor = Output::new(peripherals.GPIO25, Level::Low, OutputConfig::default());
    let alert_led = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());

    let engine = active_config();
    esp_println::println!(
        "greet: boot threshold={} batch={} rate_hz={}",
        engine.classifier.default_sensitivity,
        engine.sampling.batch_size,
        engine.sampling.sample_rate_hz
    );

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(gesture::gesture_task());
        spawner.must_spawn(imu::imu_task(imu));
        spawner.must_spawn(buttons::buttons_task(button_up, button_down));
        spawner.must_spawn(feedback::feedback_task(motor, alert_led));
        spawner.must_spawn(console::console_task(uart));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}
