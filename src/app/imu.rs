use embassy_time::{Duration, Ticker, Timer};
use greet::gesture_engine::{
    config::active_config, GestureCommand, SampleBatch, SAMPLE_BATCH_MAX,
};

use super::{
    config::{GESTURE_COMMANDS, IMU_RETRY_MS},
    telemetry,
    types::ImuDriver,
};

#[embassy_executor::task]
pub(crate) async fn imu_task(mut imu: ImuDriver) {
    let sampling = active_config().sampling;
    let batch_size = sampling.batch_size.clamp(1, SAMPLE_BATCH_MAX);
    let period = Duration::from_millis(sampling.sample_period_ms().max(1));

    loop {
        match imu.init_accelerometer() {
            Ok(true) => esp_println::println!(
                "imu: ready rate_hz={} batch={}",
                sampling.sample_rate_hz,
                batch_size
            ),
            Ok(false) => {
                esp_println::println!("imu: not_found");
                telemetry::record_imu_fault();
                Timer::after_millis(IMU_RETRY_MS).await;
                continue;
            }
            Err(_) => {
                esp_println::println!("imu: init_bus_error");
                telemetry::record_imu_fault();
                Timer::after_millis(IMU_RETRY_MS).await;
                continue;
            }
        }

        sample_until_fault(&mut imu, batch_size, period).await;
        telemetry::record_imu_fault();
        Timer::after_millis(IMU_RETRY_MS).await;
    }
}

async fn sample_until_fault(imu: &mut ImuDriver, batch_size: usize, period: Duration) {
    let mut batch = SampleBatch::new();
    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;
        let sample = match imu.read_sample() {
            Ok(sample) => sample,
            Err(_) => {
                esp_println::println!("imu: read_bus_error dropped_samples={}", batch.len());
                return;
            }
        };

        let _ = batch.push(sample);
        if batch.len() < batch_size {
            continue;
        }

        let full = core::mem::take(&mut batch);
        if GESTURE_COMMANDS.try_send(GestureCommand::Batch(full)).is_ok() {
            telemetry::record_batch_sent();
        } else {
            telemetry::record_batch_dropped();
        }
    }
}
