use embassy_time::Timer;
use esp_hal::gpio::Output;
use greet::gesture_engine::GestureOutput;

use super::config::{FEEDBACK_EVENTS, HAPTIC_GAP_MS, HAPTIC_PULSE_MS};

#[embassy_executor::task]
pub(crate) async fn feedback_task(mut motor: Output<'static>, mut alert_led: Output<'static>) {
    double_pulse(&mut motor).await;

    loop {
        match FEEDBACK_EVENTS.receive().await {
            GestureOutput::Detected(_) => double_pulse(&mut motor).await,
            GestureOutput::InactivityAlert(_) => {
                alert_led.set_high();
                double_pulse(&mut motor).await;
            }
            GestureOutput::InactivityCleared => alert_led.set_low(),
            GestureOutput::SensitivityChanged { .. } => {}
        }
    }
}

async fn double_pulse(motor: &mut Output<'static>) {
    for pulse in 0..2 {
        if pulse > 0 {
            Timer::after_millis(HAPTIC_GAP_MS).await;
        }
        motor.set_high();
        Timer::after_millis(HAPTIC_PULSE_MS).await;
        motor.set_low();
    }
}
