use embassy_futures::select::{select, Either};
use embassy_time::Instant;
use esp_hal::gpio::Input;
use greet::{
    drivers::PressFilter,
    gesture_engine::{config::active_config, GestureCommand},
};

use super::{config::BUTTON_DEBOUNCE_MS, queue::enqueue_command_with_retry};

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::task]
pub(crate) async fn buttons_task(mut up: Input<'static>, mut down: Input<'static>) {
    let step = active_config().classifier.sensitivity_step;
    let mut up_filter = PressFilter::new(BUTTON_DEBOUNCE_MS);
    let mut down_filter = PressFilter::new(BUTTON_DEBOUNCE_MS);

    loop {
        let up_fired = matches!(
            select(up.wait_for_falling_edge(), down.wait_for_falling_edge()).await,
            Either::First(())
        );
        let (pin, filter, delta) = if up_fired {
            (&mut up, &mut up_filter, step)
        } else {
            (&mut down, &mut down_filter, -step)
        };

        if filter.on_falling_edge(now_ms())
            && !enqueue_command_with_retry(GestureCommand::AdjustSensitivity { delta }).await
        {
            esp_println::println!("buttons: command_queue_full delta={}", delta);
        }

        // Held-low periods must not look like fresh presses; wait for the level to return.
        if pin.is_low() {
            pin.wait_for_rising_edge().await;
        }
        filter.on_release(now_ms());
    }
}
