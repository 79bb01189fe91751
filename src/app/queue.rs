use embassy_time::Timer;
use greet::gesture_engine::GestureCommand;

use super::config::{COMMAND_ENQUEUE_MAX_RETRIES, COMMAND_ENQUEUE_RETRY_MS, GESTURE_COMMANDS};

pub(crate) async fn enqueue_command_with_retry(command: GestureCommand) -> bool {
    let mut pending = command;
    for attempt in 0..=COMMAND_ENQUEUE_MAX_RETRIES {
        match GESTURE_COMMANDS.try_send(pending) {
            Ok(()) => return true,
            Err(embassy_sync::channel::TrySendError::Full(returned)) => pending = returned,
        }
        if attempt == COMMAND_ENQUEUE_MAX_RETRIES {
            break;
        }
        Timer::after_millis(COMMAND_ENQUEUE_RETRY_MS).await;
    }
    false
}
