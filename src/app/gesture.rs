use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use greet::gesture_engine::{GestureLoop, GestureOutput, LoopOutput};

use super::{
    config::{
        CONSOLE_EVENTS, FEEDBACK_EVENTS, GESTURE_COMMANDS, GESTURE_TRACE_ENABLED,
        GESTURE_TRACE_SAMPLES, STATUS_SNAPSHOT,
    },
    telemetry,
};

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::task]
pub(crate) async fn gesture_task() {
    let mut engine = GestureLoop::with_active_config(now_ms());
    publish_snapshot(&engine);
    esp_println::println!(
        "gesture: ready threshold={} inactivity_ms={}",
        engine.classifier().sensitivity(),
        engine.config().timers.inactivity_ms
    );

    loop {
        let command = match engine.next_deadline_ms() {
            Some(deadline_ms) => {
                match select(
                    GESTURE_COMMANDS.receive(),
                    Timer::at(Instant::from_millis(deadline_ms)),
                )
                .await
                {
                    Either::First(command) => Some(command),
                    Either::Second(()) => None,
                }
            }
            None => Some(GESTURE_COMMANDS.receive().await),
        };

        let now = now_ms();
        let output = match command {
            Some(command) => engine.handle(command, now),
            None => engine.fire_due_timers(now),
        };
        publish_output(&output);
        publish_snapshot(&engine);
    }
}

fn publish_output(output: &LoopOutput) {
    for event in output.outputs.iter().copied() {
        match event {
            GestureOutput::Detected(detected) => {
                telemetry::record_detection();
                esp_println::println!(
                    "gesture: detected kind={} count={}",
                    detected.channel.key(),
                    detected.count
                );
            }
            GestureOutput::InactivityAlert(_) => {
                telemetry::record_inactivity_alert();
                esp_println::println!("gesture: inactivity_alert");
            }
            GestureOutput::InactivityCleared | GestureOutput::SensitivityChanged { .. } => {}
        }

        if FEEDBACK_EVENTS.try_send(event).is_err() {
            telemetry::record_output_dropped();
        }
        if CONSOLE_EVENTS.try_send(event).is_err() {
            telemetry::record_output_dropped();
        }
    }

    if let Some(trace) = output.trace {
        if GESTURE_TRACE_ENABLED.load(core::sync::atomic::Ordering::Relaxed) {
            let _ = GESTURE_TRACE_SAMPLES.try_send(trace);
        }
    }
}

fn publish_snapshot(engine: &GestureLoop) {
    let snapshot = engine.snapshot();
    STATUS_SNAPSHOT.lock(|cell| cell.set(snapshot));
}
