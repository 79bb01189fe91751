//! On-target checks for the gesture loop running under the embassy timer.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use embassy_time::{Duration, Instant, Timer};
    use greet::gesture_engine::{
        config::active_config, Channel, GestureCommand, GestureLoop, GestureOutput, Sample,
        SampleBatch,
    };

    fn now_ms() -> u64 {
        Instant::now().as_millis()
    }

    fn batch(x0: i16, x1: i16) -> GestureCommand {
        let mut samples = SampleBatch::new();
        let len = active_config().sampling.batch_size;
        for i in 0..len {
            let x = if i + 1 == len { x1 } else { x0 };
            let _ = samples.push(Sample::new(x, 0, 1_000));
        }
        GestureCommand::Batch(samples)
    }

    #[init]
    fn init() {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);
    }

    #[test]
    async fn fist_bump_confirms_and_rearms_on_target_clock() {
        let config = active_config();
        let mut engine = GestureLoop::with_active_config(now_ms());

        let _ = engine.handle(batch(-200, 200), now_ms());
        let _ = engine.handle(batch(-600, 600), now_ms());
        let output = engine.handle(batch(600, -200), now_ms());

        assert_eq!(output.outputs.len(), 1);
        match output.outputs[0] {
            GestureOutput::Detected(event) => {
                assert_eq!(event.channel, Channel::FistBump);
                assert_eq!(event.count, 1);
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert!(!engine.classifier().accepting_input());

        Timer::after(Duration::from_millis(config.timers.rearm_ms + 5)).await;
        let _ = engine.fire_due_timers(now_ms());
        assert!(engine.classifier().accepting_input());
    }
}
