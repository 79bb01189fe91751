#[derive(Clone, Copy, Debug)]
pub struct ClassifierConfig {
    pub default_sensitivity: i32,
    pub sensitivity_step: i32,
}

#[derive(Clone, Copy, Debug)]
pub struct TimerConfig {
    pub rearm_ms: u64,
    pub inactivity_ms: u64,
    pub alert_display_ms: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct SamplingConfig {
    pub batch_size: usize,
    pub sample_rate_hz: u32,
}

impl SamplingConfig {
    pub const fn sample_period_ms(&self) -> u64 {
        1_000 / self.sample_rate_hz as u64
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GestureEngineConfig {
    pub classifier: ClassifierConfig,
    pub timers: TimerConfig,
    pub sampling: SamplingConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureEngineConfig {
    &GESTURE_ENGINE_CONFIG
}
