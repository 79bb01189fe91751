pub mod axis_hsm;
pub mod classifier;
pub mod config;
pub mod event_loop;
pub mod features;
pub mod timers;
pub mod trace;
pub mod types;


pub use classifier::{BatchOutcome, ClassifierState};
pub use event_loop::{GestureLoop, LoopOutput};
pub use trace::BatchTraceSample;
pub use types::{
    AxisState, Channel, ClassifierSnapshot, DetectedEvent, GestureCommand, GestureOutput,
    InactivityEvent, OutputBuffer, Sample, SampleBatch, TimerKind, SAMPLE_BATCH_MAX,
};
