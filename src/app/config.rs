use core::{cell::Cell, sync::atomic::AtomicBool};

use embassy_sync::{
    blocking_mutex::{raw::CriticalSectionRawMutex, Mutex as BlockingMutex},
    channel::Channel,
};
use greet::gesture_engine::{BatchTraceSample, ClassifierSnapshot, GestureCommand, GestureOutput};

pub(crate) const UART_BAUD: u32 = 115_200;
pub(crate) const I2C_FREQ_KHZ: u32 = 400;
pub(crate) const I2C_TIMEOUT_MS: u64 = 20;
pub(crate) const IMU_RETRY_MS: u64 = 2_000;
pub(crate) const BUTTON_DEBOUNCE_MS: u64 = 40;
pub(crate) const HAPTIC_PULSE_MS: u64 = 120;
pub(crate) const HAPTIC_GAP_MS: u64 = 100;
pub(crate) const CONSOLE_POLL_MS: u64 = 10;
pub(crate) const COMMAND_ENQUEUE_RETRY_MS: u64 = 10;
pub(crate) const COMMAND_ENQUEUE_MAX_RETRIES: u8 = 20;

pub(crate) static GESTURE_COMMANDS: Channel<CriticalSectionRawMutex, GestureCommand, 4> =
    Channel::new();
pub(crate) static FEEDBACK_EVENTS: Channel<CriticalSectionRawMutex, GestureOutput, 8> =
    Channel::new();
pub(crate) static CONSOLE_EVENTS: Channel<CriticalSectionRawMutex, GestureOutput, 8> =
    Channel::new();
pub(crate) static GESTURE_TRACE_SAMPLES: Channel<CriticalSectionRawMutex, BatchTraceSample, 8> =
    Channel::new();
pub(crate) static GESTURE_TRACE_ENABLED: AtomicBool = AtomicBool::new(false);
pub(crate) static STATUS_SNAPSHOT: BlockingMutex<CriticalSectionRawMutex, Cell<ClassifierSnapshot>> =
    BlockingMutex::new(Cell::new(ClassifierSnapshot::EMPTY));
