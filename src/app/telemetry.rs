use core::{
    fmt::Write,
    sync::atomic::{AtomicU32, Ordering},
};

use greet::console::ConsoleLine;

static BATCHES_SENT: AtomicU32 = AtomicU32::new(0);
static BATCHES_DROPPED: AtomicU32 = AtomicU32::new(0);
static IMU_FAULTS: AtomicU32 = AtomicU32::new(0);
static OUTPUTS_DROPPED: AtomicU32 = AtomicU32::new(0);
static DETECTIONS: AtomicU32 = AtomicU32::new(0);
static INACTIVITY_ALERTS: AtomicU32 = AtomicU32::new(0);

pub(crate) fn record_batch_sent() {
    BATCHES_SENT.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_batch_dropped() {
    BATCHES_DROPPED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_imu_fault() {
    IMU_FAULTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_output_dropped() {
    OUTPUTS_DROPPED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_detection() {
    DETECTIONS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_inactivity_alert() {
    INACTIVITY_ALERTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn telemetry_line() -> ConsoleLine {
    let mut line = ConsoleLine::new();
    let _ = write!(
        &mut line,
        "TELEM batches={} batches_dropped={} imu_faults={} outputs_dropped={} detections={} alerts={}",
        BATCHES_SENT.load(Ordering::Relaxed),
        BATCHES_DROPPED.load(Ordering::Relaxed),
        IMU_FAULTS.load(Ordering::Relaxed),
        OUTPUTS_DROPPED.load(Ordering::Relaxed),
        DETECTIONS.load(Ordering::Relaxed),
        INACTIVITY_ALERTS.load(Ordering::Relaxed),
    );
    line
}
