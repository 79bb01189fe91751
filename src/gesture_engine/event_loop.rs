use super::{
    classifier::ClassifierState,
    config::{active_config, GestureEngineConfig},
    timers::TimerSchedule,
    trace::BatchTraceSample,
    types::{ClassifierSnapshot, GestureCommand, GestureOutput, OutputBuffer, Sample, TimerKind},
};

#[derive(Clone, Debug, Default)]
pub struct LoopOutput {
    pub outputs: OutputBuffer,
    pub trace: Option<BatchTraceSample>,
}

impl LoopOutput {
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.trace.is_none()
    }

    fn push(&mut self, output: GestureOutput) {
        let _ = self.outputs.push(output);
    }
}

/// Single owner of the classifier and its timers.
///
/// Every input (sample batches, sensitivity changes and timer expiries) goes
/// through `handle` or `fire_due_timers`, so state changes are serialized.
pub struct GestureLoop {
    config: &'static GestureEngineConfig,
    classifier: ClassifierState,
    timers: TimerSchedule,
    alert_visible: bool,
}

impl GestureLoop {
    pub fn new(config: &'static GestureEngineConfig, now_ms: u64) -> Self {
        let mut timers = TimerSchedule::new();
        timers.schedule(
            TimerKind::Inactivity,
            now_ms.saturating_add(config.timers.inactivity_ms),
        );
        Self {
            config,
            classifier: ClassifierState::new(config.classifier.default_sensitivity),
            timers,
            alert_visible: false,
        }
    }

    pub fn with_active_config(now_ms: u64) -> Self {
        Self::new(active_config(), now_ms)
    }

    pub fn config(&self) -> &'static GestureEngineConfig {
        self.config
    }

    pub fn classifier(&self) -> &ClassifierState {
        &self.classifier
    }

    pub fn timers(&self) -> &TimerSchedule {
        &self.timers
    }

    pub fn alert_visible(&self) -> bool {
        self.alert_visible
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn snapshot(&self) -> ClassifierSnapshot {
        ClassifierSnapshot {
            counts: self.classifier.counts(),
            sensitivity: self.classifier.sensitivity(),
            accepting_input: self.classifier.accepting_input(),
            alert_visible: self.alert_visible,
            states: self.classifier.axis_states(),
        }
    }

    pub fn handle(&mut self, command: GestureCommand, now_ms: u64) -> LoopOutput {
        let mut output = self.fire_due_timers(now_ms);
        match command {
            GestureCommand::Batch(samples) => self.on_batch(&samples, now_ms, &mut output),
            GestureCommand::AdjustSensitivity { delta } => {
                let threshold = self.classifier.adjust_sensitivity(delta);
                output.push(GestureOutput::SensitivityChanged { threshold });
            }
            GestureCommand::TimerFired(kind) => {
                let _ = self.timers.cancel(kind);
                self.on_timer(kind, now_ms, &mut output);
            }
        }
        output
    }

    /// Runs every timer whose deadline is `<= now_ms`, earliest first.
    pub fn fire_due_timers(&mut self, now_ms: u64) -> LoopOutput {
        let mut output = LoopOutput::default();
        while let Some(kind) = self.timers.pop_expired(now_ms) {
            self.on_timer(kind, now_ms, &mut output);
        }
        output
    }

    fn on_batch(&mut self, samples: &[Sample], now_ms: u64, output: &mut LoopOutput) {
        let sensitivity = self.classifier.sensitivity();
        let mut outcome = self.classifier.process_batch(samples, sensitivity);
        outcome.trace.now_ms = now_ms;

        if !outcome.detections.is_empty() {
            let timers = self.config.timers;
            self.timers
                .schedule(TimerKind::ReArm, now_ms.saturating_add(timers.rearm_ms));
            let _ = self.timers.cancel(TimerKind::Inactivity);
            self.timers.schedule(
                TimerKind::Inactivity,
                now_ms.saturating_add(timers.inactivity_ms),
            );
        }
        for event in outcome.detections {
            output.push(GestureOutput::Detected(event));
        }
        output.trace = Some(outcome.trace);
    }

    fn on_timer(&mut self, kind: TimerKind, now_ms: u64, output: &mut LoopOutput) {
        let timers = self.config.timers;
        match kind {
            TimerKind::ReArm => self.classifier.on_rearm_timer_fired(),
            TimerKind::Inactivity => {
                let event = self.classifier.on_inactivity_timer_fired();
                self.alert_visible = true;
                self.timers.schedule(
                    TimerKind::AlertClear,
                    now_ms.saturating_add(timers.alert_display_ms),
                );
                self.timers.schedule(
                    TimerKind::Inactivity,
                    now_ms.saturating_add(timers.inactivity_ms),
                );
                output.push(GestureOutput::InactivityAlert(event));
            }
            TimerKind::AlertClear => {
                self.alert_visible = false;
                output.push(GestureOutput::InactivityCleared);
            }
        }
    }
}
