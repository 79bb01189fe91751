use super::{
    axis_hsm::AxisTracker,
    features::{batch_means, dominant_channel, endpoint_deltas},
    trace::BatchTraceSample,
    types::{AxisState, Channel, DetectedEvent, InactivityEvent, Sample},
};

pub type DetectionBuffer = heapless::Vec<DetectedEvent, { Channel::COUNT }>;

#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    pub detections: DetectionBuffer,
    pub trace: BatchTraceSample,
}

/// Three channel trackers plus the shared input gate and counters.
pub struct ClassifierState {
    axes: [AxisTracker; Channel::COUNT],
    counts: [u32; Channel::COUNT],
    accepting_input: bool,
    sensitivity: i32,
}

impl ClassifierState {
    pub fn new(default_sensitivity: i32) -> Self {
        Self {
            axes: [AxisTracker::new(), AxisTracker::new(), AxisTracker::new()],
            counts: [0; Channel::COUNT],
            accepting_input: true,
            sensitivity: default_sensitivity,
        }
    }

    pub fn sensitivity(&self) -> i32 {
        self.sensitivity
    }

    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn count(&self, channel: Channel) -> u32 {
        self.counts[channel.index()]
    }

    pub fn counts(&self) -> [u32; Channel::COUNT] {
        self.counts
    }

    pub fn axis_state(&self, channel: Channel) -> AxisState {
        self.axes[channel.index()].state()
    }

    pub fn axis_states(&self) -> [AxisState; Channel::COUNT] {
        Channel::ALL.map(|channel| self.axis_state(channel))
    }

    pub fn adjust_sensitivity(&mut self, delta: i32) -> i32 {
        self.sensitivity = self.sensitivity.saturating_add(delta);
        self.sensitivity
    }

    pub fn on_rearm_timer_fired(&mut self) {
        self.accepting_input = true;
    }

    pub fn on_inactivity_timer_fired(&self) -> InactivityEvent {
        InactivityEvent
    }

    /// Runs one batch through the channel trackers.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn process_batch(&mut self, samples: &[Sample], sensitivity: i32) -> BatchOutcome {
        assert!(!samples.is_empty(), "gesture batch must not be empty");

        let mut outcome = BatchOutcome::default();
        let accepting_at_start = self.accepting_input;

        for axis in self.axes.iter_mut() {
            axis.begin_batch();
        }

        for sample in samples {
            self.apply_crossings(*sample, &mut outcome);
        }

        let deltas = endpoint_deltas(samples);
        let dominant = dominant_channel(deltas, sensitivity);

        if self.accepting_input {
            if let Some(channel) = dominant {
                if self.axes[channel.index()].impact() {
                    outcome.trace.promoted_mask |= channel.mask();
                }
            }
            for axis in self.axes.iter_mut() {
                axis.end_batch();
            }
        }

        outcome.trace = BatchTraceSample {
            now_ms: 0,
            sample_count: samples.len().min(u8::MAX as usize) as u8,
            first: samples[0],
            deltas,
            means: batch_means(samples),
            dominant,
            sensitivity,
            accepting_input: accepting_at_start,
            states: self.axis_states(),
            promoted_mask: outcome.trace.promoted_mask,
            detected_mask: outcome.trace.detected_mask,
        };
        outcome
    }

    fn apply_crossings(&mut self, sample: Sample, outcome: &mut BatchOutcome) {
        for channel in Channel::ALL {
            let reading = sample.axis(channel.approach_axis());
            if reading > 0 {
                self.axes[channel.index()].approach();
            } else if reading < 0 && self.accepting_input && self.axes[channel.index()].retract()
            {
                self.confirm(channel, outcome);
            }
        }
    }

    fn confirm(&mut self, channel: Channel, outcome: &mut BatchOutcome) {
        self.accepting_input = false;
        let count = &mut self.counts[channel.index()];
        *count = count.saturating_add(1);
        outcome.trace.detected_mask |= channel.mask();
        let _ = outcome.detections.push(DetectedEvent {
            channel,
            count: *count,
        });
    }
}
