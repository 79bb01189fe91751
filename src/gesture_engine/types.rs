/// Largest batch a `GestureCommand::Batch` can carry.
pub const SAMPLE_BATCH_MAX: usize = 32;

/// One accelerometer reading in milli-g.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Sample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub const fn axis(self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

pub type SampleBatch = heapless::Vec<Sample, SAMPLE_BATCH_MAX>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Channel {
    Shake = 0,
    FistBump = 1,
    HighFive = 2,
}

impl Channel {
    pub const COUNT: usize = 3;
    pub const ALL: [Channel; Self::COUNT] = [Channel::Shake, Channel::FistBump, Channel::HighFive];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }

    /// Axis whose sign crossings drive approach and retract.
    ///
    /// Shake shares X with FistBump: a handshake is approached sideways just
    /// like a fist bump, only its impact lands on Y.
    pub const fn approach_axis(self) -> Axis {
        match self {
            Channel::Shake | Channel::FistBump => Axis::X,
            Channel::HighFive => Axis::Z,
        }
    }

    /// Axis whose first-to-last delta must dominate for the impact.
    pub const fn impact_axis(self) -> Axis {
        match self {
            Channel::Shake => Axis::Y,
            Channel::FistBump => Axis::X,
            Channel::HighFive => Axis::Z,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Channel::Shake => "Shakes",
            Channel::FistBump => "Fist Bumps",
            Channel::HighFive => "High Fives",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Channel::Shake => "shake",
            Channel::FistBump => "fist_bump",
            Channel::HighFive => "high_five",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum AxisState {
    #[default]
    Idle = 0,
    Approaching = 1,
    ImpactCandidate = 2,
}

impl AxisState {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            AxisState::Idle => "idle",
            AxisState::Approaching => "approaching",
            AxisState::ImpactCandidate => "impact",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DetectedEvent {
    pub channel: Channel,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InactivityEvent;

impl InactivityEvent {
    pub const MESSAGE: &'static str = "You're too shy.";
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerKind {
    ReArm = 0,
    Inactivity = 1,
    AlertClear = 2,
}

impl TimerKind {
    pub const COUNT: usize = 3;
    pub const ALL: [TimerKind; Self::COUNT] =
        [TimerKind::ReArm, TimerKind::Inactivity, TimerKind::AlertClear];

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GestureCommand {
    Batch(SampleBatch),
    AdjustSensitivity { delta: i32 },
    TimerFired(TimerKind),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GestureOutput {
    Detected(DetectedEvent),
    InactivityAlert(InactivityEvent),
    InactivityCleared,
    SensitivityChanged { threshold: i32 },
}

pub const OUTPUT_BUFFER_MAX: usize = 8;

pub type OutputBuffer = heapless::Vec<GestureOutput, OUTPUT_BUFFER_MAX>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClassifierSnapshot {
    pub counts: [u32; Channel::COUNT],
    pub sensitivity: i32,
    pub accepting_input: bool,
    pub alert_visible: bool,
    pub states: [AxisState; Channel::COUNT],
}

impl ClassifierSnapshot {
    pub const EMPTY: Self = Self {
        counts: [0; Channel::COUNT],
        sensitivity: 0,
        accepting_input: true,
        alert_visible: false,
        states: [AxisState::Idle; Channel::COUNT],
    };
}
