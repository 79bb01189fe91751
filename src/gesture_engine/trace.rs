use super::{
    features::{BatchMeans, EndpointDeltas},
    types::{AxisState, Channel, Sample},
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchTraceSample {
    pub now_ms: u64,
    pub sample_count: u8,
    pub first: Sample,
    pub deltas: EndpointDeltas,
    pub means: BatchMeans,
    pub dominant: Option<Channel>,
    pub sensitivity: i32,
    /// Gate value when the batch arrived.
    pub accepting_input: bool,
    pub states: [AxisState; Channel::COUNT],
    pub promoted_mask: u8,
    pub detected_mask: u8,
}
