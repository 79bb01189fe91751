use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::types::AxisState;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AxisSignal {
    BatchStart,
    Approach,
    Impact,
    Retract,
    BatchEnd,
}

#[derive(Default)]
struct DispatchContext {
    promoted: bool,
    confirmed: bool,
}

/// Approach / impact / retract tracker for one gesture channel.
pub struct AxisTracker {
    machine: statig::blocking::StateMachine<AxisHsm>,
}

impl Default for AxisTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisTracker {
    pub fn new() -> Self {
        Self {
            machine: AxisHsm::default().state_machine(),
        }
    }

    pub fn state(&self) -> AxisState {
        self.machine.inner().state_id
    }

    /// Whether a real transition happened since the last `begin_batch`.
    pub fn touched(&self) -> bool {
        self.machine.inner().touched
    }

    pub fn begin_batch(&mut self) {
        self.dispatch(AxisSignal::BatchStart);
    }

    pub fn approach(&mut self) {
        self.dispatch(AxisSignal::Approach);
    }

    /// Returns true when the channel moved to `ImpactCandidate`.
    pub fn impact(&mut self) -> bool {
        self.dispatch(AxisSignal::Impact).promoted
    }

    /// Returns true when an impact candidate was confirmed.
    pub fn retract(&mut self) -> bool {
        self.dispatch(AxisSignal::Retract).confirmed
    }

    pub fn end_batch(&mut self) {
        self.dispatch(AxisSignal::BatchEnd);
    }

    fn dispatch(&mut self, signal: AxisSignal) -> DispatchContext {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&signal, &mut context);
        context
    }
}

#[derive(Default)]
struct AxisHsm {
    state_id: AxisState,
    touched: bool,
}

impl AxisHsm {
    fn enter(&mut self, state_id: AxisState) {
        self.state_id = state_id;
        self.touched = true;
    }
}

#[state_machine(initial = "State::idle()")]
impl AxisHsm {
    #[state(superstate = "tracking")]
    fn idle(&mut self, event: &AxisSignal) -> Outcome<State> {
        match event {
            AxisSignal::Approach => {
                self.enter(AxisState::Approaching);
                Transition(State::approaching())
            }
            AxisSignal::Impact | AxisSignal::Retract => Handled,
            AxisSignal::BatchStart | AxisSignal::BatchEnd => Super,
        }
    }

    #[state(superstate = "tracking")]
    fn approaching(&mut self, context: &mut DispatchContext, event: &AxisSignal) -> Outcome<State> {
        match event {
            AxisSignal::Impact => {
                self.enter(AxisState::ImpactCandidate);
                context.promoted = true;
                Transition(State::impact_candidate())
            }
            AxisSignal::Approach | AxisSignal::Retract => Handled,
            AxisSignal::BatchStart | AxisSignal::BatchEnd => Super,
        }
    }

    #[state(superstate = "tracking")]
    fn impact_candidate(
        &mut self,
        context: &mut DispatchContext,
        event: &AxisSignal,
    ) -> Outcome<State> {
        match event {
            AxisSignal::Retract => {
                self.enter(AxisState::Idle);
                context.confirmed = true;
                Transition(State::idle())
            }
            AxisSignal::Approach | AxisSignal::Impact => Handled,
            AxisSignal::BatchStart | AxisSignal::BatchEnd => Super,
        }
    }

    #[superstate]
    fn tracking(&mut self, event: &AxisSignal) -> Outcome<State> {
        match event {
            AxisSignal::BatchStart => {
                self.touched = false;
                Handled
            }
            AxisSignal::BatchEnd if !self.touched && self.state_id != AxisState::Idle => {
                self.state_id = AxisState::Idle;
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_confirms_and_returns_to_idle() {
        let mut axis = AxisTracker::new();

        axis.begin_batch();
        axis.approach();
        axis.end_batch();
        assert_eq!(axis.state(), AxisState::Approaching);

        axis.begin_batch();
        assert!(axis.impact());
        axis.end_batch();
        assert_eq!(axis.state(), AxisState::ImpactCandidate);

        axis.begin_batch();
        assert!(axis.retract());
        axis.end_batch();
        assert_eq!(axis.state(), AxisState::Idle);
    }

    #[test]
    fn untouched_batch_resets_to_idle() {
        let mut axis = AxisTracker::new();
        axis.begin_batch();
        axis.approach();
        axis.end_batch();

        axis.begin_batch();
        axis.approach();
        assert!(!axis.touched());
        axis.end_batch();
        assert_eq!(axis.state(), AxisState::Idle);
    }

    #[test]
    fn out_of_order_signals_are_ignored() {
        let mut axis = AxisTracker::new();
        axis.begin_batch();
        assert!(!axis.impact());
        assert!(!axis.retract());
        assert_eq!(axis.state(), AxisState::Idle);
        assert!(!axis.touched());

        axis.approach();
        assert!(!axis.retract());
        assert_eq!(axis.state(), AxisState::Approaching);
    }

    #[test]
    fn state_survives_when_batch_end_is_skipped() {
        let mut axis = AxisTracker::new();
        axis.begin_batch();
        axis.approach();
        axis.end_batch();

        axis.begin_batch();
        assert_eq!(axis.state(), AxisState::Approaching);
        axis.begin_batch();
        assert_eq!(axis.state(), AxisState::Approaching);
    }

    #[test]
    fn idle_and_batch_bookkeeping_leave_dispatch_context_clear() {
        let mut axis = AxisTracker::new();
        for signal in [AxisSignal::BatchStart, AxisSignal::Impact, AxisSignal::Retract] {
            let context = axis.dispatch(signal);
            assert!(!context.promoted && !context.confirmed, "{signal:?}");
        }

        axis.approach();
        assert!(axis.impact());
        axis.begin_batch();
        let context = axis.dispatch(AxisSignal::BatchEnd);
        assert!(!context.promoted && !context.confirmed);
        assert_eq!(axis.state(), AxisState::Idle);
    }
}
