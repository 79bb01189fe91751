use super::types::TimerKind;

/// One optional deadline per timer kind on a millisecond clock.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimerSchedule {
    deadlines: [Option<u64>; TimerKind::COUNT],
}

impl TimerSchedule {
    pub const fn new() -> Self {
        Self {
            deadlines: [None; TimerKind::COUNT],
        }
    }

    /// Replaces any pending deadline of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, deadline_ms: u64) {
        self.deadlines[kind.index()] = Some(deadline_ms);
    }

    pub fn cancel(&mut self, kind: TimerKind) -> Option<u64> {
        self.deadlines[kind.index()].take()
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.deadlines[kind.index()]
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines.iter().flatten().copied().min()
    }

    /// Removes and returns the earliest timer whose deadline is `<= now_ms`.
    pub fn pop_expired(&mut self, now_ms: u64) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .into_iter()
            .filter_map(|kind| self.deadline(kind).map(|deadline| (deadline, kind)))
            .filter(|(deadline, _)| *deadline <= now_ms)
            .min_by_key(|(deadline, kind)| (*deadline, kind.index()))
            .map(|(_, kind)| kind)?;
        self.deadlines[kind.index()] = None;
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_replaces_pending_deadline() {
        let mut timers = TimerSchedule::new();
        timers.schedule(TimerKind::Inactivity, 15_000);
        timers.schedule(TimerKind::Inactivity, 20_000);
        assert_eq!(timers.deadline(TimerKind::Inactivity), Some(20_000));
        assert_eq!(timers.next_deadline(), Some(20_000));
    }

    #[test]
    fn pop_expired_yields_earliest_first_and_leaves_future_timers() {
        let mut timers = TimerSchedule::new();
        timers.schedule(TimerKind::Inactivity, 15_000);
        timers.schedule(TimerKind::AlertClear, 3_000);
        timers.schedule(TimerKind::ReArm, 2_500);

        assert_eq!(timers.pop_expired(10_000), Some(TimerKind::ReArm));
        assert_eq!(timers.pop_expired(10_000), Some(TimerKind::AlertClear));
        assert_eq!(timers.pop_expired(10_000), None);
        assert_eq!(timers.next_deadline(), Some(15_000));
    }

    #[test]
    fn deadline_is_inclusive_and_cancel_removes() {
        let mut timers = TimerSchedule::new();
        timers.schedule(TimerKind::ReArm, 2_500);
        assert_eq!(timers.pop_expired(2_499), None);
        assert_eq!(timers.pop_expired(2_500), Some(TimerKind::ReArm));

        timers.schedule(TimerKind::AlertClear, 100);
        assert_eq!(timers.cancel(TimerKind::AlertClear), Some(100));
        assert!(!timers.is_pending(TimerKind::AlertClear));
        assert_eq!(timers.next_deadline(), None);
    }
}
