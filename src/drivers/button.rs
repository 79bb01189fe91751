/// Turns the raw edges of an active-low push button into one accepted press
/// per physical press.
///
/// A falling edge only counts when the button is armed. It is armed at
/// start-up and re-armed once the line has stayed released for `settle_ms`.
/// Falling edges from contact bounce on press or release are rejected.
#[derive(Clone, Copy, Debug)]
pub struct PressFilter {
    settle_ms: u64,
    armed: bool,
    released_at_ms: Option<u64>,
}

impl PressFilter {
    pub const fn new(settle_ms: u64) -> Self {
        Self {
            settle_ms,
            armed: true,
            released_at_ms: None,
        }
    }

    /// Returns true when this edge is a new press.
    pub fn on_falling_edge(&mut self, now_ms: u64) -> bool {
        let settled = self
            .released_at_ms
            .take()
            .is_some_and(|released| now_ms.saturating_sub(released) >= self.settle_ms);
        if self.armed || settled {
            self.armed = false;
            return true;
        }
        false
    }

    /// Records the line returning high.
    pub fn on_release(&mut self, now_ms: u64) {
        self.released_at_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_is_accepted() {
        let mut filter = PressFilter::new(40);
        assert!(filter.on_falling_edge(0));
    }

    #[test]
    fn bounce_on_press_and_release_yields_one_press() {
        let mut filter = PressFilter::new(40);

        assert!(filter.on_falling_edge(0));
        filter.on_release(1);
        assert!(!filter.on_falling_edge(2));

        // Held low, then released with bounce.
        filter.on_release(150);
        assert!(!filter.on_falling_edge(152));
        filter.on_release(153);
        assert!(!filter.on_falling_edge(160));
        filter.on_release(161);

        assert!(filter.on_falling_edge(500));
    }

    #[test]
    fn held_button_never_repeats() {
        let mut filter = PressFilter::new(40);
        assert!(filter.on_falling_edge(0));
        assert!(!filter.on_falling_edge(1_000));
        assert!(!filter.on_falling_edge(2_000));
    }

    #[test]
    fn press_exactly_at_settle_time_is_accepted() {
        let mut filter = PressFilter::new(40);
        assert!(filter.on_falling_edge(0));
        filter.on_release(100);
        assert!(filter.on_falling_edge(140));
    }
}
