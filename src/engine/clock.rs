/// Fixed-cadence gate over a wrapping millisecond counter.
///
/// Each accepted tick advances the start by exactly one interval, so a
/// late poll is followed by back-to-back ticks until the clock catches up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickClock {
    start_ms: u32,
    interval_ms: u32,
}

impl TickClock {
    pub const fn new(start_ms: u32, interval_ms: u32) -> Self {
        Self {
            start_ms,
            interval_ms,
        }
    }

    /// Returns `true` (and consumes the tick) once an interval has elapsed.
    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.start_ms) < self.interval_ms {
            return false;
        }
        self.start_ms = self.start_ms.wrapping_add(self.interval_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_to_interval() {
        let mut clock = TickClock::new(0, 10);
        assert!(!clock.due(0));
        assert!(!clock.due(9));
        assert!(clock.due(10));
        assert!(!clock.due(15));
        assert!(clock.due(20));
    }

    #[test]
    fn catches_up_one_interval_at_a_time() {
        let mut clock = TickClock::new(0, 10);
        assert!(clock.due(35));
        assert!(clock.due(35));
        assert!(clock.due(35));
        assert!(!clock.due(35));
    }

    #[test]
    fn survives_counter_wrap() {
        let mut clock = TickClock::new(u32::MAX - 4, 10);
        assert!(!clock.due(u32::MAX));
        assert!(clock.due(5));
    }
}
