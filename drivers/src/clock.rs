use core::sync::atomic::{AtomicU32, Ordering};

use hal::clock::{Instant, Monotonic};

/// Millisecond counter advanced from a periodic interrupt, e.g. SysTick.
///
/// 32 bit wide so it works without 64 bit atomics, wraps after ~49 days.
pub struct TickClock {
    millis: AtomicU32,
}

impl TickClock {
    pub const fn new() -> Self {
        Self { millis: AtomicU32::new(0) }
    }

    pub fn tick(&self, millis: u32) {
        self.millis.fetch_add(millis, Ordering::Relaxed);
    }
}

impl Monotonic for TickClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.millis.load(Ordering::Relaxed) as u64)
    }
}

mod test {
    #[test]
    fn test_tick_clock() {
        use hal::clock::{Instant, Monotonic};

        use super::TickClock;

        static CLOCK: TickClock = TickClock::new();
        CLOCK.tick(1);
        CLOCK.tick(14);
        assert_eq!(CLOCK.now(), Instant::from_ticks(15));
    }
}
