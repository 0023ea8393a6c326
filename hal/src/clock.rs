pub type Instant = fugit::TimerInstantU64<1000>;
pub type Duration = fugit::MillisDurationU64;

pub trait Monotonic {
    fn now(&self) -> Instant;
}

impl<M: Monotonic + ?Sized> Monotonic for &M {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Elapsed time from `since` to `now`, zero if the clock went backwards.
pub fn elapsed(now: Instant, since: Instant) -> Duration {
    now.checked_duration_since(since).unwrap_or(Duration::from_ticks(0))
}

mod test {
    #[test]
    fn test_elapsed() {
        use super::{elapsed, Duration, Instant};

        let since = Instant::from_ticks(100);
        assert_eq!(elapsed(Instant::from_ticks(115), since), Duration::millis(15));
        assert_eq!(elapsed(Instant::from_ticks(90), since), Duration::millis(0));
    }
}
