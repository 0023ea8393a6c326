use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::timer::CountDown;
use fugit::MicrosDurationU32;

/// Busy-waits on any count-down timer taking microsecond durations.
pub struct CountDownDelay<T> {
    timer: T,
}

impl<T: CountDown> CountDownDelay<T>
where
    T::Time: From<MicrosDurationU32>,
{
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub fn release(self) -> T {
        self.timer
    }
}

impl<T: CountDown> DelayUs<u32> for CountDownDelay<T>
where
    T::Time: From<MicrosDurationU32>,
{
    fn delay_us(&mut self, us: u32) {
        if us == 0 {
            return;
        }
        self.timer.start(MicrosDurationU32::micros(us));
        nb::block!(self.timer.wait()).ok();
    }
}

impl<T: CountDown> DelayMs<u32> for CountDownDelay<T>
where
    T::Time: From<MicrosDurationU32>,
{
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

mod test {
    #[cfg(test)]
    struct Timer {
        started: [u32; 4],
        count: usize,
    }

    #[cfg(test)]
    impl embedded_hal::timer::CountDown for Timer {
        type Time = fugit::MicrosDurationU32;

        fn start<T: Into<Self::Time>>(&mut self, count: T) {
            self.started[self.count] = count.into().ticks();
            self.count += 1;
        }

        fn wait(&mut self) -> nb::Result<(), void::Void> {
            Ok(())
        }
    }

    #[test]
    fn test_count_down_delay() {
        use embedded_hal::blocking::delay::{DelayMs, DelayUs};

        use super::CountDownDelay;

        let mut delay = CountDownDelay::new(Timer { started: [0; 4], count: 0 });
        delay.delay_us(0);
        delay.delay_us(150);
        delay.delay_ms(2);
        let timer = delay.release();
        assert_eq!(timer.count, 3);
        assert_eq!(&timer.started[..3], &[150, 1000, 1000]);
    }
}
