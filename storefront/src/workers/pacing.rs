use std::thread;
use std::time::Duration;

use rand::Rng;

/// Random pause taken by a worker after each item.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    max_delay: Duration,
}

impl Pacer {
    pub fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }

    /// Sleeps a uniformly random duration in `[0, max_delay)`. A zero bound returns at once.
    pub fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    fn next_delay(&self) -> Duration {
        let max_micros = self.max_delay.as_micros().min(u64::MAX as u128) as u64;
        if max_micros == 0 {
            return Duration::ZERO;
        }

        Duration::from_micros(rand::thread_rng().gen_range(0..max_micros))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_stay_below_the_bound() {
        let pacer = Pacer::new(Duration::from_millis(3));
        for _ in 0..1000 {
            assert!(pacer.next_delay() < Duration::from_millis(3));
        }
    }

    #[test]
    fn zero_bound_never_sleeps() {
        let pacer = Pacer::new(Duration::ZERO);
        assert_eq!(pacer.next_delay(), Duration::ZERO);
        pacer.pause();
    }
}
