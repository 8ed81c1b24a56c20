use std::time::{Duration, Instant};

/// Turns the event loop's frequent ticks into whole-second countdown steps.
/// Re-arming on every new word keeps each word's first second a full second.
pub struct SecondTimer {
    period: Duration,
    next: Option<Instant>,
}

impl Default for SecondTimer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl SecondTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// True once per elapsed period. Call repeatedly to catch up after a stall.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now >= due => {
                self.next = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_never_fires() {
        let mut timer = SecondTimer::default();
        let now = Instant::now();
        assert!(!timer.poll(now + Duration::from_secs(5)));
    }

    #[test]
    fn fires_once_per_second() {
        let mut timer = SecondTimer::default();
        let start = Instant::now();
        timer.arm(start);

        assert!(!timer.poll(start + Duration::from_millis(900)));
        assert!(timer.poll(start + Duration::from_millis(1000)));
        assert!(!timer.poll(start + Duration::from_millis(1500)));
        assert!(timer.poll(start + Duration::from_millis(2100)));
    }

    #[test]
    fn catches_up_after_stall() {
        let mut timer = SecondTimer::default();
        let start = Instant::now();
        timer.arm(start);

        let later = start + Duration::from_millis(3200);
        let mut fired = 0;
        while timer.poll(later) {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn rearm_restarts_the_second() {
        let mut timer = SecondTimer::default();
        let start = Instant::now();
        timer.arm(start);
        timer.arm(start + Duration::from_millis(800));
        assert!(!timer.poll(start + Duration::from_millis(1200)));
        assert!(timer.poll(start + Duration::from_millis(1800)));
        timer.disarm();
        assert!(!timer.is_armed());
    }
}
