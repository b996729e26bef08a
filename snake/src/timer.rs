use std::time::Duration;

/// Countdown that expires once per period and restarts itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpirationTimer {
    period: Duration,
    remaining: Duration,
}

impl ExpirationTimer {
    /// Creates a timer that first expires one full period from now.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            remaining: period,
        }
    }

    /// Length of one period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next expiration.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Restarts the current period.
    pub fn reset(&mut self) {
        self.remaining = self.period;
    }

    /// Advances the timer and reports how many periods expired.
    ///
    /// A zero period never expires.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }

        if dt < self.remaining {
            self.remaining -= dt;
            return 0;
        }

        let overshoot = (dt - self.remaining).as_nanos();
        let period = self.period.as_nanos();
        self.remaining = self.period - duration_from_nanos(overshoot % period);
        u32::try_from(overshoot / period).map_or(u32::MAX, |extra| extra.saturating_add(1))
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}
