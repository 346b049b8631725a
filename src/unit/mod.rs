use std::thread;
use std::time::Duration;

/// Default delay per trial division step.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1);

/// Trial division against every candidate in `2..n`, sleeping before each step
/// so that one call costs roughly `n * step_delay`.
pub fn is_prime_slow(n: usize, step_delay: Duration) -> bool {
    if n < 2 {
        return false;
    }
    for i in 2..n {
        if !step_delay.is_zero() {
            thread::sleep(step_delay);
        }
        if n % i == 0 {
            return false;
        }
    }
    true
}

pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// The benchmark's unit of work: a deliberately slow primality test.
#[derive(Debug, Clone, Copy)]
pub struct SlowPrime {
    step_delay: Duration,
}

impl SlowPrime {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn check(&self, n: usize) -> bool {
        is_prime_slow(n, self.step_delay)
    }

    /// Borrow as a closure the worker pool can share across threads.
    pub fn as_fn(&self) -> impl Fn(usize) -> bool + Sync + '_ {
        move |n| self.check(n)
    }
}

impl Default for SlowPrime {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}
