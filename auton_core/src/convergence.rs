//! Debounce of the per-frame alignment verdict into a one-shot lock.

/// Counts successful alignment frames toward a latch.
///
/// Policy: **cumulative success threshold**. The counter increments on every
/// successful frame and is left unchanged — not reset — on a failed one, so
/// the gate counts cumulative rather than strictly consecutive successes.
/// This matches the deployed routine's behavior and is deliberate; see the
/// dedicated test before "fixing" it to a consecutive debounce.
#[derive(Debug, Clone)]
pub struct ConvergenceGate {
    threshold: u32,
    count: u32,
    latched: bool,
}

impl ConvergenceGate {
    /// `threshold` is the cumulative success count required to latch.
    pub fn new(threshold: u32) -> Self {
        debug_assert!(threshold >= 1, "threshold must be at least 1");
        Self {
            threshold,
            count: 0,
            latched: false,
        }
    }

    /// Feed one frame's verdict; returns the latched state after the update.
    /// Once latched, stays latched until `reset()`.
    pub fn observe(&mut self, success: bool) -> bool {
        if self.latched {
            return true;
        }
        if success {
            self.count += 1;
            if self.count >= self.threshold {
                self.latched = true;
            }
        }
        self.latched
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Successful frames seen so far; monotonic until `reset()`.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.latched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_frames_do_not_reset_the_count() {
        let mut gate = ConvergenceGate::new(3);
        assert!(!gate.observe(true));
        assert!(!gate.observe(false));
        assert_eq!(gate.count(), 1);
        assert!(!gate.observe(true));
        assert!(gate.observe(true));
        assert!(gate.is_latched());
    }

    #[test]
    fn latch_is_sticky_until_reset() {
        let mut gate = ConvergenceGate::new(1);
        assert!(gate.observe(true));
        assert!(gate.observe(false));
        gate.reset();
        assert!(!gate.is_latched());
        assert_eq!(gate.count(), 0);
    }
}
