//! Per-tick status returned from the sequencer.

/// Outcome of a single `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Keep calling `tick()` every control period.
    Running,
    /// Routine finished; further ticks are harmless no-ops (shooter
    /// maintenance only).
    Done,
}
