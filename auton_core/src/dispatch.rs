//! Halt-then-callback handoff for path segment completion.

use auton_traits::{Drivetrain, PathDescriptor, PathExecutor};

/// One-shot continuation bound to exactly one path submission.
///
/// The reference behavior is a closure run after the robot is halted; a
/// closure capturing the sequencer cannot be stored here, so the
/// continuation is a token the sequencer interprets on the tick the path
/// finishes. Applied at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCompletion {
    /// Opening segment done: enable target tracking.
    OpeningFinished,
    /// Pickup segment done: stow the intake and arm the return stage.
    PickupFinished,
    /// Return segment done: the routine is over.
    ReturnFinished,
}

/// Wraps path submission with the halt-then-callback contract: when the
/// executor reports the segment finished, the drivetrain is commanded to
/// zero *before* the pending completion is surfaced.
#[derive(Debug, Default)]
pub struct CompletionDispatcher {
    pending: Option<StageCompletion>,
}

impl CompletionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit `path` and bind `on_complete` to it. At most one submission
    /// may be outstanding; a second one while pending is a sequencing bug.
    pub fn submit(
        &mut self,
        executor: &mut dyn PathExecutor,
        path: &PathDescriptor,
        on_complete: StageCompletion,
    ) {
        debug_assert!(
            self.pending.is_none(),
            "path submitted while another segment is outstanding"
        );
        executor.submit(path);
        self.pending = Some(on_complete);
    }

    /// Observe the executor; on the tick the outstanding segment finishes,
    /// halt the drivetrain and hand back the completion exactly once.
    pub fn poll(
        &mut self,
        executor: &dyn PathExecutor,
        drivetrain: &mut dyn Drivetrain,
    ) -> Option<StageCompletion> {
        if self.pending.is_some() && !executor.is_active() {
            drivetrain.drive(0.0, 0.0);
            self.pending.take()
        } else {
            None
        }
    }

    /// True while a submitted segment has not yet completed.
    pub fn has_outstanding(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending completion without running it (re-init path).
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auton_traits::Pose;

    #[derive(Default)]
    struct ScriptedExecutor {
        active_for: u32,
        submissions: u32,
    }
    impl PathExecutor for ScriptedExecutor {
        fn submit(&mut self, _path: &PathDescriptor) {
            self.submissions += 1;
            self.active_for = 2;
        }
        fn is_active(&self) -> bool {
            self.active_for > 0
        }
        fn reset_state(&mut self) {}
    }
    impl ScriptedExecutor {
        fn advance(&mut self) {
            self.active_for = self.active_for.saturating_sub(1);
        }
    }

    #[derive(Default)]
    struct SpyDrive {
        commands: Vec<(f64, f64)>,
    }
    impl Drivetrain for SpyDrive {
        fn drive(&mut self, rotation: f64, forward: f64) {
            self.commands.push((rotation, forward));
        }
        fn set_ramp_limit(&mut self, _rate: f64) {}
    }

    #[test]
    fn completion_fires_once_after_halt() {
        let mut exec = ScriptedExecutor::default();
        let mut drive = SpyDrive::default();
        let mut disp = CompletionDispatcher::new();
        let path = PathDescriptor::new(Pose::new(1.0, 0.0, 0.0));

        disp.submit(&mut exec, &path, StageCompletion::OpeningFinished);
        assert!(disp.has_outstanding());

        // Still driving: nothing fires, no halt issued.
        assert_eq!(disp.poll(&exec, &mut drive), None);
        exec.advance();
        assert_eq!(disp.poll(&exec, &mut drive), None);
        assert!(drive.commands.is_empty());

        exec.advance();
        assert_eq!(
            disp.poll(&exec, &mut drive),
            Some(StageCompletion::OpeningFinished)
        );
        assert_eq!(drive.commands, vec![(0.0, 0.0)]);
        assert!(!disp.has_outstanding());

        // Exactly once.
        assert_eq!(disp.poll(&exec, &mut drive), None);
        assert_eq!(drive.commands.len(), 1);
    }

    #[test]
    fn clear_drops_the_pending_completion() {
        let mut exec = ScriptedExecutor::default();
        let mut drive = SpyDrive::default();
        let mut disp = CompletionDispatcher::new();
        let path = PathDescriptor::new(Pose::new(1.0, 0.0, 0.0));

        disp.submit(&mut exec, &path, StageCompletion::ReturnFinished);
        disp.clear();
        exec.advance();
        exec.advance();
        assert_eq!(disp.poll(&exec, &mut drive), None);
    }
}
