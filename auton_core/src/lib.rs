#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Autonomous mission core (hardware-agnostic).
//!
//! This crate sequences a staged autonomous routine at a fixed control-period
//! cadence. All hardware interactions go through the `auton_traits`
//! collaborator traits; nothing here blocks, sleeps, or touches a clock.
//!
//! ## Architecture
//!
//! - **Turn control**: PI heading session with deadband boost and dwell
//!   debounce (`turn` module)
//! - **Convergence**: cumulative-success alignment gate (`convergence`)
//! - **Completion dispatch**: halt-then-callback path handoff (`dispatch`)
//! - **Sequencing**: explicit `Stage` state machine (`sequencer`)
//! - **Paths**: authored eight-ball segments (`paths`)
//! - **Pacing**: clock-driven init/tick loop for hosts (`runner`)
//!
//! ## Tick contract
//!
//! The host calls `init()` once, then `tick()` every control period until
//! `TickStatus::Done`. Each tick commands the drivetrain from at most one
//! owner and always services the shooter's regulation loop. The tick path is
//! infallible: collaborators report through sentinel values, never errors.

pub mod config;
pub mod convergence;
pub mod dispatch;
pub mod error;
pub mod mocks;
pub mod paths;
pub mod runner;
pub mod sequencer;
pub mod status;
pub mod turn;

pub use config::{AlignmentCfg, MissionVariant, TurnCfg};
pub use convergence::ConvergenceGate;
pub use dispatch::{CompletionDispatcher, StageCompletion};
pub use error::{BuildError, Result};
pub use paths::MissionPaths;
pub use runner::{MissionOutcome, RunnerCfg, run_mission};
pub use sequencer::{MissionSequencer, SequencerBuilder, Stage};
pub use status::TickStatus;
pub use turn::{TurnController, TurnStep};
