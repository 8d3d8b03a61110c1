//! Authored path segments for each mission variant.
//!
//! Geometry comes straight from the path-authoring tool; the core treats
//! these as opaque descriptors for the executor.

use crate::config::MissionVariant;
use auton_traits::{PathDescriptor, Pose};

/// The three segments of a routine, in execution order.
#[derive(Debug, Clone)]
pub struct MissionPaths {
    /// Opening segment run from `init()`; ends in shooting position.
    pub opening: PathDescriptor,
    /// Post-turn segment through the ball group, velocity-capped so the
    /// intake can keep up.
    pub pickup: PathDescriptor,
    /// Reverse segment back to the shooting position.
    pub return_home: PathDescriptor,
}

impl MissionPaths {
    pub fn for_variant(variant: MissionVariant) -> Self {
        match variant {
            MissionVariant::EightBall => Self::eight_ball(),
        }
    }

    /// Eight-ball routine: back up 1 m off the line, turn, drive 2 m through
    /// the trench pickup, reverse 3 m back to the start.
    pub fn eight_ball() -> Self {
        Self {
            opening: PathDescriptor::new(Pose::new(1.0, 0.0, 0.0))
                .inverted(true)
                .with_waypoint(0.75, 0.0),
            pickup: PathDescriptor::new(Pose::new(2.0, 0.0, 0.0))
                .with_waypoint(1.0, 0.0)
                .with_max_velocity(0.8),
            return_home: PathDescriptor::new(Pose::new(3.0, 0.0, 0.0))
                .inverted(true)
                .with_waypoint(2.5, 0.0),
        }
    }
}
