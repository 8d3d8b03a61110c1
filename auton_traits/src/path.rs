//! Pre-authored motion segment descriptors.
//!
//! The core never generates trajectories; it only hands descriptors to the
//! path executor. Units are meters / radians, matching the authoring tool.

/// Interior waypoint of a path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Terminal pose of a path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading_rad: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, heading_rad: f64) -> Self {
        Self { x, y, heading_rad }
    }
}

/// One authored motion segment, consumed read-only by the sequencer.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDescriptor {
    /// Ordered interior waypoints between the implicit start and `end_pose`.
    pub waypoints: Vec<Waypoint>,
    pub end_pose: Pose,
    /// Follow the segment in reverse (robot drives backwards).
    pub inverted: bool,
    /// Optional velocity cap in m/s; `None` uses the follower's default.
    pub max_velocity: Option<f64>,
}

impl PathDescriptor {
    pub fn new(end_pose: Pose) -> Self {
        Self {
            waypoints: Vec::new(),
            end_pose,
            inverted: false,
            max_velocity: None,
        }
    }

    pub fn with_waypoint(mut self, x: f64, y: f64) -> Self {
        self.waypoints.push(Waypoint::new(x, y));
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn with_max_velocity(mut self, mps: f64) -> Self {
        self.max_velocity = Some(mps);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_waypoints_in_order() {
        let p = PathDescriptor::new(Pose::new(2.0, 0.0, 0.0))
            .with_waypoint(0.5, 0.0)
            .with_waypoint(1.0, 0.25)
            .with_max_velocity(0.8);
        assert_eq!(p.waypoints.len(), 2);
        assert_eq!(p.waypoints[0], Waypoint::new(0.5, 0.0));
        assert_eq!(p.waypoints[1], Waypoint::new(1.0, 0.25));
        assert_eq!(p.max_velocity, Some(0.8));
        assert!(!p.inverted);
    }
}
