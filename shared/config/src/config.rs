use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: Simulation,
    pub flocking: Flocking,
    pub wander: Wander,
    pub hide: Hide,
    pub path: PathFollowing,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Simulation {
    /// Random if not set
    pub random_seed: Option<u64>,
    pub ticks_per_second: u32,
    /// Agents are scattered in (0,0)..world_size
    pub world_size: (f32, f32),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Flocking {
    pub count: usize,
    pub max_speed: f32,
    pub bounding_radius: f32,
    pub proximity_radius: f32,
    /// Full cone angle
    pub proximity_angle_degrees: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub max_linear_acceleration: f32,
    pub max_angular_acceleration: f32,
    /// Below this magnitude the blended flocking output is ignored in favour of wandering
    pub priority_epsilon: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Wander {
    pub max_speed: f32,
    pub max_linear_acceleration: f32,
    pub max_angular_acceleration: f32,
    pub wander_offset: f32,
    pub wander_radius: f32,
    pub wander_rate: f32,
    pub wander_orientation: f32,
    pub max_rotation: f32,
    pub align_tolerance: f32,
    pub deceleration_radius: f32,
    pub time_to_target: f32,
    pub face_enabled: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Hide {
    pub obstacle_count: usize,
    pub obstacle_radius: f32,
    /// Hiding only happens while the threat is closer than this
    pub threat_radius: f32,
    pub distance_from_boundary: f32,
    pub max_speed: f32,
    pub max_linear_acceleration: f32,
    pub deceleration_radius: f32,
    pub arrival_tolerance: f32,
    pub time_to_target: f32,
    pub collision_avoidance_acceleration: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PathFollowing {
    pub waypoints: Vec<(f32, f32)>,
    pub path_offset: f32,
    pub prediction_time: f32,
    pub max_speed: f32,
    pub max_linear_acceleration: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            random_seed: None,
            ticks_per_second: 60,
            world_size: (640.0, 480.0),
        }
    }
}

impl Default for Flocking {
    fn default() -> Self {
        Self {
            count: 60,
            max_speed: 50.0,
            bounding_radius: 8.0,
            proximity_radius: 150.0,
            proximity_angle_degrees: 270.0,
            alignment_weight: 2.0,
            cohesion_weight: 45.0,
            separation_weight: 350.0,
            max_linear_acceleration: 500.0,
            max_angular_acceleration: 500.0,
            priority_epsilon: 0.0001,
        }
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            max_speed: 80.0,
            max_linear_acceleration: 50.0,
            max_angular_acceleration: 10.0,
            wander_offset: 90.0,
            wander_radius: 40.0,
            wander_rate: std::f32::consts::PI / 5.0,
            wander_orientation: 10.0,
            max_rotation: 5.0,
            align_tolerance: 0.001,
            deceleration_radius: 5.0,
            time_to_target: 0.1,
            face_enabled: true,
        }
    }
}

impl Default for Hide {
    fn default() -> Self {
        Self {
            obstacle_count: 6,
            obstacle_radius: 20.0,
            threat_radius: 200.0,
            distance_from_boundary: 35.0,
            max_speed: 150.0,
            max_linear_acceleration: 200.0,
            deceleration_radius: 80.0,
            arrival_tolerance: 0.001,
            time_to_target: 0.1,
            collision_avoidance_acceleration: 500.0,
        }
    }
}

impl Default for PathFollowing {
    fn default() -> Self {
        Self {
            waypoints: vec![
                (100.0, 100.0),
                (540.0, 100.0),
                (540.0, 380.0),
                (320.0, 440.0),
                (100.0, 380.0),
            ],
            path_offset: 20.0,
            prediction_time: 0.0,
            max_speed: 100.0,
            max_linear_acceleration: 300.0,
        }
    }
}
