use common::random::SmallRngExt;
use common::*;
use steering::behaviour::Wander;
use steering::WeakSteerable;

/// The configured seed, or a fresh one that is logged so the run can be repeated
pub fn random_seed(config: &config::Simulation) -> u64 {
    match config.random_seed {
        Some(seed) => seed,
        None => {
            let seed = thread_rng().gen();
            info!("generated random seed"; "seed" => seed);
            seed
        }
    }
}

/// Random stream for the `index`th consumer in a scenario
pub fn rng_for(seed: u64, index: usize) -> SmallRng {
    SmallRng::for_index(seed, index)
}

pub fn wander_from_config(
    owner: WeakSteerable<Vec2>,
    config: &config::Wander,
    rng: SmallRng,
) -> Wander<Vec2> {
    Wander::with_rng(owner, rng)
        .with_max_linear_acceleration(config.max_linear_acceleration)
        .with_max_angular_acceleration(config.max_angular_acceleration)
        .with_wander_offset(config.wander_offset)
        .with_wander_radius(config.wander_radius)
        .with_wander_rate(config.wander_rate)
        .with_wander_orientation(config.wander_orientation)
        .with_max_rotation(config.max_rotation)
        .with_align_tolerance(config.align_tolerance)
        .with_deceleration_radius(config.deceleration_radius)
        .with_time_to_target(config.time_to_target)
        .with_face_enabled(config.face_enabled)
}
