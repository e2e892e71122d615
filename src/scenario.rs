use crate::grid::{Direction, Location};
use crate::obstacle::{BottomlessPit, Camera, Fence, Guard, Obstacle, Sensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_FENCE_LENGTH: i32 = 4;
const MIN_SENSOR_RANGE: f64 = 0.5;
const MAX_SENSOR_RANGE: f64 = 3.0;

/// Generate `count` random obstacles anchored in `[-spread, spread]` on both axes.
///
/// The same seed always produces the same obstacles, in the same order.
pub fn generate(count: usize, spread: i32, seed: Option<u64>) -> Vec<Obstacle> {
    // Use seed for reproducible results
    let mut rng = if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };
    let spread = spread.saturating_abs();

    (0..count)
        .map(|_| random_obstacle(&mut rng, spread))
        .collect()
}

fn random_obstacle(rng: &mut StdRng, spread: i32) -> Obstacle {
    let anchor = Location::new(
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
    );

    match rng.gen_range(0..5) {
        0 => Guard::new(anchor).into(),
        1 => {
            let length = rng.gen_range(1..=MAX_FENCE_LENGTH);
            let end = if rng.gen_bool(0.5) {
                Location::new(anchor.x.saturating_add(length), anchor.y)
            } else {
                Location::new(anchor.x, anchor.y.saturating_add(length))
            };
            Fence::new(anchor, end).into()
        }
        2 => {
            let range = rng.gen_range(MIN_SENSOR_RANGE..MAX_SENSOR_RANGE);
            match Sensor::new(anchor, range) {
                Ok(sensor) => sensor.into(),
                // Ranges drawn here are always positive.
                Err(_) => Guard::new(anchor).into(),
            }
        }
        3 => {
            let facing = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            Camera::new(anchor, facing).into()
        }
        _ => BottomlessPit::new(anchor).into(),
    }
}
