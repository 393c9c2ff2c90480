//! Random stat generation and the level-up roll simulator.

pub mod rng;
pub mod roller;
pub mod sampler;

pub use rng::{RandomSource, Rng};
pub use roller::{generate_artifact, roll_events_remaining, roll_to_max, roll_value};
pub use sampler::{initial_substat_count, random_main_stat, random_new_substat};
