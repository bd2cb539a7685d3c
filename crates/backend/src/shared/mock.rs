//! Helpers shared by the mock data loaders.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use super::config::get_config;

/// RNG whose stream depends only on `seed` and `salt`, so a given period
/// always regenerates the same records.
pub fn seeded_rng(seed: u64, salt: &[u64]) -> StdRng {
    let mixed = salt.iter().fold(seed, |acc, s| {
        acc.rotate_left(17) ^ s.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    });
    StdRng::seed_from_u64(mixed)
}

/// Sleeps for `mock.delay_ms` to mimic a slow upstream.
pub async fn simulate_latency() {
    let delay = get_config().mock.delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn sample(salt: &[u64]) -> Vec<u32> {
        let mut rng = seeded_rng(7, salt);
        (0..8).map(|_| rng.gen()).collect()
    }

    #[test]
    fn test_same_salt_same_stream() {
        assert_eq!(sample(&[2024, 3]), sample(&[2024, 3]));
        assert_ne!(sample(&[2024, 3]), sample(&[2024, 4]));
    }
}
