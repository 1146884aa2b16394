use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::debug;

/// Returns one flag per square, `true` where a mine sits. Exactly
/// `min(mines, squares)` flags are set and the layout depends only on `seed`.
pub fn place_mines(squares: usize, mines: usize, seed: u64) -> Vec<bool> {
    let mines = mines.min(squares);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout = vec![false; squares];
    for pos in index::sample(&mut rng, squares, mines) {
        layout[pos] = true;
    }
    debug!(squares, mines, seed, "mines placed");
    layout
}

/// Where each new level gets its seed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedSource {
    /// Every level is laid out from the same seed.
    Fixed(u64),
    /// Counts idle ticks while waiting on the player; the count is mixed with
    /// the clock when a seed is drawn.
    Entropy { ticks: u64 },
}

impl SeedSource {
    pub fn entropy() -> Self { SeedSource::Entropy { ticks: 0 } }

    pub fn tick(&mut self) {
        if let SeedSource::Entropy { ticks } = self {
            *ticks = ticks.wrapping_add(1);
        }
    }

    pub fn next_seed(&mut self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => *seed,
            SeedSource::Entropy { ticks } => {
                let seed = mix(*ticks ^ seed_from_time());
                *ticks = ticks.wrapping_add(1);
                seed
            }
        }
    }
}

impl Default for SeedSource {
    fn default() -> Self { Self::entropy() }
}

pub fn seed_from_time() -> u64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    now.as_nanos() as u64 ^ now.as_secs().rotate_left(32)
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
