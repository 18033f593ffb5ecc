//! Shared inputs for waypoint benchmark suites.

#![forbid(unsafe_code)]

use waypoint_harness::worlds::monad::StageConstants;
use waypoint_kernel::carrier::key::{KeyWriter, StateKey};

/// The well-known two-deep burrow.
pub const BURROW_EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########
";

/// A `size` x `size` chiton cavern of pseudo-random risk levels 1 to 9.
///
/// Deterministic for a given seed so runs are comparable across machines.
#[must_use]
pub fn chiton_cavern(size: usize, seed: u64) -> String {
    let mut state = seed;
    let mut out = String::with_capacity(size * (size + 1));
    for _ in 0..size {
        for _ in 0..size {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            #[allow(clippy::cast_possible_truncation)]
            let digit = ((state >> 33) % 9 + 1) as u8;
            out.push(char::from(b'0' + digit));
        }
        out.push('\n');
    }
    out
}

/// Fourteen-stage monad program made of seven push/pop block pairs.
#[must_use]
pub fn monad_program() -> String {
    const OFFSETS: [i64; 7] = [-4, -1, -6, 4, -12, 1, -5];
    let stages: Vec<StageConstants> = OFFSETS
        .iter()
        .flat_map(|&offset| {
            [
                StageConstants {
                    divisor: 1,
                    add_x: 12,
                    add_y: 4,
                },
                StageConstants {
                    divisor: 26,
                    add_x: offset,
                    add_y: 5,
                },
            ]
        })
        .collect();
    StageConstants::program_source(&stages)
}

/// `n` distinct keys of the same width as a chiton position.
#[must_use]
pub fn position_keys(n: u32) -> Vec<StateKey> {
    (0..n)
        .map(|i| {
            let mut w = KeyWriter::with_capacity(8);
            w.put_u32(i / 64).put_u32(i % 64);
            w.finish()
        })
        .collect()
}
