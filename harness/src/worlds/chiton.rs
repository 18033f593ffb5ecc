//! Chiton: lowest total risk across a cavern of digits.
//!
//! Entering a cell costs its risk level. Part 2 tiles the cavern 5x5, each
//! tile one step riskier per tile of distance from the origin, wrapping
//! 9 back to 1.

use waypoint_kernel::carrier::codec::StateCodec;
use waypoint_kernel::carrier::key::{CodecError, KeyWriter, StateKey};
use waypoint_search::contract::{SearchWorld, Transition};
use waypoint_search::relax::shortest_distances;
use waypoint_search::search::best_first_search;

use crate::contract::{ParseError, Part, PartOutcome, Puzzle};
use crate::grid::{Coord, Grid};
use crate::policy::{ChitonSolver, RunConfig};
use crate::runner::HarnessError;
use crate::worlds::answer_from_search;

const TILE_FACTOR: usize = 5;

/// Search world over cavern positions. Every risk is 1..=9, so Manhattan
/// distance to the exit never overestimates.
#[derive(Debug, Clone)]
pub struct Cavern {
    risk: Grid<u8>,
}

impl Cavern {
    /// # Errors
    ///
    /// Returns [`ParseError`] on a malformed grid or a risk level of 0.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            risk: Grid::parse_digits(input, 1..=9)?,
        })
    }

    /// The cavern repeated `factor` (at least 1) times in each direction.
    fn tiled(&self, factor: usize) -> Self {
        let (h, w) = (self.risk.height(), self.risk.width());
        let risk = Grid::from_fn(h * factor, w * factor, |at| {
            let base = self
                .risk
                .get(Coord::new(at.row % h, at.col % w))
                .unwrap_or(1);
            let bump = (at.row / h + at.col / w) % 9;
            (base - 1 + bump as u8) % 9 + 1
        });
        Self { risk }
    }

    #[must_use]
    pub fn entrance(&self) -> Coord {
        Coord::new(0, 0)
    }

    #[must_use]
    pub fn exit(&self) -> Coord {
        self.risk.last()
    }

    fn coord_field(value: u32, limit: usize, field: &'static str) -> Result<usize, CodecError> {
        let v = value as usize;
        if v < limit {
            Ok(v)
        } else {
            Err(CodecError::InvalidField {
                field,
                value: i64::from(value),
            })
        }
    }
}

impl StateCodec for Cavern {
    type Config = Coord;

    fn encode(&self, at: &Coord) -> StateKey {
        let mut w = KeyWriter::with_capacity(8);
        w.put_u32(at.row as u32).put_u32(at.col as u32);
        w.finish()
    }

    fn decode(&self, key: &StateKey) -> Result<Coord, CodecError> {
        let mut r = key.reader();
        let row = Self::coord_field(r.u32()?, self.risk.height(), "row")?;
        let col = Self::coord_field(r.u32()?, self.risk.width(), "col")?;
        r.finish()?;
        Ok(Coord::new(row, col))
    }
}

impl SearchWorld for Cavern {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "chiton"
    }

    fn expand(&self, at: &Coord) -> Vec<Transition<Coord>> {
        self.risk
            .neighbors(*at)
            .filter_map(|next| {
                let risk = self.risk.get(next)?;
                Some(Transition::new(u64::from(risk), next))
            })
            .collect()
    }

    fn heuristic(&self, at: &Coord) -> u64 {
        at.manhattan(self.exit()) as u64
    }

    fn is_goal(&self, at: &Coord) -> bool {
        *at == self.exit()
    }
}

/// The chiton puzzle: part 1 the cavern as given, part 2 tiled.
#[derive(Debug, Clone)]
pub struct ChitonPuzzle {
    cavern: Cavern,
    tiled: Cavern,
}

impl ChitonPuzzle {
    #[must_use]
    pub fn cavern(&self, part: Part) -> &Cavern {
        match part {
            Part::One => &self.cavern,
            Part::Two => &self.tiled,
        }
    }
}

impl Puzzle for ChitonPuzzle {
    const PUZZLE_ID: &'static str = "chiton";

    fn parse(input: &str) -> Result<Self, ParseError> {
        let cavern = Cavern::parse(input)?;
        let tiled = cavern.tiled(TILE_FACTOR);
        Ok(Self { cavern, tiled })
    }

    fn solve_part(&self, part: Part, config: &RunConfig) -> Result<PartOutcome, HarnessError> {
        let cavern = self.cavern(part);
        match config.chiton_solver {
            ChitonSolver::BestFirst => {
                let result = best_first_search(cavern, cavern.entrance(), &config.search)?;
                answer_from_search(part, &result)
            }
            ChitonSolver::Relax => {
                let result = shortest_distances(cavern, cavern.entrance(), &config.relax)?;
                if !result.report.converged {
                    return Err(HarnessError::BudgetExceeded {
                        part: part.number(),
                    });
                }
                let answer = result
                    .cost_to(&cavern.encode(&cavern.exit()))
                    .ok_or(HarnessError::Unreachable {
                        part: part.number(),
                    })?;
                Ok(PartOutcome {
                    answer,
                    report_digest: result.report.digest()?,
                })
            }
        }
    }
}
