//! Monad: the largest and smallest digit strings an ALU program accepts.
//!
//! The program is a sequence of identical 18-instruction blocks, one per
//! input digit, differing only in three literals. Each block is compiled
//! into a [`StageConstants`] record and the search runs on the compiled
//! stages, carrying only `z` between them. Answers are re-checked by
//! running the original program through [`Alu`].

use waypoint_kernel::carrier::codec::StateCodec;
use waypoint_kernel::carrier::key::{CodecError, KeyWriter, StateKey};
use waypoint_search::staged::{staged_search, Preference, StagedOutcome, StagedProblem};

use crate::contract::{ParseError, Part, PartOutcome, Puzzle};
use crate::policy::RunConfig;
use crate::runner::HarnessError;
use crate::worlds::alu::{parse_program, Alu, Instruction, Line, Operand, Register};

const BLOCK_LEN: usize = 18;
const RADIX: i64 = 26;

/// The three literals that vary between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConstants {
    /// `div z <divisor>` (instruction 4).
    pub divisor: i64,
    /// `add x <add_x>` (instruction 5).
    pub add_x: i64,
    /// `add y <add_y>` (instruction 15).
    pub add_y: i64,
}

impl StageConstants {
    /// The exact block these constants were read from.
    fn block(self) -> [Instruction; BLOCK_LEN] {
        use Instruction::{Add, Div, Eql, Inp, Mod, Mul};
        use Operand::{Literal, Register as Reg};
        use Register::{W, X, Y, Z};
        [
            Inp(W),
            Mul(X, Literal(0)),
            Add(X, Reg(Z)),
            Mod(X, Literal(RADIX)),
            Div(Z, Literal(self.divisor)),
            Add(X, Literal(self.add_x)),
            Eql(X, Reg(W)),
            Eql(X, Literal(0)),
            Mul(Y, Literal(0)),
            Add(Y, Literal(RADIX - 1)),
            Mul(Y, Reg(X)),
            Add(Y, Literal(1)),
            Mul(Z, Reg(Y)),
            Mul(Y, Literal(0)),
            Add(Y, Reg(W)),
            Add(Y, Literal(self.add_y)),
            Mul(Y, Reg(X)),
            Add(Z, Reg(Y)),
        ]
    }

    /// ALU source for `stages`, one block per stage.
    #[must_use]
    pub fn program_source(stages: &[Self]) -> String {
        let mut out = String::new();
        for stage in stages {
            for instruction in stage.block() {
                out.push_str(&instruction.to_string());
                out.push('\n');
            }
        }
        out
    }

    /// `z` after this block reads digit `w`.
    ///
    /// Saturates instead of overflowing; a saturated `z` never reaches 0
    /// and every accepted answer is re-run through the interpreter.
    #[must_use]
    pub fn apply(self, z: i64, w: i64) -> i64 {
        let x = z % RADIX + self.add_x;
        let z = z / self.divisor;
        if x == w {
            z
        } else {
            z.saturating_mul(RADIX)
                .saturating_add(w)
                .saturating_add(self.add_y)
        }
    }
}

/// Split `program` into blocks and read each block's constants.
///
/// # Errors
///
/// Returns [`ParseError`] if the program is not a whole number of blocks,
/// a block deviates from the expected shape, or a divisor is not positive.
pub fn compile(program: &[Line]) -> Result<Vec<StageConstants>, ParseError> {
    if program.is_empty() {
        return Err(ParseError::new(1, "program is empty"));
    }
    if program.len() % BLOCK_LEN != 0 {
        let line = program.last().map_or(1, |l| l.number);
        return Err(ParseError::new(
            line,
            format!(
                "program has {} instructions, not a multiple of {BLOCK_LEN}",
                program.len()
            ),
        ));
    }
    program
        .chunks(BLOCK_LEN)
        .map(|block| {
            let literal = |offset: usize| match block[offset].instruction {
                Instruction::Div(Register::Z, Operand::Literal(v))
                | Instruction::Add(Register::X | Register::Y, Operand::Literal(v)) => Some(v),
                _ => None,
            };
            let constants = match (literal(4), literal(5), literal(15)) {
                (Some(divisor), Some(add_x), Some(add_y)) => StageConstants {
                    divisor,
                    add_x,
                    add_y,
                },
                _ => {
                    return Err(ParseError::new(
                        block[0].number,
                        "block constants not found at offsets 4, 5 and 15",
                    ))
                }
            };
            let expected = constants.block();
            if let Some((line, _)) = block
                .iter()
                .zip(&expected)
                .find(|(line, want)| line.instruction != **want)
            {
                return Err(ParseError::new(
                    line.number,
                    "instruction deviates from the block template",
                ));
            }
            if constants.divisor <= 0 {
                return Err(ParseError::new(
                    block[4].number,
                    "block divisor must be positive",
                ));
            }
            Ok(constants)
        })
        .collect()
}

/// The compiled program as a staged decision problem over `z`.
#[derive(Debug, Clone)]
pub struct MonadProblem {
    stages: Vec<StageConstants>,
    /// `bounds[s]`: `z` must be below this at stage `s` to still reach 0.
    /// `None` where no sound bound is known.
    bounds: Vec<Option<i64>>,
}

impl MonadProblem {
    #[must_use]
    pub fn new(stages: Vec<StageConstants>) -> Self {
        // With w + add_y >= 0 everywhere, z stays non-negative and a block can
        // shrink it by at most its divisor, so reaching 0 from stage s needs
        // z < product of the remaining divisors.
        let prunable = stages.iter().all(|s| s.add_y + 1 >= 0);
        let mut bounds = vec![None; stages.len() + 1];
        if prunable {
            let mut product = Some(1i64);
            bounds[stages.len()] = product;
            for (idx, stage) in stages.iter().enumerate().rev() {
                product = product.and_then(|p| p.checked_mul(stage.divisor));
                bounds[idx] = product;
            }
        }
        Self { stages, bounds }
    }

    #[must_use]
    pub fn stages(&self) -> &[StageConstants] {
        &self.stages
    }

    /// Final `z` for a full digit sequence.
    #[must_use]
    pub fn run(&self, digits: &[u8]) -> i64 {
        self.stages
            .iter()
            .zip(digits)
            .fold(0, |z, (stage, &d)| stage.apply(z, i64::from(d)))
    }
}

impl StateCodec for MonadProblem {
    type Config = i64;

    fn encode(&self, z: &i64) -> StateKey {
        let mut w = KeyWriter::with_capacity(8);
        w.put_i64(*z);
        w.finish()
    }

    fn decode(&self, key: &StateKey) -> Result<i64, CodecError> {
        let mut r = key.reader();
        let z = r.i64()?;
        r.finish()?;
        Ok(z)
    }
}

impl StagedProblem for MonadProblem {
    type Choice = u8;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "monad"
    }

    fn stage_count(&self) -> usize {
        self.stages.len()
    }

    fn choices(&self, _stage: usize) -> Vec<u8> {
        (1..=9).collect()
    }

    fn transform(&self, stage: usize, digit: u8, z: &i64) -> i64 {
        self.stages[stage].apply(*z, i64::from(digit))
    }

    fn accepts(&self, z: &i64) -> bool {
        *z == 0
    }

    fn viable(&self, stage: usize, z: &i64) -> bool {
        self.bounds[stage].is_none_or(|bound| *z < bound)
    }
}

/// The monad puzzle: part 1 the largest accepted number, part 2 the smallest.
#[derive(Debug, Clone)]
pub struct MonadPuzzle {
    program: Vec<Line>,
    problem: MonadProblem,
}

impl MonadPuzzle {
    #[must_use]
    pub fn problem(&self) -> &MonadProblem {
        &self.problem
    }

    fn verify(&self, part: Part, digits: &[u8]) -> Result<u64, HarnessError> {
        let failed = |detail: String| HarnessError::VerificationFailed {
            part: part.number(),
            detail,
        };
        let inputs: Vec<i64> = digits.iter().map(|&d| i64::from(d)).collect();
        let alu = Alu::run(&self.program, &inputs).map_err(|e| failed(e.to_string()))?;
        let z = alu.get(Register::Z);
        if z != 0 {
            return Err(failed(format!("interpreter ends with z = {z}")));
        }
        digits
            .iter()
            .try_fold(0u64, |n, &d| n.checked_mul(10)?.checked_add(u64::from(d)))
            .ok_or_else(|| failed("model number does not fit in u64".into()))
    }
}

impl Puzzle for MonadPuzzle {
    const PUZZLE_ID: &'static str = "monad";

    fn parse(input: &str) -> Result<Self, ParseError> {
        let program = parse_program(input)?;
        let problem = MonadProblem::new(compile(&program)?);
        Ok(Self { program, problem })
    }

    fn solve_part(&self, part: Part, config: &RunConfig) -> Result<PartOutcome, HarnessError> {
        let preference = match part {
            Part::One => Preference::Descending,
            Part::Two => Preference::Ascending,
        };
        let result = staged_search(&self.problem, 0, preference, &config.staged)?;
        let answer = match &result.outcome {
            StagedOutcome::Solved(digits) => self.verify(part, digits)?,
            StagedOutcome::NoSolution => {
                return Err(HarnessError::NoSolution {
                    part: part.number(),
                })
            }
            StagedOutcome::FrameBudgetExceeded => {
                return Err(HarnessError::BudgetExceeded {
                    part: part.number(),
                })
            }
        };
        Ok(PartOutcome {
            answer,
            report_digest: result.report.digest()?,
        })
    }
}
