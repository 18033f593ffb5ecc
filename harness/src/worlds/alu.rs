//! A four-register integer ALU and its instruction parser.
//!
//! Used to check staged-search answers against the program they were
//! compiled from, instruction by instruction.

use crate::contract::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    W,
    X,
    Y,
    Z,
}

impl Register {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "w" => Some(Self::W),
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Self::W => 'w',
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::W => 0,
            Self::X => 1,
            Self::Y => 2,
            Self::Z => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Literal(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Inp(Register),
    Add(Register, Operand),
    Mul(Register, Operand),
    Div(Register, Operand),
    Mod(Register, Operand),
    Eql(Register, Operand),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(r) => write!(f, "{}", r.as_char()),
            Self::Literal(v) => write!(f, "{v}"),
        }
    }
}

impl std::fmt::Display for Instruction {
    /// Source form, e.g. `add x -4`. Parses back to the same instruction.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (op, target, operand) = match *self {
            Self::Inp(r) => return write!(f, "inp {}", r.as_char()),
            Self::Add(r, o) => ("add", r, o),
            Self::Mul(r, o) => ("mul", r, o),
            Self::Div(r, o) => ("div", r, o),
            Self::Mod(r, o) => ("mod", r, o),
            Self::Eql(r, o) => ("eql", r, o),
        };
        write!(f, "{op} {} {operand}", target.as_char())
    }
}

/// An instruction and the 1-based input line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub instruction: Instruction,
}

fn parse_instruction(text: &str, line: usize) -> Result<Instruction, ParseError> {
    let mut tokens = text.split_whitespace();
    let op = tokens.next().unwrap_or_default();
    let register = |token: Option<&str>| {
        token
            .and_then(Register::parse)
            .ok_or_else(|| ParseError::new(line, format!("expected a register in {text:?}")))
    };
    let target = register(tokens.next())?;
    if op == "inp" {
        return match tokens.next() {
            None => Ok(Instruction::Inp(target)),
            Some(extra) => Err(ParseError::new(
                line,
                format!("unexpected operand {extra:?}"),
            )),
        };
    }
    let operand = match tokens.next() {
        Some(token) => match Register::parse(token) {
            Some(r) => Operand::Register(r),
            None => Operand::Literal(token.parse().map_err(|_| {
                ParseError::new(line, format!("bad operand {token:?}"))
            })?),
        },
        None => return Err(ParseError::new(line, format!("missing operand in {text:?}"))),
    };
    if let Some(extra) = tokens.next() {
        return Err(ParseError::new(line, format!("unexpected token {extra:?}")));
    }
    match op {
        "add" => Ok(Instruction::Add(target, operand)),
        "mul" => Ok(Instruction::Mul(target, operand)),
        "div" => Ok(Instruction::Div(target, operand)),
        "mod" => Ok(Instruction::Mod(target, operand)),
        "eql" => Ok(Instruction::Eql(target, operand)),
        other => Err(ParseError::new(line, format!("unknown instruction {other:?}"))),
    }
}

/// Parse one instruction per line. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`ParseError`] on an unknown mnemonic, register or operand.
pub fn parse_program(input: &str) -> Result<Vec<Line>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| {
            Ok(Line {
                number: idx + 1,
                instruction: parse_instruction(text, idx + 1)?,
            })
        })
        .collect()
}

/// Execution failure, tagged with the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AluError {
    InputExhausted { line: usize },
    DivideByZero { line: usize },
    /// `mod a b` with `a < 0` or `b <= 0`.
    InvalidModulo { line: usize },
    Overflow { line: usize },
}

impl std::fmt::Display for AluError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputExhausted { line } => write!(f, "line {line}: input exhausted"),
            Self::DivideByZero { line } => write!(f, "line {line}: division by zero"),
            Self::InvalidModulo { line } => write!(f, "line {line}: invalid modulo operands"),
            Self::Overflow { line } => write!(f, "line {line}: arithmetic overflow"),
        }
    }
}

impl std::error::Error for AluError {}

/// Register file after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alu {
    registers: [i64; 4],
}

impl Alu {
    #[must_use]
    pub const fn get(&self, register: Register) -> i64 {
        self.registers[register.index()]
    }

    fn value(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Register(r) => self.get(r),
            Operand::Literal(v) => v,
        }
    }

    /// Execute `program` from zeroed registers, feeding `inputs` to `inp`.
    ///
    /// # Errors
    ///
    /// Returns [`AluError`] on the first faulting instruction.
    pub fn run(program: &[Line], inputs: &[i64]) -> Result<Self, AluError> {
        let mut alu = Self::default();
        let mut inputs = inputs.iter();
        for &Line {
            number: line,
            instruction,
        } in program
        {
            let (target, result) = match instruction {
                Instruction::Inp(r) => {
                    let &v = inputs.next().ok_or(AluError::InputExhausted { line })?;
                    (r, Some(v))
                }
                Instruction::Add(r, o) => (r, alu.get(r).checked_add(alu.value(o))),
                Instruction::Mul(r, o) => (r, alu.get(r).checked_mul(alu.value(o))),
                Instruction::Div(r, o) => {
                    let b = alu.value(o);
                    if b == 0 {
                        return Err(AluError::DivideByZero { line });
                    }
                    (r, alu.get(r).checked_div(b))
                }
                Instruction::Mod(r, o) => {
                    let (a, b) = (alu.get(r), alu.value(o));
                    if a < 0 || b <= 0 {
                        return Err(AluError::InvalidModulo { line });
                    }
                    (r, Some(a % b))
                }
                Instruction::Eql(r, o) => (r, Some(i64::from(alu.get(r) == alu.value(o)))),
            };
            alu.registers[target.index()] = result.ok_or(AluError::Overflow { line })?;
        }
        Ok(alu)
    }
}
