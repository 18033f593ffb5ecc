//! Burrow: amphipods sorting themselves into side rooms.
//!
//! A hallway of 11 cells sits above four side rooms whose entrances are at
//! hallway cells 2, 4, 6 and 8. Each amphipod type has a home room and a
//! per-step energy cost. The answer is the least total energy that brings
//! every amphipod home.
//!
//! Movement rules (these define the transition graph):
//!
//! - Nothing ever stops on an entrance cell.
//! - Only the topmost occupant of a room may leave, and only if the room is
//!   not already settled from that slot down.
//! - An amphipod in the hallway moves only into its home room, only when
//!   the room holds no foreign occupant, only along a clear path, and always
//!   to the deepest free slot.
//!
//! Room-to-room moves are expressed as two moves through a hallway cell;
//! since a free non-entrance cell always lies between two entrances, the
//! cost is the same.

use waypoint_kernel::carrier::codec::StateCodec;
use waypoint_kernel::carrier::key::{CodecError, KeyWriter, StateKey};
use waypoint_search::contract::{SearchWorld, Transition};
use waypoint_search::search::best_first_search;

use crate::contract::{ParseError, Part, PartOutcome, Puzzle};
use crate::policy::RunConfig;
use crate::runner::HarnessError;
use crate::worlds::answer_from_search;

pub const HALLWAY_LEN: usize = 11;
pub const ROOM_COUNT: usize = 4;
pub const MAX_DEPTH: usize = 4;

const ENTRANCES: [usize; ROOM_COUNT] = [2, 4, 6, 8];

/// Rows spliced in below the top row when the burrow is unfolded.
const UNFOLDED_ROWS: [[Amphipod; ROOM_COUNT]; 2] = [
    [Amphipod::Desert, Amphipod::Copper, Amphipod::Bronze, Amphipod::Amber],
    [Amphipod::Desert, Amphipod::Bronze, Amphipod::Amber, Amphipod::Copper],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Amphipod {
    Amber,
    Bronze,
    Copper,
    Desert,
}

impl Amphipod {
    pub const ALL: [Self; ROOM_COUNT] = [Self::Amber, Self::Bronze, Self::Copper, Self::Desert];

    /// Energy per step.
    #[must_use]
    pub const fn energy(self) -> u64 {
        match self {
            Self::Amber => 1,
            Self::Bronze => 10,
            Self::Copper => 100,
            Self::Desert => 1000,
        }
    }

    /// Index of the home room.
    #[must_use]
    pub const fn home(self) -> usize {
        match self {
            Self::Amber => 0,
            Self::Bronze => 1,
            Self::Copper => 2,
            Self::Desert => 3,
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::Amber),
            'B' => Some(Self::Bronze),
            'C' => Some(Self::Copper),
            'D' => Some(Self::Desert),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Amber => 'A',
            Self::Bronze => 'B',
            Self::Copper => 'C',
            Self::Desert => 'D',
        }
    }
}

fn cell_code(cell: Option<Amphipod>) -> u8 {
    match cell {
        None => 0,
        Some(a) => a.home() as u8 + 1,
    }
}

fn cell_from_code(code: u8) -> Result<Option<Amphipod>, CodecError> {
    match code {
        0 => Ok(None),
        1..=4 => Ok(Some(Amphipod::ALL[usize::from(code - 1)])),
        _ => Err(CodecError::InvalidField {
            field: "cell",
            value: i64::from(code),
        }),
    }
}

const fn is_entrance(h: usize) -> bool {
    matches!(h, 2 | 4 | 6 | 8)
}

type Cell = Option<Amphipod>;

/// One snapshot of the hallway and rooms. Room slot 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Burrow {
    depth: usize,
    hallway: [Cell; HALLWAY_LEN],
    rooms: [[Cell; MAX_DEPTH]; ROOM_COUNT],
}

impl Burrow {
    /// Burrow with an empty hallway and the given room rows, top row first.
    ///
    /// Returns `None` unless `1 <= rows.len() <= MAX_DEPTH`.
    #[must_use]
    pub fn from_rows(rows: &[[Amphipod; ROOM_COUNT]]) -> Option<Self> {
        if rows.is_empty() || rows.len() > MAX_DEPTH {
            return None;
        }
        let mut rooms = [[None; MAX_DEPTH]; ROOM_COUNT];
        for (slot, row) in rows.iter().enumerate() {
            for (room, &a) in row.iter().enumerate() {
                rooms[room][slot] = Some(a);
            }
        }
        Some(Self {
            depth: rows.len(),
            hallway: [None; HALLWAY_LEN],
            rooms,
        })
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Splice the two extra rows in below the top row.
    ///
    /// Returns `None` if the result would be deeper than [`MAX_DEPTH`].
    #[must_use]
    pub fn unfolded(&self) -> Option<Self> {
        let depth = self.depth + UNFOLDED_ROWS.len();
        if depth > MAX_DEPTH {
            return None;
        }
        let mut rooms = [[None; MAX_DEPTH]; ROOM_COUNT];
        for (room, column) in rooms.iter_mut().enumerate() {
            let old = &self.rooms[room];
            column[0] = old[0];
            for (offset, row) in UNFOLDED_ROWS.iter().enumerate() {
                column[1 + offset] = Some(row[room]);
            }
            column[1 + UNFOLDED_ROWS.len()..depth].copy_from_slice(&old[1..self.depth]);
        }
        Some(Self {
            depth,
            hallway: self.hallway,
            rooms,
        })
    }

    /// Every slot from `slot` down holds an amphipod that lives here.
    fn settled_from(&self, room: usize, slot: usize) -> bool {
        self.rooms[room][slot..self.depth]
            .iter()
            .all(|cell| cell.is_some_and(|a| a.home() == room))
    }

    /// Every amphipod is home.
    #[must_use]
    pub fn is_organized(&self) -> bool {
        (0..ROOM_COUNT).all(|room| self.settled_from(room, 0))
    }

    /// Deepest free slot of `a`'s home room, if the room holds no stranger.
    fn open_home_slot(&self, a: Amphipod) -> Option<usize> {
        let room = &self.rooms[a.home()][..self.depth];
        if room.iter().flatten().any(|&other| other != a) {
            return None;
        }
        room.iter().rposition(Option::is_none)
    }

    /// Hallway cells between `from` (exclusive) and `to` (inclusive) are free.
    fn hallway_clear(&self, from: usize, to: usize) -> bool {
        let span = if from < to {
            from + 1..=to
        } else {
            to..=from - 1
        };
        self.hallway[span].iter().all(Option::is_none)
    }

    fn push_exits(
        &self,
        room: usize,
        slot: usize,
        targets: impl Iterator<Item = usize>,
        moves: &mut Vec<Transition<Self>>,
    ) {
        let Some(a) = self.rooms[room][slot] else {
            return;
        };
        let entrance = ENTRANCES[room];
        for h in targets {
            if self.hallway[h].is_some() {
                break;
            }
            if is_entrance(h) {
                continue;
            }
            let steps = slot + 1 + h.abs_diff(entrance);
            let mut next = self.clone();
            next.rooms[room][slot] = None;
            next.hallway[h] = Some(a);
            moves.push(Transition::new(a.energy() * steps as u64, next));
        }
    }
}

impl std::fmt::Display for Burrow {
    /// The puzzle's own diagram.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyph = |cell: Cell| cell.map_or('.', Amphipod::as_char);
        writeln!(f, "#############")?;
        let hallway: String = self.hallway.iter().map(|&c| glyph(c)).collect();
        writeln!(f, "#{hallway}#")?;
        for slot in 0..self.depth {
            let (lead, tail) = if slot == 0 { ("###", "###") } else { ("  #", "#") };
            let cells: Vec<String> = self
                .rooms
                .iter()
                .map(|room| glyph(room[slot]).to_string())
                .collect();
            writeln!(f, "{lead}{}{tail}", cells.join("#"))?;
        }
        write!(f, "  #########")
    }
}

/// The search world over [`Burrow`] snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurrowWorld;

impl StateCodec for BurrowWorld {
    type Config = Burrow;

    fn encode(&self, config: &Burrow) -> StateKey {
        let mut w = KeyWriter::with_capacity(1 + HALLWAY_LEN + ROOM_COUNT * MAX_DEPTH);
        w.put_u8(config.depth as u8);
        for &cell in &config.hallway {
            w.put_u8(cell_code(cell));
        }
        for room in &config.rooms {
            for &cell in room {
                w.put_u8(cell_code(cell));
            }
        }
        w.finish()
    }

    fn decode(&self, key: &StateKey) -> Result<Burrow, CodecError> {
        let mut r = key.reader();
        let depth = usize::from(r.u8()?);
        if depth == 0 || depth > MAX_DEPTH {
            return Err(CodecError::InvalidField {
                field: "depth",
                value: depth as i64,
            });
        }
        let mut hallway = [None; HALLWAY_LEN];
        for cell in &mut hallway {
            *cell = cell_from_code(r.u8()?)?;
        }
        let mut rooms = [[None; MAX_DEPTH]; ROOM_COUNT];
        for room in &mut rooms {
            for (slot, cell) in room.iter_mut().enumerate() {
                *cell = cell_from_code(r.u8()?)?;
                if slot >= depth && cell.is_some() {
                    return Err(CodecError::InvalidField {
                        field: "room_padding",
                        value: slot as i64,
                    });
                }
            }
        }
        r.finish()?;
        Ok(Burrow {
            depth,
            hallway,
            rooms,
        })
    }
}

impl SearchWorld for BurrowWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "burrow"
    }

    fn expand(&self, burrow: &Burrow) -> Vec<Transition<Burrow>> {
        let mut moves = Vec::new();

        for (h, cell) in burrow.hallway.iter().enumerate() {
            let Some(a) = *cell else { continue };
            let Some(slot) = burrow.open_home_slot(a) else {
                continue;
            };
            let entrance = ENTRANCES[a.home()];
            if !burrow.hallway_clear(h, entrance) {
                continue;
            }
            let steps = h.abs_diff(entrance) + slot + 1;
            let mut next = burrow.clone();
            next.hallway[h] = None;
            next.rooms[a.home()][slot] = Some(a);
            moves.push(Transition::new(a.energy() * steps as u64, next));
        }

        for room in 0..ROOM_COUNT {
            let Some(slot) = burrow.rooms[room][..burrow.depth]
                .iter()
                .position(Option::is_some)
            else {
                continue;
            };
            if burrow.settled_from(room, slot) {
                continue;
            }
            let entrance = ENTRANCES[room];
            burrow.push_exits(room, slot, (0..entrance).rev(), &mut moves);
            burrow.push_exits(room, slot, entrance + 1..HALLWAY_LEN, &mut moves);
        }

        moves
    }

    /// Sum over unsettled amphipods of the fewest steps each still needs,
    /// weighted by its energy. Amphipods never share steps, so the sum is a
    /// lower bound; settled amphipods contribute nothing, so it is 0 at the
    /// goal.
    fn heuristic(&self, burrow: &Burrow) -> u64 {
        let mut steps_energy = 0;
        for (h, cell) in burrow.hallway.iter().enumerate() {
            if let Some(a) = *cell {
                let steps = h.abs_diff(ENTRANCES[a.home()]) + 1;
                steps_energy += a.energy() * steps as u64;
            }
        }
        for (room, column) in burrow.rooms.iter().enumerate() {
            for (slot, cell) in column[..burrow.depth].iter().enumerate() {
                let Some(a) = *cell else { continue };
                let steps = if a.home() != room {
                    slot + 1 + ENTRANCES[room].abs_diff(ENTRANCES[a.home()]) + 1
                } else if burrow.settled_from(room, slot) {
                    0
                } else {
                    // Out, one step aside, back, and in.
                    slot + 4
                };
                steps_energy += a.energy() * steps as u64;
            }
        }
        steps_energy
    }

    fn is_goal(&self, burrow: &Burrow) -> bool {
        burrow.is_organized()
    }
}

/// The burrow puzzle: part 1 as drawn, part 2 unfolded.
#[derive(Debug, Clone)]
pub struct BurrowPuzzle {
    folded: Burrow,
    unfolded: Burrow,
}

impl BurrowPuzzle {
    #[must_use]
    pub fn start(&self, part: Part) -> &Burrow {
        match part {
            Part::One => &self.folded,
            Part::Two => &self.unfolded,
        }
    }
}

fn parse_room_row(line: &str, line_no: usize) -> Result<[Amphipod; ROOM_COUNT], ParseError> {
    let glyphs: Vec<char> = line.chars().filter(|c| !matches!(c, '#' | ' ')).collect();
    if glyphs.len() != ROOM_COUNT {
        return Err(ParseError::new(
            line_no,
            format!("expected {ROOM_COUNT} room cells, found {}", glyphs.len()),
        ));
    }
    let mut row = [Amphipod::Amber; ROOM_COUNT];
    for (slot, &c) in row.iter_mut().zip(&glyphs) {
        *slot = Amphipod::from_char(c)
            .ok_or_else(|| ParseError::new(line_no, format!("unknown amphipod {c:?}")))?;
    }
    Ok(row)
}

impl Puzzle for BurrowPuzzle {
    const PUZZLE_ID: &'static str = "burrow";

    fn parse(input: &str) -> Result<Self, ParseError> {
        let mut saw_hallway = false;
        let mut rows = Vec::new();
        let mut last_line = 1;
        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            last_line = line_no;
            let line = raw.trim();
            if line.is_empty() || line.chars().all(|c| c == '#') {
                continue;
            }
            if !saw_hallway {
                let inner = line
                    .strip_prefix('#')
                    .and_then(|l| l.strip_suffix('#'))
                    .ok_or_else(|| ParseError::new(line_no, "hallway must be walled by '#'"))?;
                if inner.len() != HALLWAY_LEN || inner.chars().any(|c| c != '.') {
                    return Err(ParseError::new(
                        line_no,
                        format!("hallway must be {HALLWAY_LEN} empty cells"),
                    ));
                }
                saw_hallway = true;
                continue;
            }
            rows.push(parse_room_row(line, line_no)?);
        }
        if !saw_hallway {
            return Err(ParseError::new(1, "missing hallway line"));
        }
        if rows.len() != 2 {
            return Err(ParseError::new(
                last_line,
                format!("expected 2 room rows, found {}", rows.len()),
            ));
        }
        for kind in Amphipod::ALL {
            let count = rows.iter().flatten().filter(|&&a| a == kind).count();
            if count != rows.len() {
                return Err(ParseError::new(
                    last_line,
                    format!(
                        "expected {} of amphipod {}, found {count}",
                        rows.len(),
                        kind.as_char()
                    ),
                ));
            }
        }
        let folded = Burrow::from_rows(&rows)
            .ok_or_else(|| ParseError::new(last_line, "room depth out of range"))?;
        let unfolded = folded
            .unfolded()
            .ok_or_else(|| ParseError::new(last_line, "room depth out of range"))?;
        Ok(Self { folded, unfolded })
    }

    fn solve_part(&self, part: Part, config: &RunConfig) -> Result<PartOutcome, HarnessError> {
        let result = best_first_search(&BurrowWorld, self.start(part).clone(), &config.search)?;
        answer_from_search(part, &result)
    }
}
