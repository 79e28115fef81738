//! The token catalog and its capability surface.
//!
//! Six token kinds share one closed variant type: movement candidates,
//! influence candidates, and per-round tick behavior are all dispatched
//! through methods here, never by type inspection in the controller. The
//! one rule that is inherently kind-based -- which occupants a mover may
//! displace -- is exposed as the `passable` predicate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::coord::{deltas_within, Coord, Delta, ORTHOGONAL, SELF_ONLY};
use super::grid::Board;

/// Euclidean reach of a broadcast tower's influence disc, in cells.
pub const TOWER_RADIUS: f64 = 4.5;

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Survivor,
    Hunter,
}

impl Faction {
    /// Returns the opposing faction.
    pub const fn opponent(self) -> Faction {
        match self {
            Faction::Survivor => Faction::Hunter,
            Faction::Hunter => Faction::Survivor,
        }
    }
}

/// A structure kind the hunter may place on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementKind {
    Roadblock,
    Tower,
}

impl PlacementKind {
    /// Human-readable name used in the hunter's placement prompt.
    pub const fn label(self) -> &'static str {
        match self {
            PlacementKind::Roadblock => "roadblock",
            PlacementKind::Tower => "broadcast tower",
        }
    }

    /// The immovable token written to the board when the placement lands.
    pub const fn placed(self) -> Token {
        match self {
            PlacementKind::Roadblock => Token::Roadblock { placed: true },
            PlacementKind::Tower => Token::Tower { placed: true },
        }
    }

    /// The not-yet-placed ghost held off-board during the hunter's turn.
    pub const fn ghost(self) -> Token {
        match self {
            PlacementKind::Roadblock => Token::Roadblock { placed: false },
            PlacementKind::Tower => Token::Tower { placed: false },
        }
    }

    /// Legal landing cells for this placement on the current board.
    pub fn candidates(self, board: &Board) -> Vec<Coord> {
        self.ghost().candidate_moves(board, Coord::new(0, 0))
    }

    /// Single-character snapshot abbreviation.
    pub const fn snapshot_char(self) -> char {
        match self {
            PlacementKind::Roadblock => 'r',
            PlacementKind::Tower => 't',
        }
    }

    /// Parses a placement kind from its snapshot abbreviation.
    pub fn from_snapshot_char(c: char) -> Option<PlacementKind> {
        match c {
            'r' => Some(PlacementKind::Roadblock),
            't' => Some(PlacementKind::Tower),
            _ => None,
        }
    }
}

/// The movement-candidate range of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRange {
    /// No legal destinations, ever.
    None,
    /// Fixed offsets relative to the token's own cell.
    Deltas(&'static [Delta]),
    /// Every placement-targetable cell on the board.
    WholeBoard,
}

/// The area-of-influence range of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfluenceRange {
    /// Projects no influence.
    None,
    /// Every cell within true Euclidean distance of the token's cell.
    Radius(f64),
    /// Every cell on the board.
    WholeBoard,
}

/// One token kind occupying exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Empty,
    Wall,
    Village {
        /// Set once the hunter organizes the village; lethal to the unit.
        organized: bool,
    },
    Unit {
        /// A village sits beneath the unit and is restored when it leaves.
        on_village: bool,
    },
    Roadblock {
        /// Placed structures are immovable; the ghost is movable once.
        placed: bool,
    },
    Tower {
        placed: bool,
    },
}

impl Token {
    /// Faction affiliation, fixed for the token's lifetime.
    pub const fn faction(self) -> Option<Faction> {
        match self {
            Token::Empty | Token::Wall => None,
            Token::Unit { .. } => Some(Faction::Survivor),
            Token::Village { .. } | Token::Roadblock { .. } | Token::Tower { .. } => {
                Some(Faction::Hunter)
            }
        }
    }

    /// Whether a mover may enter a cell occupied by this token.
    ///
    /// Walls and placed structures block; the unit, villages, and empty
    /// cells can be displaced or entered.
    pub const fn passable(self) -> bool {
        matches!(
            self,
            Token::Empty | Token::Unit { .. } | Token::Village { .. }
        )
    }

    /// The token's movement range.
    pub const fn move_range(self) -> MoveRange {
        match self {
            Token::Unit { .. } => MoveRange::Deltas(&ORTHOGONAL),
            // An un-organized village "moves" onto its own cell to organize.
            Token::Village { organized: false } => MoveRange::Deltas(&SELF_ONLY),
            Token::Roadblock { placed: false } | Token::Tower { placed: false } => {
                MoveRange::WholeBoard
            }
            _ => MoveRange::None,
        }
    }

    /// Enumerates currently legal destination cells from `at`.
    ///
    /// Destinations must hold a passable occupant; whole-board ranges are
    /// additionally restricted to empty or unit-occupied cells (placements
    /// never land on villages) and ignore `at`.
    pub fn candidate_moves(self, board: &Board, at: Coord) -> Vec<Coord> {
        match self.move_range() {
            MoveRange::None => Vec::new(),
            MoveRange::Deltas(deltas) => {
                let mut moves = Vec::new();
                for &d in deltas {
                    if let Some(dest) = board.offset(at, d) {
                        if board.get(dest).is_some_and(|t| t.passable()) {
                            moves.push(dest);
                        }
                    }
                }
                moves
            }
            MoveRange::WholeBoard => board
                .cells()
                .filter(|(_, t)| matches!(t, Token::Empty | Token::Unit { .. }))
                .map(|(c, _)| c)
                .collect(),
        }
    }

    /// The token's area-of-influence range.
    pub fn influence_range(self) -> InfluenceRange {
        match self {
            Token::Tower { .. } => InfluenceRange::Radius(TOWER_RADIUS),
            _ => InfluenceRange::None,
        }
    }

    /// Enumerates the cells this token projects influence onto, clipped to
    /// board bounds.
    pub fn candidate_influence(self, board: &Board, at: Coord) -> Vec<Coord> {
        match self.influence_range() {
            InfluenceRange::None => Vec::new(),
            InfluenceRange::Radius(radius) => {
                let mut cells = Vec::new();
                for d in deltas_within(radius) {
                    if let Some(c) = board.offset(at, d) {
                        cells.push(c);
                    }
                }
                cells
            }
            InfluenceRange::WholeBoard => board.coords().collect(),
        }
    }

    /// Per-round behavior, run for hunter tokens when control returns to
    /// the survivor.
    ///
    /// Only the broadcast tower acts: it converts one uniformly random
    /// eligible cell in its influence disc into a placed roadblock.
    /// Eligible cells are empty, plus the unit's cell when
    /// `can_convert_unit` is set. No eligible cells is a silent no-op.
    pub fn tick(self, board: &mut Board, at: Coord, can_convert_unit: bool, rng: &mut impl Rng) {
        if !matches!(self, Token::Tower { .. }) {
            return;
        }
        let eligible: Vec<Coord> = self
            .candidate_influence(board, at)
            .into_iter()
            .filter(|&c| match board.get(c) {
                Some(Token::Empty) => true,
                Some(Token::Unit { .. }) => can_convert_unit,
                _ => false,
            })
            .collect();
        if eligible.is_empty() {
            return;
        }
        let chosen = eligible[rng.gen_range(0..eligible.len())];
        board.set(chosen, Token::Roadblock { placed: true });
    }

    /// Single-character snapshot abbreviation.
    pub const fn snapshot_char(self) -> char {
        match self {
            Token::Empty => '.',
            Token::Wall => '#',
            Token::Village { organized: false } => 'v',
            Token::Village { organized: true } => 'V',
            Token::Unit { on_village: false } => 'u',
            Token::Unit { on_village: true } => 'U',
            Token::Roadblock { .. } => 'r',
            Token::Tower { .. } => 't',
        }
    }

    /// Parses a token from its snapshot abbreviation.
    ///
    /// Structures read back from a snapshot are always placed; the only
    /// movable ghost lives off-board as the pending placement.
    pub fn from_snapshot_char(c: char) -> Option<Token> {
        match c {
            '.' => Some(Token::Empty),
            '#' => Some(Token::Wall),
            'v' => Some(Token::Village { organized: false }),
            'V' => Some(Token::Village { organized: true }),
            'u' => Some(Token::Unit { on_village: false }),
            'U' => Some(Token::Unit { on_village: true }),
            'r' => Some(Token::Roadblock { placed: true }),
            't' => Some(Token::Tower { placed: true }),
            _ => None,
        }
    }
}
