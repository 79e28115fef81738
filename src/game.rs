//! The turn controller and match aggregate.
//!
//! `Game` owns the board, the two player handles, the turn state machine,
//! the survival countdown, and the per-faction status messages. It
//! orchestrates setup, move dispatch, turn switching, tower ticks, and
//! termination, re-running the annotation engine after every mutation.
//!
//! Invalid inputs never error: a wrong-turn, out-of-bounds, or unmarked
//! move degrades to a silent no-op and a `false` result.

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::annotate::{Annotations, Origin};
use crate::board::{Board, Coord, Faction, PlacementKind, Token};
use crate::setup;
use crate::snapshot::Snapshot;
use crate::view::CellView;

const MESSAGE_WAITING: &str = "Waiting for the other player to make their move";
const MESSAGE_SURVIVOR_PROMPT: &str = "Choose a location to move to";

/// The hunter's placement draw, weighted two roadblocks to one tower.
const HUNTER_PLACEABLE: [PlacementKind; 3] = [
    PlacementKind::Roadblock,
    PlacementKind::Roadblock,
    PlacementKind::Tower,
];

/// An opaque, equality-comparable player handle with a display name.
///
/// Player lifetime and the "currently in a match" back-reference belong to
/// the host; the core only compares identity and reads the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    name: String,
}

impl Player {
    /// Creates a handle with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Player { name: name.into() }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Fixed constants of the one ruleset, held in a struct so tests can
/// inject variants and the flagged switches stay explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub board_size: usize,
    /// Full rounds the survivor must outlast to escape.
    pub countdown: u32,
    pub wall_chance: f64,
    pub village_chance: f64,
    /// Whether a tower's tick may convert the unit's own cell.
    pub tower_converts_unit: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            board_size: 25,
            countdown: 100,
            wall_chance: 0.2,
            village_chance: 0.1,
            tower_converts_unit: false,
        }
    }
}

/// Whose turn it is, or `Done` once the match is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    Survivor,
    Hunter,
    Done,
}

impl TurnState {
    /// Single-character snapshot abbreviation.
    pub const fn snapshot_char(self) -> char {
        match self {
            TurnState::Survivor => 's',
            TurnState::Hunter => 'h',
            TurnState::Done => 'd',
        }
    }

    /// Parses a turn state from its snapshot abbreviation.
    pub fn from_snapshot_char(c: char) -> Option<TurnState> {
        match c {
            's' => Some(TurnState::Survivor),
            'h' => Some(TurnState::Hunter),
            'd' => Some(TurnState::Done),
            _ => None,
        }
    }
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The survivor outlasted the countdown.
    Escaped,
    /// The unit had no legal move left, or was built over.
    Trapped,
    /// The unit entered an organized village.
    OrganizedVillageDeath,
    SurvivorSurrendered,
    HunterSurrendered,
}

impl Outcome {
    /// Single-character snapshot abbreviation.
    pub const fn snapshot_char(self) -> char {
        match self {
            Outcome::Escaped => 'e',
            Outcome::Trapped => 'x',
            Outcome::OrganizedVillageDeath => 'o',
            Outcome::SurvivorSurrendered => 'q',
            Outcome::HunterSurrendered => 'g',
        }
    }

    /// Parses an outcome from its snapshot abbreviation.
    pub fn from_snapshot_char(c: char) -> Option<Outcome> {
        match c {
            'e' => Some(Outcome::Escaped),
            'x' => Some(Outcome::Trapped),
            'o' => Some(Outcome::OrganizedVillageDeath),
            'q' => Some(Outcome::SurvivorSurrendered),
            'g' => Some(Outcome::HunterSurrendered),
            _ => None,
        }
    }
}

/// A single match between two players.
pub struct Game {
    board: Board,
    survivor: Player,
    hunter: Player,
    turn: TurnState,
    countdown: u32,
    outcome: Option<Outcome>,
    pending: PlacementKind,
    survivor_message: String,
    hunter_message: String,
    annotations: Annotations,
    rules: Rules,
    rng: SmallRng,
}

impl Game {
    /// Starts a match on a freshly generated board.
    ///
    /// The host guarantees both players are unattached; the core does not
    /// re-validate. Board generation retries until the unit can be placed
    /// on an empty cell.
    pub fn new(survivor: Player, hunter: Player, rules: Rules, mut rng: SmallRng) -> Self {
        let board = loop {
            let mut board = setup::generate(&rules, &mut rng);
            if setup::place_unit(&mut board, &mut rng) {
                break board;
            }
        };
        tracing::debug!(
            size = rules.board_size,
            survivor = %survivor.name,
            hunter = %hunter.name,
            "starting match"
        );
        Self::assemble(
            survivor,
            hunter,
            board,
            rules,
            rng,
            TurnState::Survivor,
            rules.countdown,
            PlacementKind::Roadblock,
            None,
        )
    }

    /// Starts a match on an explicit board, for tests and deterministic
    /// scenarios. The board should already contain the unit.
    pub fn from_board(
        survivor: Player,
        hunter: Player,
        board: Board,
        rules: Rules,
        rng: SmallRng,
    ) -> Self {
        Self::assemble(
            survivor,
            hunter,
            board,
            rules,
            rng,
            TurnState::Survivor,
            rules.countdown,
            PlacementKind::Roadblock,
            None,
        )
    }

    /// Rebuilds a match from a snapshot; the host supplies the player
    /// handles and a fresh RNG.
    pub fn restore(
        snapshot: Snapshot,
        survivor: Player,
        hunter: Player,
        rules: Rules,
        rng: SmallRng,
    ) -> Self {
        Self::assemble(
            survivor,
            hunter,
            snapshot.board,
            rules,
            rng,
            snapshot.turn,
            snapshot.countdown,
            snapshot.pending,
            snapshot.outcome,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        survivor: Player,
        hunter: Player,
        board: Board,
        rules: Rules,
        rng: SmallRng,
        turn: TurnState,
        countdown: u32,
        pending: PlacementKind,
        outcome: Option<Outcome>,
    ) -> Self {
        let size = board.size();
        let mut game = Game {
            board,
            survivor,
            hunter,
            turn,
            countdown,
            outcome,
            pending,
            survivor_message: String::new(),
            hunter_message: String::new(),
            annotations: Annotations::empty(size),
            rules,
            rng,
        };
        match game.outcome {
            Some(outcome) => {
                game.turn = TurnState::Done;
                game.set_terminal_messages(outcome);
            }
            None => {
                game.evaluate_termination();
                if !game.is_over() {
                    game.set_turn_messages();
                }
            }
        }
        game.refresh_annotations();
        game
    }

    /// Submits a move for `actor` targeting `(row, col)`.
    ///
    /// Returns whether a move applied. Anything invalid -- wrong actor,
    /// finished match, out-of-bounds or impassable destination, or a
    /// destination no mover of the actor's faction can enter -- is a
    /// silent no-op.
    pub fn submit_move(&mut self, actor: &Player, row: usize, col: usize) -> bool {
        let active = match self.turn {
            TurnState::Survivor => Faction::Survivor,
            TurnState::Hunter => Faction::Hunter,
            TurnState::Done => return false,
        };
        if self.faction_of(actor) != Some(active) {
            return false;
        }
        let dest = Coord::new(row, col);
        if !self.board.get(dest).is_some_and(|t| t.passable()) {
            return false;
        }
        let origin = self
            .annotations
            .origins(dest)
            .iter()
            .find(|(f, _)| *f == active)
            .map(|(_, o)| *o);
        match origin {
            Some(Origin::Board(from)) => self.apply_board_move(from, dest),
            Some(Origin::Placement) => self.apply_placement(dest),
            None => false,
        }
    }

    /// Concedes the match for `actor`'s faction. No-op once finished or
    /// for a player not in this match.
    pub fn surrender(&mut self, actor: &Player) {
        if self.is_over() {
            return;
        }
        let outcome = match self.faction_of(actor) {
            Some(Faction::Survivor) => Outcome::SurvivorSurrendered,
            Some(Faction::Hunter) => Outcome::HunterSurrendered,
            None => return,
        };
        self.finish(outcome);
        self.refresh_annotations();
    }

    /// Whether the match is terminal.
    pub fn is_over(&self) -> bool {
        matches!(self.turn, TurnState::Done)
    }

    /// The terminal outcome, once over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The current turn state.
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Remaining full rounds before the survivor escapes.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// The structure kind the hunter places this turn.
    pub fn pending_placement(&self) -> PlacementKind {
        self.pending
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current annotation overlays.
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// The survivor-faction player.
    pub fn survivor(&self) -> &Player {
        &self.survivor
    }

    /// The hunter-faction player.
    pub fn hunter(&self) -> &Player {
        &self.hunter
    }

    /// The ruleset this match runs under.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The status line shown to `actor`'s faction.
    pub fn status_message(&self, actor: &Player) -> &str {
        if *actor == self.survivor {
            &self.survivor_message
        } else {
            &self.hunter_message
        }
    }

    /// What `actor` is shown for the cell at `(row, col)`.
    ///
    /// Out-of-bounds coordinates render as an empty background cell.
    pub fn cell_view(&self, actor: &Player, row: usize, col: usize) -> CellView {
        let faction = self.faction_of(actor).unwrap_or(Faction::Hunter);
        let at = Coord::new(row, col);
        let token = self.board.get(at).copied().unwrap_or(Token::Empty);
        let marker = self.annotations.view(faction).marker(at);
        CellView::of(token, marker, faction, self.is_over())
    }

    fn faction_of(&self, actor: &Player) -> Option<Faction> {
        if *actor == self.survivor {
            Some(Faction::Survivor)
        } else if *actor == self.hunter {
            Some(Faction::Hunter)
        } else {
            None
        }
    }

    fn apply_board_move(&mut self, from: Coord, dest: Coord) -> bool {
        let mover = match self.board.get(from) {
            Some(t) => *t,
            None => return false,
        };
        match mover {
            Token::Unit { on_village } => {
                let target = match self.board.get(dest) {
                    Some(t) => *t,
                    None => return false,
                };
                let entered_village = matches!(target, Token::Village { .. });
                let entered_organized = matches!(target, Token::Village { organized: true });
                self.board.set(dest, Token::Unit { on_village: entered_village });
                let vacated = if on_village {
                    Token::Village { organized: false }
                } else {
                    Token::Empty
                };
                self.board.set(from, vacated);
                if entered_organized {
                    // Lethal entry overrides the normal turn switch.
                    self.finish(Outcome::OrganizedVillageDeath);
                    self.refresh_annotations();
                } else {
                    self.switch_turn();
                }
                true
            }
            Token::Village { organized: false } if from == dest => {
                self.board.set(from, Token::Village { organized: true });
                self.switch_turn();
                true
            }
            _ => false,
        }
    }

    fn apply_placement(&mut self, dest: Coord) -> bool {
        // Landing on the unit's cell overwrites it; the termination check
        // on the following switch resolves the kill as trapped.
        self.board.set(dest, self.pending.placed());
        self.switch_turn();
        true
    }

    fn switch_turn(&mut self) {
        match self.turn {
            TurnState::Done => {}
            TurnState::Survivor => {
                self.turn = TurnState::Hunter;
                self.pending = HUNTER_PLACEABLE[self.rng.gen_range(0..HUNTER_PLACEABLE.len())];
                self.set_turn_messages();
            }
            TurnState::Hunter => {
                self.turn = TurnState::Survivor;
                self.run_ticks();
                self.countdown -= 1;
                self.evaluate_termination();
                if !self.is_over() {
                    self.set_turn_messages();
                }
            }
        }
        self.refresh_annotations();
    }

    /// Runs per-round tick behavior on every hunter token, row-major.
    fn run_ticks(&mut self) {
        let hunters: Vec<Coord> = self
            .board
            .cells()
            .filter(|(_, t)| t.faction() == Some(Faction::Hunter))
            .map(|(c, _)| c)
            .collect();
        for at in hunters {
            let token = match self.board.get(at) {
                Some(t) => *t,
                None => continue,
            };
            token.tick(
                &mut self.board,
                at,
                self.rules.tower_converts_unit,
                &mut self.rng,
            );
        }
    }

    fn evaluate_termination(&mut self) {
        if self.is_over() {
            return;
        }
        if self.countdown == 0 {
            self.finish(Outcome::Escaped);
            return;
        }
        let trapped = match self.board.find_unit() {
            Some(at) => self
                .board
                .get(at)
                .map_or(true, |t| t.candidate_moves(&self.board, at).is_empty()),
            None => true,
        };
        if trapped {
            self.finish(Outcome::Trapped);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.turn = TurnState::Done;
        self.outcome = Some(outcome);
        self.set_terminal_messages(outcome);
        tracing::info!(?outcome, survivor = %self.survivor.name, "match over");
    }

    fn set_terminal_messages(&mut self, outcome: Outcome) {
        let text = match outcome {
            Outcome::Escaped => {
                format!("{} outlasted the hunt and slipped away", self.survivor.name)
            }
            Outcome::Trapped => {
                format!("{} was cornered with nowhere left to run", self.survivor.name)
            }
            Outcome::OrganizedVillageDeath => format!(
                "{} perished in a village organized against them",
                self.survivor.name
            ),
            Outcome::SurvivorSurrendered => format!(
                "{} surrendered, certain the end was coming anyway",
                self.survivor.name
            ),
            Outcome::HunterSurrendered => format!(
                "{} gave up hunting {}. Someone else will finish the chase",
                self.hunter.name, self.survivor.name
            ),
        };
        self.survivor_message.clone_from(&text);
        self.hunter_message = text;
    }

    fn set_turn_messages(&mut self) {
        match self.turn {
            TurnState::Survivor => {
                self.survivor_message = MESSAGE_SURVIVOR_PROMPT.to_string();
                self.hunter_message = MESSAGE_WAITING.to_string();
            }
            TurnState::Hunter => {
                self.survivor_message = MESSAGE_WAITING.to_string();
                self.hunter_message =
                    format!("Choose a location to place a {}", self.pending.label());
            }
            TurnState::Done => {}
        }
    }

    fn refresh_annotations(&mut self) {
        let active = match self.turn {
            TurnState::Survivor => Some(Faction::Survivor),
            TurnState::Hunter => Some(Faction::Hunter),
            TurnState::Done => None,
        };
        self.annotations = Annotations::compute(&self.board, active, self.pending);
    }
}
