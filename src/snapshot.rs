//! The serialize/deserialize boundary.
//!
//! A `Snapshot` is the structured, serde-ready form of everything needed
//! to rebuild a match: board cells, turn state, countdown, pending
//! placement, and outcome. Player handles and the RNG are supplied by the
//! host on restore; persistence and locking are the host's business.
//!
//! The compact text notation puts a whole position on one line:
//!
//! `<countdown><turn>[<outcome>]<pending>/<row>/<row>/...`
//!
//! e.g. `100sr/..#v./..u../...../....t/.....` for a live 5x5 position and
//! `37dxr/...` once the match ended trapped. Rows use one character per
//! cell (`.` empty, `#` wall, `v`/`V` village, `u`/`U` unit, `r`
//! roadblock, `t` tower); the outcome character appears only after a
//! terminal `d` turn.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, PlacementKind, Token};
use crate::game::{Game, Outcome, TurnState};

/// Errors raised while parsing the text notation.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("empty snapshot")]
    Empty,

    #[error("invalid countdown in header: '{0}'")]
    InvalidCountdown(String),

    #[error("invalid turn character: '{0}'")]
    InvalidTurn(char),

    #[error("terminal header is missing its outcome character")]
    MissingOutcome,

    #[error("invalid outcome character: '{0}'")]
    InvalidOutcome(char),

    #[error("header is missing its placement character")]
    MissingPlacement,

    #[error("invalid placement character: '{0}'")]
    InvalidPlacement(char),

    #[error("trailing characters in header: '{0}'")]
    TrailingHeader(String),

    #[error("snapshot has no rows")]
    NoRows,

    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("invalid token character: '{0}'")]
    InvalidToken(char),

    #[error("more than one unit on the board")]
    DuplicateUnit,
}

/// A restorable match position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub turn: TurnState,
    pub countdown: u32,
    pub pending: PlacementKind,
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    /// Captures the re-creatable state of a match.
    pub fn capture(game: &Game) -> Snapshot {
        Snapshot {
            board: game.board().clone(),
            turn: game.turn(),
            countdown: game.countdown(),
            pending: game.pending_placement(),
            outcome: game.outcome(),
        }
    }

    /// Writes the position as a single line of text notation.
    pub fn encode(&self) -> String {
        let mut out = format!("{}{}", self.countdown, self.turn.snapshot_char());
        if let Some(outcome) = self.outcome {
            out.push(outcome.snapshot_char());
        }
        out.push(self.pending.snapshot_char());
        let size = self.board.size();
        for row in 0..size {
            out.push('/');
            for col in 0..size {
                let token = self
                    .board
                    .get(Coord::new(row, col))
                    .copied()
                    .unwrap_or(Token::Empty);
                out.push(token.snapshot_char());
            }
        }
        out
    }

    /// Parses a position from text notation.
    pub fn parse(text: &str) -> Result<Snapshot, SnapshotError> {
        let mut sections = text.split('/');
        let header = sections.next().filter(|h| !h.is_empty()).ok_or(SnapshotError::Empty)?;
        let (turn, countdown, outcome, pending) = parse_header(header)?;

        let rows: Vec<&str> = sections.collect();
        if rows.is_empty() {
            return Err(SnapshotError::NoRows);
        }
        let size = rows.len();
        let mut board = Board::new(size);
        let mut units = 0;
        for (row, text) in rows.iter().enumerate() {
            if text.chars().count() != size {
                return Err(SnapshotError::NotSquare {
                    row,
                    len: text.chars().count(),
                    expected: size,
                });
            }
            for (col, c) in text.chars().enumerate() {
                let token =
                    Token::from_snapshot_char(c).ok_or(SnapshotError::InvalidToken(c))?;
                if matches!(token, Token::Unit { .. }) {
                    units += 1;
                    if units > 1 {
                        return Err(SnapshotError::DuplicateUnit);
                    }
                }
                board.set(Coord::new(row, col), token);
            }
        }

        Ok(Snapshot {
            board,
            turn,
            countdown,
            pending,
            outcome,
        })
    }
}

fn parse_header(
    header: &str,
) -> Result<(TurnState, u32, Option<Outcome>, PlacementKind), SnapshotError> {
    let digits: String = header.chars().take_while(char::is_ascii_digit).collect();
    let countdown = digits
        .parse::<u32>()
        .map_err(|_| SnapshotError::InvalidCountdown(header.to_string()))?;

    let mut rest = header.chars().skip(digits.len());
    let turn_char = rest.next().ok_or(SnapshotError::MissingPlacement)?;
    let turn =
        TurnState::from_snapshot_char(turn_char).ok_or(SnapshotError::InvalidTurn(turn_char))?;

    let outcome = if turn == TurnState::Done {
        let c = rest.next().ok_or(SnapshotError::MissingOutcome)?;
        Some(Outcome::from_snapshot_char(c).ok_or(SnapshotError::InvalidOutcome(c))?)
    } else {
        None
    };

    let pending_char = rest.next().ok_or(SnapshotError::MissingPlacement)?;
    let pending = PlacementKind::from_snapshot_char(pending_char)
        .ok_or(SnapshotError::InvalidPlacement(pending_char))?;

    let trailing: String = rest.collect();
    if !trailing.is_empty() {
        return Err(SnapshotError::TrailingHeader(trailing));
    }

    Ok((turn, countdown, outcome, pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Player, Rules};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const LIVE: &str = "100sr/..#/.u./v.t";
    const DONE: &str = "37dxt/###/#r#/###";

    #[test]
    fn parse_live_position() {
        let snap = Snapshot::parse(LIVE).unwrap();
        assert_eq!(snap.countdown, 100);
        assert_eq!(snap.turn, TurnState::Survivor);
        assert_eq!(snap.pending, PlacementKind::Roadblock);
        assert_eq!(snap.outcome, None);
        assert_eq!(snap.board.size(), 3);
        assert_eq!(snap.board.get(Coord::new(0, 2)), Some(&Token::Wall));
        assert_eq!(
            snap.board.get(Coord::new(1, 1)),
            Some(&Token::Unit { on_village: false })
        );
        assert_eq!(
            snap.board.get(Coord::new(2, 2)),
            Some(&Token::Tower { placed: true })
        );
    }

    #[test]
    fn parse_terminal_position() {
        let snap = Snapshot::parse(DONE).unwrap();
        assert_eq!(snap.turn, TurnState::Done);
        assert_eq!(snap.outcome, Some(Outcome::Trapped));
        assert_eq!(snap.pending, PlacementKind::Tower);
        assert_eq!(snap.countdown, 37);
    }

    #[test]
    fn encode_parse_roundtrip() {
        for text in [LIVE, DONE] {
            let snap = Snapshot::parse(text).unwrap();
            assert_eq!(snap.encode(), text);
            assert_eq!(Snapshot::parse(&snap.encode()).unwrap(), snap);
        }
    }

    #[test]
    fn malformed_headers_are_rejected() {
        assert!(matches!(
            Snapshot::parse("xyz/..."),
            Err(SnapshotError::InvalidCountdown(_))
        ));
        assert!(matches!(
            Snapshot::parse("100zr/..."),
            Err(SnapshotError::InvalidTurn('z'))
        ));
        assert!(matches!(
            Snapshot::parse("100d/..."),
            Err(SnapshotError::MissingOutcome)
        ));
        assert!(matches!(
            Snapshot::parse("100srr/..."),
            Err(SnapshotError::TrailingHeader(_))
        ));
        assert!(matches!(Snapshot::parse("100sr"), Err(SnapshotError::NoRows)));
        assert!(matches!(Snapshot::parse(""), Err(SnapshotError::Empty)));
    }

    #[test]
    fn malformed_boards_are_rejected() {
        assert!(matches!(
            Snapshot::parse("5sr/.../../..."),
            Err(SnapshotError::NotSquare { row: 1, len: 2, expected: 3 })
        ));
        assert!(matches!(
            Snapshot::parse("5sr/.q./.../..."),
            Err(SnapshotError::InvalidToken('q'))
        ));
        assert!(matches!(
            Snapshot::parse("5sr/uu./.../..."),
            Err(SnapshotError::DuplicateUnit)
        ));
    }

    #[test]
    fn capture_and_restore_preserve_the_position() {
        let snap = Snapshot::parse(LIVE).unwrap();
        let rules = Rules {
            board_size: 3,
            ..Rules::default()
        };
        let game = Game::restore(
            snap.clone(),
            Player::new("ava"),
            Player::new("bex"),
            rules,
            SmallRng::seed_from_u64(1),
        );
        assert_eq!(game.turn(), TurnState::Survivor);
        assert_eq!(game.countdown(), 100);
        assert!(!game.is_over());

        let recaptured = Snapshot::capture(&game);
        assert_eq!(recaptured, snap);
    }

    #[test]
    fn restored_terminal_match_stays_done() {
        let snap = Snapshot::parse(DONE).unwrap();
        let rules = Rules {
            board_size: 3,
            ..Rules::default()
        };
        let mut game = Game::restore(
            snap,
            Player::new("ava"),
            Player::new("bex"),
            rules,
            SmallRng::seed_from_u64(1),
        );
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Trapped));
        assert!(game.status_message(&Player::new("ava")).contains("cornered"));
        assert!(!game.submit_move(&Player::new("ava"), 1, 1));
    }

    #[test]
    fn structured_form_roundtrips_through_json() {
        let snap = Snapshot::parse(LIVE).unwrap();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
