//! Random self-play over seeded games.
//!
//! Plays full matches with both factions choosing uniformly at random
//! among their marked-reachable destinations, and aggregates outcome
//! statistics over a rayon-parallel batch. Useful for smoke-testing the
//! rules and for eyeballing balance.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::board::{Coord, Faction};
use crate::game::{Game, Outcome, Player, Rules, TurnState};

/// Configuration for a self-play batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of games to play.
    pub games: usize,
    /// Base seed; game `i` runs from `seed + i`.
    pub seed: u64,
    pub rules: Rules,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            games: 10,
            seed: 0x5EED,
            rules: Rules::default(),
        }
    }
}

/// The result of one played-out game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutRecord {
    pub outcome: Outcome,
    /// Full rounds elapsed before the match ended.
    pub rounds: u32,
}

/// Aggregated results of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    pub games: usize,
    pub escaped: usize,
    pub trapped: usize,
    pub organized_village: usize,
    pub surrendered: usize,
    pub mean_rounds: f64,
}

impl BatchStats {
    fn from_records(records: &[PlayoutRecord]) -> Self {
        let mut stats = BatchStats {
            games: records.len(),
            escaped: 0,
            trapped: 0,
            organized_village: 0,
            surrendered: 0,
            mean_rounds: 0.0,
        };
        let mut total_rounds = 0u64;
        for r in records {
            total_rounds += u64::from(r.rounds);
            match r.outcome {
                Outcome::Escaped => stats.escaped += 1,
                Outcome::Trapped => stats.trapped += 1,
                Outcome::OrganizedVillageDeath => stats.organized_village += 1,
                Outcome::SurvivorSurrendered | Outcome::HunterSurrendered => {
                    stats.surrendered += 1
                }
            }
        }
        if !records.is_empty() {
            stats.mean_rounds = total_rounds as f64 / records.len() as f64;
        }
        stats
    }
}

/// Plays one full game from `seed`, both sides moving uniformly at random.
///
/// A side left with no reachable destination at all concedes, which keeps
/// the playout finite even in degenerate positions the termination rules
/// do not cover (a hunter facing a fully built-up board).
pub fn random_playout(seed: u64, rules: &Rules) -> PlayoutRecord {
    let mut rng = SmallRng::seed_from_u64(seed);
    let survivor = Player::new("survivor");
    let hunter = Player::new("hunter");
    let game_rng = SmallRng::seed_from_u64(rng.gen());
    let mut game = Game::new(survivor.clone(), hunter.clone(), *rules, game_rng);

    while !game.is_over() {
        let (actor, faction) = match game.turn() {
            TurnState::Survivor => (&survivor, Faction::Survivor),
            TurnState::Hunter => (&hunter, Faction::Hunter),
            TurnState::Done => break,
        };
        let targets: Vec<Coord> = game
            .board()
            .coords()
            .filter(|&c| {
                game.annotations()
                    .view(faction)
                    .marker(c)
                    .is_some_and(|m| m.is_reachable())
            })
            .collect();
        if targets.is_empty() {
            game.surrender(actor);
            break;
        }
        let target = targets[rng.gen_range(0..targets.len())];
        if !game.submit_move(actor, target.row, target.col) {
            game.surrender(actor);
            break;
        }
    }

    PlayoutRecord {
        outcome: game.outcome().expect("finished playout has an outcome"),
        rounds: rules.countdown - game.countdown(),
    }
}

/// Runs `config.games` playouts in parallel and aggregates the results.
///
/// Deterministic for a fixed config: each game derives its seed from the
/// base seed and its index.
pub fn run_batch(config: &SimConfig) -> BatchStats {
    let records: Vec<PlayoutRecord> = (0..config.games)
        .into_par_iter()
        .map(|i| random_playout(config.seed.wrapping_add(i as u64), &config.rules))
        .collect();
    BatchStats::from_records(&records)
}
