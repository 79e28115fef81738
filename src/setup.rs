//! Match setup: randomized board generation and unit placement.
//!
//! All randomness comes from an injected RNG so tests and self-play can
//! supply deterministic sequences.

use rand::Rng;

use crate::board::{Board, Coord, Token};
use crate::game::Rules;

/// Generates a starting board.
///
/// Each cell is drawn independently: a wall with `rules.wall_chance`,
/// otherwise a village with `rules.village_chance`, otherwise empty. The
/// wall draw happens first, so the effective village rate is
/// `village_chance` of the remainder.
pub fn generate(rules: &Rules, rng: &mut impl Rng) -> Board {
    let mut board = Board::new(rules.board_size);
    for row in 0..rules.board_size {
        for col in 0..rules.board_size {
            let token = if rng.gen::<f64>() < rules.wall_chance {
                Token::Wall
            } else if rng.gen::<f64>() < rules.village_chance {
                Token::Village { organized: false }
            } else {
                Token::Empty
            };
            board.set(Coord::new(row, col), token);
        }
    }
    board
}

/// Places the mobile unit on a uniformly random empty cell.
///
/// Draws k from `[1, size^2]` and walks empty cells in row-major order,
/// wrapping around until the count runs out; equivalent to picking the
/// `(k - 1) mod empties`-th empty cell. Returns false if the board has no
/// empty cell at all, in which case the caller regenerates.
pub fn place_unit(board: &mut Board, rng: &mut impl Rng) -> bool {
    let empties = board.count_empty();
    if empties == 0 {
        return false;
    }
    let size = board.size();
    let draw = rng.gen_range(1..=size * size);
    let target = (draw - 1) % empties;

    let at = board
        .cells()
        .filter(|(_, t)| matches!(t, Token::Empty))
        .nth(target)
        .map(|(c, _)| c);
    match at {
        Some(c) => board.set(c, Token::Unit { on_village: false }),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generate_uses_only_starting_kinds() {
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(42);
        let board = generate(&rules, &mut rng);
        assert_eq!(board.size(), 25);
        for (_, token) in board.cells() {
            assert!(matches!(
                token,
                Token::Empty | Token::Wall | Token::Village { organized: false }
            ));
        }
    }

    #[test]
    fn generate_is_deterministic_for_a_seed() {
        let rules = Rules::default();
        let a = generate(&rules, &mut StdRng::seed_from_u64(9));
        let b = generate(&rules, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn generated_density_is_plausible() {
        // 625 cells at 20% walls / 8% villages; loose bounds, fixed seed.
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(1);
        let board = generate(&rules, &mut rng);
        let walls = board.cells().filter(|(_, t)| matches!(t, Token::Wall)).count();
        let villages = board
            .cells()
            .filter(|(_, t)| matches!(t, Token::Village { .. }))
            .count();
        assert!((75..=175).contains(&walls), "walls: {}", walls);
        assert!((20..=90).contains(&villages), "villages: {}", villages);
    }

    #[test]
    fn place_unit_lands_on_an_empty_cell() {
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = generate(&rules, &mut rng);
        let before_empty = board.count_empty();

        assert!(place_unit(&mut board, &mut rng));
        let at = board.find_unit().expect("unit placed");
        assert_eq!(board.get(at), Some(&Token::Unit { on_village: false }));
        assert_eq!(board.count_empty(), before_empty - 1);
    }

    #[test]
    fn place_unit_fails_with_no_empty_cells() {
        let mut board = Board::new(2);
        for c in board.coords().collect::<Vec<_>>() {
            board.set(c, Token::Wall);
        }
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!place_unit(&mut board, &mut rng));
        assert_eq!(board.find_unit(), None);
    }

    #[test]
    fn place_unit_succeeds_with_one_empty_cell() {
        let mut board = Board::new(3);
        for c in board.coords().collect::<Vec<_>>() {
            board.set(c, Token::Wall);
        }
        board.set(Coord::new(1, 1), Token::Empty);
        let mut rng = StdRng::seed_from_u64(11);
        assert!(place_unit(&mut board, &mut rng));
        assert_eq!(board.find_unit(), Some(Coord::new(1, 1)));
    }
}
