#[cfg(test)]
mod random {
    use std::collections::HashSet;

    use chess_ai_core::{error::SelectError, game::Board, rules::Rules, Engine};
    use random_bot::RandomEngine;

    const GAMES: u64 = 10;
    const MAX_PLIES: usize = 200;

    #[test]
    fn random_game() {
        for seed in 0..GAMES {
            let mut bot = RandomEngine::seeded(seed);
            let mut b = Board::default();

            while b.history_len() < MAX_PLIES && !b.is_game_over() {
                let before = b.clone();
                let m = bot.best_move(&mut b).unwrap();
                assert_eq!(b, before);
                assert!(b.legal_moves().contains(&m));
                b.push(&m);
            }

            println!("Game {seed} ended after {} plies: {:?}", b.history_len(), b.outcome());
        }
    }

    #[test]
    fn start_position_only_yields_opening_moves() {
        let mut bot = RandomEngine::seeded(7);
        let mut board = Board::default();
        let legal: HashSet<_> = board.legal_moves().into_iter().collect();
        assert_eq!(legal.len(), 20);

        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let m = bot.best_move(&mut board).unwrap();
            assert!(legal.contains(&m), "{m} is not an opening move");
            seen.insert(m);
        }

        // 1000 uniform draws from 20 moves hit every one of them
        assert_eq!(seen, legal);
        assert_eq!(board, Board::default());
    }

    #[test]
    fn same_seed_same_moves() {
        let mut a = RandomEngine::seeded(42);
        let mut b = RandomEngine::seeded(42);
        let mut board = Board::default();

        for _ in 0..50 {
            assert_eq!(a.best_move(&mut board).unwrap(), b.best_move(&mut board).unwrap());
        }
    }

    #[test]
    fn no_legal_moves() {
        let mut bot = RandomEngine::seeded(0);
        for fen in [
            "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1",
            "k7/8/1Q6/8/8/8/8/1K6 b - - 0 1",
        ] {
            let mut board = Board::from_fen(fen).unwrap();
            assert_eq!(bot.best_move(&mut board), Err(SelectError::NoLegalMoves));
        }
    }

    #[test]
    fn single_legal_move() {
        let mut bot = RandomEngine::seeded(3);
        let mut board = Board::from_fen("k5r1/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 1);

        for _ in 0..10 {
            assert_eq!(bot.best_move(&mut board).unwrap(), moves[0]);
        }
    }
}
