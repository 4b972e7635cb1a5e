#[cfg(test)]
mod dispatch {
    use std::{collections::HashSet, num::NonZeroU32, str::FromStr};

    use chess_ai_core::{
        error::SelectError,
        eval::evaluate,
        game::{Board, Move},
        rules::{Rules, Tracked},
        uci::{run_uci, UciOptions},
        Engine,
    };
    use greedy_bot::GreedyEngine;
    use minimax_bot::AlphaBetaEngine;
    use opponent::{select_move, select_move_named, Difficulty, Opponent};
    use paste::paste;
    use rand::{rngs::StdRng, SeedableRng};

    const CHECKMATE_FEN: &str = "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1";
    const STALEMATE_FEN: &str = "k7/8/1Q6/8/8/8/8/1K6 b - - 0 1";
    const FORCED_FEN: &str = "k5r1/8/8/8/8/8/8/7K w - - 0 1";
    const MIDGAME_FEN: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

    fn opponent(difficulty: Difficulty) -> Opponent<StdRng> {
        Opponent::with_rng(difficulty, StdRng::seed_from_u64(11))
    }

    macro_rules! selector_tests {
        ($name:ident, $difficulty:expr) => {
            paste! {
                #[test]
                fn [<$name _returns_a_legal_move>]() {
                    for fen in [Board::DEFAULT_FEN, MIDGAME_FEN] {
                        let mut board = Board::from_fen(fen).unwrap();
                        let legal = board.legal_moves();
                        let m = opponent($difficulty).best_move(&mut board).unwrap();
                        assert!(legal.contains(&m), "{m} in {fen}");
                    }
                }

                #[test]
                fn [<$name _fails_without_legal_moves>]() {
                    for fen in [CHECKMATE_FEN, STALEMATE_FEN] {
                        let mut board = Board::from_fen(fen).unwrap();
                        assert_eq!(
                            opponent($difficulty).best_move(&mut board),
                            Err(SelectError::NoLegalMoves)
                        );
                    }
                }

                #[test]
                fn [<$name _plays_the_only_move>]() {
                    let mut board = Board::from_fen(FORCED_FEN).unwrap();
                    assert_eq!(
                        opponent($difficulty).best_move(&mut board),
                        Ok(Move::from_str("h1h2").unwrap())
                    );
                }

                #[test]
                fn [<$name _restores_the_position>]() {
                    let board = Board::from_fen(MIDGAME_FEN).unwrap();
                    let mut tracked = Tracked::new(board.clone());

                    opponent($difficulty).best_move(&mut tracked).unwrap();

                    assert_eq!(tracked.pushes(), tracked.pops());
                    let restored = tracked.into_inner();
                    assert_eq!(restored, board);
                    assert_eq!(restored.legal_moves(), board.legal_moves());
                    assert_eq!(evaluate(&restored), evaluate(&board));
                }
            }
        };
    }

    selector_tests!(random, Difficulty::Random);
    selector_tests!(greedy, Difficulty::Greedy);
    selector_tests!(alphabeta_1, Difficulty::AlphaBeta { depth: NonZeroU32::MIN });
    selector_tests!(hard, Difficulty::HARD);

    #[test]
    fn start_position_by_tier() {
        let mut board = Board::default();
        let legal: HashSet<_> = board.legal_moves().into_iter().collect();
        let first = board.legal_moves()[0].clone();

        let mut easy = opponent(Difficulty::EASY);
        for _ in 0..200 {
            assert!(legal.contains(&select_move(&mut board, &Difficulty::EASY).unwrap()));
            assert!(legal.contains(&easy.best_move(&mut board).unwrap()));
        }

        assert_eq!(select_move(&mut board, &Difficulty::MEDIUM), Ok(first.clone()));
        assert_eq!(
            select_move(&mut board, &Difficulty::AlphaBeta { depth: NonZeroU32::MIN }),
            Ok(first)
        );
        assert_eq!(board, Board::default());
    }

    #[test]
    fn select_move_matches_the_tier_engines() {
        for fen in [Board::DEFAULT_FEN, MIDGAME_FEN, "4k3/8/8/3q4/8/8/3P4/4K3 b - - 0 1"] {
            let mut board = Board::from_fen(fen).unwrap();
            let depth = NonZeroU32::new(2).unwrap();

            assert_eq!(
                select_move(&mut board, &Difficulty::Greedy),
                GreedyEngine.best_move(&mut board),
                "{fen}"
            );
            assert_eq!(
                select_move(&mut board, &Difficulty::AlphaBeta { depth }),
                AlphaBetaEngine::new(depth).best_move(&mut board),
                "{fen}"
            );

            let legal = board.legal_moves();
            let m = select_move(&mut board, &Difficulty::Random).unwrap();
            assert!(legal.contains(&m), "{m} in {fen}");
            assert_eq!(board, Board::from_fen(fen).unwrap());
        }
    }

    #[test]
    fn seeded_random_tier_is_reproducible() {
        let mut board = Board::default();
        let mut a = opponent(Difficulty::Random);
        let mut b = opponent(Difficulty::Random);

        for _ in 0..20 {
            assert_eq!(a.best_move(&mut board), b.best_move(&mut board));
        }
    }

    #[test]
    fn named_dispatch() {
        let mut board = Board::from_fen("4k3/8/8/3q4/8/8/8/K6R b - - 0 1").unwrap();
        let capture = Move::from_str("d5h1").unwrap();

        assert_eq!(select_move_named(&mut board, "medium"), Ok(capture.clone()));
        assert_eq!(select_move_named(&mut board, "hard"), Ok(capture.clone()));
        assert_eq!(select_move_named(&mut board, "alphabeta:2"), Ok(capture));
        assert_eq!(
            select_move_named(&mut board, "nightmare"),
            Err(SelectError::UnknownDifficulty("nightmare".to_string()))
        );
    }

    #[test]
    fn difficulty_option() {
        let mut engine = opponent(Difficulty::Random);
        assert_eq!(
            engine.declarations(),
            vec!["option name Difficulty type string default alphabeta:3".to_string()]
        );

        engine.set_option("Difficulty", "medium").unwrap();
        assert_eq!(engine.difficulty(), Difficulty::Greedy);

        assert!(engine.set_option("Difficulty", "nightmare").is_err());
        assert!(engine.set_option("Hash", "16").is_err());
        assert_eq!(engine.difficulty(), Difficulty::Greedy);
    }

    #[test]
    fn uci_game() {
        let input = "uci\n\
            setoption name Difficulty value greedy\n\
            position fen 4k3/8/8/3q4/8/8/8/K6R b - - 0 1\n\
            go\n\
            setoption name Difficulty value alphabeta:2\n\
            position fen 4k3/8/8/3q4/8/8/3P4/4K3 b - - 0 1\n\
            go\n\
            quit\n";
        let mut engine = opponent(Difficulty::Random);
        let mut out = Vec::new();

        run_uci("Opponent", &mut engine, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let bestmoves: Vec<_> = out.lines().filter(|l| l.starts_with("bestmove")).collect();
        assert_eq!(bestmoves.len(), 2);
        assert_eq!(bestmoves[0], "bestmove d5h1");
        assert_ne!(bestmoves[1], "bestmove d5d2");
        assert_eq!(engine.difficulty(), Difficulty::AlphaBeta { depth: NonZeroU32::new(2).unwrap() });
    }
}
