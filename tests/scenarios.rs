use rust_chess_rules::input::{Cursor, Direction};
use rust_chess_rules::{
    attempt_move, evaluate, is_checkmate, is_in_check, legal_destinations, legal_moves, Color, Game,
    GameState, GameStatus, MoveOutcome, Piece, PieceType, SelectionEvent, SelectionState, Square,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play_all(state: &mut GameState, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        assert_eq!(attempt_move(state, sq(from), sq(to)).unwrap(), MoveOutcome::Accepted, "{from}{to}");
    }
}

/// Checkmate holds exactly when the side is in check and no piece of it has anywhere to go.
fn assert_checkmate_matches_destinations(state: &GameState, color: Color) {
    let no_destinations = state
        .board()
        .pieces_of(color)
        .all(|(from, _)| legal_destinations(state, from).unwrap().is_empty());
    let expected = is_in_check(state, color).unwrap() && no_destinations;
    assert_eq!(is_checkmate(state, color).unwrap(), expected, "{}", state.to_placement());
}

#[test]
fn pawn_cannot_push_into_a_blocked_square() {
    let mut state = GameState::new();
    play_all(&mut state, &[("e2", "e4"), ("e7", "e5")]);
    let before = state.zobrist_key();
    assert_eq!(attempt_move(&mut state, sq("e4"), sq("e5")).unwrap(), MoveOutcome::RejectedIllegalGeometry);
    assert_eq!(state.zobrist_key(), before);
    assert_eq!(state.side_to_move(), Color::White);
}

#[test]
fn castling_both_ways_relocates_the_rook() {
    let placement = "4k3/8/8/8/8/8/8/R3K2R";

    let mut state = GameState::from_placement(placement, Color::White).unwrap();
    assert_eq!(attempt_move(&mut state, sq("e1"), sq("g1")).unwrap(), MoveOutcome::Accepted);
    assert_eq!(state.piece_at(sq("g1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(state.piece_at(sq("f1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(state.piece_at(sq("h1")), None);
    assert!(state.castling_rights().king_moved(Color::White));

    let mut state = GameState::from_placement(placement, Color::White).unwrap();
    assert_eq!(attempt_move(&mut state, sq("e1"), sq("c1")).unwrap(), MoveOutcome::Accepted);
    assert_eq!(state.piece_at(sq("c1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(state.piece_at(sq("d1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(state.piece_at(sq("a1")), None);
}

#[test]
fn castling_is_gone_once_the_king_has_moved() {
    let mut state = GameState::from_placement("4k3/8/8/8/8/8/8/R3K2R", Color::White).unwrap();
    play_all(&mut state, &[("e1", "e2"), ("e8", "d8"), ("e2", "e1"), ("d8", "e8")]);
    assert_eq!(attempt_move(&mut state, sq("e1"), sq("g1")).unwrap(), MoveOutcome::RejectedIllegalGeometry);
    assert_eq!(attempt_move(&mut state, sq("e1"), sq("c1")).unwrap(), MoveOutcome::RejectedIllegalGeometry);
}

#[test]
fn rook_and_king_mate_a_lone_king() {
    let mut state = GameState::from_placement("k7/8/1K6/8/8/8/8/7R", Color::White).unwrap();
    assert!(!is_checkmate(&state, Color::Black).unwrap());
    assert_eq!(attempt_move(&mut state, sq("h1"), sq("h8")).unwrap(), MoveOutcome::Accepted);
    assert!(is_in_check(&state, Color::Black).unwrap());
    assert!(is_checkmate(&state, Color::Black).unwrap());
    assert_eq!(evaluate(&state).unwrap(), GameStatus::Checkmate { winner: Color::White, loser: Color::Black });
    assert_checkmate_matches_destinations(&state, Color::Black);
}

#[test]
fn checkmate_agrees_with_destination_sets() {
    let positions = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White),
        ("6k1/8/8/8/8/8/6PP/r6K", Color::White),
        ("6k1/8/8/8/8/8/5BPP/r6K", Color::White),
        ("4r2k/8/8/8/8/8/8/4K3", Color::White),
        ("k7/8/1Q6/8/8/8/8/2K5", Color::Black),
    ];
    for (placement, side) in positions {
        let state = GameState::from_placement(placement, side).unwrap();
        assert_checkmate_matches_destinations(&state, side);
    }
}

#[test]
fn pinned_piece_cannot_expose_its_king() {
    let mut state = GameState::from_placement("4k3/4r3/8/8/8/8/4B3/4K3", Color::White).unwrap();
    let before = state.clone();
    assert_eq!(attempt_move(&mut state, sq("e2"), sq("d3")).unwrap(), MoveOutcome::RejectedSelfCheck);
    assert_eq!(state, before);
    assert_eq!(state.zobrist_key(), before.zobrist_key());
    assert!(legal_destinations(&state, sq("e2")).unwrap().is_empty());
}

#[test]
fn accepted_moves_never_leave_the_mover_in_check() {
    let mut state = GameState::new();
    play_all(&mut state, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);
    // Black is in check from h5; only g7g6 answers it
    assert!(is_in_check(&state, Color::Black).unwrap());
    let replies = legal_moves(&state).unwrap();
    assert_eq!(replies, vec![(sq("g7"), sq("g6"))]);
    for (from, to) in legal_moves(&GameState::new()).unwrap() {
        let mut trial = GameState::new();
        assert_eq!(attempt_move(&mut trial, from, to).unwrap(), MoveOutcome::Accepted);
        assert!(!is_in_check(&trial, Color::White).unwrap());
    }
}

#[test]
fn own_pieces_and_out_of_turn_moves_are_rejected() {
    let mut state = GameState::new();
    assert_eq!(attempt_move(&mut state, sq("d1"), sq("d2")).unwrap(), MoveOutcome::RejectedIllegalGeometry);
    assert_eq!(attempt_move(&mut state, sq("b1"), sq("d2")).unwrap(), MoveOutcome::RejectedIllegalGeometry);
    assert_eq!(attempt_move(&mut state, sq("e7"), sq("e5")).unwrap(), MoveOutcome::RejectedOutOfTurn);
    assert_eq!(attempt_move(&mut state, sq("e4"), sq("e5")).unwrap(), MoveOutcome::RejectedOutOfTurn);
    assert_eq!(state, GameState::new());
}

#[test]
fn pawn_reaching_the_far_rank_becomes_a_queen() {
    let mut state = GameState::from_placement("8/P6k/8/8/8/8/8/4K3", Color::White).unwrap();
    assert_eq!(attempt_move(&mut state, sq("a7"), sq("a8")).unwrap(), MoveOutcome::Accepted);
    assert_eq!(state.piece_at(sq("a8")), Some(Piece::new(PieceType::Queen, Color::White)));
}

#[test]
fn cursor_driven_session_plays_a_move() {
    let mut game = Game::new();
    let mut selection = SelectionState::new();
    let mut cursor = Cursor::default();

    let event = selection.confirm(&mut game, cursor.square()).unwrap();
    assert_eq!(event, SelectionEvent::Selected { square: sq("e2"), destinations: 2 });
    cursor.step(Direction::Up);
    cursor.step(Direction::Up);
    let event = selection.confirm(&mut game, cursor.square()).unwrap();
    assert_eq!(event, SelectionEvent::Moved { from: sq("e2"), to: sq("e4"), outcome: MoveOutcome::Accepted });
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn fools_mate_ends_the_game() {
    let mut game = Game::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        assert_eq!(game.play(sq(from), sq(to)).unwrap(), MoveOutcome::Accepted);
    }
    let status = game.status().unwrap();
    assert!(status.is_terminal());
    assert_eq!(status, GameStatus::Checkmate { winner: Color::Black, loser: Color::White });
    assert_eq!(game.history().last().unwrap().notation(), "d8h4#");
}
