use minesweeper_engine::{Board, CellView, EngineError, GameState, Pos};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn two_by_two_win() {
    init_tracing();
    let mut board = Board::with_mines(2, 2, &[Pos::new(0, 0)]).unwrap();

    let result = board.reveal(Pos::new(1, 1)).unwrap();
    assert_eq!(result.state, GameState::InProgress);
    assert_eq!(result.updates.len(), 1);
    assert!(result.disclosed.is_empty());
    assert_eq!(board.revealed_count(), 1);
    assert_eq!(
        board.cell(Pos::new(1, 1)).unwrap(),
        CellView {
            is_revealed: true,
            is_flagged: false,
            is_mine: false,
            adjacent_mine_count: 1,
        }
    );

    let result = board.reveal(Pos::new(0, 1)).unwrap();
    assert_eq!(result.state, GameState::InProgress);

    let result = board.reveal(Pos::new(1, 0)).unwrap();
    assert_eq!(board.revealed_count(), 3);
    assert_eq!(result.state, GameState::Won);
    assert_eq!(board.state(), GameState::Won);
    assert_eq!(result.disclosed, vec![Pos::new(0, 0)]);

    let mine = board.cell(Pos::new(0, 0)).unwrap();
    assert!(mine.is_mine);
    assert!(mine.is_revealed);
    // disclosure is not counted as a reveal
    assert_eq!(board.revealed_count(), 3);
}

#[test]
fn one_by_two_loss() {
    init_tracing();
    let mut board = Board::with_mines(1, 2, &[Pos::new(0, 0)]).unwrap();

    let result = board.reveal(Pos::new(0, 0)).unwrap();
    assert_eq!(result.state, GameState::Lost);
    assert_eq!(result.disclosed, vec![Pos::new(0, 0)]);
    assert_eq!(result.updates.len(), 1);
    assert!(board.cell(Pos::new(0, 0)).unwrap().is_revealed);
    assert_eq!(board.revealed_count(), 0);
}

#[test]
fn loss_discloses_every_mine_and_keeps_flags() {
    init_tracing();
    let mines = [Pos::new(0, 0), Pos::new(2, 2), Pos::new(0, 2)];
    let mut board = Board::with_mines(3, 3, &mines).unwrap();
    assert!(board.toggle_flag(Pos::new(2, 2)).unwrap());

    let result = board.reveal(Pos::new(0, 2)).unwrap();
    assert_eq!(result.state, GameState::Lost);

    let mut disclosed = result.disclosed.clone();
    disclosed.sort_by_key(|p| (p.row, p.col));
    assert_eq!(disclosed, vec![Pos::new(0, 0), Pos::new(0, 2), Pos::new(2, 2)]);

    for pos in mines {
        assert!(board.cell(pos).unwrap().is_revealed);
    }
    assert!(board.cell(Pos::new(2, 2)).unwrap().is_flagged);
    assert!(!board.cell(Pos::new(1, 1)).unwrap().is_revealed);
}

#[test]
fn finished_game_ignores_further_actions() {
    let mut board = Board::with_mines(1, 3, &[Pos::new(0, 0)]).unwrap();
    board.reveal(Pos::new(0, 0)).unwrap();
    assert_eq!(board.state(), GameState::Lost);

    let result = board.reveal(Pos::new(0, 2)).unwrap();
    assert!(result.is_unchanged());
    assert_eq!(result.state, GameState::Lost);
    assert!(!board.cell(Pos::new(0, 2)).unwrap().is_revealed);

    assert!(!board.toggle_flag(Pos::new(0, 2)).unwrap());
    assert_eq!(board.flag_count(), 0);
}

#[test]
fn flagged_cell_cannot_be_revealed_until_unflagged() {
    let mut board = Board::with_mines(2, 3, &[Pos::new(0, 0)]).unwrap();
    let target = Pos::new(1, 2);

    assert!(board.toggle_flag(target).unwrap());
    let result = board.reveal(target).unwrap();
    assert!(result.is_unchanged());
    assert!(!board.cell(target).unwrap().is_revealed);

    assert!(!board.toggle_flag(target).unwrap());
    let result = board.reveal(target).unwrap();
    assert!(!result.is_unchanged());
    assert!(board.cell(target).unwrap().is_revealed);
}

#[test]
fn flagging_a_revealed_cell_is_a_no_op() {
    let mut board = Board::with_mines(2, 3, &[Pos::new(0, 0)]).unwrap();
    let target = Pos::new(1, 1);
    board.reveal(target).unwrap();

    assert!(!board.toggle_flag(target).unwrap());
    assert!(!board.cell(target).unwrap().is_flagged);
    assert_eq!(board.flag_count(), 0);
}

#[test]
fn repeat_reveal_is_unchanged() {
    let mut board = Board::with_mines(5, 5, &[Pos::new(4, 4)]).unwrap();
    board.reveal(Pos::new(3, 3)).unwrap();
    let before = board.revealed_count();
    assert_eq!(before, 1);

    let result = board.reveal(Pos::new(3, 3)).unwrap();
    assert!(result.is_unchanged());
    assert_eq!(board.revealed_count(), before);
}

#[test]
fn flood_fill_reveals_bordering_numbers() {
    // . . . . x
    // . . . . .
    // x . . . .
    let mut board = Board::with_mines(3, 5, &[Pos::new(0, 4), Pos::new(2, 0)]).unwrap();

    let result = board.reveal(Pos::new(0, 0)).unwrap();
    assert_eq!(result.state, GameState::Won);
    assert_eq!(board.revealed_count(), 13);

    let snapshot = board.snapshot();
    assert_eq!(snapshot.len(), 3);
    assert!(snapshot.iter().all(|row| row.len() == 5));
    assert_eq!(snapshot[1][0].adjacent_mine_count, 1);
    assert_eq!(snapshot[0][3].adjacent_mine_count, 1);
    assert_eq!(snapshot[1][2].adjacent_mine_count, 0);
}

#[test]
fn invalid_configurations_are_rejected() {
    let err = Board::new(minesweeper_engine::GameParams {
        rows: 3,
        cols: 3,
        mines: 9,
    })
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    assert_eq!(
        err.to_string(),
        "invalid board configuration 3x3 with 9 mines: mine count must be smaller than the number of cells"
    );
}

#[test]
fn reveal_result_serializes_for_a_frontend() {
    let mut board = Board::with_mines(1, 2, &[Pos::new(0, 1)]).unwrap();
    let result = board.reveal(Pos::new(0, 0)).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["state"], "won");
    assert_eq!(json["updates"][0]["pos"]["row"], 0);
    assert_eq!(json["updates"][0]["value"]["adjacent_mine_count"], 1);
    assert_eq!(json["disclosed"][0]["col"], 1);
}
