use ur_solver::notation::{format_game, format_player, parse_game, parse_player};
use ur_solver::player::PlayerPosition;
use ur_solver::position::GamePosition;

#[test]
fn test_start_positions() {
    assert_eq!(
        parse_player("7 ---- -------- --").unwrap(),
        PlayerPosition::default()
    );
    assert_eq!(
        parse_game("7/7 ----/---- -------- --/--").unwrap(),
        GamePosition::default()
    );
}

#[test]
fn test_player_roundtrip() {
    for text in [
        "7 ---- -------- --",
        "0 ---- -------- --",
        "3 X--X X------- -X",
        "0 XX-- X-----X- XX",
    ] {
        assert_eq!(format_player(parse_player(text).unwrap()), text);
    }
}

#[test]
fn test_game_roundtrip() {
    for text in [
        "7/7 ----/---- -------- --/--",
        "3/4 X--X/-O-- X--O---- XX/--",
        "0/0 ----/---- XOXOXOXO --/--",
        "0/0 XXXX/OOOO -------- XX/OO",
    ] {
        assert_eq!(format_game(parse_game(text).unwrap()), text);
    }
}

#[test]
fn test_shared_spaces_show_both_sides() {
    let pos = parse_game("5/5 ----/---- X------O --/--").unwrap();
    assert!(pos.attacker().occupies(4));
    assert!(pos.defender().occupies(11));
}

#[test]
fn test_rejects_malformed_input() {
    assert!(parse_player("").is_err());
    assert!(parse_player("7 ---- --------").is_err());
    assert!(parse_player("9 ---- -------- --").is_err());
    assert!(parse_game("3/4 X--X/-O--").is_err());
    assert!(parse_game("x/4 X--X/-O-- X--O---- XX/--").is_err());
}

#[test]
fn test_rejects_too_many_pieces() {
    // Seven waiting plus a piece on the board is one too many.
    assert!(parse_player("7 X--- -------- --").is_err());
    assert!(parse_game("7/0 X---/---- -------- --/--").is_err());
}
