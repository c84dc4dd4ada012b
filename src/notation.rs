//! Human-readable position notation.
//!
//! A single side is written as `"3 X--X X------- -X"`: the wait count, the
//! four entry spaces (0-3), the eight shared spaces (4-11), and the two
//! final spaces (12-13), with `X` marking an occupied space.
//!
//! A game position is written as `"3/4 X--X/-O-- X--O---- XX/--"`: wait
//! counts as attacker/defender, the entry lanes of both sides, the shared
//! spaces (`X` attacker, `O` defender), and both exit lanes.

use crate::error::{UrError, UrResult};
use crate::player::PlayerPosition;
use crate::position::GamePosition;

/// Character positions of each board space within the player string.
const PLAYER_SPACES: [usize; 14] = [2, 3, 4, 5, 7, 8, 9, 10, 11, 12, 13, 14, 16, 17];

/// Character positions of the attacker's spaces within the game string.
const ATTACKER_SPACES: [usize; 14] = [4, 5, 6, 7, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24];

/// Character positions of the defender's spaces within the game string.
const DEFENDER_SPACES: [usize; 14] = [9, 10, 11, 12, 14, 15, 16, 17, 18, 19, 20, 21, 26, 27];

fn extract_bitboard(chars: &[char], indices: &[usize; 14], token: char) -> u16 {
    let mut bitboard = 0u16;
    for (bit, &at) in indices.iter().enumerate() {
        if chars[at] == token {
            bitboard |= 1 << bit;
        }
    }
    bitboard
}

fn wait_digit(text: &str, c: char) -> UrResult<i8> {
    c.to_digit(10)
        .filter(|&d| d <= 7)
        .map(|d| d as i8)
        .ok_or_else(|| UrError::InvalidNotation(text.to_string()))
}

/// Parse a single-side position such as `"3 ---- X--X---- -X"`.
pub fn parse_player(text: &str) -> UrResult<PlayerPosition> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 18 {
        return Err(UrError::InvalidNotation(text.to_string()));
    }
    let bitboard = extract_bitboard(&chars, &PLAYER_SPACES, 'X');
    let wait_count = wait_digit(text, chars[0])?;

    let pos = PlayerPosition::new(bitboard, wait_count);
    if !pos.is_valid() {
        return Err(UrError::InvalidNotation(text.to_string()));
    }
    Ok(pos)
}

/// Parse a game position such as `"3/4 X--X/-O-- X--O---- XX/--"`.
pub fn parse_game(text: &str) -> UrResult<GamePosition> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 28 {
        return Err(UrError::InvalidNotation(text.to_string()));
    }

    let attacker = PlayerPosition::new(
        extract_bitboard(&chars, &ATTACKER_SPACES, 'X'),
        wait_digit(text, chars[0])?,
    );
    let defender = PlayerPosition::new(
        extract_bitboard(&chars, &DEFENDER_SPACES, 'O'),
        wait_digit(text, chars[2])?,
    );

    let pos = GamePosition::new(attacker, defender);
    if !pos.is_valid() {
        return Err(UrError::InvalidNotation(text.to_string()));
    }
    Ok(pos)
}

fn span(position: PlayerPosition, spaces: std::ops::Range<i8>, token: char) -> String {
    spaces
        .map(|s| if position.occupies(s) { token } else { '-' })
        .collect()
}

/// Format a single-side position in the notation accepted by
/// [`parse_player`].
pub fn format_player(position: PlayerPosition) -> String {
    format!(
        "{} {} {} {}",
        position.wait_count(),
        span(position, 0..4, 'X'),
        span(position, 4..12, 'X'),
        span(position, 12..14, 'X'),
    )
}

/// Format a game position in the notation accepted by [`parse_game`].
pub fn format_game(position: GamePosition) -> String {
    let attacker = position.attacker();
    let defender = position.defender();

    let shared: String = (4..12)
        .map(|s| {
            if attacker.occupies(s) {
                'X'
            } else if defender.occupies(s) {
                'O'
            } else {
                '-'
            }
        })
        .collect();

    format!(
        "{}/{} {}/{} {} {}/{}",
        attacker.wait_count(),
        defender.wait_count(),
        span(attacker, 0..4, 'X'),
        span(defender, 0..4, 'O'),
        shared,
        span(attacker, 12..14, 'X'),
        span(defender, 12..14, 'O'),
    )
}
