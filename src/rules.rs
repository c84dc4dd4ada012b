//! Board geometry and dice constants for the Royal Game of Ur.
//!
//! Each player's track has 14 spaces numbered 0-13. Spaces 0-3 are the
//! private entry lane, 4-11 are shared with the opponent, and 12-13 are the
//! private exit lane. A piece exits by moving to space 14 on an exact count.

/// Pieces per side.
pub const PIECE_COUNT: usize = 7;

/// Spaces on each player's track.
pub const SPACE_COUNT: usize = 14;

/// Number of binary dice thrown per turn.
pub const DICE_COUNT: usize = 4;

/// Probability of rolling 0..=4 with four binary dice.
pub const ROLL_WEIGHTS: [f64; 5] = [
    1.0 / 16.0,
    4.0 / 16.0,
    6.0 / 16.0,
    4.0 / 16.0,
    1.0 / 16.0,
];

/// Landing on a rosette grants another turn.
pub fn is_rosette(space: i8) -> bool {
    matches!(space, 3 | 7 | 13)
}

/// The middle rosette is also a sanctuary: pieces there cannot be captured.
pub fn is_sanctuary(space: i8) -> bool {
    space == 7
}

/// Spaces contested by both players.
pub fn is_shared(space: i8) -> bool {
    (4..12).contains(&space)
}
