//! Turn-taking state machine for playing out a full game.

use rand::Rng;

use crate::player::Move;
use crate::position::GamePosition;
use crate::rules::DICE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerColor {
    White,
    Black,
}

impl PlayerColor {
    pub fn other(self) -> PlayerColor {
        match self {
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Black => PlayerColor::White,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerColor::White => 0,
            PlayerColor::Black => 1,
        }
    }

    pub fn random(rng: &mut impl Rng) -> PlayerColor {
        if rng.gen_bool(0.5) {
            PlayerColor::White
        } else {
            PlayerColor::Black
        }
    }
}

/// A game in progress. The position is always stored from the perspective
/// of `player_to_move`.
pub struct GameModel {
    player_to_move: PlayerColor,
    position: GamePosition,
    dice: [u8; DICE_COUNT],
}

impl GameModel {
    pub fn new(first_player: PlayerColor) -> Self {
        GameModel {
            player_to_move: first_player,
            position: GamePosition::default(),
            dice: [0; DICE_COUNT],
        }
    }

    pub fn player_to_move(&self) -> PlayerColor {
        self.player_to_move
    }

    pub fn position(&self) -> GamePosition {
        self.position
    }

    pub fn dice(&self) -> [u8; DICE_COUNT] {
        self.dice
    }

    pub fn is_over(&self) -> bool {
        self.position.is_terminal()
    }

    /// When the game is over, the player to move is the loser.
    pub fn winner(&self) -> PlayerColor {
        assert!(self.is_over());
        self.player_to_move.other()
    }

    /// Throw the four binary dice and return the total.
    pub fn roll_dice(&mut self, rng: &mut impl Rng) -> usize {
        for die in self.dice.iter_mut() {
            *die = rng.gen_range(0..=1);
        }
        self.dice.iter().map(|&d| d as usize).sum()
    }

    /// Advance the game by one move; `None` means no move was available
    /// and the turn simply passes.
    pub fn make_move(&mut self, mv: Option<Move>) {
        match mv {
            Some(mv) => {
                if self.position.apply(mv) {
                    self.player_to_move = self.player_to_move.other();
                }
            }
            None => {
                self.position = self.position.reversed();
                self.player_to_move = self.player_to_move.other();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dice_total_in_range() {
        let mut game = GameModel::new(PlayerColor::White);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let roll = game.roll_dice(&mut rng);
            assert!(roll <= DICE_COUNT);
        }
    }

    #[test]
    fn passing_swaps_the_player() {
        let mut game = GameModel::new(PlayerColor::White);
        game.make_move(None);
        assert_eq!(game.player_to_move(), PlayerColor::Black);
        assert_eq!(game.position(), GamePosition::default());
    }
}
