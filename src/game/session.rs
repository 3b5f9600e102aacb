use std::cmp::Ordering;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("range start must be lower than range end")]
    InvalidRange,

    #[error("score log error: {0}")]
    Io(#[from] std::io::Error),
}

/// Feedback for a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TooLow,
    TooHigh,
    Correct,
}

/// One round of the number-guessing game: a hidden target inside an
/// inclusive range and a running attempt counter.
pub struct GuessingGame {
    start: i64,
    end: i64,
    target: i64,
    attempts: u32,
}

impl GuessingGame {
    /// Start a round with a random target in `start..=end`.
    pub fn new(start: i64, end: i64) -> Result<Self, GameError> {
        if start >= end {
            return Err(GameError::InvalidRange);
        }
        Ok(Self::with_target(start, end, rand::random_range(start..=end)))
    }

    fn with_target(start: i64, end: i64, target: i64) -> Self {
        Self {
            start,
            end,
            target,
            attempts: 0,
        }
    }

    /// Evaluate a guess. Every call counts as an attempt, including
    /// repeated values.
    pub fn guess(&mut self, value: i64) -> Outcome {
        self.attempts += 1;
        match value.cmp(&self.target) {
            Ordering::Less => Outcome::TooLow,
            Ordering::Greater => Outcome::TooHigh,
            Ordering::Equal => Outcome::Correct,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn range(&self) -> (i64, i64) {
        (self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_or_empty_range() {
        assert!(matches!(
            GuessingGame::new(10, 5),
            Err(GameError::InvalidRange)
        ));
        assert!(matches!(
            GuessingGame::new(7, 7),
            Err(GameError::InvalidRange)
        ));
    }

    #[test]
    fn test_target_stays_in_range() {
        for _ in 0..50 {
            let game = GuessingGame::new(1, 10).unwrap();
            assert!((1..=10).contains(&game.target));
        }
    }

    #[test]
    fn test_guess_feedback_and_attempt_count() {
        let mut game = GuessingGame::with_target(1, 100, 42);

        assert_eq!(game.guess(10), Outcome::TooLow);
        assert_eq!(game.guess(90), Outcome::TooHigh);
        assert_eq!(game.guess(42), Outcome::Correct);
        assert_eq!(game.attempts(), 3);
    }

    #[test]
    fn test_repeated_guesses_still_count() {
        let mut game = GuessingGame::with_target(1, 10, 5);
        game.guess(3);
        game.guess(3);
        assert_eq!(game.attempts(), 2);
    }
}
