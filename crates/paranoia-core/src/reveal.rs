//! Coin flip deciding whether a published answer reveals its question.

/// Placeholder shown when the flip lands on "hidden".
pub const SECRET_QUESTION: &str = "Question is kept secret";

/// Injectable randomness source for the 50/50 question reveal, so tests can
/// force both branches.
pub trait Coin: Send + Sync {
    fn flip(&self) -> bool;
}

/// Production coin backed by the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct FairCoin;

impl Coin for FairCoin {
    fn flip(&self) -> bool {
        rand::random::<f64>() < 0.5
    }
}

/// The question text as published: revealed on heads, hidden on tails.
pub fn question_or_hidden(question: &str, coin: &dyn Coin) -> String {
    if coin.flip() {
        question.to_string()
    } else {
        SECRET_QUESTION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(bool);

    impl Coin for Fixed {
        fn flip(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn heads_reveals_the_question() {
        assert_eq!(question_or_hidden("who?", &Fixed(true)), "who?");
    }

    #[test]
    fn tails_hides_the_question() {
        assert_eq!(question_or_hidden("who?", &Fixed(false)), SECRET_QUESTION);
    }
}
