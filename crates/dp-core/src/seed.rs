//! Game seeds: eight uppercase alphanumeric characters.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters a seed may contain.
pub const SEED_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Required seed length.
pub const SEED_LEN: usize = 8;

/// Why a seed string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// Wrong number of characters.
    #[error("seed must be {SEED_LEN} characters, got {0}")]
    Length(usize),

    /// A character outside `A-Z0-9`.
    #[error("seed may only contain A-Z and 0-9, found {0:?}")]
    Character(char),
}

/// A validated game seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Validate a seed string. Lowercase letters are accepted and uppercased.
    pub fn parse(input: &str) -> Result<Self, SeedError> {
        let upper = input.trim().to_ascii_uppercase();
        let len = upper.chars().count();
        if len != SEED_LEN {
            return Err(SeedError::Length(len));
        }
        if let Some(bad) = upper.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(SeedError::Character(bad));
        }
        Ok(Self(upper))
    }

    /// Generate a seed from the given RNG.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let s = (0..SEED_LEN)
            .map(|_| SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())] as char)
            .collect();
        Self(s)
    }

    /// Generate a seed from the thread-local RNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::rng())
    }

    /// Parse user input, substituting a random seed when it is invalid.
    ///
    /// The second value is the validation error when the fallback was used,
    /// so callers can tell the player.
    pub fn parse_or_random(input: &str) -> (Self, Option<SeedError>) {
        match Self::parse(input) {
            Ok(seed) => (seed, None),
            Err(e) => (Self::random(), Some(e)),
        }
    }

    /// The seed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Seed {
    type Error = SeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parse_valid() {
        let seed = Seed::parse("ABCD1234").unwrap();
        assert_eq!(seed.as_str(), "ABCD1234");
    }

    #[test]
    fn parse_uppercases() {
        assert_eq!(Seed::parse("abcd1234").unwrap().as_str(), "ABCD1234");
    }

    #[test]
    fn parse_rejects_length() {
        assert_eq!(Seed::parse("ABC"), Err(SeedError::Length(3)));
        assert_eq!(Seed::parse("ABCDEFGHI"), Err(SeedError::Length(9)));
    }

    #[test]
    fn parse_rejects_symbols() {
        assert_eq!(Seed::parse("ABCD-123"), Err(SeedError::Character('-')));
    }

    #[test]
    fn generated_seeds_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let seed = Seed::generate(&mut rng);
            assert!(Seed::parse(seed.as_str()).is_ok());
        }
    }

    #[test]
    fn fallback_reports_error() {
        let (seed, err) = Seed::parse_or_random("nope");
        assert_eq!(err, Some(SeedError::Length(4)));
        assert_eq!(seed.as_str().len(), SEED_LEN);

        let (seed, err) = Seed::parse_or_random("ZZZZ0000");
        assert!(err.is_none());
        assert_eq!(seed.as_str(), "ZZZZ0000");
    }

    #[test]
    fn serde_validates() {
        let ok: Seed = serde_json::from_str("\"QWER5678\"").unwrap();
        assert_eq!(ok.to_string(), "QWER5678");
        assert!(serde_json::from_str::<Seed>("\"bad\"").is_err());
    }
}
