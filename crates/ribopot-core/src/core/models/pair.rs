use super::residue::BaseType;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical, order-independent identifier for a pair of base types.
///
/// The two bases are stored sorted, so `PairKey::new(C, A)` and `PairKey::new(A, C)`
/// are the same key and both display as `"AC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    first: BaseType,
    second: BaseType,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePairKeyError {
    #[error("Pair key '{0}' must be exactly two characters")]
    InvalidLength(String),
    #[error("Pair key '{0}' contains an unknown base type")]
    UnknownBase(String),
    #[error("Pair key '{0}' is not in canonical order (expected '{1}')")]
    NotCanonical(String, PairKey),
}

impl PairKey {
    /// The ten canonical keys in their fixed output order.
    pub const ALL: [PairKey; 10] = {
        use crate::core::models::residue::BaseType::*;
        [
            PairKey::canonical(Adenine, Adenine),
            PairKey::canonical(Adenine, Cytosine),
            PairKey::canonical(Adenine, Guanine),
            PairKey::canonical(Adenine, Uracil),
            PairKey::canonical(Cytosine, Cytosine),
            PairKey::canonical(Cytosine, Guanine),
            PairKey::canonical(Cytosine, Uracil),
            PairKey::canonical(Guanine, Guanine),
            PairKey::canonical(Guanine, Uracil),
            PairKey::canonical(Uracil, Uracil),
        ]
    };

    const fn canonical(first: BaseType, second: BaseType) -> Self {
        Self { first, second }
    }

    pub fn new(a: BaseType, b: BaseType) -> Self {
        if a <= b {
            Self::canonical(a, b)
        } else {
            Self::canonical(b, a)
        }
    }

    pub fn bases(&self) -> (BaseType, BaseType) {
        (self.first, self.second)
    }

    /// Name of the score-table file holding this pair's profile.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

impl FromStr for PairKey {
    type Err = ParsePairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParsePairKeyError::InvalidLength(s.to_string()));
        };
        let parse = |c: char| {
            BaseType::from_residue_name(c.encode_utf8(&mut [0; 4]))
                .ok_or_else(|| ParsePairKeyError::UnknownBase(s.to_string()))
        };
        let (a, b) = (parse(a)?, parse(b)?);
        let key = PairKey::new(a, b);
        if (a, b) != key.bases() {
            return Err(ParsePairKeyError::NotCanonical(s.to_string(), key));
        }
        Ok(key)
    }
}
