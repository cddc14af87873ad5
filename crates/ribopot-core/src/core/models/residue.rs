use nalgebra::Point3;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseType {
    Adenine,  // A
    Cytosine, // C
    Guanine,  // G
    Uracil,   // U
}

static BASE_TYPE_CODES: Map<&'static str, BaseType> = phf_map! {
    "A" => BaseType::Adenine,
    "C" => BaseType::Cytosine,
    "G" => BaseType::Guanine,
    "U" => BaseType::Uracil,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown base type: '{0}'")]
pub struct ParseBaseTypeError(pub String);

impl BaseType {
    pub const ALL: [BaseType; 4] = [
        BaseType::Adenine,
        BaseType::Cytosine,
        BaseType::Guanine,
        BaseType::Uracil,
    ];

    /// Looks up a residue name as written in a structure file.
    ///
    /// Only the exact one-letter codes are recognized; modified nucleotides and
    /// deoxy names (`DA`, `PSU`, ...) yield `None`.
    pub fn from_residue_name(name: &str) -> Option<Self> {
        BASE_TYPE_CODES.get(name).copied()
    }

    pub fn code(self) -> char {
        match self {
            BaseType::Adenine => 'A',
            BaseType::Cytosine => 'C',
            BaseType::Guanine => 'G',
            BaseType::Uracil => 'U',
        }
    }
}

impl FromStr for BaseType {
    type Err = ParseBaseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_residue_name(s).ok_or_else(|| ParseBaseTypeError(s.to_string()))
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub chain_id: String,       // Chain identifier from source file (may be empty)
    pub sequence_number: isize, // Residue sequence number from source file
    pub base: BaseType,
    pub position: Point3<f64>, // Coordinate of the representative backbone atom
}

impl Residue {
    pub fn new(
        chain_id: impl Into<String>,
        sequence_number: isize,
        base: BaseType,
        position: Point3<f64>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            sequence_number,
            base,
            position,
        }
    }

    #[inline]
    pub fn sequence_separation(&self, other: &Residue) -> usize {
        self.sequence_number.abs_diff(other.sequence_number)
    }

    #[inline]
    pub fn distance_to(&self, other: &Residue) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}
