use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters in a library card number.
pub const PATRON_ID_LENGTH: usize = 6;

/// Library card number of a patron.
///
/// Patrons are not stored entities; the card number is their only identity
/// and everything else is derived from borrow records.
/// Invariant: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatronId(String);

/// Patron id that is not exactly six digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPatronId;

impl PatronId {
    /// Parses a raw card number. Surrounding whitespace is not tolerated.
    pub fn parse(raw: &str) -> Result<Self, InvalidPatronId> {
        if raw.len() == PATRON_ID_LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidPatronId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PatronId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).map_err(|_| format!("invalid patron id: {}", value))
    }
}

impl From<PatronId> for String {
    fn from(id: PatronId) -> Self {
        id.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog identifier of a book, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Store-assigned ids start at 1.
    pub fn is_well_formed(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
