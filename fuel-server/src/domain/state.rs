//! US state code type.

use std::fmt;

/// A rejected state abbreviation, carrying the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStateCode {
    #[error("state code {0:?} is not two letters long")]
    Length(String),

    #[error("state code {0:?} must be capital letters A-Z")]
    NotCapitalLetters(String),
}

/// Postal abbreviation of the state a truckstop is in, e.g. `OK` or `WI`.
///
/// Station lookups never filter on state; it is carried for display and
/// for building the geocoding query.
///
/// ```
/// use fuel_server::domain::StateCode;
///
/// let wi = StateCode::parse_normalized("wi ").unwrap();
/// assert_eq!(wi.to_string(), "WI");
/// assert!(StateCode::parse("Wisconsin").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode([u8; 2]);

impl StateCode {
    /// Accept exactly two capital letters, nothing else.
    pub fn parse(s: &str) -> Result<Self, InvalidStateCode> {
        let &[first, second] = s.as_bytes() else {
            return Err(InvalidStateCode::Length(s.to_string()));
        };
        if !(first.is_ascii_uppercase() && second.is_ascii_uppercase()) {
            return Err(InvalidStateCode::NotCapitalLetters(s.to_string()));
        }
        Ok(StateCode([first, second]))
    }

    /// Like `parse`, but tolerates surrounding whitespace and lowercase as
    /// found in the OPIS export.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStateCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Debug for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateCode({})", self.as_str())
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for StateCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for StateCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StateCode::parse(&s).map_err(serde::de::Error::custom)
    }
}
