//! Active route selection.
//!
//! The selection is stored as a single string: the pair id for the forward
//! direction, or `flipped-<pair id>` for the reverse direction. Internally it
//! is a pair id plus a [`Direction`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::route_pair::PairId;

/// Prefix marking a reversed selection in its stored form.
pub const FLIPPED_PREFIX: &str = "flipped-";

/// Direction a saved pair is travelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

/// Which pair is active, and in which direction.
///
/// # Examples
///
/// ```
/// use enturbar::domain::{Direction, Selection};
///
/// let sel: Selection = "flipped-A-B".parse().unwrap();
/// assert_eq!(sel.pair_id().as_str(), "A-B");
/// assert_eq!(sel.direction(), Direction::Reverse);
/// assert_eq!(sel.to_string(), "flipped-A-B");
///
/// assert!("flipped-".parse::<Selection>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selection {
    pair_id: PairId,
    direction: Direction,
}

impl Selection {
    pub fn new(pair_id: PairId, direction: Direction) -> Self {
        Self { pair_id, direction }
    }

    /// Select a pair in the direction it was entered.
    pub fn forward(pair_id: PairId) -> Self {
        Self::new(pair_id, Direction::Forward)
    }

    /// Select a pair travelled from its `to` stop back to its `from` stop.
    pub fn reverse(pair_id: PairId) -> Self {
        Self::new(pair_id, Direction::Reverse)
    }

    /// Parse the stored form. Only one `flipped-` prefix is stripped.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let (raw, direction) = match s.strip_prefix(FLIPPED_PREFIX) {
            Some(rest) => (rest, Direction::Reverse),
            None => (s, Direction::Forward),
        };
        if raw.is_empty() {
            return Err(DomainError::EmptySelection(s.to_string()));
        }
        Ok(Self::new(PairId::from_raw(raw), direction))
    }

    pub fn pair_id(&self) -> &PairId {
        &self.pair_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_reversed(&self) -> bool {
        self.direction == Direction::Reverse
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Forward => write!(f, "{}", self.pair_id),
            Direction::Reverse => write!(f, "{FLIPPED_PREFIX}{}", self.pair_id),
        }
    }
}

impl FromStr for Selection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Selection {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Selection> for String {
    fn from(sel: Selection) -> Self {
        sel.to_string()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Stored form survives parse then display in both directions
        #[test]
        fn roundtrip(id in "NSR:StopPlace:[0-9]{1,6}-NSR:StopPlace:[0-9]{1,6}", reversed in any::<bool>()) {
            let stored = if reversed { format!("flipped-{id}") } else { id.clone() };
            let sel = Selection::parse(&stored).unwrap();
            prop_assert_eq!(sel.is_reversed(), reversed);
            prop_assert_eq!(sel.pair_id().as_str(), id.as_str());
            prop_assert_eq!(sel.to_string(), stored);
        }
    }
}
