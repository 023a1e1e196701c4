use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::IdError;

/// Identity of a tile, `tile<N>` with N starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u32);

impl TileId {
    pub const PREFIX: &'static str = "tile";

    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for TileId {
    type Err = IdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| IdError::UnknownPrefix(value.to_string()))?;
        parse_index(value, digits).map(Self)
    }
}

impl Serialize for TileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    Board,
    Tray,
}

impl Zone {
    pub fn prefix(self) -> &'static str {
        match self {
            Zone::Board => "board",
            Zone::Tray => "tray",
        }
    }
}

/// Identity of a slot: its zone plus a 1-based position, `board<N>` or `tray<N>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    zone: Zone,
    number: u32,
}

impl SlotId {
    pub fn new(zone: Zone, number: u32) -> Option<Self> {
        (number > 0).then_some(Self { zone, number })
    }

    pub fn board(number: u32) -> Option<Self> {
        Self::new(Zone::Board, number)
    }

    pub fn tray(number: u32) -> Option<Self> {
        Self::new(Zone::Tray, number)
    }

    pub fn zone(self) -> Zone {
        self.zone
    }

    pub fn number(self) -> u32 {
        self.number
    }

    pub(crate) fn index(self) -> usize {
        (self.number - 1) as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.zone.prefix(), self.number)
    }
}

impl FromStr for SlotId {
    type Err = IdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        for zone in [Zone::Board, Zone::Tray] {
            if let Some(digits) = value.strip_prefix(zone.prefix()) {
                let number = parse_index(value, digits)?;
                return Ok(Self { zone, number });
            }
        }
        Err(IdError::UnknownPrefix(value.to_string()))
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Leading zeros are rejected so that parse and Display round-trip.
fn parse_index(value: &str, digits: &str) -> Result<u32, IdError> {
    let invalid = || IdError::InvalidIndex(value.to_string());
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    digits.parse::<u32>().map_err(|_| invalid())
}
