//! Field types and the capability set a field is declared with.

use std::fmt;
use std::ops::BitOr;

/// Type of a single label value.
///
/// Raw codes match the engine's capability bits, so a type converts to the
/// capability it needs without a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    FullText,
    Numeric,
    Geo,
    Tag,
}

impl FieldType {
    pub const fn code(self) -> u32 {
        match self {
            FieldType::FullText => 0x01,
            FieldType::Numeric => 0x02,
            FieldType::Geo => 0x04,
            FieldType::Tag => 0x08,
        }
    }

    pub const fn capability(self) -> FieldCapabilities {
        FieldCapabilities(self.code() as u8)
    }
}

/// Unknown codes are handed back unchanged.
impl TryFrom<u32> for FieldType {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(FieldType::FullText),
            0x02 => Ok(FieldType::Numeric),
            0x04 => Ok(FieldType::Geo),
            0x08 => Ok(FieldType::Tag),
            other => Err(other),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::FullText => write!(f, "fulltext"),
            FieldType::Numeric => write!(f, "numeric"),
            FieldType::Geo => write!(f, "geo"),
            FieldType::Tag => write!(f, "tag"),
        }
    }
}

/// Set of typed accesses a field supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldCapabilities(u8);

impl FieldCapabilities {
    pub const NONE: Self = Self(0);
    pub const FULL_TEXT: Self = FieldType::FullText.capability();
    pub const NUMERIC: Self = FieldType::Numeric.capability();
    pub const GEO: Self = FieldType::Geo.capability();
    pub const TAG: Self = FieldType::Tag.capability();

    /// Every field is declared with this set up front, whatever type it is first used with.
    pub const POLY: Self = Self(Self::FULL_TEXT.0 | Self::NUMERIC.0 | Self::TAG.0);

    const KNOWN_BITS: u8 = Self::POLY.0 | Self::GEO.0;

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Drops bits that name no capability.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::KNOWN_BITS)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn supports(self, field_type: FieldType) -> bool {
        self.contains(field_type.capability())
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FieldCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
