//! # Dimension identities
//!
//! Every dimension is identified by a [`DimTag`]. A small fixed set of
//! well-known tags covers the usual spatial and temporal axes; any other axis
//! gets a user tag built from a [`Name`].
//!
//! Names are compared after Unicode NFC normalisation and trimming, so a name
//! typed with combining accents and one typed with precomposed characters
//! refer to the same dimension.
//!
//! ```rust
//! use dimarray::{DimTag, Name};
//!
//! assert_eq!(DimTag::named("X"), DimTag::X);
//! assert_eq!(DimTag::named("band"), DimTag::Dim(Name::new("band")));
//! assert_eq!(Name::new("cafe\u{301}"), Name::new("caf\u{e9}"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// A normalised dimension name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Self {
        Name(raw.trim().nfc().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(&value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimTag {
    X,
    Y,
    Z,
    /// Time.
    Ti,
    /// Any user-defined axis.
    Dim(Name),
}

impl DimTag {
    pub const WELL_KNOWN: [DimTag; 4] = [DimTag::X, DimTag::Y, DimTag::Z, DimTag::Ti];

    /// Builds a tag from a name, returning the well-known tag when the name
    /// is one of `X`, `Y`, `Z` or `Ti`.
    pub fn named(name: &str) -> Self {
        let name = Name::new(name);
        Self::WELL_KNOWN
            .into_iter()
            .find(|tag| tag.name() == name.as_str())
            .unwrap_or(DimTag::Dim(name))
    }

    pub fn name(&self) -> &str {
        match self {
            DimTag::X => "X",
            DimTag::Y => "Y",
            DimTag::Z => "Z",
            DimTag::Ti => "Ti",
            DimTag::Dim(name) => name.as_str(),
        }
    }

    /// Human readable label used in summaries.
    pub fn label(&self) -> &str {
        match self {
            DimTag::Ti => "Time",
            other => other.name(),
        }
    }

    pub fn is_well_known(&self) -> bool {
        !matches!(self, DimTag::Dim(_))
    }
}

impl From<&str> for DimTag {
    fn from(value: &str) -> Self {
        DimTag::named(value)
    }
}

impl From<Name> for DimTag {
    fn from(value: Name) -> Self {
        DimTag::named(value.as_str())
    }
}

impl fmt::Display for DimTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
