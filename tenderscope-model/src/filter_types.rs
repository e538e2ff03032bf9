//! Filter vocabulary shared by the engine, the URL codec and host applications.
//!
//! Every enum here has a stable query-string spelling (`as_param`) and parses
//! back through `FromStr`. The default variant of each toggle is never written
//! to the address bar; absence of a key means "default".

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Text filters that carry a raw input and an applied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterKey {
    /// General keyword search across the record.
    Global,
    Item,
    Ministry,
    Department,
    Location,
    Seller,
}

impl FilterKey {
    pub fn all() -> &'static [FilterKey] {
        use FilterKey::*;
        &[Global, Item, Ministry, Department, Location, Seller]
    }

    /// Query-string key for this field.
    pub fn as_param(&self) -> &'static str {
        match self {
            FilterKey::Global => "global",
            FilterKey::Item => "item",
            FilterKey::Ministry => "ministry",
            FilterKey::Department => "department",
            FilterKey::Location => "location",
            FilterKey::Seller => "seller",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Global => "Search",
            FilterKey::Item => "Item",
            FilterKey::Ministry => "Ministry",
            FilterKey::Department => "Department",
            FilterKey::Location => "Location",
            FilterKey::Seller => "Seller",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::all().iter().copied().find(|key| key.as_param() == param)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for FilterKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_param(s).ok_or_else(|| ModelError::InvalidValue {
            key: "field",
            value: s.to_string(),
        })
    }
}

/// Status tab across the top of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusTab {
    #[default]
    All,
    Live,
    Closed,
    /// Only records the current user has shortlisted.
    Shortlisted,
}

impl StatusTab {
    pub const PARAM: &'static str = "tab";

    pub fn all() -> &'static [StatusTab] {
        use StatusTab::*;
        &[All, Live, Closed, Shortlisted]
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            StatusTab::All => "all",
            StatusTab::Live => "live",
            StatusTab::Closed => "closed",
            StatusTab::Shortlisted => "shortlisted",
        }
    }
}

impl fmt::Display for StatusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for StatusTab {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tab| tab.as_param() == s)
            .ok_or_else(|| ModelError::InvalidValue {
                key: Self::PARAM,
                value: s.to_string(),
            })
    }
}

/// Yes/no radio with an "any" default, used for EMD and reverse auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriState {
    #[default]
    Any,
    Yes,
    No,
}

impl TriState {
    pub fn as_param(&self) -> &'static str {
        match self {
            TriState::Any => "any",
            TriState::Yes => "yes",
            TriState::No => "no",
        }
    }

    /// Parse a radio value, accepting the boolean spellings older links used.
    pub fn parse_param(key: &'static str, s: &str) -> Result<Self, ModelError> {
        match s {
            "any" => Ok(TriState::Any),
            "yes" | "true" | "1" => Ok(TriState::Yes),
            "no" | "false" | "0" => Ok(TriState::No),
            other => Err(ModelError::InvalidValue {
                key,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Bid packet structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BidType {
    #[default]
    Any,
    SinglePacket,
    TwoPacket,
}

impl BidType {
    pub const PARAM: &'static str = "bidType";

    pub fn all() -> &'static [BidType] {
        use BidType::*;
        &[Any, SinglePacket, TwoPacket]
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            BidType::Any => "any",
            BidType::SinglePacket => "single",
            BidType::TwoPacket => "two",
        }
    }
}

impl fmt::Display for BidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for BidType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_param() == s)
            .ok_or_else(|| ModelError::InvalidValue {
                key: Self::PARAM,
                value: s.to_string(),
            })
    }
}

/// Procurement portal a record was harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecordSource {
    Gem,
    Cpwd,
}

impl RecordSource {
    pub const PARAM: &'static str = "source";

    pub fn as_param(&self) -> &'static str {
        match self {
            RecordSource::Gem => "gem",
            RecordSource::Cpwd => "cpwd",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for RecordSource {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gem" => Ok(RecordSource::Gem),
            "cpwd" => Ok(RecordSource::Cpwd),
            _ => Err(ModelError::InvalidValue {
                key: Self::PARAM,
                value: s.to_string(),
            }),
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortBy {
    #[default]
    Latest,
    ClosingSoon,
    Relevance,
}

impl SortBy {
    pub const PARAM: &'static str = "sort";

    pub fn all() -> &'static [SortBy] {
        use SortBy::*;
        &[Latest, ClosingSoon, Relevance]
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Latest => "latest",
            SortBy::ClosingSoon => "closing",
            SortBy::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for SortBy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|sort| sort.as_param() == s)
            .ok_or_else(|| ModelError::InvalidValue {
                key: Self::PARAM,
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keys_parse_their_own_params() {
        for key in FilterKey::all() {
            assert_eq!(key.as_param().parse::<FilterKey>().unwrap(), *key);
        }
        assert!("bidRa".parse::<FilterKey>().is_err());
    }

    #[test]
    fn tristate_accepts_boolean_spellings() {
        assert_eq!(TriState::parse_param("emd", "true").unwrap(), TriState::Yes);
        assert_eq!(TriState::parse_param("emd", "0").unwrap(), TriState::No);
        assert_eq!(
            TriState::parse_param("emd", "maybe"),
            Err(ModelError::InvalidValue {
                key: "emd",
                value: "maybe".into()
            })
        );
    }

    #[test]
    fn source_parsing_is_case_insensitive() {
        assert_eq!("CPWD".parse::<RecordSource>().unwrap(), RecordSource::Cpwd);
    }
}
