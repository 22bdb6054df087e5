//! Filter criteria value object.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::AlarmClass;

/// Restriction on the enabled/disabled flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnabledStatus {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl FromStr for EnabledStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(EnabledStatus::All),
            "enabled" => Ok(EnabledStatus::Enabled),
            "disabled" => Ok(EnabledStatus::Disabled),
            other => Err(format!("unknown enabled status '{other}' (expected all, enabled or disabled)")),
        }
    }
}

impl fmt::Display for EnabledStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnabledStatus::All => "all",
            EnabledStatus::Enabled => "enabled",
            EnabledStatus::Disabled => "disabled",
        })
    }
}

/// Restriction on interlock presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterlockFilter {
    #[default]
    All,
    Yes,
    No,
}

impl FromStr for InterlockFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(InterlockFilter::All),
            "yes" => Ok(InterlockFilter::Yes),
            "no" => Ok(InterlockFilter::No),
            other => Err(format!("unknown interlock filter '{other}' (expected all, yes or no)")),
        }
    }
}

impl fmt::Display for InterlockFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InterlockFilter::All => "all",
            InterlockFilter::Yes => "yes",
            InterlockFilter::No => "no",
        })
    }
}

/// Current combination of search text and the three selectors.
///
/// Replaced wholesale on each edit; the `with_*` builders return a new value.
/// The default passes every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search: String,
    /// Empty = no alarm-type restriction
    pub alarm_types: BTreeSet<AlarmClass>,
    pub enabled_status: EnabledStatus,
    pub has_interlock: InterlockFilter,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_alarm_types(mut self, classes: impl IntoIterator<Item = AlarmClass>) -> Self {
        self.alarm_types = classes.into_iter().collect();
        self
    }

    pub fn with_enabled_status(mut self, status: EnabledStatus) -> Self {
        self.enabled_status = status;
        self
    }

    pub fn with_interlock(mut self, filter: InterlockFilter) -> Self {
        self.has_interlock = filter;
        self
    }

    /// True when no field restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty()
            && self.alarm_types.is_empty()
            && self.enabled_status == EnabledStatus::All
            && self.has_interlock == InterlockFilter::All
    }
}
