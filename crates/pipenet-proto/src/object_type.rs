// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `name_object_type` tags as the backend spells them.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Object type tag carried by every feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectType {
    /// Well.
    #[serde(rename = "Скважина")]
    Well,
    /// Pipe segment.
    #[serde(rename = "Труба")]
    Pipe,
    /// Consumer.
    #[serde(rename = "Потребитель")]
    Consumer,
    /// Spring capture.
    #[serde(rename = "Каптаж")]
    Capture,
    /// Pump.
    #[serde(rename = "Насос")]
    Pump,
    /// Counter-reservoir.
    #[serde(rename = "Контр-резервуар", alias = "Резервуар")]
    Reservoir,
    /// Water tower.
    #[serde(rename = "Водонапорная башня", alias = "Башня")]
    Tower,
}

/// Error for tags the backend does not define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown object type: {0:?}")]
pub struct UnknownObjectType(pub String);

impl ObjectType {
    /// Every tag, in the order the backend lists them.
    pub const ALL: [Self; 7] = [
        Self::Well,
        Self::Pipe,
        Self::Consumer,
        Self::Capture,
        Self::Pump,
        Self::Reservoir,
        Self::Tower,
    ];

    /// Wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Well => "Скважина",
            Self::Pipe => "Труба",
            Self::Consumer => "Потребитель",
            Self::Capture => "Каптаж",
            Self::Pump => "Насос",
            Self::Reservoir => "Контр-резервуар",
            Self::Tower => "Водонапорная башня",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Резервуар" => return Ok(Self::Reservoir),
            "Башня" => return Ok(Self::Tower),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownObjectType(s.to_owned()))
    }
}
