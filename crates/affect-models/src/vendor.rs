//! Vendor identification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported analysis vendors.
///
/// A closed set: adding a vendor means adding a variant here and a client
/// implementation, not registering a name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VendorKind {
    BehavioralSignals,
    HumeAi,
}

impl VendorKind {
    /// All supported vendors.
    pub const ALL: &'static [VendorKind] = &[VendorKind::BehavioralSignals, VendorKind::HumeAi];

    /// Identifier as used in configuration and filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorKind::BehavioralSignals => "behavioral_signals",
            VendorKind::HumeAi => "hume_ai",
        }
    }

    /// Human-readable vendor name, as recorded in result metadata.
    pub fn display_name(&self) -> &'static str {
        match self {
            VendorKind::BehavioralSignals => "Behavioral Signals",
            VendorKind::HumeAi => "Hume AI",
        }
    }
}

impl fmt::Display for VendorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VendorKind {
    type Err = VendorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "behavioral_signals" | "behavioral-signals" => Ok(VendorKind::BehavioralSignals),
            "hume_ai" | "hume-ai" | "hume" => Ok(VendorKind::HumeAi),
            _ => Err(VendorParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown vendor: {0}")]
pub struct VendorParseError(String);
