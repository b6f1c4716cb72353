use crate::{Error, Result};

/// Lifecycle status of a stored key.  Any status may be set from any other status; the only rule
/// enforced against it is that signing requires `Active`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum KeyStatus {
    #[default]
    Active,
    Revoked,
    Expired,
    Compromised,
    Archived,
    #[serde(alias = "Not Initialized")]
    NotInitialized,
}

impl KeyStatus {
    pub const VARIANTS: &'static [KeyStatus] = &[
        KeyStatus::Active,
        KeyStatus::Revoked,
        KeyStatus::Expired,
        KeyStatus::Compromised,
        KeyStatus::Archived,
        KeyStatus::NotInitialized,
    ];
    /// Canonical string form, which is what gets persisted.
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyStatus::Active => "Active",
            KeyStatus::Revoked => "Revoked",
            KeyStatus::Expired => "Expired",
            KeyStatus::Compromised => "Compromised",
            KeyStatus::Archived => "Archived",
            KeyStatus::NotInitialized => "NotInitialized",
        }
    }
    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            KeyStatus::NotInitialized => "Not Initialized",
            _ => self.as_str(),
        }
    }
    pub const fn is_signing_permitted(&self) -> bool {
        matches!(self, KeyStatus::Active)
    }
    /// Returns Error::SigningRefused for every status other than Active.
    pub fn ensure_signing_permitted(&self) -> Result<()> {
        if self.is_signing_permitted() {
            Ok(())
        } else {
            Err(Error::SigningRefused(*self))
        }
    }
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KeyStatus {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Active" => Ok(KeyStatus::Active),
            "Revoked" => Ok(KeyStatus::Revoked),
            "Expired" => Ok(KeyStatus::Expired),
            "Compromised" => Ok(KeyStatus::Compromised),
            "Archived" => Ok(KeyStatus::Archived),
            "NotInitialized" | "Not Initialized" => Ok(KeyStatus::NotInitialized),
            _ => Err(Error::Unrecognized(
                format!("key status {:?}", s).into(),
            )),
        }
    }
}
