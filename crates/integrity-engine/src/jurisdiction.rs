//! Regions and the jurisdiction rules they imply for selection marks

use serde::{Deserialize, Serialize};
use std::fmt;

/// US state codes with LOA-specific mark rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    MA,
    OH,
}

impl Jurisdiction {
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::MA => "MA",
            Jurisdiction::OH => "OH",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Jurisdiction::MA => "Massachusetts",
            Jurisdiction::OH => "Ohio",
        }
    }

    /// Ohio LOAs require letter initials; an X in an initial box is invalid
    pub fn rejects_x_marks(&self) -> bool {
        matches!(self, Jurisdiction::OH)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Service regions a validator can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    #[default]
    GreatLakes,
    NewEngland,
}

impl Region {
    /// Parse a display name; anything unrecognised is treated as Great Lakes
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "New England" => Region::NewEngland,
            _ => Region::GreatLakes,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::GreatLakes => "Great Lakes",
            Region::NewEngland => "New England",
        }
    }

    pub fn default_jurisdiction(&self) -> Jurisdiction {
        match self {
            Region::NewEngland => Jurisdiction::MA,
            Region::GreatLakes => Jurisdiction::OH,
        }
    }
}

impl From<String> for Region {
    fn from(name: String) -> Self {
        Region::from_name(&name)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.name().to_string()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_mapping() {
        assert_eq!(Region::from_name("New England").default_jurisdiction(), Jurisdiction::MA);
        assert_eq!(Region::from_name("Great Lakes").default_jurisdiction(), Jurisdiction::OH);
        assert_eq!(Region::from_name("Mid-Atlantic").default_jurisdiction(), Jurisdiction::OH);
    }

    #[test]
    fn test_only_ohio_rejects_x_marks() {
        assert!(Jurisdiction::OH.rejects_x_marks());
        assert!(!Jurisdiction::MA.rejects_x_marks());
    }

    #[test]
    fn test_jurisdiction_labels() {
        assert_eq!(Jurisdiction::MA.name(), "Massachusetts");
        assert_eq!(Jurisdiction::OH.name(), "Ohio");
        assert_eq!(Jurisdiction::OH.to_string(), "OH");
        assert_eq!(
            Region::NewEngland.default_jurisdiction().name(),
            "Massachusetts"
        );
    }

    #[test]
    fn test_region_serde_uses_display_name() {
        let region: Region = serde_json::from_str("\"New England\"").unwrap();
        assert_eq!(region, Region::NewEngland);
        assert_eq!(serde_json::to_string(&Region::GreatLakes).unwrap(), "\"Great Lakes\"");
        let unknown: Region = serde_json::from_str("\"Pacific\"").unwrap();
        assert_eq!(unknown, Region::GreatLakes);
    }
}
