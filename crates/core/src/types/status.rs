//! Active/inactive status filtering.

use serde::{Deserialize, Serialize};

/// Status filter applied to admin list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Show every record regardless of status.
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Returns `true` if a record with the given active flag passes the filter.
    #[must_use]
    pub const fn matches(self, is_active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }

    /// Value used in query strings and `<select>` options.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid status filter: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        assert!(StatusFilter::All.matches(true));
        assert!(StatusFilter::All.matches(false));
        assert!(StatusFilter::Active.matches(true));
        assert!(!StatusFilter::Active.matches(false));
        assert!(StatusFilter::Inactive.matches(false));
        assert!(!StatusFilter::Inactive.matches(true));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("inactive".parse::<StatusFilter>().unwrap(), StatusFilter::Inactive);
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
