//! Application status hierarchy and the forward-only merge rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where an application stands. Ordered `Applied < Interview < Offer < Rejected`.
///
/// Records loaded from storage may carry a status string outside this set;
/// it is kept verbatim so it survives a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Unrecognized(String),
}

impl ApplicationStatus {
    /// Position in the hierarchy. Unrecognized values rank with `Applied`.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Applied | Self::Unrecognized(_) => 0,
            Self::Interview => 1,
            Self::Offer => 2,
            Self::Rejected => 3,
        }
    }

    /// `Rejected` is terminal: nothing ranks above it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Unrecognized(raw) => raw,
        }
    }
}

/// True iff `new` ranks strictly above `current`.
pub fn should_update(current: &ApplicationStatus, new: &ApplicationStatus) -> bool {
    new.ordinal() > current.ordinal()
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Applied" => Self::Applied,
            "Interview" => Self::Interview,
            "Offer" => Self::Offer,
            "Rejected" => Self::Rejected,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl From<String> for ApplicationStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ApplicationStatus::*;

    fn known() -> Vec<ApplicationStatus> {
        vec![Applied, Interview, Offer, Rejected]
    }

    #[test]
    fn test_should_update_iff_ordinal_increases() {
        for a in known() {
            for b in known() {
                assert_eq!(
                    should_update(&a, &b),
                    b.ordinal() > a.ordinal(),
                    "should_update({}, {})",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_rejected_is_absorbing() {
        for b in known() {
            assert!(!should_update(&Rejected, &b));
        }
        assert!(Rejected.is_terminal());
    }

    #[test]
    fn test_same_status_never_updates() {
        assert!(!should_update(&Interview, &Interview));
    }

    #[test]
    fn test_unrecognized_ranks_as_applied() {
        let odd = Unrecognized("Ghosted".to_string());
        assert!(should_update(&odd, &Interview));
        assert!(!should_update(&odd, &Applied));
        assert!(!should_update(&Applied, &odd));
        assert!(!should_update(&Interview, &odd));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Offer".parse::<ApplicationStatus>().unwrap(), Offer);
        assert_eq!(" Rejected ".parse::<ApplicationStatus>().unwrap(), Rejected);
        assert_eq!(
            "offer".parse::<ApplicationStatus>().unwrap(),
            Unrecognized("offer".to_string())
        );
        assert_eq!(Interview.to_string(), "Interview");
        assert_eq!(Unrecognized("On hold".to_string()).to_string(), "On hold");
    }

    #[test]
    fn test_serde_as_plain_string() {
        assert_eq!(serde_json::to_string(&Offer).unwrap(), r#""Offer""#);
        let status: ApplicationStatus = serde_json::from_str(r#""Withdrawn""#).unwrap();
        assert_eq!(status, Unrecognized("Withdrawn".to_string()));
    }
}
