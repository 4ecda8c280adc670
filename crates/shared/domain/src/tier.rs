use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription level. Ordering follows rank: `Silver < Gold < Diamond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Silver,
    Gold,
    Diamond,
}

impl Tier {
    pub const ALL: [Self; 3] = [Self::Silver, Self::Gold, Self::Diamond];

    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Silver => 1,
            Self::Gold => 2,
            Self::Diamond => 3,
        }
    }

    /// The persisted form, as stored under the session key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Diamond => "Diamond",
        }
    }

    /// Parses the persisted form exactly. Anything else is `None`.
    #[must_use]
    pub fn from_persisted(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == value)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_follows_rank() {
        assert!(Tier::Silver < Tier::Gold);
        assert!(Tier::Gold < Tier::Diamond);
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn persisted_form_is_exact() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_persisted(tier.as_str()), Some(tier));
        }
        assert_eq!(Tier::from_persisted("Gold"), None);
        assert_eq!(Tier::from_persisted(" gold"), None);
        assert_eq!(Tier::from_persisted("platinum"), None);
    }
}
