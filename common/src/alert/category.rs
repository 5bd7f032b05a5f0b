use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The tag an alert is filed under.
///
/// The set mirrors the PoC templates the analysis agents can produce; events
/// carrying a tag outside this set land in `Unknown`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Reentrancy,
    FlashloanManipulation,
    ApprovalExploit,
    SignatureReplay,
    FundsDrain,
    #[default]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

impl Category {
    /// All known categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Reentrancy,
        Category::FlashloanManipulation,
        Category::ApprovalExploit,
        Category::SignatureReplay,
        Category::FundsDrain,
        Category::Unknown,
    ];

    /// Get the `str` tag of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Reentrancy => "reentrancy",
            Category::FlashloanManipulation => "flashloan_manipulation",
            Category::ApprovalExploit => "approval_exploit",
            Category::SignatureReplay => "signature_replay",
            Category::FundsDrain => "funds_drain",
            Category::Unknown => "unknown",
        }
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reentrancy" => Ok(Category::Reentrancy),
            "flashloan_manipulation" => Ok(Category::FlashloanManipulation),
            "approval_exploit" => Ok(Category::ApprovalExploit),
            "signature_replay" => Ok(Category::SignatureReplay),
            "funds_drain" => Ok(Category::FundsDrain),
            "unknown" => Ok(Category::Unknown),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
