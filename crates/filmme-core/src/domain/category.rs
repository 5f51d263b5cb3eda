use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Board a community post belongs to.
///
/// The category decides both which posts a query sees and how a post is
/// rendered. It is fixed when the post is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// General discussion.
    #[serde(alias = "general")]
    Common,
    /// Tips about cinemas and screenings.
    #[serde(alias = "cinema-tip")]
    CinemaTip,
    /// Suggestions for the service.
    Suggestion,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Common, Category::CinemaTip, Category::Suggestion];

    /// Canonical slug, as stored and as rendered in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Common => "common",
            Category::CinemaTip => "cinema_tip",
            Category::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown community category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" | "general" => Ok(Category::Common),
            "cinema_tip" | "cinema-tip" => Ok(Category::CinemaTip),
            "suggestion" => Ok(Category::Suggestion),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
