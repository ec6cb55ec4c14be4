//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown category token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sake,
    Shochu,
    Wine,
    Beer,
    Snack,
}

impl Category {
    /// Catalog order used by the products page filter.
    pub const ALL: [Self; 5] = [
        Self::Sake,
        Self::Shochu,
        Self::Wine,
        Self::Beer,
        Self::Snack,
    ];

    /// Storage token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sake => "sake",
            Self::Shochu => "shochu",
            Self::Wine => "wine",
            Self::Beer => "beer",
            Self::Snack => "snack",
        }
    }

    /// Japanese display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Sake => "日本酒",
            Self::Shochu => "焼酎",
            Self::Wine => "ワイン",
            Self::Beer => "ビール",
            Self::Snack => "おつまみ",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Sake => "🍶",
            Self::Shochu => "🥃",
            Self::Wine => "🍷",
            Self::Beer => "🍺",
            Self::Snack => "🥜",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sake" => Ok(Self::Sake),
            "shochu" => Ok(Self::Shochu),
            "wine" => Ok(Self::Wine),
            "beer" => Ok(Self::Beer),
            "snack" => Ok(Self::Snack),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            "whisky".parse::<Category>(),
            Err(CategoryError("whisky".to_owned()))
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Category::Sake.display_name(), "日本酒");
        assert_eq!(Category::Snack.icon(), "🥜");
    }
}
