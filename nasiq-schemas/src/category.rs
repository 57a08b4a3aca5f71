use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price tier, ordered by ascending price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Economy,
    Daily,
    Premium,
    Luxury,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Economy,
        Category::Daily,
        Category::Premium,
        Category::Luxury,
    ];

    /// Position in the ordered enumeration, lowest tier first.
    pub fn rank(&self) -> usize {
        match self {
            Category::Economy => 0,
            Category::Daily => 1,
            Category::Premium => 2,
            Category::Luxury => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Economy => "economy",
            Category::Daily => "daily",
            Category::Premium => "premium",
            Category::Luxury => "luxury",
        }
    }

    /// Parses a tier label. Accepts the stable lowercase labels as well as
    /// the Arabic labels found in datasets exported by earlier versions of
    /// the app.
    pub fn from_label(label: &str) -> Option<Category> {
        match label.trim() {
            "economy" | "اقتصادية" => Some(Category::Economy),
            "daily" | "يومية" => Some(Category::Daily),
            "premium" | "راقية" => Some(Category::Premium),
            "luxury" | "فاخرة جداً" | "عبايات فاخرة جداً" => Some(Category::Luxury),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| format!("unknown category '{}'", s))
    }
}
