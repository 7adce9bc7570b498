//! Performance categories and their display colours.

/// Colour used for a category label the client does not know.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// A performance category as labelled by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Excellent,
    Good,
    Average,
    Poor,
    /// Any label outside the four known ones.
    Unrecognized,
}

impl Category {
    /// Map a service label to a category. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Excellent" => Self::Excellent,
            "Good" => Self::Good,
            "Average" => Self::Average,
            "Poor" => Self::Poor,
            _ => Self::Unrecognized,
        }
    }

    /// CSS hex colour for the category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#10b981",
            Self::Good => "#3b82f6",
            Self::Average => "#f59e0b",
            Self::Poor => "#ef4444",
            Self::Unrecognized => FALLBACK_COLOR,
        }
    }

    /// The colour at roughly 12% opacity, as an 8-digit hex colour.
    pub fn tint(self) -> String {
        format!("{}20", self.color())
    }
}
