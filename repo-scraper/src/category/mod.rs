//! Repository categorisation.
//!
//! Every repository receives exactly one [`Category`], chosen by the first
//! matching rule in [`RULES`].

mod rules;

pub use rules::{classify, Rule, Trigger, RULES};

use serde::{Serialize, Serializer};
use std::fmt;

/// Coarse repository category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    WebDevelopment,
    MobileDevelopment,
    DataScience,
    ApiBackend,
    ToolsUtilities,
    LearningTutorial,
    Other,
}

impl Category {
    /// Every category, in rule order.
    pub const ALL: [Category; 7] = [
        Self::WebDevelopment,
        Self::MobileDevelopment,
        Self::DataScience,
        Self::ApiBackend,
        Self::ToolsUtilities,
        Self::LearningTutorial,
        Self::Other,
    ];

    /// Returns the label written to the export.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::MobileDevelopment => "Mobile Development",
            Self::DataScience => "Data Science/ML",
            Self::ApiBackend => "API/Backend",
            Self::ToolsUtilities => "Tools/Utilities",
            Self::LearningTutorial => "Learning/Tutorial",
            Self::Other => "Other/Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
