use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::{GuidanceError, Result},
    language::Language,
};

/// Insurance categories the assistant handles, in taxonomy declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceCategory {
    Motor,
    Health,
    Crop,
}

impl InsuranceCategory {
    /// Declaration order; decides the tie-break when several other categories match
    pub const ALL: [InsuranceCategory; 3] = [
        InsuranceCategory::Motor,
        InsuranceCategory::Health,
        InsuranceCategory::Crop,
    ];

    /// Canonical identifier, also used in prompts and redirect messages
    pub fn name(self) -> &'static str {
        match self {
            InsuranceCategory::Motor => "Motor Insurance",
            InsuranceCategory::Health => "Health Insurance",
            InsuranceCategory::Crop => "Crop Insurance",
        }
    }

    /// Label shown in the category selector for the given language
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (_, Language::English) => self.name(),
            (InsuranceCategory::Motor, Language::Hindi) => "मोटर बीमा",
            (InsuranceCategory::Health, Language::Hindi) => "स्वास्थ्य बीमा",
            (InsuranceCategory::Crop, Language::Hindi) => "फसल बीमा",
        }
    }

    fn short_id(self) -> &'static str {
        match self {
            InsuranceCategory::Motor => "motor",
            InsuranceCategory::Health => "health",
            InsuranceCategory::Crop => "crop",
        }
    }

    /// Maps any localized display label (or short id) back to its category
    pub fn from_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        let lower = trimmed.to_lowercase();

        Self::ALL
            .into_iter()
            .find(|category| {
                category.short_id() == lower
                    || Language::ALL
                        .into_iter()
                        .any(|language| category.label(language).to_lowercase() == lower)
            })
            .ok_or_else(|| GuidanceError::UnknownCategory(trimmed.to_string()))
    }
}

impl fmt::Display for InsuranceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
