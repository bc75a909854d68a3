use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::{
    category::InsuranceCategory,
    language::Language,
    taxonomy::{KeywordTable, first_match},
};

/// Outcome of matching an incident description against the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub accepted: bool,
    /// Localized rejection text; "Valid claim" when accepted
    pub message: String,
    /// Category the description seems to belong to instead, if any
    pub suggested: Option<InsuranceCategory>,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            accepted: true,
            message: "Valid claim".to_string(),
            suggested: None,
        }
    }

    fn redirect(other: InsuranceCategory, language: Language) -> Self {
        let name = other.name();
        let message = match language {
            Language::Hindi => format!(
                "आपके द्वारा दी गई जानकारी '{name}' से संबंधित लगती है। कृपया बीमा प्रकार '{name}' चुनें।"
            ),
            Language::English => format!(
                "Your description seems related to '{name}'. Please select that insurance type instead."
            ),
        };
        Self {
            accepted: false,
            message,
            suggested: Some(other),
        }
    }

    fn unclear(language: Language) -> Self {
        let message = match language {
            Language::Hindi => {
                "आपका विवरण किसी भी बीमा प्रकार से मेल नहीं खाता। कृपया अधिक स्पष्ट विवरण दें।"
            }
            Language::English => {
                "Your description doesn't clearly match any insurance type. Please provide more specific details."
            }
        };
        Self {
            accepted: false,
            message: message.to_string(),
            suggested: None,
        }
    }
}

/// Decides whether an incident plausibly belongs to the selected category
#[derive(Debug, Clone)]
pub struct ClaimValidator {
    table: Arc<KeywordTable>,
}

impl ClaimValidator {
    pub fn new(table: Arc<KeywordTable>) -> Self {
        Self { table }
    }

    pub fn validate(
        &self,
        category: InsuranceCategory,
        incident: &str,
        language: Language,
    ) -> ValidationResult {
        let description = incident.to_lowercase();

        if let Some(keyword) = first_match(&description, self.table.keywords(category, language)) {
            debug!(category = %category, keyword = %keyword, "Incident matches selected category");
            return ValidationResult::accepted();
        }

        for other in InsuranceCategory::ALL
            .into_iter()
            .filter(|other| *other != category)
        {
            if let Some(keyword) = first_match(&description, self.table.keywords(other, language)) {
                debug!(
                    category = %category,
                    suggested = %other,
                    keyword = %keyword,
                    "Incident matches a different category"
                );
                return ValidationResult::redirect(other, language);
            }
        }

        debug!(category = %category, "Incident matches no category");
        ValidationResult::unclear(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ClaimValidator {
        ClaimValidator::new(Arc::new(KeywordTable::standard()))
    }

    #[test]
    fn motor_accident_is_accepted() {
        let result = validator().validate(
            InsuranceCategory::Motor,
            "My car was damaged in an accident",
            Language::English,
        );
        assert!(result.accepted);
        assert_eq!(result.message, "Valid claim");
    }

    #[test]
    fn car_damage_under_health_is_redirected_to_motor() {
        let result = validator().validate(
            InsuranceCategory::Health,
            "My car was damaged",
            Language::English,
        );
        assert!(!result.accepted);
        assert_eq!(result.suggested, Some(InsuranceCategory::Motor));
        assert!(result.message.contains("Motor Insurance"));
    }

    #[test]
    fn hindi_crop_without_keywords_gets_generic_message() {
        let result = validator().validate(
            InsuranceCategory::Crop,
            "बारिश से नुकसान हुआ",
            Language::Hindi,
        );
        assert!(!result.accepted);
        assert_eq!(result.suggested, None);
        assert_eq!(
            result.message,
            "आपका विवरण किसी भी बीमा प्रकार से मेल नहीं खाता। कृपया अधिक स्पष्ट विवरण दें।"
        );
    }

    #[test]
    fn matching_ignores_latin_case() {
        let result = validator().validate(
            InsuranceCategory::Health,
            "Admitted to HOSPITAL after fever",
            Language::English,
        );
        assert!(result.accepted);
    }

    #[test]
    fn every_keyword_accepts_its_own_category() {
        let table = KeywordTable::standard();
        let validator = validator();
        for category in InsuranceCategory::ALL {
            for language in Language::ALL {
                for keyword in table.keywords(category, language) {
                    let incident = format!("yesterday {keyword} happened");
                    let result = validator.validate(category, &incident, language);
                    assert!(result.accepted, "{keyword} should accept {category}");
                }
            }
        }
    }

    #[test]
    fn other_category_keyword_names_that_category() {
        let table = KeywordTable::standard();
        let validator = validator();
        for selected in InsuranceCategory::ALL {
            for other in InsuranceCategory::ALL.into_iter().filter(|c| *c != selected) {
                for language in Language::ALL {
                    for keyword in table.keywords(other, language) {
                        let result = validator.validate(selected, keyword, language);
                        assert!(!result.accepted);
                        assert_eq!(result.suggested, Some(other), "keyword {keyword}");
                        assert!(result.message.contains(other.name()));
                    }
                }
            }
        }
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // both motor and health keywords present; motor is declared first
        let result = validator().validate(
            InsuranceCategory::Crop,
            "bike crash, taken to hospital",
            Language::English,
        );
        assert_eq!(result.suggested, Some(InsuranceCategory::Motor));
    }

    #[test]
    fn empty_incident_is_unclear() {
        for language in Language::ALL {
            let result = validator().validate(InsuranceCategory::Motor, "", language);
            assert!(!result.accepted);
            assert_eq!(result.suggested, None);
        }
    }

    #[test]
    fn hindi_redirect_message_is_localized() {
        let result = validator().validate(
            InsuranceCategory::Motor,
            "अस्पताल में भर्ती",
            Language::Hindi,
        );
        assert_eq!(result.suggested, Some(InsuranceCategory::Health));
        assert!(result.message.starts_with("आपके द्वारा दी गई जानकारी 'Health Insurance'"));
    }
}
