use serde::Serialize;

use crate::{category::InsuranceCategory, language::Language};

/// Localized captions for the claim form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceLabels {
    pub language: Language,
    pub select_language: &'static str,
    pub insurance_info: &'static str,
    pub select_insurance: &'static str,
    pub describe_incident: &'static str,
    pub incident_placeholder: &'static str,
    pub justify_claim: &'static str,
    pub justify_placeholder: &'static str,
    pub submit: &'static str,
    pub ai_guidance: &'static str,
    pub voice_guidance: &'static str,
    /// Category choices in declaration order
    pub insurance_types: [&'static str; 3],
}

impl InterfaceLabels {
    pub fn for_language(language: Language) -> Self {
        let insurance_types = InsuranceCategory::ALL.map(|category| category.label(language));
        match language {
            Language::English => Self {
                language,
                select_language: "Select Language",
                insurance_info: "Insurance Information (India Specific)",
                select_insurance: "Select Insurance Type",
                describe_incident: "Describe your incident",
                incident_placeholder: "e.g., My car was damaged in an accident...",
                justify_claim: "Why are you claiming insurance?",
                justify_placeholder: "e.g., I need repair costs covered...",
                submit: "Get AI Guidance",
                ai_guidance: "AI-Powered Guidance (Indian Context)",
                voice_guidance: "Voice Guidance",
                insurance_types,
            },
            Language::Hindi => Self {
                language,
                select_language: "भाषा चुनें",
                insurance_info: "बीमा जानकारी (भारत विशिष्ट)",
                select_insurance: "बीमा प्रकार चुनें",
                describe_incident: "अपनी घटना का वर्णन करें",
                incident_placeholder: "उदाहरण: मेरी कार एक दुर्घटना में क्षतिग्रस्त हो गई...",
                justify_claim: "आप बीमा क्लेम क्यों कर रहे हैं?",
                justify_placeholder: "उदाहरण: मुझे मरम्मत की लागत चाहिए...",
                submit: "AI मार्गदर्शन प्राप्त करें",
                ai_guidance: "AI-संचालित मार्गदर्शन (भारतीय संदर्भ)",
                voice_guidance: "आवाज़ मार्गदर्शन",
                insurance_types,
            },
        }
    }
}
