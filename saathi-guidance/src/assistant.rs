//! End-to-end claim and chat flows.
//!
//! Every failure path ends in a user-visible string; nothing here returns an
//! error to the caller.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info, warn};

use crate::{
    category::InsuranceCategory,
    chat_gate::ChatGate,
    cleaner::clean,
    error::{GuidanceError, Result},
    generator::TextGenerator,
    language::Language,
    prompt::{build_chat_prompt, build_guidance_prompt},
    speech::SpeechRenderer,
    taxonomy::{AllowList, KeywordTable},
    validator::ClaimValidator,
};

/// Raw claim form submission; any field may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimForm {
    pub language: Option<String>,
    pub insurance_type: Option<String>,
    pub incident: Option<String>,
    pub justification: Option<String>,
}

/// A complete claim with labels normalised to canonical values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub language: Language,
    pub category: InsuranceCategory,
    pub incident: String,
    pub justification: String,
}

impl ClaimForm {
    /// Names of fields that are absent or blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("language", &self.language),
            ("insurance_type", &self.insurance_type),
            ("incident", &self.incident),
            ("justification", &self.justification),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    /// Language for user-facing messages, falling back to English
    pub fn message_language(&self) -> Language {
        self.language
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(Language::English)
    }

    pub fn into_request(self) -> Result<ClaimRequest> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(GuidanceError::MissingFields(missing));
        }

        let language: Language = self.language.unwrap_or_default().parse()?;
        let category = InsuranceCategory::from_label(&self.insurance_type.unwrap_or_default())?;

        Ok(ClaimRequest {
            language,
            category,
            incident: self.incident.unwrap_or_default(),
            justification: self.justification.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Required fields were missing
    Incomplete,
    /// A label could not be normalised
    Invalid,
    /// The description did not match the selected category
    Rejected,
    /// Guidance came back from the generator
    Guided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimOutcome {
    pub guidance: String,
    pub audio: Option<PathBuf>,
    pub status: OutcomeStatus,
}

impl ClaimOutcome {
    fn text_only(guidance: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            guidance: guidance.into(),
            audio: None,
            status,
        }
    }
}

/// One exchange in the help chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub reply: String,
}

fn incomplete_message(language: Language) -> &'static str {
    match language {
        Language::Hindi => "⚠️ कृपया सभी फ़ील्ड भरें",
        Language::English => "⚠️ Please fill all fields",
    }
}

fn error_message(language: Language, error: &GuidanceError) -> String {
    match language {
        Language::Hindi => format!("⚠️ त्रुटि हुई: {error}"),
        Language::English => format!("⚠️ Error occurred: {error}"),
    }
}

/// Validates claims, asks the generator for guidance and voices the result
pub struct GuidanceAssistant {
    validator: ClaimValidator,
    chat_gate: ChatGate,
    generator: Arc<dyn TextGenerator>,
    speech: Arc<dyn SpeechRenderer>,
}

impl GuidanceAssistant {
    pub fn new(
        taxonomy: Arc<KeywordTable>,
        allow_list: Arc<AllowList>,
        generator: Arc<dyn TextGenerator>,
        speech: Arc<dyn SpeechRenderer>,
    ) -> Self {
        Self {
            validator: ClaimValidator::new(taxonomy),
            chat_gate: ChatGate::new(allow_list),
            generator,
            speech,
        }
    }

    pub async fn process_claim(&self, form: ClaimForm) -> ClaimOutcome {
        let language = form.message_language();

        let request = match form.into_request() {
            Ok(request) => request,
            Err(GuidanceError::MissingFields(fields)) => {
                info!(missing = ?fields, "Claim form incomplete");
                return ClaimOutcome::text_only(
                    incomplete_message(language),
                    OutcomeStatus::Incomplete,
                );
            }
            Err(e) => {
                warn!(error = %e, "Claim form could not be normalised");
                return ClaimOutcome::text_only(
                    error_message(language, &e),
                    OutcomeStatus::Invalid,
                );
            }
        };

        info!(
            category = %request.category,
            language = %request.language,
            incident_length = request.incident.len(),
            "Processing claim"
        );

        let validation =
            self.validator
                .validate(request.category, &request.incident, request.language);
        if !validation.accepted {
            info!(
                category = %request.category,
                suggested = ?validation.suggested,
                "Claim rejected by keyword validation"
            );
            return ClaimOutcome::text_only(validation.message, OutcomeStatus::Rejected);
        }

        let prompt = build_guidance_prompt(
            request.category,
            &request.incident,
            &request.justification,
            request.language,
        );
        let raw = self.generator.generate(&prompt).await;
        let guidance = clean(&raw);

        let audio = match self.speech.render(&guidance, request.language).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!(error = %e, "Speech rendering failed, returning text only");
                None
            }
        };

        info!(
            guidance_length = guidance.len(),
            has_audio = audio.is_some(),
            "Claim guidance ready"
        );

        ClaimOutcome {
            guidance,
            audio,
            status: OutcomeStatus::Guided,
        }
    }

    pub async fn chat_reply(&self, message: &str, language: Language) -> ChatTurn {
        if !self.chat_gate.is_allowed(message, language) {
            info!(language = %language, "Chat question outside the allow-list");
            return ChatTurn {
                question: message.to_string(),
                reply: ChatGate::refusal(language).to_string(),
            };
        }

        let prompt = build_chat_prompt(message, language);
        let raw = self.generator.generate(&prompt).await;

        ChatTurn {
            question: message.to_string(),
            reply: clean(&raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    struct CountingGenerator {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        reply: String,
    }

    impl CountingGenerator {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(GuidanceError::Transport("connection refused".to_string()))
        }
    }

    struct StubSpeech {
        fail: bool,
        rendered: Mutex<Vec<(String, Language)>>,
    }

    impl StubSpeech {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                rendered: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SpeechRenderer for StubSpeech {
        async fn render(&self, text: &str, language: Language) -> Result<PathBuf> {
            self.rendered
                .lock()
                .unwrap()
                .push((text.to_string(), language));
            if self.fail {
                Err(GuidanceError::Speech("service unavailable".to_string()))
            } else {
                Ok(PathBuf::from("guidance_output.mp3"))
            }
        }
    }

    fn assistant(
        generator: Arc<dyn TextGenerator>,
        speech: Arc<dyn SpeechRenderer>,
    ) -> GuidanceAssistant {
        GuidanceAssistant::new(
            Arc::new(KeywordTable::standard()),
            Arc::new(AllowList::standard()),
            generator,
            speech,
        )
    }

    fn form(language: &str, insurance_type: &str, incident: &str, justification: &str) -> ClaimForm {
        ClaimForm {
            language: Some(language.to_string()),
            insurance_type: Some(insurance_type.to_string()),
            incident: Some(incident.to_string()),
            justification: Some(justification.to_string()),
        }
    }

    #[test]
    fn missing_fields_include_blank_values() {
        let form = ClaimForm {
            language: Some("English".to_string()),
            insurance_type: Some("  ".to_string()),
            incident: None,
            justification: Some("repairs".to_string()),
        };
        assert_eq!(form.missing_fields(), vec!["insurance_type", "incident"]);
    }

    #[test]
    fn into_request_normalises_hindi_labels() {
        let request = form("Hindi", "स्वास्थ्य बीमा", "अस्पताल", "बिल")
            .into_request()
            .unwrap();
        assert_eq!(request.language, Language::Hindi);
        assert_eq!(request.category, InsuranceCategory::Health);
    }

    #[tokio::test]
    async fn incomplete_form_never_calls_generator() {
        let generator = CountingGenerator::new("unused");
        let speech = StubSpeech::new(false);
        let assistant = assistant(generator.clone(), speech.clone());

        let mut incomplete = form("Hindi", "मोटर बीमा", "कार दुर्घटना", "");
        incomplete.justification = None;
        let outcome = assistant.process_claim(incomplete).await;

        assert_eq!(outcome.status, OutcomeStatus::Incomplete);
        assert_eq!(outcome.guidance, "⚠️ कृपया सभी फ़ील्ड भरें");
        assert_eq!(outcome.audio, None);
        assert_eq!(generator.calls(), 0);
        assert!(speech.rendered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_form_uses_english_message() {
        let generator = CountingGenerator::new("unused");
        let outcome = assistant(generator.clone(), StubSpeech::new(false))
            .process_claim(ClaimForm::default())
            .await;
        assert_eq!(outcome.guidance, "⚠️ Please fill all fields");
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_category_is_reported() {
        let generator = CountingGenerator::new("unused");
        let outcome = assistant(generator.clone(), StubSpeech::new(false))
            .process_claim(form("English", "Pet Insurance", "my dog", "vet bills"))
            .await;
        assert_eq!(outcome.status, OutcomeStatus::Invalid);
        assert!(outcome.guidance.starts_with("⚠️ Error occurred:"));
        assert!(outcome.guidance.contains("Pet Insurance"));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn rejected_claim_returns_validation_message() {
        let generator = CountingGenerator::new("unused");
        let outcome = assistant(generator.clone(), StubSpeech::new(false))
            .process_claim(form("English", "Health Insurance", "My car was damaged", "repairs"))
            .await;
        assert_eq!(outcome.status, OutcomeStatus::Rejected);
        assert!(outcome.guidance.contains("Motor Insurance"));
        assert_eq!(outcome.audio, None);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn accepted_claim_is_generated_cleaned_and_voiced() {
        let generator = CountingGenerator::new(
            "You are an Indian insurance advisor.\nStep 1: visit office\n\nStep 2: submit the form\n",
        );
        let speech = StubSpeech::new(false);
        let assistant = assistant(generator.clone(), speech.clone());

        let outcome = assistant
            .process_claim(form(
                "English",
                "Motor Insurance",
                "My car was damaged in an accident",
                "I need repair costs covered",
            ))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::Guided);
        assert_eq!(outcome.guidance, "Step 1: visit office\nStep 2: submit the form");
        assert_eq!(outcome.audio, Some(PathBuf::from("guidance_output.mp3")));
        assert_eq!(generator.calls(), 1);

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("My car was damaged in an accident"));
        assert!(prompts[0].contains("Motor Insurance"));

        let rendered = speech.rendered.lock().unwrap();
        assert_eq!(rendered[0], (outcome.guidance.clone(), Language::English));
    }

    #[tokio::test]
    async fn speech_failure_keeps_text_guidance() {
        let generator = CountingGenerator::new("पहले पुलिस को सूचित करें");
        let outcome = assistant(generator, StubSpeech::new(true))
            .process_claim(form("Hindi", "मोटर बीमा", "मेरी कार चोरी हो गई", "नुकसान"))
            .await;
        assert_eq!(outcome.status, OutcomeStatus::Guided);
        assert_eq!(outcome.guidance, "पहले पुलिस को सूचित करें");
        assert_eq!(outcome.audio, None);
    }

    #[tokio::test]
    async fn generator_failure_flows_through_as_text() {
        let outcome = assistant(Arc::new(FailingGenerator), StubSpeech::new(false))
            .process_claim(form("English", "Crop", "flood destroyed the crop", "loss"))
            .await;
        assert_eq!(outcome.status, OutcomeStatus::Guided);
        assert!(outcome.guidance.starts_with("⚠️ GenAI error:"));
        assert!(outcome.guidance.contains("connection refused"));
    }

    #[tokio::test]
    async fn chat_refusal_skips_generator() {
        let generator = CountingGenerator::new("unused");
        let assistant = assistant(generator.clone(), StubSpeech::new(false));

        let turn = assistant
            .chat_reply("What is the capital of France?", Language::English)
            .await;
        assert_eq!(turn.reply, ChatGate::refusal(Language::English));
        assert_eq!(turn.question, "What is the capital of France?");

        let turn = assistant.chat_reply("आज क्या तारीख है?", Language::Hindi).await;
        assert_eq!(turn.reply, ChatGate::refusal(Language::Hindi));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn chat_answer_is_cleaned() {
        let generator =
            CountingGenerator::new("Assistant: here you go\nCarry your policy copy and RC book.");
        let assistant = assistant(generator.clone(), StubSpeech::new(false));

        let turn = assistant
            .chat_reply("What documents are needed for motor insurance?", Language::English)
            .await;
        assert_eq!(turn.reply, "Carry your policy copy and RC book.");
        assert_eq!(generator.calls(), 1);
        assert!(generator.prompts.lock().unwrap()[0]
            .ends_with("Question: What documents are needed for motor insurance?"));
    }
}
