pub mod assistant;
pub mod category;
pub mod chat_gate;
pub mod cleaner;
pub mod error;
pub mod generator;
pub mod labels;
pub mod language;
pub mod prompt;
pub mod speech;
pub mod taxonomy;
pub mod validator;

// Re-export commonly used types
pub use assistant::{ChatTurn, ClaimForm, ClaimOutcome, ClaimRequest, GuidanceAssistant, OutcomeStatus};
pub use category::InsuranceCategory;
pub use chat_gate::ChatGate;
pub use cleaner::clean;
pub use error::{GuidanceError, Result};
#[cfg(feature = "openrouter")]
pub use generator::OpenRouterGenerator;
pub use generator::{HuggingFaceGenerator, InferenceResponse, TextGenerator};
pub use labels::InterfaceLabels;
pub use language::Language;
pub use prompt::{build_chat_prompt, build_guidance_prompt};
pub use speech::{GoogleTranslateSpeech, SpeechRenderer};
pub use taxonomy::{AllowList, KeywordTable};
pub use validator::{ClaimValidator, ValidationResult};
