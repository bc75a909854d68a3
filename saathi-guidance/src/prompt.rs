use crate::{category::InsuranceCategory, language::Language};

/// Builds the instruction sent to the generator for an accepted claim.
///
/// The free-text fields are embedded verbatim; the consumer is a language
/// model, not a parser.
pub fn build_guidance_prompt(
    category: InsuranceCategory,
    incident: &str,
    justification: &str,
    language: Language,
) -> String {
    format!(
        r#"You are an Indian insurance advisor. A user has selected "{category}".
They describe the incident as: "{incident}"
They are claiming insurance because: "{justification}"

Please help the user by explaining in simple, step-by-step instructions:
- What to do first
- Which documents are needed
- Where and how to submit the claim
- Approximate processing time
- Tips to avoid delays

Please write in {language} in clear and easy language. Avoid legal terms or technical jargon.
**Do not repeat or include this instruction in your response. Follow the instructions, but don't echo them.**
"#,
        category = category.name(),
        language = language.display_name(),
    )
}

/// Builds the single-turn prompt for the help chat
pub fn build_chat_prompt(question: &str, language: Language) -> String {
    let language = language.display_name();
    format!(
        "You are an Indian insurance assistant.
Only answer questions related to insurance in India (Motor, Health, Crop only).
User asked in {language}.
Answer in {language} only in clear and helpful way.
Question: {question}"
    )
}
