/// Substrings marking a line as echoed instructions rather than an answer.
///
/// Hand-tuned against observed model output; matching is best-effort and can
/// drop a legitimate line that happens to contain one of these.
pub const LEAKAGE_PHRASES: &[&str] = &[
    "you are",
    "user:",
    "assistant:",
    "describe the incident",
    "claiming insurance",
    "please help",
    "write in",
    "step-by-step",
    "instructions",
    "please explain",
    "act as",
    "question:",
];

/// Strips echoed prompt fragments and blank lines from generated text
pub fn clean(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_leakage(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_leakage(line: &str) -> bool {
    let lower = line.to_lowercase();
    LEAKAGE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
