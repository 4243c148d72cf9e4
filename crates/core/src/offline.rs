//! Canned responses for offline mode.
//!
//! When no GLHF credential resolves, the relay answers with one of these
//! fixed strings instead of calling the completion service.

use rand::Rng;

const OFFLINE_RESPONSES: &[&str] = &[
    "This is a response generated locally in offline mode. You currently don't have a configured connection to the GLHF API.",
    "Offline mode active. This response is generated locally because no API key was detected.",
    "To use the full functionality of the chat, set the API key in the environment variables (GLHF_API_KEY).",
    "This response is simulated. In offline mode, there is no ability to generate content using a language model.",
    "This is the demo mode of the application. Add an API key to use language models.",
];

/// Uniformly pick one canned offline response.
pub fn pick() -> &'static str {
    let idx = rand::rng().random_range(0..OFFLINE_RESPONSES.len());
    OFFLINE_RESPONSES[idx]
}
