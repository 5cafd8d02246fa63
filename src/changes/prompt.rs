use super::models::{ChatMessage, CompletionRequest};
use crate::config::PromptSettings;
use crate::context::ReleaseContext;

/// Builds the request body for one run. Swappable so a provider with a
/// different payload shape can plug in its own.
pub type PayloadBuilder = fn(&ReleaseContext, &PromptSettings, &str) -> CompletionRequest;

const GENERIC_PRODUCT: &str = "this software project";

pub fn create_release_notes_system_prompt(settings: &PromptSettings) -> String {
    if let Some(custom) = settings
        .system_prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        return custom.to_string();
    }

    let product = settings
        .product_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(GENERIC_PRODUCT);

    let mut prompt = format!(
        "You are a helpful assistant that generates user-friendly release notes for {product}. \
        Follow these guidelines:

        1. Write in a clear, conversational tone that non-technical users can understand
        2. Group changes into categories like '🎉 New Features', '✨ Improvements', '🐛 Bug Fixes', '🔒 Security', and '🔧 Infrastructure'
        3. Explain changes from the user's perspective - what they can do now that they couldn't before
        4. Use simple, jargon-free language to explain technical changes
        5. Include relevant emojis to make the notes engaging and scannable
        6. Call out any changes that require action from users, such as configuration or migration steps
        7. Add helpful tips for getting the most out of new features
        8. Thank users for their feedback and contributions
        9. Keep the tone positive and enthusiastic while being honest about fixes
        10. Format in an easy-to-read style with clear headings and sections
        11. End with a short note on what's coming next to build excitement

        Only return the formatted release notes, no other text."
    );

    let instructions = settings.instructions.trim();
    if !instructions.is_empty() {
        prompt.push_str("\n\nAdditional instructions:\n");
        prompt.push_str(instructions);
    }

    prompt
}

pub fn create_release_notes_user_prompt(context: &ReleaseContext) -> String {
    format!(
        "Generate detailed release notes with the following information:\n\n\
        Commit History: {}\n\
        Repository: {}\n\
        Release Name: {}\n\
        Version: {}\n\n\
        Please analyze the commits and generate comprehensive release notes following the system guidelines.",
        context.commits, context.repository, context.release_name, context.version
    )
}

/// Default payload: one system message, one user message
pub fn build_chat_completion_request(
    context: &ReleaseContext,
    settings: &PromptSettings,
    model: &str,
) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(create_release_notes_system_prompt(settings)),
            ChatMessage::user(create_release_notes_user_prompt(context)),
        ],
    }
}
