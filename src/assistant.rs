//! Gaia, the in-app wellness assistant.
//!
//! Builds the persona-tailored system prompt, runs one chat turn against
//! the configured provider, and persists both sides of the exchange. When
//! the AI buddy is off or the call fails, the turn still completes with a
//! canned reply so the transcript never loses a message.

use anyhow::Result;

use crate::chat::{ChatMessage, ChatStore, Role};
use crate::profile::UserProfile;
use crate::providers::{ChatProvider, Message};
use crate::settings::AiBuddySettings;

/// Reply used when the AI buddy is disabled, has no key, or the call fails.
pub const PLACEHOLDER_REPLY: &str = "I'm **Gaia**, your in-app assistant. To get real AI replies, go to **Settings → AI Buddy** and add your Ollama API key (get one at ollama.com/settings/keys).\n\nYour messages are always saved for context.";

/// Shown once at the start of an empty conversation.
pub const MEDICAL_DISCLAIMER: &str = "I'm not a medical advisor. Any advice I give is for general wellness only—please recheck and validate anything important. If you're experiencing any health or mental health issues, please seek professional medical assistance.";

/// Persona-tailored system prompt. Every persona line appears only when
/// the profile carries that field.
pub fn system_prompt(profile: Option<&UserProfile>) -> String {
    let mut lines: Vec<String> = vec![
        "You are Gaia, the MegaMood in-app wellness assistant. Be supportive, warm, and concise."
            .to_string(),
        String::new(),
        "## Persona (use this to tailor your replies)".to_string(),
    ];
    match profile {
        Some(user) => {
            let called = if !user.preferred_username.trim().is_empty() {
                user.preferred_username.as_str()
            } else if !user.name.trim().is_empty() {
                user.name.as_str()
            } else {
                "the user"
            };
            lines.push(format!("- The user prefers to be called: {called}."));
            if !user.lifestyle_goals.is_empty() {
                lines.push(format!(
                    "- Their lifestyle goals: {}.",
                    user.lifestyle_goals.join(", ")
                ));
            }
            if let Some(gender) = &user.gender {
                lines.push(format!("- Gender: {gender}."));
            }
            if let Some(race) = &user.race {
                lines.push(format!("- Race/ethnicity: {race}."));
            }
            if let Some(country) = &user.country {
                lines.push(format!("- Country/region: {country}."));
            }
            if let Some(diet) = &user.diet {
                lines.push(format!("- Diet: {diet}."));
            }
            lines.push(
                "- Offer advice and suggestions that are relevant to their goals and context."
                    .to_string(),
            );
        }
        None => {
            lines.push(
                "- No persona details are available; keep replies general and friendly."
                    .to_string(),
            );
        }
    }
    lines.extend(
        [
            "",
            "## Important rules",
            "- You are NOT a medical professional. Do not give medical diagnoses, prescribe, or replace doctors.",
            "- If the user mentions health problems, mental health struggles, or symptoms, encourage them to see a doctor or qualified professional.",
            "- Frame any wellness or lifestyle advice as general support only; remind them to validate important decisions with qualified professionals when needed.",
            "- At the start of a new conversation you may briefly remind them you are not a medical advisor and that they should seek professional care if they have health concerns.",
            "",
            "## Formatting rules",
            "- Do NOT use tables. Use bullet points or numbered lists instead.",
            "- Do NOT use emojis.",
            "- Use bullet points (- or *) to organize information clearly.",
            "- Keep responses concise and easy to read on mobile.",
        ]
        .map(str::to_string),
    );
    lines.join("\n")
}

/// One chat turn: persist the user message, get a reply, persist that too.
/// The transcript is rewritten after each side of the exchange, so even a
/// turn that dies mid-way keeps the user's message. The provider sees the
/// system prompt plus the full transcript including the new message.
/// Returns the stored assistant message.
pub async fn run_turn(
    chat: &ChatStore,
    profile: Option<&UserProfile>,
    settings: &AiBuddySettings,
    provider: &dyn ChatProvider,
    input: &str,
) -> Result<ChatMessage> {
    let text = input.trim();
    if text.is_empty() {
        anyhow::bail!("message cannot be empty");
    }
    let mut messages = chat.load();
    messages.push(ChatMessage::new(Role::User, text));
    chat.save(&messages)?;

    let reply = if settings.ready() {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(Message::system(system_prompt(profile)));
        wire.extend(messages.iter().map(|m| Message {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
        }));
        match provider.chat(&wire).await {
            Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
            Ok(_) => PLACEHOLDER_REPLY.to_string(),
            Err(err) => {
                tracing::warn!("assistant call failed: {err}");
                PLACEHOLDER_REPLY.to_string()
            }
        }
    } else {
        PLACEHOLDER_REPLY.to_string()
    };

    let assistant = ChatMessage::new(Role::Assistant, reply);
    messages.push(assistant.clone());
    chat.save(&messages)?;
    Ok(assistant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Script {
        Reply(&'static str),
        Fail,
    }

    struct ScriptedProvider {
        script: Script,
        calls: AtomicUsize,
        seen: Mutex<Vec<Message>>,
    }

    impl ScriptedProvider {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn chat(&self, messages: &[Message]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock() = messages.to_vec();
            match self.script {
                Script::Reply(text) => Ok(text.to_string()),
                Script::Fail => anyhow::bail!("scripted failure"),
            }
        }
    }

    fn full_profile() -> UserProfile {
        UserProfile {
            name: "Thandi".to_string(),
            surname: "Mokoena".to_string(),
            preferred_username: "Thandi".to_string(),
            lifestyle_goals: vec!["Fitness".to_string(), "Sleep".to_string()],
            date_of_birth: "1992-06-14".to_string(),
            gender: Some("Female".to_string()),
            race: None,
            country: Some("South Africa".to_string()),
            diet: Some("Vegetarian".to_string()),
            weight: None,
            height: None,
            completed_at: None,
        }
    }

    fn ready_settings() -> AiBuddySettings {
        AiBuddySettings {
            enabled: true,
            api_key: "key".to_string(),
            base_url: "https://ollama.com".to_string(),
            model: "gpt-oss:120b".to_string(),
        }
    }

    #[test]
    fn prompt_includes_only_present_persona_lines() {
        let prompt = system_prompt(Some(&full_profile()));
        assert!(prompt.contains("- The user prefers to be called: Thandi."));
        assert!(prompt.contains("- Their lifestyle goals: Fitness, Sleep."));
        assert!(prompt.contains("- Gender: Female."));
        assert!(prompt.contains("- Country/region: South Africa."));
        assert!(prompt.contains("- Diet: Vegetarian."));
        assert!(!prompt.contains("Race/ethnicity"));
        assert!(prompt.contains("## Important rules"));
        assert!(prompt.contains("## Formatting rules"));
    }

    #[test]
    fn prompt_without_profile_stays_general() {
        let prompt = system_prompt(None);
        assert!(prompt.contains("- No persona details are available"));
        assert!(!prompt.contains("prefers to be called"));
    }

    #[test]
    fn prompt_falls_back_to_name_then_generic() {
        let mut profile = full_profile();
        profile.preferred_username = String::new();
        assert!(system_prompt(Some(&profile)).contains("prefers to be called: Thandi."));
        profile.name = String::new();
        assert!(system_prompt(Some(&profile)).contains("prefers to be called: the user."));
    }

    #[tokio::test]
    async fn disabled_buddy_skips_the_network_and_uses_the_placeholder() {
        let dir = tempfile::tempdir().expect("tmp");
        let chat = ChatStore::new(dir.path());
        let provider = ScriptedProvider::new(Script::Reply("never sent"));

        let reply = run_turn(&chat, None, &AiBuddySettings::default(), &provider, "hi")
            .await
            .expect("turn");
        assert_eq!(reply.content, PLACEHOLDER_REPLY);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let messages = chat.load();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn enabled_buddy_sends_system_plus_history_and_stores_the_reply() {
        let dir = tempfile::tempdir().expect("tmp");
        let chat = ChatStore::new(dir.path());
        chat.save(&[
            ChatMessage::new(Role::User, "earlier question"),
            ChatMessage::new(Role::Assistant, "earlier answer"),
        ])
        .expect("seed");
        let provider = ScriptedProvider::new(Script::Reply("  fresh reply  "));

        let reply = run_turn(
            &chat,
            Some(&full_profile()),
            &ready_settings(),
            &provider,
            "what next?",
        )
        .await
        .expect("turn");
        assert_eq!(reply.content, "fresh reply");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let seen = provider.seen.lock();
        assert_eq!(seen[0].role, "system");
        assert!(seen[0].content.contains("Thandi"));
        assert_eq!(seen[1].content, "earlier question");
        assert_eq!(seen[2].content, "earlier answer");
        assert_eq!(seen.last().map(|m| m.content.as_str()), Some("what next?"));

        let messages = chat.load();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[3].content, "fresh reply");
    }

    #[tokio::test]
    async fn failed_or_empty_replies_fall_back_to_the_placeholder() {
        let dir = tempfile::tempdir().expect("tmp");
        let chat = ChatStore::new(dir.path());
        let provider = ScriptedProvider::new(Script::Fail);
        let reply = run_turn(&chat, None, &ready_settings(), &provider, "hello")
            .await
            .expect("turn");
        assert_eq!(reply.content, PLACEHOLDER_REPLY);

        let provider = ScriptedProvider::new(Script::Reply("   "));
        let reply = run_turn(&chat, None, &ready_settings(), &provider, "again")
            .await
            .expect("turn");
        assert_eq!(reply.content, PLACEHOLDER_REPLY);
        assert_eq!(chat.load().len(), 4);
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_writing() {
        let dir = tempfile::tempdir().expect("tmp");
        let chat = ChatStore::new(dir.path());
        let provider = ScriptedProvider::new(Script::Reply("unused"));
        let result = run_turn(&chat, None, &ready_settings(), &provider, "   ").await;
        assert!(result.is_err());
        assert!(chat.load().is_empty());
    }
}
