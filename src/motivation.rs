//! Daily motivation: a one-line pep talk from Gaia, cached per day.
//!
//! The cache file holds a single `{date, text}` pair and is only valid on
//! the day it was written. Generation is strictly opt-in on the AI side
//! (enabled + key) and never caches a failure, so a bad morning call gets
//! retried the next time someone asks.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::notifications::NotificationStore;
use crate::profile::UserProfile;
use crate::providers::{ChatProvider, Message};
use crate::secure::{SecureKey, SecureStore, SecureStoreError};
use crate::settings::AiBuddySettings;
use crate::store;

const MOTIVATION_FILE: &str = "daily_motivation.json";

/// Fixed notification id; rescheduling replaces the pending entry.
pub const NOTIFICATION_ID: &str = "daily-motivation-gaia";
pub const NOTIFICATION_TITLE: &str = "Today's motivation from Gaia";

const CONTEXT_TAIL: usize = 6;
const CONTEXT_LINE_CHARS: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationCache {
    pub date: String,
    pub text: String,
}

pub struct MotivationStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MotivationStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(MOTIVATION_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Cached text for the given day; stale, absent, and unreadable caches
    /// all read as `None`.
    pub fn cached_for(&self, today: &str) -> Option<String> {
        let cache: MotivationCache = store::load_optional(&self.path)?;
        (cache.date == today).then_some(cache.text)
    }

    pub fn save_for(&self, today: &str, text: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        store::save_json(
            &self.path,
            &MotivationCache {
                date: today.to_string(),
                text: text.to_string(),
            },
        )
    }

    pub fn delete(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        store::remove_file(&self.path)
    }
}

/// Daily motivation opt-in flag, off until the user turns it on.
pub fn opt_in() -> bool {
    SecureStore::get_flag(SecureKey::DailyMotivationEnabled, false)
}

pub fn set_opt_in(enabled: bool) -> Result<(), SecureStoreError> {
    SecureStore::set_flag(SecureKey::DailyMotivationEnabled, enabled)
}

/// The single-user-message prompt sent to the model. Recent chat lines ride
/// along for tone when a transcript exists.
pub fn build_prompt(profile: &UserProfile, chat_tail: &[ChatMessage]) -> String {
    let goals = if profile.lifestyle_goals.is_empty() {
        "general wellness".to_string()
    } else {
        profile.lifestyle_goals.join(", ")
    };
    let mut prompt = format!(
        "You are Gaia, a supportive in-app assistant. Write exactly one short motivational statement (2–3 sentences max) for {} for today. Use their name. Consider their lifestyle goals: {}. Keep it warm, specific to their goals, and actionable. Do not use markdown or quotes.",
        profile.preferred_username, goals
    );
    if !chat_tail.is_empty() {
        prompt.push_str("\n\nRecent chat context (for tone only):\n");
        let lines: Vec<String> = chat_tail.iter().map(context_line).collect();
        prompt.push_str(&lines.join("\n"));
    }
    prompt
}

fn context_line(message: &ChatMessage) -> String {
    let mut content: String = message
        .content
        .chars()
        .take(CONTEXT_LINE_CHARS)
        .collect();
    if message.content.chars().count() > CONTEXT_LINE_CHARS {
        content.push('…');
    }
    format!("{}: {}", message.role.as_str(), content)
}

/// Generate and cache today's motivation. Returns `Ok(None)` without any
/// network call when the AI buddy is not ready; a failed or empty reply is
/// also `Ok(None)` and leaves the cache untouched. On success the text is
/// cached under today's key and, when `notify_opt_in` is set, the fixed-id
/// notification is (re)scheduled best-effort.
#[allow(clippy::too_many_arguments)]
pub async fn generate_for_today(
    motivation: &MotivationStore,
    notifications: &NotificationStore,
    profile: &UserProfile,
    settings: &AiBuddySettings,
    history: &[ChatMessage],
    provider: &dyn ChatProvider,
    today: &str,
    notify_opt_in: bool,
) -> Result<Option<String>> {
    if !settings.ready() {
        return Ok(None);
    }

    let tail_start = history.len().saturating_sub(CONTEXT_TAIL);
    let prompt = build_prompt(profile, &history[tail_start..]);
    let reply = match provider.chat(&[Message::user(prompt)]).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!("motivation call failed: {err}");
            return Ok(None);
        }
    };
    let text = reply.trim();
    if text.is_empty() {
        return Ok(None);
    }

    motivation.save_for(today, text)?;
    if notify_opt_in {
        if let Err(err) =
            notifications.schedule(NOTIFICATION_ID, NOTIFICATION_TITLE, text, Local::now())
        {
            tracing::warn!("could not schedule motivation notification: {err}");
        }
    }
    Ok(Some(text.to_string()))
}

/// Cache-first wrapper: a valid entry for today short-circuits without
/// touching the network, so at most one successful call happens per day.
#[allow(clippy::too_many_arguments)]
pub async fn ensure_for_today(
    motivation: &MotivationStore,
    notifications: &NotificationStore,
    profile: &UserProfile,
    settings: &AiBuddySettings,
    history: &[ChatMessage],
    provider: &dyn ChatProvider,
    today: &str,
    notify_opt_in: bool,
) -> Result<Option<String>> {
    if let Some(text) = motivation.cached_for(today) {
        return Ok(Some(text));
    }
    generate_for_today(
        motivation,
        notifications,
        profile,
        settings,
        history,
        provider,
        today,
        notify_opt_in,
    )
    .await
}

/// Re-arm the notification from an already-valid cache entry, e.g. after a
/// restart. Does nothing without the opt-in or a fresh cache.
pub fn reschedule_if_enabled(
    motivation: &MotivationStore,
    notifications: &NotificationStore,
    opt_in: bool,
    today: &str,
    now: DateTime<Local>,
) -> Result<()> {
    if !opt_in {
        return Ok(());
    }
    if let Some(text) = motivation.cached_for(today) {
        notifications.schedule(NOTIFICATION_ID, NOTIFICATION_TITLE, &text, now)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(reply: Option<&'static str>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for CountingProvider {
        async fn chat(&self, _messages: &[Message]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => anyhow::bail!("scripted failure"),
            }
        }
    }

    fn profile_with_goals(goals: &[&str]) -> UserProfile {
        UserProfile {
            name: "Thandi".to_string(),
            surname: "Mokoena".to_string(),
            preferred_username: "Thandi".to_string(),
            lifestyle_goals: goals.iter().map(|g| g.to_string()).collect(),
            date_of_birth: "1992-06-14".to_string(),
            gender: None,
            race: None,
            country: None,
            diet: None,
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
    fn cache_is_only_valid_on_its_own_day() {
        let dir = tempfile::tempdir().expect("tmp");
        let motivation = MotivationStore::new(dir.path());
        assert_eq!(motivation.cached_for("2025-03-10"), None);

        motivation.save_for("2025-03-10", "Go get it!").expect("save");
        assert_eq!(
            motivation.cached_for("2025-03-10").as_deref(),
            Some("Go get it!")
        );
        assert_eq!(motivation.cached_for("2025-03-11"), None);

        motivation.delete().expect("delete");
        assert_eq!(motivation.cached_for("2025-03-10"), None);
    }

    #[test]
    fn corrupt_cache_reads_as_absent() {
        let dir = tempfile::tempdir().expect("tmp");
        std::fs::write(dir.path().join(MOTIVATION_FILE), "oops").expect("write");
        assert_eq!(MotivationStore::new(dir.path()).cached_for("2025-03-10"), None);
    }

    #[test]
    fn prompt_names_the_user_and_their_goals() {
        let prompt = build_prompt(&profile_with_goals(&["Fitness", "Sleep"]), &[]);
        assert!(prompt.contains("for Thandi for today"));
        assert!(prompt.contains("lifestyle goals: Fitness, Sleep."));
        assert!(!prompt.contains("Recent chat context"));

        let prompt = build_prompt(&profile_with_goals(&[]), &[]);
        assert!(prompt.contains("lifestyle goals: general wellness."));
    }

    #[test]
    fn prompt_appends_truncated_chat_context() {
        let long = "a".repeat(150);
        let tail = vec![
            ChatMessage::new(Role::User, long.clone()),
            ChatMessage::new(Role::Assistant, "short answer"),
        ];
        let prompt = build_prompt(&profile_with_goals(&["Fitness"]), &tail);
        assert!(prompt.contains("Recent chat context (for tone only):"));
        let expected = format!("user: {}…", "a".repeat(120));
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&long));
        assert!(prompt.contains("assistant: short answer"));
    }

    #[tokio::test]
    async fn not_ready_means_no_call_and_no_cache() {
        let dir = tempfile::tempdir().expect("tmp");
        let motivation = MotivationStore::new(dir.path());
        let notifications = NotificationStore::new(dir.path());
        let provider = CountingProvider::new(Some("unused"));

        let result = generate_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&[]),
            &AiBuddySettings::default(),
            &[],
            &provider,
            "2025-03-10",
            false,
        )
        .await
        .expect("generate");
        assert_eq!(result, None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(motivation.cached_for("2025-03-10"), None);
    }

    #[tokio::test]
    async fn success_caches_and_failure_does_not() {
        let dir = tempfile::tempdir().expect("tmp");
        let motivation = MotivationStore::new(dir.path());
        let notifications = NotificationStore::new(dir.path());

        let failing = CountingProvider::new(None);
        let result = generate_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&["Fitness"]),
            &ready_settings(),
            &[],
            &failing,
            "2025-03-10",
            false,
        )
        .await
        .expect("generate");
        assert_eq!(result, None);
        assert_eq!(motivation.cached_for("2025-03-10"), None);

        let empty = CountingProvider::new(Some("   "));
        let result = generate_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&["Fitness"]),
            &ready_settings(),
            &[],
            &empty,
            "2025-03-10",
            false,
        )
        .await
        .expect("generate");
        assert_eq!(result, None);
        assert_eq!(motivation.cached_for("2025-03-10"), None);

        let working = CountingProvider::new(Some("  You've got this, Thandi.  "));
        let result = generate_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&["Fitness"]),
            &ready_settings(),
            &[],
            &working,
            "2025-03-10",
            false,
        )
        .await
        .expect("generate");
        assert_eq!(result.as_deref(), Some("You've got this, Thandi."));
        assert_eq!(
            motivation.cached_for("2025-03-10").as_deref(),
            Some("You've got this, Thandi.")
        );
    }

    #[tokio::test]
    async fn a_valid_cache_short_circuits_the_provider() {
        let dir = tempfile::tempdir().expect("tmp");
        let motivation = MotivationStore::new(dir.path());
        let notifications = NotificationStore::new(dir.path());
        let provider = CountingProvider::new(Some("fresh text"));

        let first = ensure_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&["Sleep"]),
            &ready_settings(),
            &[],
            &provider,
            "2025-03-10",
            false,
        )
        .await
        .expect("ensure");
        assert_eq!(first.as_deref(), Some("fresh text"));

        let second = ensure_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&["Sleep"]),
            &ready_settings(),
            &[],
            &provider,
            "2025-03-10",
            false,
        )
        .await
        .expect("ensure");
        assert_eq!(second.as_deref(), Some("fresh text"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn opt_in_schedules_the_fixed_id_notification() {
        let dir = tempfile::tempdir().expect("tmp");
        let motivation = MotivationStore::new(dir.path());
        let notifications = NotificationStore::new(dir.path());
        let provider = CountingProvider::new(Some("Morning! Keep moving."));

        generate_for_today(
            &motivation,
            &notifications,
            &profile_with_goals(&["Fitness"]),
            &ready_settings(),
            &[],
            &provider,
            "2025-03-10",
            true,
        )
        .await
        .expect("generate");

        let pending = notifications.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, NOTIFICATION_ID);
        assert_eq!(pending[0].title, NOTIFICATION_TITLE);
        assert_eq!(pending[0].body, "Morning! Keep moving.");
    }

    #[test]
    fn reschedule_needs_opt_in_and_a_fresh_cache() {
        let dir = tempfile::tempdir().expect("tmp");
        let motivation = MotivationStore::new(dir.path());
        let notifications = NotificationStore::new(dir.path());
        let now = Local::now();

        motivation.save_for("2025-03-10", "Shine on.").expect("save");
        reschedule_if_enabled(&motivation, &notifications, false, "2025-03-10", now)
            .expect("reschedule");
        assert!(notifications.pending().is_empty());

        reschedule_if_enabled(&motivation, &notifications, true, "2025-03-11", now)
            .expect("reschedule");
        assert!(notifications.pending().is_empty());

        reschedule_if_enabled(&motivation, &notifications, true, "2025-03-10", now)
            .expect("reschedule");
        assert_eq!(notifications.pending().len(), 1);
    }
}
