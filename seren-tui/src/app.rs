//! Application state for the TUI.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use seren_core::ai::ChatSession;
use seren_core::stats;
use seren_core::store::{BlobStore, EntryStore, ProfileStore};
use seren_core::types::{ChartPoint, MoodStats};
use seren_core::{export, Config, Error, ReplyEngine};

/// How long a toast notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Days shown in the dashboard mood chart.
const CHART_DAYS: u32 = 7;

/// Current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    LogMood,
    History,
    Chat,
    Profile,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::LogMood => "Log Mood",
            View::History => "History",
            View::Chat => "Companion",
            View::Profile => "Profile",
        }
    }

    fn next(self) -> Self {
        match self {
            View::Dashboard => View::LogMood,
            View::LogMood => View::History,
            View::History => View::Chat,
            View::Chat => View::Profile,
            View::Profile => View::Dashboard,
        }
    }
}

/// Toast severity, mirrored in the render colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient, non-blocking advisory.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    raised_at: Instant,
}

/// Pending destructive action awaiting explicit confirmation.
#[derive(Debug, Clone)]
pub enum Confirm {
    DeleteEntry(String),
    ClearChat,
    ClearAllData,
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::DeleteEntry(_) => "Delete this mood entry?",
            Confirm::ClearChat => "Clear the chat history?",
            Confirm::ClearAllData => "Clear ALL data? This cannot be undone.",
        }
    }
}

/// In-progress mood form state.
#[derive(Debug, Default)]
pub struct MoodForm {
    pub mood: Option<u8>,
    pub note: String,
}

/// Main application state.
pub struct App {
    pub entries: EntryStore,
    pub profile: ProfileStore,
    pub chat: ChatSession,
    /// Current-thread runtime; chat sends are blocked on, which serializes
    /// them per session.
    runtime: tokio::runtime::Runtime,
    pub view: View,
    pub form: MoodForm,
    /// Id of the entry the form is editing, if any (None = new entry)
    pub editing: Option<String>,
    pub chat_input: String,
    pub history_selected: usize,
    pub editing_name: Option<String>,
    pub confirm: Option<Confirm>,
    pub notices: Vec<Notice>,
    pub should_quit: bool,
}

impl App {
    /// Create the app: load persisted state and resolve the reply strategy.
    pub fn new(config: Config, blobs: BlobStore) -> Result<Self> {
        let blobs = Arc::new(blobs);
        let engine = ReplyEngine::from_config(&config);
        let hosted = engine.is_hosted();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut app = Self {
            entries: EntryStore::load(Arc::clone(&blobs)),
            profile: ProfileStore::load(Arc::clone(&blobs)),
            chat: ChatSession::load(engine, blobs),
            runtime,
            view: View::default(),
            form: MoodForm::default(),
            editing: None,
            chat_input: String::new(),
            history_selected: 0,
            editing_name: None,
            confirm: None,
            notices: Vec::new(),
            should_quit: false,
        };
        if hosted {
            app.notice(NoticeKind::Info, "Hosted AI companion enabled");
        }
        Ok(app)
    }

    // ============================================
    // Derived views
    // ============================================

    pub fn stats(&self) -> MoodStats {
        stats::calculate_stats(self.entries.entries(), Local::now().date_naive())
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        stats::chart_series(
            self.entries.entries(),
            CHART_DAYS,
            Local::now().date_naive(),
        )
    }

    pub fn distribution(&self) -> [u32; 5] {
        stats::mood_distribution(self.entries.entries())
    }

    pub fn triggers(&self) -> Vec<(String, u32)> {
        stats::top_triggers(self.entries.entries())
    }

    // ============================================
    // Event handling
    // ============================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // A pending confirmation captures all input
        if self.confirm.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        if key.code == KeyCode::Tab {
            self.view = self.view.next();
            return;
        }

        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::LogMood => self.handle_log_key(key),
            View::History => self.handle_history_key(key),
            View::Chat => self.handle_chat_key(key),
            View::Profile => self.handle_profile_key(key),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let confirm = self.confirm.take().expect("confirm checked above");
                self.apply_confirm(confirm);
            }
            // Declining is a no-op, never an error
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm = None;
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('l') => self.view = View::LogMood,
            KeyCode::Char('h') => self.view = View::History,
            KeyCode::Char('c') => self.view = View::Chat,
            KeyCode::Char('p') => self.view = View::Profile,
            _ => {}
        }
    }

    fn handle_log_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.form = MoodForm::default();
                self.editing = None;
                self.view = View::Dashboard;
            }
            KeyCode::Left => {
                let mood = self.form.mood.unwrap_or(3);
                self.form.mood = Some(mood.saturating_sub(1).max(1));
            }
            KeyCode::Right => {
                let mood = self.form.mood.unwrap_or(3);
                self.form.mood = Some((mood + 1).min(5));
            }
            KeyCode::Enter => self.submit_mood(),
            KeyCode::Backspace => {
                self.form.note.pop();
            }
            KeyCode::Char(c) => {
                self.form.note.push(c);
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.view = View::Dashboard,
            KeyCode::Up => {
                self.history_selected = self.history_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.history_selected + 1 < self.entries.len() {
                    self.history_selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = self.entries.entries().get(self.history_selected) {
                    self.form.mood = Some(entry.mood);
                    self.form.note = entry.note.clone().unwrap_or_default();
                    self.editing = Some(entry.id.clone());
                    self.view = View::LogMood;
                }
            }
            KeyCode::Char('d') => {
                if let Some(entry) = self.entries.entries().get(self.history_selected) {
                    self.confirm = Some(Confirm::DeleteEntry(entry.id.clone()));
                }
            }
            KeyCode::Char('e') => self.export_csv(),
            KeyCode::Char('j') => self.export_json(),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
            self.confirm = Some(Confirm::ClearChat);
            return;
        }
        match key.code {
            KeyCode::Esc => self.view = View::Dashboard,
            KeyCode::Enter => self.send_chat(),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) => {
                self.chat_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        // Name editing captures character input
        if self.editing_name.is_some() {
            match key.code {
                KeyCode::Enter => {
                    let name = self.editing_name.take().unwrap_or_default();
                    let mut profile = self.profile.get().clone();
                    profile.name = name.trim().to_string();
                    self.profile.set(profile);
                    self.notice(NoticeKind::Success, "Profile updated");
                }
                KeyCode::Esc => self.editing_name = None,
                KeyCode::Backspace => {
                    if let Some(buffer) = self.editing_name.as_mut() {
                        buffer.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(buffer) = self.editing_name.as_mut() {
                        buffer.push(c);
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.view = View::Dashboard,
            KeyCode::Char('n') => {
                self.editing_name = Some(self.profile.get().name.clone());
            }
            KeyCode::Char('d') => self.toggle_pref(|p| p.daily_reminders = !p.daily_reminders),
            KeyCode::Char('w') => self.toggle_pref(|p| p.weekly_insights = !p.weekly_insights),
            KeyCode::Char('a') => self.toggle_pref(|p| p.ai_suggestions = !p.ai_suggestions),
            KeyCode::Char('x') => self.export_json(),
            KeyCode::Char('C') => self.confirm = Some(Confirm::ClearAllData),
            _ => {}
        }
    }

    fn toggle_pref(&mut self, apply: impl FnOnce(&mut seren_core::types::Preferences)) {
        let mut profile = self.profile.get().clone();
        apply(&mut profile.preferences);
        self.profile.set(profile);
    }

    // ============================================
    // Actions
    // ============================================

    fn submit_mood(&mut self) {
        let Some(mood) = self.form.mood else {
            self.notice(NoticeKind::Warning, "Select a mood first (←/→)");
            return;
        };

        let result = match self.editing.clone() {
            // An empty note on edit clears the stored one
            Some(id) => self
                .entries
                .update(
                    &id,
                    seren_core::store::EntryPatch {
                        mood: Some(mood),
                        note: Some(self.form.note.clone()),
                        date: None,
                    },
                )
                .map(|_| "Entry updated"),
            None => {
                let note = if self.form.note.trim().is_empty() {
                    None
                } else {
                    Some(self.form.note.clone())
                };
                self.entries.add(mood, note, None).map(|_| "Mood logged")
            }
        };

        match result {
            Ok(message) => {
                self.form = MoodForm::default();
                self.editing = None;
                self.history_selected = 0;
                self.view = View::Dashboard;
                self.notice(NoticeKind::Success, message);
            }
            Err(e) => self.notice(NoticeKind::Error, &e.to_string()),
        }
    }

    fn send_chat(&mut self) {
        let text = std::mem::take(&mut self.chat_input);
        let result = self.runtime.block_on(self.chat.send(&text));
        match result {
            Ok(reply) => {
                if reply.degraded {
                    self.notice(
                        NoticeKind::Warning,
                        "Connection issue - replied locally instead",
                    );
                }
            }
            Err(Error::Validation(_)) => {
                self.notice(NoticeKind::Warning, "Type a message first");
            }
            Err(e) => self.notice(NoticeKind::Error, &e.to_string()),
        }
    }

    fn apply_confirm(&mut self, confirm: Confirm) {
        match confirm {
            Confirm::DeleteEntry(id) => {
                if self.entries.delete(&id) {
                    if self.history_selected >= self.entries.len() {
                        self.history_selected = self.entries.len().saturating_sub(1);
                    }
                    self.notice(NoticeKind::Success, "Entry deleted");
                }
            }
            Confirm::ClearChat => {
                self.chat.clear();
                self.notice(NoticeKind::Success, "Chat history cleared");
            }
            Confirm::ClearAllData => {
                self.entries.clear();
                self.chat.clear();
                self.profile.reset();
                self.history_selected = 0;
                self.notice(NoticeKind::Success, "All data cleared");
            }
        }
    }

    fn export_csv(&mut self) {
        let csv = export::entries_csv(&self.entries.list());
        let path = format!("mood-history-{}.csv", Local::now().format("%Y-%m-%d"));
        match std::fs::write(&path, csv) {
            Ok(()) => self.notice(NoticeKind::Success, &format!("Exported {}", path)),
            Err(e) => self.notice(NoticeKind::Error, &format!("Export failed: {}", e)),
        }
    }

    fn export_json(&mut self) {
        let path = format!("seren-data-{}.json", Local::now().format("%Y-%m-%d"));
        let result = export::export_json(
            self.profile.get(),
            &self.entries.list(),
            chrono::Utc::now(),
        )
        .and_then(|json| std::fs::write(&path, json).map_err(Into::into));
        match result {
            Ok(()) => self.notice(NoticeKind::Success, &format!("Exported {}", path)),
            Err(e) => self.notice(NoticeKind::Error, &format!("Export failed: {}", e)),
        }
    }

    // ============================================
    // Notices
    // ============================================

    pub fn notice(&mut self, kind: NoticeKind, message: &str) {
        self.notices.push(Notice {
            kind,
            message: message.to_string(),
            raised_at: Instant::now(),
        });
    }

    /// Drop expired notices (call each frame).
    pub fn tick(&mut self) {
        self.notices
            .retain(|n| n.raised_at.elapsed() < NOTICE_TTL);
    }

    /// The notice to show, newest first.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}
