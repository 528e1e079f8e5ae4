//! Session theme state.
//!
//! A [`ThemeStore`] owns the known themes and the active one for the
//! lifetime of a session. Mutation goes through `&mut self`, so a second
//! generation request cannot start before the first has finished.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::builtin::builtin_themes;
use crate::generate::PaletteSource;
use crate::style::StyleSink;
use crate::types::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeRequestError {
    #[error("Please enter a theme description")]
    EmptyPrompt,
}

pub struct ThemeStore<P, S> {
    source: P,
    sink: S,
    themes: Vec<Theme>,
    active: Theme,
    is_loading: bool,
    error: Option<String>,
}

impl<P: PaletteSource, S: StyleSink> ThemeStore<P, S> {
    /// Start a session with the built-in themes.
    pub fn new(source: P, sink: S) -> Self {
        Self::with_themes(source, sink, builtin_themes())
    }

    /// Start a session with `themes`; the first one becomes active and is
    /// applied immediately. An empty list falls back to the built-ins.
    pub fn with_themes(source: P, mut sink: S, themes: Vec<Theme>) -> Self {
        let themes = if themes.is_empty() {
            builtin_themes()
        } else {
            themes
        };
        let active = themes[0].clone();
        sink.apply(&active);

        Self {
            source,
            sink,
            themes,
            active,
            is_loading: false,
            error: None,
        }
    }

    pub fn active_theme(&self) -> &Theme {
        &self.active
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn find_theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The last user-facing error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Make `theme` active and publish it. Any theme is accepted.
    pub fn switch_theme(&mut self, theme: Theme) {
        info!(id = %theme.id, name = %theme.name, "Changing theme");
        self.active = theme;
        self.sink.apply(&self.active);
    }

    /// Switch to a known theme by id.
    pub fn switch_theme_by_id(&mut self, id: &str) -> Option<&Theme> {
        let theme = self.find_theme(id)?.clone();
        self.switch_theme(theme);
        Some(&self.active)
    }

    /// Generate a theme from `prompt`, add it to the known themes and make it
    /// active.
    ///
    /// Generation itself cannot fail, so the only error is an empty prompt,
    /// which leaves the themes untouched.
    pub fn request_ai_theme(&mut self, prompt: &str) -> Result<&Theme, ThemeRequestError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            let err = ThemeRequestError::EmptyPrompt;
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.set_loading(true);
        self.error = None;

        let colors = self.source.generate_theme(prompt);
        let theme = Theme {
            id: self.next_generated_id(),
            name: capitalize_first(prompt),
            colors,
            is_builtin: false,
        };

        self.themes.push(theme.clone());
        self.switch_theme(theme);
        self.set_loading(false);

        Ok(&self.active)
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.sink.loading_changed(loading);
    }

    /// `ai-<unix millis>`, bumped past any id already taken.
    fn next_generated_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = format!("ai-{}", millis);
            if self.find_theme(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
