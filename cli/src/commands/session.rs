//! Line-oriented theme session.
//!
//! Every line that is not a `:command` is treated as a theme description
//! and sent to the generator. The active theme's CSS is written out each
//! time it changes.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use color_eyre::eyre::Result;
use prism_theme::{
    get_all_themes, render_root_css, PaletteSource, StyleSink, Theme, ThemeGenerator, ThemeStore,
};
use tracing::{info, warn};

use crate::config::{themes_dir, UserConfig};

const HELP: &str = "\
Type a description (e.g. \"warm sunset\") to generate a theme.
  :list         show known themes
  :use <id>     switch to a known theme
  :show         print the active theme's CSS
  :help         show this message
  :quit         leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Generate(String),
    List,
    Use(String),
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return SessionCommand::Generate(line.to_string());
        };

        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().unwrap_or_default().trim();

        match name {
            "list" | "ls" => SessionCommand::List,
            "use" => SessionCommand::Use(arg.to_string()),
            "show" => SessionCommand::Show,
            "help" | "h" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            other => SessionCommand::Unknown(other.to_string()),
        }
    }
}

/// Writes the active theme's `:root` block to a file, or stdout when no
/// file is configured.
pub struct CssWriter {
    target: Option<PathBuf>,
    last_error: Option<String>,
}

impl CssWriter {
    pub fn new(target: Option<PathBuf>) -> Self {
        Self {
            target,
            last_error: None,
        }
    }

    /// Why the most recent write failed, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl StyleSink for CssWriter {
    fn apply(&mut self, theme: &Theme) {
        let css = render_root_css(theme);
        match &self.target {
            Some(path) => match fs::write(path, css) {
                Ok(()) => self.last_error = None,
                Err(e) => {
                    warn!("Failed to write CSS to {:?}: {}", path, e);
                    let message = format!("Failed to write CSS to {}: {}", path.display(), e);
                    eprintln!("{}", message);
                    self.last_error = Some(message);
                }
            },
            None => print!("{}", css),
        }
    }

    fn loading_changed(&mut self, loading: bool) {
        if loading {
            eprintln!("Generating...");
        }
    }
}

pub fn run(config: &UserConfig, css_out: Option<PathBuf>) -> Result<()> {
    let target = css_out.or_else(|| config.css_output.clone());
    let generator = ThemeGenerator::new(config.generator_config());
    if !generator.has_api_key() {
        eprintln!("No API key configured, generated themes will use the fallback palette.");
    }
    if let Some(path) = &target {
        info!("Writing CSS to {:?}", path);
        eprintln!("Writing CSS to {}", path.display());
    }

    let themes = get_all_themes(Some(&themes_dir()));
    let mut store = ThemeStore::with_themes(generator, CssWriter::new(target), themes);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut store, stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Drive `store` from `input` until `:quit` or end of input.
pub fn run_session<P, S, R, W>(
    store: &mut ThemeStore<P, S>,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    P: PaletteSource,
    S: StyleSink,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        match SessionCommand::parse(&line) {
            SessionCommand::Generate(prompt) => match store.request_ai_theme(&prompt) {
                Ok(theme) => writeln!(out, "Applied {} ({})", theme.name, theme.id)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            SessionCommand::List => {
                let active = store.active_theme().id.clone();
                for theme in store.themes() {
                    let marker = if theme.id == active { '*' } else { ' ' };
                    writeln!(out, "{} {:<18} {}", marker, theme.id, theme.name)?;
                }
            }
            SessionCommand::Use(id) => match store.switch_theme_by_id(&id) {
                Some(theme) => writeln!(out, "Applied {} ({})", theme.name, theme.id)?,
                None => writeln!(out, "Unknown theme: {}", id)?,
            },
            SessionCommand::Show => write!(out, "{}", render_root_css(store.active_theme()))?,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Unknown(name) => {
                writeln!(out, "Unknown command :{} (try :help)", name)?
            }
            SessionCommand::Quit => break,
        }
        out.flush()?;
    }

    Ok(())
}
