//! Per-page session state: the resolved board name, the display language
//! and the teardown flag guarding in-flight completions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reserved board every client can fall back to.
pub const DEFAULT_BOARD: &str = "public";

/// Name of a board, resolved once per page load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardName(String);

impl BoardName {
    /// Resolves the active board from the page context. Unset or blank
    /// input falls back to the reserved default board.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(name) if !name.is_empty() => Self(name.to_string()),
            _ => Self::default_board(),
        }
    }

    pub fn default_board() -> Self {
        Self(DEFAULT_BOARD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_BOARD
    }
}

impl fmt::Display for BoardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BoardName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for BoardName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Display language of the hosting page. Translation of notices is the
/// render side's concern; the engine only carries the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "zh")]
    Zh,
    #[serde(rename = "en")]
    En,
}

impl Default for Language {
    fn default() -> Self {
        Language::Zh
    }
}

/// Lifecycle of one board view: created on page load, disposed on
/// navigation away.
///
/// After `dispose()`, completions of operations that were already in
/// flight are discarded instead of applied.
#[derive(Debug)]
pub struct SessionContext {
    board: BoardName,
    language: Language,
    disposed: AtomicBool,
}

impl SessionContext {
    pub fn new(board: BoardName, language: Language) -> Self {
        Self {
            board,
            language,
            disposed: AtomicBool::new(false),
        }
    }

    pub fn board(&self) -> &BoardName {
        &self.board
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
