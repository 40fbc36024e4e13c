use crossterm::event::{KeyCode, KeyEvent};

use crate::catalog::Catalog;

/// What a key press did to the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    /// Keep the prompt open.
    Editing,
    /// Close without selecting anything.
    Cancel,
    /// Close and play this catalog index.
    Select(usize),
}

/// The jump-to-track prompt: a single-line fuzzy filter over track titles.
///
/// While it is open it owns the keyboard; transport bindings are not consulted.
#[derive(Debug, Default, Clone)]
pub struct JumpPrompt {
    pub query: String,
}

impl JumpPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key press to the prompt.
    pub fn handle_key(&mut self, key: &KeyEvent, catalog: &Catalog) -> PromptAction {
        match key.code {
            KeyCode::Esc => PromptAction::Cancel,
            KeyCode::Backspace => {
                self.query.pop();
                PromptAction::Editing
            }
            KeyCode::Enter => match self.best_match(catalog) {
                Some(i) => PromptAction::Select(i),
                None => PromptAction::Editing,
            },
            KeyCode::Char(c) if !c.is_control() => {
                self.query.push(c);
                PromptAction::Editing
            }
            _ => PromptAction::Editing,
        }
    }

    /// Indices of tracks whose title fuzzily matches the query, in catalog order.
    pub fn matches(&self, catalog: &Catalog) -> Vec<usize> {
        let query = self.query.trim();
        catalog
            .iter()
            .enumerate()
            .filter(|(_, t)| fuzzy_match_positions(&t.title, query).is_some())
            .map(|(i, _)| i)
            .collect()
    }

    /// The first matching track, if any.
    pub fn best_match(&self, catalog: &Catalog) -> Option<usize> {
        self.matches(catalog).first().copied()
    }
}

/// Fuzzy/subsequence match: return the character positions in `title`
/// that match `query`, or `None` if not matched.
pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut title_iter = title.chars().enumerate();

    for qc in query.chars() {
        let qc_low = qc.to_ascii_lowercase();
        loop {
            match title_iter.next() {
                Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                    positions.push(ti);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}
