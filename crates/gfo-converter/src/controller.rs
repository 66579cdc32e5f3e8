use tracing::{debug, warn};

use crate::rewriter::{Mode, PageLocation, RewriteError, derive_target_url};
use crate::url_rules::{InputCheck, check_input};
use crate::view::{ResultRow, Validity, View};

/// Derived URLs produced during one page lifetime.
///
/// Each list keeps insertion order and holds no duplicates. Lookups are a
/// linear scan; a page session only ever holds a handful of entries.
#[derive(Debug, Clone, Default)]
pub struct Session {
    converted: Vec<String>,
    downloaded: Vec<String>,
}

impl Session {
    pub fn converted(&self) -> &[String] {
        &self.converted
    }

    pub fn downloaded(&self) -> &[String] {
        &self.downloaded
    }

    pub fn contains(&self, mode: Mode, url: &str) -> bool {
        self.set(mode).iter().any(|u| u == url)
    }

    /// Returns false if the URL was already recorded for this mode.
    fn insert(&mut self, mode: Mode, url: &str) -> bool {
        if self.contains(mode, url) {
            return false;
        }
        self.set_mut(mode).push(url.to_string());
        true
    }

    fn set(&self, mode: Mode) -> &Vec<String> {
        match mode {
            Mode::Convert => &self.converted,
            Mode::Download => &self.downloaded,
        }
    }

    fn set_mut(&mut self, mode: Mode) -> &mut Vec<String> {
        match mode {
            Mode::Convert => &mut self.converted,
            Mode::Download => &mut self.downloaded,
        }
    }
}

/// Result of a convert or download action. None of these reach the user
/// beyond the field state and the appended row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Appended(String),
    /// Derived URL was already in the session; nothing changed.
    Duplicate(String),
    /// Field did not validate; nothing changed.
    Rejected,
    Failed(RewriteError),
}

pub struct Controller<V> {
    view: V,
    location: PageLocation,
    session: Session,
}

impl<V: View> Controller<V> {
    pub fn new(view: V, location: PageLocation) -> Self {
        Self {
            view,
            location,
            session: Session::default(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn clear_input(&mut self) {
        self.view.set_field_value("");
        self.view.set_validity(Validity::Untouched);
    }

    /// Checks the current field text and reflects the result on the field.
    /// An empty field is reset to its untouched state.
    pub fn validate_input(&mut self) -> bool {
        match check_input(&self.view.field_value()) {
            InputCheck::Empty => {
                self.clear_input();
                false
            }
            InputCheck::Valid { .. } => {
                self.view.set_validity(Validity::Valid);
                true
            }
            InputCheck::Rejected(reason) => {
                debug!(?reason, "input rejected");
                self.view.set_validity(Validity::Invalid);
                false
            }
        }
    }

    pub fn handle_convert(&mut self) -> Outcome {
        self.handle(Mode::Convert)
    }

    pub fn handle_download(&mut self) -> Outcome {
        self.handle(Mode::Download)
    }

    fn handle(&mut self, mode: Mode) -> Outcome {
        if !self.validate_input() {
            return Outcome::Rejected;
        }

        // Derive from the text as typed, not the lowercased validation copy.
        let original = self.view.field_value();
        let derived = match derive_target_url(&original, &self.location, mode) {
            Ok(url) => url,
            Err(e) => {
                warn!(?mode, "could not derive target url: {}", e);
                return Outcome::Failed(e);
            }
        };

        if !self.session.insert(mode, &derived) {
            debug!(?mode, url = %derived, "already listed, skipping");
            return Outcome::Duplicate(derived);
        }

        self.clear_input();
        let row = match mode {
            Mode::Convert => ResultRow::Converted {
                original,
                derived: derived.clone(),
            },
            Mode::Download => ResultRow::Downloadable {
                original,
                derived: derived.clone(),
            },
        };
        self.view.append_row(&row);

        Outcome::Appended(derived)
    }
}
