//! Application model types: `App`, `Focus`, `InputMode` and `Notice`.
//!
//! Every catalog operation the front end performs goes through the
//! journal, and every outcome the user should see ends up in `notice`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, Record, list_catalogs, normalize_spaces};
use crate::error::CatalogError;
use crate::journal::Journal;

/// Genre for movies added to `catalog_name`: whitespace normalized, first
/// letter upper-cased and the rest lower-cased.
fn genre_for_catalog(catalog_name: &str) -> String {
    let name = normalize_spaces(catalog_name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Which pane receives movement keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    Catalogs,
    #[default]
    Movies,
}

/// What the keyboard is currently feeding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    NewCatalog,
    AddTitle,
    AddYear,
    ConfirmDelete,
}

/// Feedback line shown after an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub ok: bool,
}

/// The main application model.
pub struct App {
    base_dir: PathBuf,
    journal: Journal,

    pub catalogs: Vec<String>,
    pub catalog_selected: usize,

    pub records: Vec<Record>,
    pub selected: usize,
    pub marked: BTreeSet<String>,

    pub focus: Focus,
    pub input_mode: InputMode,
    pub input: String,
    pending_title: Option<String>,

    pub filter_query: String,
    pub notice: Option<Notice>,
    pub confirm_delete: bool,
}

impl App {
    /// Create an `App` over the catalogs in `base_dir`, selecting the first.
    pub fn new(base_dir: impl Into<PathBuf>, journal: Journal) -> Result<Self, CatalogError> {
        let base_dir = base_dir.into();
        let catalogs = list_catalogs(&base_dir)?;

        let mut app = Self {
            base_dir,
            journal,
            catalogs,
            catalog_selected: 0,
            records: Vec::new(),
            selected: 0,
            marked: BTreeSet::new(),
            focus: Focus::default(),
            input_mode: InputMode::default(),
            input: String::new(),
            pending_title: None,
            filter_query: String::new(),
            notice: None,
            confirm_delete: true,
        };
        app.reload_records();
        Ok(app)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Name of the selected catalog, if any exists.
    pub fn current_catalog_name(&self) -> Option<&str> {
        self.catalogs.get(self.catalog_selected).map(String::as_str)
    }

    fn current_catalog(&self) -> Result<Option<Catalog>, CatalogError> {
        self.current_catalog_name()
            .map(|name| Catalog::new(name, &self.base_dir))
            .transpose()
    }

    fn notify_ok(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            ok: true,
        });
    }

    fn notify_err(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{text}");
        self.notice = Some(Notice { text, ok: false });
    }

    /// Re-scan the base directory, keeping the selected catalog when it
    /// still exists.
    pub fn refresh_catalogs(&mut self) {
        let keep = self.current_catalog_name().map(str::to_string);
        match list_catalogs(&self.base_dir) {
            Ok(names) => self.catalogs = names,
            Err(e) => {
                self.notify_err(e.to_string());
                return;
            }
        }

        self.catalog_selected = keep
            .and_then(|k| self.catalogs.iter().position(|c| *c == k))
            .unwrap_or(0);
        self.reload_records();
    }

    /// Reload the records of the selected catalog from disk.
    pub fn reload_records(&mut self) {
        self.marked.clear();
        self.selected = 0;

        let listed = match self.current_catalog() {
            Ok(Some(catalog)) => {
                log::debug!("loading {}", catalog.path().display());
                let args = format!("{:?}", catalog.name());
                self.journal.track("list", &args, || catalog.list())
            }
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(e),
        };

        match listed {
            Ok(records) => self.records = records,
            Err(e) => {
                self.records.clear();
                self.notify_err(e.to_string());
            }
        }
        self.ensure_selected_visible();
    }

    pub fn select_catalog(&mut self, idx: usize) {
        if idx < self.catalogs.len() && idx != self.catalog_selected {
            self.catalog_selected = idx;
            self.reload_records();
        }
    }

    /// Move to the next catalog, wrapping around.
    pub fn next_catalog(&mut self) {
        if !self.catalogs.is_empty() {
            self.select_catalog((self.catalog_selected + 1) % self.catalogs.len());
        }
    }

    /// Move to the previous catalog, wrapping around.
    pub fn prev_catalog(&mut self) {
        if !self.catalogs.is_empty() {
            let len = self.catalogs.len();
            self.select_catalog((self.catalog_selected + len - 1) % len);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Catalogs => Focus::Movies,
            Focus::Movies => Focus::Catalogs,
        };
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// Indices of the records visible under the current filter.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim();
        (0..self.records.len())
            .filter(|&i| {
                query.is_empty()
                    || Self::fuzzy_match_positions(&self.records[i].to_string(), query).is_some()
            })
            .collect()
    }

    /// Fuzzy/subsequence match: return the character positions in `text`
    /// that match `query` ignoring case, or `None` if not matched.
    pub fn fuzzy_match_positions(text: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut text_iter = text.chars().enumerate();

        for qc in query.chars() {
            let qc_low: Vec<char> = qc.to_lowercase().collect();
            loop {
                match text_iter.next() {
                    Some((ti, tc)) if tc.to_lowercase().eq(qc_low.iter().copied()) => {
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

    /// Keep `selected` inside the filtered view.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
        } else if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    /// Move selection to the next visible record, wrapping around.
    pub fn next(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
    }

    /// Move selection to the previous visible record, wrapping around.
    pub fn prev(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
    }

    pub fn select_first(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.selected = first;
        }
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.selected = last;
        }
    }

    /// Mark or unmark the selected record for deletion. Does nothing when
    /// the selection is hidden by the filter.
    pub fn toggle_mark(&mut self) {
        if !self.display_indices().contains(&self.selected) {
            return;
        }
        if let Some(record) = self.records.get(self.selected) {
            let title = record.title().to_string();
            if !self.marked.remove(&title) {
                self.marked.insert(title);
            }
        }
    }

    pub fn is_marked(&self, record: &Record) -> bool {
        self.marked.contains(record.title())
    }

    /// Create an empty catalog file and select it.
    pub fn create_catalog(&mut self, name: &str) -> bool {
        let name = normalize_spaces(name);
        if name.is_empty() {
            self.notify_err("Catalog name cannot be empty.");
            return false;
        }
        if name.contains('|') {
            self.notify_err("Catalog name cannot contain '|'.");
            return false;
        }

        let created = Catalog::new(&name, &self.base_dir).and_then(|catalog| {
            let args = format!("{:?}", catalog.name());
            self.journal
                .track("create_catalog", &args, || catalog.create_empty())
        });

        match created {
            Ok(true) => {
                self.refresh_catalogs();
                if let Some(idx) = self.catalogs.iter().position(|c| *c == name) {
                    self.select_catalog(idx);
                }
                self.notify_ok(format!("Catalog '{name}' created."));
                true
            }
            Ok(false) => {
                self.notify_err("A catalog with that name already exists.");
                false
            }
            Err(e) => {
                self.notify_err(e.to_string());
                false
            }
        }
    }

    /// Add a movie to the selected catalog. The genre is derived from the
    /// catalog name; an unparseable year is dropped.
    pub fn add_movie(&mut self, title: &str, year_text: &str) -> bool {
        let catalog = match self.current_catalog() {
            Ok(Some(c)) => c,
            Ok(None) => {
                self.notify_err("Pick a catalog first.");
                return false;
            }
            Err(e) => {
                self.notify_err(e.to_string());
                return false;
            }
        };

        let year_text = year_text.trim();
        let (year, year_dropped) = if year_text.is_empty() {
            (0, false)
        } else {
            match year_text.parse::<i32>() {
                Ok(y) => (y, false),
                Err(_) => (0, true),
            }
        };

        let genre = genre_for_catalog(catalog.name());
        let record = match Record::new(title, &genre, year) {
            Ok(r) => r,
            Err(e) => {
                self.notify_err(e.to_string());
                return false;
            }
        };

        let args = format!("{:?} {:?}", catalog.name(), record.to_line());
        match self.journal.track("add", &args, || catalog.add(&record)) {
            Ok(true) => {
                self.reload_records();
                if let Some(idx) = self.records.iter().position(|r| r == &record) {
                    self.selected = idx;
                }
                if year_dropped {
                    self.notify_ok(format!("'{}' added without year (invalid year).", record.title()));
                } else {
                    self.notify_ok(format!("'{}' added.", record.title()));
                }
                true
            }
            Ok(false) => {
                self.notify_err("That movie is already in the catalog.");
                false
            }
            Err(e) => {
                self.notify_err(e.to_string());
                false
            }
        }
    }

    /// Remove the marked titles by rewriting the selected catalog.
    /// Returns how many records were removed.
    pub fn delete_marked(&mut self) -> usize {
        if self.marked.is_empty() {
            self.notify_err("No movies marked.");
            return 0;
        }
        let catalog = match self.current_catalog() {
            Ok(Some(c)) => c,
            Ok(None) => {
                self.notify_err("Pick a catalog first.");
                return 0;
            }
            Err(e) => {
                self.notify_err(e.to_string());
                return 0;
            }
        };

        let marked = self.marked.clone();
        let args = format!("{:?} {:?}", catalog.name(), marked);
        let removed = self.journal.track("delete_marked", &args, || {
            let current = catalog.list()?;
            let before = current.len();
            let keep: Vec<Record> = current
                .into_iter()
                .filter(|r| !marked.contains(r.title()))
                .collect();
            catalog.replace_all(&keep)?;
            Ok::<usize, CatalogError>(before - keep.len())
        });

        match removed {
            Ok(n) => {
                self.reload_records();
                self.notify_ok(format!("Removed {n} movie(s)."));
                n
            }
            Err(e) => {
                self.notify_err(e.to_string());
                0
            }
        }
    }

    /// Delete the selected catalog's file.
    pub fn delete_current_catalog(&mut self) -> bool {
        let catalog = match self.current_catalog() {
            Ok(Some(c)) => c,
            Ok(None) => {
                self.notify_err("Pick a catalog first.");
                return false;
            }
            Err(e) => {
                self.notify_err(e.to_string());
                return false;
            }
        };

        let args = format!("{:?}", catalog.name());
        match self
            .journal
            .track("delete_all", &args, || catalog.delete_all())
        {
            Ok(existed) => {
                self.refresh_catalogs();
                if existed {
                    self.notify_ok(format!("Catalog '{}' deleted.", catalog.name()));
                } else {
                    self.notify_ok(format!("Catalog '{}' did not exist.", catalog.name()));
                }
                existed
            }
            Err(e) => {
                self.notify_err(e.to_string());
                false
            }
        }
    }

    /// Start typing a new catalog name.
    pub fn begin_new_catalog(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::NewCatalog;
    }

    /// Start the two-step title/year prompt.
    pub fn begin_add_movie(&mut self) {
        if self.current_catalog_name().is_none() {
            self.notify_err("Pick a catalog first.");
            return;
        }
        self.input.clear();
        self.pending_title = None;
        self.input_mode = InputMode::AddTitle;
    }

    /// Ask for confirmation (or delete right away when confirmation is off).
    pub fn request_delete_catalog(&mut self) {
        if self.current_catalog_name().is_none() {
            self.notify_err("Pick a catalog first.");
            return;
        }
        if self.confirm_delete {
            self.input_mode = InputMode::ConfirmDelete;
        } else {
            self.delete_current_catalog();
        }
    }

    /// Answer the delete confirmation prompt.
    pub fn confirm(&mut self, yes: bool) {
        if self.input_mode != InputMode::ConfirmDelete {
            return;
        }
        self.input_mode = InputMode::Normal;
        if yes {
            self.delete_current_catalog();
        } else {
            self.notify_ok("Cancelled.");
        }
    }

    pub fn enter_filter_mode(&mut self) {
        self.input_mode = InputMode::Filter;
        self.focus = Focus::Movies;
        self.ensure_selected_visible();
    }

    /// Clear the active filter and leave filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.input_mode = InputMode::Normal;
        self.ensure_selected_visible();
    }

    pub fn push_input_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::Filter => {
                self.filter_query.push(c);
                self.ensure_selected_visible();
            }
            InputMode::NewCatalog | InputMode::AddTitle | InputMode::AddYear => self.input.push(c),
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    pub fn pop_input_char(&mut self) {
        match self.input_mode {
            InputMode::Filter => {
                self.filter_query.pop();
                self.ensure_selected_visible();
            }
            InputMode::NewCatalog | InputMode::AddTitle | InputMode::AddYear => {
                self.input.pop();
            }
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    /// Abandon the current prompt.
    pub fn cancel_input(&mut self) {
        match self.input_mode {
            InputMode::Filter => self.clear_filter(),
            _ => {
                self.input.clear();
                self.pending_title = None;
                self.input_mode = InputMode::Normal;
            }
        }
    }

    /// Submit the current prompt.
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        match self.input_mode {
            InputMode::Filter => self.input_mode = InputMode::Normal,
            InputMode::NewCatalog => {
                self.input_mode = InputMode::Normal;
                self.create_catalog(&text);
            }
            InputMode::AddTitle => {
                let title = normalize_spaces(&text);
                if title.is_empty() {
                    self.input_mode = InputMode::Normal;
                    self.notify_err(CatalogError::EmptyTitle.to_string());
                } else {
                    self.pending_title = Some(title);
                    self.input_mode = InputMode::AddYear;
                }
            }
            InputMode::AddYear => {
                self.input_mode = InputMode::Normal;
                if let Some(title) = self.pending_title.take() {
                    self.add_movie(&title, &text);
                }
            }
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    /// Title waiting for its year during the add prompt.
    pub fn pending_title(&self) -> Option<&str> {
        self.pending_title.as_deref()
    }
}
