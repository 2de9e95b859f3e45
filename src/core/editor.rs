use crate::core::catalog::SectionCatalog;
use crate::core::notice::{SaveNotice, DEFAULT_NOTICE_DURATION};
use crate::core::preview::format_article_text;
use crate::domain::model::{Direction, Draft, Section, Template};
use crate::domain::ports::DraftStore;
use crate::utils::error::Result;
use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// What `load_draft` found in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Slot empty; the in-memory draft was left as it was.
    Empty,
    Restored,
    /// Parsed, but the fixed sections had to be put back in place.
    Repaired,
    /// Slot unreadable or unparsable; reset to the default draft.
    Recovered,
}

/// Owns one draft and the operations the form performs on it.
pub struct SectionEditor<S: DraftStore> {
    store: S,
    draft: Draft,
    template: Template,
    catalog: SectionCatalog,
    preview_open: bool,
    notice: Option<SaveNotice>,
    notice_duration: Duration,
    last_id_stamp: i64,
}

impl<S: DraftStore> SectionEditor<S> {
    pub fn new(store: S, template: Template) -> Self {
        Self {
            store,
            draft: Draft::default(),
            template,
            catalog: SectionCatalog::for_template(template),
            preview_open: false,
            notice: None,
            notice_duration: DEFAULT_NOTICE_DURATION,
            last_id_stamp: 0,
        }
    }

    /// Creates the editor and restores the stored draft, as the form does on mount.
    pub fn mount(store: S, template: Template) -> Self {
        let mut editor = Self::new(store, template);
        editor.load_draft();
        editor
    }

    pub fn with_catalog(mut self, catalog: SectionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn sections(&self) -> &[Section] {
        &self.draft.sections
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_subject_name(&mut self, name: impl Into<String>) {
        self.draft.subject_name = name.into();
    }

    /// Inserts a new empty section just before the references section and returns its id.
    ///
    /// Callers offer only names from `available_sections`; uniqueness is not rechecked here.
    pub fn add_section(&mut self, name: &str) -> String {
        let id = self.next_section_id(name);
        let at = self.draft.sections.len().saturating_sub(1);
        self.draft
            .sections
            .insert(at, Section::optional(id.clone(), name));

        tracing::debug!("Added section '{}' ({}) at index {}", name, id, at);
        id
    }

    /// Removes the removable section with `id`. Unknown ids and fixed sections are ignored.
    pub fn remove_section(&mut self, id: &str) -> bool {
        match self.draft.sections.iter().position(|s| s.id == id) {
            Some(index) if self.draft.sections[index].removable => {
                let removed = self.draft.sections.remove(index);
                tracing::debug!("Removed section '{}' ({})", removed.name, id);
                true
            }
            Some(_) => {
                tracing::debug!("Ignoring removal of fixed section {}", id);
                false
            }
            None => false,
        }
    }

    /// Swaps the section at `index` with its neighbour in `direction`.
    ///
    /// Neither the section nor its target may sit on a fixed boundary;
    /// otherwise nothing changes.
    pub fn move_section(&mut self, index: usize, direction: Direction) -> bool {
        let len = self.draft.sections.len();
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };

        let Some(target) = target else {
            return false;
        };
        if index == 0 || index >= len.saturating_sub(1) {
            return false;
        }
        if target == 0 || target >= len - 1 {
            return false;
        }

        self.draft.sections.swap(index, target);
        tracing::debug!("Moved section {} -> {}", index, target);
        true
    }

    /// Replaces the content verbatim. Unknown ids are ignored.
    pub fn update_section_content(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.draft.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.content = text.into();
                true
            }
            None => false,
        }
    }

    pub fn available_sections(&self) -> Vec<String> {
        self.catalog.available_for(&self.draft)
    }

    /// Writes the draft to the slot, overwriting whatever was there.
    ///
    /// Storage failures are returned as-is.
    pub fn save_draft(&mut self) -> Result<SaveNotice> {
        let saved_at = Utc::now();
        let snapshot = Draft {
            subject_name: self.draft.subject_name.clone(),
            sections: self.draft.sections.clone(),
            saved_at: Some(saved_at),
        };

        let payload = snapshot.to_json()?;
        self.store.write(&payload)?;
        self.draft.saved_at = Some(saved_at);

        tracing::info!(
            "Draft saved ({} sections, {} bytes)",
            snapshot.sections.len(),
            payload.len()
        );

        let notice = SaveNotice::saved(Instant::now(), self.notice_duration);
        self.notice = Some(notice.clone());
        Ok(notice)
    }

    /// Restores the slot into memory. Never fails: bad data falls back to the default draft.
    pub fn load_draft(&mut self) -> LoadOutcome {
        let payload = match self.store.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("No saved draft found");
                return LoadOutcome::Empty;
            }
            Err(e) => {
                tracing::error!("Error loading draft: {}", e);
                self.draft = Draft::default();
                return LoadOutcome::Recovered;
            }
        };

        match Draft::from_json(&payload) {
            Ok(mut draft) => {
                let repaired = draft.repair_boundaries();
                if repaired {
                    tracing::warn!("Stored draft had misplaced fixed sections; repaired");
                }
                tracing::debug!("Loaded draft with {} sections", draft.sections.len());
                self.draft = draft;
                if repaired {
                    LoadOutcome::Repaired
                } else {
                    LoadOutcome::Restored
                }
            }
            Err(e) => {
                tracing::error!("Error loading draft: {}", e);
                self.draft = Draft::default();
                LoadOutcome::Recovered
            }
        }
    }

    /// Discards the in-memory draft. The slot is untouched until the next save.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
    }

    pub fn format_article_text(&self) -> String {
        format_article_text(&self.draft, self.template.preview_prompt())
    }

    pub fn open_preview(&mut self) {
        self.preview_open = true;
    }

    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    pub fn save_and_close_preview(&mut self) -> Result<SaveNotice> {
        let notice = self.save_draft()?;
        self.preview_open = false;
        Ok(notice)
    }

    pub fn notice(&self) -> Option<&SaveNotice> {
        self.notice.as_ref()
    }

    /// Drops the save confirmation once it has been shown long enough.
    pub fn clear_expired_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.notice = None;
        }
    }

    fn next_section_id(&mut self, name: &str) -> String {
        let stamp = Utc::now().timestamp_millis().max(self.last_id_stamp + 1);
        self.last_id_stamp = stamp;
        let slug = WHITESPACE.replace_all(&name.to_lowercase(), "-").into_owned();
        format!("{}-{}", slug, stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::domain::model::{LEAD_SECTION_ID, REFERENCES_SECTION_ID};

    fn editor() -> SectionEditor<MemoryStorage> {
        SectionEditor::new(MemoryStorage::new(), Template::Account)
    }

    fn names(editor: &SectionEditor<MemoryStorage>) -> Vec<&str> {
        editor.sections().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_add_inserts_before_references() {
        let mut editor = editor();
        editor.add_section("Background");
        let id = editor.add_section("Historical Context");

        assert_eq!(
            names(&editor),
            vec!["Introduction", "Background", "Historical Context", "References"]
        );
        let len = editor.sections().len();
        assert_eq!(editor.sections()[len - 2].id, id);
        assert!(editor.sections()[len - 2].removable);
        assert!(editor.sections()[len - 2].content.is_empty());
    }

    #[test]
    fn test_section_id_is_slugged_and_unique() {
        let mut editor = editor();
        let first = editor.add_section("Research & Development");
        let second = editor.add_section("Research & Development");

        assert!(first.starts_with("research-&-development-"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_then_readd_gets_new_id() {
        let mut editor = editor();
        editor.add_section("Impact");
        let old_id = editor.add_section("Aftermath");
        assert!(editor.remove_section(&old_id));

        let new_id = editor.add_section("Aftermath");
        let len = editor.sections().len();
        assert_ne!(old_id, new_id);
        assert_eq!(editor.sections()[len - 2].name, "Aftermath");
    }

    #[test]
    fn test_remove_unknown_or_fixed_is_noop() {
        let mut editor = editor();
        editor.add_section("Idea");
        let before = editor.draft().clone();

        assert!(!editor.remove_section("missing"));
        assert!(!editor.remove_section(LEAD_SECTION_ID));
        assert!(!editor.remove_section(REFERENCES_SECTION_ID));
        assert_eq!(editor.draft(), &before);
    }

    #[test]
    fn test_move_swaps_within_boundaries() {
        let mut editor = editor();
        editor.add_section("Background");
        editor.add_section("Causes");
        editor.add_section("Impact");

        assert!(editor.move_section(3, Direction::Up));
        assert_eq!(
            names(&editor),
            vec!["Introduction", "Background", "Impact", "Causes", "References"]
        );

        assert!(editor.move_section(1, Direction::Down));
        assert_eq!(
            names(&editor),
            vec!["Introduction", "Impact", "Background", "Causes", "References"]
        );
    }

    #[test]
    fn test_move_rejected_at_boundaries() {
        let mut editor = editor();
        editor.add_section("Background");
        editor.add_section("Causes");
        let before = editor.draft().clone();

        assert!(!editor.move_section(1, Direction::Up));
        assert!(!editor.move_section(2, Direction::Down));
        assert!(!editor.move_section(0, Direction::Up));
        assert!(!editor.move_section(0, Direction::Down));
        assert!(!editor.move_section(3, Direction::Up));
        assert!(!editor.move_section(99, Direction::Down));
        assert_eq!(editor.draft(), &before);
    }

    #[test]
    fn test_move_with_single_optional_section_is_noop() {
        let mut editor = editor();
        editor.add_section("Idea");
        let before = editor.draft().clone();

        assert!(!editor.move_section(1, Direction::Up));
        assert!(!editor.move_section(1, Direction::Down));
        assert_eq!(editor.draft(), &before);
    }

    #[test]
    fn test_boundaries_hold_after_mixed_operations() {
        let mut editor = editor();
        let a = editor.add_section("Background");
        editor.add_section("Causes");
        editor.add_section("Impact");
        for index in 0..6 {
            editor.move_section(index, Direction::Up);
            editor.move_section(index, Direction::Down);
        }
        editor.remove_section(&a);
        editor.remove_section(LEAD_SECTION_ID);
        editor.add_section("Aftermath");

        assert!(editor.draft().has_valid_boundaries());
    }

    #[test]
    fn test_update_content_verbatim() {
        let mut editor = editor();
        assert!(editor.update_section_content(LEAD_SECTION_ID, "  spaced \n"));
        assert_eq!(editor.sections()[0].content, "  spaced \n");
        assert!(!editor.update_section_content("missing", "x"));
    }

    #[test]
    fn test_save_writes_single_slot_and_sets_notice() {
        let mut editor = editor();
        editor.set_subject_name("Acme Corp");
        let notice = editor.save_draft().unwrap();

        assert_eq!(notice.message, "Draft saved successfully!");
        assert!(editor.notice().is_some());
        assert!(editor.draft().saved_at.is_some());

        let payload = editor.store().payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["subjectName"], "Acme Corp");
        assert_eq!(value["sections"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_save_propagates_storage_failure() {
        let mut editor = SectionEditor::new(MemoryStorage::read_only(None), Template::Account);

        assert!(editor.save_draft().is_err());
        assert!(editor.notice().is_none());
        assert!(editor.draft().saved_at.is_none());
    }

    #[test]
    fn test_notice_cleared_after_interval() {
        let mut editor = editor().with_notice_duration(Duration::from_secs(3));
        let notice = editor.save_draft().unwrap();

        editor.clear_expired_notice(notice.expires_at - Duration::from_millis(1));
        assert!(editor.notice().is_some());

        editor.clear_expired_notice(notice.expires_at);
        assert!(editor.notice().is_none());
    }

    #[test]
    fn test_load_empty_slot_keeps_state() {
        let mut editor = editor();
        editor.set_subject_name("Unsaved");

        assert_eq!(editor.load_draft(), LoadOutcome::Empty);
        assert_eq!(editor.draft().subject_name, "Unsaved");
    }

    #[test]
    fn test_load_corrupt_slot_recovers_default() {
        let mut editor = SectionEditor::new(MemoryStorage::with_payload("{not json"), Template::Account);
        editor.set_subject_name("Will be discarded");
        editor.add_section("Idea");

        assert_eq!(editor.load_draft(), LoadOutcome::Recovered);
        assert_eq!(editor.draft(), &Draft::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut editor = editor();
        editor.set_subject_name("Printing press");
        let id = editor.add_section("Impact");
        editor.update_section_content(&id, "Spread of literacy.");
        editor.add_section("Idea");
        editor.move_section(2, Direction::Up);

        let before = editor.draft().clone();
        editor.save_draft().unwrap();
        assert_eq!(editor.load_draft(), LoadOutcome::Restored);

        let after = editor.draft();
        assert_eq!(after.subject_name, before.subject_name);
        assert_eq!(after.sections, before.sections);
    }

    #[test]
    fn test_preview_flag_does_not_gate_operations() {
        let mut editor = editor();
        editor.open_preview();
        editor.set_subject_name("Acme Corp");
        editor.add_section("Background");
        assert!(editor.is_preview_open());

        editor.save_and_close_preview().unwrap();
        assert!(!editor.is_preview_open());
    }

    #[test]
    fn test_available_sections_shrink_as_added() {
        let mut editor = editor();
        let total = editor.available_sections().len();
        editor.add_section("Formulae");

        let available = editor.available_sections();
        assert_eq!(available.len(), total - 1);
        assert!(!available.contains(&"Formulae".to_string()));
    }

    #[test]
    fn test_reset_restores_default() {
        let mut editor = editor();
        editor.set_subject_name("Acme");
        editor.add_section("Idea");
        editor.reset();
        assert_eq!(editor.draft(), &Draft::default());
    }
}
