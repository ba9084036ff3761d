use std::time::{Duration, Instant};

use thiserror::Error;

use crate::camera::{CameraConfig, CameraConfigPatch, CameraMode};
use crate::history::{DocumentSnapshot, HistoryState};
use crate::saved_state::{clear_document, load_document, persist_document, Storage};
use crate::slide::{
    default_sections, default_slides, new_section_id, new_slide_id, Section, SlideData, SlidePatch,
    SlideType, COPY_SUFFIX, NEW_SLIDE_SUBTITLE, NEW_SLIDE_TITLE,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppMode {
    Dashboard,
    Presentation,
    Builder,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BuilderPreviewMode {
    Flat,
    Spatial,
}

/// User-rule violations. The caller surfaces these as a blocking alert;
/// the document is unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum StoreError {
    #[error("cannot delete the last slide")]
    LastSlide,
    #[error("must have at least one section")]
    LastSection,
}

/// Wall-clock length of the cinematic hand-off into presentation mode.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(1200);
/// Quiet period before a queued text edit is committed to the document.
pub const EDIT_DEBOUNCE: Duration = Duration::from_millis(100);

struct PendingTransition {
    generation: u64,
    deadline: Instant,
}

struct PendingEdit {
    slide_id: String,
    patch: SlidePatch,
    deadline: Instant,
}

/// The single shared application-state object. All document mutation goes
/// through its enumerated entry points; UI leaves hold a reference to it
/// rather than reaching for ambient globals.
pub struct AppStore {
    // document
    pub slides: Vec<SlideData>,
    pub sections: Vec<Section>,
    pub camera_config: CameraConfig,

    // ui state
    pub mode: AppMode,
    pub theme: Theme,
    pub current_slide_index: usize,
    pub menu_open: bool,
    pub camera_mode: CameraMode,
    pub builder_preview_mode: BuilderPreviewMode,
    pub is_transitioning: bool,

    // history
    history: HistoryState,

    // one-shots
    transition_generation: u64,
    pending_transition: Option<PendingTransition>,
    pending_edit: Option<PendingEdit>,

    // persistence
    storage: Option<Box<dyn Storage>>,
}

impl AppStore {
    /// Fresh store over the built-in default deck, no persistence.
    pub fn new() -> Self {
        Self {
            slides: default_slides(),
            sections: default_sections(),
            camera_config: CameraConfig::default(),
            mode: AppMode::Dashboard,
            theme: Theme::Dark,
            current_slide_index: 0,
            menu_open: false,
            camera_mode: CameraMode::Overview,
            builder_preview_mode: BuilderPreviewMode::Flat,
            is_transitioning: false,
            history: HistoryState::new(),
            transition_generation: 0,
            pending_transition: None,
            pending_edit: None,
            storage: None,
        }
    }

    /// Restore the document from storage (defaults on any failure) and
    /// persist every subsequent document mutation back to it.
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        let loaded = load_document(storage.as_ref());
        let mut store = Self::new();
        store.slides = loaded.slides;
        store.sections = loaded.sections;
        store.camera_config = loaded.camera_config;
        store.storage = Some(storage);
        store
    }

    fn document_snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            slides: self.slides.clone(),
            sections: self.sections.clone(),
            camera_config: self.camera_config,
        }
    }

    fn persist(&mut self) {
        if let Some(storage) = self.storage.as_mut() {
            persist_document(
                storage.as_mut(),
                &self.slides,
                &self.sections,
                &self.camera_config,
            );
        }
    }

    // --- history ---

    /// Capture the current document before a mutation.
    pub fn save_snapshot(&mut self) {
        let snapshot = self.document_snapshot();
        self.history.save_snapshot(snapshot);
    }

    pub fn undo(&mut self) {
        let current = self.document_snapshot();
        if let Some(previous) = self.history.undo(current) {
            self.slides = previous.slides;
            self.sections = previous.sections;
            self.camera_config = previous.camera_config;
            if self.current_slide_index >= self.slides.len() && !self.slides.is_empty() {
                self.current_slide_index = self.slides.len() - 1;
            }
            self.persist();
        }
    }

    pub fn redo(&mut self) {
        let current = self.document_snapshot();
        if let Some(next) = self.history.redo(current) {
            self.slides = next.slides;
            self.sections = next.sections;
            self.camera_config = next.camera_config;
            if self.current_slide_index >= self.slides.len() && !self.slides.is_empty() {
                self.current_slide_index = self.slides.len() - 1;
            }
            self.persist();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- navigation ---

    pub fn go_to_slide(&mut self, index: isize) {
        if self.slides.is_empty() {
            return;
        }
        let len = self.slides.len() as isize;
        self.current_slide_index = index.rem_euclid(len) as usize;
    }

    pub fn next_slide(&mut self) {
        self.go_to_slide(self.current_slide_index as isize + 1);
    }

    pub fn prev_slide(&mut self) {
        self.go_to_slide(self.current_slide_index as isize - 1);
    }

    pub fn set_current_slide_index(&mut self, index: usize) {
        self.go_to_slide(index as isize);
    }

    // --- slide mutations ---

    /// Append a fresh hero slide. With no section given it lands in the
    /// first section; with no sections at all it gets the literal
    /// `"default"` id, a state the caller is expected to avoid.
    pub fn add_slide(&mut self, section_id: Option<&str>) {
        self.save_snapshot();
        let section_id = section_id
            .map(str::to_string)
            .or_else(|| self.sections.first().map(|s| s.id.clone()))
            .unwrap_or_else(|| "default".to_string());

        self.slides.push(SlideData {
            id: new_slide_id(),
            section_id,
            slide_type: SlideType::Hero,
            title: NEW_SLIDE_TITLE.to_string(),
            subtitle: Some(NEW_SLIDE_SUBTITLE.to_string()),
            content: None,
            bullets: None,
            image_url: None,
            enable_image: false,
            style: None,
            metadata: None,
        });
        self.current_slide_index = self.slides.len() - 1;
        self.persist();
    }

    /// Clone a slide in place: the copy lands right after the source and
    /// becomes active. Unknown ids are a no-op.
    pub fn duplicate_slide(&mut self, id: &str) {
        let Some(index) = self.slides.iter().position(|s| s.id == id) else {
            return;
        };
        self.save_snapshot();

        let mut copy = self.slides[index].clone();
        copy.id = new_slide_id();
        copy.title = format!("{}{}", copy.title, COPY_SUFFIX);

        self.slides.insert(index + 1, copy);
        self.current_slide_index = index + 1;
        self.persist();
    }

    pub fn update_slide(&mut self, id: &str, patch: &SlidePatch, with_history: bool) {
        if with_history {
            self.save_snapshot();
        }
        if let Some(slide) = self.slides.iter_mut().find(|s| s.id == id) {
            patch.apply(slide);
        }
        self.persist();
    }

    /// Remove a slide, keeping the active index pointed at the same
    /// logical slide where possible. The last remaining slide cannot be
    /// deleted.
    pub fn delete_slide(&mut self, id: &str) -> Result<(), StoreError> {
        if self.slides.len() <= 1 {
            return Err(StoreError::LastSlide);
        }
        let Some(index) = self.slides.iter().position(|s| s.id == id) else {
            return Ok(());
        };
        self.save_snapshot();
        self.slides.remove(index);

        let len = self.slides.len() as isize;
        if index == self.current_slide_index {
            self.current_slide_index = (index as isize - 1).rem_euclid(len) as usize;
        } else if index < self.current_slide_index {
            self.current_slide_index -= 1;
        }
        self.persist();
        Ok(())
    }

    /// Reorder: remove from one position, reinsert at another, and follow
    /// the slide to its destination.
    pub fn move_slide(&mut self, from_index: usize, to_index: usize) {
        if from_index >= self.slides.len() || to_index >= self.slides.len() {
            return;
        }
        self.save_snapshot();
        let slide = self.slides.remove(from_index);
        self.slides.insert(to_index, slide);
        self.current_slide_index = to_index;
        self.persist();
    }

    // --- section mutations ---

    pub fn add_section(&mut self, title: &str) {
        self.save_snapshot();
        self.sections.push(Section {
            id: new_section_id(),
            title: title.to_string(),
        });
        self.persist();
    }

    /// Remove a section, reassigning its slides to the first remaining
    /// section so no slide is left orphaned. The last section cannot be
    /// deleted.
    pub fn delete_section(&mut self, id: &str) -> Result<(), StoreError> {
        if self.sections.len() <= 1 {
            return Err(StoreError::LastSection);
        }
        if !self.sections.iter().any(|s| s.id == id) {
            return Ok(());
        }
        self.save_snapshot();

        let fallback_id = self
            .sections
            .iter()
            .find(|s| s.id != id)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "default".to_string());

        for slide in self.slides.iter_mut() {
            if slide.section_id == id {
                slide.section_id = fallback_id.clone();
            }
        }
        self.sections.retain(|s| s.id != id);
        self.persist();
        Ok(())
    }

    // --- camera ---

    pub fn set_camera_config(&mut self, patch: &CameraConfigPatch, with_history: bool) {
        if with_history {
            self.save_snapshot();
        }
        patch.apply(&mut self.camera_config);
        self.persist();
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera_mode = mode;
    }

    // --- ui state ---

    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_builder_preview_mode(&mut self, mode: BuilderPreviewMode) {
        self.builder_preview_mode = mode;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    // --- reset ---

    /// Back to the built-in defaults, as fresh copies. Snapshots first so a
    /// reset is itself undoable, then clears persisted storage.
    pub fn reset(&mut self) {
        self.save_snapshot();
        self.slides = default_slides();
        self.sections = default_sections();
        self.camera_config = CameraConfig::default();
        self.current_slide_index = 0;
        self.camera_mode = CameraMode::Overview;
        self.mode = AppMode::Dashboard;

        if let Some(storage) = self.storage.as_mut() {
            clear_document(storage.as_mut());
        }
    }

    // --- cinematic transition one-shot ---

    /// Arm the timed hand-off into presentation mode. Gestures are
    /// suppressed until `tick` observes the deadline. Each call bumps the
    /// generation, so an earlier, still-pending deadline can never clear a
    /// newer transition.
    pub fn start_presentation_transition(&mut self, now: Instant) {
        self.transition_generation += 1;
        self.pending_transition = Some(PendingTransition {
            generation: self.transition_generation,
            deadline: now + TRANSITION_DURATION,
        });
        self.is_transitioning = true;
    }

    /// Drive pending one-shots from the per-frame callback.
    pub fn tick(&mut self, now: Instant) {
        if let Some((generation, deadline)) = self
            .pending_transition
            .as_ref()
            .map(|p| (p.generation, p.deadline))
        {
            if generation != self.transition_generation {
                // stale timer from an overwritten transition
                self.pending_transition = None;
            } else if now >= deadline {
                self.pending_transition = None;
                self.mode = AppMode::Presentation;
                self.is_transitioning = false;
            }
        }

        let edit_due = self
            .pending_edit
            .as_ref()
            .map_or(false, |p| now >= p.deadline);
        if edit_due {
            if let Some(pending) = self.pending_edit.take() {
                self.update_slide(&pending.slide_id, &pending.patch, false);
            }
        }
    }

    // --- debounced text edits ---

    /// Snapshot once when a text field gains focus; keystrokes after this
    /// go through `queue_slide_edit` without further snapshots.
    pub fn begin_text_edit(&mut self) {
        self.save_snapshot();
    }

    /// Queue a field edit behind the quiet period. Edits to the same slide
    /// merge; an edit to a different slide flushes the previous one first.
    pub fn queue_slide_edit(&mut self, id: &str, patch: SlidePatch, now: Instant) {
        match self.pending_edit.as_mut() {
            Some(pending) if pending.slide_id == id => {
                pending.patch.merge(&patch);
                pending.deadline = now + EDIT_DEBOUNCE;
            }
            Some(_) => {
                self.flush_pending_edit();
                self.pending_edit = Some(PendingEdit {
                    slide_id: id.to_string(),
                    patch,
                    deadline: now + EDIT_DEBOUNCE,
                });
            }
            None => {
                self.pending_edit = Some(PendingEdit {
                    slide_id: id.to_string(),
                    patch,
                    deadline: now + EDIT_DEBOUNCE,
                });
            }
        }
    }

    /// Commit any queued edit immediately (blur, view switch).
    pub fn flush_pending_edit(&mut self) {
        if let Some(pending) = self.pending_edit.take() {
            self.update_slide(&pending.slide_id, &pending.patch, false);
        }
    }

    /// Hand the storage back, e.g. to rebuild the store over the same
    /// backing in tests or across profile switches.
    pub fn into_storage(self) -> Option<Box<dyn Storage>> {
        self.storage
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}
