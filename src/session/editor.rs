use serde::Serialize;

use crate::annotation::boundary::{set_phone_start, BoundaryEdit};
use crate::annotation::export::export_transcript;
use crate::annotation::interval_set::build;
use crate::annotation::layout::{phone_layout, word_layout, SegmentLayout};
use crate::annotation::neighborhood::{current_range, window};
use crate::audio::envelope::{plan, PlaybackPlan};
use crate::config::EditorConfig;
use crate::error::AnnotationError;
use crate::session::traits::SessionObserver;
use crate::types::{RawTranscript, TimeRange, Word};

/// What a click on the annotation view refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentTarget {
    Word { word: usize },
    Phone { word: usize, phone: usize },
    /// The whole visible neighborhood around the focus word.
    CurrentRange,
}

struct LoadedTranscript {
    raw: RawTranscript,
    words: Vec<Word>,
}

/// One editing session: the loaded annotation, the focus word and the observers
/// told about changes.
pub struct EditorSession {
    config: EditorConfig,
    loaded: Option<LoadedTranscript>,
    focus: Option<usize>,
    observers: Vec<Box<dyn SessionObserver>>,
}

pub(crate) struct EditorSessionParts {
    pub config: EditorConfig,
    pub observers: Vec<Box<dyn SessionObserver>>,
}

impl EditorSession {
    pub(crate) fn from_parts(parts: EditorSessionParts) -> Self {
        Self {
            config: parts.config,
            loaded: None,
            focus: None,
            observers: parts.observers,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Current words; empty before the first successful load.
    pub fn words(&self) -> &[Word] {
        self.loaded
            .as_ref()
            .map_or(&[], |loaded| loaded.words.as_slice())
    }

    pub fn raw(&self) -> Option<&RawTranscript> {
        self.loaded.as_ref().map(|loaded| &loaded.raw)
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Replaces the annotation. A transcript that fails to build leaves the
    /// previous one active.
    ///
    /// Focus starts on the second word, which skips the leading silence
    /// interval aligners emit.
    pub fn load(&mut self, raw: RawTranscript) -> Result<(), AnnotationError> {
        let words = build(&raw, &self.config)?;
        let focus = match words.len() {
            0 => None,
            1 => Some(0),
            _ => Some(1),
        };
        self.loaded = Some(LoadedTranscript { raw, words });
        self.focus = focus;

        let words = self.words();
        tracing::debug!(word_count = words.len(), focus = ?focus, "session: loaded transcript");
        for observer in &self.observers {
            observer.on_load(words);
        }
        if let Some(word) = focus.and_then(|index| words.get(index)) {
            for observer in &self.observers {
                observer.on_change_word(word);
            }
        }
        Ok(())
    }

    /// Moves focus to `index`. The first and last words cannot take focus, and
    /// re-selecting the focus word does nothing; both return `Ok(false)`.
    pub fn select_word(&mut self, index: usize) -> Result<bool, AnnotationError> {
        let len = self.words().len();
        if index >= len {
            return Err(AnnotationError::FocusOutOfRange { index, len });
        }
        if index == 0 || index == len - 1 || self.focus == Some(index) {
            return Ok(false);
        }
        let previous = self.focus.replace(index);
        tracing::debug!(from = ?previous, to = index, "session: focus moved");

        let word = &self.words()[index];
        for observer in &self.observers {
            observer.on_change_word(word);
        }
        Ok(true)
    }

    /// Words in the neighborhood of the focus word.
    pub fn visible_words(&self) -> &[Word] {
        match self.focus {
            Some(focus) => window(self.words(), focus, self.config.word_margin).unwrap_or_default(),
            None => &[],
        }
    }

    /// Time span of the visible neighborhood.
    pub fn current_range(&self) -> Option<TimeRange> {
        let focus = self.focus?;
        current_range(self.words(), focus, self.config.word_margin).ok()
    }

    /// Placement of the visible words, each with its phones.
    pub fn visible_layout(&self) -> Vec<(SegmentLayout, Vec<SegmentLayout>)> {
        let visible = self.visible_words();
        word_layout(visible)
            .into_iter()
            .zip(visible)
            .map(|(layout, word)| (layout, phone_layout(word)))
            .collect()
    }

    /// Moves a phone start through the boundary editor and reports the result.
    /// Observers only hear about edits that changed something.
    pub fn set_phone_start(
        &mut self,
        word_index: usize,
        phone_index: usize,
        requested_start: f64,
    ) -> Result<BoundaryEdit, AnnotationError> {
        let loaded = self.loaded.as_mut().ok_or(AnnotationError::OutOfRangeEdit {
            word: word_index,
            phone: phone_index,
        })?;
        let edit = set_phone_start(
            &mut loaded.words,
            &self.config,
            word_index,
            phone_index,
            requested_start,
        )?;
        if edit.affected.is_empty() {
            return Ok(edit);
        }

        for observer in &self.observers {
            observer.on_boundary_edit(&edit);
        }
        if let Some(word) = self.focus.and_then(|index| self.words().get(index)) {
            for observer in &self.observers {
                observer.on_change_word(word);
            }
        }
        Ok(edit)
    }

    /// Resolves a clicked segment to the time range it covers.
    pub fn click_segment(&self, target: SegmentTarget) -> Result<TimeRange, AnnotationError> {
        let words = self.words();
        let range = match target {
            SegmentTarget::Word { word } => words
                .get(word)
                .map(Word::range)
                .ok_or(AnnotationError::FocusOutOfRange {
                    index: word,
                    len: words.len(),
                })?,
            SegmentTarget::Phone { word, phone } => words
                .get(word)
                .and_then(|w| w.phones.get(phone))
                .map(|p| p.range())
                .ok_or(AnnotationError::OutOfRangeEdit { word, phone })?,
            SegmentTarget::CurrentRange => {
                let focus = self.focus.ok_or(AnnotationError::FocusOutOfRange {
                    index: 0,
                    len: words.len(),
                })?;
                current_range(words, focus, self.config.word_margin)?
            }
        };

        for observer in &self.observers {
            observer.on_click_segment(target, range);
        }
        Ok(range)
    }

    /// Playback schedule for `range` using the configured fades.
    pub fn playback_plan(&self, range: TimeRange) -> Result<PlaybackPlan, AnnotationError> {
        plan(range, self.config.fade_in, self.config.fade_out)
    }

    /// The edited annotation in its original tier layout.
    pub fn export(&self) -> Option<RawTranscript> {
        self.loaded
            .as_ref()
            .map(|loaded| export_transcript(&loaded.raw, &loaded.words))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::annotation::test_support::{transcript, two_word_transcript};
    use crate::session::builder::SessionBuilder;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    struct RecordingObserver(Arc<Recorder>);

    impl SessionObserver for RecordingObserver {
        fn on_load(&self, words: &[Word]) {
            self.0.push(format!("load:{}", words.len()));
        }

        fn on_change_word(&self, word: &Word) {
            self.0.push(format!("word:{}", word.index));
        }

        fn on_boundary_edit(&self, edit: &BoundaryEdit) {
            self.0.push(format!("edit:{}", edit.affected.len()));
        }

        fn on_click_segment(&self, _target: SegmentTarget, range: TimeRange) {
            self.0.push(format!("click:{}-{}", range.start, range.end));
        }
    }

    impl Recorder {
        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }
    }

    fn five_words() -> RawTranscript {
        let words = [
            ("", 0.0, 1.0),
            ("the", 1.0, 2.0),
            ("quick", 2.0, 3.0),
            ("fox", 3.0, 4.0),
            ("", 4.0, 5.0),
        ];
        transcript(&words, &words)
    }

    fn recording_session() -> (EditorSession, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let session = SessionBuilder::new(EditorConfig::default())
            .with_observer(Box::new(RecordingObserver(recorder.clone())))
            .build()
            .unwrap();
        (session, recorder)
    }

    #[test]
    fn load_focuses_second_word_and_notifies_once() {
        let (mut session, recorder) = recording_session();
        session.load(five_words()).unwrap();

        assert_eq!(session.focus(), Some(1));
        assert_eq!(recorder.take(), vec!["load:5", "word:1"]);
        let visible: Vec<usize> = session.visible_words().iter().map(|w| w.index).collect();
        assert_eq!(visible, vec![0, 1, 2]);
        assert_eq!(session.current_range(), Some(TimeRange::new(0.0, 3.0)));
    }

    #[test]
    fn failed_load_keeps_previous_annotation() {
        let (mut session, recorder) = recording_session();
        session.load(five_words()).unwrap();
        session.select_word(2).unwrap();
        recorder.take();

        let mut broken = two_word_transcript();
        broken.tiers.retain(|tier| tier.name != "phones");
        assert!(matches!(
            session.load(broken),
            Err(AnnotationError::MissingTier { tier: "phones" })
        ));

        assert_eq!(session.words().len(), 5);
        assert_eq!(session.focus(), Some(2));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn select_word_skips_edges_and_repeats() {
        let (mut session, recorder) = recording_session();
        session.load(five_words()).unwrap();
        recorder.take();

        assert!(!session.select_word(0).unwrap());
        assert!(!session.select_word(4).unwrap());
        assert!(!session.select_word(1).unwrap());
        assert!(session.select_word(3).unwrap());
        assert!(matches!(
            session.select_word(9),
            Err(AnnotationError::FocusOutOfRange { index: 9, len: 5 })
        ));

        assert_eq!(session.focus(), Some(3));
        assert_eq!(recorder.take(), vec!["word:3"]);
        assert_eq!(session.current_range(), Some(TimeRange::new(2.0, 5.0)));
    }

    #[test]
    fn edits_notify_only_when_something_moved() {
        let (mut session, recorder) = recording_session();
        session.load(two_word_transcript()).unwrap();
        recorder.take();

        let edit = session.set_phone_start(1, 0, 1.8).unwrap();
        assert_eq!(edit.affected.len(), 4);
        assert_eq!(recorder.take(), vec!["edit:4", "word:1"]);

        session.set_phone_start(1, 0, 1.8).unwrap();
        assert!(recorder.take().is_empty());

        assert!(session.set_phone_start(4, 0, 1.0).is_err());
        assert!(recorder.take().is_empty());
        assert_eq!(session.words()[0].end, 1.8);
    }

    #[test]
    fn edit_before_load_is_out_of_range() {
        let (mut session, _) = recording_session();
        assert!(matches!(
            session.set_phone_start(0, 0, 1.0),
            Err(AnnotationError::OutOfRangeEdit { word: 0, phone: 0 })
        ));
        assert!(session.export().is_none());
        assert!(session.visible_words().is_empty());
        assert!(session.current_range().is_none());
    }

    #[test]
    fn click_segment_resolves_targets() {
        let (mut session, recorder) = recording_session();
        session.load(two_word_transcript()).unwrap();
        recorder.take();

        assert_eq!(
            session.click_segment(SegmentTarget::Phone { word: 0, phone: 1 }).unwrap(),
            TimeRange::new(1.0, 2.0)
        );
        assert_eq!(
            session.click_segment(SegmentTarget::Word { word: 1 }).unwrap(),
            TimeRange::new(2.0, 3.0)
        );
        assert_eq!(
            session.click_segment(SegmentTarget::CurrentRange).unwrap(),
            TimeRange::new(0.0, 3.0)
        );
        assert!(session
            .click_segment(SegmentTarget::Phone { word: 1, phone: 4 })
            .is_err());
        assert_eq!(recorder.take(), vec!["click:1-2", "click:2-3", "click:0-3"]);
    }

    #[test]
    fn playback_plan_uses_configured_fades() {
        let (session, _) = recording_session();
        let plan = session.playback_plan(TimeRange::new(1.0, 2.0)).unwrap();
        assert!((plan.source_offset - 0.975).abs() < 1e-12);
        assert!((plan.play_duration - 1.05).abs() < 1e-12);
    }

    #[test]
    fn visible_layout_pairs_words_with_phones() {
        let (mut session, _) = recording_session();
        session.load(two_word_transcript()).unwrap();
        let layout = session.visible_layout();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].1.len(), 2);
        assert_eq!(layout[1].1.len(), 1);
    }

    #[test]
    fn export_carries_session_edits() {
        let (mut session, _) = recording_session();
        session.load(two_word_transcript()).unwrap();
        session.set_phone_start(0, 1, 0.5).unwrap();
        let exported = session.export().unwrap();
        let phones = exported.tier("phones").unwrap();
        assert_eq!(phones.intervals[0].xmax, 0.5);
        assert_eq!(phones.intervals[1].xmin, 0.5);
    }
}
