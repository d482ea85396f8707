use std::path::Path;

use crate::config::EditorConfig;
use crate::error::AnnotationError;
use crate::session::editor::{EditorSession, EditorSessionParts};
use crate::session::traits::SessionObserver;

pub struct SessionBuilder {
    config: EditorConfig,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionBuilder {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Starts from a JSON config file; missing keys take their defaults.
    pub fn from_config_file(path: &Path) -> Result<Self, AnnotationError> {
        Ok(Self::new(EditorConfig::load(path)?))
    }

    /// Observers are notified in registration order.
    pub fn with_observer(mut self, observer: Box<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn with_word_margin(mut self, word_margin: usize) -> Self {
        self.config.word_margin = word_margin;
        self
    }

    pub fn build(self) -> Result<EditorSession, AnnotationError> {
        self.config.validate()?;
        tracing::debug!(
            second_step = self.config.second_step,
            min_phone_duration = self.config.min_phone_duration,
            word_margin = self.config.word_margin,
            observers = self.observers.len(),
            "session: built"
        );
        Ok(EditorSession::from_parts(EditorSessionParts {
            config: self.config,
            observers: self.observers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::annotation::test_support::two_word_transcript;
    use crate::types::Word;

    struct CountingObserver(Arc<AtomicUsize>);

    impl SessionObserver for CountingObserver {
        fn on_load(&self, _words: &[Word]) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn builder_defaults_to_no_observers() {
        let builder = SessionBuilder::new(EditorConfig::default());
        assert!(builder.observers.is_empty());
        let session = builder.build().expect("default config is valid");
        assert!(!session.is_loaded());
        assert_eq!(session.focus(), None);
    }

    #[test]
    fn build_rejects_invalid_config() {
        let config = EditorConfig {
            min_phone_duration: -1.0,
            ..EditorConfig::default()
        };
        let result = SessionBuilder::new(config).build();
        assert!(matches!(result, Err(AnnotationError::InvalidConfig { .. })));
    }

    #[test]
    fn every_observer_is_notified() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut session = SessionBuilder::new(EditorConfig::default())
            .with_observer(Box::new(CountingObserver(count.clone())))
            .with_observer(Box::new(CountingObserver(count.clone())))
            .build()
            .expect("build should succeed");
        session.load(two_word_transcript()).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn word_margin_override_reaches_session() {
        let session = SessionBuilder::new(EditorConfig::default())
            .with_word_margin(3)
            .build()
            .unwrap();
        assert_eq!(session.config().word_margin, 3);
    }

    #[test]
    fn from_config_file_reads_json() {
        let path = std::env::temp_dir().join("textgrid_editor_builder_config.json");
        std::fs::write(&path, r#"{ "second_step": 0.005 }"#).expect("write config");
        let session = SessionBuilder::from_config_file(&path)
            .expect("config should load")
            .build()
            .unwrap();
        assert_eq!(session.config().second_step, 0.005);
        let _ = std::fs::remove_file(&path);
    }
}
