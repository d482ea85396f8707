pub mod annotation;
pub mod audio;
pub mod config;
pub mod error;
pub mod session;
pub mod textgrid_io;
pub mod types;

pub use annotation::boundary::BoundaryEdit;
pub use annotation::invariants::Violation;
pub use audio::envelope::PlaybackPlan;
pub use audio::SampleBuffer;
pub use config::EditorConfig;
pub use error::AnnotationError;
pub use session::builder::SessionBuilder;
pub use session::editor::{EditorSession, SegmentTarget};
pub use session::traits::{SessionObserver, TracingObserver};
pub use types::{IntervalRef, Phone, RawTranscript, TimeRange, Word};
