//! System-wide keyboard and pointer-button capture.
//!
//! Backends deliver [`RawInput`] on a channel, a worker thread per input
//! class normalises it into canonical key ids and forwards the transition to
//! the registered callback.

pub mod backend;
pub mod capture;
pub mod normalize;

pub use backend::{CaptureBackend, InputClass, MockCaptureBackend, MockCaptureHandle, RdevBackend};
pub use capture::{InputCapture, TransitionCallback};
pub use normalize::{KeyNormalizer, KeyTransition, RawInput};
