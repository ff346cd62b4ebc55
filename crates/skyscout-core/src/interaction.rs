//! Interaction feedback: click sounds and haptic pulses for the shell.
//!
//! The stores never call into this module; the presentation layer reports
//! gestures through [`Feedback::notify`]. Click playback is serialized
//! through a single worker thread so rapid taps play one at a time instead
//! of overlapping or being dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

/// A user gesture, as far as feedback is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Tap,
    DragStart,
    Reorder,
    Delete,
}

/// Strength of a haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStyle {
    Light,
    Medium,
    Warning,
}

impl InteractionKind {
    /// Haptic strength for this gesture: taps and reorders stay light,
    /// drag starts are medium, deletes warn.
    pub fn haptic_style(self) -> HapticStyle {
        match self {
            InteractionKind::Tap | InteractionKind::Reorder => HapticStyle::Light,
            InteractionKind::DragStart => HapticStyle::Medium,
            InteractionKind::Delete => HapticStyle::Warning,
        }
    }
}

/// Platform hooks the shell implements. `play_click` runs on the playback
/// worker and should block for the duration of the sound; `haptic` is
/// called inline and must be cheap.
pub trait FeedbackSink: Send + Sync + 'static {
    fn play_click(&self);
    fn haptic(&self, style: HapticStyle);
}

/// Feedback dispatcher shared by the shell's input handlers.
///
/// Clones share the same worker and sound toggle.
#[derive(Clone)]
pub struct Feedback {
    sink: Arc<dyn FeedbackSink>,
    clicks: Sender<()>,
    sound_enabled: Arc<AtomicBool>,
}

impl Feedback {
    pub fn new(sink: Arc<dyn FeedbackSink>, sound_enabled: bool) -> Self {
        let (clicks, rx) = mpsc::channel::<()>();
        let sound_flag = Arc::new(AtomicBool::new(sound_enabled));

        let worker_sink = sink.clone();
        let worker_flag = sound_flag.clone();
        thread::spawn(move || {
            // Exits when the last Feedback clone is dropped.
            while rx.recv().is_ok() {
                if worker_flag.load(Ordering::Relaxed) {
                    worker_sink.play_click();
                }
            }
        });

        Self {
            sink,
            clicks,
            sound_enabled: sound_flag,
        }
    }

    /// Report a gesture: fires the haptic inline and queues a click when
    /// sound is enabled.
    pub fn notify(&self, kind: InteractionKind) {
        self.sink.haptic(kind.haptic_style());

        if self.sound_enabled.load(Ordering::Relaxed) {
            let _ = self.clicks.send(());
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled.load(Ordering::Relaxed)
    }

    /// Toggle click sounds. Takes effect immediately, including for clicks
    /// already queued.
    pub fn set_sound_enabled(&self, enabled: bool) {
        self.sound_enabled.store(enabled, Ordering::Relaxed);
    }
}
