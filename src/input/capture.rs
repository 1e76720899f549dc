use super::backend::{CaptureBackend, InputClass, RdevBackend};
use super::normalize::{KeyNormalizer, RawInput};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Receives every normalised `(id, pressed)` transition.
///
/// Invoked on a capture worker thread; implementations must return quickly
/// and hand anything heavier off to the render thread.
pub type TransitionCallback = Arc<dyn Fn(&str, bool) + Send + Sync>;

struct CaptureChannel {
    class: InputClass,
    backend: Box<dyn CaptureBackend>,
    worker: Option<JoinHandle<()>>,
}

/// Owns one capture backend and worker thread per input class.
pub struct InputCapture {
    callback: TransitionCallback,
    channels: Vec<CaptureChannel>,
    running: bool,
}

impl InputCapture {
    /// Capture backed by the platform hooks.
    pub fn new(callback: TransitionCallback) -> Self {
        Self::with_backends(
            callback,
            Box::new(RdevBackend::new(InputClass::Keyboard)),
            Box::new(RdevBackend::new(InputClass::Pointer)),
        )
    }

    pub fn with_backends(
        callback: TransitionCallback,
        keyboard: Box<dyn CaptureBackend>,
        pointer: Box<dyn CaptureBackend>,
    ) -> Self {
        let channels = [
            (InputClass::Keyboard, keyboard),
            (InputClass::Pointer, pointer),
        ]
        .into_iter()
        .map(|(class, backend)| CaptureChannel {
            class,
            backend,
            worker: None,
        })
        .collect();
        Self {
            callback,
            channels,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the given class has a live subscription.
    pub fn is_attached(&self, class: InputClass) -> bool {
        self.channels
            .iter()
            .any(|channel| channel.class == class && channel.backend.is_attached())
    }

    /// Attach every input class. A class that fails to attach stays silent;
    /// the others still run.
    pub fn start(&mut self) {
        if self.running {
            tracing::warn!("input capture already running; ignoring start");
            return;
        }
        self.running = true;

        for channel in &mut self.channels {
            let (tx, rx) = mpsc::channel();
            if let Err(err) = channel.backend.attach(tx) {
                tracing::error!(
                    class = channel.class.name(),
                    error = %format!("{err:#}"),
                    "failed to attach input capture"
                );
                continue;
            }
            let callback = Arc::clone(&self.callback);
            let spawned = std::thread::Builder::new()
                .name(format!("input-{}", channel.class.name()))
                .spawn(move || worker_loop(rx, callback));
            match spawned {
                Ok(join) => {
                    tracing::info!(class = channel.class.name(), "input capture attached");
                    channel.worker = Some(join);
                }
                Err(err) => {
                    tracing::error!(
                        class = channel.class.name(),
                        ?err,
                        "failed to spawn input worker"
                    );
                    if let Err(err) = channel.backend.detach() {
                        tracing::warn!(class = channel.class.name(), error = %format!("{err:#}"), "failed to detach input capture");
                    }
                }
            }
        }
    }

    /// Detach every input class. Safe to call repeatedly; each detach
    /// failure is logged on its own and does not stop the others.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        for channel in &mut self.channels {
            let detached = match channel.backend.detach() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(
                        class = channel.class.name(),
                        error = %format!("{err:#}"),
                        "failed to detach input capture"
                    );
                    false
                }
            };
            if let Some(worker) = channel.worker.take() {
                // A backend that failed to detach may still hold the sender,
                // so its worker is left to exit on its own.
                if detached && worker.join().is_err() {
                    tracing::warn!(class = channel.class.name(), "input worker panicked");
                }
            }
        }
        tracing::info!("input capture stopped");
    }
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(rx: Receiver<RawInput>, callback: TransitionCallback) {
    let mut normalizer = KeyNormalizer::new();
    while let Ok(raw) = rx.recv() {
        if let Some(transition) = normalizer.normalize(raw) {
            tracing::trace!(id = %transition.id, pressed = transition.pressed, "input transition");
            callback(&transition.id, transition.pressed);
        }
    }
}
