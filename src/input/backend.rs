use super::normalize::RawInput;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use rdev::{Event, EventType};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Which half of the input stream a backend delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    Keyboard,
    Pointer,
}

impl InputClass {
    pub fn name(self) -> &'static str {
        match self {
            InputClass::Keyboard => "keyboard",
            InputClass::Pointer => "pointer",
        }
    }
}

/// A platform hook that forwards raw input of one class into `sender`.
///
/// `attach` on an attached backend is a no-op; `detach` on an idle one
/// likewise.
pub trait CaptureBackend: Send {
    fn attach(&mut self, sender: Sender<RawInput>) -> anyhow::Result<()>;
    fn detach(&mut self) -> anyhow::Result<()>;
    fn is_attached(&self) -> bool;
}

/// How long `attach` waits for the global listener to report an early
/// failure before assuming it is running.
const LISTEN_STARTUP_GRACE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerState {
    Stopped,
    Running,
}

struct HubState {
    listener: ListenerState,
    keyboard: Option<Sender<RawInput>>,
    pointer: Option<Sender<RawInput>>,
}

impl HubState {
    fn slot(&mut self, class: InputClass) -> &mut Option<Sender<RawInput>> {
        match class {
            InputClass::Keyboard => &mut self.keyboard,
            InputClass::Pointer => &mut self.pointer,
        }
    }
}

/// The platform only permits a single `rdev::listen` per process, so every
/// [`RdevBackend`] shares this hub. The listener thread runs until process
/// exit; detaching a backend only disconnects its sink.
static HUB: Lazy<Mutex<HubState>> = Lazy::new(|| {
    Mutex::new(HubState {
        listener: ListenerState::Stopped,
        keyboard: None,
        pointer: None,
    })
});

fn dispatch(event: Event) {
    let (class, raw) = match event.event_type {
        EventType::KeyPress(key) => (
            InputClass::Keyboard,
            RawInput::Key {
                key,
                pressed: true,
                typed: event.name,
            },
        ),
        EventType::KeyRelease(key) => (
            InputClass::Keyboard,
            RawInput::Key {
                key,
                pressed: false,
                typed: None,
            },
        ),
        EventType::ButtonPress(button) => (
            InputClass::Pointer,
            RawInput::Button {
                button,
                pressed: true,
            },
        ),
        EventType::ButtonRelease(button) => (
            InputClass::Pointer,
            RawInput::Button {
                button,
                pressed: false,
            },
        ),
        EventType::MouseMove { .. } | EventType::Wheel { .. } => return,
    };
    if let Ok(mut hub) = HUB.lock() {
        let slot = hub.slot(class);
        if let Some(sender) = slot.as_ref() {
            if sender.send(raw).is_err() {
                *slot = None;
            }
        }
    }
}

fn ensure_listener() -> anyhow::Result<()> {
    {
        let mut hub = HUB.lock().map_err(|_| anyhow!("input hub lock poisoned"))?;
        if hub.listener == ListenerState::Running {
            return Ok(());
        }
        hub.listener = ListenerState::Running;
    }

    let (ready_tx, ready_rx) = mpsc::sync_channel::<String>(1);
    let spawned = std::thread::Builder::new()
        .name("input-listen".into())
        .spawn(move || {
            tracing::debug!("starting global input listener");
            let result = rdev::listen(dispatch);
            if let Ok(mut hub) = HUB.lock() {
                hub.listener = ListenerState::Stopped;
            }
            match result {
                Ok(()) => tracing::warn!("global input listener exited"),
                Err(err) => {
                    let message = format!("{err:?}");
                    tracing::error!(error = %message, "global input listener failed");
                    let _ = ready_tx.send(message);
                }
            }
        });

    if let Err(err) = spawned {
        if let Ok(mut hub) = HUB.lock() {
            hub.listener = ListenerState::Stopped;
        }
        return Err(anyhow!(err).context("failed to spawn input listener thread"));
    }

    match ready_rx.recv_timeout(LISTEN_STARTUP_GRACE) {
        Ok(message) => Err(anyhow!("global input listener failed: {message}")),
        Err(_) => Ok(()),
    }
}

/// Capture backend backed by the shared `rdev` listener.
#[derive(Debug)]
pub struct RdevBackend {
    class: InputClass,
    attached: bool,
}

impl RdevBackend {
    pub fn new(class: InputClass) -> Self {
        Self {
            class,
            attached: false,
        }
    }
}

impl CaptureBackend for RdevBackend {
    fn attach(&mut self, sender: Sender<RawInput>) -> anyhow::Result<()> {
        if self.attached {
            return Ok(());
        }
        {
            let mut hub = HUB.lock().map_err(|_| anyhow!("input hub lock poisoned"))?;
            *hub.slot(self.class) = Some(sender);
        }
        if let Err(err) = ensure_listener() {
            if let Ok(mut hub) = HUB.lock() {
                *hub.slot(self.class) = None;
            }
            return Err(err.context(format!("failed to attach {} hook", self.class.name())));
        }
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) -> anyhow::Result<()> {
        if !self.attached {
            return Ok(());
        }
        self.attached = false;
        let mut hub = HUB.lock().map_err(|_| anyhow!("input hub lock poisoned"))?;
        *hub.slot(self.class) = None;
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

#[derive(Clone)]
pub struct MockCaptureBackend {
    state: Arc<MockCaptureState>,
}

#[derive(Default)]
struct MockCaptureState {
    attach_count: AtomicUsize,
    detach_count: AtomicUsize,
    fail_attach: AtomicBool,
    fail_detach: AtomicBool,
    sender: Mutex<Option<Sender<RawInput>>>,
}

impl MockCaptureBackend {
    pub fn new() -> (Self, MockCaptureHandle) {
        let state = Arc::new(MockCaptureState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            MockCaptureHandle { state },
        )
    }
}

impl CaptureBackend for MockCaptureBackend {
    fn attach(&mut self, sender: Sender<RawInput>) -> anyhow::Result<()> {
        if self.state.fail_attach.load(Ordering::SeqCst) {
            return Err(anyhow!("mock hook refused to attach"));
        }
        let mut guard = self.state.sender.lock().map_err(|_| anyhow!("lock"))?;
        if guard.is_none() {
            self.state.attach_count.fetch_add(1, Ordering::SeqCst);
            *guard = Some(sender);
        }
        Ok(())
    }

    fn detach(&mut self) -> anyhow::Result<()> {
        let mut guard = self.state.sender.lock().map_err(|_| anyhow!("lock"))?;
        if guard.is_some() {
            self.state.detach_count.fetch_add(1, Ordering::SeqCst);
        }
        *guard = None;
        if self.state.fail_detach.load(Ordering::SeqCst) {
            return Err(anyhow!("mock hook refused to detach"));
        }
        Ok(())
    }

    fn is_attached(&self) -> bool {
        match self.state.sender.lock() {
            Ok(guard) => guard.is_some(),
            Err(_) => false,
        }
    }
}

pub struct MockCaptureHandle {
    state: Arc<MockCaptureState>,
}

impl MockCaptureHandle {
    pub fn attach_count(&self) -> usize {
        self.state.attach_count.load(Ordering::SeqCst)
    }

    pub fn detach_count(&self) -> usize {
        self.state.detach_count.load(Ordering::SeqCst)
    }

    pub fn set_fail_attach(&self, fail: bool) {
        self.state.fail_attach.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_detach(&self, fail: bool) {
        self.state.fail_detach.store(fail, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        match self.state.sender.lock() {
            Ok(guard) => guard.is_some(),
            Err(_) => false,
        }
    }

    pub fn emit(&self, event: RawInput) -> bool {
        match self.state.sender.lock() {
            Ok(guard) => guard
                .as_ref()
                .map(|sender| sender.send(event).is_ok())
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}
