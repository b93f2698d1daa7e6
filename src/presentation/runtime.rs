// Widget runtime - One task owns the widget and turns host events into frames
use crate::application::widget_service::Widget;
use crate::domain::error::WidgetError;
use crate::domain::input::InputData;
use crate::domain::layout::Container;
use crate::domain::theme::ThemeColors;
use crate::presentation::mapper::render_frame;
use crate::presentation::tiles::RenderFrame;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const EVENT_BUFFER: usize = 64;
const FRAME_BUFFER: usize = 16;

#[derive(Debug, Clone)]
pub enum WidgetEvent {
    InputChanged(Option<InputData>),
    Resized(Container),
    ThemeChanged(ThemeColors),
}

/// Events drained in one go, newest of each kind wins.
#[derive(Debug, Default)]
struct PendingUpdate {
    input: Option<Option<InputData>>,
    container: Option<Container>,
    theme: Option<ThemeColors>,
}

impl PendingUpdate {
    fn absorb(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::InputChanged(input) => self.input = Some(input),
            WidgetEvent::Resized(container) => self.container = Some(container),
            WidgetEvent::ThemeChanged(theme) => self.theme = Some(theme),
        }
    }

    /// Size first so a new payload is laid out against the latest container.
    fn apply(self, widget: &mut Widget) {
        if let Some(theme) = self.theme {
            widget.set_theme(theme);
        }
        if let Some(container) = self.container {
            widget.resize(container);
        }
        if let Some(input) = self.input {
            widget.apply_input(input.as_ref());
        }
    }
}

/// Sending side of a running widget. The widget is torn down once every clone
/// of the handle has been dropped.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    events: mpsc::Sender<WidgetEvent>,
}

impl WidgetHandle {
    pub async fn send(&self, event: WidgetEvent) -> Result<(), WidgetError> {
        self.events
            .send(event)
            .await
            .map_err(|_| WidgetError::Disconnected)
    }

    pub async fn set_input(&self, input: Option<InputData>) -> Result<(), WidgetError> {
        self.send(WidgetEvent::InputChanged(input)).await
    }

    pub async fn resize(&self, width: f64, height: f64) -> Result<(), WidgetError> {
        self.send(WidgetEvent::Resized(Container::new(width, height)))
            .await
    }

    pub async fn set_theme(&self, theme: ThemeColors) -> Result<(), WidgetError> {
        self.send(WidgetEvent::ThemeChanged(theme)).await
    }
}

/// Starts the widget task. The join handle yields the widget back once every
/// handle is dropped or the frame receiver goes away.
pub fn spawn_widget(widget: Widget) -> (WidgetHandle, mpsc::Receiver<RenderFrame>, JoinHandle<Widget>) {
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
    let (frame_tx, frame_rx) = mpsc::channel(FRAME_BUFFER);

    let task = tokio::spawn(run_widget(widget, event_rx, frame_tx));

    (WidgetHandle { events: event_tx }, frame_rx, task)
}

async fn run_widget(
    mut widget: Widget,
    mut events: mpsc::Receiver<WidgetEvent>,
    frames: mpsc::Sender<RenderFrame>,
) -> Widget {
    tracing::debug!("Widget runtime started ({})", widget.kind());

    while let Some(event) = events.recv().await {
        let mut pending = PendingUpdate::default();
        pending.absorb(event);
        while let Ok(next) = events.try_recv() {
            pending.absorb(next);
        }

        pending.apply(&mut widget);

        if frames.send(render_frame(&widget)).await.is_err() {
            tracing::debug!("Frame receiver dropped, stopping widget runtime");
            break;
        }
    }

    tracing::debug!("Widget runtime stopped ({})", widget.kind());
    widget
}
