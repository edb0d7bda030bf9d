use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::config::NazotteConfig;
use crate::query::{self, EstateSource};
use crate::session::script::GestureStep;
use crate::session::{self, Msg, SessionState};

/// Interaction controller: owns the session and talks to the estate backend
pub struct App {
    pub state: SessionState,
    source: Arc<dyn EstateSource>,
    /// Query tasks post their results here
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
}

impl App {
    pub fn new(config: &NazotteConfig, source: Arc<dyn EstateSource>) -> Self {
        log::info!(
            "Selection session using {} closure and {} containment",
            config.closure.name(),
            config.containment.name()
        );
        let (tx, rx) = mpsc::channel(config.query_channel_capacity.max(1));
        Self {
            state: SessionState::new(config),
            source,
            tx,
            rx,
        }
    }

    /// Apply one message, dispatching the estate query a finished gesture asks for
    pub fn update(&mut self, msg: Msg) {
        if let Some(request) = session::update(&mut self.state, msg) {
            // Detached; the result comes back through `rx`
            query::dispatch(self.source.clone(), request, self.tx.clone());
        }
    }

    /// Wait until the outstanding query (if any) has been answered.
    ///
    /// Responses to superseded queries are consumed and dropped on the way.
    pub async fn settle(&mut self) {
        while self.state.pending.is_some() {
            match self.rx.recv().await {
                Some(msg) => self.update(msg),
                None => break,
            }
        }
    }

    /// Process input events until the sender side closes, interleaved with
    /// query responses as they arrive
    pub async fn run(&mut self, mut events: Receiver<Msg>) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(msg) => self.update(msg),
                    None => break,
                },
                Some(msg) = self.rx.recv() => self.update(msg),
            }
        }
        self.settle().await;
    }

    /// Feed a recorded gesture script through the session
    pub async fn replay(&mut self, steps: &[GestureStep]) {
        for step in steps {
            match step.to_msg() {
                Some(msg) => self.update(msg),
                None => self.settle().await,
            }
        }
        self.settle().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Estate, SelectionMode, Vertex};
    use crate::query::CatalogSource;
    use crate::session::{ModeMsg, PointerMsg};
    use futures::FutureExt;
    use futures::future::BoxFuture;

    struct Offline;

    impl EstateSource for Offline {
        fn search<'a>(&'a self, _polygon: &'a [Vertex]) -> BoxFuture<'a, anyhow::Result<Vec<Estate>>> {
            async { Err::<Vec<Estate>, _>(anyhow::anyhow!("503 Service Unavailable")) }.boxed()
        }
    }

    fn estate(id: u64, latitude: f64, longitude: f64) -> Estate {
        Estate {
            id,
            name: format!("estate-{id}"),
            latitude,
            longitude,
        }
    }

    fn catalog() -> Arc<dyn EstateSource> {
        Arc::new(CatalogSource::new(vec![
            estate(1, 1.0, 1.0),
            estate(2, 5.0, 5.0),
            estate(3, 0.0, 2.0),
            estate(4, 11.0, 11.0),
        ]))
    }

    fn square_gesture(origin: f64) -> Vec<GestureStep> {
        vec![
            GestureStep::Press(Vertex::new(origin, origin)),
            GestureStep::Move(Vertex::new(origin, origin + 2.0)),
            GestureStep::Move(Vertex::new(origin + 2.0, origin + 2.0)),
            GestureStep::Release(Vertex::new(origin + 2.0, origin)),
        ]
    }

    fn selected_ids(app: &App) -> Vec<u64> {
        app.state.selected().map(|e| e.id).collect()
    }

    #[tokio::test]
    async fn test_replay_selects_inside_square() {
        let mut app = App::new(&NazotteConfig::default(), catalog());
        let mut steps = vec![GestureStep::ToggleMode];
        steps.extend(square_gesture(0.0));
        app.replay(&steps).await;

        assert!(app.state.pending.is_none());
        assert_eq!(selected_ids(&app), vec![1, 3]);
        // Estate 2 lies outside the bounding box, so the backend never returned it
        assert_eq!(app.state.candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_late_response_does_not_overwrite_newer_gesture() {
        let mut app = App::new(&NazotteConfig::default(), catalog());
        let mut steps = vec![GestureStep::ToggleMode];
        // Second gesture starts before the first query is answered
        steps.extend(square_gesture(0.0));
        steps.extend(square_gesture(10.0));
        app.replay(&steps).await;

        assert_eq!(selected_ids(&app), vec![4]);
    }

    #[tokio::test]
    async fn test_wait_between_gestures() {
        let mut app = App::new(&NazotteConfig::default(), catalog());
        let mut steps = vec![GestureStep::ToggleMode];
        steps.extend(square_gesture(0.0));
        steps.push(GestureStep::Wait);
        assert!(app.state.candidates.is_empty());
        app.replay(&steps).await;
        assert_eq!(selected_ids(&app), vec![1, 3]);

        app.replay(&[GestureStep::SetMode {
            mode: SelectionMode::Draw,
        }])
        .await;
        assert!(app.state.candidates.is_empty());
        assert!(app.state.polygon.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_session_alive() {
        let mut app = App::new(&NazotteConfig::default(), Arc::new(Offline));
        let mut steps = vec![GestureStep::ToggleMode];
        steps.extend(square_gesture(0.0));
        app.replay(&steps).await;

        assert_eq!(app.state.mode(), SelectionMode::Draw);
        assert!(app.state.candidates.is_empty());
        assert!(app.state.last_error.as_deref().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_run_event_loop() {
        let mut app = App::new(&NazotteConfig::default(), catalog());
        let (events_tx, events_rx) = mpsc::channel(16);
        let msgs = [
            Msg::Mode(ModeMsg::Set(SelectionMode::Draw)),
            Msg::Pointer(PointerMsg::Press(Vertex::new(0.0, 0.0))),
            Msg::Pointer(PointerMsg::Move(Vertex::new(0.0, 2.0))),
            Msg::Pointer(PointerMsg::Move(Vertex::new(2.0, 2.0))),
            Msg::Pointer(PointerMsg::Release(Vertex::new(2.0, 0.0))),
        ];
        for msg in msgs {
            events_tx.send(msg).await.unwrap();
        }
        drop(events_tx);

        app.run(events_rx).await;
        assert_eq!(selected_ids(&app), vec![1, 3]);
        assert_eq!(app.state.drag_path().len(), 4);
    }
}
