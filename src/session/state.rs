use serde::Serialize;

use crate::config::{ClosurePolicy, ContainmentMethod, NazotteConfig};
use crate::domain::{DragState, Estate, PathCollector, SelectionMode, SelectionPolygon, Vertex};

/// Everything the interaction controller knows about the current selection
#[derive(Clone, Debug)]
pub struct SessionState {
    pub collector: PathCollector,
    /// Polygon of the last finished gesture
    pub polygon: SelectionPolygon,
    /// Candidates returned for `polygon`
    pub candidates: Vec<Estate>,
    /// Bumped whenever the selection is invalidated; tags outgoing queries
    pub generation: u64,
    /// Generation of the query still awaiting a response
    pub pending: Option<u64>,
    /// Error text from the last failed query
    pub last_error: Option<String>,
    pub closure: ClosurePolicy,
    pub containment: ContainmentMethod,
    pub skip_degenerate_queries: bool,
}

impl SessionState {
    pub fn new(config: &NazotteConfig) -> Self {
        Self {
            collector: PathCollector::new(SelectionMode::Pan),
            polygon: SelectionPolygon::empty(),
            candidates: Vec::new(),
            generation: 0,
            pending: None,
            last_error: None,
            closure: config.closure,
            containment: config.containment,
            skip_degenerate_queries: config.skip_degenerate_queries,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.collector.mode()
    }

    pub fn drag_path(&self) -> &[Vertex] {
        self.collector.path()
    }

    /// Forget the polygon and its candidates, invalidating in-flight queries
    pub fn clear_selection(&mut self) {
        self.generation += 1;
        self.polygon = SelectionPolygon::empty();
        self.candidates.clear();
        self.pending = None;
        self.last_error = None;
    }

    /// Whether a candidate falls inside the current polygon
    pub fn is_selected(&self, estate: &Estate) -> bool {
        self.polygon.contains(estate.position(), self.containment)
    }

    /// Candidates inside the current polygon
    pub fn selected(&self) -> impl Iterator<Item = &Estate> {
        self.candidates.iter().filter(|e| self.is_selected(e))
    }

    /// Snapshot for the rendering layer
    pub fn view(&self) -> SelectionView<'_> {
        SelectionView {
            mode: self.mode(),
            drag: self.collector.drag_state(),
            drag_path: self.drag_path(),
            polygon: &self.polygon,
            markers: self
                .candidates
                .iter()
                .map(|estate| Marker {
                    id: estate.id,
                    name: &estate.name,
                    latitude: estate.latitude,
                    longitude: estate.longitude,
                    selected: self.is_selected(estate),
                })
                .collect(),
            pending: self.pending.is_some(),
            error: self.last_error.as_deref(),
        }
    }
}

/// One candidate marker and whether to show it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker<'a> {
    pub id: u64,
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub selected: bool,
}

/// What the map renderer needs to draw the selection
#[derive(Debug, Clone, Serialize)]
pub struct SelectionView<'a> {
    pub mode: SelectionMode,
    pub drag: DragState,
    pub drag_path: &'a [Vertex],
    pub polygon: &'a SelectionPolygon,
    pub markers: Vec<Marker<'a>>,
    pub pending: bool,
    pub error: Option<&'a str>,
}
