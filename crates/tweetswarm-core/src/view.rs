//! View state and the plot controller
//!
//! This module defines:
//! - ViewState: the dataset, encoding mode and selection currently shown
//! - Action: every change the view accepts
//! - PlotView: owns the state and the scene, applies actions and rebuilds

use std::path::Path;

use crate::color::EncodingMode;
use crate::config::{SelectionPolicy, SwarmConfig};
use crate::error::SwarmResult;
use crate::layout::LayoutEngine;
use crate::render::{RenderStats, SceneRenderer};
use crate::scene::{Scene, SceneAction, ShapeHandle};
use crate::selection::SelectionSet;
use crate::store::RecordStore;
use tweetswarm_io::{read_records, Record};

/// Everything the chart depends on
///
/// A state is replaced as a whole by [`ViewState::apply`]; it is never
/// partially updated.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Current dataset
    pub store: RecordStore,
    /// Attribute driving point color and the legend
    pub mode: EncodingMode,
    /// Selected records, most recent first
    pub selection: SelectionSet,
}

/// A change to the view state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the dataset with freshly ingested records
    LoadDataset(Vec<Record>),
    /// Switch the encoding mode
    SetMode(EncodingMode),
    /// Add the record to the selection, or remove it if already selected
    Toggle(Record),
}

impl ViewState {
    /// Create the initial state: no data, sentiment mode, nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the state that follows an action
    pub fn apply(&self, action: Action, policy: SelectionPolicy) -> Self {
        match action {
            Action::LoadDataset(records) => Self {
                store: RecordStore::new(records),
                mode: self.mode,
                selection: if policy.clear_on_dataset_change {
                    SelectionSet::new()
                } else {
                    self.selection.clone()
                },
            },
            Action::SetMode(mode) => Self {
                mode,
                ..self.clone()
            },
            Action::Toggle(record) => Self {
                selection: self.selection.toggled(&record),
                ..self.clone()
            },
        }
    }
}

/// Interactive beeswarm view
///
/// Holds the current [`ViewState`] and the [`Scene`] it renders to. Every
/// action replaces the state and rebuilds the scene.
#[derive(Debug)]
pub struct PlotView {
    config: SwarmConfig,
    state: ViewState,
    renderer: SceneRenderer,
    scene: Scene,
    stats: RenderStats,
}

impl Default for PlotView {
    fn default() -> Self {
        Self::new(SwarmConfig::default())
    }
}

impl PlotView {
    /// Create an empty view
    pub fn new(config: SwarmConfig) -> Self {
        let renderer = SceneRenderer::new(
            config.plot.clone(),
            LayoutEngine::new(config.layout.clone()),
        );
        let mut view = Self {
            config,
            state: ViewState::new(),
            renderer,
            scene: Scene::default(),
            stats: RenderStats::default(),
        };
        view.rebuild();
        view
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The rendered scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Counters from the last rebuild
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Apply an action and rebuild the scene
    pub fn dispatch(&mut self, action: Action) {
        self.state = self.state.apply(action, self.config.selection);
        self.rebuild();
    }

    /// Replace the dataset
    pub fn load_records(&mut self, records: Vec<Record>) -> usize {
        let count = records.len();
        self.dispatch(Action::LoadDataset(records));
        count
    }

    /// Ingest a file and show it
    ///
    /// On failure the current dataset stays in place and nothing is redrawn.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> SwarmResult<usize> {
        let path = path.as_ref();
        match read_records(path, &self.config.ingest) {
            Ok(records) => {
                let count = self.load_records(records);
                tracing::info!("Showing {} records from {:?}", count, path);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Keeping current dataset, failed to load {:?}: {}", path, e);
                Err(e.into())
            }
        }
    }

    /// Switch the encoding mode
    pub fn set_mode(&mut self, mode: EncodingMode) {
        if mode != self.state.mode {
            tracing::debug!("Encoding mode {} -> {}", self.state.mode, mode);
        }
        self.dispatch(Action::SetMode(mode));
    }

    /// Run the click action bound to a shape; returns whether one ran
    pub fn click(&mut self, handle: ShapeHandle) -> bool {
        match self.scene.click(handle).cloned() {
            Some(SceneAction::Toggle(record)) => {
                self.dispatch(Action::Toggle(record));
                true
            }
            None => false,
        }
    }

    /// Click the point of the record with this text
    pub fn click_text(&mut self, text: &str) -> bool {
        match self.scene.handle_for_text(text) {
            Some(handle) => self.click(handle),
            None => {
                tracing::debug!("No point for {:?}", text);
                false
            }
        }
    }

    /// Click at a canvas position
    pub fn click_at(&mut self, x: f64, y: f64) -> bool {
        match self.scene.hit_test(x, y) {
            Some(handle) => self.click(handle),
            None => false,
        }
    }

    /// Texts of the selected tweets, most recent first
    pub fn selected_texts(&self) -> Vec<String> {
        self.state
            .selection
            .texts()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn rebuild(&mut self) {
        self.stats = self.renderer.render(&self.state, &mut self.scene);
    }
}
