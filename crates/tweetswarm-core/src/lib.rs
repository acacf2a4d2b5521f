//! tweetswarm-core - Beeswarm plot engine for tweet datasets
//!
//! Lays out tweets in one row per month, positioned horizontally by a
//! projection value and spread vertically by a short force relaxation so no
//! two points overlap. Points are colored by sentiment or subjectivity, and
//! clicking a point toggles it in an ordered selection.
//!
//! # Key Components
//!
//! - **RecordStore**: immutable, versioned view of the loaded dataset
//! - **Color**: the two encodings and their shared color scales
//! - **LayoutEngine**: collision-avoiding relaxation of one row
//! - **SelectionSet**: ordered multi-selection with toggle semantics
//! - **Legend**: 20-band gradient legend for the active encoding
//! - **SceneRenderer**: full rebuild of the scene from a [`ViewState`]
//! - **PlotView**: owns the state and the scene, turns clicks into actions
//!
//! # Example
//!
//! ```
//! use tweetswarm_core::{Category, EncodingMode, PlotView, Record};
//!
//! let mut view = PlotView::default();
//! view.load_records(vec![
//!     Record::new("first", Category::March).with_sentiment(-0.8),
//!     Record::new("second", Category::May).with_sentiment(0.6),
//! ]);
//! view.set_mode(EncodingMode::Subjectivity);
//! view.click_text("second");
//! assert_eq!(view.selected_texts(), vec!["second".to_string()]);
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod legend;
pub mod render;
pub mod scale;
pub mod scene;
pub mod selection;
pub mod store;
pub mod view;

pub use color::*;
pub use config::*;
pub use error::*;
pub use export::{export_scene, write_scene, ExportFormat};
pub use layout::*;
pub use legend::*;
pub use render::{RenderStats, SceneRenderer};
pub use scale::*;
pub use scene::*;
pub use selection::*;
pub use store::*;
pub use view::*;

pub use tweetswarm_io::{Category, IngestOptions, IngestionError, Record};
