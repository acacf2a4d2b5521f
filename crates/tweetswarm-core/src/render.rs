//! Scene rebuild from view state
//!
//! Every change of dataset, encoding mode or selection goes through
//! [`SceneRenderer::render`], which clears the surface and draws the whole
//! chart again: row labels, one circle per record, selection borders, the
//! legend, and a toggle action on each circle.
//!
//! Relaxed row positions only depend on the row's records and the shared
//! x-scale, so they are cached per `(category, dataset version, scale)` and a
//! mode switch or selection toggle reuses them.

use std::collections::HashMap;

use crate::color::{color, EncodingMode, Rgb};
use crate::config::PlotConfig;
use crate::layout::LayoutEngine;
use crate::legend::legend;
use crate::scale::LinearScale;
use crate::scene::{
    Attr, Cursor, Paint, Point, SceneAction, ShapeHandle, ShapeKind, Surface, TextAnchor,
    TextStyle,
};
use crate::store::RecordStore;
use crate::view::ViewState;
use tweetswarm_io::{Category, Record};

/// Counters from one render pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Circles drawn
    pub points: usize,
    /// Circles drawn per row, in row order
    pub rows: [usize; 3],
    /// Circles drawn with a selection border
    pub selected: usize,
    /// Rows whose layout was computed in this pass
    pub layouts_computed: usize,
    /// Rows whose layout came from the cache
    pub layouts_cached: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    category: Category,
    version: u64,
    scale: [u64; 4],
}

/// Draws a [`ViewState`] onto a [`Surface`]
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    plot: PlotConfig,
    engine: LayoutEngine,
    cache: HashMap<LayoutKey, Vec<(f64, f64)>>,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(PlotConfig::default(), LayoutEngine::default())
    }
}

impl SceneRenderer {
    /// Create a renderer with the given geometry and layout engine
    pub fn new(plot: PlotConfig, engine: LayoutEngine) -> Self {
        Self {
            plot,
            engine,
            cache: HashMap::new(),
        }
    }

    /// Number of row layouts currently cached
    pub fn cached_layouts(&self) -> usize {
        self.cache.len()
    }

    /// Horizontal scale shared by all rows
    ///
    /// The domain is the projection extent over the whole dataset, so rows are
    /// comparable. An empty or single-valued extent maps everything to the
    /// middle of the range.
    pub fn x_scale(&self, store: &RecordStore) -> LinearScale {
        let domain = store.projection_extent().unwrap_or((0.0, 0.0));
        LinearScale::new(domain, self.plot.x_range())
    }

    /// Rebuild the whole scene
    pub fn render<S: Surface + ?Sized>(&mut self, state: &ViewState, surface: &mut S) -> RenderStats {
        let (width, height) = self.plot.canvas_size();
        surface.resize(width, height);
        surface.clear_all();

        let store = &state.store;
        if store.is_empty() {
            tracing::debug!("Empty dataset, nothing to draw");
            return RenderStats::default();
        }

        let version = store.version();
        self.cache.retain(|key, _| key.version == version);

        let scale = self.x_scale(store);
        let mut stats = RenderStats::default();
        let mut circles: Vec<(ShapeHandle, &Record)> = Vec::with_capacity(store.len());

        for category in Category::ALL {
            let (origin_x, origin_y) = self.plot.row_origin(category.row());
            surface.draw_text(
                category.name(),
                Point::new(
                    origin_x + self.plot.row_label_x,
                    origin_y + self.plot.row_height / 2.0,
                ),
                TextStyle::bold(self.plot.label_font_size).with_anchor(TextAnchor::End),
            );

            let group = store.by_category(category);
            let positions = self.row_positions(category, version, &scale, &group, &mut stats);

            for (record, (x, y)) in group.iter().copied().zip(positions) {
                let handle = surface.draw_shape(
                    ShapeKind::Circle,
                    vec![
                        Attr::Cx(origin_x + self.plot.point_offset_x + x),
                        Attr::Cy(origin_y + y),
                        Attr::R(self.plot.point_radius),
                        Attr::Fill(Paint::Color(color(record, state.mode))),
                        Attr::StrokeWidth(self.plot.stroke_width),
                        Attr::Cursor(Cursor::Pointer),
                    ],
                );
                circles.push((handle, record));
            }
            stats.rows[category.row()] = group.len();
        }

        for (handle, record) in &circles {
            let stroke = if state.selection.contains(record) {
                stats.selected += 1;
                Paint::Color(Rgb::BLACK)
            } else {
                Paint::None
            };
            surface.set_attr(*handle, Attr::Stroke(stroke));
        }

        self.draw_legend(state.mode, surface);

        stats.points = circles.len();
        for (handle, record) in circles {
            surface.on_click(handle, SceneAction::Toggle(record.clone()));
        }

        tracing::debug!(
            "Rendered {} points ({} selected, {} layouts computed, {} cached) in {} mode",
            stats.points,
            stats.selected,
            stats.layouts_computed,
            stats.layouts_cached,
            state.mode
        );

        stats
    }

    fn row_positions(
        &mut self,
        category: Category,
        version: u64,
        scale: &LinearScale,
        group: &[&Record],
        stats: &mut RenderStats,
    ) -> Vec<(f64, f64)> {
        let key = LayoutKey {
            category,
            version,
            scale: scale.key(),
        };
        if let Some(cached) = self.cache.get(&key) {
            stats.layouts_cached += 1;
            return cached.clone();
        }

        let positions: Vec<(f64, f64)> = self
            .engine
            .layout(
                group,
                |r| scale.apply(r.projection),
                self.plot.row_height / 2.0,
                self.plot.row_height,
            )
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect();

        stats.layouts_computed += 1;
        self.cache.insert(key, positions.clone());
        positions
    }

    fn draw_legend<S: Surface + ?Sized>(&self, mode: EncodingMode, surface: &mut S) {
        let legend = legend(mode);
        let geometry = &self.plot.legend;
        let (left, top) = self.plot.legend_origin();
        let block = geometry.bar_height / legend.bands.len() as f64;

        for band in &legend.bands {
            surface.draw_shape(
                ShapeKind::Rect,
                vec![
                    Attr::X(left),
                    Attr::Y(top + band.position as f64 * block),
                    Attr::Width(geometry.bar_width),
                    Attr::Height(block),
                    Attr::Fill(Paint::Color(band.color)),
                ],
            );
        }

        let label_x = left + geometry.bar_width + geometry.label_gap;
        let style = TextStyle::bold(self.plot.label_font_size).with_anchor(TextAnchor::Middle);
        surface.draw_text(
            legend.top_label,
            Point::new(label_x, top + geometry.top_label_y),
            style,
        );
        surface.draw_text(
            legend.bottom_label,
            Point::new(label_x, top + geometry.bar_height),
            style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{NEGATIVE, POSITIVE};
    use crate::legend::LEGEND_BANDS;
    use crate::scene::{AttrKey, Scene, ShapeKind};
    use crate::selection::SelectionSet;

    fn state(records: Vec<Record>) -> ViewState {
        ViewState {
            store: RecordStore::new(records),
            ..ViewState::default()
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new("a", Category::March)
                .with_sentiment(-1.0)
                .with_projection(-3.0),
            Record::new("b", Category::April)
                .with_sentiment(1.0)
                .with_projection(5.0),
            Record::new("c", Category::April).with_projection(1.0),
        ]
    }

    #[test]
    fn test_empty_store_draws_nothing() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        let stats = renderer.render(&ViewState::default(), &mut scene);

        assert!(scene.is_empty());
        assert_eq!(stats, RenderStats::default());
        assert_eq!((scene.width, scene.height), (1450.0, 780.0));
    }

    #[test]
    fn test_render_draws_every_record() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        let stats = renderer.render(&state(sample()), &mut scene);

        assert_eq!(stats.points, 3);
        assert_eq!(stats.rows, [1, 2, 0]);
        assert_eq!(scene.circles().count(), 3);
        assert_eq!(
            scene
                .shapes()
                .filter(|(_, s)| s.kind == ShapeKind::Rect)
                .count(),
            LEGEND_BANDS
        );

        let texts: Vec<&str> = scene.texts().map(|t| t.content.as_str()).collect();
        assert_eq!(texts, vec!["March", "April", "May", "Positive", "Negative"]);
    }

    #[test]
    fn test_fill_follows_mode() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        renderer.render(&state(sample()), &mut scene);

        let a = scene.handle_for_text("a").unwrap();
        let b = scene.handle_for_text("b").unwrap();
        assert_eq!(scene.shape(a).unwrap().fill(), Some(Paint::Color(NEGATIVE)));
        assert_eq!(scene.shape(b).unwrap().fill(), Some(Paint::Color(POSITIVE)));
    }

    #[test]
    fn test_shared_scale_spans_all_rows() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        renderer.render(&state(sample()), &mut scene);

        // single-point row sits exactly on its target
        let a = scene.handle_for_text("a").unwrap();
        let cx = scene.shape(a).unwrap().number(AttrKey::Cx).unwrap();
        assert!((cx - 300.0).abs() < 1e-9);
        let cy = scene.shape(a).unwrap().number(AttrKey::Cy).unwrap();
        assert!((cy - 155.0).abs() < 1e-9);
    }

    #[test]
    fn test_selection_sets_stroke() {
        let records = sample();
        let selection = SelectionSet::new().toggled(&records[1]);
        let view = ViewState {
            selection,
            ..state(records)
        };

        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        let stats = renderer.render(&view, &mut scene);
        assert_eq!(stats.selected, 1);

        let b = scene.handle_for_text("b").unwrap();
        let c = scene.handle_for_text("c").unwrap();
        assert_eq!(scene.shape(b).unwrap().stroke(), Some(Paint::Color(Rgb::BLACK)));
        assert_eq!(scene.shape(c).unwrap().stroke(), Some(Paint::None));
    }

    #[test]
    fn test_layout_cache_reused_across_modes() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        let view = state(sample());

        let first = renderer.render(&view, &mut scene);
        assert_eq!(first.layouts_computed, 3);
        let before: Vec<_> = scene.circles().map(|(_, s)| s.center()).collect();

        let switched = ViewState {
            mode: EncodingMode::Subjectivity,
            ..view.clone()
        };
        let second = renderer.render(&switched, &mut scene);
        assert_eq!(second.layouts_computed, 0);
        assert_eq!(second.layouts_cached, 3);
        let after: Vec<_> = scene.circles().map(|(_, s)| s.center()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_new_dataset_evicts_cache() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        renderer.render(&state(sample()), &mut scene);
        renderer.render(&state(sample()), &mut scene);
        assert_eq!(renderer.cached_layouts(), 3);
    }

    #[test]
    fn test_click_actions_attached() {
        let mut renderer = SceneRenderer::default();
        let mut scene = Scene::default();
        renderer.render(&state(sample()), &mut scene);

        for (handle, shape) in scene.circles() {
            let record = shape.record().unwrap();
            assert_eq!(
                scene.click(handle),
                Some(&SceneAction::Toggle(record.clone()))
            );
        }
    }
}
