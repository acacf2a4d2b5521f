//! Force-relaxed placement of one row of points
//!
//! Each record becomes a body pulled toward its target x (strong) and the
//! row's center line (weak) while overlapping bodies are pushed apart. The
//! simulation runs for a fixed number of ticks and then stops; there is no
//! continuous animation.
//!
//! # Seeding
//!
//! Body `i` starts on a golden-angle spiral around its own target:
//! `(tx + r·cos θ, center_y + r·sin θ)` with `r = seed_radius·√i` and
//! `θ = i·π(3 − √5)`. Body 0 starts exactly on its target, and bodies that
//! share a target start at distinct positions, so the result is reproducible
//! for the same input.
//!
//! # Tick
//!
//! 1. `alpha += (alpha_target − alpha)·alpha_decay`
//! 2. `vx += (tx − x)·x_strength·alpha`, `vy += (center_y − y)·y_strength·alpha`
//! 3. velocities decay by `velocity_decay`, then positions integrate
//! 4. pairs closer than `min_separation` are pushed apart along their center
//!    line in repeated sweeps until none overlap or `collision_sweeps` is
//!    reached; coincident pairs split vertically
//!
//! The separation guarantee is best effort: a very dense row may end a tick
//! with residual overlap if the sweep cap is hit.

use serde::{Deserialize, Serialize};

use crate::error::{validation, ConfigError, ConfigResult};
use tweetswarm_io::Record;

/// Tolerance below the minimum separation that still counts as separated
const SLACK: f64 = 1e-9;

/// Parameters of the relaxation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of ticks per layout
    pub iterations: usize,
    /// Strength of the pull toward the target x
    pub x_strength: f64,
    /// Strength of the pull toward the row center line
    pub y_strength: f64,
    /// Minimum center-to-center distance in pixels
    pub min_separation: f64,
    /// Maximum collision sweeps per tick
    pub collision_sweeps: usize,
    /// Spacing of the seed spiral
    pub seed_radius: f64,
    /// Alpha at the start of the simulation
    pub alpha_start: f64,
    /// Alpha the simulation decays toward
    pub alpha_target: f64,
    /// Fraction of the remaining alpha removed per tick
    pub alpha_decay: f64,
    /// Fraction of velocity lost per tick
    pub velocity_decay: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            x_strength: 1.0,
            y_strength: 0.1,
            min_separation: 6.0,
            collision_sweeps: 64,
            seed_radius: 10.0,
            alpha_start: 1.0,
            alpha_target: 0.0,
            // alpha reaches 0.001 after 300 ticks
            alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
            velocity_decay: 0.4,
        }
    }
}

impl LayoutConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_negative("layout.x_strength", self.x_strength)?;
        validation::validate_non_negative("layout.y_strength", self.y_strength)?;
        validation::validate_non_negative("layout.min_separation", self.min_separation)?;
        validation::validate_non_negative("layout.seed_radius", self.seed_radius)?;
        validation::validate_unit_interval("layout.alpha_start", self.alpha_start)?;
        validation::validate_unit_interval("layout.alpha_target", self.alpha_target)?;
        validation::validate_unit_interval("layout.alpha_decay", self.alpha_decay)?;
        validation::validate_unit_interval("layout.velocity_decay", self.velocity_decay)?;
        if self.collision_sweeps == 0 && self.min_separation > 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "layout.collision_sweeps".to_string(),
                message: "must be at least 1 when min_separation is set".to_string(),
            });
        }
        Ok(())
    }
}

/// A record with its computed pixel position for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPoint<'a> {
    pub record: &'a Record,
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint<'_> {
    /// Distance between two point centers
    pub fn distance(&self, other: &LayoutPoint<'_>) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    tx: f64,
}

impl Body {
    fn seeded(index: usize, tx: f64, center_y: f64, seed_radius: f64) -> Self {
        let tx = if tx.is_finite() { tx } else { 0.0 };
        let radius = seed_radius * (index as f64).sqrt();
        let angle = index as f64 * std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        Self {
            x: tx + radius * angle.cos(),
            y: center_y + radius * angle.sin(),
            vx: 0.0,
            vy: 0.0,
            tx,
        }
    }

    fn nudge(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        self.vx += dx;
        self.vy += dy;
    }
}

/// Collision-avoiding row layout
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given parameters
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the parameters
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out one group of records
    ///
    /// Output order matches input order. An empty group returns immediately
    /// without running the simulation. Points ending outside
    /// `[0, canvas_height]` are reported in the log but not moved.
    pub fn layout<'a, F>(
        &self,
        records: &[&'a Record],
        target_x: F,
        center_y: f64,
        canvas_height: f64,
    ) -> Vec<LayoutPoint<'a>>
    where
        F: Fn(&Record) -> f64,
    {
        if records.is_empty() {
            return Vec::new();
        }

        let mut bodies: Vec<Body> = records
            .iter()
            .copied()
            .enumerate()
            .map(|(i, record)| Body::seeded(i, target_x(record), center_y, self.config.seed_radius))
            .collect();

        let separated = self.relax(&mut bodies, center_y);
        if !separated {
            tracing::debug!(
                "Layout of {} points ended with residual overlap",
                bodies.len()
            );
        }

        let overflow = bodies
            .iter()
            .filter(|b| b.y < 0.0 || b.y > canvas_height)
            .count();
        if overflow > 0 {
            tracing::debug!(
                "{} of {} points fall outside the row height {}",
                overflow,
                bodies.len(),
                canvas_height
            );
        }

        records
            .iter()
            .copied()
            .zip(bodies)
            .map(|(record, body)| LayoutPoint {
                record,
                x: body.x,
                y: body.y,
            })
            .collect()
    }

    /// Run the fixed tick budget; returns whether the final state is separated
    fn relax(&self, bodies: &mut [Body], center_y: f64) -> bool {
        let cfg = &self.config;
        let keep = 1.0 - cfg.velocity_decay;
        let mut alpha = cfg.alpha_start;

        for _ in 0..cfg.iterations {
            alpha += (cfg.alpha_target - alpha) * cfg.alpha_decay;

            for body in bodies.iter_mut() {
                body.vx += (body.tx - body.x) * cfg.x_strength * alpha;
                body.vy += (center_y - body.y) * cfg.y_strength * alpha;
                body.vx *= keep;
                body.vy *= keep;
                body.x += body.vx;
                body.y += body.vy;
            }

            separate(bodies, cfg.min_separation, cfg.collision_sweeps);
        }

        !has_overlap(bodies, cfg.min_separation)
    }
}

/// Push overlapping pairs apart; stops early once a sweep finds no overlap
fn separate(bodies: &mut [Body], min_separation: f64, max_sweeps: usize) {
    if min_separation <= 0.0 || bodies.len() < 2 {
        return;
    }
    let threshold = min_separation - SLACK;
    let threshold_sq = threshold * threshold;

    for _ in 0..max_sweeps {
        let mut overlaps = 0usize;

        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];

            for b in tail.iter_mut() {
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= threshold_sq {
                    continue;
                }

                let dist = dist_sq.sqrt();
                let (ux, uy) = if dist > 1e-12 {
                    (dx / dist, dy / dist)
                } else {
                    (0.0, 1.0)
                };
                let push = (min_separation - dist) / 2.0;
                a.nudge(-ux * push, -uy * push);
                b.nudge(ux * push, uy * push);
                overlaps += 1;
            }
        }

        if overlaps == 0 {
            return;
        }
    }
}

fn has_overlap(bodies: &[Body], min_separation: f64) -> bool {
    if min_separation <= 0.0 {
        return false;
    }
    let threshold = min_separation - SLACK;
    let threshold_sq = threshold * threshold;

    bodies.iter().enumerate().any(|(i, a)| {
        bodies[i + 1..].iter().any(|b| {
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            dx * dx + dy * dy < threshold_sq
        })
    })
}
