//! Circular progress widget - background track, animated progress arc and an
//! optional centered label.
//!
//! All mutation happens on the UI thread: configuration setters compare
//! old/new values (re-setting the current value is a no-op), and every
//! effective visual change bumps a monotonic revision counter so callers and
//! tests can detect redraw-triggering mutations cheaply.

use eframe::egui::text::LayoutJob;
use eframe::egui::{self, Align, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};
use log::{debug, trace};

use super::animation::{Completion, ProgressAnimation};
use super::geometry::{RingGeometry, arc_points};

const DEFAULT_STROKE_WIDTH: f32 = 10.0;
const DEFAULT_SIZE: f32 = 200.0;
const DEFAULT_LABEL_FONT_SIZE: f32 = 15.0;
// Black at ~40% alpha
const DEFAULT_TRACK_COLOR: Color32 = Color32::from_black_alpha(103);

/// Circular progress indicator.
///
/// The stored progress is always the *currently rendered* stroke fraction:
/// while an animated transition is in flight, [`CircularProgress::progress`]
/// returns the interpolated value, and the clamped target is committed only
/// at settlement.
pub struct CircularProgress {
    /// Rendered stroke fraction, clamped to 0.0..=1.0 on every write.
    value: f32,
    desired_size: Vec2,
    track_color: Color32,
    track_width: f32,
    progress_color: Color32,
    progress_width: f32,
    label_text: Option<String>,
    /// Styled label; wins over `label_text` when both are set.
    label_job: Option<LayoutJob>,
    label_color: Color32,
    label_font: FontId,
    /// Monotonic counter of effective visual mutations.
    revision: u64,
    animation: Option<ProgressAnimation>,
    /// Geometry cache keyed by (bounds, progress stroke width) - geometry is
    /// only recomputed when the bounds or the stroke width change, not on
    /// every configuration write.
    cached_geometry: Option<(Rect, f32, RingGeometry)>,
}

impl Default for CircularProgress {
    fn default() -> Self {
        Self {
            value: 0.0,
            desired_size: Vec2::splat(DEFAULT_SIZE),
            track_color: DEFAULT_TRACK_COLOR,
            track_width: DEFAULT_STROKE_WIDTH,
            progress_color: Color32::BLACK,
            progress_width: DEFAULT_STROKE_WIDTH,
            label_text: None,
            label_job: None,
            label_color: Color32::BLACK,
            label_font: FontId::proportional(DEFAULT_LABEL_FONT_SIZE),
            revision: 0,
            animation: None,
            cached_geometry: None,
        }
    }
}

impl CircularProgress {
    /// Create a widget with default visuals and zero progress.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Progress value ====================

    /// Currently rendered stroke fraction (0.0..=1.0).
    pub fn progress(&self) -> f32 {
        self.value
    }

    /// Set the progress immediately. Out-of-range values are silently pinned
    /// to the nearest bound. Cancels any in-flight animated transition (its
    /// completion callback is dropped).
    pub fn set_progress(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        if self.animation.take().is_some() {
            debug!("in-flight progress animation replaced by direct set");
        }
        if self.value == value {
            return;
        }
        self.value = value;
        self.bump();
    }

    /// Animate the rendered fraction from its current value to `target`
    /// (clamped) over `duration_secs`. Non-blocking; the transition advances
    /// on each [`CircularProgress::render`] / [`CircularProgress::tick`].
    pub fn animate_to(&mut self, target: f32, duration_secs: f64) {
        self.start_animation(target, duration_secs, None);
    }

    /// Like [`CircularProgress::animate_to`], invoking `on_complete` exactly
    /// once when the transition settles - never before. A zero (or negative)
    /// duration applies the target immediately and still fires the callback.
    pub fn animate_to_then(
        &mut self,
        target: f32,
        duration_secs: f64,
        on_complete: impl FnOnce() + 'static,
    ) {
        self.start_animation(target, duration_secs, Some(Box::new(on_complete)));
    }

    /// Convenience: animate from the current fraction to full (1.0).
    pub fn run_animation(&mut self, duration_secs: f64) {
        self.start_animation(1.0, duration_secs, None);
    }

    /// Convenience: animate to full with a completion callback.
    pub fn run_animation_then(&mut self, duration_secs: f64, on_complete: impl FnOnce() + 'static) {
        self.start_animation(1.0, duration_secs, Some(Box::new(on_complete)));
    }

    /// Whether an animated transition is currently in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn start_animation(&mut self, target: f32, duration_secs: f64, on_complete: Option<Completion>) {
        let target = target.clamp(0.0, 1.0);
        if self.animation.take().is_some() {
            // Replace semantics: the superseded transition never completes
            debug!("in-flight progress animation replaced");
        }

        if duration_secs <= 0.0 {
            if self.value != target {
                self.value = target;
                self.bump();
            }
            if let Some(on_complete) = on_complete {
                on_complete();
            }
            return;
        }

        debug!(
            "animating progress {:.3} -> {:.3} over {}s",
            self.value, target, duration_secs
        );
        self.animation = Some(ProgressAnimation::new(
            self.value,
            target,
            duration_secs,
            on_complete,
        ));
    }

    /// Advance the animation clock to `now_secs` (seconds, same origin as
    /// `ui.input(|i| i.time)`). Called by [`CircularProgress::render`]; public
    /// so the animation contract is verifiable without a UI.
    pub fn tick(&mut self, now_secs: f64) {
        let Some(mut animation) = self.animation.take() else {
            return;
        };
        let (value, settled) = animation.sample(now_secs);
        if self.value != value {
            self.value = value;
            self.bump();
        }
        if settled {
            debug!("progress animation settled at {:.3}", self.value);
            if let Some(on_complete) = animation.take_completion() {
                on_complete();
            }
        } else {
            self.animation = Some(animation);
        }
    }

    // ==================== Visual configuration ====================

    /// Set the widget's desired size (the bounds the ring is inscribed in).
    pub fn set_desired_size(&mut self, size: Vec2) {
        if self.desired_size == size {
            return;
        }
        self.desired_size = size;
        self.bump();
    }

    /// Set the background track color.
    pub fn set_track_color(&mut self, color: Color32) {
        if self.track_color == color {
            return;
        }
        self.track_color = color;
        self.bump();
    }

    /// Set the background track stroke width.
    pub fn set_track_width(&mut self, width: f32) {
        if self.track_width == width {
            return;
        }
        self.track_width = width;
        self.bump();
    }

    /// Set the progress arc color.
    pub fn set_progress_color(&mut self, color: Color32) {
        if self.progress_color == color {
            return;
        }
        self.progress_color = color;
        self.bump();
    }

    /// Set the progress arc stroke width (also the arc inset).
    pub fn set_progress_width(&mut self, width: f32) {
        if self.progress_width == width {
            return;
        }
        self.progress_width = width;
        self.bump();
    }

    /// Set the plain label text, wrapped and centered inside the ring.
    pub fn set_label_text(&mut self, text: impl Into<String>) {
        let text = Some(text.into());
        if self.label_text == text {
            return;
        }
        self.label_text = text;
        self.bump();
    }

    /// Set a styled label (takes precedence over the plain text).
    pub fn set_label_job(&mut self, job: LayoutJob) {
        let job = Some(job);
        if self.label_job == job {
            return;
        }
        self.label_job = job;
        self.bump();
    }

    /// Remove both plain and styled label content.
    pub fn clear_label(&mut self) {
        if self.label_text.is_none() && self.label_job.is_none() {
            return;
        }
        self.label_text = None;
        self.label_job = None;
        self.bump();
    }

    /// Set the plain label's text color.
    pub fn set_label_color(&mut self, color: Color32) {
        if self.label_color == color {
            return;
        }
        self.label_color = color;
        self.bump();
    }

    /// Set the plain label's font.
    pub fn set_label_font(&mut self, font: FontId) {
        if self.label_font == font {
            return;
        }
        self.label_font = font;
        self.bump();
    }

    /// Monotonic counter of effective visual mutations; unchanged when a
    /// setter is called with the current value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
        trace!("visual revision -> {}", self.revision);
    }

    // ==================== Geometry ====================

    /// Geometry last computed by [`CircularProgress::render`], if any.
    pub fn last_geometry(&self) -> Option<RingGeometry> {
        self.cached_geometry.map(|(_, _, geometry)| geometry)
    }

    fn geometry(&mut self, rect: Rect) -> RingGeometry {
        match self.cached_geometry {
            Some((cached_rect, cached_width, geometry))
                if cached_rect == rect && cached_width == self.progress_width =>
            {
                geometry
            }
            _ => {
                let geometry = RingGeometry::from_rect(rect, self.progress_width);
                self.cached_geometry = Some((rect, self.progress_width, geometry));
                geometry
            }
        }
    }

    // ==================== Rendering ====================

    /// Render the widget: advance the animation clock, paint track, progress
    /// arc and label, and keep frames coming while a transition is in flight.
    pub fn render(&mut self, ui: &mut Ui) -> Response {
        self.tick(ui.input(|i| i.time));

        let (rect, response) = ui.allocate_exact_size(self.desired_size, Sense::hover());

        if ui.is_rect_visible(rect) {
            let geometry = self.geometry(rect);
            draw_track(ui.painter(), &geometry, self.track_color, self.track_width);
            draw_progress_arc(
                ui.painter(),
                &geometry,
                self.value,
                self.progress_color,
                self.progress_width,
            );
            if let Some(job) = self.label_job(geometry.label_side) {
                draw_center_label(ui, geometry.center, job, self.label_color);
            }
        }

        if self.is_animating() {
            ui.ctx().request_repaint();
        }

        response
    }

    /// Build the label layout job constrained to the inscribed square.
    fn label_job(&self, wrap_width: f32) -> Option<LayoutJob> {
        let mut job = if let Some(job) = &self.label_job {
            job.clone()
        } else if let Some(text) = &self.label_text {
            LayoutJob::simple(
                text.clone(),
                self.label_font.clone(),
                self.label_color,
                wrap_width,
            )
        } else {
            return None;
        };
        job.wrap.max_width = wrap_width;
        job.halign = Align::Center;
        Some(job)
    }
}

/// Draw the full-circle background track.
fn draw_track(painter: &egui::Painter, geometry: &RingGeometry, color: Color32, width: f32) {
    if width <= 0.0 || color == Color32::TRANSPARENT {
        return;
    }
    painter.circle_stroke(geometry.center, geometry.radius, Stroke::new(width, color));
}

/// Draw the progress arc: 12 o'clock start, clockwise winding, round caps.
fn draw_progress_arc(
    painter: &egui::Painter,
    geometry: &RingGeometry,
    fraction: f32,
    color: Color32,
    width: f32,
) {
    if width <= 0.0 || color == Color32::TRANSPARENT {
        return;
    }
    let points = arc_points(geometry.center, geometry.progress_radius, fraction);
    if points.len() < 2 {
        return;
    }

    // egui paths have no cap style; dots at both ends emulate round caps
    let first = points[0];
    let last = *points.last().unwrap_or(&first);
    painter.add(egui::Shape::line(points, Stroke::new(width, color)));
    painter.circle_filled(first, width / 2.0, color);
    painter.circle_filled(last, width / 2.0, color);
}

/// Lay out and paint the label centered on the ring center.
fn draw_center_label(ui: &Ui, center: Pos2, job: LayoutJob, fallback_color: Color32) {
    let galley = ui.fonts_mut(|fonts| fonts.layout_job(job));
    // halign is Center, so the x anchor is the center axis
    let pos = Pos2::new(center.x, center.y - galley.size().y / 2.0);
    ui.painter().galley(pos, galley, fallback_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let fired = Rc::new(Cell::new(0u32));
        let handle = Rc::clone(&fired);
        (fired, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn test_progress_is_clamped_on_write() {
        let mut ring = CircularProgress::new();
        ring.set_progress(0.42);
        assert_eq!(ring.progress(), 0.42);
        ring.set_progress(-3.0);
        assert_eq!(ring.progress(), 0.0);
        ring.set_progress(17.5);
        assert_eq!(ring.progress(), 1.0);
    }

    #[test]
    fn test_setters_are_idempotent() {
        let mut ring = CircularProgress::new();
        ring.set_track_color(Color32::RED);
        ring.set_progress_width(4.0);
        ring.set_label_text("loading");
        let revision = ring.revision();

        // Re-setting current values must not register as a visual change
        ring.set_track_color(Color32::RED);
        ring.set_progress_width(4.0);
        ring.set_label_text("loading");
        ring.set_progress(ring.progress());
        assert_eq!(ring.revision(), revision);

        ring.set_track_color(Color32::GREEN);
        assert_eq!(ring.revision(), revision + 1);
    }

    #[test]
    fn test_zero_duration_is_instantaneous() {
        let mut ring = CircularProgress::new();
        let (fired, on_complete) = counter();
        ring.animate_to_then(0.75, 0.0, on_complete);
        assert_eq!(ring.progress(), 0.75);
        assert_eq!(fired.get(), 1);
        assert!(!ring.is_animating());
    }

    #[test]
    fn test_animated_target_is_clamped_and_completes_once() {
        let mut ring = CircularProgress::new();
        let (fired, on_complete) = counter();
        ring.animate_to_then(1.5, 1.0, on_complete);

        ring.tick(10.0); // stamps the start
        assert_eq!(fired.get(), 0);
        ring.tick(10.5);
        assert!(ring.progress() > 0.0 && ring.progress() < 1.0);
        assert_eq!(fired.get(), 0, "completion must not fire before settlement");

        ring.tick(11.25);
        assert_eq!(ring.progress(), 1.0);
        assert_eq!(fired.get(), 1);
        assert!(!ring.is_animating());

        // Further ticks are no-ops
        ring.tick(12.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_run_animation_settles_at_full() {
        let mut ring = CircularProgress::new();
        ring.set_progress(0.2);
        ring.run_animation(2.0);
        ring.tick(0.0);
        assert_eq!(ring.progress(), 0.2);
        ring.tick(1.0);
        assert!((ring.progress() - 0.6).abs() < 1e-6);
        ring.tick(2.5);
        assert_eq!(ring.progress(), 1.0);
    }

    #[test]
    fn test_new_transition_replaces_in_flight_one() {
        let mut ring = CircularProgress::new();
        let (first_fired, first) = counter();
        let (second_fired, second) = counter();

        ring.animate_to_then(1.0, 1.0, first);
        ring.tick(0.0);
        ring.tick(0.5);

        // Replace semantics: the superseded callback is dropped
        ring.animate_to_then(0.0, 1.0, second);
        ring.tick(0.6);
        ring.tick(2.0);
        assert_eq!(first_fired.get(), 0);
        assert_eq!(second_fired.get(), 1);
        assert_eq!(ring.progress(), 0.0);
    }

    #[test]
    fn test_direct_set_cancels_animation() {
        let mut ring = CircularProgress::new();
        let (fired, on_complete) = counter();
        ring.animate_to_then(1.0, 5.0, on_complete);
        ring.tick(0.0);
        ring.set_progress(0.3);
        assert!(!ring.is_animating());
        assert_eq!(ring.progress(), 0.3);
        ring.tick(10.0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_geometry_cache_tracks_bounds_and_stroke() {
        let mut ring = CircularProgress::new();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(200.0, 100.0));
        let geometry = ring.geometry(rect);
        assert!((geometry.radius - 100.0 / 2.2).abs() < 1e-4);
        assert!((geometry.progress_radius - (100.0 / 2.2 - 10.0)).abs() < 1e-4);
        assert_eq!(ring.last_geometry(), Some(geometry));

        // Same bounds, same stroke: cache hit
        assert_eq!(ring.geometry(rect), geometry);

        // Stroke width change invalidates the cached inset radius
        ring.set_progress_width(20.0);
        let updated = ring.geometry(rect);
        assert!((updated.progress_radius - (100.0 / 2.2 - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_label_job_prefers_styled_text() {
        let mut ring = CircularProgress::new();
        ring.set_label_text("plain");
        let mut styled = LayoutJob::default();
        styled.append("styled", 0.0, Default::default());
        ring.set_label_job(styled);

        let job = ring.label_job(100.0).unwrap();
        assert_eq!(job.text, "styled");
        assert_eq!(job.wrap.max_width, 100.0);

        ring.clear_label();
        assert!(ring.label_job(100.0).is_none());
    }
}
