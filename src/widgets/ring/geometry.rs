//! Derived arc geometry - nothing here is stored by the widget between
//! bounds changes, it is all recomputed from the allocated rect.

use eframe::egui::{Pos2, Rect, Vec2};

// Max segments for a full-circle sweep; partial sweeps use proportionally
// fewer. 96 keeps the arc smooth at the default widget size.
const FULL_CIRCLE_SEGMENTS: f32 = 96.0;

/// Geometry of the ring inscribed in a widget rect.
///
/// The nominal radius is `min(w, h) / 2.2`,
/// which leaves a small margin around the track; the progress arc is inset by
/// its own stroke width so the painted ring never clips the bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    /// Shared center of track and progress arcs.
    pub center: Pos2,
    /// Nominal radius: `min(width, height) / 2.2`.
    pub radius: f32,
    /// Progress arc radius: nominal radius minus the progress stroke width.
    pub progress_radius: f32,
    /// Side of the largest square inscribable in the circle
    /// (`radius * sqrt(2)`) - the label's wrapping box.
    pub label_side: f32,
}

impl RingGeometry {
    /// Compute geometry for the given bounds and progress stroke width.
    pub fn from_rect(rect: Rect, progress_stroke_width: f32) -> Self {
        let shortest = rect.width().min(rect.height());
        let radius = shortest / 2.2;
        Self {
            center: rect.center(),
            radius,
            progress_radius: radius - progress_stroke_width,
            label_side: radius * std::f32::consts::SQRT_2,
        }
    }
}

/// Tessellate the drawn portion of the progress arc into painter points.
///
/// The arc starts at 12 o'clock (-90 degrees, where 0 is 3 o'clock) and winds
/// clockwise in screen space; `fraction` of the full circle is drawn. Returns
/// an empty vec for a zero fraction (nothing to stroke).
pub fn arc_points(center: Pos2, radius: f32, fraction: f32) -> Vec<Pos2> {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let sweep = std::f32::consts::TAU * fraction;
    let segments = (FULL_CIRCLE_SEGMENTS * fraction).ceil().max(2.0) as usize;
    let start = -std::f32::consts::FRAC_PI_2;

    (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f32 / segments as f32);
            center + radius * Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}
