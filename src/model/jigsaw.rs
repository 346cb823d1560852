//! Interlocking connector outlines for linked reservation/intervention pairs.
//!
//! Both generators build the same four-curve neck→knob→neck profile from one
//! shared constant set; the male tab protrudes from the reservation's bottom
//! edge and the female notch is carved into the intervention's top edge at
//! the mirrored position, so the two bars weld together at the handover
//! point. Purely decorative: hit-testing and filtering never look at these.

use egui::{pos2, Pos2};

/// How far the linked intervention slides left under the reservation tail.
pub const LINK_OVERLAP_PX: f32 = 18.0;

/// How far the tab protrudes below the seam.
pub const TAB_DEPTH_PX: f32 = 9.0;

/// Half-width of the narrow waist where the tab meets the seam.
pub const NECK_HALF_WIDTH_PX: f32 = 4.0;

/// Half-width of the round bulb. Must stay below `LINK_OVERLAP_PX / 2` so the
/// tab fits inside the overlap zone.
pub const KNOB_HALF_WIDTH_PX: f32 = 7.5;

/// Corner radius of reservation bars (male side keeps its rounded boundary).
pub const CORNER_RADIUS_PX: f32 = 5.0;

const CURVE_STEPS: usize = 8;
const ARC_STEPS: usize = 6;

fn cubic_into(out: &mut Vec<Pos2>, p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2) {
    for i in 1..=CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        let u = 1.0 - t;
        let x = u * u * u * p0.x + 3.0 * u * u * t * p1.x + 3.0 * u * t * t * p2.x + t * t * t * p3.x;
        let y = u * u * u * p0.y + 3.0 * u * u * t * p1.y + 3.0 * u * t * t * p2.y + t * t * t * p3.y;
        out.push(pos2(x, y));
    }
}

fn arc_into(out: &mut Vec<Pos2>, center: Pos2, radius: f32, from: f32, to: f32) {
    for i in 0..=ARC_STEPS {
        let a = from + (to - from) * i as f32 / ARC_STEPS as f32;
        out.push(pos2(center.x + radius * a.cos(), center.y + radius * a.sin()));
    }
}

/// The shared seam profile: left neck, bulb, right neck, sampled left to
/// right, protruding downward (+y) from `seam_y` around `cx`. The first and
/// last points sit exactly on the seam.
pub fn tab_profile(cx: f32, seam_y: f32) -> Vec<Pos2> {
    let n = NECK_HALF_WIDTH_PX;
    let k = KNOB_HALF_WIDTH_PX;
    let d = TAB_DEPTH_PX;

    let mut pts = vec![pos2(cx - n, seam_y)];
    cubic_into(
        &mut pts,
        pos2(cx - n, seam_y),
        pos2(cx - n, seam_y + d * 0.35),
        pos2(cx - k, seam_y + d * 0.20),
        pos2(cx - k, seam_y + d * 0.55),
    );
    cubic_into(
        &mut pts,
        pos2(cx - k, seam_y + d * 0.55),
        pos2(cx - k, seam_y + d * 0.85),
        pos2(cx - k * 0.45, seam_y + d),
        pos2(cx, seam_y + d),
    );
    cubic_into(
        &mut pts,
        pos2(cx, seam_y + d),
        pos2(cx + k * 0.45, seam_y + d),
        pos2(cx + k, seam_y + d * 0.85),
        pos2(cx + k, seam_y + d * 0.55),
    );
    cubic_into(
        &mut pts,
        pos2(cx + k, seam_y + d * 0.55),
        pos2(cx + k, seam_y + d * 0.20),
        pos2(cx + n, seam_y + d * 0.35),
        pos2(cx + n, seam_y),
    );
    pts
}

/// Outline of a linked reservation bar in bar-local coordinates (origin at
/// its top-left): a rounded rectangle with the tab protruding from the
/// bottom edge at the horizontal center of the overlap zone. Clockwise.
pub fn male_outline(width: f32, height: f32, overlap: f32) -> Vec<Pos2> {
    use std::f32::consts::PI;
    let r = CORNER_RADIUS_PX.min(width * 0.5).min(height * 0.5);
    let cx = width - overlap * 0.5;

    let mut pts = Vec::new();
    arc_into(&mut pts, pos2(r, r), r, PI, 1.5 * PI);
    arc_into(&mut pts, pos2(width - r, r), r, 1.5 * PI, 2.0 * PI);
    arc_into(&mut pts, pos2(width - r, height - r), r, 0.0, 0.5 * PI);
    let mut tab = tab_profile(cx, height);
    tab.reverse();
    pts.extend(tab);
    arc_into(&mut pts, pos2(r, height - r), r, 0.5 * PI, PI);
    pts
}

/// Outline of a linked intervention bar in bar-local coordinates: its
/// rectangle with the same profile carved inward from the top edge at
/// `overlap / 2` from its own left edge, the mirror of the male position:
/// this rectangle's origin sits `overlap` left of the reservation's right
/// edge. Clockwise.
pub fn female_outline(width: f32, height: f32, overlap: f32) -> Vec<Pos2> {
    let cx = overlap * 0.5;

    let mut pts = vec![pos2(0.0, 0.0)];
    pts.extend(tab_profile(cx, 0.0));
    pts.push(pos2(width, 0.0));
    pts.push(pos2(width, height));
    pts.push(pos2(0.0, height));
    pts
}
