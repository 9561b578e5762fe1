//! Elliptical arc to cubic Bézier approximation.
//!
//! Follows the endpoint-to-center conversion from the SVG implementation
//! notes (<https://www.w3.org/TR/SVG2/implnote.html#ArcConversionEndpointToCenter>):
//! recover the ellipse center and angular span from the two endpoints,
//! radii, rotation and flags, then split the span into slices of at most
//! a quarter turn and approximate each slice with one cubic segment.

use std::f64::consts::PI;

use log::trace;

use crate::Point;

/// One cubic segment of a converted arc. The start point is implied by
/// the previous segment (or the arc's start point).
#[derive(Debug, PartialEq)]
pub(crate) struct ArcSegment {
    pub(crate) ctrl1: Point,
    pub(crate) ctrl2: Point,
    pub(crate) to: Point,
}

/// Convert one elliptical arc into cubic segments.
///
/// The caller must ensure `rx`/`ry` are positive and `start != end`;
/// under those preconditions the result contains no NaN or infinite
/// coordinates. An empty result means the arc has no angular extent and
/// should be treated as a straight line by the caller.
pub(crate) fn arc_to_cubic_curves(
    start: Point,
    end: Point,
    mut rx: f64,
    mut ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Vec<ArcSegment> {
    let phi = x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: half-distance vector, rotated into the ellipse frame
    let dx2 = (start.x - end.x) / 2.0;
    let dy2 = (start.y - end.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Step 2: scale up radii that cannot span the endpoints
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
        trace!("arc_to_cubic_curves: radii scaled to {} {}", rx, ry);
    }

    // Step 3: center in the ellipse frame
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let num = rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2;
    let den = rx2 * y1p2 + ry2 * x1p2;
    let coef = if den == 0.0 {
        0.0
    } else {
        let sign = if large_arc == sweep { -1.0 } else { 1.0 };
        sign * (num / den).max(0.0).sqrt()
    };
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    // Step 4: center, start angle and angular span
    let cx = cos_phi * cxp - sin_phi * cyp + (start.x + end.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (start.y + end.y) / 2.0;
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let theta1 = vector_angle(1.0, 0.0, ux, uy);
    let mut delta_theta = vector_angle(ux, uy, vx, vy);
    if !sweep && delta_theta > 0.0 {
        delta_theta -= 2.0 * PI;
    } else if sweep && delta_theta < 0.0 {
        delta_theta += 2.0 * PI;
    }
    if delta_theta == 0.0 {
        return Vec::new();
    }

    // Slice the span into segments of at most a quarter turn
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let segment_count = (delta_theta.abs() / (PI / 2.0)).ceil().max(1.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    let delta = delta_theta / segment_count as f64;
    let tangent_factor = 4.0 / 3.0 * (delta / 4.0).tan();
    trace!(
        "arc_to_cubic_curves: span {} rad in {} segments",
        delta_theta,
        segment_count
    );

    let mut segments = Vec::with_capacity(segment_count);
    let mut theta = theta1;
    for _ in 0..segment_count {
        segments.push(unit_arc_segment(
            cx,
            cy,
            rx,
            ry,
            sin_phi,
            cos_phi,
            theta,
            theta + delta,
            tangent_factor,
        ));
        theta += delta;
    }
    if let Some(last) = segments.last_mut() {
        // Land exactly on the commanded endpoint
        last.to = end;
    }
    segments
}

/// Signed angle between two vectors.
fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let det = ux * vy - uy * vx;
    det.atan2(dot)
}

/// Cubic approximation of the slice between `theta1` and `theta2` on the
/// unit circle, mapped through the ellipse radii, rotation and center.
#[allow(clippy::too_many_arguments)]
fn unit_arc_segment(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
    theta1: f64,
    theta2: f64,
    tangent_factor: f64,
) -> ArcSegment {
    let (s1, c1) = theta1.sin_cos();
    let (s2, c2) = theta2.sin_cos();
    let k = tangent_factor;

    let map = |x: f64, y: f64| {
        let x = rx * x;
        let y = ry * y;
        Point::new(cx + cos_phi * x - sin_phi * y, cy + sin_phi * x + cos_phi * y)
    };

    ArcSegment {
        ctrl1: map(c1 - k * s1, s1 + k * c1),
        ctrl2: map(c2 + k * s2, s2 - k * c2),
        to: map(c2, s2),
    }
}
