//! Converters for the simple closed-form shape tags: circles, ellipses,
//! rectangles, polygons and polylines. These do not go through the path
//! command pipeline; their geometry is written out directly.

use log::trace;

use crate::params::{chunk_and_validate_parameters, sanitize_parameter_data};
use crate::{BezierPath, BezierPaths, Curve, Point, Tag};

/// Handle distance from the bounding box edge, as a fraction of the
/// radius, for the four-point oval construction.
const OVAL_HANDLE_FACTOR: f64 = 0.448;

/// Numeric attribute lookup. Unparseable values read as absent.
fn attr_number(tag: &Tag, name: &str) -> Option<f64> {
    tag.attribute(name).and_then(|v| v.trim().parse().ok())
}

/// Resolve an `rx`/`ry` attribute pair: one missing radius borrows the
/// other's value, both missing become zero.
fn resolve_radii(rx: Option<f64>, ry: Option<f64>) -> (f64, f64) {
    match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (None, None) => (0.0, 0.0),
    }
}

/// Convert a `<circle>` or `<ellipse>` tag.
pub fn convert_circle_ellipse(tag: &Tag) -> BezierPaths {
    trace!("convert_circle_ellipse");
    let cx = attr_number(tag, "cx").unwrap_or(0.0);
    let cy = attr_number(tag, "cy").unwrap_or(0.0);

    let (rx, ry) = if tag.name.eq_ignore_ascii_case("circle") {
        let r = attr_number(tag, "r").unwrap_or(0.0);
        (r, r)
    } else {
        resolve_radii(attr_number(tag, "rx"), attr_number(tag, "ry"))
    };

    vec![oval_path(cx, cy, rx, ry)]
}

/// Four cubic segments tracing an axis-aligned oval, one per quadrant.
///
/// The on-curve points sit at the extremes; each control point sits at
/// `OVAL_HANDLE_FACTOR` times the radius in from the bounding box edge.
fn oval_path(cx: f64, cy: f64, rx: f64, ry: f64) -> BezierPath {
    let left = cx - rx;
    let right = cx + rx;
    let top = cy + ry;
    let bottom = cy - ry;
    let handle_dx = rx * OVAL_HANDLE_FACTOR;
    let handle_dy = ry * OVAL_HANDLE_FACTOR;

    let p_top = Point::new(cx, top);
    let p_right = Point::new(right, cy);
    let p_bottom = Point::new(cx, bottom);
    let p_left = Point::new(left, cy);

    vec![
        Curve::cubic(
            p_top,
            Point::new(right - handle_dx, top),
            Point::new(right, top - handle_dy),
            p_right,
        ),
        Curve::cubic(
            p_right,
            Point::new(right, bottom + handle_dy),
            Point::new(right - handle_dx, bottom),
            p_bottom,
        ),
        Curve::cubic(
            p_bottom,
            Point::new(left + handle_dx, bottom),
            Point::new(left, bottom + handle_dy),
            p_left,
        ),
        Curve::cubic(
            p_left,
            Point::new(left, top - handle_dy),
            Point::new(left + handle_dx, top),
            p_top,
        ),
    ]
}

/// Convert a `<rect>` tag, with or without rounded corners.
pub fn convert_rect(tag: &Tag) -> BezierPaths {
    trace!("convert_rect");
    let x = attr_number(tag, "x").unwrap_or(0.0);
    let y = attr_number(tag, "y").unwrap_or(0.0);
    let w = attr_number(tag, "width").unwrap_or(0.0);
    let h = attr_number(tag, "height").unwrap_or(0.0);
    let right = x + w;
    let bottom = y + h;

    let (rx, ry) = resolve_radii(attr_number(tag, "rx"), attr_number(tag, "ry"));
    let rx = rx.min(w / 2.0);
    let ry = ry.min(h / 2.0);

    if rx <= 0.0 && ry <= 0.0 {
        // Square corners
        let upper_left = Point::new(x, y);
        let upper_right = Point::new(right, y);
        let lower_right = Point::new(right, bottom);
        let lower_left = Point::new(x, bottom);
        return vec![vec![
            Curve::line(upper_left, upper_right),
            Curve::line(upper_right, lower_right),
            Curve::line(lower_right, lower_left),
            Curve::line(lower_left, upper_left),
        ]];
    }

    // Rounded corners: four straight edges and four quarter-turn curves
    let handle_dx = rx * OVAL_HANDLE_FACTOR;
    let handle_dy = ry * OVAL_HANDLE_FACTOR;

    let left_x_start = x + rx;
    let right_x_start = right - rx;
    let top_y_start = y + ry;
    let bottom_y_start = bottom - ry;

    let left_x_handle = x + handle_dx;
    let right_x_handle = right - handle_dx;
    let top_y_handle = y + handle_dy;
    let bottom_y_handle = bottom - handle_dy;

    vec![vec![
        Curve::line(Point::new(left_x_start, y), Point::new(right_x_start, y)),
        Curve::cubic(
            Point::new(right_x_start, y),
            Point::new(right_x_handle, y),
            Point::new(right, top_y_handle),
            Point::new(right, top_y_start),
        ),
        Curve::line(Point::new(right, top_y_start), Point::new(right, bottom_y_start)),
        Curve::cubic(
            Point::new(right, bottom_y_start),
            Point::new(right, bottom_y_handle),
            Point::new(right_x_handle, bottom),
            Point::new(right_x_start, bottom),
        ),
        Curve::line(Point::new(right_x_start, bottom), Point::new(left_x_start, bottom)),
        Curve::cubic(
            Point::new(left_x_start, bottom),
            Point::new(left_x_handle, bottom),
            Point::new(x, bottom_y_handle),
            Point::new(x, bottom_y_start),
        ),
        Curve::line(Point::new(x, bottom_y_start), Point::new(x, top_y_start)),
        Curve::cubic(
            Point::new(x, top_y_start),
            Point::new(x, top_y_handle),
            Point::new(left_x_handle, y),
            Point::new(left_x_start, y),
        ),
    ]]
}

/// Convert a `<polygon>` or `<polyline>` tag.
///
/// Consecutive coordinate pairs become straight segments. Polygons are
/// closed back to the first point by default, polylines are not.
pub fn convert_polygon_polyline(tag: &Tag) -> BezierPaths {
    trace!("convert_polygon_polyline");
    let initial_data = tag.attribute("points").unwrap_or("");
    let data = chunk_and_validate_parameters(&sanitize_parameter_data(initial_data));

    let mut path = BezierPath::new();
    if data.len() >= 4 {
        let first = Point::new(data[0], data[1]);
        let mut previous = first;
        for pair in data[2..].chunks(2) {
            // An odd trailing coordinate reads as zero
            let next = Point::new(pair[0], pair.get(1).copied().unwrap_or(0.0));
            path.push(Curve::line(previous, next));
            previous = next;
        }

        if tag.name.eq_ignore_ascii_case("polygon") && previous != first {
            path.push(Curve::line(previous, first));
        }
    }

    if path.is_empty() {
        BezierPaths::new()
    } else {
        vec![path]
    }
}
