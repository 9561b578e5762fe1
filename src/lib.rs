//! Convert SVG shapes and path data to collections of cubic Bézier curves.
//!
//! The output is a "Bézier data format" that can be consumed directly by
//! font-outline editors or any other Bézier rendering layer:
//!
//! - A [`Point`] is a simple x/y pair.
//! - A [`Curve`] has four slots: a start point, two optional control
//!   points and an end point. Straight lines carry no control points.
//! - A [`BezierPath`] is a list of curves where every curve starts at the
//!   end point of the previous one.
//! - [`BezierPaths`] is a list of paths. A new path begins at every
//!   `MoveTo` after content and whenever a `ClosePath` boundary is
//!   crossed.
//!
//! Path data is normalized before conversion: relative commands become
//! absolute, chained parameter groups are split, horizontal/vertical
//! lines and smooth shorthands are expanded, quadratic curves are
//! elevated to cubic ones and elliptical arcs are approximated by cubic
//! segments. Transforms on shapes and nested groups are composed and
//! applied to the resulting control points.
//!
//! Malformed geometric input never aborts a conversion, it degrades to a
//! reasonable geometric default. Only malformed XML is reported as an
//! [`Error`].
//!
//! **Note: Currently the path style is completely ignored. Only the
//! geometry itself is returned.**
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::single_match)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::convert;

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod arc;
mod error;
mod params;
mod path;
mod shapes;
mod transform;
mod tree;

pub use crate::error::Error;
pub use crate::path::convert_path_data;
pub use crate::shapes::{convert_circle_ellipse, convert_polygon_polyline, convert_rect};
pub use crate::transform::{apply_transforms, parse_transform_list, Transform, TransformOp};

/// A `Point` consists of an x and y coordinate.
#[derive(Debug, PartialEq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl convert::From<(f64, f64)> for Point {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

/// A single cubic Bézier curve segment.
///
/// The control points are either both present (a curve) or both `None`
/// (a straight line). The two constructors uphold that invariant; an
/// absent control point is never reinterpreted as a coordinate.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curve {
    pub from: Point,
    pub ctrl1: Option<Point>,
    pub ctrl2: Option<Point>,
    pub to: Point,
}

impl Curve {
    /// A straight line segment, without control points.
    pub fn line(from: Point, to: Point) -> Self {
        Self {
            from,
            ctrl1: None,
            ctrl2: None,
            to,
        }
    }

    /// A full cubic segment with both control points.
    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self {
            from,
            ctrl1: Some(ctrl1),
            ctrl2: Some(ctrl2),
            to,
        }
    }

    pub fn is_line(&self) -> bool {
        self.ctrl1.is_none() && self.ctrl2.is_none()
    }
}

/// A path is a vector of `Curve` segments with shared endpoints.
pub type BezierPath = Vec<Curve>;

/// A collection of paths, in document order.
pub type BezierPaths = Vec<BezierPath>;

/// A node of the parsed SVG document tree.
///
/// This is the input boundary of the crate: a tag name, an attribute map
/// and the child nodes. [`parse`] builds this tree from an XML string,
/// but a tree produced by any other markup parser works just as well
/// with [`convert_tree`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<Tag>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Recursively convert a tag and its children, threading the composed
/// ancestor transform chain through the recursion.
///
/// The chain is the root-first concatenation of all ancestor transform
/// lists plus the tag's own list. Applying it back to front transforms
/// every curve by the tag's own list first, then by the ancestors,
/// closest tag first.
fn convert_tags(tag: &Tag, inherited: &[Transform]) -> BezierPaths {
    let mut chain = inherited.to_vec();
    if let Some(list) = tag.attribute("transform") {
        chain.extend(transform::parse_transform_list(list));
    }

    let name = tag.name.to_ascii_lowercase();
    trace!("convert_tags: <{}>", name);
    let converted = match name.as_str() {
        "circle" | "ellipse" => shapes::convert_circle_ellipse(tag),
        "path" => path::convert_path_data(tag.attribute("d").unwrap_or("")),
        "polygon" | "polyline" => shapes::convert_polygon_polyline(tag),
        "rect" => shapes::convert_rect(tag),
        "svg" | "g" => {
            let mut result = BezierPaths::new();
            for child in &tag.children {
                result.extend(convert_tags(child, &chain));
            }
            return result;
        }
        _ => return BezierPaths::new(),
    };
    transform::apply_transforms(converted, &chain)
}

/// Convert a parsed SVG document tree into Bézier paths.
pub fn convert_tree(root: &Tag) -> BezierPaths {
    trace!("convert_tree");
    convert_tags(root, &[])
}

/// Parse an SVG string into a collection of Bézier paths.
pub fn parse(svg: &str) -> Result<BezierPaths, Error> {
    trace!("parse");
    let document = tree::parse_document(svg)?;
    let paths = convert_tree(&document);
    trace!("parse: This results in {} paths", paths.len());
    Ok(paths)
}
