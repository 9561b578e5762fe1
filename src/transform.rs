//! Parsing and application of `transform` attribute lists.
//!
//! A transform list like `translate(10,0) scale(2)` is an ordered
//! sequence of named affine operations. Syntactically later entries act
//! on the coordinates first: when mapping a point, the records are
//! walked in reverse order, which is equivalent to pre-multiplying the
//! accumulated matrix in syntactic order.

use log::trace;

use crate::{BezierPaths, Curve, Point};

/// The supported transform functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    Matrix,
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

/// One parsed entry of a transform list.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub op: TransformOp,
    pub args: Vec<f64>,
}

impl Transform {
    /// Missing trailing arguments read as zero.
    fn arg(&self, index: usize) -> f64 {
        self.args.get(index).copied().unwrap_or(0.0)
    }

    /// Map a single point through this transform.
    pub fn apply_point(&self, point: Point) -> Point {
        match self.op {
            TransformOp::Matrix => {
                let (a, b, c, d, e, f) = (
                    self.arg(0),
                    self.arg(1),
                    self.arg(2),
                    self.arg(3),
                    self.arg(4),
                    self.arg(5),
                );
                Point::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
            }
            TransformOp::Translate => Point::new(point.x + self.arg(0), point.y + self.arg(1)),
            TransformOp::Scale => {
                let sx = self.arg(0);
                let sy = self.args.get(1).copied().unwrap_or(sx);
                Point::new(point.x * sx, point.y * sy)
            }
            TransformOp::Rotate => {
                let angle = self.arg(0).to_radians();
                let about = Point::new(self.arg(1), self.arg(2));
                let (sin, cos) = angle.sin_cos();
                Point::new(
                    cos * (point.x - about.x) - sin * (point.y - about.y) + about.x,
                    sin * (point.x - about.x) + cos * (point.y - about.y) + about.y,
                )
            }
            TransformOp::SkewX => {
                let factor = self.arg(0).to_radians().tan();
                Point::new(point.x + factor * point.y, point.y)
            }
            TransformOp::SkewY => {
                let factor = self.arg(0).to_radians().tan();
                Point::new(point.x, point.y + factor * point.x)
            }
        }
    }

    /// Map all four slots of a curve. Absent control points stay absent.
    fn apply_curve(&self, curve: Curve) -> Curve {
        Curve {
            from: self.apply_point(curve.from),
            ctrl1: curve.ctrl1.map(|p| self.apply_point(p)),
            ctrl2: curve.ctrl2.map(|p| self.apply_point(p)),
            to: self.apply_point(curve.to),
        }
    }
}

/// Parse a `transform` attribute value into an ordered list.
///
/// Unsupported function names and malformed entries are dropped, they
/// never abort the conversion.
pub fn parse_transform_list(attribute: &str) -> Vec<Transform> {
    trace!("parse_transform_list: {:?}", attribute);
    let normalized = attribute.replace(',', " ").to_ascii_lowercase();

    let mut transforms = Vec::new();
    for entry in normalized.split(')') {
        let mut pieces = entry.split('(');
        let (name, raw_args) = match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(name), Some(args), None) => (name.trim(), args.trim()),
            _ => continue,
        };
        let op = match name {
            "matrix" => TransformOp::Matrix,
            "translate" => TransformOp::Translate,
            "scale" => TransformOp::Scale,
            "rotate" => TransformOp::Rotate,
            "skewx" => TransformOp::SkewX,
            "skewy" => TransformOp::SkewY,
            _ => {
                trace!("parse_transform_list: dropping {:?}", name);
                continue;
            }
        };
        let args = raw_args
            .split_whitespace()
            .map(|arg| arg.parse().unwrap_or(0.0))
            .collect();
        transforms.push(Transform { op, args });
    }

    transforms
}

/// Apply a transform list to every curve of every path.
///
/// Records act in reverse syntactic order, so `translate(10,0) scale(2)`
/// scales first and translates the scaled result.
pub fn apply_transforms(paths: BezierPaths, transforms: &[Transform]) -> BezierPaths {
    if transforms.is_empty() {
        return paths;
    }
    trace!("apply_transforms: {} records", transforms.len());

    paths
        .into_iter()
        .map(|path| {
            path.into_iter()
                .map(|curve| {
                    transforms
                        .iter()
                        .rev()
                        .fold(curve, |current, transform| transform.apply_curve(current))
                })
                .collect()
        })
        .collect()
}
