//! The path command pipeline.
//!
//! A `d` attribute goes through several passes before it becomes Bézier
//! data: the raw string is chunked into commands, relative commands are
//! made absolute, chained parameter groups are split into one command
//! per primitive, horizontal/vertical lines and smooth shorthands are
//! expanded, quadratic curves are elevated to cubics and elliptical arcs
//! are approximated by cubic segments. After that, only absolute
//! `MoveTo`, `LineTo`, `CurveTo` and `ClosePath` commands remain and the
//! final walk assembles them into paths.
//!
//! The pass order matters: smooth resolution needs unchained absolute
//! commands and must see quadratics before they are elevated, and the
//! assembler relies on everything being canonical.

use std::mem;

use log::trace;

use crate::arc;
use crate::params::{chunk_and_validate_parameters, sanitize_parameter_data};
use crate::{BezierPath, BezierPaths, Curve, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CurveTo,
    SmoothCurveTo,
    Quadratic,
    SmoothQuadratic,
    EllipticalArc,
    ClosePath,
}

impl CommandKind {
    /// Number of parameters that make up one primitive of this kind.
    fn group_len(self) -> usize {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadratic => 2,
            CommandKind::HorizontalLineTo | CommandKind::VerticalLineTo => 1,
            CommandKind::CurveTo => 6,
            CommandKind::SmoothCurveTo | CommandKind::Quadratic => 4,
            CommandKind::EllipticalArc => 7,
            CommandKind::ClosePath => 0,
        }
    }
}

/// One path command: its kind, whether it is absolute, and the raw
/// parameter list (possibly several chained primitives before the chain
/// splitting pass has run).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PathCommand {
    pub(crate) kind: CommandKind,
    pub(crate) abs: bool,
    pub(crate) parameters: Vec<f64>,
}

impl PathCommand {
    fn new(kind: CommandKind, abs: bool, parameters: Vec<f64>) -> Self {
        Self {
            kind,
            abs,
            parameters,
        }
    }
}

fn command_from_letter(c: char) -> Option<(CommandKind, bool)> {
    let kind = match c.to_ascii_uppercase() {
        'M' => CommandKind::MoveTo,
        'L' => CommandKind::LineTo,
        'H' => CommandKind::HorizontalLineTo,
        'V' => CommandKind::VerticalLineTo,
        'C' => CommandKind::CurveTo,
        'S' => CommandKind::SmoothCurveTo,
        'Q' => CommandKind::Quadratic,
        'T' => CommandKind::SmoothQuadratic,
        'A' => CommandKind::EllipticalArc,
        'Z' => CommandKind::ClosePath,
        _ => return None,
    };
    Some((kind, c.is_ascii_uppercase()))
}

/// Split a path data string into command letter / parameter records.
///
/// Data before the first command letter is skipped. Data without any
/// command letter yields a single `ClosePath` (an empty path).
pub(crate) fn chunk_commands(d_attribute: &str) -> Vec<PathCommand> {
    trace!("chunk_commands");
    let data = sanitize_parameter_data(d_attribute);

    let mut result = Vec::new();
    let mut current: Option<(CommandKind, bool, usize)> = None;
    for (i, c) in data.char_indices() {
        if let Some((kind, abs)) = command_from_letter(c) {
            if let Some((prev_kind, prev_abs, span_start)) = current {
                result.push(PathCommand::new(
                    prev_kind,
                    prev_abs,
                    chunk_and_validate_parameters(&data[span_start..i]),
                ));
            }
            current = Some((kind, abs, i + c.len_utf8()));
        }
    }

    match current {
        // Fencepost: the final parameter span runs to the end of the string
        Some((kind, abs, span_start)) if span_start < data.len() => {
            result.push(PathCommand::new(
                kind,
                abs,
                chunk_and_validate_parameters(&data[span_start..]),
            ));
        }
        Some(_) => {}
        None => {
            trace!("chunk_commands: No valid commands found");
            result.push(PathCommand::new(CommandKind::ClosePath, true, Vec::new()));
        }
    }

    result
}

/// Where the pen ends up after a command, given where it started.
///
/// Handles chained parameters in both absolute and relative form.
/// Commands with too few parameters leave the cursor untouched.
fn end_point(cursor: Point, command: &PathCommand) -> Point {
    let p = &command.parameters;
    let mut out = cursor;
    if command.abs {
        match command.kind {
            CommandKind::ClosePath => {}
            CommandKind::HorizontalLineTo => {
                if let Some(&x) = p.last() {
                    out.x = x;
                }
            }
            CommandKind::VerticalLineTo => {
                if let Some(&y) = p.last() {
                    out.y = y;
                }
            }
            _ => {
                if p.len() >= 2 {
                    out.x = p[p.len() - 2];
                    out.y = p[p.len() - 1];
                }
            }
        }
    } else {
        match command.kind {
            CommandKind::ClosePath => {}
            CommandKind::HorizontalLineTo => {
                for &dx in p {
                    out.x += dx;
                }
            }
            CommandKind::VerticalLineTo => {
                for &dy in p {
                    out.y += dy;
                }
            }
            _ => {
                let group = command.kind.group_len();
                for g in p.chunks(group) {
                    if g.len() == group {
                        out.x += g[group - 2];
                        out.y += g[group - 1];
                    }
                }
            }
        }
    }
    out
}

/// Pass 1: convert every relative command to its absolute counterpart.
///
/// A running cursor is added to each positional parameter, group by
/// group. Arc radii, rotation and flags are copied unchanged; only the
/// arc endpoint is positional. Absolute commands pass through untouched,
/// so running this on an already absolute stream is a no-op.
pub(crate) fn absolutize(commands: Vec<PathCommand>) -> Vec<PathCommand> {
    trace!("absolutize: {} command chunks", commands.len());
    let mut result = Vec::with_capacity(commands.len());
    let mut cursor = Point::default();

    for command in commands {
        if command.abs {
            cursor = end_point(cursor, &command);
            result.push(command);
            continue;
        }

        let p = &command.parameters;
        let mut absolute = Vec::with_capacity(p.len());
        match command.kind {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadratic => {
                for pair in p.chunks(2) {
                    if pair.len() == 2 {
                        cursor.x += pair[0];
                        cursor.y += pair[1];
                        absolute.push(cursor.x);
                        absolute.push(cursor.y);
                    }
                }
            }
            CommandKind::HorizontalLineTo => {
                for &dx in p {
                    cursor.x += dx;
                    absolute.push(cursor.x);
                }
            }
            CommandKind::VerticalLineTo => {
                for &dy in p {
                    cursor.y += dy;
                    absolute.push(cursor.y);
                }
            }
            CommandKind::CurveTo => {
                for g in p.chunks(6) {
                    if g.len() == 6 {
                        absolute.push(g[0] + cursor.x);
                        absolute.push(g[1] + cursor.y);
                        absolute.push(g[2] + cursor.x);
                        absolute.push(g[3] + cursor.y);
                        cursor.x += g[4];
                        cursor.y += g[5];
                        absolute.push(cursor.x);
                        absolute.push(cursor.y);
                    }
                }
            }
            CommandKind::SmoothCurveTo | CommandKind::Quadratic => {
                for g in p.chunks(4) {
                    if g.len() == 4 {
                        absolute.push(g[0] + cursor.x);
                        absolute.push(g[1] + cursor.y);
                        cursor.x += g[2];
                        cursor.y += g[3];
                        absolute.push(cursor.x);
                        absolute.push(cursor.y);
                    }
                }
            }
            CommandKind::EllipticalArc => {
                for g in p.chunks(7) {
                    if g.len() == 7 {
                        absolute.extend_from_slice(&g[0..5]);
                        cursor.x += g[5];
                        cursor.y += g[6];
                        absolute.push(cursor.x);
                        absolute.push(cursor.y);
                    }
                }
            }
            CommandKind::ClosePath => {}
        }
        result.push(PathCommand::new(command.kind, true, absolute));
    }

    result
}

/// Pass 2: split chained parameter groups into one command per primitive.
///
/// Chained `MoveTo` pairs beyond the first become `LineTo` commands.
/// Incomplete trailing groups are dropped.
pub(crate) fn split_chains(commands: Vec<PathCommand>) -> Vec<PathCommand> {
    trace!("split_chains");
    let mut result = Vec::new();

    for command in commands {
        match command.kind {
            CommandKind::ClosePath => {
                result.push(PathCommand::new(CommandKind::ClosePath, true, Vec::new()));
            }
            CommandKind::MoveTo => {
                for (i, pair) in command.parameters.chunks(2).enumerate() {
                    if pair.len() == 2 {
                        let kind = if i == 0 {
                            CommandKind::MoveTo
                        } else {
                            CommandKind::LineTo
                        };
                        result.push(PathCommand::new(kind, command.abs, pair.to_vec()));
                    }
                }
            }
            kind => {
                let group = kind.group_len();
                for g in command.parameters.chunks(group) {
                    if g.len() == group {
                        result.push(PathCommand::new(kind, command.abs, g.to_vec()));
                    }
                }
            }
        }
    }

    result
}

/// Pass 3: expand `HorizontalLineTo` / `VerticalLineTo` into `LineTo`,
/// borrowing the cursor's other axis.
pub(crate) fn expand_axis_lines(commands: Vec<PathCommand>) -> Vec<PathCommand> {
    trace!("expand_axis_lines");
    let mut result = Vec::new();
    let mut cursor = Point::default();

    for command in commands {
        let next = end_point(cursor, &command);
        match command.kind {
            CommandKind::HorizontalLineTo => {
                for &x in &command.parameters {
                    result.push(PathCommand::new(CommandKind::LineTo, true, vec![x, cursor.y]));
                }
            }
            CommandKind::VerticalLineTo => {
                for &y in &command.parameters {
                    result.push(PathCommand::new(CommandKind::LineTo, true, vec![cursor.x, y]));
                }
            }
            _ => result.push(command),
        }
        cursor = next;
    }

    result
}

/// Pass 4: resolve smooth shorthands into explicit curves.
///
/// The implicit first control point is the reflection of the previous
/// emitted command's trailing control point through the current point.
/// Without a preceding curve, the reflection collapses onto the current
/// point. A smooth cubic may follow a quadratic and vice versa.
pub(crate) fn resolve_smooth(commands: Vec<PathCommand>) -> Vec<PathCommand> {
    trace!("resolve_smooth");
    let mut result: Vec<PathCommand> = Vec::new();
    let mut cursor = Point::default();

    for command in commands {
        let next = end_point(cursor, &command);
        match command.kind {
            CommandKind::SmoothCurveTo | CommandKind::SmoothQuadratic => {
                let previous_handle = match result.last() {
                    Some(prev) if prev.kind == CommandKind::CurveTo && prev.parameters.len() == 6 => {
                        Point::new(prev.parameters[2], prev.parameters[3])
                    }
                    Some(prev) if prev.kind == CommandKind::Quadratic && prev.parameters.len() == 4 => {
                        Point::new(prev.parameters[0], prev.parameters[1])
                    }
                    _ => cursor,
                };
                let reflected = Point::new(
                    2.0 * cursor.x - previous_handle.x,
                    2.0 * cursor.y - previous_handle.y,
                );

                let p = &command.parameters;
                if command.kind == CommandKind::SmoothCurveTo && p.len() == 4 {
                    result.push(PathCommand::new(
                        CommandKind::CurveTo,
                        true,
                        vec![reflected.x, reflected.y, p[0], p[1], p[2], p[3]],
                    ));
                } else if command.kind == CommandKind::SmoothQuadratic && p.len() == 2 {
                    result.push(PathCommand::new(
                        CommandKind::Quadratic,
                        true,
                        vec![reflected.x, reflected.y, p[0], p[1]],
                    ));
                }
            }
            _ => result.push(command),
        }
        cursor = next;
    }

    result
}

/// Pass 5: elevate quadratic curves to exact cubic form.
pub(crate) fn elevate_quadratics(commands: Vec<PathCommand>) -> Vec<PathCommand> {
    trace!("elevate_quadratics");
    let mut result = Vec::new();
    let mut cursor = Point::default();

    for command in commands {
        let next = end_point(cursor, &command);
        if command.kind == CommandKind::Quadratic && command.parameters.len() == 4 {
            let p = &command.parameters;
            let q1 = Point::new(p[0], p[1]);
            let to = Point::new(p[2], p[3]);
            let ctrl1 = Point::new(
                cursor.x + 2.0 / 3.0 * (q1.x - cursor.x),
                cursor.y + 2.0 / 3.0 * (q1.y - cursor.y),
            );
            let ctrl2 = Point::new(
                to.x + 2.0 / 3.0 * (q1.x - to.x),
                to.y + 2.0 / 3.0 * (q1.y - to.y),
            );
            result.push(PathCommand::new(
                CommandKind::CurveTo,
                true,
                vec![ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y],
            ));
        } else {
            result.push(command);
        }
        cursor = next;
    }

    result
}

/// Pass 6: approximate elliptical arcs with cubic curves.
///
/// Degenerate arcs collapse: a zero radius becomes a straight line, an
/// arc to the current point becomes nothing.
pub(crate) fn expand_arcs(commands: Vec<PathCommand>) -> Vec<PathCommand> {
    trace!("expand_arcs");
    let mut result = Vec::new();
    let mut cursor = Point::default();

    for command in commands {
        if command.kind == CommandKind::EllipticalArc && command.parameters.len() == 7 {
            let p = &command.parameters;
            let rx = p[0].abs();
            let ry = p[1].abs();
            let end = Point::new(p[5], p[6]);

            if cursor == end {
                // Zero-length arc
            } else if rx == 0.0 || ry == 0.0 {
                result.push(PathCommand::new(CommandKind::LineTo, true, vec![end.x, end.y]));
            } else {
                let segments = arc::arc_to_cubic_curves(
                    cursor,
                    end,
                    rx,
                    ry,
                    p[2],
                    p[3] != 0.0,
                    p[4] != 0.0,
                );
                if segments.is_empty() {
                    result.push(PathCommand::new(CommandKind::LineTo, true, vec![end.x, end.y]));
                } else {
                    for segment in segments {
                        result.push(PathCommand::new(
                            CommandKind::CurveTo,
                            true,
                            vec![
                                segment.ctrl1.x,
                                segment.ctrl1.y,
                                segment.ctrl2.x,
                                segment.ctrl2.y,
                                segment.to.x,
                                segment.to.y,
                            ],
                        ));
                    }
                }
            }
            cursor = end;
        } else {
            cursor = end_point(cursor, &command);
            result.push(command);
        }
    }

    result
}

/// Buffer for the path currently being assembled.
#[derive(Debug, Default)]
struct CurrentPath {
    path: BezierPath,
}

impl CurrentPath {
    fn add(&mut self, curve: Curve) {
        self.path.push(curve);
    }

    /// A path without any segments is not worth emitting.
    fn is_valid(&self) -> bool {
        !self.path.is_empty()
    }

    /// Replace the internal path with a new instance and return the
    /// previously stored path.
    fn finish(&mut self) -> BezierPath {
        let mut tmp = BezierPath::new();
        mem::swap(&mut self.path, &mut tmp);
        tmp
    }
}

/// Final walk over the canonical command stream.
///
/// Only absolute `MoveTo`, `LineTo`, `CurveTo` and `ClosePath` commands
/// are expected at this point. `MoveTo` relocates the cursor and starts
/// a new path if the current one has content; a stream that ends without
/// `ClosePath` still emits the in-progress path.
pub(crate) fn assemble(commands: &[PathCommand]) -> BezierPaths {
    trace!("assemble: {} commands", commands.len());
    let mut paths = BezierPaths::new();
    let mut current = CurrentPath::default();
    let mut cursor = Point::default();

    for command in commands {
        let p = &command.parameters;
        match command.kind {
            CommandKind::MoveTo if p.len() >= 2 => {
                if current.is_valid() {
                    paths.push(current.finish());
                }
                cursor = Point::new(p[0], p[1]);
            }
            CommandKind::LineTo if p.len() >= 2 => {
                let to = Point::new(p[0], p[1]);
                current.add(Curve::line(cursor, to));
                cursor = to;
            }
            CommandKind::CurveTo if p.len() >= 6 => {
                let to = Point::new(p[4], p[5]);
                current.add(Curve::cubic(
                    cursor,
                    Point::new(p[0], p[1]),
                    Point::new(p[2], p[3]),
                    to,
                ));
                cursor = to;
            }
            CommandKind::ClosePath => {
                if current.is_valid() {
                    paths.push(current.finish());
                }
            }
            _ => {}
        }
    }

    // No close command, but end of data
    if current.is_valid() {
        paths.push(current.finish());
    }

    paths
}

/// Convert the contents of a path `d` attribute into Bézier paths.
///
/// An empty or single character string yields an empty collection.
pub fn convert_path_data(d_attribute: &str) -> BezierPaths {
    trace!("convert_path_data: {:?}", d_attribute);
    if d_attribute.len() <= 1 {
        return BezierPaths::new();
    }

    let commands = chunk_commands(d_attribute);
    let commands = absolutize(commands);
    let commands = split_chains(commands);
    let commands = expand_axis_lines(commands);
    let commands = resolve_smooth(commands);
    let commands = elevate_quadratics(commands);
    let commands = expand_arcs(commands);
    assemble(&commands)
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;

    fn cmd(kind: CommandKind, abs: bool, parameters: &[f64]) -> PathCommand {
        PathCommand::new(kind, abs, parameters.to_vec())
    }

    #[test]
    fn test_chunk_commands_basic() {
        let commands = chunk_commands("M 0 0 L 10 10");
        assert_eq!(
            commands,
            vec![
                cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
                cmd(CommandKind::LineTo, true, &[10.0, 10.0]),
            ]
        );
    }

    #[test]
    fn test_chunk_commands_relative_flag() {
        let commands = chunk_commands("m 1 2 l 3 4 Z");
        assert_eq!(commands.len(), 2);
        assert!(!commands[0].abs);
        assert_eq!(commands[0].kind, CommandKind::MoveTo);
        assert!(!commands[1].abs);
    }

    #[test]
    fn test_chunk_commands_no_letters() {
        let commands = chunk_commands("10 20 30");
        assert_eq!(commands, vec![cmd(CommandKind::ClosePath, true, &[])]);
    }

    #[test]
    fn test_chunk_commands_data_before_first_letter() {
        let commands = chunk_commands("1 2 M 3 4");
        assert_eq!(commands, vec![cmd(CommandKind::MoveTo, true, &[3.0, 4.0])]);
    }

    #[test]
    fn test_absolutize_is_noop_on_absolute_stream() {
        let commands = vec![
            cmd(CommandKind::MoveTo, true, &[1.0, 2.0]),
            cmd(CommandKind::CurveTo, true, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]),
            cmd(CommandKind::LineTo, true, &[5.0, 5.0]),
        ];
        assert_eq!(absolutize(commands.clone()), commands);
    }

    #[test]
    fn test_absolutize_relative_lines() {
        let commands = chunk_commands("m 10 10 l 5 0 v 2 h -3");
        let commands = absolutize(commands);
        assert_eq!(
            commands,
            vec![
                cmd(CommandKind::MoveTo, true, &[10.0, 10.0]),
                cmd(CommandKind::LineTo, true, &[15.0, 10.0]),
                cmd(CommandKind::VerticalLineTo, true, &[12.0]),
                cmd(CommandKind::HorizontalLineTo, true, &[12.0]),
            ]
        );
    }

    #[test]
    fn test_absolutize_relative_chain_advances_cursor_per_pair() {
        let commands = absolutize(vec![cmd(
            CommandKind::LineTo,
            false,
            &[10.0, 0.0, 10.0, 0.0, 0.0, 5.0],
        )]);
        assert_eq!(
            commands,
            vec![cmd(
                CommandKind::LineTo,
                true,
                &[10.0, 0.0, 20.0, 0.0, 20.0, 5.0]
            )]
        );
    }

    #[test]
    fn test_absolutize_arc_keeps_radii_and_flags() {
        let commands = absolutize(vec![
            cmd(CommandKind::MoveTo, true, &[10.0, 10.0]),
            cmd(CommandKind::EllipticalArc, false, &[5.0, 3.0, 45.0, 1.0, 0.0, 4.0, -2.0]),
        ]);
        assert_eq!(
            commands[1],
            cmd(CommandKind::EllipticalArc, true, &[5.0, 3.0, 45.0, 1.0, 0.0, 14.0, 8.0])
        );
    }

    #[test]
    fn test_split_chains_lineto() {
        let commands = split_chains(vec![cmd(
            CommandKind::LineTo,
            true,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )]);
        assert_eq!(
            commands,
            vec![
                cmd(CommandKind::LineTo, true, &[1.0, 2.0]),
                cmd(CommandKind::LineTo, true, &[3.0, 4.0]),
                cmd(CommandKind::LineTo, true, &[5.0, 6.0]),
            ]
        );
    }

    #[test]
    fn test_split_chains_moveto_becomes_lineto() {
        let commands = split_chains(vec![cmd(
            CommandKind::MoveTo,
            true,
            &[1.0, 2.0, 3.0, 4.0],
        )]);
        assert_eq!(
            commands,
            vec![
                cmd(CommandKind::MoveTo, true, &[1.0, 2.0]),
                cmd(CommandKind::LineTo, true, &[3.0, 4.0]),
            ]
        );
    }

    #[test]
    fn test_split_chains_axis_lines_one_parameter_each() {
        let commands = split_chains(vec![cmd(
            CommandKind::HorizontalLineTo,
            true,
            &[10.0, 20.0, 30.0],
        )]);
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[1], cmd(CommandKind::HorizontalLineTo, true, &[20.0]));
    }

    #[test]
    fn test_split_chains_drops_incomplete_group() {
        let commands = split_chains(vec![cmd(CommandKind::LineTo, true, &[1.0, 2.0, 3.0])]);
        assert_eq!(commands, vec![cmd(CommandKind::LineTo, true, &[1.0, 2.0])]);
    }

    #[test]
    fn test_expand_axis_lines() {
        let commands = expand_axis_lines(vec![
            cmd(CommandKind::MoveTo, true, &[1.0, 2.0]),
            cmd(CommandKind::HorizontalLineTo, true, &[5.0]),
            cmd(CommandKind::VerticalLineTo, true, &[-1.0]),
        ]);
        assert_eq!(
            commands,
            vec![
                cmd(CommandKind::MoveTo, true, &[1.0, 2.0]),
                cmd(CommandKind::LineTo, true, &[5.0, 2.0]),
                cmd(CommandKind::LineTo, true, &[5.0, -1.0]),
            ]
        );
    }

    #[test]
    fn test_resolve_smooth_reflects_previous_control() {
        let commands = resolve_smooth(vec![
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::CurveTo, true, &[2.0, 2.0, 8.0, 2.0, 10.0, 0.0]),
            cmd(CommandKind::SmoothCurveTo, true, &[18.0, 2.0, 20.0, 0.0]),
        ]);
        assert_eq!(
            commands[2],
            cmd(
                CommandKind::CurveTo,
                true,
                &[12.0, -2.0, 18.0, 2.0, 20.0, 0.0]
            )
        );
    }

    #[test]
    fn test_resolve_smooth_without_previous_curve() {
        let commands = resolve_smooth(vec![
            cmd(CommandKind::MoveTo, true, &[5.0, 5.0]),
            cmd(CommandKind::SmoothCurveTo, true, &[8.0, 2.0, 10.0, 5.0]),
        ]);
        // Reflection collapses onto the current point.
        assert_eq!(
            commands[1],
            cmd(
                CommandKind::CurveTo,
                true,
                &[5.0, 5.0, 8.0, 2.0, 10.0, 5.0]
            )
        );
    }

    #[test]
    fn test_resolve_smooth_quadratic_chain() {
        let commands = resolve_smooth(vec![
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::Quadratic, true, &[5.0, 10.0, 10.0, 0.0]),
            cmd(CommandKind::SmoothQuadratic, true, &[20.0, 0.0]),
        ]);
        // Previous quadratic control (5,10) reflected through (10,0).
        assert_eq!(
            commands[2],
            cmd(CommandKind::Quadratic, true, &[15.0, -10.0, 20.0, 0.0])
        );
    }

    #[test]
    fn test_elevate_quadratics_exact() {
        let commands = elevate_quadratics(vec![
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::Quadratic, true, &[5.0, 10.0, 10.0, 0.0]),
        ]);
        assert_eq!(commands[1].kind, CommandKind::CurveTo);
        let p = &commands[1].parameters;
        assert!((p[0] - 10.0 / 3.0).abs() < 1e-9);
        assert!((p[1] - 20.0 / 3.0).abs() < 1e-9);
        assert!((p[2] - 20.0 / 3.0).abs() < 1e-9);
        assert!((p[3] - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(p[4], 10.0);
        assert_eq!(p[5], 0.0);
    }

    #[test]
    fn test_expand_arcs_zero_radius_becomes_line() {
        let commands = expand_arcs(vec![
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::EllipticalArc, true, &[0.0, 5.0, 0.0, 0.0, 1.0, 10.0, 0.0]),
        ]);
        assert_eq!(
            commands[1],
            cmd(CommandKind::LineTo, true, &[10.0, 0.0])
        );
    }

    #[test]
    fn test_expand_arcs_zero_length_is_dropped() {
        let commands = expand_arcs(vec![
            cmd(CommandKind::MoveTo, true, &[5.0, 5.0]),
            cmd(CommandKind::EllipticalArc, true, &[3.0, 3.0, 0.0, 0.0, 1.0, 5.0, 5.0]),
        ]);
        assert_eq!(commands, vec![cmd(CommandKind::MoveTo, true, &[5.0, 5.0])]);
    }

    #[test]
    fn test_expand_arcs_emits_finite_curves() {
        let commands = expand_arcs(vec![
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::EllipticalArc, true, &[5.0, 5.0, 0.0, 0.0, 1.0, 10.0, 0.0]),
        ]);
        assert!(commands.len() > 1);
        for command in &commands[1..] {
            assert_eq!(command.kind, CommandKind::CurveTo);
            assert!(command.parameters.iter().all(|v| v.is_finite()));
        }
        // The final curve lands exactly on the arc endpoint.
        let last = commands.last().unwrap();
        assert_eq!(last.parameters[4], 10.0);
        assert_eq!(last.parameters[5], 0.0);
    }

    #[test]
    fn test_assemble_lines_and_curves() {
        let paths = assemble(&[
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::LineTo, true, &[10.0, 0.0]),
            cmd(CommandKind::CurveTo, true, &[12.0, 2.0, 12.0, 8.0, 10.0, 10.0]),
        ]);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
        assert!(paths[0][0].is_line());
        assert_eq!(paths[0][0].from, (0.0, 0.0).into());
        assert_eq!(paths[0][1].ctrl1, Some((12.0, 2.0).into()));
        assert_eq!(paths[0][1].to, (10.0, 10.0).into());
    }

    #[test]
    fn test_assemble_close_starts_new_path() {
        let paths = assemble(&[
            cmd(CommandKind::MoveTo, true, &[0.0, 0.0]),
            cmd(CommandKind::LineTo, true, &[1.0, 1.0]),
            cmd(CommandKind::ClosePath, true, &[]),
            cmd(CommandKind::MoveTo, true, &[5.0, 5.0]),
            cmd(CommandKind::LineTo, true, &[6.0, 6.0]),
        ]);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 1);
        assert_eq!(paths[1].len(), 1);
    }

    #[test]
    fn test_assemble_move_only_is_empty() {
        let paths = assemble(&[cmd(CommandKind::MoveTo, true, &[3.0, 4.0])]);
        assert!(paths.is_empty());
    }

    #[test]
    fn test_convert_path_data_empty_and_short() {
        assert!(convert_path_data("").is_empty());
        assert!(convert_path_data("M").is_empty());
    }

    #[test]
    fn test_convert_path_data_continuity() {
        let paths = convert_path_data("M 10 80 Q 52.5 10, 95 80 T 180 80 L 200 90 a 5 5 0 0 1 10 0 Z");
        assert_eq!(paths.len(), 1);
        for pair in paths[0].windows(2) {
            assert!((pair[0].to.x - pair[1].from.x).abs() < 1e-9);
            assert!((pair[0].to.y - pair[1].from.y).abs() < 1e-9);
        }
    }

    /// All four spellings of a smooth curve continuation describe the
    /// same geometry.
    #[test]
    fn test_convert_path_data_smooth_spellings_agree() {
        let a = convert_path_data("M 10 20 C 10 20 11 17 12 15 S 2 7 10 20 Z");
        let b = convert_path_data("M 10 20 C 10 20 11 17 12 15 s -10 -8 -2 5 Z");
        let c = convert_path_data("M 10 20 c 0 0 1 -3 2 -5 S 2 7 10 20 Z");
        let d = convert_path_data("M 10 20 c 0 0 1 -3 2 -5 s -10 -8 -2 5 Z");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
    }

    #[test]
    fn test_convert_path_data_decimal_chain() {
        let paths = convert_path_data("M 1.2.3.4 L 5 6");
        // The move decodes to (1.2, 0.3); the odd trailing 0.4 is dropped.
        assert_eq!(paths[0][0].from, (1.2, 0.3).into());
        assert_eq!(paths[0][0].to, (5.0, 6.0).into());
    }
}
