//! OBJ-like text format for the control points of a [`Spline`].
//!
//! ```text
//! v x y z    one line per control point, four per curve, in curve order
//! ...
//! c r g b    one line per control point color, same order
//! ```
//!
//! Import is lenient: unknown or malformed lines are skipped, a trailing group
//! of fewer than four points is dropped and missing colors default to white.
//! Numbers are written with their shortest round-trip representation so an
//! export followed by an import reproduces the curves exactly.

use core::fmt;
use core::str::FromStr;
use std::io::{Read, Write};

use num_traits::Float;
use tracing::{debug, warn};

use super::cubic_bezier::CubicBezierCurve;
use super::error::Result;
use super::spline::Spline;
use super::vector::{Color, Vector};

/// Samples per curve used by [`from_obj`] callers that have no preference.
pub const IMPORT_SAMPLES_PER_CURVE: usize = 128;

/// Display adapter writing a spline in the text format.
pub struct ObjDisplay<'a, T>(pub &'a Spline<T>);

impl<T> fmt::Display for ObjDisplay<'_, T>
where
    T: Float + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for curve in self.0.curves() {
            for p in curve.control_points() {
                writeln!(f, "v {} {} {}", p.x, p.y, p.z)?;
            }
        }
        for curve in self.0.curves() {
            for c in curve.colors() {
                writeln!(f, "c {} {} {}", c.x, c.y, c.z)?;
            }
        }
        Ok(())
    }
}

pub fn to_obj<T>(spline: &Spline<T>) -> String
where
    T: Float + fmt::Display,
{
    ObjDisplay(spline).to_string()
}

pub fn write_obj<T, W>(spline: &Spline<T>, mut writer: W) -> Result<()>
where
    T: Float + fmt::Display,
    W: Write,
{
    write!(writer, "{}", ObjDisplay(spline))?;
    writer.flush()?;
    Ok(())
}

/// The records of a parsed file before they are grouped into curves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjDocument<T> {
    pub vertices: Vec<Vector<T>>,
    pub colors: Vec<Color<T>>,
    /// Non-empty lines that were neither a valid `v` nor `c` record.
    pub skipped_lines: usize,
}

impl<T> ObjDocument<T>
where
    T: Float + FromStr,
{
    pub fn parse(input: &str) -> Self {
        let mut doc = ObjDocument {
            vertices: Vec::new(),
            colors: Vec::new(),
            skipped_lines: 0,
        };
        for (number, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_record::<T>(line) {
                Some(Record::Vertex(v)) => doc.vertices.push(v),
                Some(Record::Color(c)) => doc.colors.push(c),
                None => {
                    debug!(line = number + 1, "skipping malformed line");
                    doc.skipped_lines += 1;
                }
            }
        }
        doc
    }

    /// Group the records into curves of four control points each.
    pub fn into_spline(self, samples_per_curve: usize) -> Spline<T> {
        let white = Color::new(T::one(), T::one(), T::one());
        let dangling = self.vertices.len() % 4;
        if dangling != 0 {
            warn!(dangling, "incomplete trailing curve dropped");
        }

        let mut spline = Spline::new(samples_per_curve);
        for (index, points) in self.vertices.chunks_exact(4).enumerate() {
            let mut colors = [white; 4];
            for (c, color) in colors.iter_mut().enumerate() {
                if let Some(found) = self.colors.get(index * 4 + c) {
                    *color = *found;
                }
            }
            spline.add_curve(CubicBezierCurve::with_colors(
                [points[0], points[1], points[2], points[3]],
                colors,
            ));
        }
        debug!(
            curves = spline.len(),
            skipped = self.skipped_lines,
            "spline imported"
        );
        spline
    }
}

enum Record<T> {
    Vertex(Vector<T>),
    Color(Color<T>),
}

fn parse_record<T>(line: &str) -> Option<Record<T>>
where
    T: Float + FromStr,
{
    let mut tokens = line.split_whitespace();
    let tag = tokens.next()?;
    let x = tokens.next()?.parse::<T>().ok()?;
    let y = tokens.next()?.parse::<T>().ok()?;
    let z = tokens.next()?.parse::<T>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    match tag {
        "v" => Some(Record::Vertex(Vector::new(x, y, z))),
        "c" => Some(Record::Color(Color::new(x, y, z))),
        _ => None,
    }
}

/// Parse a spline from text. The result is not sampled yet.
pub fn from_obj<T>(input: &str, samples_per_curve: usize) -> Spline<T>
where
    T: Float + FromStr,
{
    ObjDocument::parse(input).into_spline(samples_per_curve)
}

pub fn read_obj<T, R>(mut reader: R, samples_per_curve: usize) -> Result<Spline<T>>
where
    T: Float + FromStr,
    R: Read,
{
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(from_obj(&input, samples_per_curve))
}
