//! Ready-made plottable objects and styles for the python (matplotlib) and
//! gnuplot backends.
//!
//! Kinds: [`Point`] and [`Series`]. Styles:
//!
//! | style       | role   | applies to        |
//! |-------------|--------|-------------------|
//! | [`Preamble`] | canvas | -                 |
//! | [`Title`]    | canvas | -                 |
//! | [`Show`]     | canvas | -                 |
//! | [`Scatter`]  | dual   | `Point`, `Series` |
//! | [`Marker`]   | object | `Point`           |
//! | [`Line`]     | object | `Series`          |
//! | [`Bar`]      | object | `Series`          |

use crate::dispatch::{CanvasOnly, Classify, Dual, Object, ObjectOnly};

mod gnuplot;
mod python;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub name: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self { name: name.into(), xs, ys }
    }

    /// Series plotted against its indices `0..ys.len()`.
    pub fn from_values(name: impl Into<String>, ys: Vec<f64>) -> Self {
        let xs = (0..ys.len()).map(|i| i as f64).collect();
        Self::new(name, xs, ys)
    }

    pub fn len(&self) -> usize {
        self.xs.len().min(self.ys.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Backend setup written once into the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preamble;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Title(pub String);

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

/// Display the finished figure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Show;

/// Unconnected markers. Also switches the canvas to point mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scatter;

/// Single cross marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub width: f64,
}

impl Default for Bar {
    fn default() -> Self {
        Self { width: 0.8 }
    }
}

impl Classify for Preamble {
    type Role = CanvasOnly;
}

impl Classify for Title {
    type Role = CanvasOnly;
}

impl Classify for Show {
    type Role = CanvasOnly;
}

impl Classify for Scatter {
    type Role = Dual;
}

impl Classify for Marker {
    type Role = ObjectOnly;
}

impl Classify for Line {
    type Role = ObjectOnly;
}

impl Classify for Bar {
    type Role = ObjectOnly;
}

impl Classify for Point {
    type Role = Object;
}

impl Classify for Series {
    type Role = Object;
}

crate::style_variant! {
    pub enum PointStyle for Point { Marker, Scatter }
}

crate::style_variant! {
    pub enum SeriesStyle for Series { Line, Scatter, Bar }
}

crate::style_table! {
    /// Style table covering every kind in this module.
    pub struct DemoStyles {
        series: SeriesStyle,
        point: PointStyle,
    }
}

/// `f64` as a literal both python and gnuplot parse.
fn number(v: f64) -> String {
    if v.is_nan() {
        "nan".into()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".into() } else { "-inf".into() }
    } else {
        format!("{v:?}")
    }
}
