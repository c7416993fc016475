//! matplotlib statements for the python backend.

use std::io::Write;

use anyhow::Result;

use super::{number, Bar, Line, Marker, Point, Preamble, Scatter, Series, Show, Title};
use crate::canvas::Canvas;
use crate::dispatch::CanvasStyle;
use crate::process::Python;
use crate::registry::ObjectStyle;

type Py<'a> = Canvas<'a, Python>;

impl CanvasStyle<Python> for Preamble {
    fn apply(&self, canvas: &mut Py<'_>) -> Result<()> {
        writeln!(canvas, "import matplotlib.pyplot as plt")?;
        Ok(())
    }
}

impl CanvasStyle<Python> for Title {
    fn apply(&self, canvas: &mut Py<'_>) -> Result<()> {
        writeln!(canvas, "plt.title({})", quote(&self.0))?;
        Ok(())
    }
}

impl CanvasStyle<Python> for Show {
    fn apply(&self, canvas: &mut Py<'_>) -> Result<()> {
        writeln!(canvas, "if plt.gca().get_legend_handles_labels()[0]:")?;
        writeln!(canvas, "    plt.legend()")?;
        writeln!(canvas, "plt.show()")?;
        Ok(())
    }
}

impl CanvasStyle<Python> for Scatter {
    fn apply(&self, canvas: &mut Py<'_>) -> Result<()> {
        writeln!(canvas, "plt.rcParams['scatter.marker'] = 'o'")?;
        Ok(())
    }
}

impl ObjectStyle<Python, Point> for Scatter {
    fn plot(&self, canvas: &mut Py<'_>, p: &Point) -> Result<()> {
        writeln!(canvas, "plt.scatter([{}], [{}])", py_number(p.x), py_number(p.y))?;
        Ok(())
    }
}

impl ObjectStyle<Python, Series> for Scatter {
    fn plot(&self, canvas: &mut Py<'_>, s: &Series) -> Result<()> {
        let (xs, ys) = columns(s);
        writeln!(canvas, "plt.scatter({xs}, {ys}, label={})", quote(&s.name))?;
        Ok(())
    }
}

impl ObjectStyle<Python, Point> for Marker {
    fn plot(&self, canvas: &mut Py<'_>, p: &Point) -> Result<()> {
        writeln!(
            canvas,
            "plt.plot([{}], [{}], marker='x', linestyle='none')",
            py_number(p.x),
            py_number(p.y)
        )?;
        Ok(())
    }
}

impl ObjectStyle<Python, Series> for Line {
    fn plot(&self, canvas: &mut Py<'_>, s: &Series) -> Result<()> {
        let (xs, ys) = columns(s);
        writeln!(canvas, "plt.plot({xs}, {ys}, label={})", quote(&s.name))?;
        Ok(())
    }
}

impl ObjectStyle<Python, Series> for Bar {
    fn plot(&self, canvas: &mut Py<'_>, s: &Series) -> Result<()> {
        let (xs, ys) = columns(s);
        writeln!(
            canvas,
            "plt.bar({xs}, {ys}, width={}, label={})",
            py_number(self.width),
            quote(&s.name)
        )?;
        Ok(())
    }
}

fn py_number(v: f64) -> String {
    if v.is_finite() {
        number(v)
    } else {
        format!("float('{}')", number(v))
    }
}

fn columns(s: &Series) -> (String, String) {
    let (xs, ys): (Vec<String>, Vec<String>) =
        s.pairs().map(|(x, y)| (py_number(x), py_number(y))).unzip();
    (format!("[{}]", xs.join(", ")), format!("[{}]", ys.join(", ")))
}

/// Single-quoted python string literal.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
