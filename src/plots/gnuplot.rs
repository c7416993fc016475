//! gnuplot commands. Each object's rows go into a named datablock; the
//! first object of a script is drawn with `plot`, later ones are added
//! with `replot` so earlier objects stay on the canvas.

use std::io::Write;

use anyhow::Result;

use super::{number, Bar, Line, Marker, Point, Preamble, Scatter, Series, Show, Title};
use crate::canvas::Canvas;
use crate::dispatch::CanvasStyle;
use crate::process::Gnuplot;
use crate::registry::ObjectStyle;

type Gp<'a> = Canvas<'a, Gnuplot>;

impl CanvasStyle<Gnuplot> for Preamble {
    fn apply(&self, canvas: &mut Gp<'_>) -> Result<()> {
        writeln!(canvas, "set key top left")?;
        writeln!(canvas, "set grid")?;
        Ok(())
    }
}

impl CanvasStyle<Gnuplot> for Title {
    fn apply(&self, canvas: &mut Gp<'_>) -> Result<()> {
        writeln!(canvas, "set title {}", quote(&self.0))?;
        Ok(())
    }
}

impl CanvasStyle<Gnuplot> for Show {
    fn apply(&self, canvas: &mut Gp<'_>) -> Result<()> {
        writeln!(canvas, "pause mouse close")?;
        Ok(())
    }
}

impl CanvasStyle<Gnuplot> for Scatter {
    fn apply(&self, canvas: &mut Gp<'_>) -> Result<()> {
        writeln!(canvas, "set style data points")?;
        Ok(())
    }
}

impl ObjectStyle<Gnuplot, Point> for Scatter {
    fn plot(&self, canvas: &mut Gp<'_>, p: &Point) -> Result<()> {
        inline(canvas, "points pointtype 7", None, [(p.x, p.y)])
    }
}

impl ObjectStyle<Gnuplot, Series> for Scatter {
    fn plot(&self, canvas: &mut Gp<'_>, s: &Series) -> Result<()> {
        inline(canvas, "points pointtype 7", Some(&s.name), s.pairs())
    }
}

impl ObjectStyle<Gnuplot, Point> for Marker {
    fn plot(&self, canvas: &mut Gp<'_>, p: &Point) -> Result<()> {
        inline(canvas, "points pointtype 2", None, [(p.x, p.y)])
    }
}

impl ObjectStyle<Gnuplot, Series> for Line {
    fn plot(&self, canvas: &mut Gp<'_>, s: &Series) -> Result<()> {
        inline(canvas, "lines", Some(&s.name), s.pairs())
    }
}

impl ObjectStyle<Gnuplot, Series> for Bar {
    fn plot(&self, canvas: &mut Gp<'_>, s: &Series) -> Result<()> {
        writeln!(canvas, "set boxwidth {} relative", number(self.width))?;
        writeln!(canvas, "set style fill solid 0.5")?;
        inline(canvas, "boxes", Some(&s.name), s.pairs())
    }
}

/// Datablock with the rows, then `plot` or `replot` of that block.
fn inline(
    canvas: &mut Gp<'_>,
    with: &str,
    title: Option<&str>,
    rows: impl IntoIterator<Item = (f64, f64)>,
) -> Result<()> {
    let block = format!("$qp{}", canvas.objects_drawn());
    writeln!(canvas, "{block} << EOD")?;
    for (x, y) in rows {
        writeln!(canvas, "{} {}", number(x), number(y))?;
    }
    writeln!(canvas, "EOD")?;

    let verb = if canvas.objects_drawn() == 0 { "plot" } else { "replot" };
    match title {
        Some(t) => writeln!(canvas, "{verb} {block} with {with} title {}", quote(t))?,
        None => writeln!(canvas, "{verb} {block} with {with} notitle")?,
    }
    Ok(())
}

/// Double-quoted gnuplot string.
fn quote(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}
