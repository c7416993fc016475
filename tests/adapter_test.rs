mod common;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use common::{init_tracing, read_scripts, recorder};
use qplot::plots::{Bar, DemoStyles, Line, Point, Preamble, Scatter, Series, Show, Title};
use qplot::{
    Canvas, CanvasOnly, CanvasStyle, Classify, Config, Gnuplot, NoStyles, Null, Python, Qplot,
    StyleVariant,
};
use tempfile::tempdir;

fn series() -> Series {
    Series::new("s", vec![0.0, 1.0], vec![1.0, 4.0])
}

#[test]
fn python_header_then_title_then_scatter_point() -> Result<()> {
    init_tracing();
    let dir = tempdir()?;
    let log = dir.path().join("python.log");
    let cfg = recorder("QPLOT_PYTHON_CMD", &log);

    let header;
    {
        let mut qp: Qplot<Python, DemoStyles> = Qplot::with_config(&cfg, &(Title::new("T"),))?;
        header = String::from_utf8(qp.header().to_vec())?;
        let fds = qp.channel().fds()[0];

        assert!(header.starts_with("# This header has been injected by qplot"));
        assert!(header.contains("qp_data_in = list()\n"));
        assert!(header.contains(&format!("os.close({})\n", fds.write)));
        assert!(header.contains(&format!("qp_data_in.append(os.fdopen({}, 'r'))\n", fds.read)));
        assert!(header.ends_with("plt.title('T')\n"));

        qp.plot(&(Scatter, Point::new(1.0, 2.0)))?;
        // the call's selection is live but not part of the baseline
        assert_eq!(qp.styles().point.active(), "Scatter");
        assert_eq!(qp.baseline().point.active(), "Marker");

        qp.plot(&(Point::new(3.0, 4.0),))?;
    }

    let scripts = read_scripts(&log)?;
    assert_eq!(scripts.len(), 3);
    assert_eq!(
        scripts[0],
        format!("{header}plt.rcParams['scatter.marker'] = 'o'\nplt.scatter([1.0], [2.0])\n")
    );
    assert_eq!(
        scripts[1],
        format!("{header}plt.plot([3.0], [4.0], marker='x', linestyle='none')\n")
    );
    // the process spawned by the last respawn never received a script
    assert!(scripts[2].is_empty());
    Ok(())
}

#[test]
fn header_is_a_prefix_of_every_script() -> Result<()> {
    let dir = tempdir()?;
    let log = dir.path().join("gnuplot.log");
    let cfg = recorder("QPLOT_GNUPLOT_CMD", &log);

    let header;
    {
        let mut qp: Qplot<Gnuplot, DemoStyles> =
            Qplot::with_config(&cfg, &(Preamble, Title::new("persist")))?;
        header = String::from_utf8(qp.header().to_vec())?;
        assert_eq!(header, "set key top left\nset grid\nset title \"persist\"\n");

        qp.plot(&(series(),))?;
        qp.plot(&(Title::new("other"), Point::new(0.0, 0.0)))?;
        qp.plot(&())?;
    }

    let scripts = read_scripts(&log)?;
    assert_eq!(scripts.len(), 4);
    for script in &scripts[..3] {
        assert!(script.starts_with(&header), "missing header in {script:?}");
    }
    assert_eq!(scripts[2], header);
    Ok(())
}

#[test]
fn styles_do_not_leak_between_calls() -> Result<()> {
    let dir = tempdir()?;
    let log = dir.path().join("leak.log");
    let cfg = recorder("QPLOT_GNUPLOT_CMD", &log);

    {
        let mut qp: Qplot<Gnuplot, DemoStyles> = Qplot::with_config(&cfg, &())?;
        qp.plot(&(Bar::default(), series()))?;
        qp.plot(&(series(),))?;
    }

    let scripts = read_scripts(&log)?;
    assert!(scripts[0].contains("plot $qp0 with boxes title \"s\""));
    assert!(scripts[1].contains("plot $qp0 with lines title \"s\""));
    assert!(!scripts[1].contains("boxes"));
    Ok(())
}

#[test]
fn header_object_styles_do_not_become_the_baseline() -> Result<()> {
    let dir = tempdir()?;
    let log = dir.path().join("baseline.log");
    let cfg = recorder("QPLOT_GNUPLOT_CMD", &log);

    {
        let mut qp: Qplot<Gnuplot, DemoStyles> =
            Qplot::with_config(&cfg, &(Scatter, Point::new(5.0, 5.0)))?;
        let header = String::from_utf8(qp.header().to_vec())?;
        // inside the header the selection applies to what follows it
        assert!(header.ends_with(
            "set style data points\n$qp0 << EOD\n5.0 5.0\nEOD\nplot $qp0 with points pointtype 7 notitle\n"
        ));
        assert_eq!(qp.baseline().series.active(), "Line");
        assert_eq!(qp.baseline().point.active(), "Marker");

        qp.plot(&(Point::new(1.0, 1.0),))?;
    }

    let scripts = read_scripts(&log)?;
    // the header already drew one object, so this one is added to it
    assert!(scripts[0].ends_with("$qp1 << EOD\n1.0 1.0\nEOD\nreplot $qp1 with points pointtype 2 notitle\n"));
    Ok(())
}

#[test]
fn each_object_uses_the_latest_selection() -> Result<()> {
    let dir = tempdir()?;
    let log = dir.path().join("order.log");
    let cfg = recorder("QPLOT_GNUPLOT_CMD", &log);

    {
        let mut qp: Qplot<Gnuplot, DemoStyles> = Qplot::with_config(&cfg, &())?;
        qp.plot(&(
            series(),
            Bar { width: 0.5 },
            series(),
            Scatter,
            vec![series(), series()],
            Line,
            Some(series()),
            Show,
        ))?;
    }

    let scripts = read_scripts(&log)?;
    let plots: Vec<&str> = scripts[0]
        .lines()
        .filter(|l| l.starts_with("plot ") || l.starts_with("replot "))
        .map(|l| l.split(" title").next().unwrap_or(l))
        .collect();
    assert_eq!(
        plots,
        vec![
            "plot $qp0 with lines",
            "replot $qp1 with boxes",
            "replot $qp2 with points pointtype 7",
            "replot $qp3 with points pointtype 7",
            "replot $qp4 with lines",
        ]
    );
    assert!(scripts[0].contains("set boxwidth 0.5 relative\n"));
    assert!(scripts[0].ends_with("pause mouse close\n"));
    Ok(())
}

#[test]
fn later_objects_are_added_to_the_first() -> Result<()> {
    let dir = tempdir()?;
    let log = dir.path().join("replot.log");
    let cfg = recorder("QPLOT_GNUPLOT_CMD", &log);

    {
        let mut qp: Qplot<Gnuplot, DemoStyles> = Qplot::with_config(&cfg, &(Preamble,))?;
        let pair = vec![
            Series::new("a", vec![0.0], vec![1.0]),
            Series::new("b", vec![0.0], vec![2.0]),
        ];
        qp.plot(&(pair.clone(), Show))?;
        qp.plot(&(pair, Show))?;
    }

    let scripts = read_scripts(&log)?;
    for script in &scripts[..2] {
        let commands: Vec<&str> = script
            .lines()
            .filter(|l| l.starts_with("plot ") || l.starts_with("replot "))
            .collect();
        // the counter starts over with every script
        assert_eq!(
            commands,
            vec![
                "plot $qp0 with lines title \"a\"",
                "replot $qp1 with lines title \"b\"",
            ]
        );
        assert!(script.contains("$qp1 << EOD\n0.0 2.0\nEOD\n"));
        assert!(script.ends_with("pause mouse close\n"));
    }
    Ok(())
}

/// Writes its payload to the data pipe and a shell line that copies it
/// into `out`.
struct Payload {
    bytes: &'static [u8],
    out: PathBuf,
}

impl Classify for Payload {
    type Role = CanvasOnly;
}

impl CanvasStyle<Null> for Payload {
    fn apply(&self, canvas: &mut Canvas<'_, Null>) -> Result<()> {
        let fd_r = canvas.fd_r();
        writeln!(
            canvas,
            "head -c {} /dev/fd/{fd_r} > '{}'",
            self.bytes.len(),
            self.out.display()
        )?;
        canvas.data_out()?.write_all(self.bytes)?;
        Ok(())
    }
}

#[test]
fn styles_reach_the_data_pipe_of_the_live_process() -> Result<()> {
    let dir = tempdir()?;
    let cfg = Config::empty().with("QPLOT_NULL_CMD", "sh");

    let mut qp: Qplot<Null, NoStyles> = Qplot::with_config(&cfg, &())?;
    let first = Payload { bytes: b"\x00first\xff", out: dir.path().join("first.bin") };
    let second = Payload { bytes: b"second", out: dir.path().join("second.bin") };

    qp.plot(&(first,))?;
    qp.plot(&(second,))?;

    assert_eq!(fs::read(dir.path().join("first.bin"))?, b"\x00first\xff");
    assert_eq!(fs::read(dir.path().join("second.bin"))?, b"second");
    Ok(())
}

#[test]
fn plot_replaces_the_process() -> Result<()> {
    let mut qp: Qplot<Null, NoStyles> = Qplot::with_config(&Config::empty(), &())?;
    let before = qp.channel().id().ok_or_else(|| anyhow!("no child"))?;

    qp.plot(&())?;

    let after = qp.channel().id().ok_or_else(|| anyhow!("no child"))?;
    assert_ne!(before, after);
    // the old child has been waited for, so its pid is gone
    assert_eq!(unsafe { libc::kill(before as libc::pid_t, 0) }, -1);
    Ok(())
}

struct Fails;

impl Classify for Fails {
    type Role = CanvasOnly;
}

impl CanvasStyle<Gnuplot> for Fails {
    fn apply(&self, _canvas: &mut Canvas<'_, Gnuplot>) -> Result<()> {
        Err(anyhow!("style failed"))
    }
}

#[test]
fn failing_argument_stops_processing_but_still_respawns() -> Result<()> {
    let dir = tempdir()?;
    let log = dir.path().join("fail.log");
    let cfg = recorder("QPLOT_GNUPLOT_CMD", &log);

    {
        let mut qp: Qplot<Gnuplot, DemoStyles> = Qplot::with_config(&cfg, &())?;
        let before = qp.channel().id();

        let err = qp
            .plot(&(Title::new("kept"), Fails, Point::new(1.0, 1.0)))
            .unwrap_err();
        assert!(err.to_string().contains("style failed"));
        assert_ne!(qp.channel().id(), before);

        qp.plot(&(Title::new("next"),))?;
    }

    let scripts = read_scripts(&log)?;
    assert_eq!(scripts[0], "set title \"kept\"\n");
    assert_eq!(scripts[1], "set title \"next\"\n");
    Ok(())
}

#[test]
fn spawn_failure_is_reported() {
    let cfg = Config::empty().with("QPLOT_SHELL", "/nonexistent/qplot-shell");
    let result = Qplot::<Null, NoStyles>::with_config(&cfg, &());
    let err = result.err().expect("spawn should fail");
    assert!(format!("{err:#}").contains("null backend"));
}
