mod cli;
mod printer;
mod utils;

use std::io::{self, Read};

use anyhow::{bail, Result};
use cli::{BackendArg, StyleArg};
use is_terminal::IsTerminal;
use printer::TextPrinter;
use qplot::plots::{Bar, DemoStyles, Line, Preamble, Scatter, Series, Show, Title};
use qplot::{Args, Backend, Config, Gnuplot, Python, Qplot};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::Cli::parse();

    // --debug must be visible to Config::load
    if args.debug {
        std::env::set_var("QPLOT_DEBUG", "true");
    }
    let cfg = Config::load();

    if args.show_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let series = if args.files.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail!("No data: pass FILE arguments or pipe values on stdin");
        }
        let mut buf = String::new();
        stdin.lock().read_to_string(&mut buf)?;
        vec![utils::parse_series("stdin", &buf)?]
    } else {
        utils::read_series(&args.files)?
    };

    let points: usize = series.iter().map(Series::len).sum();
    let (backend, command) = match args.backend {
        BackendArg::Python => render::<Python>(&cfg, &args, series)?,
        BackendArg::Gnuplot => render::<Gnuplot>(&cfg, &args, series)?,
    };

    TextPrinter { color: Some("green") }.print(&format!(
        "plotted {} points with {} ({})",
        points,
        backend,
        command
    ));
    Ok(())
}

fn render<B: Backend>(
    cfg: &Config,
    args: &cli::Cli,
    series: Vec<Series>,
) -> Result<(&'static str, String)>
where
    (Preamble, Option<Title>): Args<B, DemoStyles>,
    (Option<Scatter>, Option<Line>, Option<Bar>, Vec<Series>, Show): Args<B, DemoStyles>,
{
    let header = (Preamble, args.title.clone().map(Title));
    let mut qp = Qplot::<B, DemoStyles>::with_config(cfg, &header)?;

    let body = (
        (args.style == StyleArg::Scatter).then_some(Scatter),
        (args.style == StyleArg::Line).then_some(Line),
        (args.style == StyleArg::Bar).then(|| Bar { width: args.bar_width }),
        series,
        Show,
    );
    qp.plot(&body)?;
    Ok((B::NAME, cfg.command_for::<B>()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
