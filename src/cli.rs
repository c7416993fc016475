use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Python,
    Gnuplot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Line,
    Scatter,
    Bar,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "qplot", about = "Plot numeric columns through python or gnuplot", version)]
pub struct Cli {
    /// Data files: one value per line, or `x y` columns. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Interpreter that draws the plot.
    #[arg(short = 'b', long, value_enum, default_value_t = BackendArg::Python)]
    pub backend: BackendArg,

    /// Plot title.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// How every series is drawn.
    #[arg(short = 's', long, value_enum, default_value_t = StyleArg::Line)]
    pub style: StyleArg,

    /// Bar width relative to the x spacing (bar style only).
    #[arg(long = "bar-width", default_value_t = 0.8, value_parser = clap::value_parser!(f64))]
    pub bar_width: f64,

    /// Print the generated script instead of running the interpreter.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long = "show-config")]
    pub show_config: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
