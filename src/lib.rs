//! Turn typed argument sequences into scripts for a long-lived plotting
//! interpreter (python or gnuplot) running as a child process.
//!
//! ```no_run
//! use qplot::plots::{DemoStyles, Point, Preamble, Scatter, Show, Title};
//! use qplot::{Python, Qplot};
//!
//! fn main() -> qplot::Result<()> {
//!     let mut qp: Qplot<Python, DemoStyles> = Qplot::new(&(Preamble, Title::new("demo")))?;
//!     qp.plot(&(Scatter, Point::new(1.0, 2.0), Show))?;
//!     Ok(())
//! }
//! ```
//!
//! Arguments are classified by type (see [`dispatch`]): canvas styles are
//! written straight away, object styles select how later objects of the
//! kinds they apply to are drawn, and objects are drawn with whatever
//! style is active for their kind.
//!
//! Unix only: the data side channel is a raw pipe inherited by the child.

pub mod adapter;
pub mod canvas;
pub mod config;
pub mod dispatch;
pub mod plots;
pub mod process;
pub mod registry;

pub use anyhow::Result;

pub use adapter::Qplot;
pub use canvas::{Canvas, OutputSink};
pub use config::Config;
pub use dispatch::{Args, CanvasOnly, CanvasStyle, Classify, Dispatcher, Dual, Object, ObjectOnly};
pub use process::{Backend, Cat, Channel, DataFds, Gnuplot, Null, Python};
pub use registry::{HasStyles, NoStyles, ObjectStyle, PlotWith, Slot, StyleTable, StyleVariant};
