//! Python interpreter backend and its data-pipe bootstrap.

use std::io::Write;

use anyhow::Result;

use super::Backend;
use crate::canvas::Canvas;

/// Name of the list the bootstrap fills with readable data streams.
pub const DATA_LIST: &str = "qp_data_in";

#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

impl Backend for Python {
    const NAME: &'static str = "python";
    const COMMAND: &'static str = "python";
    const COMMAND_KEY: &'static str = "QPLOT_PYTHON_CMD";
    const INTERPRETER: bool = true;

    /// Close the inherited write end on the child side and open the read
    /// end as `qp_data_in[i]`, one entry per data channel.
    fn bootstrap(canvas: &mut Canvas<'_, Self>) -> Result<()> {
        writeln!(canvas, "# This header has been injected by qplot to open its data pipes.")?;
        writeln!(canvas, "import os")?;
        writeln!(canvas, "{DATA_LIST} = list()")?;
        writeln!(canvas)?;

        for fds in canvas.fds() {
            writeln!(canvas, "os.close({})", fds.write)?;
            writeln!(canvas, "{DATA_LIST}.append(os.fdopen({}, 'r'))", fds.read)?;
            writeln!(canvas)?;
        }
        Ok(())
    }
}
