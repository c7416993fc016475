//! Interpreter backends and the process channel that drives them.

use anyhow::Result;

use crate::canvas::Canvas;

mod channel;
pub mod python;

pub use channel::{Channel, DataFds, NUM_CHANNELS};
pub use python::Python;

/// Marker type selecting the external interpreter an adapter drives.
pub trait Backend: Sized + 'static {
    /// Short human readable name used in logs.
    const NAME: &'static str;
    /// Shell command spawned for this backend.
    const COMMAND: &'static str;
    /// Config key that overrides `COMMAND`.
    const COMMAND_KEY: &'static str;
    /// Real interpreters are swapped for `cat` in debug passthrough mode.
    const INTERPRETER: bool = false;

    /// Statements injected into the header before any caller content.
    fn bootstrap(_canvas: &mut Canvas<'_, Self>) -> Result<()> {
        Ok(())
    }
}

/// gnuplot reading its script from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gnuplot;

impl Backend for Gnuplot {
    const NAME: &'static str = "gnuplot";
    const COMMAND: &'static str = "gnuplot";
    const COMMAND_KEY: &'static str = "QPLOT_GNUPLOT_CMD";
    const INTERPRETER: bool = true;
}

/// Discards everything it is sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl Backend for Null {
    const NAME: &'static str = "null";
    const COMMAND: &'static str = "cat > /dev/null";
    const COMMAND_KEY: &'static str = "QPLOT_NULL_CMD";
}

/// Echoes the generated script to our own stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cat;

impl Backend for Cat {
    const NAME: &'static str = "cat";
    const COMMAND: &'static str = "cat";
    const COMMAND_KEY: &'static str = "QPLOT_CAT_CMD";
}
