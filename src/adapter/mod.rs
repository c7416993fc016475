//! The adapter: header capture, per-call script generation and respawn.

use anyhow::{Context, Result};

use crate::canvas::{Canvas, OutputSink};
use crate::config::Config;
use crate::dispatch::{Args, CanvasOnly, CanvasStyle, Classify, Dispatcher};
use crate::process::{Backend, Channel, DataFds, NUM_CHANNELS};
use crate::registry::StyleTable;

/// Drives one interpreter of backend `B` with style table `S`.
///
/// Every [`plot`](Qplot::plot) call writes one complete script: the header
/// captured at construction, then the call's own arguments. The channel is
/// then torn down, which lets the interpreter run the script, and replaced
/// by a fresh one for the next call.
///
/// Not meant to be shared between threads without external locking.
pub struct Qplot<B: Backend, S: StyleTable> {
    channel: Channel<B>,
    header: Vec<u8>,
    header_objects: usize,
    styles: S,
    styles_header: S,
    header_fds: [DataFds; NUM_CHANNELS],
}

impl<B: Backend, S: StyleTable> Qplot<B, S> {
    /// Spawn the backend using [`Config::load`] and capture `header`.
    pub fn new<A>(header: &A) -> Result<Self>
    where
        A: Args<B, S> + ?Sized,
    {
        Self::with_config(&Config::load(), header)
    }

    pub fn with_config<A>(cfg: &Config, header: &A) -> Result<Self>
    where
        A: Args<B, S> + ?Sized,
    {
        let command = cfg.command_for::<B>();
        let channel = Channel::spawn(&command, &cfg.shell())
            .with_context(|| format!("failed to start {} backend", B::NAME))?;

        let mut qp = Self {
            header_fds: channel.fds(),
            channel,
            header: Vec::new(),
            header_objects: 0,
            styles: S::default(),
            styles_header: S::default(),
        };
        qp.add_to_header(&Bootstrap)?;
        qp.add_to_header(header)?;
        Ok(qp)
    }

    /// Send one complete script and respawn the interpreter.
    ///
    /// Styles selected here do not outlive the call: the next call starts
    /// again from the header baseline. The channel is respawned even when
    /// an argument fails; the first error is returned.
    pub fn plot<A>(&mut self, args: &A) -> Result<()>
    where
        A: Args<B, S> + ?Sized,
    {
        let result = self.run(args);
        let respawned = self.respawn();
        result.and(respawned)
    }

    /// Script text captured at construction, replayed before every call.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Style table as left by the most recent call.
    pub fn styles(&self) -> &S {
        &self.styles
    }

    /// Style table every call starts from.
    pub fn baseline(&self) -> &S {
        &self.styles_header
    }

    pub fn channel(&self) -> &Channel<B> {
        &self.channel
    }

    fn run<A>(&mut self, args: &A) -> Result<()>
    where
        A: Args<B, S> + ?Sized,
    {
        self.channel
            .write_text(&self.header)
            .context("failed to replay header")?;
        self.styles = self.styles_header.clone();

        let mut objects = self.header_objects;
        let canvas = Canvas::live(&mut self.channel, &mut objects);
        let mut d = Dispatcher::new(canvas, &mut self.styles);
        args.process_all(&mut d)
    }

    /// Process `args` with all text captured into the header buffer.
    ///
    /// The baseline is the table as it stood before `args`, so object
    /// styles given here only affect the header text itself.
    fn add_to_header<A>(&mut self, args: &A) -> Result<()>
    where
        A: Args<B, S> + ?Sized,
    {
        self.styles_header = self.styles.clone();

        let canvas = Canvas::capturing(
            &mut self.channel,
            &mut self.header,
            &mut self.header_objects,
        );
        let mut d = Dispatcher::new(canvas, &mut self.styles);
        args.process_all(&mut d)
    }

    fn respawn(&mut self) -> Result<()> {
        self.channel
            .respawn()
            .with_context(|| format!("failed to respawn {} backend", B::NAME))?;

        let fds = self.channel.fds();
        if fds != self.header_fds {
            tracing::warn!(
                backend = B::NAME,
                expected = ?self.header_fds,
                actual = ?fds,
                "data pipe descriptors changed after respawn; header bootstrap is stale"
            );
        }
        Ok(())
    }
}

/// Runs the backend's bootstrap hook as a canvas style.
struct Bootstrap;

impl Classify for Bootstrap {
    type Role = CanvasOnly;
}

impl<B: Backend> CanvasStyle<B> for Bootstrap {
    fn apply(&self, canvas: &mut Canvas<'_, B>) -> Result<()> {
        B::bootstrap(canvas)
    }
}
