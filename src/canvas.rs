//! Where styles write: the live channel or the header buffer.

use std::fs::File;
use std::io::{self, Write};
use std::os::unix::io::RawFd;

use crate::process::{Backend, Channel, DataFds, NUM_CHANNELS};

/// Destination for script text.
pub trait OutputSink {
    fn write_text(&mut self, text: &[u8]) -> io::Result<()>;
}

impl OutputSink for Vec<u8> {
    fn write_text(&mut self, text: &[u8]) -> io::Result<()> {
        self.extend_from_slice(text);
        Ok(())
    }
}

/// Handle passed to every style.
///
/// Script text goes through [`Write`], so anything `Display` can be sent
/// with `write!`. While the header is being captured the text lands in the
/// header buffer; bulk data always goes to the live channel's pipe.
pub struct Canvas<'a, B: Backend> {
    channel: &'a mut Channel<B>,
    capture: Option<&'a mut Vec<u8>>,
    objects: &'a mut usize,
}

impl<'a, B: Backend> Canvas<'a, B> {
    pub(crate) fn live(channel: &'a mut Channel<B>, objects: &'a mut usize) -> Self {
        Self {
            channel,
            capture: None,
            objects,
        }
    }

    pub(crate) fn capturing(
        channel: &'a mut Channel<B>,
        header: &'a mut Vec<u8>,
        objects: &'a mut usize,
    ) -> Self {
        Self {
            channel,
            capture: Some(header),
            objects,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Objects already drawn in the current script, header included.
    pub fn objects_drawn(&self) -> usize {
        *self.objects
    }

    pub(crate) fn object_drawn(&mut self) {
        *self.objects += 1;
    }

    /// Binary stream to the interpreter's data pipe.
    pub fn data_out(&mut self) -> io::Result<&mut File> {
        self.channel.data_out()
    }

    pub fn fd_r(&self) -> RawFd {
        self.channel.fd_r()
    }

    pub fn fd_w(&self) -> RawFd {
        self.channel.fd_w()
    }

    pub fn fds(&self) -> [DataFds; NUM_CHANNELS] {
        self.channel.fds()
    }

    fn sink(&mut self) -> &mut dyn OutputSink {
        match self.capture.as_mut() {
            Some(header) => &mut **header,
            None => &mut *self.channel,
        }
    }
}

impl<B: Backend> Write for Canvas<'_, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink().write_text(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
