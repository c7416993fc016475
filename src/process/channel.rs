//! Owned child process plus its text and data streams.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::marker::PhantomData;
use std::os::unix::io::{AsRawFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};
use std::os::unix::process::CommandExt;
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{anyhow, Context, Result};

use super::Backend;
use crate::canvas::OutputSink;

/// Number of data pipes each channel opens.
pub const NUM_CHANNELS: usize = 1;

/// Descriptor numbers of one data pipe, as inherited by the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFds {
    pub read: RawFd,
    pub write: RawFd,
}

/// One spawned interpreter: stdin carries script text, a dedicated pipe
/// carries bulk data.
///
/// Dropping the channel closes the data pipe, then stdin, then waits for
/// the child to exit. There is no timeout.
pub struct Channel<B: Backend> {
    command: String,
    shell: String,
    child: Option<Child>,
    stdin: Option<BufWriter<ChildStdin>>,
    data: Option<File>,
    fds: DataFds,
    _backend: PhantomData<B>,
}

impl<B: Backend> Channel<B> {
    /// Create the data pipe and start `shell -c command` with piped stdin.
    pub fn spawn(command: &str, shell: &str) -> Result<Self> {
        let (read_end, write_end) = open_pipe().context("failed to create data pipe")?;
        let fds = DataFds {
            read: read_end.as_raw_fd(),
            write: write_end.as_raw_fd(),
        };

        let mut cmd = Command::new(shell);
        cmd.arg("-c").arg(command).stdin(Stdio::piped());
        // The pipe is close-on-exec so only this child inherits it.
        unsafe {
            cmd.pre_exec(move || {
                set_cloexec(fds.read, false)?;
                set_cloexec(fds.write, false)
            });
        }
        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{shell} -c {command}`"))?;

        // The read end is for the child only.
        close_fd(read_end, "data pipe read end");

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("no stdin for `{command}`"))?;

        tracing::debug!(
            backend = B::NAME,
            pid = child.id(),
            fd_r = fds.read,
            fd_w = fds.write,
            "spawned channel"
        );

        Ok(Self {
            command: command.to_string(),
            shell: shell.to_string(),
            child: Some(child),
            stdin: Some(BufWriter::new(stdin)),
            data: Some(File::from(write_end)),
            fds,
            _backend: PhantomData,
        })
    }

    /// Tear this channel down completely, then start an identical one.
    ///
    /// Closing stdin is what tells the interpreter the script is complete.
    pub fn respawn(&mut self) -> Result<()> {
        self.shutdown();
        let fresh = Self::spawn(&self.command, &self.shell)?;
        *self = fresh;
        Ok(())
    }

    /// Binary stream to the child's data pipe.
    ///
    /// Pending script text is flushed first, so the child has seen every
    /// command written before the data.
    pub fn data_out(&mut self) -> io::Result<&mut File> {
        if let Some(stdin) = self.stdin.as_mut() {
            stdin.flush()?;
        }
        self.data.as_mut().ok_or_else(closed)
    }

    /// Buffered text stream to the child's stdin.
    pub fn out(&mut self) -> io::Result<&mut BufWriter<ChildStdin>> {
        self.stdin.as_mut().ok_or_else(closed)
    }

    pub fn fd_r(&self) -> RawFd {
        self.fds.read
    }

    pub fn fd_w(&self) -> RawFd {
        self.fds.write
    }

    pub fn fds(&self) -> [DataFds; NUM_CHANNELS] {
        [self.fds]
    }

    /// Pid of the running child, if it has not been torn down.
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Best effort teardown; failures are logged and otherwise ignored.
    fn shutdown(&mut self) {
        if let Some(data) = self.data.take() {
            close_fd(OwnedFd::from(data), "data pipe write end");
        }
        if let Some(stdin) = self.stdin.take() {
            match stdin.into_inner() {
                Ok(stdin) => close_fd(OwnedFd::from(stdin), "stdin"),
                Err(e) => tracing::error!(
                    backend = B::NAME,
                    "flushing script to stdin failed: {}",
                    e.error()
                ),
            }
        }
        if let Some(mut child) = self.child.take() {
            let pid = child.id();
            match child.wait() {
                Ok(status) => tracing::debug!(backend = B::NAME, pid, %status, "channel exited"),
                Err(e) => tracing::error!(backend = B::NAME, pid, "failed to wait for child: {e}"),
            }
        }
    }
}

impl<B: Backend> OutputSink for Channel<B> {
    fn write_text(&mut self, text: &[u8]) -> io::Result<()> {
        self.out()?.write_all(text)
    }
}

impl<B: Backend> Drop for Channel<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "channel already closed")
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
fn open_pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    let mut fds: [RawFd; 2] = [-1; 2];
    if unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) })
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
fn open_pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    let mut fds: [RawFd; 2] = [-1; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    let pair = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };
    set_cloexec(fds[0], true)?;
    set_cloexec(fds[1], true)?;
    Ok(pair)
}

fn set_cloexec(fd: RawFd, enabled: bool) -> io::Result<()> {
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFD) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }
    let new_flags = if enabled {
        flags | libc::FD_CLOEXEC
    } else {
        flags & !libc::FD_CLOEXEC
    };
    if unsafe { libc::fcntl(fd, libc::F_SETFD, new_flags) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn close_fd(fd: OwnedFd, what: &str) {
    let raw = fd.into_raw_fd();
    if unsafe { libc::close(raw) } == -1 {
        tracing::error!("closing {what} (fd {raw}) failed: {}", io::Error::last_os_error());
    }
}
