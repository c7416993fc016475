//! Kept in its own test binary: it takes over a specific descriptor
//! number, which must not race with other tests opening files.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use qplot::{Config, NoStyles, Null, Qplot};

#[derive(Clone, Default)]
struct Logs(Arc<Mutex<Vec<u8>>>);

impl Logs {
    fn text(&self) -> String {
        let buf = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for Logs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut b) = self.0.lock() {
            b.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn moved_descriptors_are_reported_after_respawn() -> Result<()> {
    let logs = Logs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || -> Result<()> {
        let mut qp: Qplot<Null, NoStyles> = Qplot::with_config(&Config::empty(), &())?;
        let header = qp.channel().fds()[0];

        qp.plot(&())?;
        assert_eq!(qp.channel().fds()[0], header);
        assert!(!logs.text().contains("descriptors changed"));

        // The parent closed its read end after spawning; occupying that
        // number forces the next pipe onto a different one.
        let blocker = unsafe { libc::dup2(2, header.read) };
        assert_eq!(blocker, header.read);

        let result = qp.plot(&());
        unsafe { libc::close(blocker) };
        result?;

        assert_ne!(qp.channel().fds()[0], header);
        let text = logs.text();
        assert!(text.contains("WARN"), "{text}");
        assert!(text.contains("data pipe descriptors changed after respawn"), "{text}");
        Ok(())
    })
}
