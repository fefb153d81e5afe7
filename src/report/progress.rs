//! Animated "scanning" indicator.
//!
//! The scan runs on its own task and hands its result back through a
//! `oneshot` channel: written once by the scan task, read once by the
//! indicator loop. The loop redraws a frame on every tick until the value
//! arrives, then clears the line.

use crate::core::ScanError;
use crate::report::terminal::render_scanning_line;

use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tokio::sync::oneshot;

/// Animation frames, cycled in order.
pub const FRAMES: [&str; 4] = ["●··", "·●·", "··●", "·●·"];

/// Delay between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(150);

/// Draws the indicator to a writer while a task runs.
#[derive(Debug)]
pub struct Indicator<W: Write> {
    label: String,
    writer: W,
    enabled: bool,
}

impl Indicator<std::io::Stderr> {
    /// Indicator on stderr.
    pub fn stderr(label: impl Into<String>, enabled: bool) -> Self {
        Self::new(label, std::io::stderr(), enabled)
    }
}

impl<W: Write> Indicator<W> {
    /// Creates an indicator. When `enabled` is false nothing is drawn.
    pub fn new(label: impl Into<String>, writer: W, enabled: bool) -> Self {
        Self {
            label: label.into(),
            writer,
            enabled,
        }
    }

    /// Runs `task` to completion on a spawned task, animating meanwhile.
    pub async fn run<T, F>(mut self, task: F) -> Result<T, ScanError>
    where
        F: Future<Output = Result<T, ScanError>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, mut rx) = oneshot::channel();
        tokio::spawn(async move {
            // The receiver only goes away if the caller was dropped.
            let _ = tx.send(task.await);
        });

        let received = if self.enabled {
            let mut ticker = tokio::time::interval(FRAME_INTERVAL);
            let mut frame = 0usize;
            let received = loop {
                tokio::select! {
                    value = &mut rx => break value,
                    _ = ticker.tick() => {
                        self.draw(FRAMES[frame % FRAMES.len()]);
                        frame += 1;
                    }
                }
            };
            self.clear();
            received
        } else {
            rx.await
        };

        received.map_err(|_| ScanError::internal("scan task ended without a result"))?
    }

    fn draw(&mut self, frame: &str) {
        let line = render_scanning_line(&self.label, frame);
        let _ = write!(self.writer, "\r\x1b[2K{}", line);
        let _ = self.writer.flush();
    }

    fn clear(&mut self) {
        let _ = write!(self.writer, "\r\x1b[2K");
        let _ = self.writer.flush();
    }
}
