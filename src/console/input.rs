use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

const LINE_BUFFER: usize = 16;

/// Forwards lines from `reader` on a detached OS thread.
///
/// A blocked read never holds up runtime shutdown: the session can stop
/// after `quit` while the thread is still waiting for the next line. The
/// channel closes at end of input or on a read error.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    let spawned = thread::Builder::new()
        .name("stdin-lines".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("stdin: {e}");
                        break;
                    }
                }
            }
            debug!("Input closed");
        });
    if let Err(e) = spawned {
        warn!("Failed to start input thread: {e}");
    }
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};
    use std::sync::mpsc as std_mpsc;
    use std::time::{Duration, Instant};

    /// Yields its script, then blocks until the test releases it.
    struct HeldOpen {
        script: Cursor<Vec<u8>>,
        release: std_mpsc::Receiver<()>,
    }

    impl Read for HeldOpen {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.script.read(buf)?;
            if n > 0 {
                return Ok(n);
            }
            let _ = self.release.recv();
            Ok(0)
        }
    }

    #[test]
    fn forwards_lines_until_end_of_input() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let mut lines = spawn_line_reader(Cursor::new("draw\nundo\n"));
        let received: Vec<String> = runtime.block_on(async {
            let mut out = Vec::new();
            while let Some(line) = lines.recv().await {
                out.push(line);
            }
            out
        });
        assert_eq!(received, vec!["draw", "undo"]);
    }

    #[test]
    fn quit_does_not_wait_for_more_input() {
        let (release, held) = std_mpsc::channel();
        let reader = BufReader::new(HeldOpen {
            script: Cursor::new(b"quit\n".to_vec()),
            release: held,
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let mut lines = spawn_line_reader(reader);
        let first = runtime.block_on(async {
            tokio::time::timeout(Duration::from_secs(5), lines.recv()).await
        });
        assert_eq!(first.unwrap().as_deref(), Some("quit"));

        // The reader is now blocked on a read that has not returned.
        let started = Instant::now();
        drop(lines);
        drop(runtime);
        assert!(started.elapsed() < Duration::from_secs(1));

        let _ = release.send(());
    }
}
