use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    thread,
};

use anyhow::Context;
use crossbeam_channel::Sender;

use crate::types::LandmarkFrame;

/// Open the frame source: a JSON-lines file, or stdin when no path is
/// given. Opening happens in the caller's thread so a bad path fails the
/// run up front.
pub fn open_source(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead + Send>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open frame source {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Stream frames into the channel, one JSON object per line. Blank lines
/// are skipped; a line that does not parse is logged and skipped. The
/// worker exits when the source is exhausted or the receiver is gone.
pub fn start_replay(
    reader: Box<dyn BufRead + Send>,
    frame_tx: Sender<LandmarkFrame>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for (line_no, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("frame source failed at line {}: {err}", line_no + 1);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let frame: LandmarkFrame = match serde_json::from_str(&line) {
                Ok(frame) => frame,
                Err(err) => {
                    log::warn!("skipping malformed frame at line {}: {err}", line_no + 1);
                    continue;
                }
            };
            // The tracker consumes frames strictly in order, so block
            // rather than drop when it falls behind.
            if frame_tx.send(frame).is_err() {
                break;
            }
        }
    })
}
