//! Best-effort text recognition over a receipt image.
//!
//! Runs on a background thread while the user fills in the rest of the
//! form; the result only ever seeds the description prompt. Every failure
//! (missing tool, unreadable image, empty output) is silently dropped.

use std::path::Path;
use std::process::Command;
use std::thread::{self, JoinHandle};

use tracing::debug;

const RECOGNIZER: &str = "tesseract";

pub struct RecognitionHandle {
    handle: JoinHandle<Option<String>>,
}

pub fn recognize_in_background(image: &Path) -> RecognitionHandle {
    let image = image.to_path_buf();
    RecognitionHandle {
        handle: thread::spawn(move || recognize(&image)),
    }
}

impl RecognitionHandle {
    /// Text from the recognizer, but only if it already finished. A slow
    /// or hung recognizer must never stall the form, so a still-running
    /// thread is left behind and its result discarded.
    pub fn try_text(self) -> Option<String> {
        if !self.handle.is_finished() {
            return None;
        }
        self.handle.join().ok().flatten()
    }
}

fn recognize(image: &Path) -> Option<String> {
    match Command::new(RECOGNIZER).arg(image).arg("stdout").output() {
        Ok(output) if output.status.success() => {
            let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        Ok(output) => {
            debug!(status = %output.status, "receipt text recognition failed");
            None
        }
        Err(err) => {
            debug!(%err, "could not run the text recognizer");
            None
        }
    }
}
