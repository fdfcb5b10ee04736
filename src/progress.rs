use crate::decision::Signal;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress tracker for a stop/go run over a video stream
pub struct SignalProgressTracker {
    progress_bar: ProgressBar,
    start_time: Instant,
    processed_frames: u64,
    stop_frames: u64,
    go_frames: u64,
}

impl SignalProgressTracker {
    /// Creates a spinner-style tracker; the stream length is not known up front
    pub fn new(operation_name: &str) -> Self {
        let progress_bar = ProgressBar::new_spinner();
        Self::with_bar(progress_bar, operation_name)
    }

    #[cfg(test)]
    fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden(), "")
    }

    fn with_bar(progress_bar: ProgressBar, operation_name: &str) -> Self {
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {pos} frames | {msg}")
        {
            progress_bar.set_style(style);
        }
        progress_bar.set_message(format!("Processing {}", operation_name));

        Self {
            progress_bar,
            start_time: Instant::now(),
            processed_frames: 0,
            stop_frames: 0,
            go_frames: 0,
        }
    }

    /// Records the decision of one processed frame
    pub fn record(&mut self, signal: Signal) {
        self.processed_frames += 1;
        if signal.is_go() {
            self.go_frames += 1;
        } else {
            self.stop_frames += 1;
        }
        self.progress_bar.inc(1);

        let msg = self.get_progress_message();
        self.progress_bar.set_message(msg);
    }

    fn get_progress_message(&self) -> String {
        if self.processed_frames == 0 {
            return "Starting...".to_string();
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            self.processed_frames as f64 / elapsed
        } else {
            0.0
        };

        format!(
            "stop: {} | go: {} | Speed: {:.1} fps",
            self.stop_frames, self.go_frames, fps
        )
    }

    /// Finishes the progress bar with a run summary
    pub fn finish(&self) {
        let total_time = self.start_time.elapsed();
        let message = format!(
            "Completed! Frames: {} (stop: {}, go: {}) | Processing: {}",
            self.processed_frames,
            self.stop_frames,
            self.go_frames,
            format_duration(total_time.as_secs_f64())
        );
        self.progress_bar.finish_with_message(message);
    }

    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }

    pub fn stop_frames(&self) -> u64 {
        self.stop_frames
    }

    pub fn go_frames(&self) -> u64 {
        self.go_frames
    }
}

/// Formats a duration in seconds to h:mm:ss format
fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
