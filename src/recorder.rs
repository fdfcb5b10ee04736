use anyhow::{Context, Result};
use chrono::Local;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates a timestamped run directory `<base>/<YYYYmmdd_HHMMSS>` and returns its path
pub fn create_output_dir(base: &Path) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let output_dir = base.join(timestamp);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    Ok(output_dir)
}

/// Writes rendered frames into a run directory, one PNG per processed frame
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    dir: PathBuf,
    written: u64,
}

impl FrameRecorder {
    /// Records into `<run_dir>/frames`, creating it if needed
    pub fn new(run_dir: &Path) -> Result<Self> {
        let dir = run_dir.join("frames");
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create frame directory {}", dir.display()))?;
        Ok(Self { dir, written: 0 })
    }

    /// Saves `frame` as `frame_<frame_number>.png` and returns the written path
    pub fn write(&mut self, frame_number: u64, frame: &RgbImage) -> Result<PathBuf> {
        let path = self.dir.join(format!("frame_{:06}.png", frame_number));
        frame
            .save(&path)
            .with_context(|| format!("Failed to write frame {}", path.display()))?;
        self.written += 1;
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

/// Writes one `index,command` line per processed frame
pub fn write_commands(path: &Path, commands: &[bool]) -> Result<()> {
    let mut content = String::from("index,command\n");
    for (i, go) in commands.iter().enumerate() {
        content.push_str(&format!("{},{}\n", i, if *go { "go" } else { "stop" }));
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
