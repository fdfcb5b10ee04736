use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use stoplight::recorder::{self, FrameRecorder};
use stoplight::{cli, config, processor::SignalVideoProcessor};
use usls::{Annotator, DataLoader, Viewer, models::YOLO};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: cli::Args = argh::from_env();

    // Create timestamped output directory
    let output_dir = if args.record || args.save_commands {
        let dir = recorder::create_output_dir(Path::new("./runs"))?;
        info!("Created output directory: {}", dir.display());
        Some(dir)
    } else {
        None
    };

    let frame_recorder = match (&output_dir, args.record) {
        (Some(dir), true) => Some(FrameRecorder::new(dir)?),
        _ => None,
    };

    let mut model = YOLO::new(config::build_config(&args)?.commit()?)?;

    let data_loader = DataLoader::new(&args.source)
        .with_context(|| format!("Error opening video source {}", args.source))?
        .with_batch(model.batch() as _)
        .build()?;

    let annotator = Annotator::default();
    let mut viewer = Viewer::default().with_window_scale(args.window_scale);

    let mut processor = SignalVideoProcessor::new(&args, frame_recorder);
    let commands = processor.process_video(&args, &mut model, &mut viewer, &data_loader, &annotator)?;

    if let (Some(dir), true) = (&output_dir, args.save_commands) {
        let commands_path = dir.join("commands.csv");
        recorder::write_commands(&commands_path, &commands)?;
        info!("Commands saved to: {}", commands_path.display());
    }

    Ok(())
}
