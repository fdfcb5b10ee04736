use crate::classifier::ClassifierConfig;
use crate::cli::Args;
use crate::decision::DecisionConfig;
use anyhow::Result;
use usls::{Config, NAMES_COCO_80};

/// Builds a YOLO model configuration from command line arguments
pub fn build_config(args: &Args) -> Result<Config> {
    let config = Config::yolo()
        .with_model_file(args.model.as_ref().map_or("", String::as_str))
        .with_task(args.task.parse()?)
        .with_version(args.ver.try_into()?)
        .with_scale(args.scale.parse()?)
        .with_model_dtype(args.dtype.parse()?)
        .with_model_device(args.device.parse()?)
        .with_class_confs(if args.confs.is_empty() {
            &[0.35]
        } else {
            &args.confs
        })
        .with_class_names(&NAMES_COCO_80)
        .with_model_num_dry_run(2);

    Ok(config)
}

/// Colour heuristic settings, with the stop threshold taken from the command line
pub fn classifier_config(args: &Args) -> ClassifierConfig {
    ClassifierConfig::default().with_threshold(args.color_threshold)
}

/// Which detections count as traffic lights for the frame decision
pub fn decision_config(args: &Args) -> DecisionConfig {
    DecisionConfig {
        score_threshold: args.score_threshold,
        target_label: args.traffic_light_label,
        max_detections: args.max_detections,
    }
}
