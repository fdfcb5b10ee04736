pub mod classifier;
pub mod cli;
pub mod config;
pub mod decision;
pub mod detection;
pub mod hsv;
pub mod overlay;
pub mod processor;
pub mod progress;
pub mod recorder;
pub mod sampler;

pub use classifier::{ClassifierConfig, ClassifyError, ColorClassifier};
pub use decision::{BoundingBox, DecisionConfig, Detection, Signal, decide};
