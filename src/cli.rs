use argh::FromArgs;

/// Traffic light stop/go detection
#[derive(FromArgs, Debug)]
pub struct Args {
    /// source: video file, stream url or camera device
    #[argh(option, default = "String::from(\"./video/traffic_light.mp4\")")]
    pub source: String,

    /// path to a local model file, the hub model for --ver/--scale is used when omitted
    #[argh(option)]
    pub model: Option<String>,

    /// task: det
    #[argh(option, default = "String::from(\"det\")")]
    pub task: String,

    /// model dtype
    #[argh(option, default = "String::from(\"auto\")")]
    pub dtype: String,

    /// version
    #[argh(option, default = "8.0")]
    pub ver: f32,

    /// device: cuda, cpu, mps
    #[argh(option, default = "String::from(\"cpu:0\")")]
    pub device: String,

    /// scale: n, s, m, l
    #[argh(option, default = "String::from(\"m\")")]
    pub scale: String,

    /// detector class confidences passed to the model
    #[argh(option)]
    pub confs: Vec<f32>,

    /// minimum detection score for a traffic light to be classified
    #[argh(option, default = "0.5")]
    pub score_threshold: f32,

    /// class id of traffic lights in the detector taxonomy
    #[argh(option, default = "9")]
    pub traffic_light_label: usize,

    /// maximum detections considered per frame
    #[argh(option, default = "20")]
    pub max_detections: usize,

    /// fraction of red/yellow pixels above which a light means stop
    #[argh(option, default = "0.01")]
    pub color_threshold: f32,

    /// process every n-th frame
    #[argh(option, default = "10")]
    pub every: usize,

    /// viewer window scale
    #[argh(option, default = "0.8")]
    pub window_scale: f32,

    /// use headless mode
    #[argh(switch)]
    pub headless: bool,

    /// save the rendered frames into the run directory
    #[argh(switch)]
    pub record: bool,

    /// write the per-frame stop/go commands to the run directory
    #[argh(switch)]
    pub save_commands: bool,
}
