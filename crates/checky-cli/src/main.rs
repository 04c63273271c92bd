use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use checky_labels::doctor as labels_doctor;
use checky_labels::format::{format_class_name, FruitCondition};
use checky_labels::LabelTable;
use checky_vision::doctor as vision_doctor;
use checky_vision::{DetectConfig, DetectOutcome, DetectionPipeline};

#[derive(Debug, Parser)]
#[command(name = "checky", version, about = "CitrusCheck - citrus ripeness detection toolkit")]
struct Cli {
    #[arg(long)]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate detection thresholds and the label table.
    Doctor,
    /// Run post-processing over a saved model output tensor.
    Detect {
        /// JSON tensor dump: {"num_channels", "num_elements", "data"}.
        #[arg(long)]
        tensor: String,
        /// Emit the surviving boxes as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the label table with display names and conditions.
    Labels,
}

#[derive(Debug, serde::Deserialize)]
struct Config {
    #[serde(default)]
    detect: DetectConfig,
    labels: LabelsCfg,
}

#[derive(Debug, serde::Deserialize)]
struct LabelsCfg {
    path: String,
}

/// On-disk form of one inference call's raw output.
#[derive(Debug, serde::Deserialize)]
struct TensorDump {
    num_channels: usize,
    num_elements: usize,
    data: Vec<f32>,
}

fn load_config(path: &str) -> Result<Config> {
    let s = std::fs::read_to_string(path).context("read config")?;
    Ok(toml::from_str(&s).context("parse config toml")?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    match cli.cmd {
        Command::Doctor => doctor(&cfg),
        Command::Detect { tensor, json } => detect(&cfg, &tensor, json),
        Command::Labels => labels(&cfg),
    }
}

fn doctor(cfg: &Config) -> Result<()> {
    info!("doctor: starting");
    vision_doctor::check_thresholds(&cfg.detect)?;
    let n = labels_doctor::check_table(&cfg.labels.path)?;
    info!("doctor: {} labels OK", n);
    info!("doctor: OK");
    Ok(())
}

fn detect(cfg: &Config, tensor_path: &str, json: bool) -> Result<()> {
    let labels = LabelTable::load(&cfg.labels.path)?;

    let s = std::fs::read_to_string(tensor_path)
        .with_context(|| format!("read tensor dump {}", tensor_path))?;
    let dump: TensorDump = serde_json::from_str(&s).context("parse tensor dump json")?;

    let pipeline = DetectionPipeline::new(cfg.detect.clone());
    let outcome = pipeline.process(&dump.data, dump.num_channels, dump.num_elements, &labels)?;

    match outcome {
        DetectOutcome::Empty => {
            if json {
                println!("[]");
            } else {
                println!("no detections");
            }
        }
        DetectOutcome::Detected(boxes) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&boxes)?);
            } else {
                for b in &boxes {
                    println!(
                        "{} {:.1}% box=({:.3},{:.3})-({:.3},{:.3})",
                        format_class_name(&b.class_name),
                        b.confidence * 100.0,
                        b.x1,
                        b.y1,
                        b.x2,
                        b.y2
                    );
                }
            }
        }
    }
    Ok(())
}

fn labels(cfg: &Config) -> Result<()> {
    let table = LabelTable::load(&cfg.labels.path)?;
    for (idx, name) in table.iter().enumerate() {
        match FruitCondition::from_label(name) {
            Some(cond) => println!(
                "{:3}  {:20} {:20} {}",
                idx,
                name,
                format_class_name(name),
                cond.description()
            ),
            None => println!("{:3}  {:20} {}", idx, name, format_class_name(name)),
        }
    }
    Ok(())
}
