use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context as _};
use bezier_editor::{obj, Continuity, EditorConfig, Spline, Vector};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Tolerance used when reporting which continuity classes hold.
const REPORT_TOLERANCE: f64 = 1e-9;

#[derive(Parser, Debug)]
#[command(name = "bezier-editor", version, about = "Edit piecewise cubic Bézier splines stored as OBJ-like text")]
struct Cli {
    /// Editor configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a spline holding a single default curve.
    New(NewArgs),
    /// Append the default curve to a spline.
    Add(EditArgs),
    /// Print curve count, satisfied continuity classes and bounds.
    Info(InArgs),
    /// Enforce a continuity class across all curves.
    Enforce(EnforceArgs),
    /// Find the control point closest to a position.
    Pick(PickArgs),
    /// Move a control point, as when dragging it.
    Move(MoveArgs),
    /// Print sampled points, or the point, tangent and color at one parameter.
    Sample(SampleArgs),
    /// Step the markers and print their positions per frame.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Output spline file.
    #[arg(long)]
    out: PathBuf,

    /// Curve color as r,g,b in [0, 1], defaults to the configured one.
    #[arg(long, value_delimiter = ',', num_args = 3)]
    color: Option<Vec<f64>>,
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input spline file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Input spline file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output spline file, defaults to overwriting the input.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EnforceArgs {
    #[command(flatten)]
    io: EditArgs,

    /// Continuity class: c0, c1, c2, g0 or g1.
    #[arg(long)]
    kind: Continuity,
}

#[derive(Parser, Debug)]
struct PickArgs {
    #[command(flatten)]
    input: InArgs,

    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    z: f64,

    /// Pick radius, defaults to the configured one.
    #[arg(long)]
    radius: Option<f64>,
}

#[derive(Parser, Debug)]
struct MoveArgs {
    #[command(flatten)]
    io: EditArgs,

    /// Global control point index (curve * 4 + point).
    #[arg(long)]
    index: usize,

    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    z: f64,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    input: InArgs,

    /// Global parameter to evaluate; prints every sample when omitted.
    #[arg(long, allow_negative_numbers = true)]
    t: Option<f64>,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    input: InArgs,

    /// Number of frames to step.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Time between frames in milliseconds.
    #[arg(long, default_value_t = 16)]
    dt_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EditorConfig::default(),
    };

    match cli.cmd {
        Command::New(args) => cmd_new(&config, args),
        Command::Add(args) => cmd_add(&config, args),
        Command::Info(args) => cmd_info(&config, args),
        Command::Enforce(args) => cmd_enforce(&config, args),
        Command::Pick(args) => cmd_pick(&config, args),
        Command::Move(args) => cmd_move(&config, args),
        Command::Sample(args) => cmd_sample(&config, args),
        Command::Animate(args) => cmd_animate(&config, args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_spline(path: &Path, config: &EditorConfig) -> anyhow::Result<Spline> {
    let f = File::open(path).with_context(|| format!("open spline '{}'", path.display()))?;
    let spline = obj::read_obj(BufReader::new(f), config.import_samples_per_curve)
        .with_context(|| format!("read spline '{}'", path.display()))?;
    Ok(spline)
}

fn write_spline(path: &Path, spline: &Spline) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    obj::write_obj(spline, BufWriter::new(f))
        .with_context(|| format!("write spline '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn output_path(args: &EditArgs) -> &Path {
    args.out.as_deref().unwrap_or(&args.in_path)
}

fn cmd_new(config: &EditorConfig, args: NewArgs) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(color) = args.color {
        let [r, g, b] = color[..] else {
            bail!("--color expects three components, got {}", color.len());
        };
        config.curve_color = [r, g, b];
        config.validate().context("invalid --color")?;
    }
    let mut spline = config.new_spline();
    spline.add_curve(config.default_curve());
    write_spline(&args.out, &spline)
}

fn cmd_add(config: &EditorConfig, args: EditArgs) -> anyhow::Result<()> {
    let mut spline = read_spline(&args.in_path, config)?;
    spline.add_curve(config.default_curve());
    write_spline(output_path(&args), &spline)
}

fn cmd_info(config: &EditorConfig, args: InArgs) -> anyhow::Result<()> {
    let spline = read_spline(&args.in_path, config)?;
    println!("curves: {}", spline.len());
    println!("control points: {}", spline.control_point_count());

    let classes: Vec<String> = spline
        .continuity_classes(REPORT_TOLERANCE)
        .iter()
        .map(ToString::to_string)
        .collect();
    if classes.is_empty() {
        println!("continuity: none");
    } else {
        println!("continuity: {}", classes.join(" "));
    }

    if let Some(bounds) = spline.bounding_box() {
        for (axis, (min, max)) in ["x", "y", "z"].iter().zip(bounds) {
            println!("{axis}: [{min}, {max}]");
        }
    }
    Ok(())
}

fn cmd_enforce(config: &EditorConfig, args: EnforceArgs) -> anyhow::Result<()> {
    let mut spline = read_spline(&args.io.in_path, config)?;
    if spline.len() < 2 {
        eprintln!("fewer than two curves, nothing to enforce");
    }
    spline.enforce(args.kind);
    write_spline(output_path(&args.io), &spline)
}

fn cmd_pick(config: &EditorConfig, args: PickArgs) -> anyhow::Result<()> {
    let spline = read_spline(&args.input.in_path, config)?;
    let radius = args.radius.unwrap_or(config.pick_radius);
    match spline.index_control_point(radius, Vector::new(args.x, args.y, args.z)) {
        Some(index) => println!("{index}"),
        None => println!("none"),
    }
    Ok(())
}

fn cmd_move(config: &EditorConfig, args: MoveArgs) -> anyhow::Result<()> {
    let mut spline = read_spline(&args.io.in_path, config)?;
    if !spline.update_point(args.index, Vector::new(args.x, args.y, args.z)) {
        bail!(
            "control point {} out of range, spline has {}",
            args.index,
            spline.control_point_count()
        );
    }
    write_spline(output_path(&args.io), &spline)
}

fn cmd_sample(config: &EditorConfig, args: SampleArgs) -> anyhow::Result<()> {
    let mut spline = read_spline(&args.input.in_path, config)?;
    if spline.is_empty() {
        bail!("spline '{}' has no curves", args.input.in_path.display());
    }

    if let Some(t) = args.t {
        if let (Some(p), Some(d), Some(c)) = (spline.point(t), spline.tangent(t), spline.color_at(t)) {
            println!("point: {} {} {}", p.x, p.y, p.z);
            println!("tangent: {} {} {}", d.x, d.y, d.z);
            println!("color: {} {} {}", c.x, c.y, c.z);
        }
        return Ok(());
    }

    spline.sample();
    for (p, c) in spline.sampled_points().iter().zip(spline.sampled_colors()) {
        println!("{} {} {} {} {} {}", p.x, p.y, p.z, c.x, c.y, c.z);
    }
    Ok(())
}

fn cmd_animate(config: &EditorConfig, args: AnimateArgs) -> anyhow::Result<()> {
    let spline = read_spline(&args.input.in_path, config)?;
    if spline.is_empty() {
        bail!("spline '{}' has no curves", args.input.in_path.display());
    }

    let mut animator = config.animator();
    let dt = Duration::from_millis(args.dt_ms);
    for frame in 0..args.frames {
        animator.advance(dt);
        if let Some(markers) = animator.markers(&spline) {
            for (i, m) in markers.iter().enumerate() {
                println!(
                    "{frame} {i} t={:.4} pos=({:.4}, {:.4}, {:.4}) tip=({:.4}, {:.4}, {:.4})",
                    m.t,
                    m.position.x,
                    m.position.y,
                    m.position.z,
                    m.tangent_tip.x,
                    m.tangent_tip.y,
                    m.tangent_tip.z
                );
            }
        }
    }
    Ok(())
}
