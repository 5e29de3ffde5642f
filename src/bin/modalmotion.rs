use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use modalmotion::{
    AnimationStyle, GeometryResolver, HeadlessSession, PresentationStyle, Rect, Size,
    TRANSITION_DURATION,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "modalmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved geometry of a style inside a container.
    Layout(LayoutArgs),
    /// Run a transition headlessly and print one JSON sample per step.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Presentation style JSON. Overrides `--preset`.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Built-in style used when no `--style` is given.
    #[arg(long, value_enum, default_value_t = Preset::FormSheet)]
    preset: Preset,

    /// Container width.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Container height.
    #[arg(long, default_value_t = 480.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Present first, then sample the dismissal instead.
    #[arg(long)]
    dismiss: bool,

    /// Samples over the transition duration.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Apply the overlay fade instantly instead of alongside the transition.
    #[arg(long)]
    no_coordinator: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    FormSheet,
    Drawer,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("modalmotion=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn load_style(args: &StyleArgs) -> anyhow::Result<(PresentationStyle, Size)> {
    let style = match &args.style {
        Some(path) => read_style_json(path)?,
        None => match args.preset {
            Preset::FormSheet => PresentationStyle::DEFAULT_FORM_SHEET,
            Preset::Drawer => PresentationStyle::DEFAULT_DRAWER,
        },
    };
    if !(args.width.is_finite() && args.height.is_finite())
        || args.width <= 0.0
        || args.height <= 0.0
    {
        anyhow::bail!("container size must be positive, got {}x{}", args.width, args.height);
    }
    Ok((style, Size::new(args.width, args.height)))
}

fn read_style_json(path: &Path) -> anyhow::Result<PresentationStyle> {
    PresentationStyle::from_path(path).with_context(|| format!("load style '{}'", path.display()))
}

fn rect_json(r: Rect) -> serde_json::Value {
    serde_json::json!({ "x": r.x0, "y": r.y0, "width": r.width(), "height": r.height() })
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let (style, container) = load_style(&args.style)?;
    let bounds = Rect::from_origin_size((0.0, 0.0), container);
    let size = GeometryResolver::target_size(&style, container);
    let presented = GeometryResolver::presented_frame(&style, bounds);

    let mut out = serde_json::json!({
        "style": style,
        "target_size": { "width": size.width, "height": size.height },
        "presented_frame": rect_json(presented),
    });
    match style {
        PresentationStyle::Drawer { side, .. } => {
            out["dismissed_frame"] = rect_json(GeometryResolver::dismissed_frame(presented, side));
        }
        PresentationStyle::FormSheet {
            animation_style: AnimationStyle::Slide { .. },
            ..
        } => {
            let offsets = GeometryResolver::slide_offsets_for(&style, presented)?;
            out["dismissed_frame"] = rect_json(offsets.dismissed);
            out["opposite_frame"] = rect_json(offsets.opposite);
        }
        PresentationStyle::FormSheet { .. } => {}
    }

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let (style, container) = load_style(&args.style)?;
    let steps = args.steps.max(1);
    let dt = TRANSITION_DURATION / steps;
    if dt.is_zero() {
        anyhow::bail!(
            "--steps {steps} is finer than 1ns over {TRANSITION_DURATION:?}; use at most {}",
            TRANSITION_DURATION.as_nanos()
        );
    }

    let mut session = HeadlessSession::new(container, style).with_coordinator(!args.no_coordinator);
    session.begin_presentation()?;
    if args.dismiss {
        session.settle(dt);
        session.begin_dismissal()?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", serde_json::to_string(&session.sample())?)?;
    let mut finished = false;
    let mut guard = 0u32;
    while !finished {
        finished = session.step(dt);
        writeln!(out, "{}", serde_json::to_string(&session.sample())?)?;
        guard += 1;
        if guard > steps.saturating_mul(4) {
            anyhow::bail!("transition did not finish after {guard} steps of {dt:?}");
        }
    }
    out.flush().context("flush samples")?;

    tracing::info!(steps = guard, step = ?dt, "animation sampled");
    Ok(())
}
