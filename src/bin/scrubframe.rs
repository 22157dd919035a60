use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use scrubframe::{
    CpuSurface, FrameLoader, FsFrameLoader, ScrollSequence, SequenceConfig, SimulatedHost,
    SurfaceSize, ViewportQuery, ViewportSize, ViewportSnapshot,
};

#[derive(Parser, Debug)]
#[command(name = "scrubframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every frame locator of the sequence, in playback order.
    Locate(LocateArgs),
    /// Render what the canvas shows at one scroll position as a PNG.
    Frame(FrameArgs),
    /// Scroll from top to bottom and write a PNG for every tick that repainted.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Sequence config JSON. Defaults to the stock 96-frame sequence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the locator base directory.
    #[arg(long)]
    base_dir: Option<String>,

    /// Override the number of frames.
    #[arg(long)]
    frame_count: Option<usize>,
}

#[derive(Args, Debug)]
struct HostArgs {
    /// Directory that locators are resolved against (the web root).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Document scroll height. Defaults to four viewports.
    #[arg(long)]
    scroll_height: Option<f64>,

    /// Device pixel ratio (only used when the config enables hidpi).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Give up if frames are still loading after this many seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Args, Debug)]
struct LocateArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    host: HostArgs,

    /// Scroll offset in logical pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    host: HostArgs,

    /// Number of scroll steps between top and bottom.
    #[arg(long, default_value_t = 24)]
    steps: u32,

    /// Output directory for `step-NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Locate(args) => cmd_locate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<SequenceConfig> {
    let mut cfg = match &args.config {
        Some(path) => SequenceConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SequenceConfig::default(),
    };
    if let Some(base_dir) = &args.base_dir {
        cfg.base_dir = base_dir.clone();
    }
    if let Some(n) = args.frame_count {
        cfg.frame_count = n;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let seq = cfg.descriptor()?;
    for (_, locator) in seq.locators() {
        println!("{locator}");
    }
    Ok(())
}

fn initial_viewport(host: &HostArgs) -> anyhow::Result<ViewportSnapshot> {
    let size = ViewportSize::new(host.width, host.height)?;
    if size.width < 1.0 || size.height < 1.0 {
        anyhow::bail!("viewport must be at least 1x1, got {}x{}", host.width, host.height);
    }
    let scroll_height = host.scroll_height.unwrap_or(host.height * 4.0);
    let mut vp = ViewportSnapshot::new(0.0, scroll_height, size);
    vp.device_pixel_ratio = host.dpr;
    Ok(vp)
}

fn mount(
    cfg: &SequenceConfig,
    host_args: &HostArgs,
) -> anyhow::Result<(SimulatedHost, ScrollSequence<CpuSurface>)> {
    let mut host = SimulatedHost::new(initial_viewport(host_args)?);
    let loader: Arc<dyn FrameLoader> = Arc::new(FsFrameLoader::new(&host_args.root));
    let surface = CpuSurface::new(SurfaceSize::default(), cfg.clear_rgba);
    let mut seq = ScrollSequence::mount(cfg, loader, surface, host.registry())?;

    let timeout = Duration::from_secs(host_args.timeout_secs);
    let started = Instant::now();
    while !seq.is_active() {
        host.tick(&mut seq);
        if seq.is_active() {
            break;
        }
        let state = seq.store().load_state();
        if state.is_settled() {
            anyhow::bail!(
                "{} of {} frames failed to load from '{}'",
                state.failed().len(),
                state.total(),
                host_args.root.display()
            );
        }
        if started.elapsed() >= timeout {
            anyhow::bail!(
                "timed out after {timeout:?} with {}/{} frames loaded",
                state.completed(),
                state.total()
            );
        }
        std::thread::sleep(Duration::from_millis(4));
    }
    tracing::info!(ticks = host.ticks(), status = ?seq.load_status(), "sequence loaded");
    Ok((host, seq))
}

fn write_png(seq: &ScrollSequence<CpuSurface>, out: &Path) -> anyhow::Result<()> {
    let surface = seq.surface().context("canvas is gone")?;
    let frame = surface.snapshot().into_straight();

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let (mut host, mut seq) = mount(&cfg, &args.host)?;

    host.scroll_to(args.scroll, &mut seq);
    host.tick(&mut seq);

    write_png(&seq, &args.out)?;
    eprintln!(
        "wrote {} (frame {})",
        args.out.display(),
        seq.current_index().locator_number()
    );
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be >= 1");
    }
    let cfg = load_config(&args.config)?;
    let (mut host, mut seq) = mount(&cfg, &args.host)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let extent = host.viewport().scrollable_extent().max(0.0);
    let mut written = 0usize;
    for step in 0..=args.steps {
        let offset = extent * f64::from(step) / f64::from(args.steps);
        host.scroll_to(offset, &mut seq);
        // Step 0 shows the frame drawn on activation.
        if host.tick(&mut seq) || step == 0 {
            let out = args.out_dir.join(format!("step-{step:04}.png"));
            write_png(&seq, &out)?;
            written += 1;
            tracing::debug!(step, frame = seq.current_index().0, "wrote {}", out.display());
        }
    }

    eprintln!(
        "wrote {written} frames to {}",
        args.out_dir.display()
    );
    Ok(())
}
