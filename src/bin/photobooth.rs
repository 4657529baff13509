use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use photobooth::{
    BoothSession, CameraFilter, FrameCatalog, GridSpec, OutputFormat, SessionOpts, apply_frame,
    encode_rgba, grid_layout, load_photo,
};

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tile photos into one print.
    Compose(ComposeArgs),
    /// Bake a decorative frame around an image.
    Frame(FrameArgs),
    /// List the frames of a catalog.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input photos, in capture order.
    #[arg(long = "photo", required = true, num_args = 1..)]
    photos: Vec<PathBuf>,

    /// Named layout (`4x6-single`, `2x4-vertical-2`, `4x6-4cut`, `5x7-6cut`).
    #[arg(long, conflicts_with_all = ["columns", "rows"])]
    layout: Option<String>,

    #[arg(long, requires = "rows")]
    columns: Option<u32>,

    #[arg(long, requires = "columns")]
    rows: Option<u32>,

    /// Layout id passed along with explicit columns/rows.
    #[arg(long, requires = "columns")]
    grid_id: Option<String>,

    /// Camera filter applied to every photo.
    #[arg(long, default_value = "none", value_parser = parse_filter)]
    filter: CameraFilter,

    /// Session options JSON (dpi, output, threads).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured print resolution.
    #[arg(long)]
    dpi: Option<u32>,

    /// Frame id to apply after composing.
    #[arg(long)]
    frame: Option<String>,

    /// Frame catalog JSON used with `--frame`. Defaults to the built-in frames.
    #[arg(long, requires = "frame")]
    catalog: Option<PathBuf>,

    /// Output path; `.png` writes PNG, anything else the configured format.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame id.
    #[arg(long)]
    frame: String,

    /// Frame catalog JSON. Defaults to the built-in frames.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output path; the extension picks JPEG or PNG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Frame catalog JSON. Defaults to the built-in frames.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the catalog as JSON instead of one line per frame.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_filter(s: &str) -> Result<CameraFilter, String> {
    CameraFilter::parse(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Cow<'static, FrameCatalog>> {
    match path {
        Some(p) => FrameCatalog::from_path(p)
            .map(Cow::Owned)
            .with_context(|| format!("load frame catalog '{}'", p.display())),
        None => Ok(Cow::Borrowed(FrameCatalog::builtin())),
    }
}

/// Output format for `out`. A JPEG extension keeps the configured JPEG quality.
fn format_for(out: &Path, configured: OutputFormat) -> OutputFormat {
    let by_ext = out
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension);
    match (by_ext, configured) {
        (Some(OutputFormat::Jpeg { .. }), OutputFormat::Jpeg { .. }) | (None, _) => configured,
        (Some(f), _) => f,
    }
}

fn resolve_grid(args: &ComposeArgs) -> anyhow::Result<GridSpec> {
    if let Some(id) = &args.layout {
        let layout = grid_layout(id).with_context(|| format!("unknown layout '{id}'"))?;
        return Ok(layout.spec());
    }
    let (Some(columns), Some(rows)) = (args.columns, args.rows) else {
        anyhow::bail!("either --layout or both --columns and --rows are required");
    };
    let grid = GridSpec::new(columns, rows);
    Ok(match &args.grid_id {
        Some(id) => grid.with_id(id.clone()),
        None => grid,
    })
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(p) => SessionOpts::from_path(p)
            .with_context(|| format!("load session config '{}'", p.display()))?,
        None => SessionOpts::default(),
    };
    if let Some(dpi) = args.dpi {
        opts.dpi = dpi;
    }
    opts.output = format_for(&args.out, opts.output);

    let grid = resolve_grid(&args)?;
    let sources = args
        .photos
        .iter()
        .map(|p| std::fs::read(p).with_context(|| format!("read photo '{}'", p.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut session = BoothSession::new(opts)?;
    if let Some(p) = &args.catalog {
        session = session.with_catalog(load_catalog(Some(p.as_path()))?.into_owned());
    }
    session.set_filter(args.filter);
    session.select_grid(grid)?;
    session.capture_all(&sources)?;
    session.compose()?;
    if let Some(id) = &args.frame {
        session.apply_frame(id)?;
    }

    let out = session
        .composite()
        .context("session produced no composite")?;
    out.write_to(&args.out)?;
    eprintln!("wrote {} ({}x{})", args.out.display(), out.width, out.height);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let frame = catalog.require(&args.frame)?;
    let photo = load_photo(&args.in_path)?;

    let framed = apply_frame(photo.pixels(), frame)?;
    let encoded = encode_rgba(&framed, format_for(&args.out, OutputFormat::default()))?;
    encoded.write_to(&args.out)?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        encoded.width,
        encoded.height
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    if args.json {
        let frames: Vec<_> = catalog.iter().collect();
        let s = serde_json::to_string_pretty(&frames).context("serialize frame catalog")?;
        println!("{s}");
        return Ok(());
    }
    for frame in catalog.iter() {
        println!("{}\t{}", frame.id, frame.name);
    }
    Ok(())
}
