use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stickframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check an exported animation JSON file.
    Validate {
        /// Input animation JSON.
        #[arg(long = "in")]
        in_path: PathBuf,
    },
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Export a looping GIF.
    Gif(ExportArgs),
    /// Export a WebM video (requires `ffmpeg` on PATH).
    Webm(ExportArgs),
    /// List the saved animation library.
    Saved(SavedArgs),
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Canvas width in pixels (defaults to settings / `STICKFRAME_CANVAS_WIDTH`).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (defaults to settings / `STICKFRAME_CANVAS_HEIGHT`).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input animation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw the neighboring frames tinted red/blue.
    #[arg(long)]
    onion: bool,

    /// Draw the background grid.
    #[arg(long)]
    grid: bool,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Input animation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct SavedArgs {
    /// Store directory (defaults to the per-user data directory).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Write entry N of the library as an exported JSON document.
    #[arg(long, requires = "out")]
    export: Option<usize>,

    /// Output path for `--export`.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate { in_path } => cmd_validate(&in_path),
        Command::Frame(args) => cmd_frame(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Webm(args) => cmd_webm(args),
        Command::Saved(args) => cmd_saved(args),
    }
}

fn read_document(path: &Path) -> anyhow::Result<stickframe::AnimationDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read animation '{}'", path.display()))?;
    let doc = stickframe::import_json(&json)
        .with_context(|| format!("invalid animation '{}'", path.display()))?;
    Ok(doc)
}

fn read_animation(path: &Path) -> anyhow::Result<stickframe::Animation> {
    Ok(read_document(path)?.into_animation()?)
}

fn resolve_canvas(args: &CanvasArgs) -> anyhow::Result<stickframe::Canvas> {
    let settings = stickframe::EditorSettings::from_env();
    let canvas = stickframe::Canvas::new(
        args.width.unwrap_or(settings.canvas.width),
        args.height.unwrap_or(settings.canvas.height),
    )?;
    Ok(canvas)
}

fn cmd_validate(in_path: &Path) -> anyhow::Result<()> {
    let doc = read_document(in_path)?;
    let strokes: usize = doc.frames.iter().map(|f| f.len()).sum();
    println!(
        "ok: {} frames, {} strokes, {} fps, brush {}",
        doc.frames.len(),
        strokes,
        doc.frame_rate(),
        doc.brush_width()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut anim = read_animation(&args.in_path)?;
    let canvas = resolve_canvas(&args.canvas)?;
    let settings = stickframe::EditorSettings::from_env();

    if !anim.go_to_frame(args.frame) {
        anyhow::bail!(
            "frame {} out of range (animation has {} frames)",
            args.frame,
            anim.frame_count()
        );
    }
    let (prev, next) = if args.onion {
        anim.neighbors()
    } else {
        (None, None)
    };
    let overlays = stickframe::FrameOverlays {
        background: Some(stickframe::Rgba8::WHITE),
        grid: args.grid.then_some(stickframe::GridOverlay {
            spacing: settings.grid_spacing,
        }),
        onion_prev: prev,
        onion_next: next,
        selection: None,
    };
    let frame = stickframe::render_still(&anim, args.frame, canvas, &overlays)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_gif(args: ExportArgs) -> anyhow::Result<()> {
    let anim = read_animation(&args.in_path)?;
    let canvas = resolve_canvas(&args.canvas)?;
    let mut sink = stickframe::GifSink::create(&args.out)?;
    stickframe::export_animation(&anim, canvas, &mut sink)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_webm(args: ExportArgs) -> anyhow::Result<()> {
    let anim = read_animation(&args.in_path)?;
    let canvas = resolve_canvas(&args.canvas)?;
    let mut sink = stickframe::WebmSink::new(stickframe::WebmSinkOpts::new(&args.out));
    stickframe::export_animation(&anim, canvas, &mut sink)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_saved(args: SavedArgs) -> anyhow::Result<()> {
    let dir = args
        .dir
        .or_else(stickframe::FileStore::default_location)
        .context("no data directory available; pass --dir")?;
    let persistence = stickframe::StorePersistence::new(stickframe::FileStore::new(dir));
    let saved = stickframe::Persistence::load_animations(&persistence);

    if let Some(index) = args.export {
        let entry = saved
            .get(index)
            .with_context(|| format!("no saved animation at index {index}"))?;
        let anim = entry.to_animation()?;
        let json = stickframe::export_json(&anim, &entry.name)?;
        let out = args.out.context("--export requires --out")?;
        std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
        return Ok(());
    }

    if saved.is_empty() {
        println!("no saved animations");
    }
    for (i, entry) in saved.iter().enumerate() {
        println!(
            "{i}\t{}\t{} frames\t{} fps\t{}",
            entry.name,
            entry.frames.len(),
            entry.fps,
            entry.date.to_rfc3339()
        );
    }
    Ok(())
}
