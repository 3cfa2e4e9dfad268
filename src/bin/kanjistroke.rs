use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kanjistroke::{
    DisplayMode, KanjiVg, ModeController, PayloadOptions, PngDirSink, Rasterizer, ViewerConfig,
    encode_payload, render_frames, snapshot_markup,
};

#[derive(Parser, Debug)]
#[command(name = "kanjistroke", version)]
struct Cli {
    /// Log debug output (otherwise `RUST_LOG`, default `warn`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the base64 payload for a character's KanjiVG file.
    Encode(EncodeArgs),
    /// List the characters available in a KanjiVG directory.
    List(ListArgs),
    /// Write the presented character as SVG or PNG.
    Snapshot(SnapshotArgs),
    /// Write the stroke-by-stroke animation as numbered PNG frames.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Character to encode.
    character: char,

    /// KanjiVG `kanji` directory.
    #[arg(long)]
    data_dir: PathBuf,

    /// Variant suffix, e.g. `Kaisho`.
    #[arg(long)]
    variant: Option<String>,

    /// Strip stroke-number labels.
    #[arg(long, default_value_t = false)]
    remove_numbers: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// KanjiVG `kanji` directory.
    #[arg(long)]
    data_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// File holding the base64 payload.
    #[arg(long)]
    payload: PathBuf,

    /// Character the payload belongs to.
    #[arg(long = "char")]
    character: char,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// `color`, `animate` or `outline`; anything else means `outline`.
    #[arg(long, default_value = "color")]
    mode: String,

    /// Milliseconds of animation to play before the snapshot (animate mode).
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Output path; `.svg` writes markup, anything else a PNG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output directory for `frame_NNNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Stop after this many frames even if drawing continues.
    #[arg(long, default_value_t = 10_000)]
    max_frames: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::List(args) => cmd_list(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let kanji = KanjiVg::load(&args.data_dir, args.character, args.variant.as_deref())?;
    let payload = encode_payload(
        &kanji.svg,
        &PayloadOptions {
            remove_numbers: args.remove_numbers,
        },
    );
    println!("{payload}");
    Ok(())
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    for kanji in KanjiVg::all(&args.data_dir)? {
        println!(
            "{}\tU+{:04X}\t{}\t{}",
            kanji.character,
            u32::from(kanji.character),
            kanji.ascii_filename(),
            kanji.character_filename()
        );
    }
    Ok(())
}

fn load_controller(view: &ViewArgs, mode: DisplayMode) -> anyhow::Result<ModeController> {
    let config = match &view.config {
        Some(path) => ViewerConfig::from_path(path)?,
        None => ViewerConfig::default(),
    };
    let payload = std::fs::read_to_string(&view.payload)
        .with_context(|| format!("read payload '{}'", view.payload.display()))?;

    let mut ctl = ModeController::with_virtual_clock(config)?;
    if !ctl.set_kanji(view.character, Some(payload.trim()), mode) {
        anyhow::bail!(
            "payload '{}' does not contain usable markup",
            view.payload.display()
        );
    }
    Ok(ctl)
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let mut ctl = load_controller(&args.view, DisplayMode::parse(&args.mode))?;
    ctl.advance(args.at_ms);

    if is_svg_path(&args.out) {
        let markup = snapshot_markup(ctl.container())
            .context("container is hidden or empty; nothing to write")?;
        if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&args.out, markup)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let raster = Rasterizer::new(ctl.config().display);
        raster.rasterize(ctl.container())?.save_png(&args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut ctl = load_controller(&args.view, DisplayMode::Animate)?;
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = PngDirSink::new(&args.out_dir);
    let frames = render_frames(&mut ctl, &raster, args.fps, args.max_frames, &mut sink)?;

    eprintln!(
        "wrote {frames} frames to {} ({:?})",
        args.out_dir.display(),
        ctl.sequencer_state()
    );
    Ok(())
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}
