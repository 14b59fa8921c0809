use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inkpad", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded input event log onto a fresh pad and write the result.
    Render(RenderArgs),
    /// Fit the content of an existing image into new dimensions.
    Rescale(RescaleArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Event log JSON: `{ "viewport": [w, h], "display": {..}, "events": [..] }`.
    #[arg(long)]
    events: PathBuf,

    /// Pad configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// JPEG quality (1-100).
    #[arg(long)]
    quality: Option<u8>,

    /// Also print the pad's signature data URL to stdout.
    #[arg(long)]
    print_signature: bool,
}

#[derive(Parser, Debug)]
struct RescaleArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target width in pixels.
    #[arg(long)]
    width: u32,

    /// Target height in pixels.
    #[arg(long)]
    height: u32,

    /// Background color of the input (`#RRGGBB`).
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for inkpad::ImageFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => inkpad::ImageFormat::Png,
            FormatChoice::Jpeg => inkpad::ImageFormat::Jpeg,
        }
    }
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EventLog {
    viewport: (f64, f64),
    #[serde(default)]
    display: inkpad::DisplayInfo,
    events: Vec<inkpad::InputEvent>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Rescale(args) => cmd_rescale(args),
    }
}

fn read_event_log(path: &Path) -> anyhow::Result<EventLog> {
    let f = File::open(path).with_context(|| format!("open event log '{}'", path.display()))?;
    let r = BufReader::new(f);
    let log: EventLog = serde_json::from_reader(r).with_context(|| "parse event log JSON")?;
    Ok(log)
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => inkpad::PadConfig::from_path(path)?,
        None => inkpad::PadConfig::default(),
    };
    let log = read_event_log(&args.events)?;

    let mut pad = inkpad::Pad::new(config, log.display, log.viewport);
    let mut strokes = 0usize;
    for ev in log.events {
        if pad.handle_input(ev).event == Some(inkpad::PadEvent::StrokeEnd) {
            strokes += 1;
        }
    }

    let img = pad.to_image(args.format.into(), args.quality)?;
    create_parent_dir(&args.out)?;
    img.write_to_path(&args.out)?;

    if args.print_signature {
        println!("{}", pad.signature());
    }
    eprintln!(
        "wrote {} ({}x{}, {} strokes, empty={})",
        args.out.display(),
        img.width,
        img.height,
        strokes,
        pad.is_empty()
    );
    Ok(())
}

fn cmd_rescale(args: RescaleArgs) -> anyhow::Result<()> {
    let background = inkpad::ColorDef::parse(&args.background)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("parse background color '{}'", args.background))?
        .to_rgba8();

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let decoded = inkpad::codec::decode_image(&bytes)?;
    let mut surface = inkpad::Surface::from_premul_rgba8(
        decoded.width,
        decoded.height,
        1.0,
        decoded.rgba8_premul,
    )
    .context("decoded image does not match its dimensions")?;

    let outcome = inkpad::rescale::auto_crop_rescale(
        &mut surface,
        args.width,
        args.height,
        1.0,
        background,
    )?;
    let img = inkpad::codec::encode(&mut surface, background, inkpad::ImageFormat::Png, None)?;

    create_parent_dir(&args.out)?;
    img.write_to_path(&args.out)?;
    eprintln!("wrote {} ({outcome:?})", args.out.display());
    Ok(())
}
