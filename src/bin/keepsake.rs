use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use keepsake::{CardStyle, Compositor, CompositorOpts, DEFAULT_FILE_NAME, FontSource, ImageSource};

#[derive(Parser, Debug)]
#[command(name = "keepsake", version)]
struct Cli {
    /// Log decode and render steps.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose four photos into a card PNG.
    Compose(ComposeArgs),
    /// Print the default card style as JSON.
    Style,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Photos in grid order: top-left, top-right, bottom-left, bottom-right.
    #[arg(num_args = 4, required = true, value_name = "PHOTO")]
    photos: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    out: PathBuf,

    /// Font file for the card text (falls back to `KEEPSAKE_FONT`, then system fonts).
    #[arg(long, conflicts_with = "no_text")]
    font: Option<PathBuf>,

    /// Render the card without text.
    #[arg(long, default_value_t = false)]
    no_text: bool,

    /// Style JSON overriding the default colours and copy.
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Style => cmd_style(),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let style = match &args.style {
        Some(path) => CardStyle::from_path(path)
            .with_context(|| format!("load style '{}'", path.display()))?,
        None => CardStyle::default(),
    };

    let font = if args.no_text {
        FontSource::None
    } else if let Some(path) = args.font.clone() {
        FontSource::File(path)
    } else if let Some(path) = std::env::var_os("KEEPSAKE_FONT").filter(|v| !v.is_empty()) {
        FontSource::File(PathBuf::from(path))
    } else {
        FontSource::System
    };

    let sources: [ImageSource; 4] = args
        .photos
        .iter()
        .cloned()
        .map(ImageSource::from_path)
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|v: Vec<ImageSource>| anyhow::anyhow!("expected 4 photos, got {}", v.len()))?;

    let compositor = Compositor::new(CompositorOpts::default().with_font(font).with_style(style))
        .context("configure compositor")?;
    let artifact = compositor.composite(&sources).context("compose card")?;
    let path = artifact
        .save(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_style() -> anyhow::Result<()> {
    let json = CardStyle::default().to_json_pretty()?;
    println!("{json}");
    Ok(())
}
