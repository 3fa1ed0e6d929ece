use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{Parser, ValueEnum};

use roundel_engine::logging::{init_logging, LoggingConfig};
use roundel_mkml::DslDocument;
use roundel_ui::prelude::*;

/// How `--width` / `--height` constrain the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MeasureMode {
    /// The view is offered exactly width x height.
    Exact,
    /// The view may take up to width x height.
    AtMost,
    /// The view takes its image's natural size.
    Unspecified,
}

#[derive(Debug, Parser)]
#[command(name = "roundel-studio", version, about = "Render a CircleImageView layout to PNG")]
struct Args {
    /// Layout file (.mkml). Imports resolve relative to it.
    #[arg(long)]
    layout: PathBuf,

    /// Drawable resource as NAME=PATH. Repeatable.
    #[arg(long = "image", value_name = "NAME=PATH", value_parser = parse_named_path)]
    images: Vec<(String, PathBuf)>,

    /// Default style as NAME=PATH; the file's root properties form the style.
    #[arg(long = "style", value_name = "NAME=PATH", value_parser = parse_named_path)]
    styles: Vec<(String, PathBuf)>,

    #[arg(long)]
    width: Option<f32>,

    #[arg(long)]
    height: Option<f32>,

    #[arg(long, value_enum, default_value_t = MeasureMode::Exact)]
    mode: MeasureMode,

    /// Pixels per dp.
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Fill behind the circle, #rrggbb or #rrggbbaa. Transparent when unset.
    #[arg(long, value_parser = parse_color)]
    background: Option<Color>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Log filter, e.g. "debug" or "roundel_ui=trace".
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn constraints(&self) -> Result<Constraints> {
        if self.mode == MeasureMode::Unspecified {
            return Ok(Constraints::unbounded());
        }
        let (Some(w), Some(h)) = (self.width, self.height) else {
            bail!("--width and --height are required unless --mode unspecified");
        };
        if !(w >= 0.0 && h >= 0.0) {
            bail!("--width and --height must be non-negative, got {w}x{h}");
        }
        let size = Vec2::new(w, h);
        Ok(match self.mode {
            MeasureMode::Exact => Constraints::tight(size),
            MeasureMode::AtMost => Constraints::loose(size),
            MeasureMode::Unspecified => Constraints::unbounded(),
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let mut ctx = Context::with_metrics(DisplayMetrics::with_density(args.density));
    let mut loader = DslLoader::new();

    for (name, path) in &args.images {
        let content = ImageContent::load(path).with_context(|| format!("loading image {name:?}"))?;
        ctx.register_drawable(name.clone(), content);
    }
    for (name, path) in &args.styles {
        let doc = read_document(&loader, path)?;
        ctx.register_style(name.clone(), AttributeSet::from_node(&doc.root));
    }

    let doc = read_document(&loader, &args.layout)?;
    let base = args.layout.parent().unwrap_or(Path::new("."));
    register_imports(&mut loader, &mut ctx, &doc, base, &mut HashSet::new())?;

    let mut view = loader.build(&doc, &ctx).context("building the layout")?;
    let mut scene = UiScene::new();
    let draw_list = scene
        .frame(&mut view, args.constraints()?)
        .context("layout pass failed")?;

    let side = view.min_length();
    if side == 0 {
        bail!("nothing to render: the view measured to 0x0");
    }
    let mut canvas = Canvas::new(side, side)?;
    if let Some(bg) = args.background {
        canvas.clear(bg);
    }
    canvas.draw(draw_list);
    canvas
        .save_png(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;

    log::info!("wrote {side}x{side} circle image to {}", args.out.display());
    Ok(())
}

fn read_document(loader: &DslLoader, path: &Path) -> Result<DslDocument> {
    let src = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    loader.parse(&src).with_context(|| format!("parsing {}", path.display()))
}

/// Loads each `import "file" as Alias` of `doc`, recursively.
///
/// Every imported file is registered as a component alias and, since
/// style files share the syntax, as a default style under the same name.
fn register_imports(
    loader: &mut DslLoader,
    ctx: &mut Context,
    doc: &DslDocument,
    base: &Path,
    seen: &mut HashSet<PathBuf>,
) -> Result<()> {
    for import in &doc.imports {
        let path = base.join(&import.path);
        if !seen.insert(path.clone()) {
            continue;
        }
        let imported = read_document(loader, &path)?;
        let nested_base = path.parent().unwrap_or(base).to_path_buf();
        register_imports(loader, ctx, &imported, &nested_base, seen)?;

        if ctx.style(&import.alias).is_none() {
            ctx.register_style(import.alias.clone(), AttributeSet::from_node(&imported.root));
        }
        log::debug!("registered import {} as {}", path.display(), import.alias);
        loader.register(import.alias.clone(), imported);
    }
    Ok(())
}

fn parse_named_path(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got {s:?}")),
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("expected #rrggbb or #rrggbbaa, got {s:?}"));
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok(Color::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, a))
}
