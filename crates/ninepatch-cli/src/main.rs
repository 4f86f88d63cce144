use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use ninepatch_core::commands::CreateNinePatchCommand;
use ninepatch_core::{compute_influence_frame, to_android_resource_name, LayerNode, Point, Rect};
use ninepatch_io::{
    export_nine_patch, load_document, load_settings, save_document, BitmapRenderer, ExportSettings,
};

#[derive(Parser, Debug)]
#[command(name = "ninepatch", version, about = "Build and export Android nine-patch resources")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the influence frame of layers as JSON.
    Frame(FrameArgs),
    /// Wrap the selected layers into a nine-patch asset.
    New(NewArgs),
    /// Export the selected nine-patch asset at every density.
    Export(ExportArgs),
    /// Print the Android resource name for a layer name.
    Name {
        /// Layer name to sanitize.
        text: String,
    },
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Layers to measure. Defaults to the document selection.
    #[arg(long = "layer")]
    layers: Vec<Uuid>,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Input document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Where to save the updated document. Defaults to overwriting `--doc`.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// 1x PNG rendering of the document.
    #[arg(long)]
    source: PathBuf,

    /// Document position of the source image's top-left pixel, as `X,Y`.
    #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
    origin: Point,

    /// Export settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Android `res/` directory. Overrides the settings file.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct AssetInfo {
    id: Uuid,
    name: String,
    asset: Rect,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad X '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad Y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::New(args) => cmd_new(args),
        Command::Export(args) => cmd_export(args),
        Command::Name { text } => {
            println!("{}", to_android_resource_name(&text));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.doc)?;
    let roots: Vec<LayerNode> = if args.layers.is_empty() {
        doc.selection_snapshot()
    } else {
        args.layers
            .iter()
            .map(|id| {
                doc.find_layer(*id)
                    .cloned()
                    .with_context(|| format!("layer {id} not found"))
            })
            .collect::<anyhow::Result<_>>()?
    };

    log::debug!("Measuring {} layer(s)", roots.len());
    let frame = compute_influence_frame(&roots);
    if frame.is_empty() {
        bail!("no layers selected");
    }
    print_json(&frame)
}

fn cmd_new(args: NewArgs) -> anyhow::Result<()> {
    let mut doc = load_document(&args.doc)?;
    doc.execute_command(Box::new(CreateNinePatchCommand::new()))
        .context("create nine-patch")?;
    let asset = doc
        .selected_layers()
        .first()
        .copied()
        .context("nine-patch asset was not selected")?;
    let info = AssetInfo {
        id: asset.id,
        name: asset.name.clone(),
        asset: asset.rect(),
    };

    let out = args.out.as_deref().unwrap_or(&args.doc);
    save_document(&doc, out)?;
    print_json(&info)
}

fn read_source(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("open source image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.doc)?;
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => ExportSettings::default(),
    };
    if let Some(out_dir) = args.out_dir {
        settings.out_dir = out_dir;
    }

    let source = read_source(&args.source)?;
    let mut renderer = BitmapRenderer::new(source, args.origin, settings.filter.filter_type());
    let exported = export_nine_patch(&doc, &mut renderer, &settings)?;
    log::info!(
        "Exported {} image(s) into {}",
        exported.len(),
        settings.out_dir.display()
    );
    print_json(&exported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12,-3.5").unwrap(), Point::new(12.0, -3.5));
        assert_eq!(parse_point(" 1 , 2 ").unwrap(), Point::new(1.0, 2.0));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_cli_parses_export() {
        let cli = Cli::try_parse_from([
            "ninepatch", "export", "--doc", "d.json", "--source", "s.png", "--origin", "-4,8",
        ])
        .unwrap();
        match cli.cmd {
            Command::Export(args) => {
                assert_eq!(args.origin, Point::new(-4.0, 8.0));
                assert!(args.out_dir.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
