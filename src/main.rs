//! `catheat` command line: draw a categorical heatmap from a CSV/TSV table.
//!
//! ```bash
//! catheat calls.csv --index-col -o calls.png --palette tab10 --color ambiguous=#cccccc
//! catheat calls.tsv --delimiter '\t' --legend top --show
//! ```

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use catheat::config::PaletteSerde;
use catheat::{
    heatmap, parse_color, to_hex, CategoryGrid, HeatmapConfig, LegendOptions, LegendPosition,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LegendArg {
    Right,
    Top,
    None,
}

#[derive(Parser, Debug)]
#[command(name = "catheat", version, about = "Plot categorical heatmaps")]
struct Args {
    /// Input table; `-` reads stdin.
    input: PathBuf,

    /// Output file (.png, .svg, .jpg, ...).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter; `\t` for tabs. Defaults to tab for .tsv files, comma otherwise.
    #[arg(short, long)]
    delimiter: Option<String>,

    /// The first line holds data, not column labels.
    #[arg(long)]
    no_header: bool,

    /// The first column holds row labels.
    #[arg(long)]
    index_col: bool,

    /// Style file (YAML or JSON). Defaults to ~/.catheat/style.yaml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Palette name (hls, tab10, deep, viridis, ...).
    #[arg(short, long)]
    palette: Option<String>,

    /// Fixed color for one label, as LABEL=COLOR. Repeatable.
    #[arg(long = "color", value_name = "LABEL=COLOR")]
    colors: Vec<String>,

    #[arg(long, value_enum)]
    legend: Option<LegendArg>,

    /// Cell edge length in px.
    #[arg(long)]
    cell_size: Option<f32>,

    /// Write each label inside its cell.
    #[arg(long)]
    annotate: bool,

    #[arg(long)]
    title: Option<String>,

    /// Write the effective style to this file and exit.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    /// Open an interactive window.
    #[cfg(feature = "viewer")]
    #[arg(long)]
    show: bool,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s)?;
        return Ok(s);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))
}

fn delimiter(args: &Args) -> anyhow::Result<char> {
    match args.delimiter.as_deref() {
        Some("\\t") | Some("tab") => Ok('\t'),
        Some(d) => {
            let mut chars = d.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => bail!("delimiter must be a single character, got {:?}", d),
            }
        }
        None => {
            let is_tsv = args
                .input
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
            Ok(if is_tsv { '\t' } else { ',' })
        }
    }
}

/// Style file named by `--config`, else the default style file, else defaults;
/// command line flags are applied on top.
fn load_config(args: &Args) -> anyhow::Result<HeatmapConfig> {
    let cfg = match &args.config {
        Some(path) => HeatmapConfig::load(path)?,
        None => HeatmapConfig::load_from_default_path()
            .unwrap_or_else(|e| {
                log::warn!("ignoring default style file: {e}");
                None
            })
            .unwrap_or_default(),
    };
    apply_overrides(cfg, args)
}

fn apply_overrides(mut cfg: HeatmapConfig, args: &Args) -> anyhow::Result<HeatmapConfig> {
    if let Some(palette) = &args.palette {
        cfg.palette = PaletteSerde::Name(palette.clone());
    }
    for spec in &args.colors {
        let Some((label, color)) = spec.rsplit_once('=') else {
            bail!("expected LABEL=COLOR, got {:?}", spec);
        };
        parse_color(color)?;
        cfg.colors.insert(label.to_string(), color.to_string());
    }
    match args.legend {
        Some(LegendArg::None) => cfg.legend = None,
        Some(LegendArg::Right) => {
            cfg.legend.get_or_insert_with(LegendOptions::default).position = LegendPosition::Right
        }
        Some(LegendArg::Top) => {
            cfg.legend.get_or_insert_with(LegendOptions::default).position = LegendPosition::Top
        }
        None => {}
    }
    if let Some(cs) = args.cell_size {
        cfg.style.cell_size = cs;
    }
    if args.annotate {
        cfg.style.annotate = true;
    }
    if let Some(title) = &args.title {
        cfg.style.title = Some(title.clone());
    }
    Ok(cfg)
}

#[cfg(feature = "viewer")]
fn show_requested(args: &Args) -> bool {
    args.show
}

#[cfg(not(feature = "viewer"))]
fn show_requested(_args: &Args) -> bool {
    false
}

#[cfg(feature = "viewer")]
fn show(hm: catheat::Heatmap, args: &Args) -> anyhow::Result<()> {
    let title = format!("catheat - {}", args.input.display());
    catheat::show(
        hm,
        catheat::ViewerOptions {
            title,
            ..Default::default()
        },
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

#[cfg(not(feature = "viewer"))]
fn show(_hm: catheat::Heatmap, _args: &Args) -> anyhow::Result<()> {
    bail!("built without the `viewer` feature")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = load_config(&args)?;
    if let Some(path) = &args.save_config {
        cfg.save(path)?;
        log::info!("wrote style to {:?}", path);
        return Ok(());
    }

    let text = read_input(&args.input)?;
    let grid =
        CategoryGrid::from_delimited(&text, delimiter(&args)?, !args.no_header, args.index_col)
            .with_context(|| format!("failed to parse {:?}", args.input))?;
    let options = cfg.into_options()?;
    let hm = heatmap(&grid, &options)?;

    for (label, color) in hm.colors() {
        println!("{label}\t{}", to_hex(*color));
    }

    if let Some(out) = &args.output {
        hm.save(out)?;
    }

    if show_requested(&args) {
        return show(hm, &args);
    }

    if args.output.is_none() {
        log::warn!("no --output given; only the color map was printed");
    }
    Ok(())
}
