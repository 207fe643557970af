use camino::{Utf8Path, Utf8PathBuf};
use endcap::shapes::ShapeParams;
use endcap::{FormatVersion, MarkerConfig, MarkerKind, ReadOptions, decode, encode};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery [OUT]   Render every marker kind into one SVG sheet");
        eprintln!("  roundtrip       Encode and decode every kind in every format version");
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "gallery" => {
            let out = args
                .get(2)
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| workspace_root().join("gallery.svg"));
            gallery(&out)
        }
        "roundtrip" => roundtrip(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    };
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn workspace_root() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_owned()
}

const COLUMNS: usize = 8;
const CELL: f64 = 64.0;
const SCALE: f64 = 4.0;

/// One cell per kind: the shape at pen 1 bp, size 5 bp, with its vertex
/// at the centre of the cell and its name underneath.
fn gallery(out: &Utf8Path) -> Result<(), String> {
    let params = ShapeParams::new(1.0, 5.0);
    let kinds: Vec<MarkerKind> = MarkerKind::all().filter(|k| !k.is_none()).collect();
    let cells: Vec<String> = kinds
        .par_iter()
        .enumerate()
        .map(|(i, kind)| {
            let (col, row) = (i % COLUMNS, i / COLUMNS);
            let (cx, cy) = ((col as f64 + 0.5) * CELL, (row as f64 + 0.4) * CELL);
            let data = kind.generate(&params).to_svg_path_data();
            format!(
                r##"  <g>
    <line x1="{x0}" y1="{cy}" x2="{cx}" y2="{cy}" stroke="#bbb" stroke-width="1"/>
    <path transform="translate({cx} {cy}) scale({SCALE} {neg})" d="{data}" fill="#222" fill-rule="nonzero"/>
    <text x="{cx}" y="{ty}" font-size="8" text-anchor="middle" font-family="sans-serif">{code} {name}</text>
  </g>
"##,
                x0 = cx - 0.45 * CELL,
                neg = -SCALE,
                ty = cy + 0.5 * CELL,
                code = kind.code(),
                name = kind.name(),
            )
        })
        .collect();

    let rows = kinds.len().div_ceil(COLUMNS);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = COLUMNS as f64 * CELL,
        h = rows as f64 * CELL,
    );
    for cell in &cells {
        svg.push_str(cell);
    }
    svg.push_str("</svg>\n");

    fs::write(out, svg).map_err(|e| format!("Failed to write {out}: {e}"))?;
    eprintln!("Wrote {} kinds to {out}", kinds.len());
    Ok(())
}

fn roundtrip() -> Result<(), String> {
    let cases: Vec<(FormatVersion, MarkerKind)> = FormatVersion::ALL
        .into_iter()
        .flat_map(|v| MarkerKind::all().filter(move |k| k.is_available_in(v)).map(move |k| (v, k)))
        .collect();

    let failures: Vec<String> = cases
        .par_iter()
        .filter_map(|&(version, kind)| check(version, kind).err())
        .collect();

    eprintln!("{} cases, {} failures", cases.len(), failures.len());
    for failure in &failures {
        eprintln!("  {failure}");
    }
    if failures.is_empty() { Ok(()) } else { Err("round trip failed".to_owned()) }
}

fn check(version: FormatVersion, kind: MarkerKind) -> Result<(), String> {
    let mut cfg = MarkerConfig::new(kind, endcap::types::Length::bp(1.0));
    if !kind.is_none() {
        cfg.set_repeated(2).map_err(|e| format!("{version} {kind}: {e}"))?;
        cfg.set_reversed(true);
    }
    let bytes = encode(version, &cfg).map_err(|e| format!("{version} {kind}: {e}"))?;
    let back = decode(&bytes, version, &ReadOptions::default()).map_err(|e| format!("{version} {kind}: {e}"))?;
    if back != cfg {
        return Err(format!("{version} {kind}: decoded config differs"));
    }
    Ok(())
}
