use mm_core::{EditorConfig, parse_document};
use mm_render::{RenderTheme, export_svg};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: export_svg <mindmap.json> [out.svg]");
        return ExitCode::FAILURE;
    }
    let input = PathBuf::from(&args[1]);
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("svg"));

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("FAIL {}: {}", input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let doc = match parse_document(&json) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("FAIL {}: {}", input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let padding = EditorConfig::default().export_padding;
    let Some(svg) = export_svg(&doc.scene, padding, &RenderTheme::default()) else {
        eprintln!("SKIP {}: no nodes to export", input.display());
        return ExitCode::SUCCESS;
    };

    if let Err(e) = fs::write(&output, svg) {
        eprintln!("FAIL {}: {}", output.display(), e);
        return ExitCode::FAILURE;
    }
    println!(
        "OK   {} → {} ({} nodes)",
        input.display(),
        output.display(),
        doc.scene.len()
    );
    ExitCode::SUCCESS
}
