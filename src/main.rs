use anyhow::{Context, Result};
use caption_fit::engine::bridge::text::{FallbackTextMeasurer, TextMeasurer};
use caption_fit::platform::renderer::text_measurer::PlatformTextMeasurer;
use caption_fit::{EngineConfig, TextMeasure, fit_text_to_box};
use std::env;
use std::path::Path;

const DEFAULT_CONTAINER_WIDTH: f32 = 1080.0;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    env_logger::init();

    let Some(text) = args.get(1) else {
        eprintln!("usage: caption-fit <text> [container_width] [config.json]");
        std::process::exit(2);
    };

    let container_width = match args.get(2) {
        Some(w) => w
            .parse::<f32>()
            .with_context(|| format!("invalid container width {:?}", w))?,
        None => DEFAULT_CONTAINER_WIDTH,
    };

    let config = match args.get(3) {
        Some(p) => EngineConfig::load(Path::new(p)).context("load config")?,
        None => EngineConfig::default(),
    }
    .apply_env();

    // フォントが無い環境ではヒューリスティック計測で続行する
    let font_path = config.font_path.clone();
    let measure = TextMeasure::lazy(move || {
        let platform = match &font_path {
            Some(p) => PlatformTextMeasurer::from_file(p),
            None => PlatformTextMeasurer::new(),
        };
        match platform {
            Ok(m) => Ok(Box::new(m) as Box<dyn TextMeasurer>),
            Err(e) => {
                log::warn!("falling back to heuristic measurement: {}", e);
                Ok(Box::new(FallbackTextMeasurer::default()) as Box<dyn TextMeasurer>)
            }
        }
    });

    let result = fit_text_to_box(&measure, text, container_width, &config.fit)?;

    println!(
        "font {}px, {} line(s), panel {}px, fitted={} ({} attempts)",
        result.font_size, result.line_count, result.panel_width, result.fitted, result.iterations
    );
    for line in &result.lines {
        println!("  | {}", line);
    }
    if let Some(warning) = &result.warning {
        println!("warning: {}", warning);
    }
    for entry in &result.overflow_log {
        log::info!("{}", entry);
    }

    Ok(())
}
