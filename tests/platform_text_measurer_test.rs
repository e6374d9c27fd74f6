use caption_fit::engine::bridge::text::{FontDescription, TextMeasurementRequest, TextMeasurer};
use caption_fit::platform::renderer::text_measurer::PlatformTextMeasurer;
use caption_fit::{FitSettings, TextMeasure, fit_text_to_box};

// 存在するフォントパスを探す
fn find_font() -> Option<Vec<u8>> {
    let candidates = [
        "C:\\Windows\\Fonts\\arial.ttf",
        "C:\\Windows\\Fonts\\segoeui.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];

    candidates
        .iter()
        .find(|p| std::path::Path::new(p).exists())
        .and_then(|p| std::fs::read(p).ok())
}

fn request(text: &str, size_px: f32) -> TextMeasurementRequest {
    TextMeasurementRequest {
        text: text.to_string(),
        font: FontDescription::new(None, 400, size_px),
    }
}

#[test]
fn platform_text_measurer_from_bytes_smoke() {
    let Some(bytes) = find_font() else {
        eprintln!("skipping PlatformTextMeasurer test: no system font found");
        return;
    };

    let pm = PlatformTextMeasurer::from_bytes("t", bytes).expect("create measurer");

    let res = pm.measure(&request("Hello, world!", 16.0)).expect("measure");
    println!("measured w={} h={}", res.width, res.height);
    assert!(res.width > 0.0);
    assert!(res.height > 0.0);

    let longer = pm.measure(&request("Hello, world! Hello!", 16.0)).unwrap();
    let bigger = pm.measure(&request("Hello, world!", 32.0)).unwrap();
    assert!(longer.width > res.width);
    assert!(bigger.width > res.width);

    let empty = pm.measure(&request("", 16.0)).unwrap();
    assert_eq!(empty.width, 0.0);
}

#[test]
fn unknown_family_falls_back_to_default_font() {
    let Some(bytes) = find_font() else {
        eprintln!("skipping PlatformTextMeasurer test: no system font found");
        return;
    };

    let pm = PlatformTextMeasurer::from_bytes("sys", bytes).expect("create measurer");
    let default = pm.measure(&request("Caption", 20.0)).unwrap();
    let named = pm
        .measure(&TextMeasurementRequest {
            text: "Caption".to_string(),
            font: FontDescription::new(Some("Nonexistent Sans"), 700, 20.0),
        })
        .unwrap();
    assert_eq!(default.width, named.width);
}

#[test]
fn fit_with_platform_measurer() {
    let Some(bytes) = find_font() else {
        eprintln!("skipping fit_with_platform_measurer test: no system font found");
        return;
    };

    let pm = PlatformTextMeasurer::from_bytes("sys", bytes).expect("create measurer");
    let measure = TextMeasure::with_backend(pm);
    let settings = FitSettings {
        base_font_size: 48.0,
        min_font_size: 12.0,
        ..FitSettings::default()
    };

    let result = fit_text_to_box(&measure, "Local team wins the championship", 600.0, &settings)
        .expect("fit");
    assert!(result.fitted);
    assert!(result.font_size <= 48.0);

    let available = result.panel_width - 2.0 * settings.padding;
    let fit = measure
        .check_lines_fit(&result.lines, available, result.font_size, None, Some(400))
        .unwrap();
    assert!(fit.fits);
}
