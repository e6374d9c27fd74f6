use crate::engine::bridge::text::{
    FontDescription, TextMeasureError, TextMeasurement, TextMeasurementRequest, TextMeasurer,
};
use crate::engine::measure::TextMeasure;
use fontdue::Font as FontDue;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// フォントファイルを指定する環境変数
pub const FONT_ENV: &str = "CAPTION_FIT_FONT";

const DEFAULT_FONT_ID: &str = "default";

/// テキスト計測のプラットフォーム側実装（fontdue）
///
/// ファミリ名（と任意のウェイト）ごとにフォントを登録できる。
/// 見つからないファミリは既定フォントで計測する。
pub struct PlatformTextMeasurer {
    fonts: HashMap<String, FontDue>,
    default_font: String,
}

impl PlatformTextMeasurer {
    /// 環境変数、次にシステムフォントから初期化を試みる
    pub fn new() -> Result<Self, TextMeasureError> {
        // もし環境変数あるならそっちのフォントを優先
        if let Ok(p) = env::var(FONT_ENV) {
            return Self::from_file(Path::new(&p));
        }

        let path = crate::platform::font::first_available_font()
            .map_err(|e| TextMeasureError::BackendUnavailable(e.to_string()))?;
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, TextMeasureError> {
        let bytes = std::fs::read(path)
            .map_err(|e| TextMeasureError::FontLoad(format!("{}: {}", path.display(), e)))?;
        log::debug!("loaded measurement font {}", path.display());
        Self::from_bytes(DEFAULT_FONT_ID, bytes)
    }

    /// バイト列からフォントを読み込んで初期化
    pub fn from_bytes(id: &str, bytes: Vec<u8>) -> Result<Self, TextMeasureError> {
        let font = load_font(&bytes)?;
        let mut fonts = HashMap::new();
        fonts.insert(font_key(id, None), font);
        Ok(Self {
            fonts,
            default_font: font_key(id, None),
        })
    }

    /// ファミリ（とウェイト）にフォントを追加登録する
    pub fn register(
        &mut self,
        family: &str,
        weight: Option<u16>,
        bytes: &[u8],
    ) -> Result<(), TextMeasureError> {
        let font = load_font(bytes)?;
        self.fonts.insert(font_key(family, weight), font);
        Ok(())
    }

    /// `family:weight` → `family` → 既定フォント の順に探す
    fn select(&self, font: &FontDescription) -> Result<&FontDue, TextMeasureError> {
        if let Some(family) = font.family.as_deref() {
            let found = self
                .fonts
                .get(&font_key(family, Some(font.weight)))
                .or_else(|| self.fonts.get(&font_key(family, None)));
            if let Some(found) = found {
                return Ok(found);
            }
        }
        self.fonts
            .get(&self.default_font)
            .ok_or_else(|| TextMeasureError::FontNotFound(self.default_font.clone()))
    }
}

fn font_key(family: &str, weight: Option<u16>) -> String {
    let family = family.trim().to_ascii_lowercase();
    match weight {
        Some(w) => format!("{}:{}", family, w),
        None => family,
    }
}

fn load_font(bytes: &[u8]) -> Result<FontDue, TextMeasureError> {
    FontDue::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| TextMeasureError::FontLoad(e.to_string()))
}

impl TextMeasurer for PlatformTextMeasurer {
    /// 一行分の幅（advance + kerning）を計測する
    fn measure(&self, req: &TextMeasurementRequest) -> Result<TextMeasurement, TextMeasureError> {
        let font = self.select(&req.font)?;
        let font_size = req.font.size_px.max(1.0);

        let (line_height, baseline) = match font.horizontal_line_metrics(font_size) {
            Some(m) => (m.new_line_size, m.ascent),
            None => (font_size * 1.2, font_size * 0.8),
        };

        // 空文字は高さだけ返す
        if req.text.is_empty() {
            return Ok(TextMeasurement {
                width: 0.0,
                height: line_height,
                baseline,
            });
        }

        // スペース幅をタブ処理のために取得
        let space_advance = font.metrics(' ', font_size).advance_width;

        // 文字幅cache
        let mut advance_cache: HashMap<char, f32> = HashMap::new();

        let mut width: f32 = 0.0;
        let mut prev: Option<char> = None;

        for ch in req.text.chars() {
            if ch == '\r' || ch == '\n' {
                // 改行は行分割側の責務なので無視
                continue;
            }

            let advance = if ch == '\t' {
                // タブはスペース4個分で扱う
                space_advance * 4.0
            } else {
                *advance_cache
                    .entry(ch)
                    .or_insert_with(|| font.metrics(ch, font_size).advance_width)
            };

            if let Some(p) = prev {
                width += font.horizontal_kern(p, ch, font_size).unwrap_or(0.0);
            }
            width += advance;
            prev = Some(ch);
        }

        Ok(TextMeasurement {
            width: width.max(0.0),
            height: line_height,
            baseline,
        })
    }
}

/// 初回計測時にフォントを読み込む [`TextMeasure`] を作る
///
/// `font_path` が None ならば環境変数とシステムフォントを探す。
pub fn platform_text_measure(font_path: Option<PathBuf>) -> TextMeasure {
    TextMeasure::lazy(move || {
        let measurer = match &font_path {
            Some(path) => PlatformTextMeasurer::from_file(path)?,
            None => PlatformTextMeasurer::new()?,
        };
        Ok(Box::new(measurer) as Box<dyn TextMeasurer>)
    })
}
