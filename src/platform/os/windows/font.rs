//! Windows のシステムフォント取得

use anyhow::Result;
use std::path::PathBuf;

/// システムフォント候補を返す
pub fn system_font_candidates() -> Result<Vec<PathBuf>> {
    Ok(vec![
        PathBuf::from(r"C:\Windows\Fonts\segoeui.ttf"),
        PathBuf::from(r"C:\Windows\Fonts\arial.ttf"),
        // fallback（太字）
        PathBuf::from(r"C:\Windows\Fonts\segoeuib.ttf"),
        PathBuf::from(r"C:\Windows\Fonts\arialbd.ttf"),
    ])
}
