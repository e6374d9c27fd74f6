//! システムフォント取得の Facade

use anyhow::Result;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
use crate::platform::os::linux;
#[cfg(target_os = "macos")]
use crate::platform::os::macos;
#[cfg(target_os = "windows")]
use crate::platform::os::windows;

/// 計測に使うフォントの候補パス（優先順）
#[allow(unreachable_code)]
pub fn system_font_candidates() -> Result<Vec<PathBuf>> {
    #[cfg(target_os = "windows")]
    {
        return windows::font::system_font_candidates();
    }
    #[cfg(target_os = "macos")]
    {
        return macos::font::system_font_candidates();
    }
    #[cfg(target_os = "linux")]
    {
        return linux::font::system_font_candidates();
    }

    anyhow::bail!("system font is not supported on this OS yet");
}

/// 候補のうち実在する最初のパス
pub fn first_available_font() -> Result<PathBuf> {
    system_font_candidates()?
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| anyhow::anyhow!("no system font found"))
}
