//! CJK font resolution for chart and report text.
//!
//! Chinese glyphs render as boxes under the default font on many systems,
//! so the report resolves a font stack through a fixed fallback chain:
//!
//! 1. a bundled font file (embedded into the report as a base64
//!    `@font-face`),
//! 2. platform-specific CJK family names left to the viewer to resolve,
//! 3. the generic `sans-serif` family.
//!
//! Resolution is a pure function of its two inputs, the platform
//! identifier and the bundled-asset directory. Missing directories and
//! unreadable files fall through silently to the next step; no failure
//! ever reaches the caller.

use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Bundled font candidates, probed in order: file name, CSS family name,
/// `@font-face` format hint.
const BUNDLED_CANDIDATES: &[(&str, &str, &str)] = &[
    ("SimHei.otf", "SimHei", "opentype"),
    ("SimHei.ttf", "SimHei", "truetype"),
    ("simhei.ttf", "SimHei", "truetype"),
    ("microsoft-yahei.ttf", "Microsoft YaHei", "truetype"),
    ("msyh.ttc", "Microsoft YaHei", "collection"),
];

/// Host platform identifier for font-family selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux.
    Linux,
    /// Anything else.
    Other,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    /// CJK font families commonly installed on this platform.
    pub const fn cjk_families(&self) -> &'static [&'static str] {
        match self {
            Self::Windows => &["SimHei", "Microsoft YaHei"],
            Self::MacOs => &["PingFang SC", "Hiragino Sans GB"],
            Self::Linux => &["Noto Sans CJK SC", "WenQuanYi Micro Hei"],
            Self::Other => &["Arial Unicode MS"],
        }
    }
}

/// A bundled font embedded into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFont {
    /// CSS family name the `@font-face` rule declares.
    pub family: &'static str,

    /// Base64-encoded font bytes.
    pub data: String,

    /// `@font-face` format hint (`truetype`, `opentype`, ...).
    pub format: &'static str,
}

/// The outcome of font resolution: an ordered family stack and, when a
/// bundled file was found, the embedded font backing its first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResolution {
    families: Vec<&'static str>,
    embedded: Option<EmbeddedFont>,
}

impl FontResolution {
    /// The embedded bundled font, when one was found.
    pub fn embedded(&self) -> Option<&EmbeddedFont> {
        self.embedded.as_ref()
    }

    /// The CSS `font-family` stack, always terminated by `sans-serif`.
    pub fn family_stack(&self) -> String {
        let mut stack: Vec<String> = self
            .families
            .iter()
            .map(|family| format!("\"{family}\""))
            .collect();
        stack.push("sans-serif".to_owned());
        stack.join(", ")
    }

    /// The `@font-face` rule for the embedded font, or an empty string.
    pub fn font_face_css(&self) -> String {
        self.embedded.as_ref().map_or_else(String::new, |font| {
            format!(
                "@font-face {{ font-family: \"{}\"; src: url(data:font/{};base64,{}) format(\"{}\"); }}",
                font.family, font.format, font.data, font.format
            )
        })
    }
}

/// Resolves the report font stack from a platform identifier and an
/// optional bundled-asset directory.
#[derive(Debug, Clone)]
pub struct FontResolver {
    platform: Platform,
    bundled_dir: Option<PathBuf>,
}

impl FontResolver {
    /// A resolver for the given platform with no bundled assets.
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform,
            bundled_dir: None,
        }
    }

    /// Probe the given directory for bundled font files.
    #[must_use]
    pub fn with_bundled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_dir = Some(dir.into());
        self
    }

    /// Run the fallback chain.
    pub fn resolve(&self) -> FontResolution {
        let embedded = self.bundled_dir.as_deref().and_then(|dir| {
            BUNDLED_CANDIDATES.iter().find_map(|(file, family, format)| {
                let bytes = std::fs::read(dir.join(file)).ok()?;
                Some(EmbeddedFont {
                    family,
                    data: BASE64.encode(bytes),
                    format,
                })
            })
        });

        let mut families = Vec::new();
        if let Some(font) = &embedded {
            families.push(font.family);
        }
        families.extend_from_slice(self.platform.cjk_families());

        FontResolution {
            families,
            embedded,
        }
    }
}

impl Default for FontResolver {
    /// Current platform, probing the crate's packaged font directory.
    fn default() -> Self {
        Self::new(Platform::current())
            .with_bundled_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Platform::Windows, "SimHei")]
    #[case(Platform::MacOs, "PingFang SC")]
    #[case(Platform::Linux, "Noto Sans CJK SC")]
    fn platform_families_lead_the_stack(#[case] platform: Platform, #[case] first: &str) {
        let resolution = FontResolver::new(platform).resolve();
        assert!(resolution.embedded().is_none());
        assert!(resolution.family_stack().starts_with(&format!("\"{first}\"")));
    }

    #[test]
    fn stack_always_ends_in_sans_serif() {
        for platform in [
            Platform::Windows,
            Platform::MacOs,
            Platform::Linux,
            Platform::Other,
        ] {
            let stack = FontResolver::new(platform).resolve().family_stack();
            assert!(stack.ends_with("sans-serif"));
        }
    }

    #[test]
    fn missing_bundled_dir_falls_through_silently() {
        let resolution = FontResolver::new(Platform::Linux)
            .with_bundled_dir("/nonexistent/fonts")
            .resolve();
        assert!(resolution.embedded().is_none());
        assert!(resolution.font_face_css().is_empty());
    }

    #[test]
    fn bundled_font_is_embedded_and_leads_the_stack() {
        let dir = std::env::temp_dir().join("quantanalysis-font-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("SimHei.ttf"), b"fake font bytes").unwrap();

        let resolution = FontResolver::new(Platform::Linux)
            .with_bundled_dir(&dir)
            .resolve();

        let embedded = resolution.embedded().expect("bundled file present");
        assert_eq!(embedded.family, "SimHei");
        assert_eq!(embedded.format, "truetype");
        assert!(resolution.family_stack().starts_with("\"SimHei\""));
        assert!(resolution.font_face_css().contains("@font-face"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
