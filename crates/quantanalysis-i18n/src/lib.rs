#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantanalysis/quantanalysis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod format;
pub mod labels;

pub use format::{format_date, format_datetime, format_decimal, format_percent, format_ratio};
pub use labels::Label;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Report language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Language {
    /// Simplified Chinese.
    #[default]
    #[display("zh")]
    #[serde(rename = "zh")]
    Zh,

    /// English.
    #[display("en")]
    #[serde(rename = "en")]
    En,
}

impl Language {
    /// Parse a language code, falling back to Chinese for anything
    /// unrecognized.
    ///
    /// The lossy default is deliberate: it preserves the behavior of the
    /// original library, which warns and continues in Chinese rather than
    /// failing. Typed configuration paths (serde) remain strict.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Self::En,
            _ => Self::Zh,
        }
    }

    /// The two-letter code, also used as the HTML `lang` attribute.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("zh", Language::Zh)]
    #[case("en", Language::En)]
    #[case("EN", Language::En)]
    #[case(" en ", Language::En)]
    #[case("klingon", Language::Zh)]
    #[case("", Language::Zh)]
    fn from_code_is_lossy_with_chinese_default(#[case] code: &str, #[case] expected: Language) {
        assert_eq!(Language::from_code(code), expected);
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Language::Zh.to_string(), "zh");
        assert_eq!(Language::En.to_string(), "en");
    }
}
