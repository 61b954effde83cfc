//! UI copy in English, Vietnamese, Arabic and Moroccan Arabic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::{ClientError, Result};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "vi")]
    Vietnamese,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "ar-ma")]
    MoroccanArabic,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Vietnamese,
        Language::Arabic,
        Language::MoroccanArabic,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Vietnamese => "vi",
            Language::Arabic => "ar",
            Language::MoroccanArabic => "ar-ma",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Arabic | Language::MoroccanArabic)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ClientError;

    fn from_str(code: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| ClientError::UnknownLanguage(code.to_string()))
    }
}

/// Keys of translatable UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextKey {
    Title,
    Subtitle,
    UrlPlaceholder,
    AnalyzeButton,
    ResultsTitle,
    DownloadSelected,
    DownloadAll,
    VideoInfo,
    SelectAll,
    DeselectAll,
    NoSceneSelected,
}

impl TextKey {
    pub const ALL: [TextKey; 11] = [
        TextKey::Title,
        TextKey::Subtitle,
        TextKey::UrlPlaceholder,
        TextKey::AnalyzeButton,
        TextKey::ResultsTitle,
        TextKey::DownloadSelected,
        TextKey::DownloadAll,
        TextKey::VideoInfo,
        TextKey::SelectAll,
        TextKey::DeselectAll,
        TextKey::NoSceneSelected,
    ];
}

/// Look up the text for `key` in `lang`
pub fn translate(lang: Language, key: TextKey) -> &'static str {
    use TextKey::*;

    match lang {
        Language::English => match key {
            Title => "YouTube Video Analyzer",
            Subtitle => "Analyze and download YouTube videos",
            UrlPlaceholder => "Enter YouTube video URL",
            AnalyzeButton => "Analyze Video",
            ResultsTitle => "Scene Analysis Results",
            DownloadSelected => "Download Selected Scenes",
            DownloadAll => "Download All Scenes",
            VideoInfo => "Video Information",
            SelectAll => "Select All",
            DeselectAll => "Deselect All",
            NoSceneSelected => "Please select at least one scene",
        },
        Language::Vietnamese => match key {
            Title => "Công cụ Phân tích Video YouTube",
            Subtitle => "Phân tích và tải xuống video YouTube",
            UrlPlaceholder => "Nhập URL video YouTube",
            AnalyzeButton => "Phân tích Video",
            ResultsTitle => "Kết quả Phân tích Cảnh",
            DownloadSelected => "Tải Cảnh Đã Chọn",
            DownloadAll => "Tải Tất cả Cảnh",
            VideoInfo => "Thông tin Video",
            SelectAll => "Chọn Tất cả",
            DeselectAll => "Bỏ chọn Tất cả",
            NoSceneSelected => "Vui lòng chọn ít nhất một cảnh",
        },
        Language::Arabic => match key {
            Title => "محلل فيديو يوتيوب",
            Subtitle => "تحليل وتحميل مقاطع فيديو يوتيوب",
            UrlPlaceholder => "أدخل رابط فيديو يوتيوب",
            AnalyzeButton => "تحليل الفيديو",
            ResultsTitle => "نتائج تحليل المشاهد",
            DownloadSelected => "تحميل المشاهد المحددة",
            DownloadAll => "تحميل جميع المشاهد",
            VideoInfo => "معلومات الفيديو",
            SelectAll => "تحديد الكل",
            DeselectAll => "إلغاء تحديد الكل",
            NoSceneSelected => "الرجاء تحديد مشهد واحد على الأقل",
        },
        Language::MoroccanArabic => match key {
            Title => "محلل فيديو يوتيوب",
            Subtitle => "تحليل وتحميل فيديوهات يوتيوب",
            UrlPlaceholder => "دخل رابط الفيديو",
            AnalyzeButton => "تحليل الفيديو",
            ResultsTitle => "نتائج تحليل المشاهد",
            DownloadSelected => "تحميل المشاهد المختارة",
            DownloadAll => "تحميل جميع المشاهد",
            VideoInfo => "معلومات الفيديو",
            SelectAll => "اختيار الكل",
            DeselectAll => "إلغاء اختيار الكل",
            NoSceneSelected => "المرجو اختيار مشهد واحد على الأقل",
        },
    }
}

/// A UI element whose text and/or placeholder come from the tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggedLabel {
    pub content_key: Option<TextKey>,
    pub placeholder_key: Option<TextKey>,
    pub text: String,
    pub placeholder: String,
}

impl TaggedLabel {
    pub fn content(key: TextKey) -> Self {
        Self {
            content_key: Some(key),
            ..Default::default()
        }
    }

    pub fn placeholder(key: TextKey) -> Self {
        Self {
            placeholder_key: Some(key),
            ..Default::default()
        }
    }
}

/// Current UI language
#[derive(Debug, Clone, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self, key: TextKey) -> &'static str {
        translate(self.language, key)
    }

    /// Switch to `code` and rewrite every tagged label.
    ///
    /// An unknown code is rejected and leaves the language and labels as they were.
    pub fn set_language(&mut self, code: &str, labels: &mut [TaggedLabel]) -> Result<()> {
        let language = code.parse::<Language>().map_err(|e| {
            warn!("Ignoring language change: {}", e);
            e
        })?;

        self.language = language;
        self.apply(labels);
        debug!("UI language set to {} ({} labels)", language, labels.len());
        Ok(())
    }

    /// Rewrite labels for the current language
    pub fn apply(&self, labels: &mut [TaggedLabel]) {
        for label in labels.iter_mut() {
            if let Some(key) = label.content_key {
                label.text = self.text(key).to_string();
            }
            if let Some(key) = label.placeholder_key {
                label.placeholder = self.text(key).to_string();
            }
        }
    }
}
