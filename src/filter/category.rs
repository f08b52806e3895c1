// src/filter/category.rs
// =============================================================================
// The MIME top-level types a user may ask for with --content-type.
//
// Parsing is case-insensitive ("IMAGE", "Image" and "image" are all Image),
// but matching against a response uses the lowercase token, because that is
// how servers send it ("image/png", not "Image/png").
// =============================================================================

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Application,
    Audio,
    Font,
    Example,
    Image,
    Message,
    Model,
    Multipart,
    Text,
    Video,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 10] = [
        ContentCategory::Application,
        ContentCategory::Audio,
        ContentCategory::Font,
        ContentCategory::Example,
        ContentCategory::Image,
        ContentCategory::Message,
        ContentCategory::Model,
        ContentCategory::Multipart,
        ContentCategory::Text,
        ContentCategory::Video,
    ];

    /// The token compared against the start of a Content-Type header
    pub fn mime_token(self) -> &'static str {
        match self {
            ContentCategory::Application => "application",
            ContentCategory::Audio => "audio",
            ContentCategory::Font => "font",
            ContentCategory::Example => "example",
            ContentCategory::Image => "image",
            ContentCategory::Message => "message",
            ContentCategory::Model => "model",
            ContentCategory::Multipart => "multipart",
            ContentCategory::Text => "text",
            ContentCategory::Video => "video",
        }
    }

    /// Title-case name used in prompts and messages
    pub fn display_name(self) -> &'static str {
        match self {
            ContentCategory::Application => "Application",
            ContentCategory::Audio => "Audio",
            ContentCategory::Font => "Font",
            ContentCategory::Example => "Example",
            ContentCategory::Image => "Image",
            ContentCategory::Message => "Message",
            ContentCategory::Model => "Model",
            ContentCategory::Multipart => "Multipart",
            ContentCategory::Text => "Text",
            ContentCategory::Video => "Video",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = ContentCategory::ALL
            .iter()
            .map(|c| c.display_name())
            .collect();
        write!(
            f,
            "'{}' is not a valid MIME Content-Type (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ContentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ContentCategory::ALL
            .into_iter()
            .find(|c| c.mime_token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
