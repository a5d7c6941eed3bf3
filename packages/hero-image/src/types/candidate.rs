//! Image candidates returned by a search provider.

use serde::{Deserialize, Serialize};

/// One image result, not yet judged acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// URL of the image itself.
    pub image_url: String,

    /// Page the image was found on (if the provider reports it).
    pub source_page_url: Option<String>,

    /// Title or caption text from the provider.
    #[serde(default)]
    pub title: String,

    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Candidate {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            source_page_url: None,
            title: String::new(),
            width: None,
            height: None,
        }
    }

    pub fn with_source_page(mut self, url: impl Into<String>) -> Self {
        self.source_page_url = Some(url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Width / height, when both are known and non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// URL, source page and title joined for keyword matching.
    pub fn combined_text(&self) -> String {
        let mut text = String::with_capacity(
            self.image_url.len()
                + self.source_page_url.as_ref().map_or(0, |s| s.len())
                + self.title.len()
                + 2,
        );
        text.push_str(&self.image_url);
        if let Some(page) = &self.source_page_url {
            text.push(' ');
            text.push_str(page);
        }
        text.push(' ');
        text.push_str(&self.title);
        text
    }
}
