use serde::{Deserialize, Serialize};

/// `imgSize` values accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Icon,
    Small,
    Medium,
    Large,
    Xlarge,
    Xxlarge,
    Huge,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Icon => "icon",
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::Xlarge => "xlarge",
            ImageSize::Xxlarge => "xxlarge",
            ImageSize::Huge => "huge",
        }
    }
}

/// `imgType` values accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Clipart,
    Face,
    Lineart,
    Stock,
    Photo,
    Animated,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Clipart => "clipart",
            ImageType::Face => "face",
            ImageType::Lineart => "lineart",
            ImageType::Stock => "stock",
            ImageType::Photo => "photo",
            ImageType::Animated => "animated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    #[default]
    Active,
    Off,
}

impl SafeSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::Active => "active",
            SafeSearch::Off => "off",
        }
    }
}

/// Parameters for one image search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSearchParams {
    pub query: String,
    pub num: u32,
    pub img_size: Option<ImageSize>,
    pub img_type: Option<ImageType>,
    pub safe: SafeSearch,
}

impl ImageSearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num: 10,
            img_size: None,
            img_type: None,
            safe: SafeSearch::Active,
        }
    }

    pub fn with_num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.img_size = Some(size);
        self
    }

    pub fn with_type(mut self, img_type: ImageType) -> Self {
        self.img_type = Some(img_type);
        self
    }

    pub fn with_safe(mut self, safe: SafeSearch) -> Self {
        self.safe = safe;
        self
    }
}

/// Top-level search response. `items` is absent when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub items: Option<Vec<SearchItem>>,
}

/// A single image result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// Direct link to the image file (as reported by the index).
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "displayLink")]
    pub display_link: Option<String>,
    pub mime: Option<String>,
    pub image: Option<SearchItemImage>,
}

/// Image metadata attached to an item.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItemImage {
    /// The page the image was found on.
    #[serde(rename = "contextLink")]
    pub context_link: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(rename = "byteSize")]
    pub byte_size: Option<u64>,
    #[serde(rename = "thumbnailLink")]
    pub thumbnail_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_response() {
        let json = r#"{
            "kind": "customsearch#search",
            "items": [{
                "kind": "customsearch#result",
                "title": "Lisbon skyline at dusk",
                "link": "https://cdn.example.com/lisbon.jpg",
                "displayLink": "cdn.example.com",
                "mime": "image/jpeg",
                "image": {
                    "contextLink": "https://travel.example.com/lisbon",
                    "height": 900,
                    "width": 1600,
                    "byteSize": 312000,
                    "thumbnailLink": "https://encrypted-tbn0.gstatic.com/images?q=abc"
                }
            }]
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let items = resp.items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://cdn.example.com/lisbon.jpg");
        let image = items[0].image.as_ref().unwrap();
        assert_eq!(image.width, Some(1600));
        assert_eq!(image.height, Some(900));
        assert_eq!(
            image.context_link.as_deref(),
            Some("https://travel.example.com/lisbon")
        );
    }

    #[test]
    fn test_parse_response_without_items() {
        let json = r#"{"kind": "customsearch#search", "searchInformation": {"totalResults": "0"}}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.items.is_none());
    }

    #[test]
    fn test_params_builder() {
        let params = ImageSearchParams::new("q")
            .with_num(5)
            .with_size(ImageSize::Large)
            .with_type(ImageType::Photo);
        assert_eq!(params.num, 5);
        assert_eq!(params.img_size.map(|s| s.as_str()), Some("large"));
        assert_eq!(params.img_type.map(|t| t.as_str()), Some("photo"));
        assert_eq!(params.safe.as_str(), "active");
    }
}
