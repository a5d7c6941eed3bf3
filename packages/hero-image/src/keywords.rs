//! Keyword sets used by query generation and the content filter.
//!
//! Each concern is a separate named list so it can be tested and extended on
//! its own. Terms are lowercase; multi-word terms match as consecutive tokens.

/// Hosts whose image URLs 404 when hotlinked, need auth, or carry watermarks.
/// Matches the host itself and any subdomain.
pub const FORBIDDEN_DOMAINS: &[&str] = &[
    "wikimedia.org",
    "wikipedia.org",
    "wikiwand.com",
    "instagram.com",
    "cdninstagram.com",
    "facebook.com",
    "fbcdn.net",
    "fbsbx.com",
    "pinterest.com",
    "pinimg.com",
    "twitter.com",
    "twimg.com",
    "x.com",
    "tiktok.com",
    "reddit.com",
    "redd.it",
    "flickr.com",
    "staticflickr.com",
    "shutterstock.com",
    "gettyimages.com",
    "istockphoto.com",
    "alamy.com",
    "dreamstime.com",
    "123rf.com",
    "depositphotos.com",
];

/// Vector, animated and icon formats that never make a hero photograph.
pub const FORBIDDEN_EXTENSIONS: &[&str] = &["svg", "svgz", "gif", "ico", "cur", "eps", "ai"];

/// Raster formats accepted as direct images from the URL path alone.
pub const DIRECT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

/// Vector formats. Images technically, rejected by the classifier all the same.
pub const VECTOR_EXTENSIONS: &[&str] = &["svg", "svgz", "eps", "ai"];

/// Framed prints and wall decor.
pub const FRAMED_PRINT_MARKERS: &[&str] = &[
    "framed",
    "poster",
    "print",
    "prints",
    "canvas",
    "wall art",
    "wall decor",
];

/// Apparel and souvenirs.
pub const MERCHANDISE_MARKERS: &[&str] = &[
    "merchandise",
    "merch",
    "apparel",
    "t shirt",
    "tshirt",
    "shirt",
    "hoodie",
    "sweatshirt",
    "mug",
    "sticker",
    "postcard",
    "souvenir",
    "keychain",
    "magnet",
];

/// Computer generated imagery.
pub const RENDER_MARKERS: &[&str] = &[
    "render",
    "rendering",
    "rendered",
    "3d",
    "cgi",
    "cg",
    "visualization",
    "visualisation",
    "ai generated",
    "digital art",
];

pub const MOCKUP_MARKERS: &[&str] = &["mockup", "mock up", "template", "psd"];

/// Hand-made or artistic depictions.
pub const ILLUSTRATION_MARKERS: &[&str] = &[
    "illustration",
    "illustrated",
    "drawing",
    "drawn",
    "painting",
    "painted",
    "sketch",
    "watercolor",
    "watercolour",
    "cartoon",
    "clipart",
    "clip art",
    "vector",
    "artwork",
];

/// Every non-photograph group, in the order they are checked.
pub const NON_PHOTOGRAPH_MARKERS: &[&[&str]] = &[
    FRAMED_PRINT_MARKERS,
    MERCHANDISE_MARKERS,
    RENDER_MARKERS,
    MOCKUP_MARKERS,
    ILLUSTRATION_MARKERS,
];

/// Excluded from every query: people shots never work as a hero image.
pub const PEOPLE_MARKERS: &[&str] = &["people", "crowd", "students", "portrait", "selfie"];

/// Query exclusions specific to universities.
pub const UNIVERSITY_QUERY_EXCLUSIONS: &[&str] = &[
    "logo", "crest", "seal", "emblem", "sports", "football", "stadium", "frame", "merchandise",
    "render", "mockup",
];

/// Query exclusions specific to cities.
pub const CITY_QUERY_EXCLUSIONS: &[&str] = &["map", "weather", "forecast", "interior", "hotel", "room"];

/// Campus vocabulary. Advisory scoring only.
pub const CAMPUS_KEYWORDS: &[&str] = &[
    "campus",
    "hall",
    "building",
    "library",
    "quad",
    "quadrangle",
    "tower",
    "chapel",
    "architecture",
    "exterior",
    "facade",
    "college",
    "university",
];

/// Stand-in imagery that says nothing about the specific institution.
pub const GENERIC_UNIVERSITY_KEYWORDS: &[&str] = &[
    "stock photo",
    "stock image",
    "stock",
    "royalty free",
    "generic",
    "classroom",
    "graduation",
    "diploma",
    "graduates",
];

/// City-wide vocabulary. Scores candidates and licenses single-building terms.
pub const CITYSCAPE_KEYWORDS: &[&str] = &[
    "skyline",
    "cityscape",
    "panorama",
    "panoramic",
    "aerial",
    "downtown",
    "skyscrapers",
    "waterfront",
    "harbour",
    "harbor",
    "city centre",
    "city center",
    "old town",
];

/// Shots of one structure rather than the city.
pub const SINGLE_BUILDING_KEYWORDS: &[&str] = &[
    "hotel",
    "apartment",
    "house",
    "church",
    "cathedral",
    "museum",
    "office building",
    "interior",
    "lobby",
    "room",
    "restaurant",
];

/// Place names that commonly show up for the wrong namesake city, paired with
/// the country they indicate. Hand-picked approximation, not a gazetteer.
pub const COMMONLY_CONFUSED_COUNTRIES: &[(&str, &str)] = &[
    ("china", "china"),
    ("beijing", "china"),
    ("shanghai", "china"),
    ("japan", "japan"),
    ("tokyo", "japan"),
    ("india", "india"),
    ("russia", "russia"),
    ("brazil", "brazil"),
    ("mexico", "mexico"),
    ("usa", "united states"),
    ("united states", "united states"),
    ("canada", "canada"),
    ("australia", "australia"),
    ("united kingdom", "united kingdom"),
    ("england", "united kingdom"),
    ("germany", "germany"),
    ("france", "france"),
];

/// A marker right after one of these is part of another place name
/// ("New Mexico", "New England", "South America"), not the country itself.
pub const PLACE_NAME_QUALIFIERS: &[&str] = &["new", "north", "south", "latin", "central"];

/// Alternative spellings mapped to a canonical country name.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "united states"),
    ("us", "united states"),
    ("united states of america", "united states"),
    ("america", "united states"),
    ("uk", "united kingdom"),
    ("great britain", "united kingdom"),
    ("britain", "united kingdom"),
    ("england", "united kingdom"),
    ("scotland", "united kingdom"),
    ("wales", "united kingdom"),
    ("prc", "china"),
    ("people's republic of china", "china"),
    ("russian federation", "russia"),
    ("deutschland", "germany"),
];

/// Lowercase a country and resolve aliases.
pub fn canonical_country(country: &str) -> String {
    let key = normalize_phrase(country);
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| normalize_phrase(alias) == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

/// Every phrase that names the given country: canonical form and aliases.
///
/// Two-letter aliases ("us", "uk") are left out unless the caller used them,
/// since "us" is an ordinary English word.
pub fn country_terms(country: &str) -> Vec<String> {
    let canonical = canonical_country(country);
    let mut terms = vec![canonical.clone(), normalize_phrase(country)];
    terms.extend(
        COUNTRY_ALIASES
            .iter()
            .filter(|(alias, c)| *c == canonical && alias.len() > 2)
            .map(|(alias, _)| normalize_phrase(alias)),
    );
    terms.sort();
    terms.dedup();
    terms
}

/// Split into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

fn normalize_phrase(phrase: &str) -> String {
    tokenize(phrase).join(" ")
}

/// Tokenized text searched for whole-word terms.
///
/// Whole-token matching keeps "print" from firing on "blueprint" and "usa"
/// from firing on "jerusalem".
#[derive(Debug, Clone)]
pub struct Haystack {
    tokens: Vec<String>,
}

impl Haystack {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
        }
    }

    /// True when the term's tokens appear consecutively.
    pub fn contains(&self, term: &str) -> bool {
        let needle = tokenize(term);
        if needle.is_empty() || needle.len() > self.tokens.len() {
            return false;
        }
        self.tokens
            .windows(needle.len())
            .any(|window| window == needle.as_slice())
    }

    /// Like `contains`, but ignores occurrences directly preceded by one of
    /// `qualifiers`.
    pub fn contains_unqualified(&self, term: &str, qualifiers: &[&str]) -> bool {
        let needle = tokenize(term);
        if needle.is_empty() || needle.len() > self.tokens.len() {
            return false;
        }
        self.tokens
            .windows(needle.len())
            .enumerate()
            .any(|(start, window)| {
                window == needle.as_slice()
                    && (start == 0 || !qualifiers.contains(&self.tokens[start - 1].as_str()))
            })
    }

    /// First term from the list that appears.
    pub fn find_any<'a>(&self, terms: &[&'a str]) -> Option<&'a str> {
        terms.iter().copied().find(|term| self.contains(term))
    }

    pub fn count_matches(&self, terms: &[&str]) -> usize {
        terms.iter().filter(|term| self.contains(term)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("https://cdn.Example.com/Lisbon-Skyline_2.jpg"),
            vec!["https", "cdn", "example", "com", "lisbon", "skyline", "2", "jpg"]
        );
    }

    #[test]
    fn test_haystack_whole_word() {
        let hay = Haystack::new("Architectural blueprint of Jerusalem old city");
        assert!(!hay.contains("print"));
        assert!(!hay.contains("usa"));
        assert!(hay.contains("old city"));
        assert!(hay.contains("JERUSALEM"));
    }

    #[test]
    fn test_haystack_unqualified() {
        let hay = Haystack::new("Albuquerque New Mexico skyline, a trip to Mexico");
        assert!(hay.contains_unqualified("mexico", PLACE_NAME_QUALIFIERS));

        let hay = Haystack::new("Albuquerque New Mexico skyline");
        assert!(hay.contains("mexico"));
        assert!(!hay.contains_unqualified("mexico", PLACE_NAME_QUALIFIERS));

        let hay = Haystack::new("England from above");
        assert!(hay.contains_unqualified("england", PLACE_NAME_QUALIFIERS));
    }

    #[test]
    fn test_haystack_phrase() {
        let hay = Haystack::new("Poster print of the harbour, wall-art edition");
        assert!(hay.contains("poster print"));
        assert!(hay.contains("wall art"));
        assert!(!hay.contains("print poster"));
        assert_eq!(hay.find_any(FRAMED_PRINT_MARKERS), Some("poster"));
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!Haystack::new("anything").contains("  "));
        assert!(!Haystack::new("").contains("a"));
    }

    #[test]
    fn test_country_terms() {
        let usa = country_terms("USA");
        assert!(usa.contains(&"united states".to_string()));
        assert!(usa.contains(&"usa".to_string()));
        assert!(usa.contains(&"america".to_string()));
        assert!(!usa.contains(&"us".to_string()));

        assert_eq!(canonical_country("Great Britain"), "united kingdom");
        assert_eq!(canonical_country("Canada"), "canada");
        assert_eq!(country_terms("Canada"), vec!["canada".to_string()]);
    }

    #[test]
    fn test_forbidden_and_direct_extensions_disjoint() {
        for ext in DIRECT_IMAGE_EXTENSIONS {
            assert!(!FORBIDDEN_EXTENSIONS.contains(ext));
            assert!(!VECTOR_EXTENSIONS.contains(ext));
        }
    }
}
