//! Content acceptability filter.
//!
//! A candidate passes through independent stages, cheapest and most certain
//! first. Each stage returns `Err(RejectReason)` to stop the chain:
//!
//! 1. forbidden source (domain, extension)
//! 2. non-photograph markers (prints, merchandise, renders, mockups, art)
//! 3. subject match (name, and the wrong-country guard for cities)
//! 4. subject-kind keywords (generic stand-ins, single buildings)
//! 5. aspect ratio, when dimensions are known
//! 6. direct-image confirmation through the URL classifier
//!
//! Stages 1-5 are pure; stage 6 may touch the network.

use tracing::debug;

use crate::classifier::{path_extension, UrlClassifier};
use crate::keywords::{
    self, Haystack, CAMPUS_KEYWORDS, CITYSCAPE_KEYWORDS, COMMONLY_CONFUSED_COUNTRIES,
    FORBIDDEN_DOMAINS, FORBIDDEN_EXTENSIONS, GENERIC_UNIVERSITY_KEYWORDS, NON_PHOTOGRAPH_MARKERS,
    PLACE_NAME_QUALIFIERS, SINGLE_BUILDING_KEYWORDS,
};
use crate::traits::probe::ContentProbe;
use crate::types::{
    candidate::Candidate,
    config::DiscoveryConfig,
    decision::{AcceptanceDecision, RejectReason},
    descriptor::{EntityDescriptor, SubjectKind},
};

type Stage = Result<(), RejectReason>;

/// Name words shorter than this do not count toward a university match.
const MIN_NAME_WORD_LEN: usize = 4;

/// Advisory positive-keyword hits from the subject-kind stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordScore(pub usize);

/// The pure filter stages, parameterized by aspect-ratio bounds.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    min_aspect_ratio: f64,
    max_aspect_ratio: f64,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }
}

impl ContentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            min_aspect_ratio: config.min_aspect_ratio,
            max_aspect_ratio: config.max_aspect_ratio,
        }
    }

    /// Run stages 1-5. `Accepted` here still needs direct-image confirmation.
    pub fn screen(&self, candidate: &Candidate, descriptor: &EntityDescriptor) -> AcceptanceDecision {
        self.run_stages(candidate, descriptor).into()
    }

    /// Run every stage, including the classifier.
    pub async fn evaluate<P: ContentProbe>(
        &self,
        candidate: &Candidate,
        descriptor: &EntityDescriptor,
        classifier: &UrlClassifier<P>,
    ) -> AcceptanceDecision {
        if let Err(reason) = self.run_stages(candidate, descriptor) {
            return AcceptanceDecision::Rejected(reason);
        }
        if classifier.is_direct_image(&candidate.image_url).await {
            AcceptanceDecision::Accepted
        } else {
            AcceptanceDecision::Rejected(RejectReason::NotDirectImage)
        }
    }

    fn run_stages(&self, candidate: &Candidate, descriptor: &EntityDescriptor) -> Stage {
        let text = Haystack::new(&candidate.combined_text());

        check_forbidden_source(candidate)?;
        check_non_photograph(&text)?;
        check_subject(&text, descriptor)?;
        let score = check_kind_keywords(&text, descriptor.subject_kind())?;
        self.check_geometry(candidate)?;

        debug!(
            url = %candidate.image_url,
            score = score.0,
            "Candidate passed content stages"
        );
        Ok(())
    }

    fn check_geometry(&self, candidate: &Candidate) -> Stage {
        match candidate.aspect_ratio() {
            Some(ratio) if ratio < self.min_aspect_ratio || ratio > self.max_aspect_ratio => {
                Err(RejectReason::BadAspectRatio { ratio })
            }
            _ => Ok(()),
        }
    }
}

/// Stage 1: blacklisted host or file extension.
pub fn check_forbidden_source(candidate: &Candidate) -> Stage {
    let Ok(url) = url::Url::parse(candidate.image_url.trim()) else {
        // Unparseable URLs fail the classifier later; nothing to match here.
        return Ok(());
    };

    if let Some(host) = url.host_str() {
        let host = host.to_lowercase();
        if let Some(domain) = FORBIDDEN_DOMAINS
            .iter()
            .find(|d| host == **d || host.ends_with(&format!(".{}", d)))
        {
            return Err(RejectReason::ForbiddenDomain {
                domain: domain.to_string(),
            });
        }
    }

    if let Some(ext) = path_extension(&url) {
        if FORBIDDEN_EXTENSIONS.contains(&ext.as_str()) {
            return Err(RejectReason::ForbiddenExtension { extension: ext });
        }
    }

    Ok(())
}

/// Stage 2: signs the image is a print, product, render, mockup or artwork.
pub fn check_non_photograph(text: &Haystack) -> Stage {
    match NON_PHOTOGRAPH_MARKERS
        .iter()
        .find_map(|group| text.find_any(group))
    {
        Some(marker) => Err(RejectReason::NonPhotograph {
            marker: marker.to_string(),
        }),
        None => Ok(()),
    }
}

/// Stage 3: the text must reference the subject (and not a namesake abroad).
pub fn check_subject(text: &Haystack, descriptor: &EntityDescriptor) -> Stage {
    match descriptor.subject_kind() {
        SubjectKind::University => check_university_subject(text, descriptor.name()),
        SubjectKind::City => {
            if !text.contains(descriptor.name()) {
                return Err(RejectReason::SubjectMismatch);
            }
            match descriptor.country() {
                Some(country) => check_wrong_country(text, country),
                None => Ok(()),
            }
        }
    }
}

fn check_university_subject(text: &Haystack, name: &str) -> Stage {
    let words: Vec<String> = keywords::tokenize(name)
        .into_iter()
        .filter(|w| w.chars().count() >= MIN_NAME_WORD_LEN)
        .collect();

    let matched = if words.is_empty() {
        // Acronym-style names ("MIT") have no long words; require the whole name.
        text.contains(name)
    } else {
        words.iter().any(|w| text.contains(w))
    };

    if matched {
        Ok(())
    } else {
        Err(RejectReason::SubjectMismatch)
    }
}

/// Rejects text that names a commonly confused country but never the
/// expected one. The confusion list is a hand-picked approximation.
pub fn check_wrong_country(text: &Haystack, country: &str) -> Stage {
    let canonical = keywords::canonical_country(country);
    if keywords::country_terms(country)
        .iter()
        .any(|term| text.contains(term))
    {
        return Ok(());
    }

    match COMMONLY_CONFUSED_COUNTRIES
        .iter()
        .find(|(marker, indicated)| {
            *indicated != canonical && text.contains_unqualified(marker, PLACE_NAME_QUALIFIERS)
        })
    {
        Some((marker, _)) => Err(RejectReason::WrongCountry {
            marker: marker.to_string(),
        }),
        None => Ok(()),
    }
}

/// Stage 4: score subject-kind vocabulary; reject generic stand-ins.
pub fn check_kind_keywords(text: &Haystack, kind: SubjectKind) -> Result<KeywordScore, RejectReason> {
    match kind {
        SubjectKind::University => {
            if let Some(keyword) = text.find_any(GENERIC_UNIVERSITY_KEYWORDS) {
                return Err(RejectReason::GenericKeyword {
                    keyword: keyword.to_string(),
                });
            }
            Ok(KeywordScore(text.count_matches(CAMPUS_KEYWORDS)))
        }
        SubjectKind::City => {
            let score = text.count_matches(CITYSCAPE_KEYWORDS);
            if score == 0 {
                if let Some(keyword) = text.find_any(SINGLE_BUILDING_KEYWORDS) {
                    return Err(RejectReason::GenericKeyword {
                        keyword: keyword.to_string(),
                    });
                }
            }
            Ok(KeywordScore(score))
        }
    }
}
