//! Integration tests for the discovery loop.
//!
//! These tests drive the full pipeline through the public API:
//! 1. Build strategies for a descriptor
//! 2. Query the (mock) provider per strategy
//! 3. Screen candidates through the content filter
//! 4. Confirm direct images through the classifier
//! 5. Stop at the first acceptance

use std::time::Duration;

use hero_image::{
    testing::{MockImageSearcher, PendingSearcher, StaticProbe, StaticRecordProducer},
    Candidate, DiscoveryConfig, DiscoveryResult, EntityDescriptor, Enricher, GoogleImageSearcher,
    ImageDiscovery, ImageProvenance, ImageSearcherExt, ProducedRecord, SearchCredentials,
    SearchError, SubjectKind,
};
use tokio::net::TcpListener;

/// Helper for a city with a country.
fn city(name: &str, country: &str) -> EntityDescriptor {
    EntityDescriptor::city(name).unwrap().with_country(country)
}

fn porto() -> EntityDescriptor {
    EntityDescriptor::university("University of Porto")
        .unwrap()
        .with_country("Portugal")
}

#[tokio::test]
async fn test_second_strategy_supplies_the_image() {
    let searcher = MockImageSearcher::new()
        .with_response(vec![])
        .with_response(vec![Candidate::new("https://photos.example.com/example-city.jpg")
            .with_title("Example City Canada skyline cityscape")
            .with_dimensions(1600, 900)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    let result = discovery.discover(&city("Example City", "Canada")).await;

    assert_eq!(
        result,
        DiscoveryResult::Found("https://photos.example.com/example-city.jpg".to_string())
    );
    let queries = discovery.searcher().queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[1].query.contains("aerial view"));
}

#[tokio::test]
async fn test_first_acceptance_stops_the_search() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://photos.example.com/lisbon.jpg",
    )
    .with_title("Lisbon skyline")
    .with_dimensions(1800, 1000)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    let result = discovery.discover(&city("Lisbon", "Portugal")).await;

    assert!(result.is_found());
    assert_eq!(discovery.searcher().call_count(), 1);
}

#[tokio::test]
async fn test_namesake_in_another_country_is_rejected() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://photos.example.com/springfield.jpg",
    )
    .with_title("Springfield shopping street Tokyo skyline")
    .with_dimensions(1600, 900)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    let result = discovery.discover(&city("Springfield", "USA")).await;

    assert_eq!(result, DiscoveryResult::NotFound);
    assert_eq!(discovery.searcher().call_count(), 5);
}

#[tokio::test]
async fn test_state_name_containing_country_word_is_accepted() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://photos.example.com/albuquerque.jpg",
    )
    .with_title("Albuquerque New Mexico skyline cityscape")
    .with_dimensions(1600, 900)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    let result = discovery.discover(&city("Albuquerque", "USA")).await;

    assert_eq!(
        result.url(),
        Some("https://photos.example.com/albuquerque.jpg")
    );
}

#[tokio::test]
async fn test_portrait_photo_is_rejected() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://photos.example.com/porto-tower.jpg",
    )
    .with_title("University of Porto tower")
    .with_dimensions(800, 1000)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    assert_eq!(discovery.discover(&porto()).await, DiscoveryResult::NotFound);
}

#[tokio::test]
async fn test_poster_print_is_rejected() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://shop.example.com/porto-campus.jpg",
    )
    .with_title("University of Porto campus poster print")
    .with_dimensions(1600, 1000)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    assert_eq!(discovery.discover(&porto()).await, DiscoveryResult::NotFound);
}

#[tokio::test]
async fn test_extensionless_url_confirmed_by_probe() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://cdn.example.com/images/porto-reitoria",
    )
    .with_title("University of Porto rectorate")
    .with_dimensions(1600, 1000)]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::content_type("image/jpeg"));

    let result = discovery.discover(&porto()).await;

    assert!(result.is_found());
    assert_eq!(discovery.classifier().probe().call_count(), 1);
}

#[tokio::test]
async fn test_forbidden_source_never_probed() {
    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://www.pinterest.com/pin/12345",
    )
    .with_title("University of Porto")]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::content_type("image/jpeg"));

    assert_eq!(discovery.discover(&porto()).await, DiscoveryResult::NotFound);
    assert_eq!(discovery.classifier().probe().call_count(), 0);
}

#[tokio::test]
async fn test_repeated_discovery_is_stable() {
    let candidate = Candidate::new("https://photos.example.com/lisbon.jpg")
        .with_title("Lisbon Portugal skyline")
        .with_dimensions(1600, 900);
    let searcher = MockImageSearcher::new()
        .with_response(vec![candidate.clone()])
        .with_response(vec![candidate]);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());
    let lisbon = city("Lisbon", "Portugal");

    let first = discovery.discover(&lisbon).await;
    let second = discovery.discover(&lisbon).await;
    assert_eq!(first, second);
    assert!(first.is_found());
}

#[tokio::test]
async fn test_every_provider_call_failing_is_not_found() {
    let mut searcher = MockImageSearcher::new();
    for _ in 0..5 {
        searcher = searcher.with_failure(SearchError::Api {
            status: 429,
            message: "quota exceeded".into(),
        });
    }
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    assert_eq!(discovery.discover(&porto()).await, DiscoveryResult::NotFound);
    assert_eq!(discovery.searcher().call_count(), 5);
}

#[tokio::test]
async fn test_discovery_timeout() {
    let discovery = ImageDiscovery::new(PendingSearcher, StaticProbe::unreachable())
        .with_config(DiscoveryConfig::new().with_timeout(Duration::from_millis(20)));

    let result = discovery.discover_with_timeout(&porto(), None).await;
    assert_eq!(result, DiscoveryResult::NotFound);
}

#[tokio::test]
async fn test_silent_provider_does_not_stall_discovery() {
    // Accepts connections and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let credentials = SearchCredentials::new("test-key", "engine-1")
        .with_base_url(format!("http://{}/customsearch/v1", addr));
    let searcher = GoogleImageSearcher::new(&credentials).with_timeout(Duration::from_millis(100));
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    let result = tokio::time::timeout(Duration::from_secs(10), discovery.discover(&porto()))
        .await
        .expect("discover should return on its own");
    assert_eq!(result, DiscoveryResult::NotFound);
}

#[tokio::test]
async fn test_rate_limited_searcher_in_pipeline() {
    let searcher = MockImageSearcher::new().with_empty_responses(5).rate_limited(100);
    let discovery = ImageDiscovery::new(searcher, StaticProbe::unreachable());

    assert_eq!(discovery.discover(&porto()).await, DiscoveryResult::NotFound);
    assert_eq!(discovery.searcher().inner().call_count(), 5);
}

#[tokio::test]
async fn test_enricher_modes() {
    let record = ProducedRecord::new("Lisbon")
        .with_country("Portugal")
        .with_image_url("https://www.visitlisboa.com/en");

    let standalone = Enricher::standalone(
        StaticRecordProducer::new(record.clone()),
        StaticProbe::content_type("text/html"),
    );
    let enriched = standalone.enrich("Lisbon", SubjectKind::City).await.unwrap();
    assert_eq!(enriched.record.image_url, None);
    assert_eq!(enriched.image_provenance, ImageProvenance::Absent);

    let searcher = MockImageSearcher::new().with_response(vec![Candidate::new(
        "https://photos.example.com/lisbon-aerial.jpg",
    )
    .with_title("Lisbon aerial cityscape")
    .with_dimensions(1920, 1080)]);
    let with_search = Enricher::with_search(
        StaticRecordProducer::new(record),
        ImageDiscovery::new(searcher, StaticProbe::content_type("text/html")),
    );
    let enriched = with_search.enrich("Lisbon", SubjectKind::City).await.unwrap();
    assert_eq!(
        enriched.record.image_url.as_deref(),
        Some("https://photos.example.com/lisbon-aerial.jpg")
    );
    assert_eq!(enriched.image_provenance, ImageProvenance::Search);
}
