use std::time::Instant;

use aniview_api::{Client, Config, ListCategory, MediaType};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".into()),
        )
        .try_init();
}

fn build_client() -> Client {
    let mut config = Config::default();
    if let Ok(endpoint) = std::env::var("ANIVIEW_API_ENDPOINT") {
        config.api.endpoint = endpoint;
    }
    if let Ok(token) = std::env::var("ANIVIEW_API_TOKEN") {
        if !token.trim().is_empty() {
            config.api.token = Some(token);
        }
    }
    Client::new(&config.api).expect("failed to build API client")
}

#[tokio::test]
#[ignore = "network diagnostic harness; run explicitly with --ignored --nocapture"]
async fn poll_public_lists_and_detail() {
    init_tracing();
    let client = build_client();

    let categories = [
        ListCategory::TrendingNow,
        ListCategory::PopularThisSeason,
        ListCategory::UpcomingNextSeason,
        ListCategory::AllTimePopular,
    ];

    let mut first_id = None;
    for category in categories {
        let started = Instant::now();
        let cards = client
            .media_list(MediaType::Anime, category, 1)
            .await
            .unwrap_or_else(|e| panic!("{} failed: {}", category.title(), e));
        println!(
            "{:<22} {:>4}ms  {} entries  first={}",
            category.title(),
            started.elapsed().as_millis(),
            cards.len(),
            cards
                .first()
                .and_then(|c| c.title.as_deref())
                .unwrap_or("(untitled)")
        );
        assert!(!cards.is_empty(), "{} returned no entries", category.title());
        if first_id.is_none() {
            first_id = cards.first().map(|c| c.id);
        }
    }

    let id = first_id.expect("no media id to probe detail with");
    let started = Instant::now();
    let detail = client
        .media_detail(id, MediaType::Anime)
        .await
        .expect("media detail failed");
    println!(
        "detail id={} {:>4}ms  title={}  stats={} rankings  {} characters  trailer={}",
        id,
        started.elapsed().as_millis(),
        detail.title.as_deref().unwrap_or("(untitled)"),
        detail.rankings.len(),
        detail.characters.len(),
        detail
            .trailer
            .as_ref()
            .map(|t| t.url.as_str())
            .unwrap_or("(none)")
    );
    assert_eq!(detail.id, id);
}

#[tokio::test]
#[ignore = "network diagnostic harness; run explicitly with --ignored --nocapture"]
async fn poll_viewer_when_token_present() {
    init_tracing();
    if std::env::var("ANIVIEW_API_TOKEN").is_err() {
        println!("ANIVIEW_API_TOKEN not set; skipping viewer probe");
        return;
    }
    let client = build_client();
    let viewer = client.viewer().await.expect("viewer query failed");
    println!("viewer id={} name={}", viewer.id, viewer.name);
    assert!(!viewer.name.is_empty());
}
