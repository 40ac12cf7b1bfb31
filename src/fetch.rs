use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use crate::config::FetchConfig;
use crate::error::{DetailError, FetchError};
use crate::models::{Pokemon, RemotePokemonDetail, RemotePokemonIndex, RemotePokemonSummary};

/// Raw answer from a [`PokeSource`].
#[derive(Debug, Clone)]
pub struct SourceResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Anything that can GET a PokéAPI resource.
#[async_trait]
pub trait PokeSource: Send + Sync {
    /// Fetch `url`; `Err` means the request never produced a response.
    async fn get(&self, url: &str) -> Result<SourceResponse>;
}

/// [`PokeSource`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl PokeSource for HttpSource {
    async fn get(&self, url: &str) -> Result<SourceResponse> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body of {url}"))?;
        Ok(SourceResponse { status, body })
    }
}

/// Counters the UI polls while a roster is loading.
#[derive(Debug, Default)]
pub struct FetchProgress {
    total: AtomicUsize,
    settled: AtomicUsize,
    in_progress: AtomicBool,
}

impl FetchProgress {
    fn start(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.settled.store(0, Ordering::Relaxed);
        self.in_progress.store(true, Ordering::Relaxed);
    }

    fn finish(&self) {
        self.in_progress.store(false, Ordering::Relaxed);
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn settled(&self) -> usize {
        self.settled.load(Ordering::Relaxed)
    }

    pub fn ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.settled() as f64 / total as f64).clamp(0.0, 1.0)
        }
    }
}

/// Loads the index page and every detail record behind it.
pub struct RosterFetcher<S> {
    source: S,
    config: FetchConfig,
    progress: Option<Arc<FetchProgress>>,
}

impl<S: PokeSource> RosterFetcher<S> {
    pub fn new(source: S, config: FetchConfig) -> Self {
        Self {
            source,
            config,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: Arc<FetchProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the roster in index order.
    ///
    /// Only a failed index request is an error. A detail lookup that fails
    /// for any reason is logged and left out of the result.
    pub async fn fetch_pokemon_roster(&self) -> Result<Vec<Pokemon>, FetchError> {
        if let Some(p) = &self.progress {
            p.start();
        }
        let result = self.fetch_all().await;
        if let Some(p) = &self.progress {
            p.finish();
        }
        if let Err(FetchError::IndexUnavailable { reason }) = &result {
            error!(%reason, "index request failed");
        }
        result
    }

    async fn fetch_all(&self) -> Result<Vec<Pokemon>, FetchError> {
        let summaries = self.fetch_index().await?;
        let requested = summaries.len();
        if let Some(p) = &self.progress {
            p.total.store(requested, Ordering::Relaxed);
        }
        info!("Fetching details for {} Pokémon", requested);

        let concurrency = self.config.concurrency.unwrap_or(requested).max(1);
        let roster: Vec<Pokemon> = stream::iter(summaries)
            .map(move |summary| async move {
                let outcome = self.fetch_detail(&summary).await;
                if let Some(p) = &self.progress {
                    p.settled.fetch_add(1, Ordering::Relaxed);
                }
                match outcome {
                    Ok(pokemon) => Some(pokemon),
                    Err(e) => {
                        warn!(name = %summary.name, url = %summary.url, "skipping Pokémon: {}", e);
                        None
                    }
                }
            })
            .buffered(concurrency)
            .filter_map(|entry| async move { entry })
            .collect()
            .await;

        info!("Loaded {} of {} Pokémon", roster.len(), requested);
        Ok(roster)
    }

    async fn fetch_index(&self) -> Result<Vec<RemotePokemonSummary>, FetchError> {
        let url = self.config.index_url();
        debug!(%url, "requesting index");

        let resp = self
            .source
            .get(&url)
            .await
            .map_err(|e| FetchError::IndexUnavailable {
                reason: format!("{e:#}"),
            })?;

        if !resp.status.is_success() {
            return Err(FetchError::IndexUnavailable {
                reason: format!("status {}", resp.status),
            });
        }

        let index: RemotePokemonIndex = serde_json::from_str(&resp.body)?;
        Ok(index.results)
    }

    async fn fetch_detail(&self, summary: &RemotePokemonSummary) -> Result<Pokemon, DetailError> {
        let resp = self
            .source
            .get(&summary.url)
            .await
            .map_err(|e| DetailError::Transport(format!("{e:#}")))?;

        if !resp.status.is_success() {
            return Err(DetailError::Status(resp.status));
        }

        let detail: RemotePokemonDetail = serde_json::from_str(&resp.body)?;
        Pokemon::from_remote(summary, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const BASE: &str = "https://pokeapi.test/api/v2";

    enum Route {
        Reply {
            status: StatusCode,
            body: String,
            delay_ms: u64,
        },
        Fail(&'static str),
    }

    #[derive(Default)]
    struct MockSource {
        routes: HashMap<String, Route>,
        requests: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn json(mut self, url: &str, body: serde_json::Value) -> Self {
            self.routes.insert(
                url.to_string(),
                Route::Reply {
                    status: StatusCode::OK,
                    body: body.to_string(),
                    delay_ms: 0,
                },
            );
            self
        }

        fn delayed(mut self, url: &str, body: serde_json::Value, delay_ms: u64) -> Self {
            self.routes.insert(
                url.to_string(),
                Route::Reply {
                    status: StatusCode::OK,
                    body: body.to_string(),
                    delay_ms,
                },
            );
            self
        }

        fn status(mut self, url: &str, status: StatusCode) -> Self {
            self.routes.insert(
                url.to_string(),
                Route::Reply {
                    status,
                    body: "{}".to_string(),
                    delay_ms: 0,
                },
            );
            self
        }

        fn raw(mut self, url: &str, body: &str) -> Self {
            self.routes.insert(
                url.to_string(),
                Route::Reply {
                    status: StatusCode::OK,
                    body: body.to_string(),
                    delay_ms: 0,
                },
            );
            self
        }

        fn failing(mut self, url: &str, message: &'static str) -> Self {
            self.routes.insert(url.to_string(), Route::Fail(message));
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PokeSource for MockSource {
        async fn get(&self, url: &str) -> Result<SourceResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.routes.get(url) {
                Some(Route::Reply {
                    status,
                    body,
                    delay_ms,
                }) => {
                    if *delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    }
                    Ok(SourceResponse {
                        status: *status,
                        body: body.clone(),
                    })
                }
                Some(Route::Fail(message)) => Err(anyhow::anyhow!("{}", message)),
                None => Err(anyhow::anyhow!("no route for {url}")),
            }
        }
    }

    fn config(limit: usize) -> FetchConfig {
        FetchConfig {
            api_base: BASE.to_string(),
            limit,
            ..FetchConfig::default()
        }
    }

    fn index_url(limit: usize) -> String {
        config(limit).index_url()
    }

    fn detail_url(id: u32) -> String {
        format!("{BASE}/pokemon/{id}/")
    }

    fn index(names: &[(&str, u32)]) -> serde_json::Value {
        let results: Vec<_> = names
            .iter()
            .map(|(name, id)| json!({ "name": name, "url": detail_url(*id) }))
            .collect();
        json!({ "count": results.len(), "results": results })
    }

    fn detail(id: u32, ty: &str, stats: [u32; 6]) -> serde_json::Value {
        json!({
            "id": id,
            "sprites": {
                "other": { "official-artwork": { "front_default": format!("{id}.png") } },
                "front_default": "fallback.png"
            },
            "types": [{ "type": { "name": ty } }],
            "stats": stats.iter().map(|v| json!({ "base_stat": v })).collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn test_fetches_roster_with_details() {
        let source = MockSource::default()
            .json(&index_url(2), index(&[("bulbasaur", 1), ("charmander", 4)]))
            .json(&detail_url(1), detail(1, "grass", [45, 49, 49, 65, 65, 45]))
            .json(&detail_url(4), detail(4, "fire", [39, 52, 43, 60, 50, 65]));
        let fetcher = RosterFetcher::new(source, config(2));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Bulbasaur");
        assert_eq!(roster[0].image, "1.png");
        assert_eq!(roster[0].types, vec!["grass"]);
        assert_eq!(roster[0].stats.sp_atk, 65);
        assert_eq!(roster[1].name, "Charmander");
        assert_eq!(roster[1].stats.speed, 65);
    }

    #[tokio::test]
    async fn test_preserves_index_order_not_completion_order() {
        let source = MockSource::default()
            .json(
                &index_url(3),
                index(&[("bulbasaur", 1), ("ivysaur", 2), ("charmander", 4)]),
            )
            .delayed(&detail_url(1), detail(1, "grass", [1; 6]), 60)
            .delayed(&detail_url(2), detail(2, "grass", [2; 6]), 30)
            .json(&detail_url(4), detail(4, "fire", [4; 6]));
        let fetcher = RosterFetcher::new(source, config(3));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bulbasaur", "Ivysaur", "Charmander"]);
    }

    #[tokio::test]
    async fn test_skips_failed_details_and_keeps_relative_order() {
        let source = MockSource::default()
            .json(
                &index_url(5),
                index(&[
                    ("bulbasaur", 1),
                    ("ivysaur", 2),
                    ("venusaur", 3),
                    ("charmander", 4),
                    ("charmeleon", 5),
                ]),
            )
            .json(&detail_url(1), detail(1, "grass", [1; 6]))
            .failing(&detail_url(2), "connection reset")
            .status(&detail_url(3), StatusCode::NOT_FOUND)
            .raw(&detail_url(4), "<html>oops</html>")
            .json(&detail_url(5), detail(5, "fire", [5; 6]));
        let fetcher = RosterFetcher::new(source, config(5));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bulbasaur", "Charmeleon"]);
    }

    #[tokio::test]
    async fn test_malformed_detail_shape_is_skipped() {
        let mut short = detail(2, "grass", [2; 6]);
        short["stats"] = json!([{ "base_stat": 1 }]);
        let source = MockSource::default()
            .json(&index_url(2), index(&[("bulbasaur", 1), ("ivysaur", 2)]))
            .json(&detail_url(1), detail(1, "grass", [1; 6]))
            .json(&detail_url(2), short);
        let fetcher = RosterFetcher::new(source, config(2));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Bulbasaur");
    }

    #[tokio::test]
    async fn test_detail_without_types_is_skipped() {
        let mut untyped = detail(1, "grass", [1; 6]);
        untyped.as_object_mut().unwrap().remove("types");
        let source = MockSource::default()
            .json(&index_url(2), index(&[("bulbasaur", 1), ("ivysaur", 2)]))
            .json(&detail_url(1), untyped)
            .json(&detail_url(2), detail(2, "grass", [2; 6]));
        let fetcher = RosterFetcher::new(source, config(2));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Ivysaur");
    }

    #[tokio::test]
    async fn test_single_detail_failure_yields_empty_roster() {
        let source = MockSource::default()
            .json(&index_url(1), index(&[("bulbasaur", 1)]))
            .failing(&detail_url(1), "Detail fetch failed");
        let fetcher = RosterFetcher::new(source, config(1));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_is_empty_roster() {
        let source = MockSource::default().json(&index_url(10), json!({ "results": [] }));
        let fetcher = RosterFetcher::new(source, config(10));

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        assert!(roster.is_empty());
        assert_eq!(fetcher.source().requested().len(), 1);
    }

    #[tokio::test]
    async fn test_index_status_failure_rejects_without_detail_requests() {
        let source =
            MockSource::default().status(&index_url(2), StatusCode::INTERNAL_SERVER_ERROR);
        let fetcher = RosterFetcher::new(source, config(2));

        let err = fetcher.fetch_pokemon_roster().await.unwrap_err();

        assert!(matches!(err, FetchError::IndexUnavailable { .. }));
        assert!(err.to_string().contains("Failed to load Pokémon data"));
        assert_eq!(fetcher.source().requested(), vec![index_url(2)]);
    }

    #[tokio::test]
    async fn test_index_transport_failure_rejects() {
        let source = MockSource::default().failing(&index_url(2), "dns error");
        let fetcher = RosterFetcher::new(source, config(2));

        let err = fetcher.fetch_pokemon_roster().await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to load Pokémon data");
    }

    #[tokio::test]
    async fn test_unparseable_index_is_propagated() {
        let source = MockSource::default().raw(&index_url(2), "not json");
        let fetcher = RosterFetcher::new(source, config(2));

        let err = fetcher.fetch_pokemon_roster().await.unwrap_err();

        assert!(matches!(err, FetchError::MalformedIndex(_)));
    }

    #[tokio::test]
    async fn test_index_without_results_is_malformed() {
        let source = MockSource::default().json(&index_url(2), json!({ "error": "x" }));
        let fetcher = RosterFetcher::new(source, config(2));

        let err = fetcher.fetch_pokemon_roster().await.unwrap_err();

        assert!(matches!(err, FetchError::MalformedIndex(_)));
        assert_eq!(fetcher.source().requested(), vec![index_url(2)]);
    }

    #[tokio::test]
    async fn test_concurrency_cap_keeps_order() {
        let source = MockSource::default()
            .json(
                &index_url(3),
                index(&[("bulbasaur", 1), ("ivysaur", 2), ("venusaur", 3)]),
            )
            .delayed(&detail_url(1), detail(1, "grass", [1; 6]), 20)
            .json(&detail_url(2), detail(2, "grass", [2; 6]))
            .json(&detail_url(3), detail(3, "grass", [3; 6]));
        let fetcher = RosterFetcher::new(
            source,
            FetchConfig {
                concurrency: Some(1),
                ..config(3)
            },
        );

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        let ids: Vec<_> = roster.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_progress_counts_every_settled_request() {
        let source = MockSource::default()
            .json(&index_url(2), index(&[("bulbasaur", 1), ("ivysaur", 2)]))
            .json(&detail_url(1), detail(1, "grass", [1; 6]))
            .failing(&detail_url(2), "boom");
        let progress = Arc::new(FetchProgress::default());
        let fetcher = RosterFetcher::new(source, config(2)).with_progress(progress.clone());

        let roster = fetcher.fetch_pokemon_roster().await.unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(progress.total(), 2);
        assert_eq!(progress.settled(), 2);
        assert!(!progress.in_progress());
        assert_eq!(progress.ratio(), 1.0);
    }
}
