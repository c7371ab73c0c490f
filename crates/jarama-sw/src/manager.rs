//! The offline cache manager.
//!
//! Owns the two versioned stores (precache and runtime), the routing table,
//! and the worker lifecycle. All network traffic goes through the injected
//! [`Fetcher`], so hosts and tests control the network the same way.

use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use jarama_net::{Fetcher, Request, Response};
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::cache::{CacheEntry, CacheKey, CacheStorage};
use crate::clients::{Client, Clients};
use crate::events::{self, ClickOutcome, Notification, PushEvent};
use crate::routes::{FillCondition, RoutePolicy, RoutingTable};
use crate::worker::{ServiceWorker, WorkerId, WorkerState};
use crate::SwError;

/// Names of the current cache-store generation.
///
/// Injected at construction, never ambient; bumping either name orphans all
/// differently-named stores on the next activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheVersions {
    /// Name of the precache store (fixed manifest, written once at install).
    pub precache: String,
    /// Name of the runtime store (opportunistic, grows during use).
    pub runtime: String,
}

impl CacheVersions {
    pub fn new(precache: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            precache: precache.into(),
            runtime: runtime.into(),
        }
    }
}

/// Manager configuration.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Current store generation names.
    pub versions: CacheVersions,
    /// The app origin; relative manifest entries resolve against it and
    /// requests to any other origin take the cross-origin route.
    pub app_origin: Url,
    /// Assets fetched and stored at install time. A mix of same-origin
    /// paths and absolute cross-origin URLs.
    pub precache_manifest: Vec<String>,
    /// Same-origin path prefixes whose data changes too often to serve
    /// stale while the network is up.
    pub dynamic_prefixes: Vec<String>,
}

impl ManagerConfig {
    /// The default configuration for the music app, matching the deployed
    /// asset set. The manifest must be kept in sync with the static assets
    /// or install fails.
    pub fn for_music_app(app_origin: Url, versions: CacheVersions) -> Self {
        Self {
            versions,
            app_origin,
            precache_manifest: vec![
                "/".to_string(),
                "/static/style.css".to_string(),
                "/static/manifest.json".to_string(),
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css"
                    .to_string(),
                "https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700;900&display=swap"
                    .to_string(),
            ],
            dynamic_prefixes: vec![
                "/download".to_string(),
                "/stats".to_string(),
                "/play".to_string(),
                "/cover".to_string(),
            ],
        }
    }
}

/// Response handed back to the page for an intercepted request.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
    /// Whether the body came from a store rather than the live network.
    pub from_cache: bool,
}

impl FetchResponse {
    /// Build a response from a stored snapshot.
    pub fn from_entry(entry: &CacheEntry) -> Self {
        Self {
            status: StatusCode::from_u16(entry.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            headers: entry.header_map(),
            body: Bytes::from(entry.body.clone()),
            from_cache: true,
        }
    }

    /// Build a response from a live network response.
    pub fn from_live(response: Response) -> Self {
        Self {
            status: response.status,
            headers: response.headers.clone(),
            body: response.into_body(),
            from_cache: false,
        }
    }
}

/// What the host should do with an intercepted request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Not intercepted; the browser handles the request natively.
    Passthrough,
    /// Respond with this (cached or live) response.
    Respond(FetchResponse),
}

/// The offline cache manager.
pub struct OfflineCacheManager {
    config: ManagerConfig,
    routes: RoutingTable,
    fetcher: Arc<dyn Fetcher>,
    storage: Arc<RwLock<CacheStorage>>,
    worker: RwLock<ServiceWorker>,
    clients: RwLock<Clients>,
}

impl OfflineCacheManager {
    /// Create a manager for the given configuration and network seam.
    pub fn new(config: ManagerConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let routes = RoutingTable::for_app(&config.app_origin, &config.dynamic_prefixes);
        Self {
            config,
            routes,
            fetcher,
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            worker: RwLock::new(ServiceWorker::new()),
            clients: RwLock::new(Clients::new()),
        }
    }

    /// Shared handle to the cache storage, for host introspection.
    pub fn storage(&self) -> Arc<RwLock<CacheStorage>> {
        Arc::clone(&self.storage)
    }

    /// Current worker state.
    pub async fn state(&self) -> WorkerState {
        self.worker.read().await.state
    }

    /// This worker's ID.
    pub async fn worker_id(&self) -> WorkerId {
        self.worker.read().await.id
    }

    /// Register an open page with the manager.
    pub async fn add_client(&self, client: Client) {
        self.clients.write().await.add(client);
    }

    /// Look up a registered client.
    pub async fn client(&self, id: &str) -> Option<Client> {
        self.clients.read().await.get(id).cloned()
    }

    /// Remove a client (page closed). Any in-flight interception for it is
    /// simply discarded by the host.
    pub async fn remove_client(&self, id: &str) {
        self.clients.write().await.remove(id);
    }

    // ==================== Lifecycle ====================

    /// Install: populate the precache from the manifest, all-or-nothing.
    ///
    /// Every manifest asset is fetched first; the store is written only
    /// after all of them returned a success status, so a failed install
    /// never leaves a partially populated precache. On success the worker
    /// is immediately eligible for activation (skip-waiting).
    pub async fn install(&self) -> Result<(), SwError> {
        self.worker.write().await.set_state(WorkerState::Installing);
        info!(precache = %self.config.versions.precache, "Installing, precaching assets");

        let mut snapshots = Vec::with_capacity(self.config.precache_manifest.len());
        for asset in &self.config.precache_manifest {
            let url = match self.resolve_manifest_entry(asset) {
                Ok(url) => url,
                Err(err) => return self.fail_install(err).await,
            };

            let request = Request::get(url);
            let key = CacheKey::for_request(&request);
            match self.fetcher.fetch(request.clone()).await {
                Ok(response) if response.ok() => {
                    snapshots.push((key, CacheEntry::snapshot(&request, &response)));
                }
                Ok(response) => {
                    let err = SwError::InstallFailed(format!(
                        "precache fetch for {} returned {}",
                        request.url, response.status
                    ));
                    return self.fail_install(err).await;
                }
                Err(err) => {
                    let err = SwError::InstallFailed(format!(
                        "precache fetch for {} failed: {}",
                        request.url, err
                    ));
                    return self.fail_install(err).await;
                }
            }
        }

        let mut storage = self.storage.write().await;
        let cache = storage.open(&self.config.versions.precache);
        for (key, entry) in snapshots {
            cache.put(key, entry);
        }
        drop(storage);

        self.worker.write().await.set_state(WorkerState::Installed);
        info!("Install complete");
        Ok(())
    }

    /// Activate: delete orphaned stores, then claim open pages.
    ///
    /// After this returns, no store with a name outside the current version
    /// pair exists and every registered client is controlled by this worker.
    pub async fn activate(&self) -> Result<(), SwError> {
        {
            let mut worker = self.worker.write().await;
            if worker.is_redundant() {
                return Err(SwError::StateError(
                    "cannot activate a redundant worker".to_string(),
                ));
            }
            worker.set_state(WorkerState::Activating);
        }
        info!("Activating, sweeping orphaned caches");

        {
            let mut storage = self.storage.write().await;
            for name in storage.keys() {
                if name != self.config.versions.precache && name != self.config.versions.runtime {
                    info!(cache = %name, "Deleting old cache");
                    storage.delete(&name);
                }
            }
        }

        let worker_id = self.worker.read().await.id;
        self.clients.write().await.claim(worker_id);

        self.worker.write().await.set_state(WorkerState::Activated);
        Ok(())
    }

    async fn fail_install(&self, err: SwError) -> Result<(), SwError> {
        warn!(error = %err, "Install failed");
        self.worker.write().await.fail(err.to_string());
        Err(err)
    }

    fn resolve_manifest_entry(&self, asset: &str) -> Result<Url, SwError> {
        if let Ok(url) = Url::parse(asset) {
            return Ok(url);
        }
        self.config
            .app_origin
            .join(asset)
            .map_err(|e| SwError::InvalidRequest(format!("bad manifest entry {asset}: {e}")))
    }

    // ==================== Fetch interception ====================

    /// Handle one intercepted request.
    ///
    /// Safe to call concurrently; storage locks are never held across a
    /// network await, so two racing misses on the same URL may both fetch
    /// and both fill the runtime store (last write wins).
    pub async fn handle_fetch(&self, request: Request) -> Result<FetchOutcome, SwError> {
        let policy = self.routes.route_for(&request);
        trace!(url = %request.url, method = %request.method, policy = ?policy, "Routing fetch");

        match policy {
            RoutePolicy::Passthrough => Ok(FetchOutcome::Passthrough),
            RoutePolicy::CacheFirst { fill } => self.cache_first(request, fill).await,
            RoutePolicy::NetworkFirst => self.network_first(request).await,
        }
    }

    async fn cache_first(
        &self,
        request: Request,
        fill: FillCondition,
    ) -> Result<FetchOutcome, SwError> {
        let key = CacheKey::for_request(&request);

        {
            let storage = self.storage.read().await;
            if let Some(entry) = storage.match_in(&self.store_names(), &key) {
                debug!(url = %request.url, "Cache hit");
                return Ok(FetchOutcome::Respond(FetchResponse::from_entry(entry)));
            }
        }

        let response = self.fetcher.fetch(request.clone()).await?;

        let should_fill = match fill {
            FillCondition::Always => true,
            FillCondition::PlainOk => response.status == StatusCode::OK,
        };
        if should_fill {
            // Snapshot before the body is handed to the caller; the stored
            // copy must stay independent of the live response.
            let entry = CacheEntry::snapshot(&request, &response);
            let mut storage = self.storage.write().await;
            storage.open(&self.config.versions.runtime).put(key, entry);
            debug!(url = %request.url, cache = %self.config.versions.runtime, "Runtime fill");
        }

        Ok(FetchOutcome::Respond(FetchResponse::from_live(response)))
    }

    async fn network_first(&self, request: Request) -> Result<FetchOutcome, SwError> {
        let key = CacheKey::for_request(&request);

        match self.fetcher.fetch(request.clone()).await {
            Ok(response) => Ok(FetchOutcome::Respond(FetchResponse::from_live(response))),
            Err(err) => {
                warn!(url = %request.url, error = %err, "Network failed, trying cache fallback");
                let storage = self.storage.read().await;
                match storage.match_in(&self.store_names(), &key) {
                    Some(entry) => Ok(FetchOutcome::Respond(FetchResponse::from_entry(entry))),
                    None => Err(SwError::Network(err)),
                }
            }
        }
    }

    fn store_names(&self) -> [&str; 2] {
        [
            self.config.versions.precache.as_str(),
            self.config.versions.runtime.as_str(),
        ]
    }

    // ==================== Background hooks ====================

    /// Background sync hook. Returns whether the tag was recognized.
    pub fn on_sync(&self, tag: &str) -> bool {
        events::handle_sync(tag)
    }

    /// Push hook: build the notification the host should display.
    pub fn on_push(&self, event: &PushEvent) -> Notification {
        Notification::for_push(event)
    }

    /// Notification-click hook: the `explore` action opens the app root,
    /// anything else just dismisses.
    pub async fn on_notification_click(&self, action: &str) -> Result<Option<Client>, SwError> {
        match events::notification_click_outcome(action) {
            ClickOutcome::OpenApp => {
                let mut clients = self.clients.write().await;
                let client = clients.open_window(self.config.app_origin.as_str())?;
                Ok(Some(client))
            }
            ClickOutcome::Dismiss => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hashbrown::HashMap;
    use jarama_net::NetError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    const PRECACHE: &str = "jarama-music-v2";
    const RUNTIME: &str = "jarama-runtime-v2";

    /// In-memory network: a URL table, an offline switch, and a call counter.
    struct FakeFetcher {
        responses: Mutex<HashMap<String, (u16, Vec<u8>)>>,
        offline: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(HashMap::new()),
                offline: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            })
        }

        fn serve(&self, url: &str, status: u16, body: &[u8]) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), (status, body.to_vec()));
        }

        fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, request: Request) -> Result<Response, NetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(NetError::Unreachable("offline".to_string()));
            }
            let responses = self.responses.lock().unwrap();
            match responses.get(request.url.as_str()) {
                Some((status, body)) => Ok(Response::new(
                    request.id,
                    request.url.clone(),
                    StatusCode::from_u16(*status).unwrap(),
                    HeaderMap::new(),
                    Bytes::copy_from_slice(body),
                )),
                None => Err(NetError::RequestFailed(format!(
                    "no route for {}",
                    request.url
                ))),
            }
        }
    }

    fn app_origin() -> Url {
        Url::parse("https://music.example.com/").unwrap()
    }

    fn versions() -> CacheVersions {
        CacheVersions::new(PRECACHE, RUNTIME)
    }

    fn config_with_manifest(manifest: &[&str]) -> ManagerConfig {
        ManagerConfig {
            versions: versions(),
            app_origin: app_origin(),
            precache_manifest: manifest.iter().map(|s| s.to_string()).collect(),
            dynamic_prefixes: vec![
                "/download".to_string(),
                "/stats".to_string(),
                "/play".to_string(),
                "/cover".to_string(),
            ],
        }
    }

    fn manager(fake: &Arc<FakeFetcher>, manifest: &[&str]) -> OfflineCacheManager {
        OfflineCacheManager::new(
            config_with_manifest(manifest),
            Arc::clone(fake) as Arc<dyn Fetcher>,
        )
    }

    fn get(url: &str) -> Request {
        Request::get(Url::parse(url).unwrap())
    }

    async fn body_of(outcome: FetchOutcome) -> Bytes {
        match outcome {
            FetchOutcome::Respond(response) => response.body,
            FetchOutcome::Passthrough => panic!("expected a response"),
        }
    }

    // ===== Lifecycle =====

    #[tokio::test]
    async fn install_populates_precache_and_skips_waiting() {
        let fake = FakeFetcher::new();
        fake.serve("https://music.example.com/", 200, b"<html>");
        fake.serve("https://music.example.com/static/style.css", 200, b"body{}");

        let manager = manager(&fake, &["/", "/static/style.css"]);
        manager.install().await.unwrap();

        assert_eq!(manager.state().await, WorkerState::Installed);
        let storage = manager.storage();
        let storage = storage.read().await;
        assert_eq!(storage.get(PRECACHE).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn install_is_all_or_nothing() {
        let fake = FakeFetcher::new();
        fake.serve("https://music.example.com/", 200, b"<html>");
        // /static/style.css is not served: its fetch fails.

        let manager = manager(&fake, &["/", "/static/style.css"]);
        let err = manager.install().await.unwrap_err();

        assert!(matches!(err, SwError::InstallFailed(_)));
        assert_eq!(manager.state().await, WorkerState::Redundant);

        // Nothing was written, not even the asset that succeeded.
        let storage = manager.storage();
        let storage = storage.read().await;
        assert!(storage.get(PRECACHE).is_none());
    }

    #[tokio::test]
    async fn install_fails_on_error_status() {
        let fake = FakeFetcher::new();
        fake.serve("https://music.example.com/", 200, b"<html>");
        fake.serve("https://music.example.com/static/style.css", 500, b"");

        let manager = manager(&fake, &["/", "/static/style.css"]);
        assert!(manager.install().await.is_err());
        assert_eq!(manager.state().await, WorkerState::Redundant);
    }

    #[tokio::test]
    async fn activate_deletes_orphaned_stores() {
        let fake = FakeFetcher::new();
        let manager = manager(&fake, &[]);

        {
            let storage = manager.storage();
            let mut storage = storage.write().await;
            storage.open("jarama-music-v1");
            storage.open("jarama-runtime-v1");
            storage.open(PRECACHE);
        }

        manager.install().await.unwrap();
        manager.activate().await.unwrap();

        let storage = manager.storage();
        let storage = storage.read().await;
        let mut names = storage.keys();
        names.sort();
        assert_eq!(names, vec![PRECACHE.to_string()]);
        assert_eq!(manager.state().await, WorkerState::Activated);
    }

    #[tokio::test]
    async fn activate_claims_clients() {
        let fake = FakeFetcher::new();
        let manager = manager(&fake, &[]);
        manager
            .add_client(Client::new("page-1", app_origin()))
            .await;

        manager.install().await.unwrap();
        manager.activate().await.unwrap();

        let worker_id = manager.worker_id().await;
        let client = manager.client("page-1").await.unwrap();
        assert!(client.is_controlled_by(worker_id));
    }

    #[tokio::test]
    async fn redundant_worker_cannot_activate() {
        let fake = FakeFetcher::new();
        let manager = manager(&fake, &["/"]);

        assert!(manager.install().await.is_err());
        assert!(matches!(
            manager.activate().await,
            Err(SwError::StateError(_))
        ));
    }

    // ===== Routing =====

    #[tokio::test]
    async fn non_read_requests_never_touch_stores() {
        let fake = FakeFetcher::new();
        let manager = manager(&fake, &[]);

        let request = Request::post(
            Url::parse("https://music.example.com/download").unwrap(),
            Bytes::from_static(b"url=spotify:track:x"),
        );
        let outcome = manager.handle_fetch(request).await.unwrap();

        assert!(matches!(outcome, FetchOutcome::Passthrough));
        assert_eq!(fake.calls(), 0);
        let storage = manager.storage();
        assert!(storage.read().await.keys().is_empty());
    }

    #[tokio::test]
    async fn cross_origin_is_cache_first() {
        let fake = FakeFetcher::new();
        let font_url = "https://fonts.googleapis.com/css2?family=Inter";
        fake.serve(font_url, 200, b"@font-face{}");

        let manager = manager(&fake, &[]);

        let first = body_of(manager.handle_fetch(get(font_url)).await.unwrap()).await;
        assert_eq!(first.as_ref(), b"@font-face{}");
        assert_eq!(fake.calls(), 1);

        // Second hit is served from the runtime store, even offline.
        fake.set_offline(true);
        let second = manager.handle_fetch(get(font_url)).await.unwrap();
        match second {
            FetchOutcome::Respond(response) => {
                assert!(response.from_cache);
                assert_eq!(response.body.as_ref(), b"@font-face{}");
            }
            FetchOutcome::Passthrough => panic!("expected a response"),
        }
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn dynamic_path_returns_live_data_despite_stale_entry() {
        let fake = FakeFetcher::new();
        let stats_url = "https://music.example.com/stats";
        fake.serve(stats_url, 200, b"{\"tracks\":[1,2,3]}");

        let manager = manager(&fake, &[]);

        // A stale snapshot from a previous session.
        {
            let request = get(stats_url);
            let stale = Response::new(
                request.id,
                request.url.clone(),
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::from_static(b"{\"tracks\":[]}"),
            );
            let storage = manager.storage();
            let mut storage = storage.write().await;
            storage.open(RUNTIME).put(
                CacheKey::for_request(&request),
                CacheEntry::snapshot(&request, &stale),
            );
        }

        let outcome = manager.handle_fetch(get(stats_url)).await.unwrap();
        match outcome {
            FetchOutcome::Respond(response) => {
                assert!(!response.from_cache);
                assert_eq!(response.body.as_ref(), b"{\"tracks\":[1,2,3]}");
            }
            FetchOutcome::Passthrough => panic!("expected a response"),
        }
    }

    #[tokio::test]
    async fn dynamic_path_falls_back_to_cache_when_offline() {
        let fake = FakeFetcher::new();
        let play_url = "https://music.example.com/play/track.mp3";
        fake.serve(play_url, 200, b"ID3...");

        let manager = manager(&fake, &[]);

        {
            let request = get(play_url);
            let cached = Response::new(
                request.id,
                request.url.clone(),
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::from_static(b"ID3..."),
            );
            let storage = manager.storage();
            let mut storage = storage.write().await;
            storage.open(RUNTIME).put(
                CacheKey::for_request(&request),
                CacheEntry::snapshot(&request, &cached),
            );
        }

        fake.set_offline(true);
        let outcome = manager.handle_fetch(get(play_url)).await.unwrap();
        let body = body_of(outcome).await;
        assert_eq!(body.as_ref(), b"ID3...");
    }

    #[tokio::test]
    async fn dynamic_path_propagates_failure_without_fallback() {
        let fake = FakeFetcher::new();
        fake.set_offline(true);

        let manager = manager(&fake, &[]);
        let result = manager
            .handle_fetch(get("https://music.example.com/stats"))
            .await;

        assert!(matches!(result, Err(SwError::Network(_))));
    }

    #[tokio::test]
    async fn static_asset_runtime_fill_round_trip() {
        let fake = FakeFetcher::new();
        let js_url = "https://music.example.com/app.js";
        fake.serve(js_url, 200, b"console.log(1)");

        let manager = manager(&fake, &[]);

        let first = body_of(manager.handle_fetch(get(js_url)).await.unwrap()).await;

        fake.set_offline(true);
        let second = body_of(manager.handle_fetch(get(js_url)).await.unwrap()).await;

        // Byte-identical snapshot served without the network.
        assert_eq!(first, second);
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn static_non_200_is_not_cached() {
        let fake = FakeFetcher::new();
        let missing_url = "https://music.example.com/missing.js";
        fake.serve(missing_url, 404, b"not found");

        let manager = manager(&fake, &[]);

        let outcome = manager.handle_fetch(get(missing_url)).await.unwrap();
        match outcome {
            FetchOutcome::Respond(response) => {
                assert_eq!(response.status, StatusCode::NOT_FOUND);
                assert!(!response.from_cache);
            }
            FetchOutcome::Passthrough => panic!("expected a response"),
        }

        let storage = manager.storage();
        let storage = storage.read().await;
        assert!(storage
            .get(RUNTIME)
            .map(|c| c.is_empty())
            .unwrap_or(true));
    }

    #[tokio::test]
    async fn static_miss_with_network_down_propagates() {
        let fake = FakeFetcher::new();
        fake.set_offline(true);

        let manager = manager(&fake, &[]);
        let result = manager
            .handle_fetch(get("https://music.example.com/never-seen.css"))
            .await;

        assert!(matches!(result, Err(SwError::Network(_))));
    }

    #[tokio::test]
    async fn precached_asset_served_without_network() {
        let fake = FakeFetcher::new();
        fake.serve("https://music.example.com/", 200, b"<html>");

        let manager = manager(&fake, &["/"]);
        manager.install().await.unwrap();
        manager.activate().await.unwrap();

        fake.set_offline(true);
        let outcome = manager
            .handle_fetch(get("https://music.example.com/"))
            .await
            .unwrap();
        let body = body_of(outcome).await;
        assert_eq!(body.as_ref(), b"<html>");
    }

    // ===== Background hooks =====

    #[tokio::test]
    async fn sync_and_push_hooks() {
        let fake = FakeFetcher::new();
        let manager = manager(&fake, &[]);

        assert!(manager.on_sync("sync-downloads"));
        assert!(!manager.on_sync("sync-other"));

        let notification = manager.on_push(&PushEvent {
            payload: Some("Track ready".to_string()),
        });
        assert_eq!(notification.body, "Track ready");
    }

    #[tokio::test]
    async fn notification_click_opens_app_root() {
        let fake = FakeFetcher::new();
        let manager = manager(&fake, &[]);

        let opened = manager.on_notification_click("explore").await.unwrap();
        assert_eq!(
            opened.unwrap().url.as_str(),
            "https://music.example.com/"
        );

        let dismissed = manager.on_notification_click("close").await.unwrap();
        assert!(dismissed.is_none());
    }
}
