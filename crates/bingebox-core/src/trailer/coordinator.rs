//! Trailer viewer state machine
//!
//! `Idle -> Loading -> {Ready | NotFound | Failed} -> Idle`
//!
//! The coordinator never performs I/O itself. [`TrailerCoordinator::select`]
//! hands back a [`TrailerRequest`] for the caller to run (usually through
//! [`TrailerCoordinator::spawn_lookup`]), and the finished
//! [`TrailerResponse`] is fed back through [`TrailerCoordinator::apply`],
//! which discards anything that no longer matches the current selection.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::TrailerConfig;
use crate::lifecycle::{Liveness, LivenessToken};
use crate::media::{MediaItem, MediaKind};

use super::lookup::{LookupOutcome, TrailerLookup};

/// The item a lookup is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subject {
    pub id: i64,
    pub kind: MediaKind,
}

impl From<&MediaItem> for Subject {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrailerStatus {
    #[default]
    Idle,
    Loading(Subject),
    Ready { subject: Subject, video_id: String },
    NotFound(Subject),
    Failed { subject: Subject, reason: String },
}

impl TrailerStatus {
    pub fn subject(&self) -> Option<Subject> {
        match self {
            TrailerStatus::Idle => None,
            TrailerStatus::Loading(subject) | TrailerStatus::NotFound(subject) => Some(*subject),
            TrailerStatus::Ready { subject, .. } | TrailerStatus::Failed { subject, .. } => {
                Some(*subject)
            }
        }
    }
}

/// A lookup the coordinator wants performed
#[derive(Debug, Clone)]
pub struct TrailerRequest {
    subject: Subject,
    ticket: u64,
    token: LivenessToken,
}

impl TrailerRequest {
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// False once the issuing coordinator has been torn down
    pub fn is_live(&self) -> bool {
        self.token.is_alive()
    }

    pub fn into_response(self, outcome: LookupOutcome) -> TrailerResponse {
        TrailerResponse {
            subject: self.subject,
            ticket: self.ticket,
            token: self.token,
            outcome,
        }
    }
}

/// A finished lookup, still tagged with the request it answers
#[derive(Debug, Clone)]
pub struct TrailerResponse {
    subject: Subject,
    ticket: u64,
    token: LivenessToken,
    outcome: LookupOutcome,
}

impl TrailerResponse {
    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn outcome(&self) -> &LookupOutcome {
        &self.outcome
    }
}

#[derive(Debug)]
pub struct TrailerCoordinator {
    status: TrailerStatus,
    /// Bumped every time a lookup starts; a response must carry the current value
    generation: u64,
    liveness: Liveness,
    watch_url_base: String,
}

impl Default for TrailerCoordinator {
    fn default() -> Self {
        Self::new(&TrailerConfig::default())
    }
}

impl TrailerCoordinator {
    pub fn new(config: &TrailerConfig) -> Self {
        Self {
            status: TrailerStatus::Idle,
            generation: 0,
            liveness: Liveness::new(),
            watch_url_base: config.watch_url_base.clone(),
        }
    }

    /// User picked an item.
    ///
    /// While anything is open (loading, playing or showing the unavailable
    /// notice) this closes the viewer instead of switching items, and returns
    /// `None`. From `Idle` it starts loading and returns the request to run.
    pub fn select(&mut self, item: &MediaItem) -> Option<TrailerRequest> {
        if !self.liveness.is_alive() {
            tracing::debug!(id = item.id, "Ignoring select on torn down coordinator");
            return None;
        }

        if self.status != TrailerStatus::Idle {
            self.close();
            return None;
        }

        let subject = Subject::from(item);
        self.generation += 1;
        self.status = TrailerStatus::Loading(subject);
        tracing::debug!(id = subject.id, kind = %subject.kind, ticket = self.generation, "Trailer lookup started");

        Some(TrailerRequest {
            subject,
            ticket: self.generation,
            token: self.liveness.token(),
        })
    }

    /// Close the viewer; any outstanding lookup becomes stale
    pub fn close(&mut self) {
        if self.status != TrailerStatus::Idle {
            tracing::debug!("Trailer viewer closed");
        }
        self.status = TrailerStatus::Idle;
    }

    /// Apply a finished lookup if it still answers the current selection.
    ///
    /// Returns whether state changed.
    pub fn apply(&mut self, response: TrailerResponse) -> bool {
        if !self.liveness.is_alive() || !response.token.belongs_to(&self.liveness) {
            tracing::debug!(id = response.subject.id, "Dropping response for another or dead coordinator");
            return false;
        }

        let current = self.is_loading() && self.status.subject() == Some(response.subject);
        if response.ticket != self.generation || !current {
            tracing::debug!(
                id = response.subject.id,
                ticket = response.ticket,
                generation = self.generation,
                "Discarding stale trailer response"
            );
            return false;
        }

        let subject = response.subject;
        self.status = match response.outcome {
            LookupOutcome::Found(video_id) => TrailerStatus::Ready { subject, video_id },
            LookupOutcome::NotFound => TrailerStatus::NotFound(subject),
            LookupOutcome::Failed(reason) => TrailerStatus::Failed { subject, reason },
        };
        true
    }

    /// Owner is going away: late responses and lookups become no-ops
    pub fn teardown(&mut self) {
        if self.liveness.invalidate() {
            tracing::debug!("Trailer coordinator torn down");
        }
        self.status = TrailerStatus::Idle;
    }

    pub fn status(&self) -> &TrailerStatus {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.status != TrailerStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, TrailerStatus::Loading(_))
    }

    pub fn video_id(&self) -> Option<&str> {
        match &self.status {
            TrailerStatus::Ready { video_id, .. } => Some(video_id),
            _ => None,
        }
    }

    /// Playable URL for the ready video
    pub fn watch_url(&self) -> Option<String> {
        self.video_id()
            .map(|id| format!("{}{}", self.watch_url_base, id))
    }

    /// Not-found and failed lookups show the same notice
    pub fn show_unavailable_notice(&self) -> bool {
        matches!(
            self.status,
            TrailerStatus::NotFound(_) | TrailerStatus::Failed { .. }
        )
    }

    /// Run `request` on the runtime and deliver the response to `tx`.
    ///
    /// Nothing is sent if the issuing coordinator was torn down while the
    /// lookup was in flight.
    pub fn spawn_lookup(
        lookup: TrailerLookup,
        request: TrailerRequest,
        tx: mpsc::UnboundedSender<TrailerResponse>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let response = lookup.run(request).await;
            if !response.token.is_alive() {
                tracing::debug!(id = response.subject.id, "Lookup finished after teardown");
                return;
            }
            if tx.send(response).is_err() {
                tracing::warn!("Failed to deliver trailer response: receiver dropped");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;
    use url::Url;

    use super::*;
    use crate::fetch::testing::StubFetcher;
    use crate::fetch::{FetchJson, TmdbApi};
    use crate::trailer::TrailerFilter;
    use crate::Result;

    fn movie(id: i64) -> MediaItem {
        MediaItem::new(id, MediaKind::Movie).with_title(format!("Movie {}", id))
    }

    fn lookup(fetcher: impl FetchJson + 'static) -> TrailerLookup {
        let api = TmdbApi::new(Arc::new(fetcher), "https://api.themoviedb.org/3", "key");
        TrailerLookup::new(api, TrailerFilter::default())
    }

    fn trailer_body(key: &str) -> serde_json::Value {
        json!({"id": 1, "results": [{"key": key, "site": "YouTube", "type": "Trailer"}]})
    }

    #[tokio::test]
    async fn test_ready_then_toggle_close() {
        let lookup = lookup(StubFetcher::default().respond("/3/movie/1/videos", trailer_body("xyz")));
        let mut coordinator = TrailerCoordinator::default();
        let item = movie(1);

        let request = coordinator.select(&item).expect("idle select starts a lookup");
        assert!(coordinator.is_loading());

        let response = lookup.run(request).await;
        assert!(coordinator.apply(response));
        assert_eq!(coordinator.video_id(), Some("xyz"));
        assert_eq!(
            coordinator.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=xyz")
        );
        assert!(!coordinator.show_unavailable_notice());

        assert!(coordinator.select(&item).is_none());
        assert_eq!(coordinator.status(), &TrailerStatus::Idle);
    }

    #[tokio::test]
    async fn test_status_reports_subject() {
        let fetcher = StubFetcher::default().respond("/3/movie/1/videos", json!({"results": []}));
        let lookup = lookup(fetcher);
        let mut coordinator = TrailerCoordinator::default();
        let subject = Subject::from(&movie(1));
        assert_eq!(coordinator.status().subject(), None);

        let request = coordinator.select(&movie(1)).unwrap();
        assert_eq!(coordinator.status().subject(), Some(subject));

        assert!(coordinator.apply(lookup.run(request).await));
        assert_eq!(coordinator.status(), &TrailerStatus::NotFound(subject));
        assert_eq!(coordinator.status().subject(), Some(subject));

        coordinator.close();
        assert_eq!(coordinator.status().subject(), None);
    }

    #[tokio::test]
    async fn test_stale_response_discarded_after_reselect() {
        let fetcher = StubFetcher::default()
            .respond("/3/movie/1/videos", trailer_body("aaa"))
            .respond("/3/movie/2/videos", trailer_body("bbb"));
        let lookup = lookup(fetcher);
        let mut coordinator = TrailerCoordinator::default();

        let request_a = coordinator.select(&movie(1)).unwrap();
        // Selecting while loading closes the viewer.
        assert!(coordinator.select(&movie(2)).is_none());
        assert_eq!(coordinator.status(), &TrailerStatus::Idle);

        let request_b = coordinator.select(&movie(2)).unwrap();

        let response_a = lookup.run(request_a).await;
        assert!(!coordinator.apply(response_a));
        assert_eq!(
            coordinator.status(),
            &TrailerStatus::Loading(Subject { id: 2, kind: MediaKind::Movie })
        );

        let response_b = lookup.run(request_b).await;
        assert!(coordinator.apply(response_b));
        assert_eq!(coordinator.video_id(), Some("bbb"));
    }

    #[tokio::test]
    async fn test_stale_response_for_same_subject_discarded() {
        let lookup = lookup(StubFetcher::default().respond("/3/movie/1/videos", trailer_body("k")));
        let mut coordinator = TrailerCoordinator::default();

        let first = coordinator.select(&movie(1)).unwrap();
        coordinator.close();
        let second = coordinator.select(&movie(1)).unwrap();

        assert!(!coordinator.apply(lookup.run(first).await));
        assert!(coordinator.is_loading());
        assert!(coordinator.apply(lookup.run(second).await));
    }

    #[tokio::test]
    async fn test_response_after_close_is_dropped() {
        let lookup = lookup(StubFetcher::default().respond("/3/movie/1/videos", trailer_body("k")));
        let mut coordinator = TrailerCoordinator::default();

        let request = coordinator.select(&movie(1)).unwrap();
        coordinator.close();

        assert!(!coordinator.apply(lookup.run(request).await));
        assert_eq!(coordinator.status(), &TrailerStatus::Idle);
    }

    #[tokio::test]
    async fn test_not_found_and_failed_show_notice() {
        let fetcher = StubFetcher::default()
            .respond(
                "/3/movie/1/videos",
                json!({"results": [{"key": "c", "site": "YouTube", "type": "Clip"}]}),
            )
            .respond("/3/movie/3/videos", json!({"results": []}))
            .fail("/3/movie/2/videos", "connection reset");
        let lookup = lookup(fetcher);
        let mut coordinator = TrailerCoordinator::default();

        let request = coordinator.select(&movie(1)).unwrap();
        coordinator.apply(lookup.run(request).await);
        assert!(matches!(coordinator.status(), TrailerStatus::NotFound(_)));
        assert!(coordinator.show_unavailable_notice());
        assert_eq!(coordinator.video_id(), None);
        coordinator.close();

        let request = coordinator.select(&movie(3)).unwrap();
        coordinator.apply(lookup.run(request).await);
        assert!(matches!(coordinator.status(), TrailerStatus::NotFound(_)));
        coordinator.close();

        let request = coordinator.select(&movie(2)).unwrap();
        coordinator.apply(lookup.run(request).await);
        assert!(matches!(coordinator.status(), TrailerStatus::Failed { .. }));
        assert!(coordinator.show_unavailable_notice());
    }

    #[tokio::test]
    async fn test_tv_items_query_tv_endpoint() {
        let lookup = lookup(StubFetcher::default().respond("/3/tv/1399/videos", trailer_body("got")));
        let mut coordinator = TrailerCoordinator::default();
        let mut show = MediaItem::new(1399, MediaKind::Movie);
        show.media_type = None;
        show.first_air_date = Some("2011-04-17".to_string());

        let request = coordinator.select(&show).unwrap();
        assert_eq!(request.subject().kind, MediaKind::Tv);
        assert!(coordinator.apply(lookup.run(request).await));
        assert_eq!(coordinator.video_id(), Some("got"));
    }

    #[tokio::test]
    async fn test_teardown_drops_pending_response() {
        let lookup = lookup(StubFetcher::default().respond("/3/movie/1/videos", trailer_body("k")));
        let mut coordinator = TrailerCoordinator::default();

        let request = coordinator.select(&movie(1)).unwrap();
        coordinator.teardown();
        assert!(!request.is_live());

        assert!(!coordinator.apply(lookup.run(request).await));
        assert!(coordinator.select(&movie(1)).is_none());
        assert_eq!(coordinator.status(), &TrailerStatus::Idle);
    }

    #[tokio::test]
    async fn test_response_from_other_coordinator_rejected() {
        let lookup = lookup(StubFetcher::default().respond("/3/movie/1/videos", trailer_body("k")));
        let mut first = TrailerCoordinator::default();
        let mut second = TrailerCoordinator::default();

        let request = first.select(&movie(1)).unwrap();
        let _ = second.select(&movie(1)).unwrap();

        assert!(!second.apply(lookup.run(request).await));
        assert!(second.is_loading());
    }

    #[tokio::test]
    async fn test_spawned_lookup_delivers_response() {
        let lookup = lookup(StubFetcher::default().respond("/3/movie/1/videos", trailer_body("xyz")));
        let mut coordinator = TrailerCoordinator::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let request = coordinator.select(&movie(1)).unwrap();
        TrailerCoordinator::spawn_lookup(lookup, request, tx);

        let response = rx.recv().await.expect("response delivered");
        assert!(coordinator.apply(response));
        assert_eq!(coordinator.video_id(), Some("xyz"));
    }

    /// Holds every request until released
    struct GatedFetcher {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl FetchJson for GatedFetcher {
        async fn fetch_json(&self, _url: &Url) -> Result<serde_json::Value> {
            self.gate.notified().await;
            Ok(trailer_body("late"))
        }
    }

    #[tokio::test]
    async fn test_spawned_lookup_silent_after_teardown() {
        let gate = Arc::new(Notify::new());
        let lookup = lookup(GatedFetcher { gate: Arc::clone(&gate) });
        let mut coordinator = TrailerCoordinator::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let request = coordinator.select(&movie(1)).unwrap();
        let handle = TrailerCoordinator::spawn_lookup(lookup, request, tx);

        coordinator.teardown();
        gate.notify_one();
        handle.await.unwrap();

        assert!(rx.try_recv().is_err());
    }
}
