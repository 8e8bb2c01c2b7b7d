use crate::config::TrailerConfig;
use crate::fetch::TmdbApi;
use crate::media::Video;

use super::coordinator::{TrailerRequest, TrailerResponse};

/// Result of one trailer lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Playable video key
    Found(String),
    /// Well-formed response with no qualifying candidate
    NotFound,
    /// Transport or decode failure
    Failed(String),
}

/// Which candidates count as a trailer
#[derive(Debug, Clone)]
pub struct TrailerFilter {
    site: String,
    types: Vec<String>,
}

impl Default for TrailerFilter {
    fn default() -> Self {
        Self::from(&TrailerConfig::default())
    }
}

impl From<&TrailerConfig> for TrailerFilter {
    fn from(config: &TrailerConfig) -> Self {
        Self {
            site: config.video_site.clone(),
            types: config.video_types.clone(),
        }
    }
}

impl TrailerFilter {
    pub fn accepts(&self, video: &Video) -> bool {
        video.site == self.site && self.types.iter().any(|t| *t == video.video_type)
    }

    /// First accepted candidate in provider order
    pub fn pick<'a>(&self, candidates: &'a [Video]) -> Option<&'a Video> {
        candidates.iter().find(|video| self.accepts(video))
    }
}

/// Runs trailer lookups against the video-search endpoint
#[derive(Clone)]
pub struct TrailerLookup {
    api: TmdbApi,
    filter: TrailerFilter,
}

impl TrailerLookup {
    pub fn new(api: TmdbApi, filter: TrailerFilter) -> Self {
        Self { api, filter }
    }

    /// Perform the lookup for `request`; never fails, errors become outcomes
    pub async fn run(&self, request: TrailerRequest) -> TrailerResponse {
        let subject = request.subject();
        let outcome = match self.api.videos(subject.kind, subject.id).await {
            Ok(candidates) => match self.filter.pick(&candidates) {
                Some(video) => LookupOutcome::Found(video.key.clone()),
                None => {
                    tracing::debug!(
                        id = subject.id,
                        kind = %subject.kind,
                        candidates = candidates.len(),
                        "No trailer among candidates"
                    );
                    LookupOutcome::NotFound
                }
            },
            Err(e) => {
                tracing::warn!(id = subject.id, kind = %subject.kind, error = %e, "Trailer lookup failed");
                LookupOutcome::Failed(e.to_string())
            }
        };

        request.into_response(outcome)
    }
}
