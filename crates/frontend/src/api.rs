use quakescope_shared::models::FeatureCollection;
use thiserror::Error;

/// USGS summary feed endpoints, keyed by time range.
const HOUR_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson";
const DAY_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
const WEEK_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Optional request deadline in milliseconds. `None` relies on the
/// browser's transport defaults.
pub const REQUEST_TIMEOUT_MS: Option<u32> = None;

/// Time window selector for the feed. Anything unrecognized collapses to
/// the default day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Range {
    Hour,
    #[default]
    Day,
    Week,
}

impl Range {
    pub const ALL: [Range; 3] = [Range::Hour, Range::Day, Range::Week];

    #[must_use]
    pub fn feed_url(self) -> &'static str {
        match self {
            Range::Hour => HOUR_FEED_URL,
            Range::Day => DAY_FEED_URL,
            Range::Week => WEEK_FEED_URL,
        }
    }

    /// Lowercase name, used in the header title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Range::Hour => "hour",
            Range::Day => "day",
            Range::Week => "week",
        }
    }

    /// Capitalized name for the range buttons.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Range::Hour => "Hour",
            Range::Day => "Day",
            Range::Week => "Week",
        }
    }
}

/// Failure at the fetch boundary. Cancellation is not represented here:
/// a superseded request is dropped before it can produce a result.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-success response status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Network/transport failure.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    /// Body did not decode as the expected feed envelope.
    #[error("malformed feed body: {0}")]
    Decode(reqwest::Error),

    /// Configured deadline elapsed before the response settled.
    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

/// Cancellation handle for in-flight feed requests.
///
/// Every new fetch takes a fresh token and invalidates all earlier ones;
/// a token is never reused across requests. A settled request whose token
/// is no longer current must discard its result without touching state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchEpoch(u64);

impl FetchEpoch {
    /// Invalidate all outstanding tokens and hand out a new one.
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        self.0 == token
    }
}

/// Fetch and decode the feed for `range`.
pub async fn fetch_feed(range: Range) -> Result<FeatureCollection, FetchError> {
    let url = range.feed_url();
    match REQUEST_TIMEOUT_MS {
        None => fetch_inner(url).await,
        Some(ms) => {
            let request = std::pin::pin!(fetch_inner(url));
            let deadline = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(ms));
            match futures::future::select(request, deadline).await {
                futures::future::Either::Left((result, _)) => result,
                futures::future::Either::Right(((), _)) => Err(FetchError::Timeout(ms)),
            }
        }
    }
}

async fn fetch_inner(url: &str) -> Result<FeatureCollection, FetchError> {
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(FetchError::Transport)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    resp.json::<FeatureCollection>()
        .await
        .map_err(FetchError::Decode)
}
