//! Feed-fetching hook: periodic refresh with cancellation of superseded
//! requests.

use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use quakescope_shared::models::FeatureCollection;

use crate::api::{self, FetchEpoch, Range};

/// Background re-fetch cadence.
pub const REFRESH_INTERVAL_MS: u32 = 5 * 60 * 1000;

/// Reactive handle to the earthquake feed for the current range.
///
/// `data`, `loading` and `error` are owned here and read-only for the
/// views. At most one fetch result is ever committed per attempt window:
/// starting a fetch cancels the in-flight one and invalidates its epoch
/// token, so a late result from a superseded attempt is discarded without
/// touching any state.
#[derive(Clone, Copy)]
pub struct EarthquakeFeed {
    pub data: Signal<Option<FeatureCollection>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    range: Signal<Range>,
    epoch: Signal<FetchEpoch>,
    inflight: Signal<Option<Task>>,
}

impl EarthquakeFeed {
    /// Manual refresh. Shares the cancellation discipline of the mount
    /// fetch, range changes and the periodic timer.
    pub fn refetch(&mut self) {
        let range = *self.range.peek();
        self.start(range);
    }

    fn start(&mut self, range: Range) {
        // Supersede any in-flight attempt before issuing a new request.
        if let Some(task) = self.inflight.write().take() {
            task.cancel();
        }
        let token = self.epoch.write().begin();
        self.loading.set(true);

        let mut this = *self;
        let task = spawn(async move {
            let result = api::fetch_feed(range).await;

            // A superseded attempt must not touch any state.
            if !this.epoch.peek().is_current(token) {
                return;
            }

            match result {
                Ok(feed) => {
                    log::info!("loaded {} events for the {} feed", feed.features.len(), range.label());
                    this.error.set(None);
                    this.data.set(Some(feed));
                }
                Err(err) => {
                    log::error!("feed fetch failed: {err}");
                    this.error.set(Some(err.to_string()));
                    this.data.set(None);
                }
            }
            this.loading.set(false);
            this.inflight.set(None);
        });
        self.inflight.set(Some(task));
    }
}

/// Fetch the USGS feed for `range`: once on mount, again whenever the
/// range changes, and on a fixed interval in between. The interval and
/// any in-flight request die with the component scope.
pub fn use_earthquake_feed(range: Signal<Range>) -> EarthquakeFeed {
    let data = use_signal(|| None::<FeatureCollection>);
    let loading = use_signal(|| true);
    let error = use_signal(|| None::<String>);
    let epoch = use_signal(FetchEpoch::default);
    let inflight = use_signal(|| None::<Task>);
    let mut interval = use_signal(|| None::<Task>);

    let feed = EarthquakeFeed {
        data,
        loading,
        error,
        range,
        epoch,
        inflight,
    };

    use_effect(move || {
        let current = *range.read();
        let mut feed = feed;
        feed.start(current);

        // Restart the periodic refresh alongside every range change.
        if let Some(task) = interval.write().take() {
            task.cancel();
        }
        let timer = spawn(async move {
            loop {
                TimeoutFuture::new(REFRESH_INTERVAL_MS).await;
                feed.start(current);
            }
        });
        interval.set(Some(timer));
    });

    feed
}
