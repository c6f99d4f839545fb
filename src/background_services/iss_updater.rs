//! Keeps the ISS marker following the station

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{Instrument, info, info_span};

use crate::{canvas::Canvas, map::IssTracker};

/// Moves the ISS once every `period`, starting one period from now.
///
/// Only returns when an update fails.
pub async fn track_iss<C: Canvas>(
    tracker: &mut IssTracker<'_, C>,
    period: Duration,
) -> anyhow::Result<()> {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("updating the ISS every {:?}", period);

    loop {
        ticker
            .tick()
            .instrument(info_span!("Waiting for next update"))
            .await;

        tracker.update().await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::ShapeId,
        map::tests::{RecordingCanvas, position},
        model::Coordinate,
        open_notify::OpenNotifyClient,
    };
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn updates_once_per_period_until_failure() {
        let period = Duration::from_millis(20);
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iss-now.json"))
            .respond_with(position("1", "1"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/iss-now.json"))
            .respond_with(position("2", "2"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/iss-now.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = OpenNotifyClient::new(&server.uri());
        let mut tracker = IssTracker::create(&client, RecordingCanvas::default(), ShapeId(0))
            .await
            .unwrap();

        let started = std::time::Instant::now();
        let result = track_iss(&mut tracker, period).await;

        assert!(result.is_err());
        // two good updates and the failing one, each after its own tick
        assert!(started.elapsed() >= period * 3);
        assert_eq!(tracker.canvas().frames, 3);
        assert_eq!(tracker.location(), Coordinate::new(2.0, 2.0));
        assert_eq!(server.received_requests().await.unwrap().len(), 4);
    }
}
