//! Responsible for talking to the Open Notify API
use crate::{
    model::{
        Coordinate, CrewMember,
        open_notify_api_model::{AstrosResponse, IssNowResponse, IssPassResponse},
    },
    utils::local_ctime,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{Instrument, info, info_span};

pub const DEFAULT_BASE_URL: &str = "http://api.open-notify.org";

const ASTROS: &str = "/astros.json";
const ISS_NOW: &str = "/iss-now.json";
const ISS_PASS: &str = "/iss-pass.json";

#[derive(Debug, Clone)]
pub struct OpenNotifyClient {
    client: Client,
    /// Without a trailing slash
    base_url: String,
}

impl OpenNotifyClient {
    pub fn new(base_url: &str) -> Self {
        OpenNotifyClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns everyone currently in space, in the order the API lists them.
    #[tracing::instrument(err, skip(self))]
    pub async fn get_astronauts(&self) -> Result<Vec<CrewMember>, OpenNotifyError> {
        let (astros, _): (AstrosResponse, _) = self
            .fetch(ASTROS, self.client.get(self.url(ASTROS)))
            .await?;

        info!("got {} people in space", astros.people.len());

        Ok(astros.people)
    }

    /// Returns the current position of the ISS
    #[tracing::instrument(err, skip(self))]
    pub async fn get_iss_location(&self) -> Result<Coordinate, OpenNotifyError> {
        let (now, body): (IssNowResponse, _) = self
            .fetch(ISS_NOW, self.client.get(self.url(ISS_NOW)))
            .await?;

        let location = Coordinate::from(now.iss_position)
            .validate()
            .map_err(|reason| OpenNotifyError::DataShape {
                endpoint: ISS_NOW,
                reason,
                body,
            })?;

        info!(%location, "got ISS location");

        Ok(location)
    }

    /// Unix timestamp of the next time the ISS rises over `location`.
    ///
    /// The API's first entry is the pass already in progress, so the second one is used.
    #[tracing::instrument(err, skip(self))]
    pub async fn next_rise_time(&self, location: Coordinate) -> Result<i64, OpenNotifyError> {
        let request = self.client.get(self.url(ISS_PASS)).query(&[
            ("lat", location.latitude),
            ("lon", location.longitude),
        ]);

        let (passes, body): (IssPassResponse, _) = self.fetch(ISS_PASS, request).await?;

        let available = passes.response.len();
        let pass = passes
            .response
            .get(1)
            .ok_or(OpenNotifyError::MissingPass { available })?;

        pass.risetime.ok_or_else(|| OpenNotifyError::DataShape {
            endpoint: ISS_PASS,
            reason: "second pass has no risetime".to_string(),
            body,
        })
    }

    /// The next rise time over `location` as local `ctime` text
    pub async fn compute_rise_time(&self, location: Coordinate) -> Result<String, OpenNotifyError> {
        let risetime = self.next_rise_time(location).await?;

        local_ctime(risetime).ok_or_else(|| OpenNotifyError::DataShape {
            endpoint: ISS_PASS,
            reason: format!("risetime {risetime} is not a representable date"),
            body: risetime.to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Decodes the body as `T`, also handing back the body as sent
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<(T, String), OpenNotifyError> {
        let response = request
            .send()
            .instrument(info_span!("Fetching", endpoint))
            .await?
            .error_for_status()?;

        let body = response
            .text()
            .instrument(info_span!("Reading body of response"))
            .await?;

        match serde_json::from_str(&body) {
            Ok(decoded) => Ok((decoded, body)),
            Err(e) => Err(OpenNotifyError::DataShape {
                endpoint,
                reason: e.to_string(),
                body,
            }),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OpenNotifyError {
    #[error("{url} answered with HTTP status {status}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        source: reqwest::Error,
    },

    #[error("error sending the request")]
    Request(#[source] reqwest::Error),

    #[error("unexpected response from {endpoint}: {reason} \n{body}")]
    DataShape {
        endpoint: &'static str,
        reason: String,
        body: String,
    },

    #[error("expected at least 2 passes, got {available}")]
    MissingPass { available: usize },
}

impl From<reqwest::Error> for OpenNotifyError {
    fn from(source: reqwest::Error) -> Self {
        match source.status() {
            Some(status) => OpenNotifyError::HttpStatus {
                status,
                url: source.url().map(|u| u.to_string()).unwrap_or_default(),
                source,
            },
            None => OpenNotifyError::Request(source),
        }
    }
}
