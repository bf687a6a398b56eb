use std::time::Duration;

use app_logging::{app_debug, app_info};
use serde::de::DeserializeOwned;
use tokio::time::{sleep_until, Instant};
use url::Url;

use crate::types::{GenerateRequest, TriggerRequest};
use crate::{
    ApiError, FailureKind, GenerateResponse, HealthResponse, StatusResponse, TriggerResponse,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Generation runs several remote agents, so this is generous.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
        }
    }
}

/// The remote collaborators the controller talks to.
#[async_trait::async_trait]
pub trait HeadlineApi: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, ApiError>;
    async fn automation_status(&self) -> Result<StatusResponse, ApiError>;
    async fn trigger_automation(&self, topic: Option<&str>) -> Result<TriggerResponse, ApiError>;
    async fn health(&self) -> Result<HealthResponse, ApiError>;
}

/// Runs a generation call and holds a successful response until `floor` has
/// elapsed since the call started. Failures are returned as soon as they
/// happen.
pub async fn generate_with_floor(
    api: &dyn HeadlineApi,
    topic: &str,
    floor: Duration,
) -> Result<GenerateResponse, ApiError> {
    let started = Instant::now();
    let result = api.generate(topic).await;
    if result.is_ok() {
        sleep_until(started + floor).await;
    }
    result
}

#[derive(Debug, Clone)]
pub struct ReqwestHeadlineApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestHeadlineApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl HeadlineApi for ReqwestHeadlineApi {
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, ApiError> {
        let url = self.endpoint("api/generate")?;
        app_info!("POST {} topic_len={}", url, topic.len());
        let response = self
            .client
            .post(url)
            .json(&GenerateRequest { topic })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn automation_status(&self) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint("api/cron/status")?;
        app_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn trigger_automation(&self, topic: Option<&str>) -> Result<TriggerResponse, ApiError> {
        let url = self.endpoint("api/automation/trigger")?;
        app_info!("POST {} topic_override={}", url, topic.is_some());
        let response = self
            .client
            .post(url)
            .json(&TriggerRequest { topic })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.endpoint("api/health")?;
        app_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

/// Non-2xx is a failure even when the body is valid JSON.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    response.json::<T>().await.map_err(map_reqwest_error)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
