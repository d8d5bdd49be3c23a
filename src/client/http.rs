use async_trait::async_trait;
use reqwest::{Client, Response};
use thiserror::Error;

use crate::config::{api_url_from_env, DEFAULT_API_URL};
use crate::models::{Appointment, AppointmentPatch, NewAppointment, Prescription};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },
}

/// Everything the view-models need from the portal service.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ClientError>;

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ClientError>;

    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment, ClientError>;

    async fn update_appointment(
        &self,
        id: i64,
        patch: &AppointmentPatch,
    ) -> Result<Appointment, ClientError>;
}

#[derive(Debug, Clone)]
pub struct PortalClient {
    http: Client,
    base_url: String,
}

impl Default for PortalClient {
    fn default() -> Self {
        PortalClient::new(DEFAULT_API_URL)
    }
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        PortalClient {
            http: Client::new(),
            base_url,
        }
    }

    /// Base URL from `PORTAL_API_URL`, falling back to the local service.
    pub fn from_env() -> Self {
        PortalClient::new(api_url_from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        let response = self.http.get(self.url("/api/appointments")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ClientError> {
        let response = self.http.get(self.url("/api/prescriptions")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment, ClientError> {
        let response = self
            .http
            .post(self.url("/api/appointments"))
            .json(new)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_appointment(
        &self,
        id: i64,
        patch: &AppointmentPatch,
    ) -> Result<Appointment, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/appointments/{}", id)))
            .json(patch)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
