//! HTTP Backend
//!
//! `MedicationBackend` over the JSON REST API using reqwest's fetch client.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reminder_core::api::{ActionRequest, ActionResponse};
use reminder_core::{HistoryEntry, Medication, MedicationAction, MedicationPatch, NewMedication};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{action_path, MedicationBackend, API_URL};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(API_URL)
    }
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn medication_url(&self, id: &str) -> String {
        self.url(&format!("/medications/{}", encode(id)))
    }
}

fn encode(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

/// Turn a non-2xx response into its `{ "error": ... }` message
async fn check(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {}", status),
    };
    Err(message)
}

async fn json<T: DeserializeOwned>(response: Result<Response, reqwest::Error>) -> Result<T, String> {
    let response = check(response.map_err(|e| e.to_string())?).await?;
    response.json::<T>().await.map_err(|e| e.to_string())
}

async fn empty(response: Result<Response, reqwest::Error>) -> Result<(), String> {
    check(response.map_err(|e| e.to_string())?).await.map(|_| ())
}

#[async_trait(?Send)]
impl MedicationBackend for HttpBackend {
    async fn list_medications(&self) -> Result<Vec<Medication>, String> {
        json(self.client.get(self.url("/medications")).send().await).await
    }

    async fn create_medication(&self, new: &NewMedication) -> Result<Medication, String> {
        json(self.client.post(self.url("/medications")).json(new).send().await).await
    }

    async fn update_medication(&self, id: &str, patch: &MedicationPatch) -> Result<Medication, String> {
        json(self.client.put(self.medication_url(id)).json(patch).send().await).await
    }

    async fn delete_medication(&self, id: &str) -> Result<(), String> {
        empty(self.client.delete(self.medication_url(id)).send().await).await
    }

    async fn record_action(
        &self,
        id: &str,
        action: MedicationAction,
        request: &ActionRequest,
    ) -> Result<ActionResponse, String> {
        let url = format!("{}/{}", self.medication_url(id), action_path(action));
        json(self.client.post(url).json(request).send().await).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, String> {
        json(self.client.get(self.url("/history")).send().await).await
    }

    async fn clear_history(&self) -> Result<(), String> {
        empty(self.client.delete(self.url("/history")).send().await).await
    }
}
