//! HTTP plumbing: one generic call plus thin per-resource wrappers.

use std::marker::PhantomData;

use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    config::{ApiConfig, Settings},
    error::{Error, Result},
    traits::Resource,
    types::{author::Author, book::Book},
};

/// Status, location and raw body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: Method,
    pub url:    String,
    pub status: StatusCode,
    pub body:   String,
}

impl ApiResponse {
    /// Decodes the body, naming the JSON path of the first offending value on failure.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let de = &mut serde_json::Deserializer::from_str(&self.body);
        serde_path_to_error::deserialize(de).map_err(|e| Error::Decode {
            path:   e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RequestClient {
    http: reqwest::Client,
    api:  ApiConfig,
}

impl RequestClient {
    pub fn new(api: ApiConfig) -> Result<Self> {
        if api.base_url.trim().is_empty() {
            return Err(Error::missing_config(crate::config::BASE_URL_KEY));
        }
        let invalid = |reason: String| Error::InvalidBaseUrl {
            url: api.base_url.clone(),
            reason,
        };
        match Url::parse(&api.base_url) {
            Ok(url) if url.cannot_be_a_base() => return Err(invalid("not a base url".into())),
            Ok(_) => {}
            Err(e) => return Err(invalid(e.to_string())),
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.api()?)
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// `{base}/{endpoint}`; the endpoint is used verbatim.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let url = self.url(endpoint);
        let mut request = match method {
            Method::POST => self.http.post(&url),
            Method::PUT => self.http.put(&url),
            Method::DELETE => self.http.delete(&url),
            _ => self.http.get(&url),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "sending request");
        let transport = |source| Error::Transport {
            url: url.clone(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        debug!(%method, %url, %status, bytes = body.len(), "received response");

        Ok(ApiResponse {
            method,
            url,
            status,
            body,
        })
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse> {
        self.execute::<()>(endpoint, Method::GET, None).await
    }

    pub fn resource<R: Resource>(&self) -> ResourceRequests<R> {
        ResourceRequests::new(self.clone(), R::endpoint(&self.api))
    }

    pub fn authors(&self) -> Authors {
        self.resource()
    }

    pub fn books(&self) -> Books {
        self.resource()
    }
}

/// Requests against a single resource path. Ids are put into the path unescaped.
#[derive(Debug, Clone)]
pub struct ResourceRequests<R> {
    client:    RequestClient,
    endpoint:  String,
    _resource: PhantomData<R>,
}

pub type Authors = ResourceRequests<Author>;
pub type Books = ResourceRequests<Book>;

impl<R: Resource> ResourceRequests<R> {
    pub fn new(client: RequestClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            _resource: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    pub async fn list(&self) -> Result<ApiResponse> {
        self.client.get(&self.endpoint).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ApiResponse> {
        self.client.get(&self.item(id)).await
    }

    pub async fn create(&self, record: &R) -> Result<ApiResponse> {
        self.client
            .execute(&self.endpoint, Method::POST, Some(record))
            .await
    }

    /// Same call as [`Self::create`], for payloads the API should reject.
    pub async fn create_invalid(&self, record: &R) -> Result<ApiResponse> {
        self.create(record).await
    }

    pub async fn update_by_id(&self, id: &str, record: &R) -> Result<ApiResponse> {
        self.client
            .execute(&self.item(id), Method::PUT, Some(record))
            .await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<ApiResponse> {
        self.client
            .execute::<()>(&self.item(id), Method::DELETE, None)
            .await
    }
}
