//! JSON API client.
//!
//! Every call is one round trip: no timeout, retry or cancellation. A non-2xx
//! status fails with [`DashError::Http`] and the response body is discarded.

use crate::core::transport::ReqwestTransport;
use crate::domain::model::{HttpMethod, HttpRequest, HttpResponse};
use crate::domain::ports::Transport;
use crate::utils::error::{DashError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: Option<Url>,
}

impl ApiClient<ReqwestTransport> {
    pub fn http() -> Self {
        Self::new(ReqwestTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
        }
    }

    /// Relative URLs passed to the request methods resolve against `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resolve(&self, url: &str) -> Result<String> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => Ok(base.join(url)?.into()),
                None => Ok(url.to_string()),
            },
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let request = HttpRequest::new(HttpMethod::Get, self.resolve(url)?);
        self.execute(request).await
    }

    pub async fn post<B, R>(&self, url: &str, data: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = HttpRequest::new(HttpMethod::Post, self.resolve(url)?);
        request
            .headers
            .push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
        request.body = Some(serde_json::to_vec(data)?);
        self.execute(request).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let request = HttpRequest::new(HttpMethod::Delete, self.resolve(url)?);
        self.execute(request).await
    }

    pub async fn get_json(&self, url: &str) -> Result<Value> {
        self.get(url).await
    }

    pub async fn post_json(&self, url: &str, data: &Value) -> Result<Value> {
        self.post(url, data).await
    }

    pub async fn delete_json(&self, url: &str) -> Result<Value> {
        self.delete(url).await
    }

    async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!("{} {}", method, url);

        let response = self.transport.send(request).await?;
        tracing::debug!("{} {} -> {}", method, url, response.status);

        decode(response)
    }
}

fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    if !response.is_success() {
        tracing::warn!("Request rejected with status {}", response.status);
        return Err(DashError::Http {
            status: response.status,
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Answers every request with one canned response and keeps what it was sent.
    #[derive(Clone)]
    struct SpyTransport {
        status: u16,
        body: Vec<u8>,
        sent: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl SpyTransport {
        fn new(status: u16, body: Value) -> Self {
            Self {
                status,
                body: serde_json::to_vec(&body).unwrap(),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn raw(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.as_bytes().to_vec(),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn last(&self) -> HttpRequest {
            self.sent.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for SpyTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.sent.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    #[tokio::test]
    async fn get_returns_parsed_body() {
        let spy = SpyTransport::new(200, json!({"items": []}));
        let api = ApiClient::new(spy.clone());

        let body = api.get_json("/api/items").await.unwrap();

        assert_eq!(body, json!({"items": []}));
        let sent = spy.last();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url, "/api/items");
        assert!(sent.body.is_none());
        assert!(sent.headers.is_empty());
    }

    #[tokio::test]
    async fn post_sends_json_body_and_content_type() {
        let spy = SpyTransport::new(200, json!({"success": true, "project_id": 7}));
        let api = ApiClient::new(spy.clone());
        let payload = json!({"keyword": "bridge", "collect_data": false});

        let body = api.post_json("/api/generate", &payload).await.unwrap();

        assert_eq!(body["project_id"], 7);
        let sent = spy.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.header("Content-Type"), Some(JSON_CONTENT_TYPE));
        let sent_body: Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent_body, payload);
    }

    #[tokio::test]
    async fn delete_returns_parsed_body() {
        let spy = SpyTransport::new(200, json!({"success": true}));
        let api = ApiClient::new(spy.clone());

        let body = api.delete_json("/api/projects/3").await.unwrap();

        assert_eq!(body, json!({"success": true}));
        assert_eq!(spy.last().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn every_method_rejects_error_statuses() {
        for status in [404u16, 500] {
            let api = ApiClient::new(SpyTransport::new(status, json!({"detail": "nope"})));

            let errors = [
                api.get_json("/x").await.unwrap_err(),
                api.post_json("/x", &json!({})).await.unwrap_err(),
                api.delete_json("/x").await.unwrap_err(),
            ];
            for err in errors {
                assert!(matches!(err, DashError::Http { status: s } if s == status));
                assert!(err.to_string().contains(&status.to_string()));
            }
        }
    }

    #[tokio::test]
    async fn success_range_is_2xx() {
        let api = ApiClient::new(SpyTransport::new(201, json!({"created": true})));
        assert_eq!(api.get_json("/x").await.unwrap()["created"], true);

        let api = ApiClient::new(SpyTransport::new(304, json!({})));
        assert!(matches!(
            api.get_json("/x").await,
            Err(DashError::Http { status: 304 })
        ));
    }

    #[tokio::test]
    async fn invalid_json_body_fails() {
        let api = ApiClient::new(SpyTransport::raw(200, "<html>oops</html>"));
        let err = api.get_json("/x").await.unwrap_err();
        assert!(matches!(err, DashError::SerializationError(_)));
    }

    #[tokio::test]
    async fn typed_responses() {
        #[derive(Deserialize)]
        struct Items {
            items: Vec<u32>,
        }

        let api = ApiClient::new(SpyTransport::new(200, json!({"items": [1, 2, 3]})));
        let items: Items = api.get("/api/items").await.unwrap();
        assert_eq!(items.items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn relative_urls_resolve_against_base() {
        let spy = SpyTransport::new(200, json!({}));
        let api = ApiClient::new(spy.clone())
            .with_base_url("http://localhost:8000/")
            .unwrap();

        api.get_json("/api/stats").await.unwrap();
        assert_eq!(spy.last().url, "http://localhost:8000/api/stats");

        api.get_json("https://other.example/health").await.unwrap();
        assert_eq!(spy.last().url, "https://other.example/health");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let spy = SpyTransport::new(200, json!({}));
        assert!(matches!(
            ApiClient::new(spy).with_base_url("not a url"),
            Err(DashError::UrlError(_))
        ));
    }
}
