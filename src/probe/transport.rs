//! HTTP transport abstraction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use url::Url;

use super::error::{NetError, NetResult};

/// Minimal HTTP surface the prober, the manifest loader and the curriculum
/// generator need.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a cache-bypassing HEAD request and return the response status.
    async fn head(&self, url: &Url) -> NetResult<u16>;

    /// Fetch a URL as text. Non-2xx responses are errors.
    async fn get_text(&self, url: &Url) -> NetResult<String>;

    /// POST a JSON body and return the response text. Non-2xx responses are errors.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> NetResult<String>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Build a client. `timeout` bounds every request; `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> NetResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(NetError::from)?;
        Ok(Self { inner })
    }

    async fn read_success(resp: reqwest::Response, url: &Url) -> NetResult<String> {
        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::http_status(status.as_u16(), url.as_str()));
        }
        resp.text().await.map_err(NetError::from)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn head(&self, url: &Url) -> NetResult<u16> {
        let resp = self
            .inner
            .head(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(NetError::from)?;
        Ok(resp.status().as_u16())
    }

    async fn get_text(&self, url: &Url) -> NetResult<String> {
        let resp = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(NetError::from)?;
        Self::read_success(resp, url).await
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> NetResult<String> {
        let payload = serde_json::to_vec(body).map_err(|e| NetError::Http(e.to_string()))?;
        let resp = self
            .inner
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(NetError::from)?;
        Self::read_success(resp, url).await
    }
}


#[cfg(test)]
mod tests {
    use std::thread;

    use tiny_http::{Method, Response, Server};

    use super::*;

    /// Serve `/present.mp4` with 200 and everything else with 404, for
    /// `requests` requests.
    fn spawn_server(requests: usize) -> (Url, thread::JoinHandle<Vec<(Method, Option<String>)>>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for _ in 0..requests {
                let request = server.recv().unwrap();
                let cache = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Cache-Control"))
                    .map(|h| h.value.as_str().to_string());
                seen.push((request.method().clone(), cache));
                let status = if request.url() == "/present.mp4" { 200 } else { 404 };
                request
                    .respond(Response::empty(status))
                    .unwrap();
            }
            seen
        });
        (Url::parse(&format!("http://{addr}/")).unwrap(), handle)
    }

    #[tokio::test]
    async fn test_head_against_local_server() {
        let (base, handle) = spawn_server(2);
        let transport = HttpTransport::new(Some(Duration::from_secs(5))).unwrap();

        let ok = transport.head(&base.join("present.mp4").unwrap()).await.unwrap();
        let missing = transport.head(&base.join("missing.mp4").unwrap()).await.unwrap();
        assert_eq!(ok, 200);
        assert_eq!(missing, 404);

        let seen = handle.join().unwrap();
        assert!(seen.iter().all(|(method, _)| *method == Method::Head));
        assert!(seen.iter().all(|(_, cache)| cache.as_deref() == Some("no-cache")));
    }

    #[tokio::test]
    async fn test_get_text_rejects_non_success() {
        let (base, handle) = spawn_server(1);
        let transport = HttpTransport::new(None).unwrap();

        let err = transport
            .get_text(&base.join("course.json").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, NetError::HttpStatus { status: 404, .. }));
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_head_connection_refused_is_error() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = HttpTransport::new(Some(Duration::from_secs(2))).unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/x.mp4")).unwrap();
        assert!(transport.head(&url).await.is_err());
    }
}
