use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::model::{BuildingCatalog, PathResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4567";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one GET against the pathfinding service.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Ok(T),
    /// The server answered with a non-success status.
    HttpError(u16),
    /// The server could not be reached or the transfer broke off.
    NetworkError(String),
    /// A 200 response whose body is not the expected JSON shape.
    DecodeError(String),
}

impl<T> FetchResult<T> {
    pub fn into_result(self) -> Result<T, FetchError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::HttpError(status) => Err(FetchError::Http(status)),
            Self::NetworkError(msg) => Err(FetchError::Network(msg)),
            Self::DecodeError(msg) => Err(FetchError::Decode(msg)),
        }
    }
}

/// The failure half of [`FetchResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Http(u16),
    Network(String),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "server answered with status {status}, expected 200"),
            Self::Network(msg) => write!(f, "there was an error contacting the server ({msg})"),
            Self::Decode(msg) => write!(f, "the server sent an unexpected response ({msg})"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Blocking client for the two service endpoints.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    agent: ureq::Agent,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /listBuilding`
    pub fn list_buildings(&self) -> FetchResult<BuildingCatalog> {
        self.get_json("listBuilding", &[])
    }

    /// `GET /findPath?start=..&end=..`
    pub fn find_path(&self, start: &str, end: &str) -> FetchResult<PathResult> {
        self.get_json("findPath", &[("start", start), ("end", end)])
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> FetchResult<T> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!("GET {url} {query:?}");

        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let mut response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(status)) => return FetchResult::HttpError(status),
            Err(e) => return FetchResult::NetworkError(e.to_string()),
        };

        let status = response.status().as_u16();
        if status != 200 {
            return FetchResult::HttpError(status);
        }

        let body = match response.body_mut().read_to_string() {
            Ok(body) => body,
            Err(e) => return FetchResult::NetworkError(e.to_string()),
        };

        match serde_json::from_str(&body) {
            Ok(value) => FetchResult::Ok(value),
            Err(e) => FetchResult::DecodeError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Serve one canned response and report the request line.
    fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            tx.send(request_line.trim_end().to_string()).unwrap();
        });
        (format!("http://{addr}"), rx)
    }

    #[test]
    fn find_path_sends_query_and_decodes() {
        let body = r#"{"start":{"x":1.0,"y":2.0},"path":[{"start":{"x":1.0,"y":2.0},"end":{"x":4.0,"y":6.0},"cost":5.0}]}"#;
        let (base, requests) = serve_once("200 OK", body);
        let result = Client::new(&base).find_path("CSE", "KNE");
        let FetchResult::Ok(path) = result else {
            panic!("expected a path, got {result:?}");
        };
        assert_eq!(path.total_cost(), 5.0);
        assert_eq!(requests.recv().unwrap(), "GET /findPath?start=CSE&end=KNE HTTP/1.1");
    }

    #[test]
    fn list_buildings_decodes_catalog() {
        let (base, _requests) = serve_once("200 OK", r#"{"BAG":"Bagley Hall","CSE":"Allen Center"}"#);
        let result = Client::new(&format!("{base}/")).list_buildings();
        let FetchResult::Ok(catalog) = result else {
            panic!("expected a catalog, got {result:?}");
        };
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn non_success_status_is_http_error() {
        let (base, _requests) = serve_once("404 Not Found", "");
        assert_eq!(Client::new(&base).find_path("X", "Y"), FetchResult::HttpError(404));
    }

    #[test]
    fn bad_request_is_http_error() {
        let (base, _requests) = serve_once("400 Bad Request", "Must provide valid building abbreviation");
        assert_eq!(Client::new(&base).find_path("X", "Y"), FetchResult::HttpError(400));
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let (base, _requests) = serve_once("200 OK", r#"{"nope":true}"#);
        assert!(matches!(
            Client::new(&base).find_path("A", "B"),
            FetchResult::DecodeError(_)
        ));
    }

    #[test]
    fn closed_port_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let result = Client::new(&format!("http://127.0.0.1:{port}")).list_buildings();
        assert!(matches!(result, FetchResult::NetworkError(_)), "{result:?}");
    }

    #[test]
    fn errors_render_for_alerts() {
        assert_eq!(
            FetchResult::<()>::HttpError(404).into_result().unwrap_err().to_string(),
            "server answered with status 404, expected 200"
        );
    }
}
