//! SPARQL SELECT over HTTP (SPARQL 1.1 Protocol, JSON results).

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::config::XrefConfig;
use crate::error::XrefError;

/// One result row: variable name → lexical value.
pub type Binding = HashMap<String, String>;

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Anything that can answer a SPARQL SELECT query.
pub trait SparqlEndpoint {
    fn select(&self, query: &str) -> Result<Vec<Binding>, XrefError>;
}

impl<E: SparqlEndpoint + ?Sized> SparqlEndpoint for &E {
    fn select(&self, query: &str) -> Result<Vec<Binding>, XrefError> {
        (**self).select(query)
    }
}

#[derive(Debug, Deserialize)]
struct SparqlResultsV1 {
    results: SparqlBindingsV1,
}

#[derive(Debug, Deserialize)]
struct SparqlBindingsV1 {
    bindings: Vec<HashMap<String, SparqlTermV1>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTermV1 {
    value: String,
}

pub fn parse_results(body: &str) -> Result<Vec<Binding>, XrefError> {
    let results: SparqlResultsV1 = serde_json::from_str(body)
        .map_err(|e| XrefError::Unavailable(format!("invalid SPARQL results JSON: {e}")))?;
    Ok(results
        .results
        .bindings
        .into_iter()
        .map(|row| row.into_iter().map(|(var, term)| (var, term.value)).collect())
        .collect())
}

/// Blocking HTTP client for a public SPARQL endpoint (GET + `format=json`).
pub struct HttpSparqlEndpoint {
    client: Client,
    endpoint: Url,
}

impl HttpSparqlEndpoint {
    pub fn new(config: &XrefConfig) -> Result<Self, XrefError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            XrefError::InvalidConfig(format!("invalid endpoint `{}`: {e}", config.endpoint))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(SPARQL_RESULTS_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                XrefError::InvalidConfig(format!("invalid user agent `{}`: {e}", config.user_agent))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| XrefError::InvalidConfig(format!("failed to build http client: {e}")))?;

        Ok(Self { client, endpoint })
    }
}

impl SparqlEndpoint for HttpSparqlEndpoint {
    fn select(&self, query: &str) -> Result<Vec<Binding>, XrefError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("format", "json");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| XrefError::Unavailable(format!("failed to reach {}: {e}", self.endpoint)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(XrefError::Unavailable(format!("http error {status}: {text}")));
        }

        let body = resp
            .text()
            .map_err(|e| XrefError::Unavailable(format!("failed to read response: {e}")))?;
        parse_results(&body)
    }
}

/// Quote `s` as a SPARQL string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    #[test]
    fn parses_select_results() {
        let body = r#"{
            "head": {"vars": ["item"]},
            "results": {"bindings": [
                {"item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q3088150"}}
            ]}
        }"#;
        let rows = parse_results(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["item"], "http://www.wikidata.org/entity/Q3088150");
    }

    #[test]
    fn empty_results() {
        let rows = parse_results(r#"{"head":{"vars":[]},"results":{"bindings":[]}}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn garbage_is_unavailable() {
        assert!(matches!(
            parse_results("<html>rate limited</html>"),
            Err(XrefError::Unavailable(_))
        ));
    }

    #[test]
    fn escapes_literals() {
        assert_eq!(string_literal("110\"0"), r#""110\"0""#);
        assert_eq!(string_literal(r"a\b"), r#""a\\b""#);
    }

    /// Serves one canned HTTP response on 127.0.0.1 and hands back the raw request.
    fn serve_once(status: &str, body: &str) -> (XrefConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {SPARQL_RESULTS_JSON}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8(request).unwrap()
        });
        let config = XrefConfig {
            endpoint: format!("http://127.0.0.1:{port}/sparql"),
            timeout_secs: 5,
            ..Default::default()
        };
        (config, handle)
    }

    #[test]
    fn http_select_sends_get_and_decodes_bindings() {
        let (config, server) = serve_once(
            "200 OK",
            r#"{"head":{"vars":["item"]},"results":{"bindings":[{"item":{"type":"uri","value":"http://www.wikidata.org/entity/Q1"}}]}}"#,
        );
        let endpoint = HttpSparqlEndpoint::new(&config).unwrap();
        let rows = endpoint
            .select("SELECT ?item WHERE { ?item wdt:P1616 \"110000000\" . }")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["item"], "http://www.wikidata.org/entity/Q1");

        let request = server.join().unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /sparql?query=SELECT+%3Fitem+"), "{request_line}");
        assert!(request_line.ends_with("&format=json HTTP/1.1"), "{request_line}");
        let headers = request.to_ascii_lowercase();
        assert!(headers.contains("accept: application/sparql-results+json"), "{request}");
        assert!(
            headers.contains(&format!("user-agent: {}", config.user_agent.to_ascii_lowercase())),
            "{request}"
        );
    }

    #[test]
    fn http_error_status_is_unavailable() {
        let (config, server) = serve_once("503 Service Unavailable", "busy");
        let endpoint = HttpSparqlEndpoint::new(&config).unwrap();
        let err = endpoint.select("SELECT ?item WHERE { }").unwrap_err();
        server.join().unwrap();
        match err {
            XrefError::Unavailable(msg) => {
                assert!(msg.contains("503"), "{msg}");
                assert!(msg.contains("busy"), "{msg}");
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn http_non_json_body_is_unavailable() {
        let (config, server) = serve_once("200 OK", "<html>rate limited</html>");
        let endpoint = HttpSparqlEndpoint::new(&config).unwrap();
        let result = endpoint.select("SELECT ?item WHERE { }");
        server.join().unwrap();
        assert!(matches!(result, Err(XrefError::Unavailable(_))));
    }

    #[test]
    fn rejects_bad_endpoint() {
        let config = XrefConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpSparqlEndpoint::new(&config),
            Err(XrefError::InvalidConfig(_))
        ));
    }
}
