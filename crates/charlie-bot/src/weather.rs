//! Weather lookup against an OpenWeatherMap-compatible endpoint.
//!
//! `GET <base_url>/data/2.5/weather?q=<location>&APPID=<key>&units=<units>`
//!
//! The lookup never fails from the caller's point of view: any error is
//! rendered as `", error=<diagnostic>"` and returned as ordinary text so the
//! bot still answers. No retries and no request timeout are applied.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use charlie_core::config::WeatherConfig;

use crate::error::WeatherError;

/// Path appended to the configured base URL.
const WEATHER_PATH: &str = "/data/2.5/weather";
/// Upper bound on how much of an error body is echoed back to the user.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Weather lookup as seen by the turn interpreter.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Summary text for `location`, or `", error=<diagnostic>"` on failure.
    async fn lookup(&self, location: &str) -> String;
}

/// The fields the bot reports, kept as display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub location: String,
    pub description: String,
    pub humidity: String,
    pub temperature: String,
    pub temp_low: String,
    pub temp_high: String,
}

impl WeatherReport {
    /// Extract the report from a current-weather JSON body.
    ///
    /// Numbers are rendered the way serde_json prints them (`72`, `71.6`).
    pub fn from_json(json: &Value) -> Result<Self, WeatherError> {
        Ok(Self {
            location: field(json, "/name", "name")?,
            description: field(json, "/weather/0/description", "weather[0].description")?,
            humidity: field(json, "/main/humidity", "main.humidity")?,
            temperature: field(json, "/main/temp", "main.temp")?,
            temp_low: field(json, "/main/temp_min", "main.temp_min")?,
            temp_high: field(json, "/main/temp_max", "main.temp_max")?,
        })
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, temperature {}, low {}, high {}, humidity {}",
            self.location,
            self.description,
            self.temperature,
            self.temp_low,
            self.temp_high,
            self.humidity
        )
    }
}

/// Read a scalar at `pointer` as text. `name` is the dotted path used in errors.
fn field(json: &Value, pointer: &str, name: &'static str) -> Result<String, WeatherError> {
    match json.pointer(pointer) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(WeatherError::MissingField(name)),
    }
}

/// Render a lookup outcome as the text that goes into the chat reply.
pub fn render(result: Result<WeatherReport, WeatherError>) -> String {
    match result {
        Ok(report) => report.to_string(),
        Err(e) => format!(", error={e}"),
    }
}

/// HTTP client for the weather endpoint.
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            units: config.units.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, WEATHER_PATH)
    }

    /// Fetch and decode the current weather for `location`.
    pub async fn fetch(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NoApiKey)?;
        let url = self.endpoint();

        debug!(location = %location, url = %url, "requesting current weather");

        let resp = self
            .client
            .get(&url)
            .query(&[("q", location), ("APPID", api_key), ("units", self.units.as_str())])
            .send()
            .await
            .map_err(http_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(http_error)?;
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                body: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;
        WeatherReport::from_json(&json)
    }
}

/// The request URL carries the API key, so it never goes into an error.
fn http_error(e: reqwest::Error) -> WeatherError {
    WeatherError::Http(e.without_url())
}

#[async_trait]
impl WeatherLookup for WeatherClient {
    async fn lookup(&self, location: &str) -> String {
        let result = self.fetch(location).await;
        if let Err(ref e) = result {
            warn!(location = %location, error = %e, "weather lookup failed");
        }
        render(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "coord": {"lon": -71.06, "lat": 42.36},
            "weather": [
                {"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"},
                {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "main": {"temp": 72, "pressure": 1015, "humidity": 40, "temp_min": 65, "temp_max": 78.5},
            "name": "Boston",
            "cod": 200
        })
    }

    fn config(base_url: &str, api_key: Option<&str>) -> WeatherConfig {
        WeatherConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(String::from),
            units: "Imperial".to_string(),
        }
    }

    #[test]
    fn report_renders_summary_line() {
        let report = WeatherReport::from_json(&sample()).unwrap();
        assert_eq!(report.description, "clear sky");
        assert_eq!(
            report.to_string(),
            "Boston, clear sky, temperature 72, low 65, high 78.5, humidity 40"
        );
    }

    #[test]
    fn missing_field_is_reported_by_path() {
        let mut body = sample();
        body["main"].as_object_mut().unwrap().remove("temp_max");
        let err = WeatherReport::from_json(&body).unwrap_err();
        assert_eq!(err.to_string(), "weather response is missing `main.temp_max`");
    }

    #[test]
    fn empty_condition_list_is_missing_description() {
        let mut body = sample();
        body["weather"] = json!([]);
        let err = WeatherReport::from_json(&body).unwrap_err();
        assert!(matches!(err, WeatherError::MissingField("weather[0].description")));
    }

    #[test]
    fn render_error_is_inline_text() {
        let text = render(Err(WeatherError::Api {
            status: 404,
            body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
        }));
        assert!(text.starts_with(", error=weather API returned 404"));
        assert!(text.contains("city not found"));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = WeatherClient::new(&config("https://samples.openweathermap.org/", Some("k")));
        assert_eq!(
            client.endpoint(),
            "https://samples.openweathermap.org/data/2.5/weather"
        );
    }

    #[tokio::test]
    async fn lookup_without_api_key_answers_inline() {
        let client = WeatherClient::new(&config("http://127.0.0.1:9", None));
        assert_eq!(
            client.lookup("Boston").await,
            ", error=no weather API key configured"
        );
    }

    #[tokio::test]
    async fn lookup_network_failure_answers_inline() {
        // Port 9 (discard) is not expected to accept connections locally.
        let client = WeatherClient::new(&config("http://127.0.0.1:9", Some("SECRET-KEY-123")));
        let text = client.lookup("boston").await;
        assert!(text.starts_with(", error=HTTP error"), "got: {text}");
        assert!(!text.contains("SECRET-KEY-123"), "api key leaked: {text}");
        assert!(!text.contains("APPID"), "request url leaked: {text}");
    }

    /// Stand-in for the weather API: answers Boston, 404s everything else.
    async fn canned_weather(
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, String) {
        let param = |k: &str| params.get(k).map(String::as_str);
        if param("APPID") != Some("test-key") {
            return (
                StatusCode::UNAUTHORIZED,
                r#"{"cod":401,"message":"Invalid API key"}"#.to_string(),
            );
        }
        if param("units") != Some("Imperial") {
            return (StatusCode::BAD_REQUEST, "bad units".to_string());
        }
        match param("q") {
            Some("Boston") => (StatusCode::OK, sample().to_string()),
            Some("garbled") => (StatusCode::OK, "<html>oops</html>".to_string()),
            _ => (
                StatusCode::NOT_FOUND,
                r#"{"cod":"404","message":"city not found"}"#.to_string(),
            ),
        }
    }

    async fn serve_canned() -> String {
        let app = Router::new().route(WEATHER_PATH, get(canned_weather));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_decodes_successful_response() {
        let base = serve_canned().await;
        let client = WeatherClient::new(&config(&base, Some("test-key")));
        let report = client.fetch("Boston").await.unwrap();
        assert_eq!(report.location, "Boston");
        assert_eq!(report.temp_high, "78.5");
        assert_eq!(
            client.lookup("Boston").await,
            "Boston, clear sky, temperature 72, low 65, high 78.5, humidity 40"
        );
    }

    #[tokio::test]
    async fn not_found_answers_with_status_and_body() {
        let base = serve_canned().await;
        let client = WeatherClient::new(&config(&base, Some("test-key")));
        assert!(matches!(
            client.fetch("Atlantis").await,
            Err(WeatherError::Api { status: 404, .. })
        ));
        assert_eq!(
            client.lookup("Atlantis").await,
            r#", error=weather API returned 404: {"cod":"404","message":"city not found"}"#
        );
    }

    #[tokio::test]
    async fn rejected_key_is_not_echoed() {
        let base = serve_canned().await;
        let client = WeatherClient::new(&config(&base, Some("wrong-key")));
        let text = client.lookup("Boston").await;
        assert!(text.starts_with(", error=weather API returned 401"), "got: {text}");
        assert!(!text.contains("wrong-key"));
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let base = serve_canned().await;
        let client = WeatherClient::new(&config(&base, Some("test-key")));
        assert!(matches!(
            client.fetch("garbled").await,
            Err(WeatherError::Parse(_))
        ));
        assert!(client
            .lookup("garbled")
            .await
            .starts_with(", error=invalid weather response"));
    }
}
