use crate::models::{DeleteNoteResponse, NewNote, Note, NotesPage};
use serde::{Deserialize, Serialize};

/// Page size requested from the list endpoint.
pub(crate) const PER_PAGE: u32 = 12;

const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    pub(crate) fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Startup configuration problems. These are fatal: the app refuses to build
/// a gateway client rather than send unauthenticated requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("NOTEHUB_TOKEN is not defined")]
    MissingToken,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Reads `window.ENV`, injected by `index.html` at deploy time.
    pub fn new() -> Self {
        let mut cfg = Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            log_level: None,
        };

        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return cfg;
        };
        if env.is_undefined() || !env.is_object() {
            return cfg;
        }

        // README style keys first, then the lowercase spelling.
        let read = |keys: &[&str]| -> Option<String> {
            keys.iter().find_map(|k| {
                js_sys::Reflect::get(&env, &(*k).into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
        };

        if let Some(url) = read(&["API_URL", "api_url"]) {
            cfg.api_url = url;
        }
        cfg.token = read(&["NOTEHUB_TOKEN", "token"]);
        cfg.log_level = read(&["LOG_LEVEL", "log_level"]);
        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP gateway for the notes endpoints.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &EnvConfig) -> Result<Self, ConfigError> {
        let token = cfg
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        Ok(Self::new(cfg.api_url.clone(), token.to_string()))
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Path and query for one list page. An empty search is omitted so the
    /// backend returns the unfiltered list.
    pub(crate) fn notes_path(page: u32, per_page: u32, search: &str) -> String {
        let mut path = format!("/notes?page={page}&perPage={per_page}");
        if !search.is_empty() {
            path.push_str("&search=");
            path.push_str(&urlencoding::encode(search));
        }
        path
    }

    async fn request_api<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .http
            .request(method, url)
            .header("Authorization", self.auth_header());

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn fetch_notes(&self, page: u32, per_page: u32, search: &str) -> ApiResult<NotesPage> {
        self.request_api(
            reqwest::Method::GET,
            &Self::notes_path(page, per_page, search),
            None::<&()>,
        )
        .await
    }

    pub async fn create_note(&self, note: &NewNote) -> ApiResult<Note> {
        self.request_api(reqwest::Method::POST, "/notes", Some(note))
            .await
    }

    pub async fn delete_note(&self, id: &str) -> ApiResult<Note> {
        let path = format!("/notes/{}", urlencoding::encode(id));
        let res: DeleteNoteResponse = self
            .request_api(reqwest::Method::DELETE, &path, None::<&()>)
            .await?;
        Ok(res.note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(token: Option<&str>) -> EnvConfig {
        EnvConfig {
            api_url: "http://localhost:3000/api/".to_string(),
            token: token.map(str::to_string),
            log_level: None,
        }
    }

    #[test]
    fn test_from_config_without_token_is_fatal() {
        let err = ApiClient::from_config(&cfg(None)).expect_err("missing token must fail");
        assert_eq!(err, ConfigError::MissingToken);
        assert_eq!(err.to_string(), "NOTEHUB_TOKEN is not defined");
    }

    #[test]
    fn test_from_config_blank_token_is_fatal() {
        assert!(ApiClient::from_config(&cfg(Some("   "))).is_err());
    }

    #[test]
    fn test_from_config_with_token() {
        let client = ApiClient::from_config(&cfg(Some("secret"))).expect("should build");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.auth_header(), "Bearer secret");
    }

    #[test]
    fn test_notes_path_without_search_omits_param() {
        assert_eq!(ApiClient::notes_path(1, 12, ""), "/notes?page=1&perPage=12");
    }

    #[test]
    fn test_notes_path_encodes_search() {
        assert_eq!(
            ApiClient::notes_path(2, 12, "team sync & co"),
            "/notes?page=2&perPage=12&search=team%20sync%20%26%20co"
        );
    }

    #[test]
    fn test_notes_path_keeps_search_case() {
        assert_eq!(
            ApiClient::notes_path(1, PER_PAGE, "Meeting"),
            "/notes?page=1&perPage=12&search=Meeting"
        );
    }

    #[test]
    fn test_api_error_display_uses_message() {
        let e = ApiError::http(reqwest::StatusCode::BAD_REQUEST, "bad tag".to_string(), "Request failed");
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.to_string(), "Request failed (400 Bad Request): bad tag");
    }
}
