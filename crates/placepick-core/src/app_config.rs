use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// REST key for the Kakao Local API, sent as `Authorization: KakaoAK <key>`.
#[derive(Clone, PartialEq, Eq)]
pub struct KakaoCredentials {
    pub rest_api_key: String,
}

/// Client id/secret pair for the Naver Search API.
#[derive(Clone, PartialEq, Eq)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for KakaoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoCredentials")
            .field("rest_api_key", &"[redacted]")
            .finish()
    }
}

impl std::fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Process-wide settings, read once at start-up.
///
/// Provider credentials are optional here: a missing pair does not stop the
/// server, it makes every route that depends on that provider answer with a
/// configuration error instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub upstream_timeout_secs: u64,
    pub user_agent: String,
    pub kakao: Option<KakaoCredentials>,
    pub naver: Option<NaverCredentials>,
    pub kakao_base_url: Option<String>,
    pub naver_base_url: Option<String>,
}
