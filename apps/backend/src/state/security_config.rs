use jsonwebtoken::Algorithm;

/// Access tokens live for one hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

/// JWT signing settings.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub token_ttl_secs: i64,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_token_ttl(mut self, secs: i64) -> Self {
        self.token_ttl_secs = secs;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
