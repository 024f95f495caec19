#[derive(Clone, Debug)]
pub struct AuthClientOptions {
    pub api_url: String,
    pub https_only: bool,
}

impl Default for AuthClientOptions {
    fn default() -> Self {
        Self {
            api_url: "https://identitytoolkit.googleapis.com/v1/accounts".to_string(),
            https_only: true,
        }
    }
}

impl AuthClientOptions {
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Points the client at a local Auth emulator (`host:port`). The emulator
    /// only speaks plain HTTP.
    pub fn emulator_host(mut self, host: impl AsRef<str>) -> Self {
        self.api_url = format!(
            "http://{}/identitytoolkit.googleapis.com/v1/accounts",
            host.as_ref()
        );
        self.https_only = false;
        self
    }
}
