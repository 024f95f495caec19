use std::env;

use anyhow::Context;

use crate::auth::AuthClientOptions;
use crate::firestore::client::FirestoreClientOptions;

/// Which Firebase project to seed and how to reach it, read from the
/// environment.
///
/// | Variable | |
/// |---|---|
/// | `FIREBASE_PROJECT_ID` | required |
/// | `FIREBASE_API_KEY` | required, the project's web API key |
/// | `FIRESTORE_DATABASE_ID` | optional, defaults to `(default)` |
/// | `FIRESTORE_EMULATOR_HOST` | optional `host:port` of a Firestore emulator |
/// | `FIREBASE_AUTH_EMULATOR_HOST` | optional `host:port` of an Auth emulator |
#[derive(Clone)]
pub struct SeederConfig {
    pub project_id: String,
    pub api_key: String,
    pub database_id: Option<String>,
    pub firestore_emulator_host: Option<String>,
    pub auth_emulator_host: Option<String>,
}

impl SeederConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but with a custom variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            project_id: var("FIREBASE_PROJECT_ID").context("Missing FIREBASE_PROJECT_ID")?,
            api_key: var("FIREBASE_API_KEY").context("Missing FIREBASE_API_KEY")?,
            database_id: var("FIRESTORE_DATABASE_ID"),
            firestore_emulator_host: var("FIRESTORE_EMULATOR_HOST"),
            auth_emulator_host: var("FIREBASE_AUTH_EMULATOR_HOST"),
        })
    }

    pub fn firestore_options(&self) -> FirestoreClientOptions {
        let mut options = FirestoreClientOptions::default();
        if let Some(host) = &self.firestore_emulator_host {
            options = options.emulator_host(host);
        }
        if let Some(database_id) = &self.database_id {
            options = options.database_id(database_id);
        }
        options
    }

    pub fn auth_options(&self) -> AuthClientOptions {
        match &self.auth_emulator_host {
            Some(host) => AuthClientOptions::default().emulator_host(host),
            None => AuthClientOptions::default(),
        }
    }
}

// The API key is a credential, so keep it out of logs.
impl std::fmt::Debug for SeederConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeederConfig")
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("firestore_emulator_host", &self.firestore_emulator_host)
            .field("auth_emulator_host", &self.auth_emulator_host)
            .finish_non_exhaustive()
    }
}
