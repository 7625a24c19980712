//! Profile resolution scoped to one report pass.
//!
//! Each distinct author is looked up once per pass; the map is dropped with
//! the pass, so nothing is shared between requests.

use crate::domain::report::fallback_name;
use crate::domain::Profile;
use crate::ports::ProfilePort;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

pub struct ProfileCache {
    port: Arc<dyn ProfilePort>,
    profiles: HashMap<String, Profile>,
    warn_missing: bool,
}

impl ProfileCache {
    pub fn new(port: Arc<dyn ProfilePort>) -> Self {
        Self {
            port,
            profiles: HashMap::new(),
            warn_missing: false,
        }
    }

    /// Profile for `user_id`, fetched on first use. Failed lookups are cached
    /// as an empty profile so the author falls back to `<@id>`.
    pub async fn resolve(&mut self, user_id: &str) -> Profile {
        if let Some(p) = self.profiles.get(user_id) {
            return p.clone();
        }
        let profile = match self.port.fetch_profile(user_id).await {
            Ok(p) => p,
            Err(e) => {
                if e.is_missing_permission() {
                    self.warn_missing = true;
                }
                warn!(user_id, error = %e, "profile lookup failed, using fallback");
                Profile::default()
            }
        };
        self.profiles.insert(user_id.to_string(), profile.clone());
        profile
    }

    /// Resolved display name, or `<@id>`.
    pub async fn display_name(&mut self, user_id: &str) -> String {
        self.resolve(user_id)
            .await
            .display_name
            .unwrap_or_else(|| fallback_name(user_id))
    }

    /// True once any lookup failed for lack of permission.
    pub fn warn_missing(&self) -> bool {
        self.warn_missing
    }

    pub fn profiles(&self) -> &HashMap<String, Profile> {
        &self.profiles
    }
}
