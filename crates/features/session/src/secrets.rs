use fxhash::FxHashMap;
use lectern_domain::Tier;
use lectern_domain::config::SessionConfig;

/// Lower-cases and strips every whitespace character.
#[must_use]
pub fn normalize(secret: &str) -> String {
    secret.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
}

/// Normalized secret phrase to tier lookup.
///
/// This is a convenience gate shipped with the client, not an authentication boundary.
#[derive(Debug, Clone, Default)]
pub struct SecretTable {
    entries: FxHashMap<String, Tier>,
}

impl SecretTable {
    /// Builds a table, normalizing every phrase. Later duplicates replace earlier ones.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Tier)>,
        K: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(secret, tier)| (normalize(secret.as_ref()), tier))
            .filter(|(secret, _)| !secret.is_empty())
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.secrets.iter().map(|(secret, tier)| (secret.as_str(), *tier)))
    }

    #[must_use]
    pub fn lookup(&self, secret: &str) -> Option<Tier> {
        self.entries.get(&normalize(secret)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
