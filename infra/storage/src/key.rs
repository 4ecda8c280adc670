use crate::error::StorageError;
use std::fmt;

const MAX_KEY_LEN: usize = 128;

/// A validated storage key.
///
/// Keys double as file names in [`crate::FileStore`], so only ASCII letters, digits, `-`
/// and `_` are accepted. Case is preserved (`userPlan` and `userplan` are different keys).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for StorageKey {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Storage key cannot be empty".into()),
            });
        }

        if value.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some(format!("Storage key longer than {MAX_KEY_LEN} bytes").into()),
            });
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Storage key contains illegal characters".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for StorageKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_persisted_state_keys() {
        assert_eq!(StorageKey::try_from("userPlan").unwrap().as_str(), "userPlan");
        assert_eq!(StorageKey::try_from("course-progress").unwrap().as_str(), "course-progress");
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for bad in ["", "../etc", "a/b", "a\\b", ".hidden", "key.tmp", "with space"] {
            assert!(StorageKey::try_from(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_keys() {
        let long = "k".repeat(MAX_KEY_LEN + 1);
        assert!(StorageKey::try_from(long).is_err());
    }
}
