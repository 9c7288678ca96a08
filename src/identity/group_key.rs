use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::CacheError;
use crate::Error;
use crate::Result;

/// Separator between the three identifier components in the composed
/// textual form. Forbidden inside any single component: [`GroupKey::new`]
/// rejects components containing it, so decomposition is never ambiguous.
pub const GROUP_KEY_DELIMITER: char = '+';

/// Identity of one logical configuration target, shared by possibly many
/// client processes.
///
/// The composed textual form `pool_id+item_id+tenant_id` (see
/// [`fmt::Display`]) is what travels over the wire and what the cache uses
/// as its outer key; inside the core the key stays structured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub pool_id: String,
    pub item_id: String,
    pub tenant_id: String,
}

impl GroupKey {
    pub fn new(
        pool_id: impl Into<String>,
        item_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Result<Self> {
        let key = Self {
            pool_id: pool_id.into(),
            item_id: item_id.into(),
            tenant_id: tenant_id.into(),
        };
        for component in [&key.pool_id, &key.item_id, &key.tenant_id] {
            if component.is_empty() {
                return Err(CacheError::MalformedIdentity("empty identity component".to_string()).into());
            }
            if component.contains(GROUP_KEY_DELIMITER) {
                return Err(CacheError::MalformedIdentity(format!(
                    "identity component `{}` contains reserved delimiter `{}`",
                    component, GROUP_KEY_DELIMITER
                ))
                .into());
            }
        }
        Ok(key)
    }

    /// Decompose a composed key. Anything that does not split into exactly
    /// three non-empty components is rejected.
    pub fn parse(composed: &str) -> Result<Self> {
        let mut components = composed.split(GROUP_KEY_DELIMITER);
        match (components.next(), components.next(), components.next(), components.next()) {
            (Some(pool_id), Some(item_id), Some(tenant_id), None) => Self::new(pool_id, item_id, tenant_id),
            _ => Err(CacheError::MalformedIdentity(composed.to_string()).into()),
        }
    }

    /// The composed form used as the cache's outer key.
    pub fn composed(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.pool_id, GROUP_KEY_DELIMITER, self.item_id, GROUP_KEY_DELIMITER, self.tenant_id
        )
    }
}

impl FromStr for GroupKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
