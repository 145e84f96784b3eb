//! Tenant name → internal ID directory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tenant as returned by the tenants query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "internalID")]
    pub internal_id: String,
}

/// Read-only lookup built once at bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantDirectory {
    by_name: HashMap<String, String>,
}

impl TenantDirectory {
    /// Index tenants by display name. Unnamed tenants are skipped; a repeated
    /// name keeps the last entry.
    pub fn from_tenants<'a, I>(tenants: I) -> Self
    where
        I: IntoIterator<Item = &'a Tenant>,
    {
        let by_name = tenants
            .into_iter()
            .filter_map(|t| t.name.as_ref().map(|n| (n.clone(), t.internal_id.clone())))
            .collect();
        Self { by_name }
    }

    /// Internal ID of the tenant with display name `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
