use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for absent or blank record fields.
pub const NOT_AVAILABLE: &str = "N/A";

macro_rules! name_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

name_newtype!(ProjectId);
name_newtype!(GroupName);

impl GroupName {
    /// Section title for a group, e.g. `compute` becomes `Compute Services`.
    pub fn heading(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => format!("{}{} Services", first.to_uppercase(), chars.as_str()),
            None => "Services".to_string(),
        }
    }
}

/// Returns the part of a namespaced string after its first `/`.
fn segment_after_namespace(value: &str) -> Option<&str> {
    value
        .split_once('/')
        .map(|(_, rest)| rest.split('/').next().unwrap_or(rest))
        .filter(|segment| !segment.is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn display_or_na(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => NOT_AVAILABLE,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One provisioned cloud asset as reported by the inventory service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    /// Namespaced, e.g. `compute.googleapis.com/Instance`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub asset_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub create_time: String,
    /// Namespaced, e.g. `projects/123456789`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_attributes: Option<AdditionalAttributes>,
}

impl ResourceRecord {
    pub fn asset_kind(&self) -> Option<&str> {
        segment_after_namespace(&self.asset_type)
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        segment_after_namespace(&self.project).map(ProjectId::from)
    }

    pub fn external_id(&self) -> Option<&str> {
        self.additional_attributes
            .as_ref()
            .and_then(|attrs| attrs.id.as_deref())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.create_time)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// Records grouped by service. Groups are never stored empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    groups: BTreeMap<GroupName, Vec<ResourceRecord>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, group: &GroupName) -> Option<&[ResourceRecord]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn contains_group(&self, group: &GroupName) -> bool {
        self.groups.contains_key(group)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &GroupName> {
        self.groups.keys()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&GroupName, &[ResourceRecord])> {
        self.groups
            .iter()
            .map(|(name, records)| (name, records.as_slice()))
    }
}

impl FromIterator<(GroupName, Vec<ResourceRecord>)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (GroupName, Vec<ResourceRecord>)>>(iter: I) -> Self {
        let mut groups = BTreeMap::new();
        for (name, records) in iter {
            if !records.is_empty() {
                groups.insert(name, records);
            }
        }
        Self { groups }
    }
}
