//! Storage event notifications.
//!
//! Only the fields the pipeline needs are decoded; everything else in the
//! notification document is ignored.

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::keys::decode_event_key;

/// An object-created notification carrying one or more records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntity {
    /// Form-encoded object key, as delivered
    pub key: String,
}

impl StorageEvent {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// A single-record event; `raw_key` is stored as delivered (encoded).
    pub fn single(bucket: &str, raw_key: &str) -> Self {
        Self {
            records: vec![EventRecord {
                s3: S3Entity {
                    bucket: BucketEntity {
                        name: bucket.to_string(),
                    },
                    object: ObjectEntity {
                        key: raw_key.to_string(),
                    },
                },
            }],
        }
    }
}

impl EventRecord {
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// The object key with `+` and percent escapes decoded.
    pub fn object_key(&self) -> PipelineResult<String> {
        decode_event_key(&self.s3.object.key)
    }
}
