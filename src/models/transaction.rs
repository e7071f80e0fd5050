use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// A single sale record as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub date_of_sale: Option<DateTime<Utc>>,
    pub category: String,
    pub sold: bool,
}

/// One element of the seed dataset.
///
/// The upstream JSON carries `id` as a number, older dumps carry it as a
/// string; both are accepted. Fields the service does not keep (such as
/// `image`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub date_of_sale: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sold: bool,
}

impl From<SeedRecord> for Transaction {
    fn from(record: SeedRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            price: record.price,
            date_of_sale: record.date_of_sale,
            category: record.category,
            sold: record.sold,
        }
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}
