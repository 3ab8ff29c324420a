use models::favorite::{FavoriteDraft, FavoritePatch};
use models::rating::{self, Rating};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Request body for create and update. Every field is optional at this
/// level; the service decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FavoriteInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

fn filled(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.is_empty())
}

impl FavoriteInput {
    /// Both `title` and `creator` must be present and non-empty on create.
    pub fn has_required(&self) -> bool {
        filled(&self.title) && filled(&self.creator)
    }

    /// `None` when the client sent no rating.
    pub fn rating(&self) -> Option<Rating> {
        let raw = self.rating.as_ref()?;
        let r = rating::coerce(raw);
        if r == Rating::NotANumber {
            let raw = raw.to_string();
            warn!(%raw, "rating is not a number; storing without rating");
        }
        Some(r)
    }

    /// Draft for a brand new record.
    pub fn into_draft(self) -> FavoriteDraft {
        let rating = self.rating().and_then(Rating::stored);
        FavoriteDraft {
            title: self.title,
            creator: self.creator,
            year: self.year,
            description: self.description,
            category: self.category,
            tags: self.tags.unwrap_or_default(),
            rating,
            status: self.status,
            notes: self.notes,
        }
    }

    /// Only the fields the client sent. A non-numeric rating clears the
    /// stored one.
    pub fn into_patch(self) -> FavoritePatch {
        let rating = self.rating().map(Rating::stored);
        FavoritePatch {
            title: self.title,
            creator: self.creator,
            year: self.year,
            description: self.description,
            category: self.category,
            tags: self.tags,
            rating,
            status: self.status,
            notes: self.notes,
        }
    }
}

fn scalar_to_string<E: de::Error>(v: Value) -> Result<Option<String>, E> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected a string, got {other}"))),
    }
}

/// Accepts strings, and numbers/booleans in their textual form.
fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(Value::deserialize(d)?)
}

/// Accepts an array of scalars or a single scalar.
fn lenient_tags<'de, D>(d: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                if let Some(s) = scalar_to_string(item)? {
                    tags.push(s);
                }
            }
            Ok(Some(tags))
        }
        scalar => Ok(Some(scalar_to_string(scalar)?.into_iter().collect())),
    }
}
