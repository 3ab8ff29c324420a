use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrorKind, ModelError, ValidationErrors};

pub const MODEL_NAME: &str = "Favorite";
pub const TITLE_MIN_LEN: usize = 3;
pub const CREATOR_MIN_LEN: usize = 3;

/// Stored document in the `favorites` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "createdAt", with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields that passed [`FavoriteDraft::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct FavoriteFields {
    pub title: String,
    pub creator: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub rating: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Unvalidated mutable fields, as assembled from a request or from a stored
/// record about to be changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FavoriteDraft {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub rating: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Partial update: only the fields a client sent. `rating: Some(None)`
/// clears the stored rating.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FavoritePatch {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub rating: Option<Option<i64>>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

fn check_title(errs: &mut ValidationErrors, title: Option<&str>) {
    match title.filter(|s| !s.is_empty()) {
        None => errs.push("title", FieldErrorKind::Required),
        Some(t) if t.chars().count() < TITLE_MIN_LEN => errs.push(
            "title",
            FieldErrorKind::MinLength { value: t.to_string(), min: TITLE_MIN_LEN },
        ),
        Some(_) => {}
    }
}

// an empty creator is still a value and fails the length rule
fn check_creator(errs: &mut ValidationErrors, creator: &str) {
    if creator.chars().count() < CREATOR_MIN_LEN {
        errs.push(
            "creator",
            FieldErrorKind::MinLength { value: creator.to_string(), min: CREATOR_MIN_LEN },
        );
    }
}

fn check_category(errs: &mut ValidationErrors, category: Option<&str>) {
    if category.filter(|s| !s.is_empty()).is_none() {
        errs.push("category", FieldErrorKind::Required);
    }
}

impl FavoriteDraft {
    /// Schema check: `title` required (min 3), `creator` min 3 when given,
    /// `category` required. Empty required strings count as missing.
    pub fn check(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::new(MODEL_NAME);
        check_title(&mut errs, self.title.as_deref());
        if let Some(c) = &self.creator {
            check_creator(&mut errs, c);
        }
        check_category(&mut errs, self.category.as_deref());
        errs
    }

    pub fn validate(self) -> Result<FavoriteFields, ModelError> {
        let errs = self.check();
        if !errs.is_empty() {
            return Err(ModelError::Validation(errs));
        }
        match (self.title, self.category) {
            (Some(title), Some(category)) => Ok(FavoriteFields {
                title,
                creator: self.creator,
                year: self.year,
                description: self.description,
                category,
                tags: self.tags,
                rating: self.rating,
                status: self.status,
                notes: self.notes,
            }),
            _ => Err(ModelError::Validation(errs)),
        }
    }
}

impl FavoritePatch {
    /// Same rules as [`FavoriteDraft::check`], applied to the sent fields only.
    /// Fields left out keep their stored (already valid) value.
    pub fn check(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::new(MODEL_NAME);
        if let Some(t) = &self.title {
            check_title(&mut errs, Some(t));
        }
        if let Some(c) = &self.creator {
            check_creator(&mut errs, c);
        }
        if let Some(c) = &self.category {
            check_category(&mut errs, Some(c));
        }
        errs
    }

    pub fn validate(self) -> Result<Self, ModelError> {
        let errs = self.check();
        if errs.is_empty() { Ok(self) } else { Err(ModelError::Validation(errs)) }
    }
}

impl Favorite {
    pub fn new(fields: FavoriteFields, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            title: fields.title,
            creator: fields.creator,
            year: fields.year,
            description: fields.description,
            category: fields.category,
            tags: fields.tags,
            rating: fields.rating,
            status: fields.status,
            notes: fields.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `patch`. `updated_at` strictly
    /// advances, even when two writes land within the store's millisecond
    /// resolution.
    pub fn apply(&mut self, patch: FavoritePatch, now: DateTime<Utc>) {
        if let Some(v) = patch.title { self.title = v; }
        if let Some(v) = patch.creator { self.creator = Some(v); }
        if let Some(v) = patch.year { self.year = Some(v); }
        if let Some(v) = patch.description { self.description = Some(v); }
        if let Some(v) = patch.category { self.category = v; }
        if let Some(v) = patch.tags { self.tags = v; }
        if let Some(v) = patch.rating { self.rating = v; }
        if let Some(v) = patch.status { self.status = Some(v); }
        if let Some(v) = patch.notes { self.notes = Some(v); }
        self.updated_at = now.max(self.updated_at + chrono::Duration::milliseconds(1));
    }
}

/// Wire form: `id` as hex string, camelCase keys, no store internals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteView {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteView {
    fn from(f: Favorite) -> Self {
        Self {
            id: f.id.to_hex(),
            title: f.title,
            creator: f.creator,
            year: f.year,
            description: f.description,
            category: f.category,
            tags: f.tags,
            rating: f.rating,
            status: f.status,
            notes: f.notes,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}
