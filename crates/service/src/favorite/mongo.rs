use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use models::favorite::{Favorite, FavoritePatch};
use mongodb::{
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};

use crate::errors::ServiceError;
use crate::favorite::repository::FavoriteRepository;

/// MongoDB-backed repository over one collection.
#[derive(Clone)]
pub struct MongoFavoriteRepository {
    collection: Collection<Favorite>,
}

impl MongoFavoriteRepository {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self { collection: db.collection::<Favorite>(collection) }
    }

    pub fn collection(&self) -> &Collection<Favorite> { &self.collection }
}

/// Aggregation-pipeline update for one patch. Client values go through
/// `$literal` so strings starting with `$` are not read as field paths.
/// `updatedAt` becomes `max(now, updatedAt + 1ms)` inside the same write.
fn update_pipeline(patch: &FavoritePatch, now: DateTime<Utc>) -> Vec<Document> {
    let mut set = Document::new();
    let text = [
        ("title", &patch.title),
        ("creator", &patch.creator),
        ("year", &patch.year),
        ("description", &patch.description),
        ("category", &patch.category),
        ("status", &patch.status),
        ("notes", &patch.notes),
    ];
    for (key, value) in text {
        if let Some(v) = value {
            set.insert(key, doc! { "$literal": v.as_str() });
        }
    }
    if let Some(tags) = &patch.tags {
        set.insert("tags", doc! { "$literal": tags.clone() });
    }
    if let Some(Some(rating)) = patch.rating {
        set.insert("rating", doc! { "$literal": rating });
    }
    let now = bson::DateTime::from_chrono(now);
    set.insert("updatedAt", doc! { "$max": [now, { "$add": ["$updatedAt", 1] }] });

    let mut stages = vec![doc! { "$set": set }];
    if let Some(None) = patch.rating {
        stages.push(doc! { "$unset": "rating" });
    }
    stages
}

#[async_trait]
impl FavoriteRepository for MongoFavoriteRepository {
    async fn list(&self) -> Result<Vec<Favorite>, ServiceError> {
        let cursor = self.collection.find(None, None).await?;
        let items: Vec<Favorite> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn insert(&self, favorite: Favorite) -> Result<Favorite, ServiceError> {
        self.collection.insert_one(&favorite, None).await?;
        Ok(favorite)
    }

    async fn update(
        &self,
        id: ObjectId,
        patch: FavoritePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Favorite>, ServiceError> {
        let opts = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update_pipeline(&patch, now), opts)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let res = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(res.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::favorite::FavoriteDraft;

    #[test]
    fn pipeline_sets_sent_fields_as_literals() {
        let patch = FavoritePatch {
            title: Some("$where".into()),
            tags: Some(vec!["scifi".into()]),
            rating: Some(Some(7)),
            ..FavoritePatch::default()
        };
        let stages = update_pipeline(&patch, Utc::now());
        assert_eq!(stages.len(), 1);
        let set = stages[0].get_document("$set").unwrap();
        assert_eq!(set.get_document("title").unwrap(), &doc! { "$literal": "$where" });
        assert_eq!(set.get_document("rating").unwrap(), &doc! { "$literal": 7_i64 });
        assert!(set.get_document("updatedAt").unwrap().contains_key("$max"));
        assert!(!set.contains_key("creator"));
        assert!(!set.contains_key("notes"));
    }

    #[test]
    fn cleared_rating_adds_unset_stage() {
        let patch = FavoritePatch { rating: Some(None), ..FavoritePatch::default() };
        let stages = update_pipeline(&patch, Utc::now());
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1], doc! { "$unset": "rating" });
    }

    #[tokio::test]
    async fn favorite_crud_against_mongodb() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let Some(db) = get_db().await? else { return Ok(()); };
        let coll = format!("favorites_test_{}", uuid::Uuid::new_v4().simple());
        let repo = MongoFavoriteRepository::new(&db, &coll);

        let fields = FavoriteDraft {
            title: Some("Dune".into()),
            creator: Some("Herbert".into()),
            category: Some("book".into()),
            rating: Some(9),
            ..FavoriteDraft::default()
        }
        .validate()?;
        let created = repo.insert(Favorite::new(fields, Utc::now())).await?;

        let patch = FavoritePatch { title: Some("Dune Messiah".into()), ..FavoritePatch::default() };
        let updated = repo.update(created.id, patch, created.created_at).await?.expect("updated record");
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.creator.as_deref(), Some("Herbert"));
        assert_eq!(updated.rating, Some(9));
        assert!(updated.updated_at > created.updated_at);

        let patch = FavoritePatch { rating: Some(None), ..FavoritePatch::default() };
        let cleared = repo.update(created.id, patch, Utc::now()).await?.expect("updated record");
        assert_eq!(cleared.rating, None);

        assert!(repo.update(ObjectId::new(), FavoritePatch::default(), Utc::now()).await?.is_none());

        let all = repo.list().await?;
        assert_eq!(all.len(), 1);

        assert!(repo.delete(created.id).await?);
        assert!(!repo.delete(created.id).await?);
        assert!(repo.list().await?.is_empty());

        repo.collection().drop(None).await?;
        Ok(())
    }
}
