use sqlx::PgPool;

use super::repo_types::Category;

pub async fn list_by_user(db: &PgPool, user_id: i64) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, user_id, created_at
        FROM categories
        WHERE user_id = $1
        ORDER BY name ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn get(
    db: &PgPool,
    user_id: i64,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, user_id, created_at
        FROM categories
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(category_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn create(db: &PgPool, user_id: i64, name: &str) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (user_id, name)
        VALUES ($1, $2)
        RETURNING id, name, user_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(db)
    .await
}

pub async fn rename(
    db: &PgPool,
    user_id: i64,
    category_id: i64,
    name: &str,
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(r#"UPDATE categories SET name = $1 WHERE id = $2 AND user_id = $3"#)
        .bind(name)
        .bind(category_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

/// Goals pointing at the category keep existing; the foreign key clears them.
pub async fn delete(db: &PgPool, user_id: i64, category_id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(r#"DELETE FROM categories WHERE id = $1 AND user_id = $2"#)
        .bind(category_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{test_db, test_user};

    #[tokio::test]
    async fn categories_are_invisible_to_other_users() {
        let Some(db) = test_db().await else { return };
        let owner = test_user(&db).await;
        let other = test_user(&db).await;
        let category = create(&db, owner, "Work").await.unwrap();

        assert!(get(&db, other, category.id).await.unwrap().is_none());
        assert!(list_by_user(&db, other).await.unwrap().is_empty());
        assert_eq!(rename(&db, other, category.id, "Mine").await.unwrap(), 0);
        assert_eq!(delete(&db, other, category.id).await.unwrap(), 0);
        assert_eq!(
            get(&db, owner, category.id).await.unwrap().unwrap().name,
            "Work"
        );
    }

    #[tokio::test]
    async fn listing_is_sorted_by_name() {
        let Some(db) = test_db().await else { return };
        let user = test_user(&db).await;
        for name in ["Work", "Health", "Music"] {
            create(&db, user, name).await.unwrap();
        }
        let names: Vec<_> = list_by_user(&db, user)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Health", "Music", "Work"]);
    }
}
