use sqlx::PgPool;

use super::repo_types::Goal;

pub async fn list_by_user(db: &PgPool, user_id: i64) -> Result<Vec<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>(
        r#"
        SELECT id, title, description, completed, user_id, category_id, created_at
        FROM goals
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn get(db: &PgPool, user_id: i64, goal_id: i64) -> Result<Option<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>(
        r#"
        SELECT id, title, description, completed, user_id, category_id, created_at
        FROM goals
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(goal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Inserts only when `category_id` is null or names a category of the same
/// user; `None` means the category check failed.
pub async fn create(
    db: &PgPool,
    user_id: i64,
    title: &str,
    description: Option<&str>,
    category_id: Option<i64>,
) -> Result<Option<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (title, description, user_id, category_id)
        SELECT $1::TEXT, $2::TEXT, $3::BIGINT, $4::BIGINT
        WHERE $4::BIGINT IS NULL
           OR EXISTS (SELECT 1 FROM categories WHERE id = $4 AND user_id = $3)
        RETURNING id, title, description, completed, user_id, category_id, created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(user_id)
    .bind(category_id)
    .fetch_optional(db)
    .await
}

/// Returns the number of rows touched (0 or 1). `description` is
/// `None` to keep the stored value and `Some(None)` to clear it.
pub async fn update(
    db: &PgPool,
    user_id: i64,
    goal_id: i64,
    title: Option<&str>,
    description: Option<Option<&str>>,
    completed: Option<bool>,
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        r#"
        UPDATE goals
        SET title = COALESCE($1, title),
            description = CASE WHEN $2 THEN $3 ELSE description END,
            completed = COALESCE($4, completed)
        WHERE id = $5 AND user_id = $6
        "#,
    )
    .bind(title)
    .bind(description.is_some())
    .bind(description.flatten())
    .bind(completed)
    .bind(goal_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

pub async fn delete(db: &PgPool, user_id: i64, goal_id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(r#"DELETE FROM goals WHERE id = $1 AND user_id = $2"#)
        .bind(goal_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::repo as categories;
    use crate::state::{test_db, test_user};

    #[tokio::test]
    async fn goals_are_invisible_to_other_users() {
        let Some(db) = test_db().await else { return };
        let owner = test_user(&db).await;
        let other = test_user(&db).await;
        let goal = create(&db, owner, "Run", None, None).await.unwrap().unwrap();

        assert!(get(&db, other, goal.id).await.unwrap().is_none());
        assert!(list_by_user(&db, other).await.unwrap().is_empty());
        assert_eq!(
            update(&db, other, goal.id, Some("Mine"), None, Some(true)).await.unwrap(),
            0
        );
        assert_eq!(delete(&db, other, goal.id).await.unwrap(), 0);

        let kept = get(&db, owner, goal.id).await.unwrap().unwrap();
        assert_eq!(kept.title, "Run");
        assert!(!kept.completed);
    }

    #[tokio::test]
    async fn completed_only_update_keeps_text() {
        let Some(db) = test_db().await else { return };
        let user = test_user(&db).await;
        let goal = create(&db, user, "Read", Some("two chapters"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(update(&db, user, goal.id, None, None, Some(true)).await.unwrap(), 1);
        let after = get(&db, user, goal.id).await.unwrap().unwrap();
        assert!(after.completed);
        assert_eq!(after.title, "Read");
        assert_eq!(after.description.as_deref(), Some("two chapters"));
    }

    #[tokio::test]
    async fn null_description_clears_it() {
        let Some(db) = test_db().await else { return };
        let user = test_user(&db).await;
        let goal = create(&db, user, "Read", Some("two chapters"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(update(&db, user, goal.id, None, Some(None), None).await.unwrap(), 1);
        let after = get(&db, user, goal.id).await.unwrap().unwrap();
        assert!(after.description.is_none());
        assert_eq!(after.title, "Read");

        update(&db, user, goal.id, None, Some(Some("one")), None).await.unwrap();
        let after = get(&db, user, goal.id).await.unwrap().unwrap();
        assert_eq!(after.description.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn foreign_category_is_refused() {
        let Some(db) = test_db().await else { return };
        let owner = test_user(&db).await;
        let other = test_user(&db).await;
        let category = categories::create(&db, owner, "Health").await.unwrap();

        assert!(create(&db, other, "Swim", None, Some(category.id))
            .await
            .unwrap()
            .is_none());
        let goal = create(&db, owner, "Swim", None, Some(category.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(goal.category_id, Some(category.id));
    }

    #[tokio::test]
    async fn deleting_category_unlinks_its_goals() {
        let Some(db) = test_db().await else { return };
        let user = test_user(&db).await;
        let category = categories::create(&db, user, "Study").await.unwrap();
        let goal = create(&db, user, "Rust book", None, Some(category.id))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(categories::delete(&db, user, category.id).await.unwrap(), 1);
        let after = get(&db, user, goal.id).await.unwrap().unwrap();
        assert!(after.category_id.is_none());
    }
}
