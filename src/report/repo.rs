use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub name: String,
    pub total_goals: i64,
    pub completed_goals: i64,
    pub pending_goals: i64,
}

pub async fn completion_counts(db: &PgPool, user_id: i64) -> Result<Option<ReportRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportRow>(
        r#"
        SELECT u.name,
               COUNT(g.id) AS total_goals,
               COUNT(g.id) FILTER (WHERE g.completed) AS completed_goals,
               COUNT(g.id) FILTER (WHERE NOT g.completed) AS pending_goals
        FROM users u
        LEFT JOIN goals g ON g.user_id = u.id
        WHERE u.id = $1
        GROUP BY u.id, u.name
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::repo as goals;
    use crate::state::{test_db, test_user};

    #[tokio::test]
    async fn user_without_goals_gets_zero_counts() {
        let Some(db) = test_db().await else { return };
        let user = test_user(&db).await;
        let row = completion_counts(&db, user).await.unwrap().unwrap();
        assert_eq!(row.name, "Test");
        assert_eq!(
            (row.total_goals, row.completed_goals, row.pending_goals),
            (0, 0, 0)
        );
    }

    #[tokio::test]
    async fn counts_only_own_goals() {
        let Some(db) = test_db().await else { return };
        let user = test_user(&db).await;
        let other = test_user(&db).await;
        for title in ["a", "b", "c"] {
            goals::create(&db, user, title, None, None).await.unwrap();
        }
        let done = goals::create(&db, user, "d", None, None).await.unwrap().unwrap();
        goals::update(&db, user, done.id, None, None, Some(true)).await.unwrap();
        goals::create(&db, other, "x", None, None).await.unwrap();

        let row = completion_counts(&db, user).await.unwrap().unwrap();
        assert_eq!(
            (row.total_goals, row.completed_goals, row.pending_goals),
            (4, 1, 3)
        );
    }

    #[tokio::test]
    async fn unknown_user_has_no_row() {
        let Some(db) = test_db().await else { return };
        assert!(completion_counts(&db, -1).await.unwrap().is_none());
    }
}
