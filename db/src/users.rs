use diesel::prelude::*;

use crate::{schema::*, Error, Pool, PoolExt};

#[derive(Clone, Debug, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i64,
    pub tg_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub can_join_groups: bool,
    pub can_read_all_group_messages: bool,
    pub supports_inline_queries: bool,
    pub phone: Option<String>,
}

/// A Telegram account as seen on an incoming message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Insertable)]
#[diesel(table_name = users)]
pub struct NewTelegramUser {
    pub tg_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub can_join_groups: bool,
    pub can_read_all_group_messages: bool,
    pub supports_inline_queries: bool,
}

/// Record a Telegram user the first time they are seen. Later sightings never
/// overwrite the stored profile.
pub async fn save_telegram_user(pool: &Pool, user: NewTelegramUser) -> Result<(), Error> {
    pool.interact(move |conn| {
        diesel::insert_into(users::table)
            .values(&user)
            .on_conflict(users::tg_id)
            .do_nothing()
            .execute(conn)?;
        Ok::<_, Error>(())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::run_database_test;

    #[tokio::test]
    async fn first_seen_profile_wins() {
        run_database_test(|database| async move {
            let first = NewTelegramUser {
                tg_id: 42,
                username: Some("ali".to_string()),
                first_name: "Ali".to_string(),
                ..Default::default()
            };
            let renamed = NewTelegramUser {
                username: Some("ali_new".to_string()),
                first_name: "Alibek".to_string(),
                ..first.clone()
            };

            save_telegram_user(&database.pool, first).await?;
            save_telegram_user(&database.pool, renamed).await?;

            let stored = database
                .pool
                .interact(|conn| {
                    users::table
                        .filter(users::tg_id.eq(42))
                        .load::<User>(conn)
                        .map_err(Error::from)
                })
                .await?;

            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].username.as_deref(), Some("ali"));
            assert_eq!(stored[0].first_name, "Ali");
            assert_eq!(stored[0].phone, None);
            Ok(())
        })
        .await
    }
}
