//! Demo content for local runs.
//!
//! Enabled with `ARTICLES_SEED_DEMO=true`. Seeding only happens on an empty
//! `users` table so restarting the service never duplicates rows.

use crate::store::{Database, NewArticle};
use log::info;

struct DemoUser {
    username: &'static str,
    name: &'static str,
    articles: &'static [(&'static str, &'static str, i64)],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "ada",
        name: "Ada Lovelace",
        articles: &[
            ("Notes on the Analytical Engine", "Machines that weave algebraic patterns.", 12),
            ("Poetical Science", "Imagination is the discovering faculty.", 5),
        ],
    },
    DemoUser {
        username: "grace",
        name: "Grace Hopper",
        articles: &[
            ("A Moth in the Relay", "The first actual case of a bug being found.", 3),
            ("Nanoseconds", "Why a foot of wire matters.", 4),
            ("Compilers for Everyone", "Programs written in plain words.", 8),
        ],
    },
];

/// Inserts the demo users and their articles. Returns how many articles were
/// written, which is zero when the store already had users.
pub fn seed_demo(db: &Database) -> rusqlite::Result<usize> {
    if db.count_users()? > 0 {
        info!("Store already has users, skipping demo seed");
        return Ok(0);
    }

    let mut written = 0;
    for user in DEMO_USERS {
        let user_id = db.create_user(user.username, user.name)?;
        for (title, content, minutes) in user.articles {
            let preview: String = content.chars().take(25).collect();
            db.create_article(&NewArticle {
                author: Some(user.name.to_string()),
                title: title.to_string(),
                content: content.to_string(),
                preview: Some(preview),
                minutes_to_read: *minutes,
                date: None,
                user_id: Some(user_id),
            })?;
            written += 1;
        }
    }

    info!("Seeded {} demo users with {} articles", DEMO_USERS.len(), written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LookupField;
    use tempfile::TempDir;

    #[test]
    fn seeds_once() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("seed.db"));
        db.init_schema().unwrap();

        assert_eq!(seed_demo(&db).unwrap(), 5);
        assert_eq!(seed_demo(&db).unwrap(), 0);
        assert_eq!(db.list_articles().unwrap().len(), 5);

        let grace = db.find_user_by(LookupField::Username, "grace").unwrap().unwrap();
        assert_eq!(grace.articles.len(), 3);
    }
}
