//! SQLite persistence for users and articles.
//!
//! The service only reads from the store; the create operations exist for
//! demo seeding and tests. Each call opens its own connection to the database
//! file, so a `Database` is cheap to clone into handlers and blocking tasks.

mod schema;

use chrono::NaiveDateTime;
use common::model::article::Article;
use common::model::user::User;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use schema::{ARTICLE_COLUMNS, CREATE_TABLES};

/// Column matched against the submitted username at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupField {
    #[default]
    Username,
    /// Display name; matches the behaviour of older deployments.
    Name,
}

impl LookupField {
    fn column(self) -> &'static str {
        match self {
            LookupField::Username => "username",
            LookupField::Name => "name",
        }
    }
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Error)]
#[error("expected `username` or `name`")]
pub struct UnknownLookupField;

impl FromStr for LookupField {
    type Err = UnknownLookupField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "username" => Ok(LookupField::Username),
            "name" => Ok(LookupField::Name),
            _ => Err(UnknownLookupField),
        }
    }
}

/// Fields accepted when inserting an article. `date: None` lets the database
/// stamp the current time.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub author: Option<String>,
    pub title: String,
    pub content: String,
    pub preview: Option<String>,
    pub minutes_to_read: i64,
    pub date: Option<NaiveDateTime>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    pub fn init_schema(&self) -> rusqlite::Result<()> {
        self.connect()?.execute_batch(CREATE_TABLES)
    }

    /// Loads a user by primary key, with its articles.
    pub fn find_user(&self, id: i64) -> rusqlite::Result<Option<User>> {
        let conn = self.connect()?;
        let user = conn
            .query_row(
                "SELECT id, username, name FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )
            .optional()?;

        user.map(|user| with_articles(&conn, user)).transpose()
    }

    /// Loads the first user whose `field` column equals `value` exactly.
    pub fn find_user_by(&self, field: LookupField, value: &str) -> rusqlite::Result<Option<User>> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT id, username, name FROM users WHERE {} = ?1 ORDER BY id LIMIT 1",
            field.column()
        );
        let user = conn
            .query_row(&sql, params![value], user_from_row)
            .optional()?;

        user.map(|user| with_articles(&conn, user)).transpose()
    }

    pub fn find_article(&self, id: i64) -> rusqlite::Result<Option<Article>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1"),
            params![id],
            article_from_row,
        )
        .optional()
    }

    pub fn list_articles(&self) -> rusqlite::Result<Vec<Article>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id"))?;
        let rows = stmt.query_map([], article_from_row)?;
        rows.collect()
    }

    pub fn count_users(&self) -> rusqlite::Result<i64> {
        self.connect()?
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
    }

    pub fn create_user(&self, username: &str, name: &str) -> rusqlite::Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO users (username, name) VALUES (?1, ?2)",
            params![username, name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn create_article(&self, article: &NewArticle) -> rusqlite::Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO articles (author, title, content, preview, minutes_to_read, date, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, CURRENT_TIMESTAMP), ?7)",
            params![
                article.author,
                article.title,
                article.content,
                article.preview,
                article.minutes_to_read,
                article.date,
                article.user_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        articles: Vec::new(),
    })
}

fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        author: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        preview: row.get(4)?,
        minutes_to_read: row.get(5)?,
        date: row.get(6)?,
        user_id: row.get(7)?,
    })
}

fn articles_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Article>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE user_id = ?1 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![user_id], article_from_row)?;
    rows.collect()
}

fn with_articles(conn: &Connection, mut user: User) -> rusqlite::Result<User> {
    user.articles = articles_for_user(conn, user.id)?;
    Ok(user)
}
