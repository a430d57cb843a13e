/// Tables backing the service. Safe to run on every boot.
pub(crate) const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY,
    username    VARCHAR(50)  NOT NULL UNIQUE,
    name        VARCHAR(100) NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    id              INTEGER PRIMARY KEY,
    author          VARCHAR(100),
    title           VARCHAR(200) NOT NULL,
    content         TEXT         NOT NULL,
    preview         VARCHAR(300),
    minutes_to_read INTEGER      NOT NULL DEFAULT 0,
    date            DATETIME     DEFAULT CURRENT_TIMESTAMP,
    user_id         INTEGER,
    CONSTRAINT fk_articles_user_id_users FOREIGN KEY (user_id) REFERENCES users (id)
);

CREATE INDEX IF NOT EXISTS ix_articles_user_id ON articles (user_id);
";

pub(crate) const ARTICLE_COLUMNS: &str =
    "id, author, title, content, preview, minutes_to_read, date, user_id";
