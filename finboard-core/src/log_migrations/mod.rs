//! Log database migrations - embedded SQL files
//!
//! Each migration is a tuple of (name, sql_content), applied in order. The
//! first one creates `sys_migrations` and runs on every open.
//! New migrations get a new NNN_description.sql file and an entry here.

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
