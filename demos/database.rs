//! # database demo
//!
//! Two nested database configs sharing one struct. Each gets its own option
//! prefix (`primary-db-…`, `secondary-db-…`). Only the primary is kept by
//! redaction, and inside it only the timeout.
//!
//! ## Running
//!
//! | What                     | Command                                                                   |
//! |--------------------------|---------------------------------------------------------------------------|
//! | Help                     | `cargo run --example database -- --help`                                  |
//! | Flags                    | `cargo run --example database -- --primary-db-dsn pg://a --primary-db-timeout 5s` |
//! | Env var                  | `DATABASE_SECONDARY_DB_DSN=pg://b cargo run --example database`           |
//! | Bad env value            | `DATABASE_PRIMARY_DB_TIMEOUT=soon cargo run --example database`           |

use std::time::Duration;

use clapconf::{Conf, Loader};
use tracing_subscriber::EnvFilter;

#[derive(Conf, Clone, Default, Debug)]
struct DbConfig {
    /// Connection string, may contain credentials.
    #[conf]
    pub dsn: String,

    #[conf(noredact, usage = "how long to wait for a connection")]
    pub timeout: Duration,
}

#[derive(Conf, Clone, Default, Debug)]
struct Config {
    #[conf(name = "primary-db", noredact)]
    pub primary_db: DbConfig,

    #[conf(name = "secondary-db")]
    pub secondary_db: DbConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::default();
    config.primary_db.timeout = Duration::from_secs(30);
    config.secondary_db.timeout = Duration::from_secs(30);

    Loader::new()
        .program_name("database")
        .load_or_exit(&mut config);

    println!("raw config {config:?}");
    match clapconf::redact(&config) {
        Ok(redacted) => println!("redacted config {redacted:?}"),
        Err(err) => eprintln!("error: {err}"),
    }
}
