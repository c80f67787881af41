//! # login demo
//!
//! Loads a username and password from flags and environment variables, then
//! prints the config next to its redacted copy.
//!
//! ## Running
//!
//! | What                     | Command                                                        |
//! |--------------------------|----------------------------------------------------------------|
//! | Defaults                 | `cargo run --example login`                                    |
//! | Flag                     | `cargo run --example login -- -name=alice`                     |
//! | Operands                 | `cargo run --example login -- -name=alice a.txt b.txt`         |
//! | Env var                  | `LOGIN_PASSWORD=hunter2 cargo run --example login`             |
//! | Help                     | `cargo run --example login -- -help`                           |
//! | Pipeline logging         | `RUST_LOG=clapconf=debug cargo run --example login`            |

use clapconf::{Conf, Loader};
use tracing_subscriber::EnvFilter;

#[derive(Conf, Clone, Default, Debug)]
struct Config {
    /// who to log in as
    #[conf(name = "name", noredact)]
    pub username: String,

    #[conf]
    pub password: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config {
        username: "jdoe".into(),
        ..Config::default()
    };

    let operands = Loader::new().program_name("login").load_or_exit(&mut config);

    println!("raw config {config:?}");
    println!("operands {operands:?}");
    match clapconf::redact(&config) {
        Ok(redacted) => println!("redacted config {redacted:?}"),
        Err(err) => eprintln!("error: {err}"),
    }
}
