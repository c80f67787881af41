#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::Conf;

    /// Every supported kind, nested records, custom names and the fields
    /// binding must skip.
    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct Config {
        #[conf(name = "Bool")]
        pub bool_field: bool,
        #[conf(name = "Duration")]
        pub duration: Duration,
        #[conf(name = "Float64")]
        pub float64: f64,
        #[conf(name = "Int", usage = "hello world")]
        pub int: isize,
        #[conf(name = "Int64")]
        pub int64: i64,
        #[conf(name = "String")]
        pub string: String,
        #[conf(name = "Uint")]
        pub uint: usize,
        #[conf(name = "Uint64")]
        pub uint64: u64,
        #[conf(name = "SubConfig")]
        pub sub_config: SubConfig,

        #[conf(name = "string-custom-name-xxx")]
        pub string_custom_name: String,
        #[conf(name = "sub-config-custom-name-xxx")]
        pub sub_config_custom_name: SubConfig,

        pub skip_me: String,

        #[conf(name = "unexported")]
        unexported: String,

        #[conf(name = "")]
        pub hidden: String,
        #[conf(name = "", noredact)]
        pub hidden_sub_config: SubConfig,
    }

    impl Config {
        /// Non-zero defaults for `Int` and `SubConfig-String`.
        pub fn fixture() -> Self {
            Config {
                int: 3,
                sub_config: SubConfig {
                    string: "a".into(),
                },
                ..Config::default()
            }
        }

        pub fn unexported(&self) -> &str {
            &self.unexported
        }
    }

    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct SubConfig {
        #[conf(name = "String")]
        pub string: String,
    }

    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct Login {
        /// who to log in as
        #[conf(name = "name", noredact)]
        pub username: String,
        #[conf]
        pub password: String,
    }

    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct DbConfig {
        #[conf]
        pub dsn: String,
        #[conf(noredact)]
        pub timeout: Duration,
    }

    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct Database {
        #[conf(name = "primary-db", noredact)]
        pub primary_db: DbConfig,
        #[conf(name = "secondary-db")]
        pub secondary_db: DbConfig,
    }

    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct Inner {
        #[conf]
        pub b: String,
    }

    /// `a` + `b` and `a-b` map to the same option.
    #[derive(Conf, Clone, Default, Debug, PartialEq)]
    pub struct Clash {
        #[conf]
        pub a: Inner,
        #[conf(name = "a-b")]
        pub a_b: String,
    }

    #[test]
    fn fixture_defaults() {
        let config = Config::fixture();
        assert_eq!(config.int, 3);
        assert_eq!(config.sub_config.string, "a");
        assert_eq!(config.unexported(), "");
    }
}
