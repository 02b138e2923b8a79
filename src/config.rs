use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No {0} Specified")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub db_url: String,
    pub db_max_connections: u32,
    /// Seconds a session token stays valid after its last use.
    pub session_timeout: i64,
    pub template_dir: PathBuf,
    pub template_dev_mode: bool,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));

        let host = required("HOST")?;
        let db_url = required("DATABASE_URL")?;
        let raw_timeout = required("SESSION_TIMEOUT")?;
        let session_timeout: i64 = parse("SESSION_TIMEOUT", raw_timeout.clone())?;
        if session_timeout <= 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_TIMEOUT",
                value: raw_timeout,
            });
        }

        let db_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse("DATABASE_MAX_CONNECTIONS", v)?,
            None => 5,
        };
        let template_dev_mode = match lookup("TEMPLATE_DEV_MODE") {
            Some(v) => parse("TEMPLATE_DEV_MODE", v)?,
            None => false,
        };

        Ok(Self {
            host,
            db_url,
            db_max_connections,
            session_timeout,
            template_dir: lookup("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("templates/")),
            template_dev_mode,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./static")),
        })
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("HOST", "127.0.0.1:3000"),
        ("DATABASE_URL", "postgres://localhost/jokes"),
        ("SESSION_TIMEOUT", "3600"),
    ];

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.host, "127.0.0.1:3000");
        assert_eq!(config.session_timeout, 3600);
        assert_eq!(config.db_max_connections, 5);
        assert!(!config.template_dev_mode);
        assert_eq!(config.template_dir, PathBuf::from("templates/"));
        assert_eq!(config.static_dir, PathBuf::from("./static"));
    }

    #[test]
    fn optional_vars_override_defaults() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("DATABASE_MAX_CONNECTIONS", "12"));
        pairs.push(("TEMPLATE_DEV_MODE", "true"));
        pairs.push(("TEMPLATE_DIR", "/srv/templates"));

        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.db_max_connections, 12);
        assert!(config.template_dev_mode);
        assert_eq!(config.template_dir, PathBuf::from("/srv/templates"));
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = Config::from_lookup(lookup(&[("HOST", "0.0.0.0:80")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn non_positive_timeout_is_rejected() {
        for timeout in ["0", "-30"] {
            let mut pairs = REQUIRED.to_vec();
            pairs[2] = ("SESSION_TIMEOUT", timeout);

            match Config::from_lookup(lookup(&pairs)).unwrap_err() {
                ConfigError::Invalid { var, value } => {
                    assert_eq!(var, "SESSION_TIMEOUT");
                    assert_eq!(value, timeout);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn unparsable_timeout_is_reported() {
        let mut pairs = REQUIRED.to_vec();
        pairs[2] = ("SESSION_TIMEOUT", "an hour");

        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "SESSION_TIMEOUT", .. }
        ));
    }
}
