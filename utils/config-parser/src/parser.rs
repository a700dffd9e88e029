use {
    crate::Error,
    config::{Config, Environment, File},
    serde::de::DeserializeOwned,
    std::path::Path,
};

pub struct ConfigParser;

impl ConfigParser {
    /// Parse a config file, letting environment variables override its
    /// values. Nested keys are separated by `__` in variable names, e.g.
    /// `HOOKS__CALLBACK_GAS_LIMIT`.
    pub fn parse<D, P>(path: P) -> Result<D, Error>
    where
        D: DeserializeOwned,
        P: AsRef<Path>,
    {
        let env_override = Environment::default().separator("__");

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_override)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
