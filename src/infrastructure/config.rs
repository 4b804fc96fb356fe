use crate::domain::pool::Pool;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize, Clone)]
pub struct TrackerConfig {
    pub source: SourceSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub pools: Vec<PoolSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PoolSettings {
    pub id: String,
    pub name: String,
    pub label: String,
}

impl From<PoolSettings> for Pool {
    fn from(settings: PoolSettings) -> Self {
        Pool::new(settings.id, settings.name, settings.label)
    }
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_user_agent() -> String {
    concat!("pool-tracker/", env!("CARGO_PKG_VERSION")).to_string()
}

pub fn load_tracker_config(name: &str) -> anyhow::Result<TrackerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name))
        .build()?;

    let tracker_config: TrackerConfig = settings.try_deserialize()?;
    validate(&tracker_config)?;
    Ok(tracker_config)
}

fn validate(tracker_config: &TrackerConfig) -> anyhow::Result<()> {
    if tracker_config.pools.is_empty() {
        anyhow::bail!("no pools configured");
    }
    let mut seen = HashSet::new();
    for pool in &tracker_config.pools {
        if !seen.insert(pool.id.as_str()) {
            anyhow::bail!("duplicate pool id {:?}", pool.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> anyhow::Result<TrackerConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?;
        let tracker_config: TrackerConfig = settings.try_deserialize()?;
        validate(&tracker_config)?;
        Ok(tracker_config)
    }

    const MINIMAL: &str = r#"
        [source]
        url = "https://example.test/pools"

        [storage]
        data_dir = "data"

        [[pools]]
        id = "oerlikon"
        name = "Hallenbad Oerlikon"
        label = "Hallenbad Oerlikon"
    "#;

    #[test]
    fn test_defaults_applied_for_optional_source_settings() {
        let tracker_config = parse(MINIMAL).unwrap();
        assert_eq!(tracker_config.source.timeout_secs, 20);
        assert!(tracker_config.source.user_agent.starts_with("pool-tracker/"));
    }

    #[test]
    fn test_empty_pool_list_is_rejected() {
        let toml = r#"
            [source]
            url = "https://example.test/pools"

            [storage]
            data_dir = "data"
        "#;
        assert!(parse(toml).is_err());
    }

    #[test]
    fn test_duplicate_pool_ids_are_rejected() {
        let toml = format!(
            "{MINIMAL}\n[[pools]]\nid = \"oerlikon\"\nname = \"Other\"\nlabel = \"Other\"\n"
        );
        assert!(parse(&toml).is_err());
    }
}
