//! Config command implementation

use crate::commands::common::load_config;
use anyhow::{Context, Result};
use hw_core::HeadwaterConfig;

use crate::cli::{ConfigArgs, ConfigOutput, GlobalArgs};

/// Execute the config command
pub async fn execute(args: &ConfigArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    print!("{}", render(&config, args.output)?);
    Ok(())
}

/// Effective config after defaults, in the requested format
fn render(config: &HeadwaterConfig, output: ConfigOutput) -> Result<String> {
    match output {
        ConfigOutput::Yaml => serde_yaml::to_string(config).context("Failed to serialize config"),
        ConfigOutput::Json => serde_json::to_string_pretty(config)
            .map(|json| json + "\n")
            .context("Failed to serialize config"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults_as_json() {
        let out = render(&HeadwaterConfig::default(), ConfigOutput::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["semantic"]["platform"], "trino");
        assert_eq!(value["semantic"]["lineage"]["max_hops"], 2);
        assert_eq!(value["semantic"]["lineage"]["timeout"], "5s");
    }

    #[test]
    fn test_render_yaml_reparses() {
        let config = HeadwaterConfig::from_yaml(
            "semantic:\n  lineage:\n    enabled: true\n    max_hops: 3\n    inherit: [tags]\n",
        )
        .unwrap();
        let out = render(&config, ConfigOutput::Yaml).unwrap();
        assert_eq!(HeadwaterConfig::from_yaml(&out).unwrap(), config);
    }
}
