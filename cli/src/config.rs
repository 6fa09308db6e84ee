use anyhow::Context;
use std::fs;
use std::path::Path;
use voxmine_core::RulesConfig;

/// Reads rules from a TOML file, falling back to the defaults when no path is given.
pub fn load_rules(path: Option<&Path>) -> anyhow::Result<RulesConfig> {
    let Some(path) = path else {
        return Ok(RulesConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rules = parse_rules(&text).with_context(|| format!("loading rules from {}", path.display()))?;
    log::info!("Loaded rules from {}", path.display());
    Ok(rules)
}

pub fn parse_rules(text: &str) -> anyhow::Result<RulesConfig> {
    let rules: RulesConfig = toml::from_str(text)?;
    rules.validate()?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmine_core::GameError;

    #[test]
    fn partial_file_keeps_defaults() {
        let rules = parse_rules("cascade_chance = 0.0\n[trigger_ratios]\nhard = 0.3\n").unwrap();

        assert_eq!(rules.cascade_chance, 0.0);
        assert_eq!(rules.trigger_ratios.hard, 0.3);
        assert_eq!(rules.trigger_ratios.easy, 0.18);
    }

    #[test]
    fn degenerate_density_is_rejected() {
        let err = parse_rules("[trigger_ratios]\neasy = 1.0\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::TooManyTriggers {
                triggers: 27,
                cells: 26
            })
        );
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_rules("").unwrap(), RulesConfig::default());
    }
}
