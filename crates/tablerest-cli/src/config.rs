use std::path::PathBuf;
use tablerest::{Config, Planner};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub config: Config,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;
        Self::from_toml(&raw, config_path)
    }

    fn from_toml(raw: &str, config_path: PathBuf) -> anyhow::Result<Self> {
        let mut config: Config = toml::from_str(raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to parse config file {}: {e}",
                config_path.display()
            )
        })?;

        expand_env(&mut config)?;
        config.validate().map_err(|e| {
            anyhow::anyhow!("invalid config file {}: {e}", config_path.display())
        })?;

        tracing::debug!(
            path = %config_path.display(),
            aliases = config.aliases.len(),
            "loaded configuration"
        );

        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn planner(&self) -> anyhow::Result<Planner> {
        Ok(Planner::new(&self.config)?)
    }

    pub fn ensure_alias(&self, alias: &str) -> anyhow::Result<()> {
        if self.config.alias(alias).is_none() {
            let known: Vec<&str> = self.config.aliases.keys().map(String::as_str).collect();
            anyhow::bail!(
                "unknown alias '{alias}' in {} (configured: {})",
                self.config_path.display(),
                known.join(", ")
            );
        }
        Ok(())
    }
}

fn expand_env(config: &mut Config) -> anyhow::Result<()> {
    for alias in config.aliases.values_mut() {
        alias.driver = expand_env_vars(&alias.driver)?;
        if let Some(schema) = alias.schema.as_mut() {
            *schema = expand_env_vars(schema)?;
        }
        if let Some(acl) = alias.acl.as_mut() {
            *acl = expand_env_vars(acl)?;
        }
        for v in alias.resources.values_mut() {
            *v = expand_env_vars(v)?;
        }
        for v in alias.primary_keys.values_mut() {
            *v = expand_env_vars(v)?;
        }
    }
    Ok(())
}

/// Replace every `${NAME}` with the value of environment variable `NAME`.
fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[aliases.demo]
driver = "h2_mem"
acl = "READ"

[aliases.demo.resources]
users = "ALL"
"#;

    #[test]
    fn parses_and_validates() {
        let project = ProjectConfig::from_toml(SAMPLE, PathBuf::from("rest.toml")).unwrap();
        assert_eq!(project.config.aliases.len(), 1);
        assert!(project.ensure_alias("demo").is_ok());

        let err = project.ensure_alias("other").unwrap_err();
        assert!(err.to_string().contains("configured: demo"), "{err}");
    }

    #[test]
    fn invalid_rules_fail_with_path() {
        let raw = "[aliases.demo]\ndriver = \"h2\"\nacl = \"READ, BOGUS\"";
        let err = ProjectConfig::from_toml(raw, PathBuf::from("rest.toml")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("rest.toml"), "{msg}");
        assert!(msg.contains("alias 'demo'"), "{msg}");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ProjectConfig::load(PathBuf::from("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn expand_leaves_plain_text_alone() {
        assert_eq!(expand_env_vars("READ, META").unwrap(), "READ, META");
        assert_eq!(expand_env_vars("cost$").unwrap(), "cost$");
    }

    #[test]
    fn expand_rejects_malformed_references() {
        assert!(expand_env_vars("${UNTERMINATED").is_err());
        assert!(expand_env_vars("${}").is_err());
        assert!(expand_env_vars("${TABLEREST_TEST_UNSET_VARIABLE_0F3A}").is_err());
    }

    #[test]
    fn expand_substitutes_set_variables() {
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(expand_env_vars("x=${PATH}").unwrap(), format!("x={path}"));
        }
    }
}
