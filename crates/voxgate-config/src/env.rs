use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// An optional fallback can be supplied with
/// `{{ env.VAR | default("fallback") }}`; it is used when the variable is
/// unset. A placeholder without a default whose variable is unset is an
/// error. Comment lines are passed through untouched so commented-out
/// secrets never fail expansion.
pub(crate) fn expand_env(raw: &str) -> anyhow::Result<String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: variable name, group 2: optional default value
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("placeholder pattern is valid")
        })
    }

    let mut output = String::with_capacity(raw.len());

    for (index, line) in raw.lines().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut unset: Option<String> = None;
        let expanded = placeholder().replace_all(line, |captures: &regex::Captures<'_>| {
            let name = &captures[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => captures.get(2).map_or_else(
                    || {
                        unset.get_or_insert_with(|| name.to_owned());
                        String::new()
                    },
                    |default| default.as_str().to_owned(),
                ),
            }
        });

        if let Some(name) = unset {
            anyhow::bail!(
                "environment variable `{name}` is not set (config line {})",
                index + 1
            );
        }

        // Anything that still looks like a placeholder is malformed or uses
        // an unsupported scope
        if expanded.contains("{{") {
            anyhow::bail!(
                "unsupported config placeholder on line {}: only `{{{{ env.VAR }}}}` is recognized",
                index + 1
            );
        }

        output.push_str(&expanded);
    }

    if raw.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
