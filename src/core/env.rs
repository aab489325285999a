//! `$VAR` / `${VAR}` expansion with a pluggable lookup.

use crate::core::error::ConfigError;

#[inline]
fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expand every environment reference in `path`.
///
/// A `$` not followed by a name or `{` is kept literally. An unset
/// variable is an error rather than an empty substitution.
pub fn expand_env<F>(path: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, tail) = if let Some(braced) = after.strip_prefix('{') {
            let close = braced
                .find('}')
                .ok_or_else(|| ConfigError::MalformedVariable(path.to_owned()))?;
            let name = &braced[..close];
            if name.is_empty() || !name.chars().all(is_var_char) {
                return Err(ConfigError::MalformedVariable(path.to_owned()));
            }
            (name, &braced[close + 1..])
        } else {
            let end = after.find(|c: char| !is_var_char(c)).unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        if name.is_empty() {
            out.push('$');
        } else {
            let value = lookup(name).ok_or_else(|| ConfigError::UnresolvedVariable {
                name: name.to_owned(),
                path: path.to_owned(),
            })?;
            out.push_str(&value);
        }
        rest = tail;
    }
    out.push_str(rest);
    Ok(out)
}

/// Lookup backed by the process environment.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
