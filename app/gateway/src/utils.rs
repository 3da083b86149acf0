//! Gateway utility functions.

/// Expand `${VAR}` and `${VAR:-fallback}` patterns with environment values.
///
/// Unknown or empty variables expand to the fallback, or to an empty
/// string when there is none. An unterminated `${` is kept as written.
pub fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let pattern = &after[..end];
        let (name, fallback) = match pattern.split_once(":-") {
            Some((name, fallback)) => (name, fallback),
            None => (pattern, ""),
        };
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => result.push_str(&value),
            _ => result.push_str(fallback),
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}
