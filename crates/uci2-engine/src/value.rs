//! Interpreting option values.

use crate::error::{Error, Result};

/// Read a UCI boolean.
///
/// Accepts the spellings UCI tools write: `1`/`0`, `yes`/`no`, `on`/`off`,
/// `true`/`false` and `enabled`/`disabled`. Matching is exact, so `"Yes"`
/// is rejected.
pub fn string_to_boolean(text: &str) -> Result<bool> {
    match text {
        "1" | "yes" | "on" | "true" | "enabled" => Ok(true),
        "0" | "no" | "off" | "false" | "disabled" => Ok(false),
        other => {
            log::debug!("not a boolean: {other:?}");
            Err(Error::InvalidArgument(format!("{other:?} is not a boolean")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("on", true)]
    #[case("true", true)]
    #[case("enabled", true)]
    #[case("0", false)]
    #[case("no", false)]
    #[case("off", false)]
    #[case("false", false)]
    #[case("disabled", false)]
    fn known_spellings(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(string_to_boolean(text).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("2")]
    #[case("Yes")]
    #[case(" on")]
    fn everything_else_is_invalid(#[case] text: &str) {
        assert!(matches!(string_to_boolean(text), Err(Error::InvalidArgument(_))));
    }
}
