//! `{{input}}` placeholder substitution.

use crate::error::{FabrunError, Result};

/// The literal token replaced by `--var`.
pub const PLACEHOLDER: &str = "{{input}}";

/// A definition ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text to hand to the shell.
    pub text: String,
    /// A value was supplied but the definition has no placeholder.
    pub value_ignored: bool,
}

/// Returns true if the text contains the placeholder.
pub fn has_placeholder(text: &str) -> bool {
    text.contains(PLACEHOLDER)
}

/// Replaces every placeholder with `value`, verbatim.
pub fn substitute(text: &str, value: &str) -> String {
    text.replace(PLACEHOLDER, value)
}

/// Applies an optional value to a definition.
///
/// # Errors
///
/// Returns [`FabrunError::Usage`] when the definition needs a value and
/// none was given.
pub fn render(text: &str, value: Option<&str>) -> Result<Rendered> {
    match (has_placeholder(text), value) {
        (true, Some(value)) => Ok(Rendered {
            text: substitute(text, value),
            value_ignored: false,
        }),
        (true, None) => Err(FabrunError::Usage(format!(
            "This command requires a value for {PLACEHOLDER}; pass it with --var <value>"
        ))),
        (false, value) => Ok(Rendered {
            text: text.to_string(),
            value_ignored: value.is_some(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_placeholder() {
        assert!(has_placeholder("echo {{input}}"));
        assert!(!has_placeholder("echo {input}"));
        assert!(!has_placeholder(""));
    }

    #[test]
    fn test_substitute_single_occurrence_length() {
        let text = "echo hello {{input}}";
        let out = substitute(text, "world");
        assert_eq!(out, "echo hello world");
        assert_eq!(out.len(), text.len() - PLACEHOLDER.len() + "world".len());
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let out = substitute("{{input}}-{{input}}-{{input}}", "x");
        assert_eq!(out, "x-x-x");
        assert!(!has_placeholder(&out));
    }

    #[test]
    fn test_substitute_is_not_recursive() {
        let out = substitute("echo {{input}}", "{{input}}");
        assert_eq!(out, "echo {{input}}");
    }

    #[test]
    fn test_substitute_value_verbatim() {
        let out = substitute("grep '{{input}}' log", "a$b \"c\"");
        assert_eq!(out, "grep 'a$b \"c\"' log");
    }

    #[test]
    fn test_render_missing_value_is_usage_error() {
        let err = render("echo {{input}}", None).unwrap_err();
        assert!(matches!(err, FabrunError::Usage(_)));
        assert!(err.to_string().contains("--var"));
    }

    #[test]
    fn test_render_ignored_value_is_flagged() {
        let rendered = render("ls -la", Some("unused")).unwrap();
        assert_eq!(rendered.text, "ls -la");
        assert!(rendered.value_ignored);
    }

    #[test]
    fn test_render_without_value_or_placeholder() {
        let rendered = render("ls -la", None).unwrap();
        assert_eq!(
            rendered,
            Rendered {
                text: "ls -la".to_string(),
                value_ignored: false
            }
        );
    }
}
