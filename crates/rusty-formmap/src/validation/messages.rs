// File: src/validation/messages.rs
// Purpose: Human-readable text for validation rule tags

/// Render the message for a failed rule `tag` with parameter `param`.
///
/// Unknown tags fall back to a generic message naming the tag. An empty tag
/// renders as an empty string.
pub fn message(tag: &str, param: &str) -> String {
    match tag {
        "" => String::new(),
        "required" => "This field is required".to_string(),
        "email" => "Invalid email address".to_string(),
        "url" | "http_url" => "This field must be a valid URL".to_string(),
        "gte" => format!("Value must be at least {}", param),
        "lte" => format!("Value must be at most {}", param),
        "gt" => format!("Value must be greater than {}", param),
        "lt" => format!("Value must be less than {}", param),
        "min" => format!("Minimum length is {}", param),
        "max" => format!("Maximum length is {}", param),
        "len" => format!("Length must be exactly {}", param),
        "eq" => format!("Value must be equal to {}", param),
        "ne" => format!("Value must not be equal to {}", param),
        "eqfield" => format!("This field must match {}", param),
        "nefield" => format!("This field must not match {}", param),
        "not_blank" => "This field cannot be empty".to_string(),
        "alphanum" => "Only alphanumeric characters are allowed".to_string(),
        "alpha" => "Only alphabetic characters are allowed".to_string(),
        "numeric" => "Only numeric characters are allowed".to_string(),
        "alphanum_with_underscore" => {
            "Only alphanumeric characters and underscores are allowed".to_string()
        }
        "mongodb" => "Invalid MongoDB ObjectID".to_string(),
        "uuid" => "Invalid UUID".to_string(),
        "oneof" => format!("Must be one of: {}", param.split_whitespace().collect::<Vec<_>>().join(", ")),
        "gtcsfield" | "gtfield" => format!("Must be greater than {}", param),
        "ltcsfield" | "ltfield" => format!("Must be less than {}", param),
        "contains" => format!("Must contain '{}'", param),
        "startswith" => format!("Must start with '{}'", param),
        "endswith" => format!("Must end with '{}'", param),
        _ => {
            let mut msg = format!("Validation failed on '{}' tag", tag);
            if !param.is_empty() {
                msg.push_str(&format!(" (param: {})", param));
            }
            msg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("required", "", "This field is required")]
    #[case("email", "", "Invalid email address")]
    #[case("url", "", "This field must be a valid URL")]
    #[case("http_url", "", "This field must be a valid URL")]
    #[case("min", "5", "Minimum length is 5")]
    #[case("max", "100", "Maximum length is 100")]
    #[case("gte", "18", "Value must be at least 18")]
    #[case("gt", "0", "Value must be greater than 0")]
    #[case("len", "4", "Length must be exactly 4")]
    #[case("oneof", "red green blue", "Must be one of: red, green, blue")]
    #[case("eqfield", "Password", "This field must match Password")]
    #[case("gtfield", "start", "Must be greater than start")]
    #[case("alphanum", "", "Only alphanumeric characters are allowed")]
    #[case("not_blank", "", "This field cannot be empty")]
    #[case("contains", "substr", "Must contain 'substr'")]
    #[case("startswith", "prefix", "Must start with 'prefix'")]
    #[case("endswith", "suffix", "Must end with 'suffix'")]
    #[case("custom_tag", "", "Validation failed on 'custom_tag' tag")]
    #[case("custom_tag", "value", "Validation failed on 'custom_tag' tag (param: value)")]
    #[case("", "ignored", "")]
    fn test_message(#[case] tag: &str, #[case] param: &str, #[case] expected: &str) {
        assert_eq!(message(tag, param), expected);
    }

    #[rstest]
    fn test_every_known_tag_has_text(
        #[values(
            "required", "email", "url", "http_url", "gte", "lte", "gt", "lt", "min", "max",
            "len", "eq", "ne", "eqfield", "nefield", "not_blank", "alphanum", "alpha",
            "numeric", "alphanum_with_underscore", "mongodb", "uuid", "oneof", "gtcsfield",
            "gtfield", "ltcsfield", "ltfield", "contains", "startswith", "endswith"
        )]
        tag: &str,
    ) {
        let msg = message(tag, "test");
        assert!(!msg.is_empty());
        assert!(!msg.starts_with("Validation failed on"), "{} fell through to the generic message", tag);
    }
}
