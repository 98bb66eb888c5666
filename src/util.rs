pub fn format_multiline(text: &str) -> String {
    let text = text.trim_end();

    if text.find('\n').is_some() {
        format!("\n{text}")
    } else {
        format!(" {text}")
    }
}

// Like `format!("{message}.")`, but doesn't add the period when it would look odd
pub fn format_sentence(message: &str) -> String {
    if message.contains('\n') || message.ends_with('.') {
        message.to_owned()
    } else {
        format!("{message}.")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest(text, expected,
        case("fatal: repository not found\n", " fatal: repository not found"),
        case("first\nsecond\n", "\nfirst\nsecond"),
    )]
    fn multiline(text: &str, expected: &str) {
        assert_eq!(format_multiline(text), expected);
    }

    #[rstest(message, expected,
        case("Config is missing required fields", "Config is missing required fields."),
        case("Already punctuated.", "Already punctuated."),
        case("Failed:\n{}", "Failed:\n{}"),
    )]
    fn sentence(message: &str, expected: &str) {
        assert_eq!(format_sentence(message), expected);
    }
}
