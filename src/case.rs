//! Identifier case conversion used to derive environment variable names.

/// Convert an identifier to `SCREAMING_SNAKE_CASE`.
///
/// `-` becomes `_`, letters are upper-cased and every other character
/// passes through. A `_` is inserted where a new word starts: after a
/// lowercase letter (`helloWorld`), and before a capitalized word that
/// follows a digit or an acronym (`Hello1World`, `HELLOWorld`). Existing
/// separators are never doubled and digits stay attached to the word before
/// them. Word boundaries are only detected between ASCII characters.
///
/// The output contains no ASCII lowercase letters, so converting it again
/// returns it unchanged.
pub fn screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + ident.len() / 4);
    let mut chars = ident.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(p) = prev
            && starts_word(p, c, chars.peek().copied())
        {
            out.push('_');
        }
        if c == '-' {
            out.push('_');
        } else {
            out.extend(c.to_uppercase());
        }
        prev = Some(c);
    }

    out
}

fn starts_word(prev: char, cur: char, next: Option<char>) -> bool {
    if !cur.is_ascii_uppercase() {
        return false;
    }
    let capitalized = next.is_some_and(|n| n.is_ascii_lowercase());
    prev.is_ascii_lowercase()
        || (capitalized && (prev.is_ascii_digit() || prev.is_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn conversion_table() {
        let cases = [
            ("", ""),
            ("A", "A"),
            ("HelloWorld", "HELLO_WORLD"),
            ("HELLOWorld", "HELLO_WORLD"),
            ("Hello1World2", "HELLO1_WORLD2"),
            ("123_", "123_"),
            ("_", "_"),
            ("___", "___"),
            ("HELLO_WORLD", "HELLO_WORLD"),
            ("HelloWORLD", "HELLO_WORLD"),
            ("test_P_x", "TEST_P_X"),
            ("__hello_world__", "__HELLO_WORLD__"),
            ("__Hello_World__", "__HELLO_WORLD__"),
            ("__Hello__World__", "__HELLO__WORLD__"),
            ("hello-world", "HELLO_WORLD"),
        ];
        for (input, want) in cases {
            assert_eq!(screaming_snake(input), want, "input {input:?}");
        }
    }

    #[test]
    fn option_paths() {
        assert_eq!(screaming_snake("cmd_SubConfig-String"), "CMD_SUB_CONFIG_STRING");
        assert_eq!(screaming_snake("cmd_Float64"), "CMD_FLOAT64");
        assert_eq!(
            screaming_snake("cmd_sub-config-custom-name-xxx-String"),
            "CMD_SUB_CONFIG_CUSTOM_NAME_XXX_STRING"
        );
        assert_eq!(
            screaming_snake("example_ClientConfig-go-fast"),
            "EXAMPLE_CLIENT_CONFIG_GO_FAST"
        );
        assert_eq!(screaming_snake("app_database-pool_size"), "APP_DATABASE_POOL_SIZE");
    }

    #[test]
    fn digit_then_capital_without_lowercase_stays_joined() {
        assert_eq!(screaming_snake("a1b"), "A1B");
        assert_eq!(screaming_snake("A1B"), "A1B");
        assert_eq!(screaming_snake("Int64Value"), "INT64_VALUE");
    }

    #[test]
    fn non_ascii_letters_are_uppercased() {
        assert_eq!(screaming_snake("café-au-lait"), "CAFÉ_AU_LAIT");
        assert_eq!(screaming_snake("größe"), "GRÖSSE");
        assert_eq!(screaming_snake("日本-x"), "日本_X");
    }

    proptest! {
        #[test]
        fn conversion_is_idempotent(s in "[A-Za-z0-9_éÉöß日-]{0,24}") {
            let once = screaming_snake(&s);
            prop_assert_eq!(screaming_snake(&once), once);
        }

        #[test]
        fn output_has_no_lowercase_or_hyphen(s in "[A-Za-z0-9_-]{0,24}") {
            let out = screaming_snake(&s);
            prop_assert!(!out.chars().any(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }
}
