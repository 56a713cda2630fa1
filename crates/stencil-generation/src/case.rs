//! Identifier case transformations
//!
//! Title, camel and snake are the casings exposed to templates as the
//! `capitalize`, `camel` and `snake` helpers. They are implemented as plain
//! character scans so their boundary rules do not depend on a regex engine.
//! The remaining variants are conveniences backed by `heck`.
//!
//! Every transformation is total: any string, including the empty string,
//! maps to a string.

use std::fmt;
use std::str::FromStr;

use heck::{ToKebabCase, ToPascalCase, ToShoutySnakeCase};

/// A case transformation that can be applied to an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// First letter of every word upper-cased, everything else untouched
    Title,
    /// camelCase (e.g., mailAlias)
    Camel,
    /// snake_case (e.g., mail_alias)
    Snake,
    /// PascalCase (e.g., MailAlias)
    Pascal,
    /// kebab-case (e.g., mail-alias)
    Kebab,
    /// SHOUTY_SNAKE_CASE (e.g., MAIL_ALIAS)
    ShoutySnake,
    /// UPPERCASE
    Upper,
    /// lowercase
    Lower,
}

impl Case {
    /// Casings registered in every render context
    pub const CORE: [Case; 3] = [Case::Title, Case::Camel, Case::Snake];

    /// Casings registered only when extended helpers are requested
    pub const EXTENDED: [Case; 5] = [
        Case::Pascal,
        Case::Kebab,
        Case::ShoutySnake,
        Case::Upper,
        Case::Lower,
    ];

    /// Apply the transformation to `input`
    pub fn apply(&self, input: &str) -> String {
        match self {
            Case::Title => to_title_case(input),
            Case::Camel => to_camel_case(input),
            Case::Snake => to_snake_case(input),
            Case::Pascal => input.to_pascal_case(),
            Case::Kebab => input.to_kebab_case(),
            Case::ShoutySnake => input.to_shouty_snake_case(),
            Case::Upper => input.to_uppercase(),
            Case::Lower => input.to_lowercase(),
        }
    }

    /// Name under which this casing is exposed as a template helper
    pub fn helper_name(&self) -> &'static str {
        match self {
            Case::Title => "capitalize",
            Case::Camel => "camel",
            Case::Snake => "snake",
            Case::Pascal => "pascal",
            Case::Kebab => "kebab",
            Case::ShoutySnake => "shouty",
            Case::Upper => "upper",
            Case::Lower => "lower",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.helper_name())
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "capitalize" | "title" => Ok(Case::Title),
            "camel" => Ok(Case::Camel),
            "snake" => Ok(Case::Snake),
            "pascal" => Ok(Case::Pascal),
            "kebab" => Ok(Case::Kebab),
            "shouty" | "shouty_snake" => Ok(Case::ShoutySnake),
            "upper" => Ok(Case::Upper),
            "lower" => Ok(Case::Lower),
            other => Err(format!("Unknown case: {}", other)),
        }
    }
}

/// Upper-case the first character of every word.
///
/// A word starts at the beginning of the string and after every character
/// that is not alphanumeric or `_`. Separators are kept as they are and the
/// rest of each word is not touched.
pub fn to_title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        let is_word = is_word_char(ch);
        if is_word && at_word_start {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        at_word_start = !is_word;
    }

    result
}

/// Convert an identifier to camelCase.
///
/// The first word is lower-cased. A word that follows a separator gets an
/// upper-case first character and a lower-cased remainder. A word that
/// starts at a hump already begins with an upper-case letter and is kept
/// as it is, so camelCase output maps to itself.
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for (index, (word, start)) in segments(input).into_iter().enumerate() {
        if index == 0 {
            result.push_str(&word.to_lowercase());
            continue;
        }

        match start {
            WordStart::Hump => result.push_str(word),
            WordStart::Separator => {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    result.extend(first.to_uppercase());
                    result.push_str(&chars.as_str().to_lowercase());
                }
            }
        }
    }

    result
}

/// Convert an identifier to snake_case.
///
/// Humps gain an underscore, whitespace and hyphen runs collapse into a
/// single underscore, and the result is lower-cased. Underscores already in
/// the input are kept as they are, including repeated ones.
pub fn to_snake_case(input: &str) -> String {
    let trimmed = input.trim();
    let mut result = String::with_capacity(trimmed.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_gap = false;

    for ch in trimmed.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_gap {
                result.push('_');
                in_gap = true;
            }
            prev = Some(ch);
            continue;
        }

        in_gap = false;
        if ch.is_uppercase() && prev.is_some_and(is_hump_lead) {
            result.push('_');
        }
        result.extend(ch.to_lowercase());
        prev = Some(ch);
    }

    result
}

/// Split an identifier into words.
///
/// Words are separated by runs of whitespace, `-` and `_`, and by humps: an
/// upper-case letter that follows any character other than an upper-case
/// letter, or the last upper-case letter of a run when a lower-case letter
/// comes next (`HTTPServer` splits into `HTTP` and `Server`).
pub fn split_words(input: &str) -> Vec<&str> {
    segments(input).into_iter().map(|(word, _)| word).collect()
}

/// How a word was separated from the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordStart {
    Separator,
    Hump,
}

fn segments(input: &str) -> Vec<(&str, WordStart)> {
    let mut words = Vec::new();
    let mut start: Option<(usize, WordStart)> = None;
    let mut prev: Option<char> = None;
    let mut chars = input.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if is_separator(ch) {
            if let Some((begin, kind)) = start.take() {
                words.push((&input[begin..index], kind));
            }
        } else {
            let next = chars.peek().map(|&(_, c)| c);
            match start {
                None => start = Some((index, WordStart::Separator)),
                Some((begin, kind)) if starts_hump(prev, ch, next) => {
                    words.push((&input[begin..index], kind));
                    start = Some((index, WordStart::Hump));
                }
                Some(_) => {}
            }
        }
        prev = Some(ch);
    }

    if let Some((begin, kind)) = start {
        words.push((&input[begin..], kind));
    }

    words
}

fn starts_hump(prev: Option<char>, ch: char, next: Option<char>) -> bool {
    match prev {
        Some(prev) if ch.is_uppercase() => {
            !prev.is_uppercase() || next.is_some_and(char::is_lowercase)
        }
        _ => false,
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '-' || ch == '_'
}

fn is_hump_lead(ch: char) -> bool {
    ch.is_lowercase() || ch.is_numeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_basic() {
        assert_eq!(to_title_case("hello world"), "Hello World");
        assert_eq!(to_title_case(""), "");
        assert_eq!(to_title_case("already Capitalized"), "Already Capitalized");
    }

    #[test]
    fn test_title_case_preserves_interior_casing() {
        assert_eq!(to_title_case("hello wORLD"), "Hello WORLD");
    }

    #[test]
    fn test_title_case_keeps_separators() {
        assert_eq!(to_title_case("outbound-route"), "Outbound-Route");
        assert_eq!(to_title_case("mail_alias"), "Mail_alias");
        assert_eq!(to_title_case("addy mail"), "Addy Mail");
    }

    #[test]
    fn test_title_case_digits_are_word_characters() {
        assert_eq!(to_title_case("v2 api"), "V2 Api");
        assert_eq!(to_title_case("2fast"), "2fast");
        assert_eq!(to_title_case("a.b.c"), "A.B.C");
    }

    #[test]
    fn test_title_case_treats_unicode_letters_as_word_characters() {
        assert_eq!(to_title_case("ärger"), "Ärger");
        assert_eq!(to_title_case("straße-köln"), "Straße-Köln");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        let once = to_title_case("the quick-brown fox");
        assert_eq!(to_title_case(&once), once);
    }

    #[test]
    fn test_camel_case_examples() {
        assert_eq!(to_camel_case("outbound-route"), "outboundRoute");
        assert_eq!(to_camel_case("Inbound_Route"), "inboundRoute");
        assert_eq!(to_camel_case("  mail alias "), "mailAlias");
        assert_eq!(to_camel_case("InboundRoute"), "inboundRoute");
        assert_eq!(to_camel_case("domain"), "domain");
    }

    #[test]
    fn test_camel_case_separator_runs() {
        assert_eq!(to_camel_case("mail__-alias"), "mailAlias");
        assert_eq!(to_camel_case("--leading"), "leading");
    }

    #[test]
    fn test_camel_case_single_word_is_lowered() {
        assert_eq!(to_camel_case("DOMAIN"), "domain");
    }

    #[test]
    fn test_camel_case_lowers_word_remainders() {
        assert_eq!(to_camel_case("mail ALIAS"), "mailAlias");
    }

    #[test]
    fn test_camel_case_keeps_one_letter_words() {
        assert_eq!(to_camel_case("mail a record"), "mailARecord");
        assert_eq!(to_camel_case("mailARecord"), "mailARecord");
        assert_eq!(to_camel_case("a b c"), "aBC");
        assert_eq!(to_camel_case("aBC"), "aBC");
    }

    #[test]
    fn test_camel_case_is_idempotent() {
        for input in [
            "mail a record",
            "x a b",
            "a \u{df}b",
            "HTTPServer",
            "route53 zone",
            "a. b",
            "1 b",
            "mail ALIASes",
        ] {
            let once = to_camel_case(input);
            assert_eq!(to_camel_case(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_camel_case_keeps_hump_words() {
        assert_eq!(to_camel_case("mailHTTPServer"), "mailHTTPServer");
        assert_eq!(to_camel_case("HTTPServer"), "httpServer");
        assert_eq!(to_camel_case("a \u{df}b"), "aSSb");
    }

    #[test]
    fn test_camel_case_empty_and_blank() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("   "), "");
        assert_eq!(to_camel_case("_-_"), "");
    }

    #[test]
    fn test_snake_case_examples() {
        assert_eq!(to_snake_case("InboundRoute"), "inbound_route");
        assert_eq!(to_snake_case("mail_alias"), "mail_alias");
        assert_eq!(to_snake_case("Outbound Route"), "outbound_route");
        assert_eq!(to_snake_case("already_snake_case"), "already_snake_case");
        assert_eq!(to_snake_case("outbound-route"), "outbound_route");
    }

    #[test]
    fn test_snake_case_keeps_underscore_runs() {
        assert_eq!(to_snake_case("mail__Alias"), "mail__alias");
    }

    #[test]
    fn test_snake_case_collapses_mixed_gaps() {
        assert_eq!(to_snake_case("mail - alias"), "mail_alias");
        assert_eq!(to_snake_case("  padded  "), "padded");
    }

    #[test]
    fn test_snake_case_digit_humps() {
        assert_eq!(to_snake_case("route53Zone"), "route53_zone");
    }

    #[test]
    fn test_snake_case_acronyms_are_not_split() {
        assert_eq!(to_snake_case("HTTPServer"), "httpserver");
    }

    #[test]
    fn test_no_letters_pass_through() {
        assert_eq!(to_title_case("123 456"), "123 456");
        assert_eq!(to_camel_case("123 456"), "123456");
        assert_eq!(to_snake_case("123 456"), "123_456");
        assert_eq!(to_snake_case("!!"), "!!");
    }

    #[test]
    fn test_unicode_input_does_not_panic() {
        assert_eq!(to_title_case("ärger über"), "Ärger Über");
        assert_eq!(to_camel_case("grüße welt"), "grüßeWelt");
        assert_eq!(to_snake_case("GrüßeWelt"), "grüße_welt");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("mail_alias"), vec!["mail", "alias"]);
        assert_eq!(split_words("InboundRoute"), vec!["Inbound", "Route"]);
        assert_eq!(split_words(" a-b  c "), vec!["a", "b", "c"]);
        assert_eq!(split_words("mailARecord"), vec!["mail", "A", "Record"]);
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("v2.Beta"), vec!["v2.", "Beta"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_case_apply_dispatch() {
        assert_eq!(Case::Title.apply("hello world"), "Hello World");
        assert_eq!(Case::Camel.apply("mail_alias"), "mailAlias");
        assert_eq!(Case::Snake.apply("MailAlias"), "mail_alias");
        assert_eq!(Case::Pascal.apply("mail_alias"), "MailAlias");
        assert_eq!(Case::Kebab.apply("MailAlias"), "mail-alias");
        assert_eq!(Case::ShoutySnake.apply("mailAlias"), "MAIL_ALIAS");
        assert_eq!(Case::Upper.apply("mail"), "MAIL");
        assert_eq!(Case::Lower.apply("MAIL"), "mail");
    }

    #[test]
    fn test_helper_names_round_trip() {
        for case in Case::CORE.iter().chain(Case::EXTENDED.iter()) {
            assert_eq!(case.helper_name().parse::<Case>().unwrap(), *case);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("title".parse::<Case>().unwrap(), Case::Title);
        assert_eq!(" Camel ".parse::<Case>().unwrap(), Case::Camel);
        assert!("sentence".parse::<Case>().is_err());
    }
}
