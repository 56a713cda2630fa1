//! Template syntax parser
//!
//! Parses the Mustache subset understood by the engine:
//! - Variables: `{{name}}`, `{{a.b}}`, `{{.}}`
//! - Unescaped variables: `{{{name}}}` and `{{& name}}`
//! - Sections: `{{#name}}...{{/name}}`
//! - Inverted sections: `{{^name}}...{{/name}}`
//! - Comments: `{{! ... }}`
//!
//! Section, inverted, closing and comment tags that sit alone on a line
//! ("standalone" tags) remove that whole line from the output.

use std::collections::HashSet;

use tracing::debug;

use crate::templates::error::TemplateError;

/// Represents a parsed template element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    /// Plain text content
    Text(String),
    /// Interpolated value
    Variable {
        /// Name (possibly dotted) to resolve
        name: String,
        /// Whether the value is escaped on output
        escaped: bool,
    },
    /// Section block: `{{#name}}...{{/name}}` or `{{^name}}...{{/name}}`
    Section {
        /// Name (possibly dotted) to resolve
        name: String,
        /// Whether this is an inverted section
        inverted: bool,
        /// Parsed content of the section
        children: Vec<TemplateElement>,
        /// Source text between the opening and closing tags
        raw: String,
    },
}

/// Parsed template structure
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// Template elements
    pub elements: Vec<TemplateElement>,
    /// Names used by variable tags
    pub variable_names: HashSet<String>,
    /// Names used by section and inverted section tags
    pub section_names: HashSet<String>,
}

/// Template parser
pub struct TemplateParser;

impl TemplateParser {
    /// Parse template content and extract structure
    ///
    /// # Returns
    /// Parsed template structure or an error with the offending line number
    pub fn parse(content: &str) -> Result<ParsedTemplate, TemplateError> {
        let tokens = Scanner::new(content).tokenize()?;
        let tokens = strip_standalone(tokens);
        let parsed = build_tree(tokens, content)?;
        debug!(
            elements = parsed.elements.len(),
            sections = parsed.section_names.len(),
            "Parsed template"
        );
        Ok(parsed)
    }

    /// Extract all names referenced by the template
    pub fn extract_names(content: &str) -> Result<Vec<String>, TemplateError> {
        let parsed = Self::parse(content)?;
        let mut names: Vec<String> = parsed
            .variable_names
            .union(&parsed.section_names)
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    /// Detect if template has sections
    pub fn has_sections(content: &str) -> Result<bool, TemplateError> {
        Ok(!Self::parse(content)?.section_names.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Variable,
    Unescaped,
    Section,
    Inverted,
    Close,
    Comment,
}

impl TagKind {
    fn can_stand_alone(self) -> bool {
        matches!(
            self,
            TagKind::Section | TagKind::Inverted | TagKind::Close | TagKind::Comment
        )
    }
}

#[derive(Debug)]
enum Token {
    /// Text never spans a line break; a trailing `\n` ends its line
    Text(String),
    Tag {
        kind: TagKind,
        name: String,
        line: usize,
        start: usize,
        end: usize,
    },
}

impl Token {
    fn ends_line(&self) -> bool {
        matches!(self, Token::Text(text) if text.ends_with('\n'))
    }
}

struct Scanner<'a> {
    source: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, TemplateError> {
        let mut tokens = Vec::new();

        while self.position < self.source.len() {
            let rest = &self.source[self.position..];
            if rest.starts_with("{{") {
                tokens.push(self.read_tag()?);
            } else {
                tokens.push(self.read_text());
            }
        }

        Ok(tokens)
    }

    fn read_text(&mut self) -> Token {
        let rest = &self.source[self.position..];
        let tag_start = rest.find("{{").unwrap_or(rest.len());
        let end = match rest[..tag_start].find('\n') {
            Some(newline) => {
                self.line += 1;
                newline + 1
            }
            None => tag_start,
        };

        self.position += end;
        Token::Text(rest[..end].to_string())
    }

    fn read_tag(&mut self) -> Result<Token, TemplateError> {
        let start = self.position;
        let line = self.line;
        let inner_start = start + 2;
        let rest = &self.source[inner_start..];

        let (kind, name, end) = if let Some(body) = rest.strip_prefix('{') {
            let close = body
                .find("}}}")
                .ok_or_else(|| TemplateError::syntax(line, "Unterminated tag, expected '}}}'"))?;
            (TagKind::Unescaped, body[..close].trim(), inner_start + 1 + close + 3)
        } else {
            let close = rest
                .find("}}")
                .ok_or_else(|| TemplateError::syntax(line, "Unterminated tag, expected '}}'"))?;
            let body = &rest[..close];
            let end = inner_start + close + 2;
            match body.chars().next() {
                Some('#') => (TagKind::Section, body[1..].trim(), end),
                Some('^') => (TagKind::Inverted, body[1..].trim(), end),
                Some('/') => (TagKind::Close, body[1..].trim(), end),
                Some('&') => (TagKind::Unescaped, body[1..].trim(), end),
                Some('!') => (TagKind::Comment, "", end),
                Some('>') => {
                    return Err(TemplateError::syntax(line, "Partials are not supported"));
                }
                Some('=') => {
                    return Err(TemplateError::syntax(
                        line,
                        "Delimiter changes are not supported",
                    ));
                }
                _ => (TagKind::Variable, body.trim(), end),
            }
        };

        if name.is_empty() && kind != TagKind::Comment {
            return Err(TemplateError::syntax(line, "Empty tag name"));
        }

        self.line += self.source[start..end].matches('\n').count();
        self.position = end;

        Ok(Token::Tag {
            kind,
            name: name.to_string(),
            line,
            start,
            end,
        })
    }
}

/// Drop the indentation and line break around standalone tags
fn strip_standalone(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut line = Vec::new();

    for token in tokens {
        let ends_line = token.ends_line();
        line.push(token);
        if ends_line {
            flush_line(&mut line, &mut result);
        }
    }
    flush_line(&mut line, &mut result);

    result
}

fn flush_line(line: &mut Vec<Token>, result: &mut Vec<Token>) {
    let tag_count = line
        .iter()
        .filter(|token| matches!(token, Token::Tag { .. }))
        .count();
    let standalone = tag_count == 1
        && line.iter().all(|token| match token {
            Token::Tag { kind, .. } => kind.can_stand_alone(),
            Token::Text(text) => text.chars().all(|ch| matches!(ch, ' ' | '\t' | '\r' | '\n')),
        });

    if standalone {
        result.extend(
            line.drain(..)
                .filter(|token| matches!(token, Token::Tag { .. })),
        );
    } else {
        result.append(line);
    }
}

struct OpenSection {
    name: String,
    inverted: bool,
    line: usize,
    content_start: usize,
    parent: Vec<TemplateElement>,
}

fn build_tree(tokens: Vec<Token>, source: &str) -> Result<ParsedTemplate, TemplateError> {
    let mut open: Vec<OpenSection> = Vec::new();
    let mut elements: Vec<TemplateElement> = Vec::new();
    let mut variable_names = HashSet::new();
    let mut section_names = HashSet::new();

    for token in tokens {
        match token {
            Token::Text(text) => push_text(&mut elements, &text),
            Token::Tag {
                kind,
                name,
                line,
                start,
                end,
            } => match kind {
                TagKind::Variable | TagKind::Unescaped => {
                    variable_names.insert(name.clone());
                    elements.push(TemplateElement::Variable {
                        name,
                        escaped: kind == TagKind::Variable,
                    });
                }
                TagKind::Comment => {}
                TagKind::Section | TagKind::Inverted => {
                    section_names.insert(name.clone());
                    open.push(OpenSection {
                        name,
                        inverted: kind == TagKind::Inverted,
                        line,
                        content_start: end,
                        parent: std::mem::take(&mut elements),
                    });
                }
                TagKind::Close => {
                    let section = open.pop().ok_or_else(|| {
                        TemplateError::syntax(line, format!("Unexpected closing tag {{{{/{}}}}}", name))
                    })?;
                    if section.name != name {
                        return Err(TemplateError::syntax(
                            line,
                            format!(
                                "Mismatched closing tag: expected {{{{/{}}}}}, found {{{{/{}}}}}",
                                section.name, name
                            ),
                        ));
                    }

                    let children = std::mem::replace(&mut elements, section.parent);
                    elements.push(TemplateElement::Section {
                        name,
                        inverted: section.inverted,
                        children,
                        raw: source[section.content_start..start].to_string(),
                    });
                }
            },
        }
    }

    if let Some(section) = open.pop() {
        return Err(TemplateError::syntax(
            section.line,
            format!("Unclosed section {{{{#{}}}}}", section.name),
        ));
    }

    Ok(ParsedTemplate {
        elements,
        variable_names,
        section_names,
    })
}

fn push_text(elements: &mut Vec<TemplateElement>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(TemplateElement::Text(existing)) = elements.last_mut() {
        existing.push_str(text);
    } else {
        elements.push(TemplateElement::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> TemplateElement {
        TemplateElement::Text(value.to_string())
    }

    fn var(name: &str) -> TemplateElement {
        TemplateElement::Variable {
            name: name.to_string(),
            escaped: true,
        }
    }

    #[test]
    fn test_parse_simple_variable() {
        let result = TemplateParser::parse("Hello {{name}}").unwrap();
        assert_eq!(result.elements, vec![text("Hello "), var("name")]);
        assert!(result.variable_names.contains("name"));
    }

    #[test]
    fn test_parse_trims_tag_names() {
        let result = TemplateParser::parse("{{ owner }}").unwrap();
        assert_eq!(result.elements, vec![var("owner")]);
    }

    #[test]
    fn test_parse_unescaped_forms() {
        let result = TemplateParser::parse("{{{a}}}{{& b}}").unwrap();
        assert_eq!(
            result.elements,
            vec![
                TemplateElement::Variable { name: "a".into(), escaped: false },
                TemplateElement::Variable { name: "b".into(), escaped: false },
            ]
        );
    }

    #[test]
    fn test_parse_section_keeps_raw_text() {
        let result = TemplateParser::parse("{{#camel}}{{.}} x{{/camel}}").unwrap();
        match &result.elements[0] {
            TemplateElement::Section { name, inverted, children, raw } => {
                assert_eq!(name, "camel");
                assert!(!inverted);
                assert_eq!(raw, "{{.}} x");
                assert_eq!(children, &vec![var("."), text(" x")]);
            }
            other => panic!("expected section, found {:?}", other),
        }
        assert!(result.section_names.contains("camel"));
    }

    #[test]
    fn test_parse_nested_sections() {
        let template = "{{#provider.resources}}{{#snake}}{{.}}{{/snake}}{{/provider.resources}}";
        let result = TemplateParser::parse(template).unwrap();
        match &result.elements[0] {
            TemplateElement::Section { name, children, raw, .. } => {
                assert_eq!(name, "provider.resources");
                assert_eq!(raw, "{{#snake}}{{.}}{{/snake}}");
                assert!(matches!(&children[0], TemplateElement::Section { name, .. } if name == "snake"));
            }
            other => panic!("expected section, found {:?}", other),
        }
    }

    #[test]
    fn test_parse_inverted_section() {
        let result = TemplateParser::parse("{{^items}}none{{/items}}").unwrap();
        assert!(matches!(
            &result.elements[0],
            TemplateElement::Section { inverted: true, .. }
        ));
    }

    #[test]
    fn test_comments_are_dropped() {
        let result = TemplateParser::parse("a{{! note }}b").unwrap();
        assert_eq!(result.elements, vec![text("ab")]);
    }

    #[test]
    fn test_standalone_lines_are_removed() {
        let template = "start\n  {{#items}}\n- {{.}}\n  {{/items}}\nend\n";
        let result = TemplateParser::parse(template).unwrap();
        match &result.elements[..] {
            [TemplateElement::Text(before), TemplateElement::Section { children, raw, .. }, TemplateElement::Text(after)] =>
            {
                assert_eq!(before, "start\n");
                assert_eq!(children, &vec![text("- "), var("."), text("\n")]);
                assert_eq!(raw, "\n- {{.}}\n  ");
                assert_eq!(after, "end\n");
            }
            other => panic!("unexpected elements {:?}", other),
        }
    }

    #[test]
    fn test_inline_sections_keep_whitespace() {
        let result = TemplateParser::parse(" {{#a}}x{{/a}} \n").unwrap();
        assert_eq!(result.elements.first(), Some(&text(" ")));
        assert_eq!(result.elements.last(), Some(&text(" \n")));
    }

    #[test]
    fn test_unclosed_tag_error() {
        let result = TemplateParser::parse("Hello {{name");
        assert!(matches!(result, Err(TemplateError::InvalidSyntax { line: 1, .. })));
    }

    #[test]
    fn test_unclosed_section_reports_opening_line() {
        let result = TemplateParser::parse("a\nb\n{{#items}}\ncontent");
        assert!(matches!(result, Err(TemplateError::InvalidSyntax { line: 3, .. })));
    }

    #[test]
    fn test_mismatched_close_error() {
        let result = TemplateParser::parse("{{#a}}{{/b}}");
        assert!(matches!(result, Err(TemplateError::InvalidSyntax { .. })));
    }

    #[test]
    fn test_unexpected_close_error() {
        let result = TemplateParser::parse("x\n{{/a}}");
        assert!(matches!(result, Err(TemplateError::InvalidSyntax { line: 2, .. })));
    }

    #[test]
    fn test_partials_and_delimiters_rejected() {
        assert!(TemplateParser::parse("{{> header}}").is_err());
        assert!(TemplateParser::parse("{{=<% %>=}}").is_err());
    }

    #[test]
    fn test_empty_tag_rejected() {
        assert!(TemplateParser::parse("{{ }}").is_err());
        assert!(TemplateParser::parse("{{#}}{{/}}").is_err());
    }

    #[test]
    fn test_extract_names() {
        let names = TemplateParser::extract_names("{{#a}}{{b}}{{/a}}{{c}}").unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_has_sections() {
        assert!(TemplateParser::has_sections("{{#a}}{{/a}}").unwrap());
        assert!(!TemplateParser::has_sections("{{a}}").unwrap());
    }
}
