use std::str::FromStr;

use strum::{Display, EnumString, VariantNames};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unclosed placeholder brace")]
    UnclosedPlaceholder,
    #[error("template must contain {{index}} so output names stay distinct")]
    MissingIndex,
}

/// Values a template can substitute into an output name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum Placeholder {
    /// 1-based ordinal of the clip, zero-padded to two digits
    Index,
    /// The entry's label, sanitized for filesystem use
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Output file name template with `{index}` and `{label}` placeholders.
///
/// Placeholders are validated when the template is parsed: an unknown or
/// unclosed placeholder is an error, and `{index}` is required since the
/// ordinal is what guarantees pairwise-distinct names even when labels
/// repeat. Labels are sanitized during rendering, never verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    segments: Vec<Segment>,
}

impl NameTemplate {
    pub const DEFAULT: &'static str = "{index} - {label}.mp4";

    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => name.push(c),
                    None => return Err(TemplateError::UnclosedPlaceholder),
                }
            }

            let placeholder = Placeholder::from_str(&name)
                .map_err(|_| TemplateError::UnknownPlaceholder(name))?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(placeholder));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let has_index = segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(Placeholder::Index)));
        if !has_index {
            return Err(TemplateError::MissingIndex);
        }

        Ok(Self { segments })
    }

    pub fn render(&self, index: usize, label: &str) -> String {
        let mut name = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => name.push_str(text),
                Segment::Placeholder(Placeholder::Index) => {
                    name.push_str(&format!("{index:02}"));
                }
                Segment::Placeholder(Placeholder::Label) => {
                    name.push_str(&sanitize_label(label));
                }
            }
        }
        name
    }
}

impl Default for NameTemplate {
    fn default() -> Self {
        // The default pattern is statically valid.
        Self::parse(Self::DEFAULT).unwrap()
    }
}

impl FromStr for NameTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Replace characters that are illegal or hazardous in file names.
///
/// Labels come verbatim from the timestamp file and end up in paths, so path
/// separators, Windows-reserved punctuation and control characters all become
/// underscores.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_matches_the_classic_pattern() {
        let template = NameTemplate::default();
        assert_eq!(template.render(1, "Intro"), "01 - Intro.mp4");
        assert_eq!(template.render(12, "Outro"), "12 - Outro.mp4");
    }

    #[test]
    fn large_indices_render_unpadded() {
        assert_eq!(NameTemplate::default().render(100, "x"), "100 - x.mp4");
    }

    #[test]
    fn labels_are_sanitized_in_rendered_names() {
        let template = NameTemplate::default();
        let name = template.render(3, "AC/DC: Live");
        assert!(!name.contains('/'));
        assert!(!name.contains(':'));
        assert_eq!(name, "03 - AC_DC_ Live.mp4");
    }

    #[test]
    fn sanitize_replaces_separators_and_controls() {
        assert_eq!(sanitize_label("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_label("tab\there"), "tab_here");
        assert_eq!(sanitize_label("plain"), "plain");
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        assert_eq!(
            NameTemplate::parse("{index}-{title}.mp4"),
            Err(TemplateError::UnknownPlaceholder("title".into()))
        );
    }

    #[test]
    fn unclosed_placeholder_is_rejected() {
        assert_eq!(
            NameTemplate::parse("{index} - {label"),
            Err(TemplateError::UnclosedPlaceholder)
        );
    }

    #[test]
    fn index_placeholder_is_required() {
        assert_eq!(
            NameTemplate::parse("{label}.mp4"),
            Err(TemplateError::MissingIndex)
        );
    }

    #[test]
    fn label_is_optional() {
        let template = NameTemplate::parse("clip_{index}.mkv").unwrap();
        assert_eq!(template.render(7, "ignored"), "clip_07.mkv");
    }
}
