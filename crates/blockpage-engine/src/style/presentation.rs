//! Token -> presentation lookup.
//!
//! One table for every renderer. A token value maps to a fixed class list
//! regardless of the other tokens in the descriptor.

use serde::Serialize;
use std::collections::HashMap;

use super::StyleDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Padding,
    Width,
    Background,
    Radius,
    Border,
    Align,
}

const STANDARD: &[(Token, &str, &str)] = &[
    (Token::Padding, "none", "py-0"),
    (Token::Padding, "sm", "py-4"),
    (Token::Padding, "md", "py-8"),
    (Token::Padding, "lg", "py-12"),
    // centered, narrow container
    (Token::Width, "content", "mx-auto max-w-2xl"),
    // full bleed
    (Token::Width, "full", "w-full"),
    (Token::Background, "none", "bg-transparent"),
    (Token::Background, "muted", "bg-muted"),
    (Token::Background, "card", "bg-card shadow-sm"),
    (Token::Background, "accent", "bg-accent text-accent-foreground"),
    (Token::Radius, "none", "rounded-none"),
    (Token::Radius, "sm", "rounded-sm"),
    (Token::Radius, "md", "rounded-md"),
    (Token::Radius, "lg", "rounded-lg"),
    (Token::Radius, "xl", "rounded-xl"),
    (Token::Radius, "2xl", "rounded-2xl"),
    (Token::Border, "none", "border-0"),
    (Token::Border, "subtle", "border border-border/50"),
    (Token::Border, "strong", "border-2 border-border"),
    (Token::Align, "left", "text-left"),
    (Token::Align, "center", "text-center"),
    (Token::Align, "right", "text-right"),
];

/// Presentation classes for one resolved descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConcreteStyle {
    pub padding: String,
    pub width: String,
    pub background: String,
    pub radius: String,
    pub border: String,
    pub align: String,
}

impl ConcreteStyle {
    /// All classes in token order, optionally prefixed with a breakpoint
    pub fn classes(&self, breakpoint: Option<&str>) -> Vec<String> {
        [
            &self.padding,
            &self.width,
            &self.background,
            &self.radius,
            &self.border,
            &self.align,
        ]
        .into_iter()
        .flat_map(|value| value.split_whitespace())
        .map(|class| match breakpoint {
            Some(prefix) => format!("{prefix}:{class}"),
            None => class.to_string(),
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationTable {
    entries: HashMap<(Token, String), String>,
    /// Breakpoint prefix for the wide descriptor
    wide_breakpoint: String,
}

impl Default for PresentationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PresentationTable {
    pub fn standard() -> Self {
        let entries = STANDARD
            .iter()
            .map(|(token, keyword, value)| ((*token, keyword.to_string()), value.to_string()))
            .collect();
        Self {
            entries,
            wide_breakpoint: "md".to_string(),
        }
    }

    /// Replace the presentation of one token value, e.g. for a theme
    pub fn set(&mut self, token: Token, keyword: &str, value: impl Into<String>) {
        self.entries.insert((token, keyword.to_string()), value.into());
    }

    pub fn with_wide_breakpoint(mut self, breakpoint: impl Into<String>) -> Self {
        self.wide_breakpoint = breakpoint.into();
        self
    }

    pub fn wide_breakpoint(&self) -> &str {
        &self.wide_breakpoint
    }

    /// Presentation of a token value; empty when the table has no entry
    pub fn lookup(&self, token: Token, keyword: &str) -> &str {
        self.entries
            .get(&(token, keyword.to_string()))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn concrete(&self, descriptor: &StyleDescriptor) -> ConcreteStyle {
        ConcreteStyle {
            padding: self.lookup(Token::Padding, descriptor.padding.as_str()).to_string(),
            width: self.lookup(Token::Width, descriptor.width.as_str()).to_string(),
            background: self
                .lookup(Token::Background, descriptor.background.as_str())
                .to_string(),
            radius: self.lookup(Token::Radius, descriptor.radius.as_str()).to_string(),
            border: self.lookup(Token::Border, descriptor.border.as_str()).to_string(),
            align: self.lookup(Token::Align, descriptor.align.as_str()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Padding, Width};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_token_value_has_an_entry() {
        let table = PresentationTable::standard();
        let cases: Vec<(Token, Vec<&str>)> = vec![
            (Token::Padding, Padding::ALL.iter().map(|v| v.as_str()).collect()),
            (Token::Width, Width::ALL.iter().map(|v| v.as_str()).collect()),
            (
                Token::Background,
                crate::tokens::Background::ALL.iter().map(|v| v.as_str()).collect(),
            ),
            (
                Token::Radius,
                crate::tokens::Radius::ALL.iter().map(|v| v.as_str()).collect(),
            ),
            (
                Token::Border,
                crate::tokens::Border::ALL.iter().map(|v| v.as_str()).collect(),
            ),
            (
                Token::Align,
                crate::tokens::Align::ALL.iter().map(|v| v.as_str()).collect(),
            ),
        ];
        for (token, keywords) in cases {
            for keyword in keywords {
                assert!(
                    !table.lookup(token, keyword).is_empty(),
                    "missing presentation for {token:?}={keyword}"
                );
            }
        }
    }

    #[test]
    fn test_width_mapping_does_not_depend_on_other_tokens() {
        let table = PresentationTable::standard();
        let narrow = StyleDescriptor {
            width: Width::Content,
            ..StyleDescriptor::default()
        };
        let padded = StyleDescriptor {
            width: Width::Content,
            padding: Padding::Lg,
            ..StyleDescriptor::default()
        };
        assert_eq!(table.concrete(&narrow).width, "mx-auto max-w-2xl");
        assert_eq!(table.concrete(&narrow).width, table.concrete(&padded).width);
    }

    #[test]
    fn test_classes_with_breakpoint_prefix() {
        let concrete = PresentationTable::standard().concrete(&StyleDescriptor::default());
        let classes = concrete.classes(Some("md"));
        assert_eq!(
            classes,
            vec![
                "md:py-0",
                "md:w-full",
                "md:bg-transparent",
                "md:rounded-2xl",
                "md:border",
                "md:border-border/50",
                "md:text-left",
            ]
        );
    }

    #[test]
    fn test_overrides_replace_single_entries() {
        let mut table = PresentationTable::standard();
        table.set(Token::Background, "accent", "bg-brand");
        assert_eq!(table.lookup(Token::Background, "accent"), "bg-brand");
        assert_eq!(table.lookup(Token::Background, "muted"), "bg-muted");
        assert_eq!(table.lookup(Token::Background, "neon"), "");
    }
}
