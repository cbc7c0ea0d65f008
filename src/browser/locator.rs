use std::fmt;

use serde::{Deserialize, Serialize};

/// How a name / label / text is compared against the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum TextMatch {
    /// Full, case-sensitive match after whitespace normalization
    Exact { value: String },
    /// Case-insensitive substring
    Contains { value: String },
    /// JavaScript regular expression source
    Pattern {
        source: String,
        #[serde(default)]
        ignore_case: bool,
    },
}

impl TextMatch {
    pub fn exact(value: impl Into<String>) -> Self {
        TextMatch::Exact { value: value.into() }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        TextMatch::Contains { value: value.into() }
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        TextMatch::Pattern {
            source: source.into(),
            ignore_case: false,
        }
    }

    pub fn pattern_ci(source: impl Into<String>) -> Self {
        TextMatch::Pattern {
            source: source.into(),
            ignore_case: true,
        }
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact { value } => write!(f, "{}s", quote(value)),
            TextMatch::Contains { value } => write!(f, "{}i", quote(value)),
            TextMatch::Pattern {
                source,
                ignore_case,
            } => write!(f, "/{}/{}", source, if *ignore_case { "i" } else { "" }),
        }
    }
}

/// One way of finding elements, relative to the previous step of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Strategy {
    /// Any selector the automation runtime understands: CSS with its
    /// pseudo-classes, `xpath=...`, `text=...`, `role=...`
    Css { selector: String },
    Role {
        role: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<TextMatch>,
    },
    Label { text: TextMatch },
    Placeholder { text: TextMatch },
    Text { text: TextMatch },
    TestId { id: String },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Css { selector } => write!(f, "{}", selector),
            Strategy::Role { role, name: None } => write!(f, "role={}", role),
            Strategy::Role {
                role,
                name: Some(name),
            } => write!(f, "role={}[name={}]", role, name),
            Strategy::Label { text } => write!(f, "label={}", text),
            Strategy::Placeholder { text } => write!(f, "placeholder={}", text),
            Strategy::Text { text } => write!(f, "text={}", text),
            Strategy::TestId { id } => write!(f, "testid={}", quote(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LocatorStep {
    Find {
        strategy: Strategy,
    },
    Filter {
        #[serde(skip_serializing_if = "Option::is_none")]
        has_text: Option<TextMatch>,
        #[serde(skip_serializing_if = "Option::is_none")]
        has: Option<Locator>,
    },
    /// Negative indices count from the end; -1 is the last match.
    Nth {
        index: i32,
    },
    Visible,
}

impl fmt::Display for LocatorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorStep::Find { strategy } => write!(f, "{}", strategy),
            LocatorStep::Filter { has_text, has } => {
                let mut parts = Vec::new();
                if let Some(text) = has_text {
                    parts.push(format!("has-text={}", text));
                }
                if let Some(inner) = has {
                    parts.push(format!("has=({})", inner));
                }
                write!(f, "{}", parts.join(" "))
            }
            LocatorStep::Nth { index } => write!(f, "nth={}", index),
            LocatorStep::Visible => write!(f, "visible=true"),
        }
    }
}

/// An element query: an ordered chain of resolution steps.
///
/// Locators are plain values. Nothing touches the page until the chain is
/// handed to a [`Page`](crate::browser::page::Page). The `Display` form is
/// the stable key used in logs, failure messages and by
/// [`MockPage`](crate::browser::mock::MockPage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub steps: Vec<LocatorStep>,
}

impl Locator {
    fn from_strategy(strategy: Strategy) -> Self {
        Locator {
            steps: vec![LocatorStep::Find { strategy }],
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::Css {
            selector: selector.into(),
        })
    }

    pub fn xpath(path: impl AsRef<str>) -> Self {
        Self::css(format!("xpath={}", path.as_ref()))
    }

    pub fn role(role: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::Role {
            role: role.into(),
            name: None,
        })
    }

    /// Role with an accessible name (case-insensitive substring, like
    /// Playwright's `getByRole(role, { name })`).
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::role_matching(role, TextMatch::contains(name))
    }

    pub fn role_matching(role: impl Into<String>, name: TextMatch) -> Self {
        Self::from_strategy(Strategy::Role {
            role: role.into(),
            name: Some(name),
        })
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::Label {
            text: TextMatch::contains(text),
        })
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::Placeholder {
            text: TextMatch::contains(text),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::Text {
            text: TextMatch::contains(text),
        })
    }

    pub fn text_exact(text: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::Text {
            text: TextMatch::exact(text),
        })
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Self::from_strategy(Strategy::TestId { id: id.into() })
    }

    fn push(mut self, step: LocatorStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Resolve `child` inside every element matched by `self`.
    pub fn locator(mut self, child: Locator) -> Self {
        self.steps.extend(child.steps);
        self
    }

    pub fn css_within(self, selector: impl Into<String>) -> Self {
        self.locator(Locator::css(selector))
    }

    pub fn has_text(self, text: impl Into<String>) -> Self {
        self.filter_text(TextMatch::contains(text))
    }

    pub fn filter_text(self, text: TextMatch) -> Self {
        self.push(LocatorStep::Filter {
            has_text: Some(text),
            has: None,
        })
    }

    pub fn has(self, inner: Locator) -> Self {
        self.push(LocatorStep::Filter {
            has_text: None,
            has: Some(inner),
        })
    }

    pub fn nth(self, index: i32) -> Self {
        self.push(LocatorStep::Nth { index })
    }

    pub fn first(self) -> Self {
        self.nth(0)
    }

    pub fn last(self) -> Self {
        self.nth(-1)
    }

    pub fn visible(self) -> Self {
        self.push(LocatorStep::Visible)
    }

    pub fn expression(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.steps.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join(" >> "))
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Locator::css(selector)
    }
}

/// Double-quote a string the way selector engines expect.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// XPath string literal for `s`. XPath has no escapes, so a value holding
/// both quote kinds is spelled with `concat()`.
pub fn xpath_literal(s: &str) -> String {
    if !s.contains('"') {
        return format!("\"{}\"", s);
    }
    if !s.contains('\'') {
        return format!("'{}'", s);
    }
    let parts: Vec<String> = s.split('"').map(|part| format!("\"{}\"", part)).collect();
    format!("concat({})", parts.join(", '\"', "))
}
