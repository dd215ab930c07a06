// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed token validators for command parameters.
//!
//! A [`ParamType`] validates a single whitespace-delimited token against a
//! declared method: an anchored regex, a bounded integer, a fixed selection
//! of `name(value)` items, a regex-backed selection with short-form
//! expansion (`eth0` becomes `Ethernet0`), or deferred (`code`) validation.

use std::fmt;

use regex::Regex;

/// Case folding applied to a token before method dispatch.
///
/// `Mode` folds nothing; it only switches a regexp-select type onto its
/// alternate pattern and item list when the caller asks for alternate
/// naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preprocess {
    #[default]
    None,
    ToUpper,
    ToLower,
    Mode,
}

/// Presentation chosen for a harvested help candidate of a select family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpStyle {
    /// One row per item name.
    #[default]
    Name,
    /// A single `<value>` sample row.
    Value,
    /// An `<a/b/c>` enumeration row.
    Range,
}

/// Discriminant of [`ParamType`] validation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Regexp,
    Integer,
    UnsignedInteger,
    Select,
    Code,
    RegexpSelect,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MethodKind::Regexp => "regexp",
            MethodKind::Integer => "integer",
            MethodKind::UnsignedInteger => "unsignedInteger",
            MethodKind::Select => "select",
            MethodKind::Code => "code",
            MethodKind::RegexpSelect => "regexp-select",
        };
        f.write_str(name)
    }
}

/// One `name(value)` entry of a select or regexp-select item list.
///
/// The value half defaults to the name when the parentheses are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub name: String,
    value: Option<String>,
}

impl SelectItem {
    /// Parse a single `name(value)` word.
    pub fn parse(word: &str) -> Self {
        match word.split_once('(') {
            Some((name, rest)) => {
                let value = rest.strip_suffix(')').unwrap_or(rest);
                Self {
                    name: name.to_string(),
                    value: Some(value.to_string()),
                }
            }
            None => Self {
                name: word.to_string(),
                value: None,
            },
        }
    }

    /// Parse a whitespace-separated `name(value)` list.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split_whitespace().map(Self::parse).collect()
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.name)
    }
}

/// Per-method data of a [`ParamType`].
#[derive(Debug, Clone)]
pub enum TypeMethod {
    Regexp {
        re: Regex,
    },
    Integer {
        min: i64,
        max: i64,
    },
    UnsignedInteger {
        min: u64,
        max: u64,
    },
    Select {
        items: Vec<SelectItem>,
        ext_help: Vec<String>,
    },
    Code,
    RegexpSelect {
        re: Regex,
        alt_re: Option<Regex>,
        items: Vec<SelectItem>,
        alt_items: Vec<SelectItem>,
        ext_help: Vec<String>,
    },
}

/// A named, typed validator for a single token.
#[derive(Debug, Clone)]
pub struct ParamType {
    name: String,
    text: Option<String>,
    method: TypeMethod,
    preprocess: Preprocess,
    range: Option<String>,
}

impl ParamType {
    pub fn new(
        name: impl Into<String>,
        text: Option<String>,
        method: TypeMethod,
        preprocess: Preprocess,
    ) -> Self {
        let mut this = Self {
            name: name.into(),
            text,
            method,
            preprocess,
            range: None,
        };
        this.range = this.build_range();
        this
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable text, falling back to the type name.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> MethodKind {
        match self.method {
            TypeMethod::Regexp { .. } => MethodKind::Regexp,
            TypeMethod::Integer { .. } => MethodKind::Integer,
            TypeMethod::UnsignedInteger { .. } => MethodKind::UnsignedInteger,
            TypeMethod::Select { .. } => MethodKind::Select,
            TypeMethod::Code => MethodKind::Code,
            TypeMethod::RegexpSelect { .. } => MethodKind::RegexpSelect,
        }
    }

    pub fn preprocess(&self) -> Preprocess {
        self.preprocess
    }

    /// The rendered value range: `min..max` for integers, `a/b/c` for
    /// select families, absent otherwise.
    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    fn build_range(&self) -> Option<String> {
        match &self.method {
            TypeMethod::Integer { min, max } => Some(format!("{min}..{max}")),
            TypeMethod::UnsignedInteger { min, max } => Some(format!("{min}..{max}")),
            TypeMethod::Select { items, .. } => Some(join_names(items)),
            TypeMethod::RegexpSelect { items, .. } if !items.is_empty() => {
                Some(join_names(items))
            }
            _ => None,
        }
    }

    /// Item list of a select family. Regexp-select switches to the
    /// alternate list when `use_alt` is set and the type preprocesses in
    /// `Mode`. Empty for non-select methods.
    pub fn items(&self, use_alt: bool) -> &[SelectItem] {
        match &self.method {
            TypeMethod::Select { items, .. } => items,
            TypeMethod::RegexpSelect {
                items, alt_items, ..
            } => {
                if use_alt && self.preprocess == Preprocess::Mode && !alt_items.is_empty() {
                    alt_items
                } else {
                    items
                }
            }
            _ => &[],
        }
    }

    /// Extended per-item help, aligned by index with [`Self::items`].
    pub fn ext_help(&self, index: usize) -> Option<&str> {
        let list = match &self.method {
            TypeMethod::Select { ext_help, .. } => ext_help,
            TypeMethod::RegexpSelect { ext_help, .. } => ext_help,
            _ => return None,
        };
        list.get(index).map(String::as_str)
    }

    pub fn has_ext_help(&self) -> bool {
        match &self.method {
            TypeMethod::Select { ext_help, .. } => !ext_help.is_empty(),
            TypeMethod::RegexpSelect { ext_help, .. } => !ext_help.is_empty(),
            _ => false,
        }
    }

    fn fold(&self, token: &str) -> String {
        match self.preprocess {
            Preprocess::ToUpper => token.to_uppercase(),
            Preprocess::ToLower => token.to_lowercase(),
            Preprocess::None | Preprocess::Mode => token.to_string(),
        }
    }

    /// Validate a token, producing its canonical form.
    ///
    /// Select methods canonicalise to the matching item name;
    /// regexp-select additionally expands short forms (`eth0` to
    /// `Ethernet0`). Returns `None` when the token does not belong to the
    /// type.
    pub fn validate(&self, token: &str, use_alt: bool) -> Option<String> {
        self.convert(token, false, use_alt)
    }

    /// Validate and substitute: select methods yield the item's declared
    /// value instead of its name. Identical to [`Self::validate`] for
    /// every other method.
    pub fn translate(&self, token: &str, use_alt: bool) -> Option<String> {
        self.convert(token, true, use_alt)
    }

    fn convert(&self, token: &str, translate: bool, use_alt: bool) -> Option<String> {
        let folded = self.fold(token);
        match &self.method {
            TypeMethod::Regexp { re } => re.is_match(&folded).then_some(folded),
            TypeMethod::Integer { min, max } => {
                let value = parse_decimal::<i64>(&folded, true)?;
                (*min <= value && value <= *max).then_some(folded)
            }
            TypeMethod::UnsignedInteger { min, max } => {
                let value = parse_decimal::<u64>(&folded, false)?;
                (*min <= value && value <= *max).then_some(folded)
            }
            TypeMethod::Select { items, .. } => {
                let item = items
                    .iter()
                    .find(|item| item.name.eq_ignore_ascii_case(&folded))?;
                if translate {
                    Some(item.value().to_string())
                } else {
                    Some(item.name.clone())
                }
            }
            TypeMethod::Code => Some(folded),
            TypeMethod::RegexpSelect { re, alt_re, .. } => {
                let re = match alt_re {
                    Some(alt)
                        if use_alt && self.preprocess == Preprocess::Mode =>
                    {
                        alt
                    }
                    _ => re,
                };
                if !re.is_match(&folded) {
                    return None;
                }
                self.expand_short_form(&folded, use_alt)
            }
        }
    }

    /// Rewrite a regex-validated token to its canonical item name.
    ///
    /// The leading alphabetic prefix must case-insensitively prefix one of
    /// the item names; the rest of the token, starting at the first digit,
    /// is appended with any intervening whitespace collapsed.
    fn expand_short_form(&self, token: &str, use_alt: bool) -> Option<String> {
        let items = self.items(use_alt);
        if items.is_empty() {
            return Some(token.to_string());
        }
        let digit_at = token
            .find(|ch: char| ch.is_ascii_digit())
            .unwrap_or(token.len());
        let prefix = token[..digit_at].trim_end();
        let rest = &token[digit_at..];
        let item = items
            .iter()
            .find(|item| starts_with_nocase(&item.name, prefix))?;
        Some(format!("{}{}", item.name, rest))
    }

    /// True when the token is a case-insensitive prefix of some item name.
    pub fn matches_item_prefix(&self, token: &str, use_alt: bool) -> bool {
        self.items(use_alt)
            .iter()
            .any(|item| starts_with_nocase(&item.name, token))
    }

    /// Longest case-insensitive common prefix between the token and any
    /// item name. Drives caret placement inside a failing token.
    pub fn longest_item_match(&self, token: &str, use_alt: bool) -> usize {
        self.items(use_alt)
            .iter()
            .map(|item| common_prefix_nocase(&item.name, token))
            .max()
            .unwrap_or(0)
    }

    /// Completion candidates for a partial token.
    ///
    /// Select: the validated token itself when it already names an item,
    /// otherwise every prefix-matching item name. Regexp-select: every
    /// prefix-matching item name, suppressed entirely when the previous
    /// word already matched an item prefix (the token then belongs to the
    /// type's free-form tail, e.g. `interface vlan 1<Tab>`).
    pub fn completions(&self, token: &str, prev: Option<&str>, use_alt: bool) -> Vec<String> {
        match self.kind() {
            MethodKind::Select => {
                if let Some(valid) = self.validate(token, use_alt) {
                    return vec![valid];
                }
                self.prefix_matches(token, use_alt)
            }
            MethodKind::RegexpSelect => {
                if prev.is_some_and(|p| self.matches_item_prefix(p, use_alt)) {
                    return Vec::new();
                }
                self.prefix_matches(token, use_alt)
            }
            _ => Vec::new(),
        }
    }

    fn prefix_matches(&self, token: &str, use_alt: bool) -> Vec<String> {
        self.items(use_alt)
            .iter()
            .filter(|item| starts_with_nocase(&item.name, token))
            .map(|item| item.name.clone())
            .collect()
    }
}

/// Parse the parenthesized segments of an extended-help declaration:
/// `"(first help)(second help)"` yields one string per segment.
pub fn parse_ext_help(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        let tail = &rest[open + 1..];
        match tail.find(')') {
            Some(close) => {
                out.push(tail[..close].to_string());
                rest = &tail[close + 1..];
            }
            None => break,
        }
    }
    out
}

/// Parse an integer range declaration `"min..max"`, falling back to the
/// full domain for missing halves.
pub fn parse_range<T: std::str::FromStr + Copy>(
    pattern: &str,
    domain: (T, T),
) -> Option<(T, T)> {
    if pattern.is_empty() {
        return Some(domain);
    }
    let (lo, hi) = pattern.split_once("..")?;
    let min = lo.parse().ok()?;
    let max = hi.parse().ok()?;
    Some((min, max))
}

fn parse_decimal<T: std::str::FromStr>(token: &str, signed: bool) -> Option<T> {
    let digits = if signed {
        token.strip_prefix('-').unwrap_or(token)
    } else {
        token
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn join_names(items: &[SelectItem]) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// True when `name` starts with `prefix`, ignoring ASCII case.
pub fn starts_with_nocase(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Length of the longest common prefix of two strings, ignoring ASCII case.
pub fn common_prefix_nocase(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}

#[cfg(test)]
#[path = "ptype_tests.rs"]
mod tests;
