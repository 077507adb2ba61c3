//! Completion suggestions driven by the cursor context.

use smol_str::SmolStr;

use crate::parser::keywords::{CONJUNCTIONS, FUNCTIONS, OPERATOR_KEYWORDS, OPERATOR_SYMBOLS};

use super::context::QueryContext;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionKind {
    Operator,
    Conjunction,
    Function,
    Keyword,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Operator => 24,    // Operator
            CompletionKind::Conjunction => 14, // Keyword
            CompletionKind::Function => 3,     // Function
            CompletionKind::Keyword => 14,     // Keyword
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<SmolStr>,
    /// Text to insert (if different from label).
    pub insert_text: Option<SmolStr>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<SmolStr>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

/// Get completion suggestions for a cursor context.
///
/// Nothing is suggested in value position. When the cursor is on a token,
/// suggestions are narrowed to those starting with its text.
pub fn completions(context: &QueryContext) -> Vec<CompletionItem> {
    let mut items = if context.is_in_operator {
        operator_completions()
    } else if context.is_in_conjunction {
        conjunction_completions()
    } else if context.is_in_function {
        function_completions()
    } else if context.is_in_key {
        let mut items = vec![
            CompletionItem::new("NOT", CompletionKind::Keyword)
                .with_detail("negation")
                .with_priority(30),
        ];
        items.extend(function_completions());
        items
    } else {
        Vec::new()
    };

    if context.on_token && !context.text.is_empty() {
        let prefix = context.text.to_ascii_lowercase();
        items.retain(|item| item.label.to_ascii_lowercase().starts_with(&prefix));
    }

    items.sort_by_key(|item| item.sort_priority);
    items
}

fn operator_completions() -> Vec<CompletionItem> {
    let symbols = OPERATOR_SYMBOLS.iter().map(|op| {
        CompletionItem::new(*op, CompletionKind::Operator)
            .with_detail("comparison")
            .with_priority(10)
    });
    let keywords = OPERATOR_KEYWORDS.iter().map(|op| {
        CompletionItem::new(*op, CompletionKind::Operator)
            .with_detail("comparison")
            .with_insert_text(format!("{op} "))
            .with_priority(20)
    });
    symbols.chain(keywords).collect()
}

fn conjunction_completions() -> Vec<CompletionItem> {
    CONJUNCTIONS
        .iter()
        .map(|c| {
            CompletionItem::new(*c, CompletionKind::Conjunction)
                .with_insert_text(format!("{c} "))
                .with_priority(10)
        })
        .collect()
}

fn function_completions() -> Vec<CompletionItem> {
    FUNCTIONS
        .iter()
        .map(|name| {
            CompletionItem::new(*name, CompletionKind::Function)
                .with_detail("function")
                .with_insert_text(format!("{name}("))
                .with_priority(40)
        })
        .collect()
}
