//! Raw parse tree produced by the grammar
//!
//! One type per grammar production. Punctuation is already dropped, but
//! newline tokens are still present and integer literals are still text;
//! [`crate::parser::transform`] turns this tree into the typed AST.

use super::ast::Span;

/// Text taken from the source (identifiers, labels, the flow type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    pub text: String,
    pub span: Span,
}

/// Unconverted integer literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInt {
    pub digits: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStep {
    pub var: RawText,
    pub num: RawInt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    pub src: RawStep,
    pub slabel: RawText,
    pub dst: RawStep,
    pub dlabel: RawText,
    pub span: Span,
}

/// Body item: a statement or one of the newlines around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawItem {
    Statement(RawStatement),
    Newline(Span),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFlowchart {
    pub flow_type: RawText,
    pub items: Vec<RawItem>,
    pub span: Span,
}
