//! Raw parse tree to typed AST
//!
//! One function per production. Newline items are filtered out here and
//! integer literal text becomes `u64`, keeping the literal's span.

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::cst::*;

/// Convert a raw flowchart
///
/// Fails only when an integer literal does not fit in `u64`; every such
/// literal is reported.
pub fn flowchart(raw: &RawFlowchart, source: &str) -> Result<Flowchart, Vec<ParseError>> {
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    let raw_statements = raw.items.iter().filter_map(|item| match item {
        RawItem::Statement(s) => Some(s),
        RawItem::Newline(_) => None,
    });

    for raw_statement in raw_statements {
        match statement(raw_statement, source) {
            Ok(s) => statements.push(s),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Flowchart {
        flow_type: text(&raw.flow_type),
        flow_statements: FlowStatements { statements },
        span: raw.span.clone(),
    })
}

fn statement(raw: &RawStatement, source: &str) -> Result<FlowStatement, Vec<ParseError>> {
    match (step(&raw.src, source), step(&raw.dst, source)) {
        (Ok(src), Ok(dst)) => Ok(FlowStatement {
            src,
            slabel: SrcLabel(text(&raw.slabel)),
            dst,
            dlabel: DstLabel(text(&raw.dlabel)),
            span: raw.span.clone(),
        }),
        (src, dst) => Err(src.err().into_iter().chain(dst.err()).collect()),
    }
}

fn step(raw: &RawStep, source: &str) -> Result<FlowStep, ParseError> {
    Ok(FlowStep {
        var: Spanned::new(Identifier::new(raw.var.text.as_str()), raw.var.span.clone()),
        num: int(&raw.num, source)?,
    })
}

fn int(raw: &RawInt, source: &str) -> Result<Spanned<u64>, ParseError> {
    raw.digits
        .parse::<u64>()
        .map(|n| Spanned::new(n, raw.span.clone()))
        .map_err(|_| {
            ParseError::syntax(
                source,
                raw.span.clone(),
                format!("Integer literal {} is out of range", raw.digits),
            )
        })
}

fn text(raw: &RawText) -> Spanned<String> {
    Spanned::new(raw.text.clone(), raw.span.clone())
}
