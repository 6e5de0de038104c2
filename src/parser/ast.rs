//! Abstract Syntax Tree types for flow scripts

use std::fmt;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Step name (letters and underscores)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete flow script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flowchart {
    /// Header words, e.g. `flowchart` or `graph TD`
    pub flow_type: Spanned<String>,
    pub flow_statements: FlowStatements,
    pub span: Span,
}

/// Statements in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowStatements {
    pub statements: Vec<FlowStatement>,
}

impl FlowStatements {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlowStatement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a FlowStatements {
    type Item = &'a FlowStatement;
    type IntoIter = std::slice::Iter<'a, FlowStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// One directed edge: `src --slabel--> dst:dlabel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStatement {
    pub src: FlowStep,
    pub slabel: SrcLabel,
    pub dst: FlowStep,
    pub dlabel: DstLabel,
    pub span: Span,
}

/// A named, numbered endpoint such as `a0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStep {
    pub var: Spanned<Identifier>,
    pub num: Spanned<u64>,
}

/// Label on the source side of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcLabel(pub Spanned<String>);

/// Label on the destination side of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstLabel(pub Spanned<String>);

impl SrcLabel {
    pub fn as_str(&self) -> &str {
        &self.0.node
    }
}

impl DstLabel {
    pub fn as_str(&self) -> &str {
        &self.0.node
    }
}

/// Labels made of plain words print bare; anything else is quoted.
fn write_label(f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
    let bare = !label.is_empty()
        && !label.starts_with(' ')
        && !label.ends_with(' ')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ' ');
    if bare {
        return write!(f, "{}", label);
    }
    write!(f, "\"")?;
    for c in label.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.var.node, self.num.node)
    }
}

impl fmt::Display for FlowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --", self.src)?;
        write_label(f, self.slabel.as_str())?;
        write!(f, "--> {}:", self.dst)?;
        write_label(f, self.dlabel.as_str())
    }
}

/// Prints canonical script text that parses back to the same chart.
impl fmt::Display for Flowchart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.flow_type.node)?;
        for statement in &self.flow_statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
