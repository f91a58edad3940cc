use crate::error::ExecError;
use crate::row::Row;

// ---------------------------------------------------------------------------
// ExecutorContext
// ---------------------------------------------------------------------------

/// Per-call information supplied by the host alongside each batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorContext {
    is_last: bool,
}

impl ExecutorContext {
    /// A batch in the middle of a partition.
    pub fn non_terminal() -> Self {
        Self { is_last: false }
    }

    /// The final call for a partition.
    pub fn terminal() -> Self {
        Self { is_last: true }
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }
}

// ---------------------------------------------------------------------------
// UsageDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Names an existing input column.
    Column,
    /// Names a column the directive writes.
    OutputColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgDef {
    pub name: &'static str,
    pub kind: ArgKind,
}

/// Declares a directive's name and its positional arguments, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageDefinition {
    pub name: &'static str,
    pub args: Vec<ArgDef>,
}

impl UsageDefinition {
    pub fn builder(name: &'static str) -> UsageBuilder {
        UsageBuilder {
            def: UsageDefinition {
                name,
                args: Vec::new(),
            },
        }
    }

    /// `name <arg> <arg> …` as shown to operators.
    pub fn usage(&self) -> String {
        let mut out = self.name.to_string();
        for arg in &self.args {
            out.push_str(" <");
            out.push_str(arg.name);
            out.push('>');
        }
        out
    }
}

pub struct UsageBuilder {
    def: UsageDefinition,
}

impl UsageBuilder {
    pub fn define(mut self, name: &'static str, kind: ArgKind) -> Self {
        self.def.args.push(ArgDef { name, kind });
        self
    }

    pub fn build(self) -> UsageDefinition {
        self.def
    }
}

// ---------------------------------------------------------------------------
// Directive
// ---------------------------------------------------------------------------

/// A row transformation driven by a host pipeline, one batch at a time.
///
/// The host calls [`execute`](Directive::execute) for every batch of a
/// partition and sets [`ExecutorContext::is_last`] on the final call. One
/// instance serves exactly one partition.
pub trait Directive {
    fn define(&self) -> UsageDefinition;

    fn execute(&mut self, rows: Vec<Row>, ctx: &ExecutorContext) -> Result<Vec<Row>, ExecError>;
}
