use crate::error::RestResult;
use crate::ident::{Ident, IntoIdent};

/// A stored-procedure invocation with its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    procedure: Ident,
    args: Vec<String>,
}

impl Call {
    pub fn new<I, A>(procedure: impl IntoIdent, args: I) -> RestResult<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Ok(Self {
            procedure: procedure.into_ident()?,
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    pub fn procedure(&self) -> &Ident {
        &self.procedure
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}
