//! Map positional call arguments onto declared parameter names.
//!
//! Parameter names are registration-time metadata: either listed explicitly,
//! parsed from a signature string, or generated by
//! [`prompt_inputs`](crate::prompt_inputs). When the names are unknown the
//! mapping is empty rather than an error.

use serde_json::Value;
use tracing::debug;

use crate::core::types::Inputs;

/// Source of the ordered parameter names of a callable.
pub trait ParameterNames {
    /// Declared parameter names in order, or `None` when unknown.
    fn parameter_names(&self) -> Option<Vec<String>>;

    /// Build named inputs from positional arguments. See [`args_to_inputs`].
    fn inputs_from_args<I>(&self, args: I) -> Inputs
    where
        I: IntoIterator<Item = Value>,
        Self: Sized,
    {
        args_to_inputs(self, args)
    }
}

/// Parameter names recorded for a callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FnSignature {
    names: Option<Vec<String>>,
}

impl FnSignature {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Parse the names out of a signature's source text.
    pub fn parse(source: &str) -> Self {
        Self {
            names: compute_parameter_names(source),
        }
    }

    pub fn unknown() -> Self {
        Self { names: None }
    }

    pub fn is_known(&self) -> bool {
        self.names.is_some()
    }
}

impl ParameterNames for FnSignature {
    fn parameter_names(&self) -> Option<Vec<String>> {
        self.names.clone()
    }
}

/// Extract parameter names from the text of a function signature.
///
/// Takes the text between the first `(` and the first `)` after it, splits on
/// commas and trims each piece. Returns `None` when either delimiter is
/// missing and an empty list when the parentheses hold only whitespace.
///
/// Pieces are returned verbatim: `b = 2` or `x: i32` stay as written.
pub fn compute_parameter_names(source: &str) -> Option<Vec<String>> {
    let open = source.find('(')?;
    let close = open + source[open..].find(')')?;
    let params = &source[open + 1..close];

    if params.trim().is_empty() {
        return Some(Vec::new());
    }

    Some(params.split(',').map(|p| p.trim().to_string()).collect())
}

/// Zip positional arguments against the callable's parameter names.
///
/// Unknown names give an empty map. Arguments past the last declared name are
/// dropped. Declared default values are never applied: only arguments that
/// were actually passed appear in the result.
pub fn args_to_inputs<C, I>(callable: &C, args: I) -> Inputs
where
    C: ParameterNames + ?Sized,
    I: IntoIterator<Item = Value>,
{
    let Some(names) = callable.parameter_names() else {
        debug!("Parameter names unavailable, no inputs recorded");
        return Inputs::new();
    };

    let mut inputs = Inputs::new();
    let mut dropped = 0usize;
    for (index, arg) in args.into_iter().enumerate() {
        match names.get(index) {
            Some(name) => {
                inputs.insert(name.clone(), arg);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, declared = names.len(), "Dropping surplus positional arguments");
    }

    inputs
}
