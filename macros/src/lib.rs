//! Procedural macros for the promptfill crate.
//!
//! - [`prompt_inputs`](macro@prompt_inputs) - Records a function's parameter names so
//!   positional call arguments can be turned into named template inputs
//!
//! # Quick Start
//!
//! ```rust
//! use promptfill::{ParameterNames, prompt_inputs};
//! use serde_json::json;
//!
//! #[prompt_inputs]
//! fn summarize(ticket: String, tone: String) -> String {
//!     format!("{tone}: {ticket}")
//! }
//!
//! let inputs = SummarizeSignature.inputs_from_args(vec![json!("#42"), json!("friendly")]);
//! assert_eq!(inputs["tone"], "friendly");
//! ```

use proc_macro::TokenStream;

mod signature;

/// Attribute macro recording the parameter names of a free function.
///
/// The function itself is emitted unchanged. Next to it the macro generates a
/// unit struct named `<FunctionName>Signature` (PascalCase) that implements
/// `promptfill::ParameterNames` with the declared names in order.
///
/// # Example
///
/// ```rust
/// use promptfill::{ParameterNames, prompt_inputs};
///
/// #[prompt_inputs]
/// fn greet(name: &str, mut greeting: String) -> String {
///     greeting.push_str(name);
///     greeting
/// }
///
/// assert_eq!(GreetSignature::NAMES, &["name", "greeting"]);
/// assert_eq!(
///     GreetSignature.parameter_names(),
///     Some(vec!["name".to_string(), "greeting".to_string()])
/// );
/// ```
///
/// # Parameter Names
///
/// | Pattern | Recorded name |
/// |---------|---------------|
/// | `name: T`, `mut name: T`, `ref name: T` | `name` |
/// | `_: T` | `_` |
/// | `(a, b): (T, U)` | the pattern's token text |
///
/// Methods taking `self` are rejected at compile time:
///
/// ```rust,compile_fail
/// use promptfill::prompt_inputs;
///
/// struct Agent;
///
/// impl Agent {
///     #[prompt_inputs]
///     fn ask(&self, question: String) {}
/// }
/// ```
#[proc_macro_attribute]
pub fn prompt_inputs(attr: TokenStream, item: TokenStream) -> TokenStream {
    match signature::prompt_inputs_impl(attr.into(), item.into()) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
