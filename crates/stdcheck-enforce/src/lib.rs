//! Enforcement engine for stdcheck.
//!
//! Checks Python declarations against a fixed rule catalogue:
//! - R1: function, method, parameter, and variable names are snake_case
//! - R2: no double-underscore name mangling prefix
//! - R3: Args/Returns descriptions are lowercase clauses without a final period
//!   (and, in `Args:`, without a `:`)
//! - R4: every function, method, and class has a docstring
//! - R5: every parameter is annotated
//! - R6: no mutable default values
//! - R7: every function declares a return type
//! - R8: class names are PascalCase
//! - R9: the summary line ends with a period
//! - R10: docstrings and summaries are not empty
//! - R11 to R15: the `Args:` section agrees with the signature
//! - R16, R17: the `Returns:` section agrees with the return annotation
//! - DOC: the docstring is structurally well formed

pub mod consistency;
pub mod docstring;
pub mod engine;
pub mod naming;
pub mod suppress;
pub mod types;

pub use engine::{evaluate, Engine};
