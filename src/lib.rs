#![deny(rust_2018_idioms, warnings)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

//! Line-oriented authorization verdicts over flat attribute records.
//!
//! Every input line is one JSON-like object of string pairs describing a
//! request. [`decode`] turns the line into a bounded [`AttributeRecord`],
//! [`evaluate`] runs a fixed short-circuiting rule chain over it, and
//! [`process`] wires both to a pair of streams, answering each non-blank
//! line with `authorized` or `unauthorized`.

mod decoder;
mod errors;
mod policy;
mod record;
mod stream;

pub use decoder::decode;
pub use errors::{Error, Result};
pub use policy::{
    evaluate, Verdict, ATTR_AUTHENTICATED, ATTR_DEPARTMENT, ATTR_EMAIL, ATTR_GROUPS, ATTR_ROLE,
};
pub use record::{AttributeRecord, AttributeSource, MAX_ATTRIBUTES, MAX_FIELD_CHARS};
pub use stream::process;
