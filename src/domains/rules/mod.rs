//! Business rules shared by the tools.
//!
//! Everything in this module is pure: no I/O, no async, no configuration.
//! Tools call into it after resolving their arguments and before (or
//! instead of) talking to an upstream API.

mod error;
pub mod identifier;
pub mod legal_name;
pub mod vat;

pub use error::RuleError;
pub use legal_name::{LegalNameMatch, SearchHit, extract_legal_names};
pub use vat::{parse_siren, vat_number};
