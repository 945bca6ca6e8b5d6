//! Business registry tools: search, holding check and VAT number.

mod check_holding;
mod common;
mod search;
mod vat;

pub use check_holding::{CheckHoldingParams, CheckHoldingResult, CheckHoldingTool};
pub use common::CompanySummary;
pub use search::{AnnuaireSearchParams, AnnuaireSearchResult, AnnuaireSearchTool};
pub use vat::{VatParams, VatResult, VatTool};
