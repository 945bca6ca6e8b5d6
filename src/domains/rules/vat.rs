//! Intra-community VAT number derivation.
//!
//! A French VAT number is `FR` + a two digit key + the SIREN, where
//! `key = (12 + 3 * (SIREN mod 97)) mod 97`.

use super::RuleError;

/// Number of digits in a SIREN.
pub const SIREN_LENGTH: usize = 9;

const VAT_PREFIX: &str = "FR";

/// Validate a SIREN and return its numeric value.
pub fn parse_siren(siren: &str) -> Result<u64, RuleError> {
    if siren.len() != SIREN_LENGTH || !siren.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuleError::InvalidSiren(siren.to_string()));
    }

    siren
        .parse()
        .map_err(|_| RuleError::InvalidSiren(siren.to_string()))
}

/// Derive the VAT number for a SIREN.
pub fn vat_number(siren: &str) -> Result<String, RuleError> {
    let value = parse_siren(siren)?;
    let key = (12 + 3 * (value % 97)) % 97;
    Ok(format!("{VAT_PREFIX}{key:02}{siren}"))
}
