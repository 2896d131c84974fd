use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::types::{DistrictId, ZipDistrictRecord};

/// Check that the input is a 5-digit ZIP code, returning it trimmed
pub fn validate_zip(input: &str) -> Result<&str, LookupError> {
    let zip = input.trim();
    if zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit()) {
        Ok(zip)
    } else {
        Err(LookupError::InvalidInput(zip.to_string()))
    }
}

/// Find the congressional district for a ZIP code.
///
/// The first row whose `zcta` equals `zip` wins; comparison is on the
/// string so leading zeros matter.
pub fn resolve_district(rows: &[ZipDistrictRecord], zip: &str) -> Result<DistrictId, LookupError> {
    rows.iter()
        .find(|row| row.zcta == zip)
        .map(|row| DistrictId::new(&row.state_abbr, &row.cd))
        .ok_or(LookupError::NotFound(Dataset::ZipCodes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(zcta: &str, state_abbr: &str, cd: &str) -> ZipDistrictRecord {
        ZipDistrictRecord {
            zcta: zcta.to_string(),
            state_abbr: state_abbr.to_string(),
            cd: cd.to_string(),
        }
    }

    #[test]
    fn test_validate_zip() {
        assert_eq!(validate_zip("90210").unwrap(), "90210");
        assert_eq!(validate_zip(" 02134 ").unwrap(), "02134");
        assert!(matches!(validate_zip("9021"), Err(LookupError::InvalidInput(_))));
        assert!(matches!(validate_zip("ABCDE"), Err(LookupError::InvalidInput(_))));
        assert!(validate_zip("902101").is_err());
        assert!(validate_zip("9021-").is_err());
        assert!(validate_zip("").is_err());
    }

    #[test]
    fn test_resolve_district() {
        let rows = vec![row("90210", "CA", "28"), row("10001", "NY", "2")];
        assert_eq!(resolve_district(&rows, "90210").unwrap().to_string(), "CA-28");
        assert_eq!(resolve_district(&rows, "10001").unwrap().to_string(), "NY-02");
    }

    #[test]
    fn test_resolve_is_deterministic_and_first_match_wins() {
        let rows = vec![row("59001", "MT", "1"), row("59001", "MT", "2")];
        let first = resolve_district(&rows, "59001").unwrap();
        let second = resolve_district(&rows, "59001").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "MT-01");
    }

    #[test]
    fn test_resolve_uses_string_equality() {
        let rows = vec![row("01001", "MA", "1")];
        assert!(matches!(
            resolve_district(&rows, "1001"),
            Err(LookupError::NotFound(Dataset::ZipCodes))
        ));
        assert!(resolve_district(&rows, "01001").is_ok());
    }
}
