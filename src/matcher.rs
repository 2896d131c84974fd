//! Joins from a resolved district to legislator score rows.

use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::types::{HouseScoreRecord, SenateScoreRecord};

/// House member for a district, matched exactly on `DistrictNumber`
pub fn match_house<'a>(
    rows: &'a [HouseScoreRecord],
    district_id: &str,
) -> Result<&'a HouseScoreRecord, LookupError> {
    rows.iter()
        .find(|row| row.district_number == district_id)
        .ok_or(LookupError::NotFound(Dataset::House))
}

/// All senators whose `State` matches the full state name, ignoring case
pub fn match_senate<'a>(
    rows: &'a [SenateScoreRecord],
    state_name: &str,
) -> Result<Vec<&'a SenateScoreRecord>, LookupError> {
    let wanted = state_name.to_lowercase();
    let matches: Vec<_> = rows
        .iter()
        .filter(|row| row.state.to_lowercase() == wanted)
        .collect();

    if matches.is_empty() {
        Err(LookupError::NotFound(Dataset::Senate))
    } else {
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(district: &str, last: &str) -> HouseScoreRecord {
        HouseScoreRecord {
            district_number: district.to_string(),
            rep_first: "Pat".to_string(),
            rep_last: last.to_string(),
            total_score: "50%".to_string(),
        }
    }

    fn senator(state: &str, last: &str) -> SenateScoreRecord {
        SenateScoreRecord {
            state: state.to_string(),
            rep_first: "Sam".to_string(),
            rep_last: last.to_string(),
            total_score: "50%".to_string(),
        }
    }

    #[test]
    fn test_match_house_exact() {
        let rows = vec![house("CA-28", "Schiff"), house("CA-28", "Later"), house("CA-02", "Other")];
        assert_eq!(match_house(&rows, "CA-28").unwrap().rep_last, "Schiff");
        assert_eq!(match_house(&rows, "CA-02").unwrap().rep_last, "Other");
    }

    #[test]
    fn test_match_house_is_case_sensitive() {
        let rows = vec![house("CA-28", "Schiff")];
        assert!(matches!(
            match_house(&rows, "ca-28"),
            Err(LookupError::NotFound(Dataset::House))
        ));
        assert!(match_house(&rows, "CA-2").is_err());
    }

    #[test]
    fn test_match_senate_case_insensitive() {
        let rows = vec![
            senator("California", "One"),
            senator("Oregon", "Elsewhere"),
            senator("california", "Two"),
        ];
        let found = match_senate(&rows, "California").unwrap();
        let names: Vec<_> = found.iter().map(|r| r.rep_last.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[test]
    fn test_match_senate_tolerates_any_count() {
        let rows = vec![senator("Guam", "Only")];
        assert_eq!(match_senate(&rows, "GUAM").unwrap().len(), 1);
        assert!(matches!(
            match_senate(&rows, "Unknown State"),
            Err(LookupError::NotFound(Dataset::Senate))
        ));
    }
}
