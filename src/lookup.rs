//! The search pipeline: ZIP -> district -> House member -> senators.
//!
//! Tables are loaded one after another because each stage needs the key the
//! previous stage produced. A failure at the ZIP stage ends the search with
//! one red entry; a House failure is reported and the Senate stage still
//! runs.

use serde::Serialize;

use crate::dataset::{DatasetConfig, DatasetLoader};
use crate::error::LookupError;
use crate::matcher::{match_house, match_senate};
use crate::presenter::ResultEntries;
use crate::resolver::{resolve_district, validate_zip};
use crate::score::classify_score;
use crate::states;
use crate::types::{Chamber, ClassifiedResult, Color, DistrictId};
use crate::zipcode::location_label;

/// Progress of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    LoadingZipTable,
    Resolved,
    NotFound,
    LoadingHouseTable,
    HouseRendered,
    LoadingSenateTable,
    SenateRendered,
}

/// Everything a search produced
#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub zipcode: String,
    pub district: Option<DistrictId>,
    pub state_name: Option<String>,
    pub location: Option<String>,
    pub results: Vec<ClassifiedResult>,
    pub entries: ResultEntries,
    /// States visited, in order, starting at `Idle`
    pub states: Vec<SessionState>,
    /// Error that ended the search before the House stage
    #[serde(skip)]
    pub session_error: Option<LookupError>,
}

impl LookupReport {
    fn new(zipcode: &str) -> Self {
        Self {
            zipcode: zipcode.to_string(),
            district: None,
            state_name: None,
            location: None,
            results: Vec::new(),
            entries: ResultEntries::new(),
            states: vec![SessionState::Idle],
            session_error: None,
        }
    }

    fn enter(&mut self, state: SessionState) {
        tracing::debug!("Lookup {} -> {:?}", self.zipcode, state);
        self.states.push(state);
    }

    fn show_error(&mut self, err: &LookupError) {
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries.display(err.user_message(), Color::Red);
    }

    fn show_result(&mut self, result: ClassifiedResult) {
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries.display(result.message(), result.tier.color());
        self.results.push(result);
    }

    /// Last state reached
    pub fn state(&self) -> SessionState {
        self.states.last().copied().unwrap_or(SessionState::Idle)
    }
}

fn classified(first: &str, last: &str, score: &str, chamber: Chamber) -> ClassifiedResult {
    ClassifiedResult {
        display_name: format!("{}, {}", first, last),
        chamber,
        score_text: score.to_string(),
        tier: classify_score(score),
    }
}

/// Runs searches against a set of datasets
pub struct Lookup {
    loader: DatasetLoader,
}

impl Lookup {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            loader: DatasetLoader::new(config),
        }
    }

    /// Search representatives for raw user input
    pub async fn run(&self, input: &str) -> LookupReport {
        let zip = match validate_zip(input) {
            Ok(zip) => zip,
            Err(err) => {
                tracing::warn!("Rejected ZIP input {:?}", input.trim());
                let mut report = LookupReport::new(input.trim());
                report.show_error(&err);
                report.session_error = Some(err);
                return report;
            }
        };

        let mut report = LookupReport::new(zip);
        report.location = location_label(zip);

        report.enter(SessionState::LoadingZipTable);
        let district = match self.resolve(zip).await {
            Ok(district) => district,
            Err(err) => {
                if matches!(err, LookupError::NotFound(_)) {
                    tracing::warn!("No district for ZIP {}", zip);
                    report.enter(SessionState::NotFound);
                } else {
                    report.enter(SessionState::Idle);
                }
                report.show_error(&err);
                report.session_error = Some(err);
                return report;
            }
        };
        tracing::info!("ZIP {} resolved to {}", zip, district);
        report.enter(SessionState::Resolved);

        let state_name = states::full_name(district.state_abbr());
        report.district = Some(district.clone());
        report.state_name = Some(state_name.to_string());
        report.entries = std::mem::take(&mut report.entries).clear();

        report.enter(SessionState::LoadingHouseTable);
        match self.house_member(&district).await {
            Ok(result) => report.show_result(result),
            Err(err) => {
                tracing::warn!("House lookup for {} failed: {}", district, err);
                report.show_error(&err);
            }
        }
        report.enter(SessionState::HouseRendered);

        report.enter(SessionState::LoadingSenateTable);
        match self.senators(state_name).await {
            Ok(results) => {
                for result in results {
                    report.show_result(result);
                }
                report.enter(SessionState::SenateRendered);
            }
            Err(err) => {
                tracing::warn!("Senate lookup for {} failed: {}", state_name, err);
                report.show_error(&err);
                report.enter(SessionState::Idle);
            }
        }

        report
    }

    async fn resolve(&self, zip: &str) -> Result<DistrictId, LookupError> {
        let rows = self.loader.load_zip_table().await?;
        resolve_district(&rows, zip)
    }

    async fn house_member(&self, district: &DistrictId) -> Result<ClassifiedResult, LookupError> {
        let rows = self.loader.load_house_table().await?;
        let rep = match_house(&rows, &district.to_string())?;
        Ok(classified(&rep.rep_first, &rep.rep_last, &rep.total_score, Chamber::House))
    }

    async fn senators(&self, state_name: &str) -> Result<Vec<ClassifiedResult>, LookupError> {
        let rows = self.loader.load_senate_table().await?;
        let reps = match_senate(&rows, state_name)?;
        Ok(reps
            .into_iter()
            .map(|rep| classified(&rep.rep_first, &rep.rep_last, &rep.total_score, Chamber::Senate))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::types::Tier;
    use std::fs;
    use std::path::Path;

    const ZIPS: &str = "zcta,state_abbr,cd\n90210,CA,28\n10001,NY,2\n96910,GU,98\n";
    const HOUSE: &str = "DistrictNumber,RepFirst,RepLast,totalScore\n\
                         CA-28,Adam,Smith,72%\n\
                         NY-02,Ann,Jones,85.5%\n";
    const SENATE: &str = "State,RepFirst,RepLast,totalScore\n\
                          California,Alex,Padilla,90%\n\
                          california,Laphonza,Butler,55%\n\
                          New York,Chuck,Schumer,oops\n";

    fn write_datasets(dir: &Path, zips: Option<&str>, house: Option<&str>, senate: Option<&str>) {
        if let Some(zips) = zips {
            fs::write(dir.join("zipcodes.csv"), zips).unwrap();
        }
        if let Some(house) = house {
            fs::write(dir.join("scoreSheetHouse.csv"), house).unwrap();
        }
        if let Some(senate) = senate {
            fs::write(dir.join("scoreSheetSenate.csv"), senate).unwrap();
        }
    }

    fn messages(report: &LookupReport) -> Vec<(String, Color)> {
        report
            .entries
            .iter()
            .map(|e| (e.message.clone(), e.color))
            .collect()
    }

    #[tokio::test]
    async fn test_full_lookup() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path(), Some(ZIPS), Some(HOUSE), Some(SENATE));
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        let report = lookup.run("90210").await;
        assert_eq!(report.district.as_ref().unwrap().to_string(), "CA-28");
        assert_eq!(report.state_name.as_deref(), Some("California"));
        assert_eq!(
            messages(&report),
            vec![
                (
                    "House Representative: Adam, Smith\nTotal Score: 72%".to_string(),
                    Color::Amber
                ),
                ("Senator: Alex, Padilla\nTotal Score: 90%".to_string(), Color::Green),
                ("Senator: Laphonza, Butler\nTotal Score: 55%".to_string(), Color::Red),
            ]
        );
        let tiers: Vec<_> = report.results.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![Tier::Medium, Tier::High, Tier::Low]);
        assert_eq!(report.state(), SessionState::SenateRendered);
        assert!(report.session_error.is_none());
    }

    #[tokio::test]
    async fn test_states_visited_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path(), Some(ZIPS), Some(HOUSE), Some(SENATE));
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        let report = lookup.run("10001").await;
        assert_eq!(
            report.states,
            vec![
                SessionState::Idle,
                SessionState::LoadingZipTable,
                SessionState::Resolved,
                SessionState::LoadingHouseTable,
                SessionState::HouseRendered,
                SessionState::LoadingSenateTable,
                SessionState::SenateRendered,
            ]
        );
        // Unparsable senate score falls into the low tier
        assert_eq!(report.results[1].tier, Tier::Low);
        assert_eq!(report.results[0].tier, Tier::High);
    }

    #[tokio::test]
    async fn test_invalid_zip_rejected_before_loading() {
        // No dataset files exist: any load would produce a load error
        let dir = tempfile::tempdir().unwrap();
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        for input in ["9021", "ABCDE"] {
            let report = lookup.run(input).await;
            assert_eq!(
                messages(&report),
                vec![("Please enter a valid 5-digit zip code.".to_string(), Color::Red)]
            );
            assert_eq!(report.states, vec![SessionState::Idle]);
            assert!(matches!(report.session_error, Some(LookupError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_unknown_zip_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path(), Some(ZIPS), None, None);
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        let report = lookup.run("55555").await;
        assert_eq!(
            messages(&report),
            vec![("No matching district found for this ZIP code.".to_string(), Color::Red)]
        );
        assert_eq!(report.state(), SessionState::NotFound);
        assert!(report.district.is_none());
    }

    #[tokio::test]
    async fn test_zip_table_load_error_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path(), Some("zip,state\n90210,CA\n"), Some(HOUSE), Some(SENATE));
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        let report = lookup.run("90210").await;
        assert_eq!(
            messages(&report),
            vec![("Error loading ZIP code data.".to_string(), Color::Red)]
        );
        assert!(matches!(
            report.session_error,
            Some(LookupError::Load {
                dataset: Dataset::ZipCodes,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_house_failure_still_runs_senate() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path(), Some(ZIPS), None, Some(SENATE));
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        let report = lookup.run("90210").await;
        let got = messages(&report);
        assert_eq!(got.len(), 3);
        assert_eq!(
            got[0],
            ("Error loading House representative data.".to_string(), Color::Red)
        );
        assert!(got[1].0.starts_with("Senator: Alex, Padilla"));
        assert_eq!(report.state(), SessionState::SenateRendered);
    }

    #[tokio::test]
    async fn test_missing_members_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path(), Some(ZIPS), Some(HOUSE), Some(SENATE));
        let lookup = Lookup::new(DatasetConfig::in_dir(dir.path()));

        let report = lookup.run("96910").await;
        assert_eq!(report.district.as_ref().unwrap().to_string(), "GU-98");
        assert_eq!(
            messages(&report),
            vec![
                (
                    "No matching House representative found for this district.".to_string(),
                    Color::Red
                ),
                (
                    "No matching Senate representatives found for this state.".to_string(),
                    Color::Red
                ),
            ]
        );
        assert_eq!(report.state(), SessionState::Idle);
    }
}
