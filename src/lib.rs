pub mod dataset;
pub mod error;
pub mod lookup;
pub mod matcher;
pub mod presenter;
pub mod resolver;
pub mod score;
pub mod states;
pub mod types;
pub mod zipcode;

pub use dataset::{Dataset, DatasetConfig, DatasetLoader, DatasetSource};
pub use error::{LoadError, LookupError};
pub use lookup::{Lookup, LookupReport, SessionState};
pub use presenter::{ResultEntries, ResultEntry, render_html, render_page, render_text};
pub use types::{Chamber, ClassifiedResult, Color, DistrictId, Tier};
pub use zipcode::location_label;
