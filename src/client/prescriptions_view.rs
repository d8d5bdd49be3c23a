use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::http::PortalApi;
use crate::models::{Prescription, UnknownVariant};
use crate::utils::parse_slash_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    MedicationName,
    Doctor,
    Date,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::MedicationName => "Medication Name",
            SearchField::Doctor => "Doctor",
            SearchField::Date => "Date",
        }
    }
}

impl FromStr for SearchField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Medication Name" => Ok(SearchField::MedicationName),
            "Doctor" => Ok(SearchField::Doctor),
            "Date" => Ok(SearchField::Date),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Latest start date first.
    #[default]
    Newest,
    Oldest,
    NameAscending,
    NameDescending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
            SortOrder::NameAscending => "A-Z",
            SortOrder::NameDescending => "Z-A",
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Newest" => Ok(SortOrder::Newest),
            "Oldest" => Ok(SortOrder::Oldest),
            "A-Z" => Ok(SortOrder::NameAscending),
            "Z-A" => Ok(SortOrder::NameDescending),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Whole hours between a prescription's start and end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationHours {
    Hours(i64),
    Invalid,
}

impl fmt::Display for DurationHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationHours::Hours(hours) => write!(f, "{}", hours),
            DurationHours::Invalid => f.write_str("Invalid"),
        }
    }
}

/// Hours from `start` to `end`, both `M/D/YYYY`. `Invalid` when either date
/// does not parse or the span is negative.
pub fn duration_hours(start: &str, end: &str) -> DurationHours {
    let (Some(start), Some(end)) = (parse_slash_date(start), parse_slash_date(end)) else {
        return DurationHours::Invalid;
    };

    let hours = (end - start).num_hours();
    if hours >= 0 {
        DurationHours::Hours(hours)
    } else {
        DurationHours::Invalid
    }
}

// Unparseable dates go last in either direction.
fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// "My Prescriptions" screen state.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionsView {
    prescriptions: Vec<Prescription>,
    pub search: String,
    pub field: SearchField,
    pub sort: SortOrder,
}

impl PrescriptionsView {
    pub fn new(prescriptions: Vec<Prescription>) -> Self {
        PrescriptionsView {
            prescriptions,
            ..Default::default()
        }
    }

    pub async fn load<A: PortalApi + ?Sized>(api: &A) -> Self {
        match api.list_prescriptions().await {
            Ok(prescriptions) => PrescriptionsView::new(prescriptions),
            Err(e) => {
                tracing::error!("Error fetching prescriptions: {}", e);
                PrescriptionsView::default()
            }
        }
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    fn matches(&self, prescription: &Prescription, term: &str) -> bool {
        match self.field {
            SearchField::MedicationName => prescription.name.to_lowercase().contains(term),
            SearchField::Doctor => prescription.doctor.to_lowercase().contains(term),
            SearchField::Date => {
                prescription.start_date.contains(term) || prescription.end_date.contains(term)
            }
        }
    }

    /// Search, then sort. Recomputed on every call.
    pub fn visible(&self) -> Vec<&Prescription> {
        let term = self.search.to_lowercase();
        let mut visible: Vec<&Prescription> = self
            .prescriptions
            .iter()
            .filter(|p| self.matches(p, &term))
            .collect();

        match self.sort {
            SortOrder::Newest | SortOrder::Oldest => {
                let newest_first = self.sort == SortOrder::Newest;
                visible.sort_by(|a, b| {
                    compare_dates(
                        parse_slash_date(&a.start_date),
                        parse_slash_date(&b.start_date),
                        newest_first,
                    )
                });
            }
            SortOrder::NameAscending => visible.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::NameDescending => visible.sort_by(|a, b| b.name.cmp(&a.name)),
        }
        visible
    }
}
