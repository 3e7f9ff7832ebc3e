// ABOUTME: The StaffRecord data model and the Harvest accumulator that carries records through a run.
// ABOUTME: Records are all-optional; completeness decides whether a record reaches the CSV output.

use serde::Serialize;

/// Column headers of the output file, in order.
pub const CSV_HEADERS: [&str; 9] = [
    "School Name",
    "Address",
    "State",
    "Zip",
    "First Name",
    "Last Name",
    "Staff Title",
    "Phone",
    "Email",
];

/// One staff member as read from a directory page.
///
/// Every field is optional; `StaffRecord::default()` is the all-null record
/// produced when a staff block cannot be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaffRecord {
    #[serde(rename = "School Name")]
    pub school_name: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
    #[serde(rename = "Zip")]
    pub zip: Option<String>,
    #[serde(rename = "First Name")]
    pub first_name: Option<String>,
    #[serde(rename = "Last Name")]
    pub last_name: Option<String>,
    #[serde(rename = "Staff Title")]
    pub staff_title: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
}

impl StaffRecord {
    fn fields(&self) -> [&Option<String>; 9] {
        [
            &self.school_name,
            &self.address,
            &self.state,
            &self.zip,
            &self.first_name,
            &self.last_name,
            &self.staff_title,
            &self.phone,
            &self.email,
        ]
    }

    /// True when every field is present.
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|f| f.is_some())
    }

    /// True when every field is absent.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|f| f.is_none())
    }
}

/// Records accumulated over a run, in page scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub records: Vec<StaffRecord>,
    /// Page URLs visited, whether or not the fetch succeeded.
    pub pages_visited: usize,
}

impl Harvest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one visited page's records.
    pub fn with_page(mut self, records: Vec<StaffRecord>) -> Self {
        self.pages_visited += 1;
        self.records.extend(records);
        self
    }

    /// Records that survive the null-row filter, order preserved.
    pub fn complete_records(&self) -> Vec<&StaffRecord> {
        self.records.iter().filter(|r| r.is_complete()).collect()
    }

    /// Number of records the null-row filter removes.
    pub fn incomplete_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_complete()).count()
    }
}
