// ABOUTME: Extracts StaffRecords from one directory page: page-level school context plus one record per teaser.
// ABOUTME: A teaser with any missing field yields an all-null record and a logged error, never a partial row.

use scraper::{ElementRef, Html};
use tracing::{debug, error, warn};

use crate::error::ScrapeError;
use crate::extractors::address::{address_from_link, state_and_zip};
use crate::extractors::fields::{doc_attr, doc_text, scoped_text};
use crate::layout::CompiledLayout;
use crate::record::StaffRecord;

/// School-wide values read once per page and attached to every record on it.
///
/// The address comes from the first mapping link on the page, not from the
/// individual teaser, so every staff member on a page shares it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub school_name: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Name, title and contact fields read from one staff teaser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffFields {
    pub first_name: String,
    pub last_name: String,
    pub staff_title: String,
    pub phone: String,
    pub email: String,
}

/// Split a `"Last, First"` label into `(last, first)`.
///
/// The label must contain the separator exactly once.
pub fn split_name(label: &str, separator: &str) -> Option<(String, String)> {
    let mut parts = label.split(separator);
    let last = parts.next()?.trim();
    let first = parts.next()?.trim();
    if parts.next().is_some() || last.is_empty() || first.is_empty() {
        return None;
    }
    Some((last.to_string(), first.to_string()))
}

/// School name from a page title: the text after the last separator.
pub fn school_from_title(title: &str, separator: &str) -> Option<String> {
    let name = title.rsplit(separator).next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Reads staff records out of parsed directory pages.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    layout: CompiledLayout,
}

impl RecordExtractor {
    pub fn new(layout: CompiledLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &CompiledLayout {
        &self.layout
    }

    /// Extract every staff record on the page, in document order.
    pub fn extract(&self, doc: &Html) -> Vec<StaffRecord> {
        let context = self.page_context(doc);
        doc.select(&self.layout.staff_teaser)
            .enumerate()
            .map(|(index, teaser)| match self.staff_fields(teaser) {
                Ok(fields) => {
                    let record = build_record(&context, fields);
                    debug!(?record, "extracted staff record");
                    record
                }
                Err(err) => {
                    error!(teaser = index, error = %err, "could not read staff entry");
                    StaffRecord::default()
                }
            })
            .collect()
    }

    /// Read the school name and address shared by every teaser on the page.
    ///
    /// Each missing value is logged, since every record on the page will be
    /// incomplete without it.
    pub fn page_context(&self, doc: &Html) -> PageContext {
        let school_name = doc_text(doc, &self.layout.title)
            .and_then(|title| school_from_title(&title, &self.layout.title_separator));
        if school_name.is_none() {
            warn!("page title missing or empty, school name unavailable");
        }

        let address = match doc_attr(doc, &self.layout.address_link, "href") {
            Some(href) => {
                let address = address_from_link(&href, &self.layout.address_param);
                if address.is_none() {
                    warn!(href = %href, "address link carries no address");
                }
                address
            }
            None => {
                warn!("no address link on page, address unavailable");
                None
            }
        };
        let (state, zip) = match address.as_deref() {
            Some(address) => match state_and_zip(address) {
                Some((state, zip)) => (Some(state), Some(zip)),
                None => {
                    warn!(address, "address too short for state and zip");
                    (None, None)
                }
            },
            None => (None, None),
        };

        PageContext {
            school_name,
            address,
            state,
            zip,
        }
    }

    /// Read one teaser; the first missing field aborts with an Extract error naming it.
    pub fn staff_fields(&self, teaser: ElementRef<'_>) -> Result<StaffFields, ScrapeError> {
        let layout = &self.layout;
        let label = require(scoped_text(teaser, &layout.name), "name")?;
        let (last_name, first_name) = split_name(&label, &layout.name_separator).ok_or_else(|| {
            ScrapeError::extract(
                "",
                "ExtractStaff",
                Some(anyhow::anyhow!("name label {:?} is not \"Last, First\"", label)),
            )
        })?;
        let staff_title = require(scoped_text(teaser, &layout.job_title), "job title")?;
        let phone = require(scoped_text(teaser, &layout.phone), "phone")?;
        let email = require(scoped_text(teaser, &layout.email), "email")?;

        Ok(StaffFields {
            first_name,
            last_name,
            staff_title,
            phone,
            email,
        })
    }
}

fn require(value: Option<String>, field: &str) -> Result<String, ScrapeError> {
    value.ok_or_else(|| {
        ScrapeError::extract(
            "",
            "ExtractStaff",
            Some(anyhow::anyhow!("missing {} element", field)),
        )
    })
}

fn build_record(context: &PageContext, fields: StaffFields) -> StaffRecord {
    StaffRecord {
        school_name: context.school_name.clone(),
        address: context.address.clone(),
        state: context.state.clone(),
        zip: context.zip.clone(),
        first_name: Some(fields.first_name),
        last_name: Some(fields.last_name),
        staff_title: Some(fields.staff_title),
        phone: Some(fields.phone),
        email: Some(fields.email),
    }
}
