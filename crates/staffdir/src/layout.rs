// ABOUTME: Page layout configuration: the CSS selectors and query parameters that describe a staff directory.
// ABOUTME: Loads the builtin layout from embedded JSON, reads overrides from disk, and compiles selectors once.

//! Directory layout definitions.
//!
//! A [`DirectoryLayout`] names every structural lookup the scraper performs:
//! the pagination marker, the mapping link that carries the school address,
//! the staff teaser container and the fields inside it. Layouts are plain
//! serde data so a different district's site can be described in a JSON file
//! without touching code.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Embedded JSON for the ISD 110 staff directory markup.
const BUILTIN_LAYOUT_JSON: &str = include_str!("../data/isd110_layout.json");

/// Selectors and parameter names describing one directory site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryLayout {
    /// Element holding the page title; the school name follows its last separator.
    pub title: String,
    #[serde(default = "default_title_separator")]
    pub title_separator: String,
    /// Link in the pager that points at the last page.
    pub last_page_link: String,
    /// Query parameter carrying the page index.
    #[serde(default = "default_page_param")]
    pub page_param: String,
    /// Mapping/directions anchor whose href encodes the school address.
    pub address_link: String,
    /// Query parameter on the mapping link holding the destination address.
    #[serde(default = "default_address_param")]
    pub address_param: String,
    /// Container repeated once per staff member.
    pub staff_teaser: String,
    /// "Last, First" label inside a teaser.
    pub name: String,
    #[serde(default = "default_name_separator")]
    pub name_separator: String,
    pub job_title: String,
    pub phone: String,
    pub email: String,
}

fn default_title_separator() -> String {
    "|".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_address_param() -> String {
    "daddr".to_string()
}

fn default_name_separator() -> String {
    ", ".to_string()
}

impl DirectoryLayout {
    /// Parse a layout from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ScrapeError> {
        serde_json::from_str(json)
            .map_err(|e| ScrapeError::layout("ParseLayout", Some(anyhow::Error::new(e))))
    }

    /// Read and parse a layout JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ScrapeError::layout(
                "ReadLayout",
                Some(anyhow::anyhow!("{}: {}", path.display(), e)),
            )
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for DirectoryLayout {
    fn default() -> Self {
        load_builtin_layout()
    }
}

/// Loads the builtin layout from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or cannot be deserialized.
pub fn load_builtin_layout() -> DirectoryLayout {
    serde_json::from_str(BUILTIN_LAYOUT_JSON).expect("failed to parse builtin layout")
}

/// A layout with every selector parsed, ready for repeated use across pages.
#[derive(Debug, Clone)]
pub struct CompiledLayout {
    pub title: Selector,
    pub title_separator: String,
    pub last_page_link: Selector,
    pub page_param: String,
    pub address_link: Selector,
    pub address_param: String,
    pub staff_teaser: Selector,
    pub name: Selector,
    pub name_separator: String,
    pub job_title: Selector,
    pub phone: Selector,
    pub email: Selector,
}

fn compile(field: &str, css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| {
        ScrapeError::layout(
            "CompileLayout",
            Some(anyhow::anyhow!("invalid {} selector {:?}: {:?}", field, css, e)),
        )
    })
}

impl CompiledLayout {
    /// Compile every selector in `layout`, failing on the first invalid one.
    pub fn compile(layout: &DirectoryLayout) -> Result<Self, ScrapeError> {
        Ok(Self {
            title: compile("title", &layout.title)?,
            title_separator: layout.title_separator.clone(),
            last_page_link: compile("last_page_link", &layout.last_page_link)?,
            page_param: layout.page_param.clone(),
            address_link: compile("address_link", &layout.address_link)?,
            address_param: layout.address_param.clone(),
            staff_teaser: compile("staff_teaser", &layout.staff_teaser)?,
            name: compile("name", &layout.name)?,
            name_separator: layout.name_separator.clone(),
            job_title: compile("job_title", &layout.job_title)?,
            phone: compile("phone", &layout.phone)?,
            email: compile("email", &layout.email)?,
        })
    }
}
