//! Core domain types for a materials database build.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// MaterialFolder
// ---------------------------------------------------------------------------

/// One cataloged material: a non-hidden directory directly under the database root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialFolder {
    /// Directory name, used verbatim as page title and sidebar label.
    pub name: String,
    /// Full path of the directory.
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Properties table
// ---------------------------------------------------------------------------

/// A single cell value from a properties file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::UInt(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

/// One named column of a properties table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyColumn {
    pub name: String,
    pub values: Vec<Scalar>,
}

/// Column-ordered properties data, one value per record in every column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertiesTable {
    pub columns: Vec<PropertyColumn>,
}

impl PropertiesTable {
    /// Number of records (the longest column, in case a caller built uneven columns).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    /// Iterate records as rows of cells in column order.
    /// Short columns yield [`Scalar::Null`] for missing cells.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Scalar>> + '_ {
        (0..self.row_count()).map(move |i| {
            self.columns
                .iter()
                .map(|c| c.values.get(i).unwrap_or(&Scalar::Null))
                .collect()
        })
    }
}

/// Outcome of loading a folder's properties file.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesLoad {
    /// No properties file in the folder.
    Missing,
    /// The file exists but could not be read or parsed.
    Malformed { reason: String },
    /// Parsed table.
    Loaded(PropertiesTable),
}

impl PropertiesLoad {
    /// Short status keyword for logs and reports.
    pub fn status(&self) -> PropertiesStatus {
        match self {
            PropertiesLoad::Missing => PropertiesStatus::Missing,
            PropertiesLoad::Malformed { .. } => PropertiesStatus::Malformed,
            PropertiesLoad::Loaded(_) => PropertiesStatus::Loaded,
        }
    }
}

/// Serializable summary of a [`PropertiesLoad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertiesStatus {
    Missing,
    Malformed,
    Loaded,
}

impl fmt::Display for PropertiesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PropertiesStatus::Missing => "missing",
            PropertiesStatus::Malformed => "malformed",
            PropertiesStatus::Loaded => "loaded",
        })
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// A characterization image, referenced by bare file name from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub file_name: String,
    /// Display label derived from the file name.
    pub label: String,
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

/// A navigation entry: link path plus display text (blank for global pages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarLink {
    pub href: String,
    pub text: String,
}

/// One navigation tree of the sidebar document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarTree {
    pub id: String,
    pub title: String,
    pub style: String,
    pub background: String,
    pub contents: Vec<SidebarLink>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// What the page builder found and wrote for one material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub page_path: PathBuf,
    pub has_summary: bool,
    pub properties: PropertiesStatus,
    pub image_count: usize,
}

/// Result of a full database build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub pages: Vec<PageSummary>,
    pub sidebar_path: PathBuf,
    pub global_page_count: usize,
}
