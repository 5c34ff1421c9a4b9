//! Properties file loading.
//!
//! The CSV is read with polars (header row, type inference) and converted
//! straight into [`PropertiesTable`] so no other crate sees a DataFrame.

use std::path::Path;

use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, PolarsResult, SerReader};
use tracing::{debug, warn};

use matdoc_shared::{
    MatdocError, PropertiesLoad, PropertiesTable, PropertyColumn, Result, Scalar,
};

/// Load `<folder>/<properties_file>`.
///
/// Never fails: an absent file is [`PropertiesLoad::Missing`], and any read or
/// parse failure is [`PropertiesLoad::Malformed`] with the cause attached.
pub fn load_properties(folder: &Path, properties_file: &str) -> PropertiesLoad {
    let path = folder.join(properties_file);
    if !path.exists() {
        return PropertiesLoad::Missing;
    }

    match read_table(&path) {
        Ok(table) => {
            debug!(
                path = %path.display(),
                columns = table.columns.len(),
                rows = table.row_count(),
                "properties loaded"
            );
            PropertiesLoad::Loaded(table)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable properties file");
            PropertiesLoad::Malformed {
                reason: e.to_string(),
            }
        }
    }
}

/// Parse a comma-separated file whose first row holds the column names.
pub fn read_table(path: &Path) -> Result<PropertiesTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| MatdocError::parse(format!("{}: {e}", path.display())))?;

    frame_to_table(&df).map_err(|e| MatdocError::parse(format!("{}: {e}", path.display())))
}

fn frame_to_table(df: &DataFrame) -> PolarsResult<PropertiesTable> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let values = (0..df.height())
                .map(|i| column.get(i).map(|v| to_scalar(&v)))
                .collect::<PolarsResult<Vec<_>>>()?;
            Ok(PropertyColumn {
                name: column.name().to_string(),
                values,
            })
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    Ok(PropertiesTable { columns })
}

fn to_scalar(value: &AnyValue<'_>) -> Scalar {
    match value {
        AnyValue::Null => Scalar::Null,
        AnyValue::Boolean(v) => Scalar::Bool(*v),
        AnyValue::Int32(v) => Scalar::Int(i64::from(*v)),
        AnyValue::Int64(v) => Scalar::Int(*v),
        AnyValue::UInt32(v) => Scalar::UInt(u64::from(*v)),
        AnyValue::UInt64(v) => Scalar::UInt(*v),
        AnyValue::Float32(v) => Scalar::Float(f64::from(*v)),
        AnyValue::Float64(v) => Scalar::Float(*v),
        AnyValue::String(v) => Scalar::Text((*v).to_string()),
        AnyValue::StringOwned(v) => Scalar::Text(v.to_string()),
        other => Scalar::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("matdoc-properties-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_is_missing() {
        let tmp = temp_dir();
        assert_eq!(load_properties(&tmp, "properties.csv"), PropertiesLoad::Missing);
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn loads_columns_in_file_order() {
        let tmp = temp_dir();
        std::fs::write(
            tmp.join("properties.csv"),
            "property,value,unit\nband_gap,0.3,eV\nlattice_a,4.14,A\n",
        )
        .unwrap();

        let PropertiesLoad::Loaded(table) = load_properties(&tmp, "properties.csv") else {
            panic!("expected a loaded table");
        };

        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["property", "value", "unit"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[1].values, vec![Scalar::Float(0.3), Scalar::Float(4.14)]);
        assert_eq!(table.columns[0].values[1], Scalar::Text("lattice_a".into()));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn integer_columns_stay_integers() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("p.csv"), "space_group,z\n166,3\n").unwrap();

        let PropertiesLoad::Loaded(table) = load_properties(&tmp, "p.csv") else {
            panic!("expected a loaded table");
        };
        assert_eq!(table.columns[0].values[0].to_string(), "166");
        assert_eq!(table.columns[1].values[0].to_string(), "3");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ragged_row_is_malformed() {
        let tmp = temp_dir();
        std::fs::write(
            tmp.join("properties.csv"),
            "property,value\nband_gap,0.3\ndensity,7.68,g/cm3,extra\n",
        )
        .unwrap();

        let load = load_properties(&tmp, "properties.csv");
        assert!(
            matches!(load, PropertiesLoad::Malformed { .. }),
            "unexpected: {load:?}"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("properties.csv"), "a,a\n1,2\n").unwrap();

        let PropertiesLoad::Loaded(table) = load_properties(&tmp, "properties.csv") else {
            panic!("expected a loaded table");
        };
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a_duplicated_0"]);
        assert_eq!(table.columns[1].values, vec![Scalar::Int(2)]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn header_only_file_loads_with_no_rows() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("properties.csv"), "property,value\n").unwrap();

        let PropertiesLoad::Loaded(table) = load_properties(&tmp, "properties.csv") else {
            panic!("expected a loaded table");
        };
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.row_count(), 0);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_file_is_malformed() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("properties.csv"), "").unwrap();
        assert!(matches!(
            load_properties(&tmp, "properties.csv"),
            PropertiesLoad::Malformed { .. }
        ));
        let _ = std::fs::remove_dir_all(&tmp);
    }
}
