//! Parsers for the artifact files.
//!
//! All artifacts are JSON:
//! - `kmeans_model.json`: `{"cluster_centers": [[...], ...]}`
//! - `scaler.json`: `{"mean": [...], "scale": [...]}` (either key optional)
//! - tables: pandas "split" layout, `{"index": [...], "columns": [...], "data": [[...]]}`
//!
//! Customer ids are commonly exported as floats (`12346.0`) because the
//! source column held NaNs before cleaning; integral floats are accepted,
//! anything else is rejected.

use crate::error::{LoadError, Result};
use crate::loader::Artifact;
use crate::types::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Raw table as written by `DataFrame.to_json(orient="split")`
#[derive(Debug, Deserialize)]
struct SplitTable<R, C> {
    index: Vec<R>,
    columns: Vec<C>,
    data: Vec<Vec<Option<f64>>>,
}

/// A customer id as it appears in JSON: integer or integral float
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCustomerId {
    Int(u64),
    Float(f64),
}

impl RawCustomerId {
    fn into_customer_id(self) -> std::result::Result<CustomerId, String> {
        match self {
            RawCustomerId::Int(id) => Ok(id),
            RawCustomerId::Float(f) => {
                if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
                    Ok(f as CustomerId)
                } else {
                    Err(format!("invalid customer id: {}", f))
                }
            }
        }
    }
}

fn deserialize_error(filename: &str) -> impl Fn(String) -> LoadError + '_ {
    move |reason| LoadError::Deserialize {
        filename: filename.to_string(),
        reason,
    }
}

fn from_json<T: DeserializeOwned>(bytes: &[u8], filename: &str) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| deserialize_error(filename)(e.to_string()))
}

fn convert_ids(raw: Vec<RawCustomerId>) -> std::result::Result<Vec<CustomerId>, String> {
    raw.into_iter()
        .map(RawCustomerId::into_customer_id)
        .collect()
}

/// Replace missing cells with `fill`
fn fill_missing(data: Vec<Vec<Option<f64>>>, fill: f64) -> Vec<Vec<f64>> {
    data.into_iter()
        .map(|row| row.into_iter().map(|v| v.unwrap_or(fill)).collect())
        .collect()
}

/// Similarity tables must be square over the same label set
fn check_square<T: Eq + std::hash::Hash + Clone>(
    table: &LabeledTable<T, T>,
) -> std::result::Result<(), String> {
    if table.n_rows() != table.n_columns() {
        return Err(format!(
            "similarity table is not square: {} rows, {} columns",
            table.n_rows(),
            table.n_columns()
        ));
    }
    if let Some(pos) = table
        .row_labels()
        .iter()
        .position(|label| !table.has_column(label))
    {
        return Err(format!("row label at position {} has no matching column", pos));
    }
    Ok(())
}

impl Artifact for KMeansModel {
    const KIND: &'static str = "cluster model";

    fn parse(bytes: &[u8], filename: &str) -> Result<Self> {
        let model: KMeansModel = from_json(bytes, filename)?;
        model.validate().map_err(deserialize_error(filename))?;
        Ok(model)
    }
}

impl Artifact for StandardScaler {
    const KIND: &'static str = "scaler";

    fn parse(bytes: &[u8], filename: &str) -> Result<Self> {
        let scaler: StandardScaler = from_json(bytes, filename)?;
        scaler.validate().map_err(deserialize_error(filename))?;
        Ok(scaler)
    }
}

impl Artifact for UserItemMatrix {
    const KIND: &'static str = "user-item matrix";

    fn parse(bytes: &[u8], filename: &str) -> Result<Self> {
        let raw: SplitTable<RawCustomerId, ProductName> = from_json(bytes, filename)?;
        let rows = convert_ids(raw.index).map_err(deserialize_error(filename))?;
        // No purchase is recorded as zero quantity
        LabeledTable::from_rows(rows, raw.columns, fill_missing(raw.data, 0.0))
            .map_err(deserialize_error(filename))
    }
}

impl Artifact for UserSimilarity {
    const KIND: &'static str = "user similarity table";

    fn parse(bytes: &[u8], filename: &str) -> Result<Self> {
        let raw: SplitTable<RawCustomerId, RawCustomerId> = from_json(bytes, filename)?;
        let rows = convert_ids(raw.index).map_err(deserialize_error(filename))?;
        let columns = convert_ids(raw.columns).map_err(deserialize_error(filename))?;
        let table = LabeledTable::from_rows(rows, columns, fill_missing(raw.data, f64::NAN))
            .map_err(deserialize_error(filename))?;
        check_square(&table).map_err(deserialize_error(filename))?;
        Ok(table)
    }
}

impl Artifact for ItemSimilarity {
    const KIND: &'static str = "item similarity table";

    fn parse(bytes: &[u8], filename: &str) -> Result<Self> {
        let raw: SplitTable<ProductName, ProductName> = from_json(bytes, filename)?;
        let data = fill_missing(raw.data, f64::NAN);
        let table = LabeledTable::from_rows(raw.index, raw.columns, data)
            .map_err(deserialize_error(filename))?;
        check_square(&table).map_err(deserialize_error(filename))?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kmeans_model() {
        let json = br#"{"cluster_centers": [[0.0, 1.0, 2.0, 3.0], [1.0, 1.0, 1.0, 1.0]]}"#;
        let model = KMeansModel::parse(json, "kmeans_model.json").unwrap();
        assert_eq!(model.n_clusters(), 2);
        assert_eq!(model.n_features(), 4);
    }

    #[test]
    fn test_parse_kmeans_model_rejects_garbage() {
        let err = KMeansModel::parse(b"\x80\x04\x95pickle", "kmeans_model.json").unwrap_err();
        match err {
            LoadError::Deserialize { filename, .. } => assert_eq!(filename, "kmeans_model.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_scaler_partial() {
        let scaler = StandardScaler::parse(br#"{"scale": [2.0, 2.0]}"#, "scaler.json").unwrap();
        assert!(scaler.mean().is_none());
        assert_eq!(scaler.scale(), Some(&[2.0, 2.0][..]));
    }

    #[test]
    fn test_parse_user_item_matrix_with_float_ids() {
        let json = br#"{
            "index": [12346.0, 12347],
            "columns": ["WHITE MUG", "RED LAMP"],
            "data": [[1.0, null], [0.0, 4.0]]
        }"#;
        let matrix = UserItemMatrix::parse(json, "user_item_matrix.json").unwrap();
        assert_eq!(matrix.row_labels(), &[12346, 12347]);
        assert_eq!(matrix.get(&12346u64, "RED LAMP"), Some(0.0));
        assert_eq!(matrix.get(&12347u64, "RED LAMP"), Some(4.0));
    }

    #[test]
    fn test_fractional_customer_id_rejected() {
        let json = br#"{"index": [1.5], "columns": ["A"], "data": [[1.0]]}"#;
        let err = UserItemMatrix::parse(json, "user_item_matrix.json").unwrap_err();
        assert!(err.to_string().contains("invalid customer id"));
    }

    #[test]
    fn test_customer_id_beyond_u64_rejected() {
        // 2^64 would saturate to u64::MAX
        let json = br#"{"index": [18446744073709551616.0], "columns": ["A"], "data": [[1.0]]}"#;
        let err = UserItemMatrix::parse(json, "user_item_matrix.json").unwrap_err();
        assert!(err.to_string().contains("invalid customer id"));

        let json = br#"{"index": [9223372036854775808.0], "columns": ["A"], "data": [[1.0]]}"#;
        let matrix = UserItemMatrix::parse(json, "user_item_matrix.json").unwrap();
        assert_eq!(matrix.row_labels(), &[1u64 << 63]);
    }

    #[test]
    fn test_similarity_must_be_square() {
        let json = br#"{"index": ["A", "B"], "columns": ["A"], "data": [[1.0], [0.5]]}"#;
        let err = ItemSimilarity::parse(json, "item_sim_df.json").unwrap_err();
        assert!(err.to_string().contains("not square"));

        let json = br#"{
            "index": ["A", "B"],
            "columns": ["A", "C"],
            "data": [[1.0, 0.0], [0.0, 1.0]]
        }"#;
        let err = ItemSimilarity::parse(json, "item_sim_df.json").unwrap_err();
        assert!(err.to_string().contains("no matching column"));
    }

    #[test]
    fn test_similarity_missing_cells_are_nan() {
        let json = br#"{"index": [1, 2], "columns": [1, 2], "data": [[1.0, null], [0.2, 1.0]]}"#;
        let table = UserSimilarity::parse(json, "user_sim_df.json").unwrap();
        assert!(table.get(&1u64, &2u64).unwrap().is_nan());
        assert_eq!(table.get(&2u64, &1u64), Some(0.2));
    }
}
