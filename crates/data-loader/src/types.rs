//! Core domain types for the dashboard artifacts.
//!
//! Five artifacts are produced by an offline training job and versioned
//! together:
//! - a k-means cluster model and the standard scaler fitted alongside it
//! - a user-item purchase matrix
//! - user-user and item-item similarity tables
//!
//! The tables share one representation, `LabeledTable`, a dense row-major
//! matrix with label lookups in both dimensions.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a customer
pub type CustomerId = u64;

/// Products are identified by their description text
pub type ProductName = String;

/// Purchase quantities, customers by products
pub type UserItemMatrix = LabeledTable<CustomerId, ProductName>;

/// Square customer-by-customer similarity scores
pub type UserSimilarity = LabeledTable<CustomerId, CustomerId>;

/// Square product-by-product similarity scores
pub type ItemSimilarity = LabeledTable<ProductName, ProductName>;

// =============================================================================
// Segmentation Model Types
// =============================================================================

/// Trained k-means model: one center per cluster, cluster id = center position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansModel {
    cluster_centers: Vec<Vec<f64>>,
}

impl KMeansModel {
    /// Build a model from its cluster centers.
    ///
    /// Fails if there are no centers or the centers have differing or zero length.
    pub fn new(cluster_centers: Vec<Vec<f64>>) -> std::result::Result<Self, String> {
        let model = Self { cluster_centers };
        model.validate()?;
        Ok(model)
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        let first = self
            .cluster_centers
            .first()
            .ok_or_else(|| "model has no cluster centers".to_string())?;
        if first.is_empty() {
            return Err("cluster centers have zero features".to_string());
        }
        for (idx, center) in self.cluster_centers.iter().enumerate() {
            if center.len() != first.len() {
                return Err(format!(
                    "cluster center {} has {} features, expected {}",
                    idx,
                    center.len(),
                    first.len()
                ));
            }
        }
        Ok(())
    }

    pub fn cluster_centers(&self) -> &[Vec<f64>] {
        &self.cluster_centers
    }

    pub fn n_clusters(&self) -> usize {
        self.cluster_centers.len()
    }

    pub fn n_features(&self) -> usize {
        self.cluster_centers.first().map(|c| c.len()).unwrap_or(0)
    }
}

/// Fitted standard scaler: `(x - mean) / scale`
///
/// Either step may be absent, matching a scaler fitted with centering or
/// scaling turned off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    mean: Option<Vec<f64>>,
    #[serde(default)]
    scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new(
        mean: Option<Vec<f64>>,
        scale: Option<Vec<f64>>,
    ) -> std::result::Result<Self, String> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if let (Some(mean), Some(scale)) = (&self.mean, &self.scale) {
            if mean.len() != scale.len() {
                return Err(format!(
                    "mean has {} features but scale has {}",
                    mean.len(),
                    scale.len()
                ));
            }
        }
        if let Some(scale) = &self.scale {
            if scale.iter().any(|s| !s.is_finite()) {
                return Err("scale contains a non-finite value".to_string());
            }
        }
        Ok(())
    }

    pub fn mean(&self) -> Option<&[f64]> {
        self.mean.as_deref()
    }

    pub fn scale(&self) -> Option<&[f64]> {
        self.scale.as_deref()
    }

    /// Number of features the scaler was fitted on, if it carries any parameters
    pub fn n_features(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .or(self.scale.as_ref())
            .map(|v| v.len())
    }
}

// =============================================================================
// LabeledTable - dense matrix with labelled axes
// =============================================================================

/// Dense row-major table whose rows and columns are addressed by label.
///
/// Labels are unique per axis. Lookups by label are O(1) through the two
/// position maps.
#[derive(Debug, Clone)]
pub struct LabeledTable<R, C> {
    rows: Vec<R>,
    columns: Vec<C>,
    values: Vec<f64>,
    row_positions: HashMap<R, usize>,
    column_positions: HashMap<C, usize>,
}

impl<R, C> LabeledTable<R, C>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    /// Build a table from labels and row-major data.
    ///
    /// Fails on duplicate labels or if `data` is not `rows.len()` rows of
    /// `columns.len()` values.
    pub fn from_rows(
        rows: Vec<R>,
        columns: Vec<C>,
        data: Vec<Vec<f64>>,
    ) -> std::result::Result<Self, String> {
        if data.len() != rows.len() {
            return Err(format!(
                "table has {} row labels but {} data rows",
                rows.len(),
                data.len()
            ));
        }

        let mut values = Vec::with_capacity(rows.len() * columns.len());
        for (idx, row) in data.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(format!(
                    "data row {} has {} values, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                ));
            }
            values.extend(row);
        }

        let row_positions = position_map(&rows, "row")?;
        let column_positions = position_map(&columns, "column")?;

        Ok(Self {
            rows,
            columns,
            values,
            row_positions,
            column_positions,
        })
    }

    pub fn row_labels(&self) -> &[R] {
        &self.rows
    }

    pub fn column_labels(&self) -> &[C] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn row_position<Q>(&self, label: &Q) -> Option<usize>
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.row_positions.get(label).copied()
    }

    pub fn column_position<Q>(&self, label: &Q) -> Option<usize>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.column_positions.get(label).copied()
    }

    pub fn has_row<Q>(&self, label: &Q) -> bool
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.row_positions.contains_key(label)
    }

    pub fn has_column<Q>(&self, label: &Q) -> bool
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.column_positions.contains_key(label)
    }

    /// Value at a (row, column) position pair
    ///
    /// Positions come from `row_position`/`column_position`; out-of-range
    /// positions are a caller bug.
    pub fn value_at(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.columns.len() + column]
    }

    /// Value at a (row label, column label) pair
    pub fn get<QR, QC>(&self, row: &QR, column: &QC) -> Option<f64>
    where
        R: Borrow<QR>,
        C: Borrow<QC>,
        QR: Hash + Eq + ?Sized,
        QC: Hash + Eq + ?Sized,
    {
        let r = self.row_position(row)?;
        let c = self.column_position(column)?;
        Some(self.value_at(r, c))
    }

    /// All values of one row, in column order
    pub fn row<Q>(&self, label: &Q) -> Option<&[f64]>
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let r = self.row_position(label)?;
        let width = self.columns.len();
        Some(&self.values[r * width..(r + 1) * width])
    }

    /// All values of one column paired with their row labels, in row order
    pub fn column<Q>(&self, label: &Q) -> Option<impl Iterator<Item = (&R, f64)> + '_>
    where
        C: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let c = self.column_position(label)?;
        let width = self.columns.len();
        Some(
            self.rows
                .iter()
                .enumerate()
                .map(move |(r, row_label)| (row_label, self.values[r * width + c])),
        )
    }
}

fn position_map<T: Clone + Eq + Hash>(
    labels: &[T],
    axis: &str,
) -> std::result::Result<HashMap<T, usize>, String> {
    let mut positions = HashMap::with_capacity(labels.len());
    for (idx, label) in labels.iter().enumerate() {
        if positions.insert(label.clone(), idx).is_some() {
            return Err(format!("duplicate {} label at position {}", axis, idx));
        }
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> UserItemMatrix {
        LabeledTable::from_rows(
            vec![10, 20],
            vec!["MUG".to_string(), "LAMP".to_string(), "TEA".to_string()],
            vec![vec![1.0, 0.0, 3.0], vec![0.0, 2.0, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_labels() {
        let table = create_test_table();
        assert_eq!(table.get(&10u64, "TEA"), Some(3.0));
        assert_eq!(table.get(&20u64, "LAMP"), Some(2.0));
        assert_eq!(table.get(&30u64, "LAMP"), None);
        assert_eq!(table.get(&10u64, "SPOON"), None);
    }

    #[test]
    fn test_row_and_column_views() {
        let table = create_test_table();
        assert_eq!(table.row(&20u64).unwrap(), &[0.0, 2.0, 0.0]);

        let column: Vec<(u64, f64)> = table
            .column("MUG")
            .unwrap()
            .map(|(id, v)| (*id, v))
            .collect();
        assert_eq!(column, vec![(10, 1.0), (20, 0.0)]);
        assert!(table.column("SPOON").is_none());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = UserItemMatrix::from_rows(
            vec![1, 2],
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0, 2.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(err.contains("data row 1"));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = UserItemMatrix::from_rows(
            vec![1, 1],
            vec!["A".to_string()],
            vec![vec![1.0], vec![2.0]],
        )
        .unwrap_err();
        assert!(err.contains("duplicate row label"));
    }

    #[test]
    fn test_kmeans_model_validation() {
        assert!(KMeansModel::new(vec![]).is_err());
        assert!(KMeansModel::new(vec![vec![0.0, 1.0], vec![1.0]]).is_err());

        let model = KMeansModel::new(vec![vec![0.0; 4]; 3]).unwrap();
        assert_eq!(model.n_clusters(), 3);
        assert_eq!(model.n_features(), 4);
    }

    #[test]
    fn test_scaler_validation() {
        assert!(StandardScaler::new(Some(vec![0.0; 4]), Some(vec![1.0; 3])).is_err());

        let scaler = StandardScaler::new(None, Some(vec![2.0; 4])).unwrap();
        assert_eq!(scaler.n_features(), Some(4));
        assert!(StandardScaler::new(None, None).unwrap().n_features().is_none());
    }
}
