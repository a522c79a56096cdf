//! Column role detection

use polars::prelude::*;

/// Column names grouped by how the report treats them.
///
/// Roles come from the raw schema, before target encoding: the raw target is
/// a label column, so it shows up among the categorical columns and never
/// among the numerical ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Numeric columns in schema order, target excluded
    pub numerical: Vec<String>,
    /// String, categorical and boolean columns in schema order
    pub categorical: Vec<String>,
}

impl ColumnRoles {
    pub fn detect(df: &DataFrame, target: &str) -> Self {
        let mut roles = ColumnRoles::default();

        for col in df.get_columns() {
            let name = col.name().to_string();
            if is_numeric(col.dtype()) {
                if name != target {
                    roles.numerical.push(name);
                }
            } else if is_categorical(col.dtype()) {
                roles.categorical.push(name);
            }
        }

        roles
    }

    /// Numerical columns with the leading identifier columns dropped
    pub fn summarizable(&self, skip_leading: usize) -> &[String] {
        let start = skip_leading.min(self.numerical.len());
        &self.numerical[start..]
    }
}

pub fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric()
}

pub fn is_categorical(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Boolean | DataType::Categorical(_, _) | DataType::Enum(_, _)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_roles() {
        let df = df! {
            "row_id" => [0i64, 1, 2],
            "age" => [30.0f64, 40.0, 50.0],
            "gender" => ["Male", "Female", "Male"],
            "loyal" => [true, false, true],
            "satisfaction" => ["satisfied", "satisfied", "neutral or dissatisfied"],
        }
        .unwrap();

        let roles = ColumnRoles::detect(&df, "satisfaction");
        assert_eq!(roles.numerical, vec!["row_id", "age"]);
        assert_eq!(roles.categorical, vec!["gender", "loyal", "satisfaction"]);
        assert_eq!(roles.summarizable(1), &["age".to_string()]);
        assert!(roles.summarizable(5).is_empty());
    }

    #[test]
    fn test_numeric_target_is_not_numerical_feature() {
        let df = df! {
            "x" => [1.0f64, 2.0],
            "target" => [0i32, 1],
        }
        .unwrap();

        let roles = ColumnRoles::detect(&df, "target");
        assert_eq!(roles.numerical, vec!["x"]);
        assert!(roles.categorical.is_empty());
    }
}
