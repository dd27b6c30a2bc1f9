use crate::domain::model::{feature_order, FeatureRecord, FeatureRow};
use crate::utils::error::{BridgeError, Result};

/// Re-sequences a record into canonical model order.
///
/// Values are passed through as-is; interpreting numerics versus categorical
/// strings is left to the model. Extra keys are dropped. The first missing
/// key, in canonical order, is reported.
pub fn normalize(record: &FeatureRecord) -> Result<FeatureRow> {
    let values = feature_order()
        .map(|feature| {
            record
                .get(feature)
                .cloned()
                .ok_or_else(|| BridgeError::MissingField {
                    field: feature.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Normalized record into {} ordered features", values.len());
    Ok(FeatureRow::from_ordered(values))
}
