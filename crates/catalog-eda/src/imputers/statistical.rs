//! Statistical imputation methods.
//!
//! Provides constant and mode imputation for text columns.

use super::{FillPolicy, ImputationPlan, ImputationRule};
use crate::error::{EdaError, Result};
use crate::types::ImputationStep;
use crate::utils::{fill_string_nulls, string_mode};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Apply every rule of `plan` in order.
    ///
    /// Only missing cells change. Mode values are computed from the column
    /// as it stands when its rule runs. `on_rule` is called with the rule's
    /// position before the rule is applied.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` when a rule names an absent column, `NoValidValues`
    /// when a mode rule meets a column with no values at all.
    pub fn apply_plan<F>(
        mut df: DataFrame,
        plan: &ImputationPlan,
        processing_steps: &mut Vec<String>,
        mut on_rule: F,
    ) -> Result<(DataFrame, Vec<ImputationStep>)>
    where
        F: FnMut(usize, &ImputationRule),
    {
        let mut steps = Vec::with_capacity(plan.rules.len());

        for (i, rule) in plan.rules.iter().enumerate() {
            on_rule(i, rule);
            let step = Self::apply_rule(&mut df, rule)?;
            processing_steps.push(format!(
                "Filled {} missing '{}' values with {}: '{}'",
                step.filled_count, step.column, step.policy, step.fill_value
            ));
            steps.push(step);
        }

        Ok((df, steps))
    }

    /// Apply a single rule in place.
    pub fn apply_rule(df: &mut DataFrame, rule: &ImputationRule) -> Result<ImputationStep> {
        let column = rule.column.as_str();
        let series = df
            .column(column)
            .map_err(|_| EdaError::ColumnNotFound(column.to_string()))?
            .as_materialized_series()
            .clone();

        let (fill_value, policy) = match &rule.policy {
            FillPolicy::Constant(value) => (value.clone(), "constant"),
            FillPolicy::Mode => {
                let mode = string_mode(&series)
                    .ok_or_else(|| EdaError::NoValidValues(column.to_string()))?;
                (mode, "mode")
            }
        };

        let filled_count = series.null_count();
        let filled = fill_string_nulls(&series, &fill_value).map_err(|e| {
            EdaError::ImputationFailed {
                column: column.to_string(),
                reason: e.to_string(),
            }
        })?;
        df.replace(column, filled)?;

        debug!(
            "Imputed {} cells of '{}' with {} '{}'",
            filled_count, column, policy, fill_value
        );

        Ok(ImputationStep {
            column: column.to_string(),
            policy: policy.to_string(),
            fill_value,
            filled_count,
        })
    }
}
