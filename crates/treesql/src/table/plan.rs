//! Index negotiation for the `git_files` table.
//!
//! Every scan is a full history walk, so no constraint or ordering offered by
//! the planner is consumed. Pushdown, if it is ever added, belongs in [`plan`];
//! the SQLite shim applies whatever [`IndexChoice`] comes back.

/// Estimated cost reported for a full scan.
pub const FULL_SCAN_COST: f64 = 1_000_000.0;

/// A constraint the planner offers for pushdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferedConstraint {
    pub column: i32,
    pub op: String,
    pub usable: bool,
}

/// The table's answer to the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexChoice {
    /// One flag per offered constraint; `true` marks it consumed.
    pub used: Vec<bool>,
    pub idx_num: i32,
    pub estimated_cost: f64,
    pub order_by_consumed: bool,
}

pub fn plan(constraints: &[OfferedConstraint], order_by_count: usize) -> IndexChoice {
    tracing::debug!(
        constraints = constraints.len(),
        order_by = order_by_count,
        "planning full scan"
    );
    for c in constraints {
        tracing::debug!(column = c.column, op = %c.op, usable = c.usable, "constraint left to host");
    }

    IndexChoice {
        used: vec![false; constraints.len()],
        idx_num: 0,
        estimated_cost: FULL_SCAN_COST,
        order_by_consumed: false,
    }
}
