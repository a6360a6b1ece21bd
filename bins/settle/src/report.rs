//! JSON report printed by the runner.

use chrono::{DateTime, Utc};
use divvy_core::ledger::PairwiseBalance;
use divvy_core::{GroupSnapshot, GroupSummary, SettlementEngine};
use divvy_shared::AppResult;
use divvy_shared::types::MemberId;
use serde::Serialize;

/// Group summary plus an optional per-member view.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The group summary, inlined at the top level of the JSON.
    #[serde(flatten)]
    pub summary: GroupSummary,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The viewer's balances, when a viewer was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerReport>,
}

/// One member's unsettled balances with everyone else.
#[derive(Debug, Serialize)]
pub struct ViewerReport {
    /// The viewing member.
    pub member_id: MemberId,
    /// Unsettled balances with each other member, largest first.
    pub pending: Vec<PairwiseBalance>,
}

impl Report {
    /// Builds the report for `snapshot`, including `viewer`'s balances if given.
    pub fn build(
        engine: &SettlementEngine,
        snapshot: &GroupSnapshot,
        viewer: Option<MemberId>,
    ) -> AppResult<Self> {
        let summary = engine.summarize(snapshot)?;
        let viewer = viewer
            .map(|member_id| -> AppResult<ViewerReport> {
                Ok(ViewerReport {
                    member_id,
                    pending: engine.pending_balances(snapshot, member_id)?,
                })
            })
            .transpose()?;

        Ok(Self {
            summary,
            generated_at: Utc::now(),
            viewer,
        })
    }
}
