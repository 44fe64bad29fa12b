//! Sequenced execution of the four reconciliation passes.

use crate::{DataReconciler, MembershipReconciler, PropertyReconciler, StatusReconciler};
use std::sync::Arc;
use tandem_core::{SyncEndpoint, SyncResult, VocabularyMap};
use tracing::info;

/// Runs all four reconcilers over one master/slave pair, in order.
///
/// Later passes assume earlier passes' membership changes are visible
/// through `get_all`, so the pipeline always runs membership first, then
/// status, then data, then property, within a single synchronous call.
/// Cadence and retry stay with the caller; the pipeline adds no timers
/// and stops at the first failing pass.
///
/// Callers that need a different ordering, or only a subset of the
/// passes, construct the individual reconcilers directly.
pub struct ReconcilerPipeline<M: SyncEndpoint, S: SyncEndpoint> {
    membership: MembershipReconciler<M, S>,
    status: StatusReconciler<M, S>,
    data: DataReconciler<M, S>,
    property: PropertyReconciler<M, S>,
}

impl<M: SyncEndpoint, S: SyncEndpoint> ReconcilerPipeline<M, S> {
    /// Builds a pipeline sharing one endpoint pair and vocabulary.
    pub fn new(master: Arc<M>, slave: Arc<S>, vocabulary: Arc<VocabularyMap>) -> Self {
        Self {
            membership: MembershipReconciler::new(
                Arc::clone(&master),
                Arc::clone(&slave),
                Arc::clone(&vocabulary),
            ),
            status: StatusReconciler::new(
                Arc::clone(&master),
                Arc::clone(&slave),
                Arc::clone(&vocabulary),
            ),
            data: DataReconciler::new(Arc::clone(&master), Arc::clone(&slave)),
            property: PropertyReconciler::new(master, slave, vocabulary),
        }
    }

    /// Runs one full sequenced pass.
    pub fn synchronize_all(&self) -> SyncResult<()> {
        self.membership.synchronize()?;
        self.status.synchronize()?;
        self.data.synchronize()?;
        self.property.synchronize()?;
        info!("pipeline pass complete");
        Ok(())
    }
}
