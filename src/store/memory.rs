//! In-process record store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditRecord, PointWeightRule, SalesRecord};

use super::{RecordFilter, RecordStore};

/// A [`RecordStore`] holding records in memory.
///
/// Used by the HTTP API to score the records posted with a request, and
/// by tests.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    sales: RwLock<Vec<SalesRecord>>,
    audits: RwLock<Vec<AuditRecord>>,
    rules: RwLock<Vec<PointWeightRule>>,
}

fn read<'a, T>(lock: &'a RwLock<T>, what: &str) -> EngineResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| EngineError::StoreUnavailable {
        message: format!("{what} lock poisoned"),
    })
}

fn write<'a, T>(lock: &'a RwLock<T>, what: &str) -> EngineResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| EngineError::StoreUnavailable {
        message: format!("{what} lock poisoned"),
    })
}

impl InMemoryRecordStore {
    /// Creates an empty store with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store using `rules` as the rule table.
    pub fn with_rules(rules: Vec<PointWeightRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
            ..Self::default()
        }
    }

    /// Appends sales lines.
    pub fn insert_sales<I>(&self, records: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = SalesRecord>,
    {
        write(&self.sales, "sales")?.extend(records);
        Ok(())
    }

    /// Appends audit findings.
    pub fn insert_audits<I>(&self, records: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = AuditRecord>,
    {
        write(&self.audits, "audits")?.extend(records);
        Ok(())
    }

    /// Replaces the rule table.
    pub fn set_point_weight_rules(&self, rules: Vec<PointWeightRule>) -> EngineResult<()> {
        *write(&self.rules, "rules")? = rules;
        Ok(())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn sales(&self, filter: &RecordFilter) -> EngineResult<Vec<SalesRecord>> {
        Ok(read(&self.sales, "sales")?
            .iter()
            .filter(|sale| filter.matches_sale(sale))
            .cloned()
            .collect())
    }

    fn audits(&self, filter: &RecordFilter) -> EngineResult<Vec<AuditRecord>> {
        Ok(read(&self.audits, "audits")?
            .iter()
            .filter(|audit| filter.matches_audit(audit))
            .cloned()
            .collect())
    }

    fn point_weight_rules(&self) -> EngineResult<Vec<PointWeightRule>> {
        Ok(read(&self.rules, "rules")?.clone())
    }
}
