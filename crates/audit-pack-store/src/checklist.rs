use audit_pack_model::{AuditItem, ChecklistSummary, Department, DocumentName, ItemStatus};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeedError {
    DuplicateKey { department: String, document: String },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey {
                department,
                document,
            } => write!(
                f,
                "duplicate checklist key: {department}/{document}"
            ),
        }
    }
}

impl std::error::Error for SeedError {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    ItemNotFound { department: String, document: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound {
                department,
                document,
            } => write!(
                f,
                "no checklist item matches {department}/{document}"
            ),
        }
    }
}

impl std::error::Error for StoreError {}

/// The checklist table of one session. Rows are fixed at construction; the
/// only mutation is marking a row Completed.
#[derive(Debug, Clone)]
pub struct ChecklistStore {
    items: Vec<AuditItem>,
}

impl ChecklistStore {
    /// Builds a store from seed rows, rejecting duplicate
    /// (department, document) keys — the pair is the lookup key for
    /// [`mark_completed`](Self::mark_completed) and must be unique.
    pub fn new(items: Vec<AuditItem>) -> Result<Self, SeedError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert((item.department.clone(), item.document.clone())) {
                return Err(SeedError::DuplicateKey {
                    department: item.department.to_string(),
                    document: item.document.to_string(),
                });
            }
        }
        Ok(Self { items })
    }

    #[must_use]
    pub fn with_standard_pack() -> Self {
        Self::new(crate::seed::standard_pack()).expect("standard pack keys are unique")
    }

    /// Unique department names in first-seen order, for the selector.
    #[must_use]
    pub fn departments(&self) -> Vec<Department> {
        let mut out: Vec<Department> = Vec::new();
        for item in &self.items {
            if !out.contains(&item.department) {
                out.push(item.department.clone());
            }
        }
        out
    }

    /// Document names belonging to `department`, in row order. An unknown
    /// department yields an empty list, not an error.
    #[must_use]
    pub fn documents(&self, department: &Department) -> Vec<DocumentName> {
        self.items
            .iter()
            .filter(|item| item.department == *department)
            .map(|item| item.document.clone())
            .collect()
    }

    /// Marks the row matching the key Completed at `at_millis`. Idempotent:
    /// a row already Completed is re-stamped, status unchanged.
    pub fn mark_completed(
        &mut self,
        department: &Department,
        document: &DocumentName,
        at_millis: u64,
    ) -> Result<&AuditItem, StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.matches(department, document))
            .ok_or_else(|| StoreError::ItemNotFound {
                department: department.to_string(),
                document: document.to_string(),
            })?;
        item.complete_at(at_millis);
        Ok(item)
    }

    /// Fraction of rows Completed, in [0, 1]. An empty checklist has ratio
    /// 0 rather than dividing by zero.
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.items.len() as f64
    }

    #[must_use]
    pub fn summary(&self) -> ChecklistSummary {
        ChecklistSummary::new(
            self.departments().len() as u64,
            self.items.len() as u64,
            self.completed_count() as u64,
        )
    }

    #[must_use]
    pub fn items(&self) -> &[AuditItem] {
        &self.items
    }

    fn completed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == ItemStatus::Completed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(input: &str) -> Department {
        Department::parse(input).expect("department")
    }

    fn doc(input: &str) -> DocumentName {
        DocumentName::parse(input).expect("document")
    }

    #[test]
    fn seeded_store_summary_starts_all_pending() {
        let store = ChecklistStore::with_standard_pack();
        let summary = store.summary();
        assert_eq!(summary.department_count, 4);
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.completed_count, 0);
        assert_eq!(store.completion_ratio(), 0.0);
    }

    #[test]
    fn departments_keep_first_seen_order() {
        let store = ChecklistStore::with_standard_pack();
        let names: Vec<String> = store
            .departments()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["HR", "Finance", "IT", "Operations"]);
    }

    #[test]
    fn departments_do_not_repeat_shared_labels() {
        let items = vec![
            AuditItem::new(dept("HR"), doc("Training Records")),
            AuditItem::new(dept("HR"), doc("Onboarding Forms")),
            AuditItem::new(dept("Finance"), doc("Payroll Compliance")),
        ];
        let store = ChecklistStore::new(items).expect("store");
        assert_eq!(store.departments().len(), 2);
        assert_eq!(store.summary().department_count, 2);
        assert_eq!(
            store.documents(&dept("HR")),
            vec![doc("Training Records"), doc("Onboarding Forms")]
        );
    }

    #[test]
    fn documents_filter_by_department_only() {
        let store = ChecklistStore::with_standard_pack();
        assert_eq!(
            store.documents(&dept("Finance")),
            vec![doc("Payroll Compliance")]
        );
        assert!(store.documents(&dept("Legal")).is_empty());
    }

    #[test]
    fn mark_completed_stamps_row_and_moves_ratio() {
        let mut store = ChecklistStore::with_standard_pack();
        let item = store
            .mark_completed(&dept("HR"), &doc("Training Records"), 1_700_000_000_000)
            .expect("mark completed");
        assert_eq!(item.status, ItemStatus::Completed);
        assert_eq!(item.last_updated, Some(1_700_000_000_000));
        assert_eq!(store.completion_ratio(), 0.25);
        assert_eq!(store.summary().completed_count, 1);
    }

    #[test]
    fn mark_completed_is_idempotent_and_restamps() {
        let mut store = ChecklistStore::with_standard_pack();
        store
            .mark_completed(&dept("HR"), &doc("Training Records"), 1_000)
            .expect("first");
        let item = store
            .mark_completed(&dept("HR"), &doc("Training Records"), 2_000)
            .expect("second");
        assert_eq!(item.status, ItemStatus::Completed);
        assert_eq!(item.last_updated, Some(2_000));
        assert_eq!(store.summary().completed_count, 1);
    }

    #[test]
    fn mark_completed_unknown_key_leaves_store_unchanged() {
        let mut store = ChecklistStore::with_standard_pack();
        let err = store
            .mark_completed(&dept("HR"), &doc("Nonexistent Document"), 1_000)
            .expect_err("not found");
        assert_eq!(
            err,
            StoreError::ItemNotFound {
                department: "HR".to_string(),
                document: "Nonexistent Document".to_string(),
            }
        );
        assert_eq!(store.summary().completed_count, 0);
        assert!(store
            .items()
            .iter()
            .all(|item| item.status == ItemStatus::Pending && item.last_updated.is_none()));
    }

    #[test]
    fn status_never_leaves_completed() {
        let mut store = ChecklistStore::with_standard_pack();
        for stamp in [10, 20, 30] {
            store
                .mark_completed(&dept("IT"), &doc("System Access Logs"), stamp)
                .expect("mark completed");
            let row = store
                .items()
                .iter()
                .find(|item| item.matches(&dept("IT"), &doc("System Access Logs")))
                .expect("row");
            assert_eq!(row.status, ItemStatus::Completed);
        }
    }

    #[test]
    fn ratio_reaches_one_when_every_row_completes() {
        let mut store = ChecklistStore::with_standard_pack();
        let keys: Vec<(Department, DocumentName)> = store
            .items()
            .iter()
            .map(|item| (item.department.clone(), item.document.clone()))
            .collect();
        for (department, document) in &keys {
            store
                .mark_completed(department, document, 5_000)
                .expect("mark completed");
        }
        assert_eq!(store.completion_ratio(), 1.0);
        let summary = store.summary();
        assert_eq!(summary.completed_count, summary.total_items);
    }

    #[test]
    fn empty_checklist_ratio_is_zero() {
        let store = ChecklistStore::new(Vec::new()).expect("empty store");
        assert_eq!(store.completion_ratio(), 0.0);
        let summary = store.summary();
        assert_eq!(summary.department_count, 0);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.completed_count, 0);
    }

    #[test]
    fn duplicate_seed_keys_are_rejected() {
        let items = vec![
            AuditItem::new(dept("HR"), doc("Training Records")),
            AuditItem::new(dept("HR"), doc("Training Records")),
        ];
        let err = ChecklistStore::new(items).expect_err("duplicate");
        assert_eq!(
            err,
            SeedError::DuplicateKey {
                department: "HR".to_string(),
                document: "Training Records".to_string(),
            }
        );
    }

    #[test]
    fn same_document_name_allowed_across_departments() {
        let items = vec![
            AuditItem::new(dept("HR"), doc("Access Review")),
            AuditItem::new(dept("IT"), doc("Access Review")),
        ];
        assert!(ChecklistStore::new(items).is_ok());
    }
}
