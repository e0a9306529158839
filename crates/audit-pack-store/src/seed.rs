use audit_pack_model::{AuditItem, Department, DocumentName};

/// The fixed demo checklist every new session starts from, all Pending.
#[must_use]
pub fn standard_pack() -> Vec<AuditItem> {
    [
        ("HR", "Training Records", "HR Manager", "Compliance Lead"),
        (
            "Finance",
            "Payroll Compliance",
            "Finance Officer",
            "Internal Auditor",
        ),
        (
            "IT",
            "System Access Logs",
            "IT Administrator",
            "Security Officer",
        ),
        (
            "Operations",
            "Safety Certificates",
            "Operations Head",
            "Safety Inspector",
        ),
    ]
    .into_iter()
    .map(|(department, document, owner, reviewer)| {
        AuditItem::new(
            Department::parse(department).expect("seed department"),
            DocumentName::parse(document).expect("seed document"),
        )
        .with_assignees(owner, reviewer)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_pack_model::ItemStatus;

    #[test]
    fn standard_pack_matches_demo_rows() {
        let items = standard_pack();
        assert_eq!(items.len(), 4);
        assert!(items
            .iter()
            .all(|item| item.status == ItemStatus::Pending && item.last_updated.is_none()));
        let keys: Vec<(String, String)> = items
            .iter()
            .map(|item| (item.department.to_string(), item.document.to_string()))
            .collect();
        assert_eq!(
            keys,
            [
                ("HR".to_string(), "Training Records".to_string()),
                ("Finance".to_string(), "Payroll Compliance".to_string()),
                ("IT".to_string(), "System Access Logs".to_string()),
                ("Operations".to_string(), "Safety Certificates".to_string()),
            ]
        );
    }
}
