//! Repository Integration Tests
//!
//! Tests for InMemoryMedicationRepository.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use reminder_core::{HistoryStatus, MedicationSettings};

    use crate::domain::{
        DomainError, DoseRule, Medication, MedicationAction, MedicationPatch, NewMedication,
    };
    use crate::repository::{
        ActionRecord, InMemoryMedicationRepository, MedicationRepository, Repository,
    };

    fn medication(id: &str, refills: Option<u32>) -> Medication {
        let new = NewMedication {
            name: format!("Med {}", id),
            dosage: "10mg".to_string(),
            frequency: 2,
            times: vec!["08:00".parse().unwrap(), "20:00".parse().unwrap()],
            refills,
            settings: MedicationSettings::default(),
        };
        Medication::create(id.to_string(), new, Utc::now()).unwrap()
    }

    fn action(action: MedicationAction, entry_id: &str) -> ActionRecord {
        ActionRecord {
            action,
            entry_id: entry_id.to_string(),
            at: Utc::now(),
            dose_rule: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", None)).await.expect("Failed to create");

        let found = repo.find_by_id(&"a".to_string()).await.expect("Find failed");
        assert_eq!(found.map(|m| m.name), Some("Med a".to_string()));
        assert!(repo.find_by_id(&"zzz".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_id_conflicts() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", None)).await.unwrap();
        let err = repo.create(&medication("a", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", None)).await.unwrap();
        repo.create(&medication("b", None)).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_patch_clears_refills() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", Some(3))).await.unwrap();

        let patch: MedicationPatch = serde_json::from_str(r#"{"refills":null,"dosage":"20mg"}"#).unwrap();
        let updated = repo.patch("a", patch).await.expect("Patch failed");
        assert_eq!(updated.refills, None);
        assert_eq!(updated.dosage, "20mg");
        assert_eq!(updated.name, "Med a");
    }

    #[tokio::test]
    async fn test_patch_is_stored() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", Some(3))).await.unwrap();
        repo.create(&medication("b", Some(3))).await.unwrap();

        let patch: MedicationPatch = serde_json::from_str(r#"{"name":"Renamed"}"#).unwrap();
        repo.patch("a", patch).await.unwrap();

        let stored = repo.find_by_id(&"a".to_string()).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.refills, Some(3));
        let other = repo.find_by_id(&"b".to_string()).await.unwrap().unwrap();
        assert_eq!(other.name, "Med b");
    }

    #[tokio::test]
    async fn test_patch_missing_is_not_found() {
        let repo = InMemoryMedicationRepository::new();
        let err = repo.patch("nope", MedicationPatch::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", None)).await.unwrap();

        repo.delete(&"a".to_string()).await.expect("Delete failed");
        assert!(repo.list().await.unwrap().is_empty());

        let err = repo.delete(&"a".to_string()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_record_taken_updates_both_logs() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", Some(2))).await.unwrap();

        let (med, entry) = repo.record("a", action(MedicationAction::Taken, "h1")).await.unwrap();
        assert_eq!(med.refills, Some(1));
        assert_eq!(med.history.len(), 1);
        assert_eq!(entry.status, HistoryStatus::Taken);
        assert_eq!(entry.medication_name, "Med a");

        let history = repo.list_history().await.unwrap();
        assert_eq!(history, vec![entry]);
    }

    #[tokio::test]
    async fn test_record_snooze_and_skip_keep_refills() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", Some(2))).await.unwrap();

        let (_, snoozed) = repo
            .record("a", action(MedicationAction::Snoozed { minutes: 15 }, "h1"))
            .await
            .unwrap();
        let (med, skipped) = repo.record("a", action(MedicationAction::Skipped, "h2")).await.unwrap();

        assert_eq!(snoozed.snooze_duration, Some(15));
        assert_eq!(skipped.status, HistoryStatus::Skipped);
        assert_eq!(med.refills, Some(2));
        assert_eq!(repo.list_history().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_record_leaves_logs_untouched() {
        let repo = InMemoryMedicationRepository::new();
        let mut med = medication("a", Some(2));
        med.times = vec!["08:00".parse().unwrap()];
        repo.create(&med).await.unwrap();

        // A twelve hour window always contains one of the daily 08:00 slots
        let mut first = action(MedicationAction::Taken, "h1");
        first.dose_rule = Some(DoseRule::new(12 * 60));
        let mut second = first.clone();
        second.entry_id = "h2".to_string();

        repo.record("a", first).await.expect("First dose should pass");
        let err = repo.record("a", second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        assert_eq!(repo.list_history().await.unwrap().len(), 1);
        let stored = repo.find_by_id(&"a".to_string()).await.unwrap().unwrap();
        assert_eq!(stored.refills, Some(1));
        assert_eq!(stored.history.len(), 1);
    }

    #[tokio::test]
    async fn test_record_missing_is_not_found() {
        let repo = InMemoryMedicationRepository::new();
        let err = repo.record("nope", action(MedicationAction::Skipped, "h1")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_clear_history() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", None)).await.unwrap();
        repo.record("a", action(MedicationAction::Taken, "h1")).await.unwrap();

        repo.clear_history().await.unwrap();
        assert!(repo.list_history().await.unwrap().is_empty());
        let stored = repo.find_by_id(&"a".to_string()).await.unwrap().unwrap();
        assert!(stored.history.is_empty());
    }

    #[tokio::test]
    async fn test_history_outlives_deleted_medication() {
        let repo = InMemoryMedicationRepository::new();
        repo.create(&medication("a", None)).await.unwrap();
        repo.record("a", action(MedicationAction::Taken, "h1")).await.unwrap();
        repo.delete(&"a".to_string()).await.unwrap();

        let history = repo.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].medication_id, "a");
    }
}
