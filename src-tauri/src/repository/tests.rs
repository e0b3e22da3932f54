//! Repository Integration Tests
//!
//! Tests for the content and submission repositories with in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, StoredSubmission};
    use crate::repository::{
        init_memory_db, AttachmentStore, DocumentRepository, HomeRepository, Repository,
        SectionRepository, SubmissionRepository,
    };
    use site_content::{
        AttachmentLimits, AttachmentRef, ContactForm, DigitalService, HireUsRequest,
        PlsAdvantage, QualityDigitalSection, SectionImages, SectionKind, SectionPayload,
        ServiceCard, Submission, SubmissionKind,
    };

    fn setup() -> (SectionRepository, DocumentRepository, HomeRepository, SubmissionRepository) {
        let conn = init_memory_db().expect("Failed to init test DB");
        (
            SectionRepository::new(conn.clone()),
            DocumentRepository::new(conn.clone()),
            HomeRepository::new(conn.clone()),
            SubmissionRepository::new(conn),
        )
    }

    fn card(title: &str) -> ServiceCard {
        ServiceCard {
            title: title.to_string(),
            description: format!("{} description", title),
            ..Default::default()
        }
    }

    fn titles(payload: &SectionPayload) -> Vec<String> {
        match payload {
            SectionPayload::Services(items) => items.iter().map(|c| c.title.clone()).collect(),
            other => panic!("unexpected section {:?}", other.kind()),
        }
    }

    fn services(payload: SectionPayload) -> Vec<ServiceCard> {
        match payload {
            SectionPayload::Services(items) => items,
            other => panic!("unexpected section {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_empty_section_loads_empty() {
        let (sections, ..) = setup();
        let loaded = sections.load(SectionKind::Pricing).await.unwrap();
        assert_eq!(loaded, SectionPayload::Pricing(Vec::new()));
    }

    #[tokio::test]
    async fn test_replace_all_round_trip() {
        let (sections, ..) = setup();
        let saved = sections
            .replace_all(SectionPayload::Services(vec![card("A"), card("B")]))
            .await
            .unwrap();

        let stored = services(saved.clone());
        assert!(stored.iter().all(|c| c.id.is_some()));
        assert_eq!(stored.iter().map(|c| c.order).collect::<Vec<_>>(), vec![0, 1]);

        let loaded = sections.load(SectionKind::Services).await.unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_save_normalizes_order_from_position() {
        let (sections, ..) = setup();
        let mut a = card("A");
        a.order = 7;
        let mut b = card("B");
        b.order = 3;
        let saved = sections
            .replace_all(SectionPayload::Services(vec![a, b]))
            .await
            .unwrap();
        assert!(saved.is_dense());
        assert_eq!(titles(&saved), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_later_save_wins_without_merge() {
        let (sections, ..) = setup();
        sections
            .replace_all(SectionPayload::Services(vec![card("A"), card("B"), card("C")]))
            .await
            .unwrap();
        sections
            .replace_all(SectionPayload::Services(vec![card("X")]))
            .await
            .unwrap();

        let loaded = sections.load(SectionKind::Services).await.unwrap();
        assert_eq!(titles(&loaded), vec!["X"]);
    }

    #[tokio::test]
    async fn test_removed_item_is_not_resurrected() {
        let (sections, ..) = setup();
        let saved = services(
            sections
                .replace_all(SectionPayload::Services(vec![card("A"), card("B"), card("C")]))
                .await
                .unwrap(),
        );

        let mut edited = saved.clone();
        edited.remove(1);
        sections
            .replace_all(SectionPayload::Services(edited))
            .await
            .unwrap();

        let loaded = services(sections.load(SectionKind::Services).await.unwrap());
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, saved[0].id);
        assert_eq!(loaded[1].id, saved[2].id);
        assert_eq!(loaded[1].order, 1);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected_and_not_stored() {
        let (sections, ..) = setup();
        sections
            .replace_all(SectionPayload::Services(vec![card("A")]))
            .await
            .unwrap();

        let err = sections
            .replace_all(SectionPayload::Services(vec![card("B"), ServiceCard::default()]))
            .await
            .unwrap_err();
        match err {
            DomainError::Invalid(errors) => {
                assert_eq!(errors.message_for("items[1].title"), Some("is required"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let loaded = sections.load(SectionKind::Services).await.unwrap();
        assert_eq!(titles(&loaded), vec!["A"]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_conflict() {
        let (sections, ..) = setup();
        let mut a = card("A");
        a.id = Some("same".into());
        let mut b = card("B");
        b.id = Some("same".into());
        let err = sections
            .replace_all(SectionPayload::Services(vec![a, b]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_item_reindexes() {
        let (sections, ..) = setup();
        let saved = services(
            sections
                .replace_all(SectionPayload::Services(vec![card("A"), card("B"), card("C")]))
                .await
                .unwrap(),
        );
        let b_id = saved[1].id.clone().unwrap();

        sections
            .delete_item(SectionKind::Services, &b_id)
            .await
            .expect("Delete failed");

        let loaded = services(sections.load(SectionKind::Services).await.unwrap());
        assert_eq!(loaded.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(loaded.iter().map(|c| c.order).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_delete_stale_id_is_not_found() {
        let (sections, ..) = setup();
        let err = sections
            .delete_item(SectionKind::Services, "gone")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sections_are_isolated() {
        let (sections, ..) = setup();
        sections
            .replace_all(SectionPayload::Services(vec![card("A")]))
            .await
            .unwrap();
        let loaded = sections.load(SectionKind::ItCards).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_quality_digital_keeps_header_with_services() {
        let (sections, documents, ..) = setup();
        let composite = QualityDigitalSection {
            heading: "Digital quality".into(),
            subheading: "Across every channel".into(),
            services: vec![DigitalService {
                title: "Accessibility audits".into(),
                ..Default::default()
            }],
            images: vec!["quality/digital.png".into()],
        };
        sections
            .replace_all(SectionPayload::QualityDigital(composite))
            .await
            .unwrap();

        let loaded = sections.load(SectionKind::QualityDigital).await.unwrap();
        match loaded {
            SectionPayload::QualityDigital(section) => {
                assert_eq!(section.heading, "Digital quality");
                assert_eq!(section.services.len(), 1);
                assert_eq!(section.services[0].order, 0);
            }
            other => panic!("unexpected section {:?}", other.kind()),
        }
        assert_eq!(documents.digital_header().await.unwrap().images.len(), 1);
    }

    #[tokio::test]
    async fn test_section_images_only_for_paired_sections() {
        let (_, documents, ..) = setup();
        let images = SectionImages {
            top_image: "services/top.png".into(),
            bottom_image: "services/bottom.png".into(),
        };
        let saved = documents
            .save_section_images(SectionKind::Services, &images)
            .await
            .unwrap();
        assert_eq!(saved, images);
        assert_eq!(
            documents.section_images(SectionKind::Services).await.unwrap(),
            images
        );

        let err = documents
            .save_section_images(SectionKind::Pricing, &images)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_pls_advantage_requires_heading() {
        let (_, documents, ..) = setup();
        assert_eq!(documents.pls_advantage().await.unwrap(), PlsAdvantage::default());

        let err = documents
            .save_pls_advantage(&PlsAdvantage::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)));

        let advantage = PlsAdvantage {
            heading: "Why PLS".into(),
            points: vec!["Senior engineers".into()],
            ..Default::default()
        };
        documents.save_pls_advantage(&advantage).await.unwrap();
        assert_eq!(documents.pls_advantage().await.unwrap(), advantage);
    }

    #[tokio::test]
    async fn test_home_page_aggregates_everything() {
        let (sections, documents, home, _) = setup();
        sections
            .replace_all(SectionPayload::Services(vec![card("A")]))
            .await
            .unwrap();
        documents
            .save_section_images(
                SectionKind::Services,
                &SectionImages {
                    top_image: "top.png".into(),
                    bottom_image: String::new(),
                },
            )
            .await
            .unwrap();

        let page = home.load().await.unwrap();
        assert_eq!(page.services.len(), 1);
        assert_eq!(page.images_for(SectionKind::Services).top_image, "top.png");
        assert!(page.hero_slides.is_empty());
    }

    fn contact(name: &str) -> Submission {
        Submission::Contact(ContactForm {
            name: name.into(),
            email: "someone@example.com".into(),
            subject: String::new(),
            message: "Hello".into(),
        })
    }

    #[tokio::test]
    async fn test_submissions_newest_first() {
        let (.., submissions) = setup();
        let first = submissions
            .create(&StoredSubmission::new(contact("Ana"), "2026-10-01T10:00:00Z".into()))
            .await
            .unwrap();
        let second = submissions
            .create(&StoredSubmission::new(contact("Lee"), "2026-10-02T10:00:00Z".into()))
            .await
            .unwrap();
        assert!(second.id > first.id);

        let listed = submissions.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].summary().name, "Ana");

        let quotes = submissions
            .list_by_kind(Some(SubmissionKind::Quote))
            .await
            .unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_submission_delete_cascades_attachments() {
        let (.., submissions) = setup();
        let mut stored = StoredSubmission::new(
            Submission::HireUs(HireUsRequest {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                details: "A team of four".into(),
                ..Default::default()
            }),
            "2026-10-03T09:00:00Z".into(),
        );
        stored.attachments.push(crate::domain::StoredAttachment {
            id: 0,
            file_name: "brief.pdf".into(),
            size_bytes: 12,
            content_hash: "abc".into(),
            stored_path: "/tmp/abc.pdf".into(),
        });
        let created = submissions.create(&stored).await.unwrap();
        assert_eq!(created.attachments.len(), 1);
        assert!(created.attachments[0].id > 0);

        let found = submissions.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        submissions.delete(created.id).await.expect("Delete failed");
        assert!(submissions.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            submissions.delete(created.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    fn write_file(dir: &std::path::Path, name: &str, bytes: &[u8]) -> AttachmentRef {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        AttachmentRef {
            path: path.to_string_lossy().into_owned(),
            file_name: name.into(),
            size_bytes: bytes.len() as u64,
        }
    }

    #[tokio::test]
    async fn test_attachment_store_dedupes_by_hash() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dest.path());
        let limits = AttachmentLimits::default();

        let a = write_file(src.path(), "a.pdf", b"%PDF-1.7 body");
        let b = write_file(src.path(), "b.pdf", b"%PDF-1.7 body");
        let stored = store.store_all(&[a, b], limits).await.unwrap();

        assert_eq!(stored[0].content_hash, stored[1].content_hash);
        assert_eq!(stored[0].stored_path, stored[1].stored_path);
        assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_attachment_store_rejects_disguised_files() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dest.path());

        let fake = write_file(src.path(), "fake.pdf", b"PK\x03\x04 zip");
        let err = store
            .store(&fake, AttachmentLimits::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)));

        let big = write_file(src.path(), "big.pdf", b"%PDF-1.7 0123456789");
        let tight = AttachmentLimits {
            max_count: 5,
            max_bytes: 8,
        };
        assert!(store.store(&big, tight).await.is_err());
    }

    #[tokio::test]
    async fn test_attachment_store_rejects_oversized_file_by_metadata() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dest.path());
        let limits = AttachmentLimits::default();

        let path = src.path().join("scan.pdf");
        let file = std::fs::File::create(&path).unwrap();
        // sparse: large on disk without being written out
        file.set_len(limits.max_bytes * 16).unwrap();
        let huge = AttachmentRef {
            path: path.to_string_lossy().into_owned(),
            file_name: "scan.pdf".into(),
            size_bytes: 1024,
        };

        let err = store.store(&huge, limits).await.unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)));
        assert!(err.to_string().contains("exceeds"));
        assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_attachment_store_all_copies_nothing_when_one_fails() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dest.path());

        let good = write_file(src.path(), "brief.pdf", b"%PDF-1.7 brief");
        let bad = write_file(src.path(), "notes.pdf", b"plain text");
        let result = store
            .store_all(&[good, bad], AttachmentLimits::default())
            .await;

        assert!(matches!(result, Err(DomainError::Invalid(_))));
        assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
    }
}
