//! Bird inventory tests
//!
//! Tests for batch registration including:
//! - Total birds derived from crates and birds per crate
//! - Female count auto-balancing against the male count
//! - Submit-time rejection of unreconciled sex splits

use avicola_admin_app::services::batch::BatchForm;
use avicola_admin_app::services::catalog::BirdTypeInput;
use avicola_admin_app::services::{BatchService, CatalogService};
use avicola_admin_app::{AppError, Store};
use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use shared::InputError;

fn setup() -> (CatalogService, BatchService) {
    let store = Store::new();
    let catalog = CatalogService::new(store.clone());
    catalog
        .create_bird_type(BirdTypeInput {
            name: "Pollo".to_string(),
            has_sex: true,
            ..Default::default()
        })
        .unwrap();
    catalog
        .create_bird_type(BirdTypeInput {
            name: "Gallina".to_string(),
            has_variety: true,
            varieties: vec!["Roja".to_string(), "Negra".to_string()],
            ..Default::default()
        })
        .unwrap();
    catalog
        .create_bird_type(BirdTypeInput {
            name: "Pato".to_string(),
            ..Default::default()
        })
        .unwrap();
    (catalog, BatchService::new(store))
}

fn form(bird_type: &str, crates: &str, per_crate: &str) -> BatchForm {
    BatchForm {
        supplier: "Granja San Martín".to_string(),
        bird_type: bird_type.to_string(),
        crates: crates.to_string(),
        birds_per_crate: per_crate.to_string(),
        entry_date: NaiveDate::from_ymd_opt(2024, 3, 11),
        entry_time: NaiveTime::from_hms_opt(6, 30, 0),
        ..Default::default()
    }
}

fn with_sex(form: BatchForm, males: &str, females: Option<&str>) -> BatchForm {
    BatchForm {
        males: Some(males.to_string()),
        females: females.map(str::to_string),
        ..form
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_register_auto_fills_females() {
        let (_, batches) = setup();
        let batch = batches.register(with_sex(form("Pollo", "3", "50"), "80", None)).unwrap();

        assert_eq!(batch.total_birds, 150);
        assert_eq!(batch.males, Some(80));
        assert_eq!(batch.females, Some(70));
        assert!(batch.is_total_consistent());
    }

    #[test]
    fn test_register_explicit_balanced_split() {
        let (_, batches) = setup();
        let batch = batches
            .register(with_sex(form("Pollo", "3", "50"), "80", Some("70")))
            .unwrap();
        assert_eq!(batch.sex_split().unwrap().sum(), 150);
    }

    #[test]
    fn test_register_rejects_unbalanced_split() {
        let (_, batches) = setup();
        let err = batches
            .register(with_sex(form("Pollo", "3", "50"), "80", Some("60")))
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.field(), Some("males"));
        assert!(batches.list().unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_more_males_than_total() {
        let (_, batches) = setup();
        // Females clamp to 0, so the split sums to 200 against a total of 150
        let err = batches
            .register(with_sex(form("Pollo", "3", "50"), "200", None))
            .unwrap_err();
        assert_eq!(err.field(), Some("males"));
    }

    #[test]
    fn test_register_requires_split_for_sexed_type() {
        let (_, batches) = setup();
        let err = batches.register(form("Pollo", "3", "50")).unwrap_err();
        assert_eq!(err.field(), Some("males"));
    }

    #[test]
    fn test_register_rejects_split_for_unsexed_type() {
        let (_, batches) = setup();
        let err = batches
            .register(with_sex(form("Pato", "2", "20"), "20", None))
            .unwrap_err();
        assert_eq!(err.field(), Some("males"));
    }

    #[test]
    fn test_register_variety_rules() {
        let (_, batches) = setup();

        let err = batches.register(form("Gallina", "4", "12")).unwrap_err();
        assert_eq!(err.field(), Some("variety"));

        let err = batches
            .register(BatchForm {
                variety: Some("Blanca".to_string()),
                ..form("Gallina", "4", "12")
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("variety"));

        let batch = batches
            .register(BatchForm {
                variety: Some(" Roja ".to_string()),
                ..form("Gallina", "4", "12")
            })
            .unwrap();
        assert_eq!(batch.variety.as_deref(), Some("Roja"));
        assert_eq!(batch.total_birds, 48);
        assert_eq!(batch.males, None);
    }

    #[test]
    fn test_register_rejects_bad_numbers() {
        let (_, batches) = setup();

        let err = batches.register(form("Pato", "dos", "20")).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidInput {
                source: InputError::NotNumeric(_),
                ..
            }
        ));
        assert_eq!(err.field(), Some("crates"));

        let err = batches.register(form("Pato", "2", "")).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidInput {
                source: InputError::Empty,
                ..
            }
        ));

        let err = batches.register(form("Pato", "0", "20")).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.field(), Some("crates"));
    }

    #[test]
    fn test_register_rejects_grouped_counts() {
        let (_, batches) = setup();

        for typed in ["1,000", "1.000"] {
            let err = batches.register(form("Pato", "2", typed)).unwrap_err();
            assert!(matches!(
                err,
                AppError::InvalidInput {
                    source: InputError::NotNumeric(_),
                    ..
                }
            ));
            assert_eq!(err.field(), Some("birds_per_crate"));
        }
        assert!(batches.list().unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_overflowing_total() {
        let (_, batches) = setup();
        let err = batches
            .register(form("Pato", "100000", "100000"))
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidInput {
                source: InputError::TooLarge,
                ..
            }
        ));
        assert_eq!(err.field(), Some("birds_per_crate"));
        assert!(batches.list().unwrap().is_empty());

        // The live preview still saturates instead of failing
        let preview = batches.preview(&form("Pato", "100000", "100000")).unwrap();
        assert_eq!(preview.total_birds, u32::MAX);
    }

    #[test]
    fn test_bird_type_flags_fixed_while_batches_exist() {
        let (catalog, batches) = setup();
        batches.register(with_sex(form("Pollo", "3", "50"), "80", None)).unwrap();
        let pollo = catalog.find_bird_type("Pollo").unwrap();

        let err = catalog
            .update_bird_type(
                pollo.id,
                BirdTypeInput {
                    name: "Pollo".to_string(),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::InUse(_)));
        assert!(catalog.find_bird_type("Pollo").unwrap().has_sex);
        assert!(batches.list().unwrap()[0].is_total_consistent());
    }

    #[test]
    fn test_used_variety_cannot_be_dropped() {
        let (catalog, batches) = setup();
        batches
            .register(BatchForm {
                variety: Some("Roja".to_string()),
                ..form("Gallina", "4", "12")
            })
            .unwrap();
        let gallina = catalog.find_bird_type("Gallina").unwrap();
        let with_varieties = |varieties: &[&str]| BirdTypeInput {
            name: "Gallina".to_string(),
            has_variety: true,
            varieties: varieties.iter().map(|v| v.to_string()).collect(),
            ..Default::default()
        };

        let err = catalog
            .update_bird_type(gallina.id, with_varieties(&["Negra"]))
            .unwrap_err();
        assert!(matches!(err, AppError::InUse(_)));

        let updated = catalog
            .update_bird_type(gallina.id, with_varieties(&["Roja", "Blanca"]))
            .unwrap();
        assert_eq!(updated.varieties, vec!["Roja".to_string(), "Blanca".to_string()]);
    }

    #[test]
    fn test_register_unknown_bird_type() {
        let (_, batches) = setup();
        let err = batches.register(form("Avestruz", "1", "5")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_register_requires_supplier() {
        let (_, batches) = setup();
        let err = batches
            .register(BatchForm {
                supplier: String::new(),
                ..form("Pato", "2", "20")
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("supplier"));
    }

    #[test]
    fn test_update_recomputes_derived_counts() {
        let (_, batches) = setup();
        let batch = batches.register(with_sex(form("Pollo", "3", "50"), "80", None)).unwrap();

        let updated = batches
            .update(batch.id, with_sex(form("Pollo", "4", "50"), "80", None))
            .unwrap();
        assert_eq!(updated.id, batch.id);
        assert_eq!(updated.total_birds, 200);
        assert_eq!(updated.females, Some(120));
        assert_eq!(batches.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_batch() {
        let (_, batches) = setup();
        let batch = batches.register(form("Pato", "2", "20")).unwrap();
        batches.delete(batch.id).unwrap();
        assert!(matches!(batches.get(batch.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_bird_type_in_use_cannot_be_deleted() {
        let (catalog, batches) = setup();
        batches.register(form("Pato", "2", "20")).unwrap();
        let pato = catalog.find_bird_type("pato").unwrap();

        let err = catalog.delete_bird_type(pato.id).unwrap_err();
        assert!(matches!(err, AppError::InUse(_)));
    }

    #[test]
    fn test_rename_cascades_to_batches() {
        let (catalog, batches) = setup();
        batches.register(form("Pato", "2", "20")).unwrap();
        let pato = catalog.find_bird_type("Pato").unwrap();

        catalog
            .update_bird_type(
                pato.id,
                BirdTypeInput {
                    name: "Pato Criollo".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(batches.list().unwrap()[0].bird_type, "Pato Criollo");
    }

    #[test]
    fn test_batches_never_reference_a_stale_name() {
        let (catalog, batches) = setup();
        let pato = catalog.find_bird_type("Pato").unwrap().id;
        let rename = |name: &str| BirdTypeInput {
            name: name.to_string(),
            ..Default::default()
        };

        let writer = {
            let batches = batches.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    // NotFound while the type is renamed away is expected
                    let _ = batches.register(form("Pato", "1", "10"));
                }
            })
        };
        for i in 0..200 {
            let name = if i % 2 == 0 { "Pato Criollo" } else { "Pato" };
            catalog.update_bird_type(pato, rename(name)).unwrap();
        }
        writer.join().unwrap();
        catalog.update_bird_type(pato, rename("Pato Criollo")).unwrap();

        assert!(batches
            .list()
            .unwrap()
            .iter()
            .all(|b| b.bird_type == "Pato Criollo"));
    }

    #[test]
    fn test_preview_partial_form() {
        let (_, batches) = setup();

        let preview = batches.preview(&form("Pollo", "3", "")).unwrap();
        assert_eq!(preview.total_birds, 0);
        assert_eq!(preview.suggested_females, Some(0));
        assert!(!preview.reconciliation.unwrap().is_balanced);

        let preview = batches.preview(&with_sex(form("Pollo", "3", "50"), "80", None)).unwrap();
        assert_eq!(preview.total_birds, 150);
        assert_eq!(preview.suggested_females, Some(70));
        let reconciliation = preview.reconciliation.unwrap();
        assert!(reconciliation.is_balanced);
        assert_eq!(reconciliation.sum, 150);
    }

    #[test]
    fn test_preview_typed_females_show_difference() {
        let (_, batches) = setup();
        let preview = batches
            .preview(&with_sex(form("Pollo", "3", "50"), "80", Some("60")))
            .unwrap();
        let reconciliation = preview.reconciliation.unwrap();
        assert_eq!(reconciliation.sum, 140);
        assert_eq!(reconciliation.difference, 10);
        assert!(!reconciliation.is_balanced);
    }

    #[test]
    fn test_preview_variety_type() {
        let (_, batches) = setup();
        let preview = batches.preview(&form("Gallina", "x", "12")).unwrap();
        assert_eq!(preview.total_birds, 0);
        assert!(preview.requires_variety);
        assert_eq!(preview.varieties, vec!["Roja".to_string(), "Negra".to_string()]);
        assert_eq!(preview.reconciliation, None);
    }

    #[test]
    fn test_search_and_summary() {
        let (_, batches) = setup();
        batches.register(with_sex(form("Pollo", "3", "50"), "80", None)).unwrap();
        batches.register(with_sex(form("Pollo", "2", "50"), "50", None)).unwrap();
        batches
            .register(BatchForm {
                supplier: "Avícola El Porvenir".to_string(),
                variety: Some("Negra".to_string()),
                ..form("Gallina", "4", "12")
            })
            .unwrap();

        assert_eq!(batches.search("porvenir").unwrap().len(), 1);
        assert_eq!(batches.search("negra").unwrap().len(), 1);
        assert_eq!(batches.search("POLLO").unwrap().len(), 2);
        assert_eq!(batches.search("").unwrap().len(), 3);

        let summary = batches.inventory_summary().unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].bird_type, "Gallina");
        assert_eq!(summary[0].birds, 48);
        assert_eq!(summary[1].bird_type, "Pollo");
        assert_eq!(summary[1].batches, 2);
        assert_eq!(summary[1].crates, 5);
        assert_eq!(summary[1].birds, 250);
        assert_eq!(summary[1].males, 130);
        assert_eq!(summary[1].females, 120);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Stored total always equals crates * birds per crate, and an
        /// auto-filled split always sums to it
        #[test]
        fn prop_registered_batch_is_consistent(
            crates in 1u32..100,
            per_crate in 1u32..100,
            male_share in 0u32..=100
        ) {
            let (_, batches) = setup();
            let total = crates * per_crate;
            let males = total * male_share / 100;

            let batch = batches
                .register(with_sex(form("Pollo", &crates.to_string(), &per_crate.to_string()), &males.to_string(), None))
                .unwrap();

            prop_assert_eq!(batch.total_birds, total);
            prop_assert!(batch.is_total_consistent());
            prop_assert_eq!(batch.sex_split().unwrap().sum(), total);
        }

        /// Preview never fails on arbitrary text
        #[test]
        fn prop_preview_is_total(crates in ".{0,6}", per_crate in ".{0,6}", males in ".{0,6}") {
            let (_, batches) = setup();
            let preview = batches.preview(&with_sex(form("Pollo", &crates, &per_crate), &males, None));
            prop_assert!(preview.is_ok());
        }
    }
}
