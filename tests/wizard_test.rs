//! Step operations against the in-memory store: snapshot appends, principal
//! checks, roster filtering, banner uploads and the facilities step.

#[macro_use]
mod common;

use arena::auth::session::Principal;
use arena::errors::AppError;
use arena::models::BasicInfoSnapshot;
use arena::storage::BlobStore;
use arena::wizard::basic::{self, BannerUpload};
use arena::wizard::{
    BasicInfoEdit, FacilitiesStep, FormData, OtherCustomerList, ParticipantsEdit, StepDelta, participants,
};
use chrono::Duration;
use common::*;

fn principal(id: &str) -> Principal {
    Principal { institute_id: id.to_string(), name: id.to_string() }
}

fn five_k_run() -> FormData {
    FormData::default().apply(StepDelta::BasicInfo(BasicInfoEdit {
        event_name: "5K Run".into(),
        event_type: "Tournament".into(),
        category: "Fitness".into(),
        description: String::new(),
    }))
}

// --- Basic information ---

#[tokio::test]
async fn test_save_basic_information_appends_expected_snapshot() {
    let env = setup_store().await;
    let now = fixed_now();

    let saved = basic::save(&env.store, Some(&principal(U1)), &five_k_run(), now).await.unwrap();

    let expected = BasicInfoSnapshot {
        event_name: "5K Run".into(),
        event_type: "Tournament".into(),
        category: "Fitness".into(),
        banner: String::new(),
        description: String::new(),
        created_at: now,
    };
    assert_eq!(saved, expected);
    let log = env.store.load_event_log(U1).await.unwrap();
    assert_eq!(log.basic_information, vec![expected]);
    assert!(log.participant_configuration.is_empty());
}

#[tokio::test]
async fn test_resave_appends_duplicate_and_keeps_prior_entries() {
    let env = setup_store().await;
    let form = five_k_run();
    let first = basic::save(&env.store, Some(&principal(U1)), &form, fixed_now()).await.unwrap();
    let second = basic::save(&env.store, Some(&principal(U1)), &form, fixed_now() + Duration::seconds(5))
        .await
        .unwrap();

    let log = env.store.load_event_log(U1).await.unwrap();
    assert_eq!(log.basic_information, vec![first.clone(), second.clone()]);
    assert_eq!(first.event_name, second.event_name);
    assert_ne!(first.created_at, second.created_at);
    assert_eq!(log.latest_basic_information(), Some(&second));
}

#[tokio::test]
async fn test_save_without_principal_is_rejected_and_writes_nothing() {
    let env = setup_store().await;
    let result = basic::save(&env.store, None, &five_k_run(), fixed_now()).await;
    assert!(matches!(result, Err(AppError::MissingPrincipal)));

    let result = participants::save(&env.store, None, &FormData::default(), fixed_now()).await;
    assert!(matches!(result, Err(AppError::MissingPrincipal)));

    assert!(env.store.load_event_log(U1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_institutes_have_separate_logs() {
    let env = setup_store().await;
    basic::save(&env.store, Some(&principal(U1)), &five_k_run(), fixed_now()).await.unwrap();
    assert!(env.store.load_event_log(U2).await.unwrap().is_empty());
}

// --- Banner upload ---

#[tokio::test]
async fn test_banner_upload_stores_url_once() {
    let env = setup_store().await;
    let blobs = BlobStore::Memory(env.blobs.clone());
    let now = fixed_now();

    let delta = basic::upload_banner(
        &blobs,
        BannerUpload { file_name: "summer cup.png", content_type: "image/png", bytes: b"\x89PNG" },
        1024,
        now,
    )
    .await
    .unwrap();

    let key = format!("eventBanners/{}_summer_cup.png", now.timestamp_millis());
    let expected_url = format!("/uploads/{key}");
    assert_eq!(delta, StepDelta::Banner(expected_url.clone()));
    assert_eq!(env.blobs.object_count().await, 1);
    assert_eq!(env.blobs.get(&key).await.as_deref(), Some(&b"\x89PNG"[..]));

    let state = five_k_run().apply(delta);
    assert_eq!(state.basic_info.banner, expected_url);
    assert_eq!(state.basic_info.event_name, "5K Run");
}

#[tokio::test]
async fn test_failed_banner_upload_leaves_state_and_storage_untouched() {
    let env = setup_store().await;
    let blobs = BlobStore::Memory(env.blobs.clone());

    for upload in [
        BannerUpload { file_name: "notes.txt", content_type: "text/plain", bytes: b"hi" },
        BannerUpload { file_name: "empty.png", content_type: "image/png", bytes: b"" },
        BannerUpload { file_name: "big.png", content_type: "image/png", bytes: &[0u8; 2048] },
    ] {
        let result = basic::upload_banner(&blobs, upload, 1024, fixed_now()).await;
        assert!(matches!(result, Err(AppError::Upload(_))));
    }
    assert_eq!(env.blobs.object_count().await, 0);
}

// --- Participants ---

#[tokio::test]
async fn test_roster_candidates_only_include_own_institute() {
    let env = setup_store().await;

    let u1 = participants::load_candidates(&env.store, Some(&principal(U1))).await.unwrap();
    assert!(u1.iter().all(|s| s.institute_id == U1));
    let names: Vec<String> = u1.iter().map(|s| s.display_name()).collect();
    assert_eq!(names, vec!["Abe Zane", "Ana Diaz", "Ben Ode"]);

    let u2 = participants::load_candidates(&env.store, Some(&principal(U2))).await.unwrap();
    assert_eq!(u2.len(), 1);
    assert_eq!(u2[0].display_name(), "Cara Lim");

    let nobody = participants::load_candidates(&env.store, None).await.unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_save_participants_snapshot_mirrors_local_customers() {
    let env = setup_store().await;
    let mut others = OtherCustomerList::new();
    others.edit_name(0, "Lee");
    others.edit_phone(0, "+1 555 0100");
    others.add();

    let form = five_k_run().apply_all([
        StepDelta::Participants(ParticipantsEdit {
            age_group: "18+ years".into(),
            eligibility: "Open".into(),
            skill_level: "Beginner".into(),
            max_participants: "30".into(),
            selected_customers: vec!["Ana Diaz".into(), "Ben Ode".into()],
        }),
        others.sync_delta(),
    ]);

    basic::save(&env.store, Some(&principal(U1)), &form, fixed_now()).await.unwrap();
    let snapshot = participants::save(&env.store, Some(&principal(U1)), &form, fixed_now()).await.unwrap();
    assert_eq!(snapshot.selected_institute_customers, vec!["Ana Diaz", "Ben Ode"]);
    assert_eq!(snapshot.other_institute_customers, others.entries());

    let log = env.store.load_event_log(U1).await.unwrap();
    assert_eq!(log.participant_configuration, vec![snapshot]);
    // The other section is untouched by a participant save
    assert_eq!(log.basic_information.len(), 1);
}

#[tokio::test]
async fn test_invalid_capacity_is_not_saved() {
    let env = setup_store().await;
    let form = FormData::default().apply(StepDelta::Participants(ParticipantsEdit {
        max_participants: "-4".into(),
        ..Default::default()
    }));
    let result = participants::save(&env.store, Some(&principal(U1)), &form, fixed_now()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(env.store.load_event_log(U1).await.unwrap().is_empty());
}

// --- Facilities ---

#[tokio::test]
async fn test_facilities_load_defaults_to_empty() {
    let env = setup_store().await;
    let step = FacilitiesStep::load(&env.store, "defaultDoc").await.unwrap();
    assert_eq!(step.facilities_infrastructure, "");
}

#[tokio::test]
async fn test_facilities_save_merges_and_reloads() {
    let env = setup_store().await;
    let step = FacilitiesStep::default().edit("Olympic pool, 4 courts");
    let saved = step.save(&env.store, "defaultDoc").await.unwrap();
    assert!(saved.updated_at.is_some());

    let reloaded = FacilitiesStep::load(&env.store, "defaultDoc").await.unwrap();
    assert_eq!(reloaded.facilities_infrastructure, "Olympic pool, 4 courts");

    // Saving blank text is allowed and overwrites
    FacilitiesStep::default().save(&env.store, "defaultDoc").await.unwrap();
    let reloaded = FacilitiesStep::load(&env.store, "defaultDoc").await.unwrap();
    assert_eq!(reloaded.facilities_infrastructure, "");
}

#[tokio::test]
async fn test_facilities_cancel_blanks_instead_of_restoring() {
    let env = setup_store().await;
    FacilitiesStep::default().edit("Gym").save(&env.store, "defaultDoc").await.unwrap();

    let loaded = FacilitiesStep::load(&env.store, "defaultDoc").await.unwrap();
    assert_eq!(loaded.facilities_infrastructure, "Gym");
    assert_eq!(loaded.edit("Gym and sauna").cancel().facilities_infrastructure, "");

    // Cancel never writes
    let reloaded = FacilitiesStep::load(&env.store, "defaultDoc").await.unwrap();
    assert_eq!(reloaded.facilities_infrastructure, "Gym");
}

// --- Drafts ---

#[tokio::test]
async fn test_drafts_are_kept_per_institute_until_cleared() {
    let env = setup_store().await;
    let draft = five_k_run();
    env.store.store_draft(U1, &draft).await.unwrap();

    assert_eq!(env.store.load_draft(U1).await.unwrap(), draft);
    assert_eq!(env.store.load_draft(U2).await.unwrap(), FormData::default());

    env.store.clear_draft(U1).await.unwrap();
    assert_eq!(env.store.load_draft(U1).await.unwrap(), FormData::default());
}
