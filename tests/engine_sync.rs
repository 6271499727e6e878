mod common;

use carevista_sync::{
    ConsentType, ManualConnectivity, OwnerId, RecordKind, SyncEngine, SyncError,
};
use common::{test_config, wait_for_idle, ScriptedTransport};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn owner(id: &str) -> OwnerId {
    OwnerId::new(id).unwrap()
}

async fn start_engine(
    dir: &TempDir,
    online: bool,
) -> (SyncEngine, Arc<ScriptedTransport>, Arc<ManualConnectivity>) {
    let transport = Arc::new(ScriptedTransport::new());
    let connectivity = Arc::new(ManualConnectivity::new(online));
    let engine = SyncEngine::start(
        test_config(dir.path()),
        transport.clone(),
        connectivity.clone(),
    )
    .await
    .unwrap();
    (engine, transport, connectivity)
}

#[tokio::test]
async fn recording_captured_offline_syncs_after_reconnect() {
    let dir = TempDir::new().unwrap();
    let (engine, transport, connectivity) = start_engine(&dir, false).await;
    let p1 = owner("p1");

    engine
        .consent()
        .grant(p1.clone(), ConsentType::Recording, "ta".into())
        .await
        .unwrap();
    let recording = engine
        .records()
        .create_recording(p1.clone(), vec![0x52; 128], "ta".into())
        .await
        .unwrap();
    assert!(!recording.synced);
    assert_eq!(recording.language, "ta");
    assert_eq!(engine.current_status().pending_count, 1);

    connectivity.set_online(true);
    wait_for_idle(&engine).await;

    assert_eq!(transport.uploads_of(recording.id.as_str()), 1);

    let listed = engine.records().list_recordings(&p1).await.unwrap();
    assert!(listed[0].synced);

    let status = engine.current_status();
    assert_eq!(status.pending_count, 0);
    assert!(status.last_sync_at.is_some());
}

#[tokio::test]
async fn symptom_without_consent_is_rejected_and_unwritten() {
    let dir = TempDir::new().unwrap();
    let (engine, _, _) = start_engine(&dir, false).await;
    let p2 = owner("p2");

    let err = engine
        .records()
        .create_symptom(p2.clone(), "dizziness since morning".into(), "ta".into())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::ConsentRequired(ConsentType::Recording)
    ));
    assert!(engine.records().list_symptoms(&p2).await.unwrap().is_empty());
    assert_eq!(engine.current_status().pending_count, 0);
}

#[tokio::test]
async fn reconnect_triggers_a_pass_without_user_action() {
    let dir = TempDir::new().unwrap();
    let (engine, _, connectivity) = start_engine(&dir, false).await;
    let p1 = owner("p1");

    engine
        .consent()
        .grant(p1.clone(), ConsentType::Recording, "en".into())
        .await
        .unwrap();
    engine
        .records()
        .create_symptom(p1.clone(), "persistent cough".into(), "en".into())
        .await
        .unwrap();

    let mut status_rx = engine.subscribe_status();
    connectivity.set_online(true);

    // The connectivity listener schedules the pass; wait for the status
    // publisher to report it drained.
    timeout(Duration::from_secs(5), async {
        loop {
            if status_rx.borrow().pending_count == 0 && !status_rx.borrow().is_syncing {
                break;
            }
            status_rx.changed().await.unwrap();
        }
    })
    .await
    .expect("pending records were not synced after reconnect");

    assert!(engine.current_status().last_sync_at.is_some());
}

#[tokio::test]
async fn force_sync_while_offline_errors_immediately() {
    let dir = TempDir::new().unwrap();
    let (engine, transport, _) = start_engine(&dir, false).await;

    let err = engine.sync().force_sync().await.unwrap_err();
    assert!(matches!(err, SyncError::Offline));
    assert!(transport.uploads().is_empty());
}

#[tokio::test]
async fn one_failing_record_does_not_block_the_rest() {
    let dir = TempDir::new().unwrap();
    let (engine, transport, _) = start_engine(&dir, true).await;
    wait_for_idle(&engine).await; // let the empty startup pass finish
    let p1 = owner("p1");

    engine
        .consent()
        .grant(p1.clone(), ConsentType::Recording, "en".into())
        .await
        .unwrap();
    let failing = engine
        .records()
        .create_symptom(p1.clone(), "r1".into(), "en".into())
        .await
        .unwrap();
    let healthy = engine
        .records()
        .create_symptom(p1.clone(), "r2".into(), "en".into())
        .await
        .unwrap();

    transport.fail_record(failing.id.as_str());
    let report = engine.sync().force_sync().await.unwrap().unwrap();

    assert_eq!(report.synced_count, 1);
    assert_eq!(report.failed_count, 1);
    assert_eq!(report.pending_count, 1);
    assert_eq!(transport.uploads_of(healthy.id.as_str()), 1);

    // The failure is informational; a later pass drains it once the
    // transport recovers.
    transport.recover_record(failing.id.as_str());
    let report = engine.sync().force_sync().await.unwrap().unwrap();
    assert_eq!(report.pending_count, 0);
    assert!(engine.current_status().errors.is_empty());
}

#[tokio::test]
async fn every_record_kind_flows_through_one_pass() {
    let dir = TempDir::new().unwrap();
    let (engine, transport, _) = start_engine(&dir, true).await;
    wait_for_idle(&engine).await;
    let p1 = owner("p1");

    engine
        .consent()
        .grant(p1.clone(), ConsentType::Recording, "en".into())
        .await
        .unwrap();

    engine
        .records()
        .create_recording(p1.clone(), vec![9, 9, 9], "en".into())
        .await
        .unwrap();
    engine
        .records()
        .create_symptom(p1.clone(), "headache".into(), "en".into())
        .await
        .unwrap();
    engine
        .records()
        .create_vitals(
            p1.clone(),
            carevista_sync::VitalSigns {
                bp_systolic: Some(121.0),
                bp_diastolic: Some(79.0),
                temperature: Some(36.8),
                weight: Some(58.5),
            },
            carevista_sync::EnteredBy::Patient,
            None,
        )
        .await
        .unwrap();
    engine
        .records()
        .create_report(
            p1.clone(),
            "blood-panel.pdf".into(),
            "application/pdf".into(),
            18_020,
            carevista_sync::EnteredBy::Patient,
            None,
        )
        .await
        .unwrap();
    engine
        .records()
        .create_logbook_entry(
            p1.clone(),
            carevista_sync::StructuredSummary {
                chief_complaint: "headache".into(),
                symptom_timeline: "since yesterday".into(),
                severity: "moderate".into(),
                past_history: None,
                additional_notes: None,
            },
            "en".into(),
        )
        .await
        .unwrap();

    assert_eq!(engine.current_status().pending_count, 5);

    let report = engine.sync().force_sync().await.unwrap().unwrap();
    assert_eq!(report.synced_count, 5);
    assert_eq!(report.pending_count, 0);

    // Recordings and symptoms go first; the order within a pass is fixed.
    let kinds: Vec<RecordKind> = transport.uploads().into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::Recording,
            RecordKind::Symptom,
            RecordKind::Vitals,
            RecordKind::Report,
            RecordKind::Logbook,
        ]
    );
}
