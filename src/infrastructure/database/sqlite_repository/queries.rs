pub(super) const INSERT_CONSENT_GRANT: &str = r#"
    INSERT INTO consent_grants (id, owner_id, consent_type, granted, language, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub(super) const SELECT_LATEST_CONSENT: &str = r#"
    SELECT id, owner_id, consent_type, granted, language, created_at
    FROM consent_grants
    WHERE owner_id = ?1 AND consent_type = ?2
    ORDER BY created_at DESC, rowid DESC
    LIMIT 1
"#;

pub(super) const SELECT_CONSENTS_BY_OWNER: &str = r#"
    SELECT id, owner_id, consent_type, granted, language, created_at
    FROM consent_grants
    WHERE owner_id = ?1
    ORDER BY created_at ASC, rowid ASC
"#;

pub(super) const INSERT_RECORDING: &str = r#"
    INSERT INTO recordings (id, owner_id, audio, language, consent_id, is_synced, created_at, synced_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub(super) const SELECT_RECORDING_BY_ID: &str = r#"
    SELECT id, owner_id, audio, language, consent_id, is_synced, created_at, synced_at
    FROM recordings
    WHERE id = ?1
"#;

pub(super) const SELECT_UNSYNCED_RECORDINGS: &str = r#"
    SELECT id, owner_id, audio, language, consent_id, is_synced, created_at, synced_at
    FROM recordings
    WHERE is_synced = 0
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_RECORDINGS_BY_OWNER: &str = r#"
    SELECT id, owner_id, audio, language, consent_id, is_synced, created_at, synced_at
    FROM recordings
    WHERE owner_id = ?1
"#;

pub(super) const MARK_RECORDING_SYNCED: &str = r#"
    UPDATE recordings
    SET is_synced = 1, synced_at = ?2
    WHERE id = ?1 AND is_synced = 0
"#;

pub(super) const INSERT_SYMPTOM: &str = r#"
    INSERT INTO symptoms (id, owner_id, text, language, consent_id, is_synced, created_at, synced_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub(super) const SELECT_SYMPTOM_BY_ID: &str = r#"
    SELECT id, owner_id, text, language, consent_id, is_synced, created_at, synced_at
    FROM symptoms
    WHERE id = ?1
"#;

pub(super) const SELECT_UNSYNCED_SYMPTOMS: &str = r#"
    SELECT id, owner_id, text, language, consent_id, is_synced, created_at, synced_at
    FROM symptoms
    WHERE is_synced = 0
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_SYMPTOMS_BY_OWNER: &str = r#"
    SELECT id, owner_id, text, language, consent_id, is_synced, created_at, synced_at
    FROM symptoms
    WHERE owner_id = ?1
"#;

pub(super) const MARK_SYMPTOM_SYNCED: &str = r#"
    UPDATE symptoms
    SET is_synced = 1, synced_at = ?2
    WHERE id = ?1 AND is_synced = 0
"#;

pub(super) const INSERT_VITALS: &str = r#"
    INSERT INTO vitals (
        id, owner_id, bp_systolic, bp_diastolic, temperature, weight,
        entered_by, entered_by_uid, symptom_id, is_synced, created_at, synced_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
"#;

pub(super) const SELECT_VITALS_BY_ID: &str = r#"
    SELECT id, owner_id, bp_systolic, bp_diastolic, temperature, weight,
           entered_by, entered_by_uid, symptom_id, is_synced, created_at, synced_at
    FROM vitals
    WHERE id = ?1
"#;

pub(super) const SELECT_UNSYNCED_VITALS: &str = r#"
    SELECT id, owner_id, bp_systolic, bp_diastolic, temperature, weight,
           entered_by, entered_by_uid, symptom_id, is_synced, created_at, synced_at
    FROM vitals
    WHERE is_synced = 0
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_VITALS_BY_OWNER: &str = r#"
    SELECT id, owner_id, bp_systolic, bp_diastolic, temperature, weight,
           entered_by, entered_by_uid, symptom_id, is_synced, created_at, synced_at
    FROM vitals
    WHERE owner_id = ?1
"#;

pub(super) const MARK_VITALS_SYNCED: &str = r#"
    UPDATE vitals
    SET is_synced = 1, synced_at = ?2
    WHERE id = ?1 AND is_synced = 0
"#;

pub(super) const INSERT_REPORT: &str = r#"
    INSERT INTO reports (
        id, owner_id, file_name, file_type, file_size,
        uploaded_by, uploaded_by_uid, symptom_id, approved_for_sharing,
        is_synced, created_at, synced_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
"#;

pub(super) const SELECT_REPORT_BY_ID: &str = r#"
    SELECT id, owner_id, file_name, file_type, file_size,
           uploaded_by, uploaded_by_uid, symptom_id, approved_for_sharing,
           is_synced, created_at, synced_at
    FROM reports
    WHERE id = ?1
"#;

pub(super) const SELECT_UNSYNCED_REPORTS: &str = r#"
    SELECT id, owner_id, file_name, file_type, file_size,
           uploaded_by, uploaded_by_uid, symptom_id, approved_for_sharing,
           is_synced, created_at, synced_at
    FROM reports
    WHERE is_synced = 0
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_REPORTS_BY_OWNER: &str = r#"
    SELECT id, owner_id, file_name, file_type, file_size,
           uploaded_by, uploaded_by_uid, symptom_id, approved_for_sharing,
           is_synced, created_at, synced_at
    FROM reports
    WHERE owner_id = ?1
"#;

pub(super) const MARK_REPORT_SYNCED: &str = r#"
    UPDATE reports
    SET is_synced = 1, synced_at = ?2
    WHERE id = ?1 AND is_synced = 0
"#;

pub(super) const APPROVE_REPORT_FOR_SHARING: &str = r#"
    UPDATE reports
    SET approved_for_sharing = 1
    WHERE id = ?1
"#;

pub(super) const INSERT_LOGBOOK_ENTRY: &str = r#"
    INSERT INTO logbook_entries (
        id, owner_id, summary, language, consent_id,
        shared_with_doctor, is_synced, created_at, synced_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub(super) const SELECT_LOGBOOK_ENTRY_BY_ID: &str = r#"
    SELECT id, owner_id, summary, language, consent_id,
           shared_with_doctor, is_synced, created_at, synced_at
    FROM logbook_entries
    WHERE id = ?1
"#;

pub(super) const SELECT_UNSYNCED_LOGBOOK_ENTRIES: &str = r#"
    SELECT id, owner_id, summary, language, consent_id,
           shared_with_doctor, is_synced, created_at, synced_at
    FROM logbook_entries
    WHERE is_synced = 0
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_LOGBOOK_ENTRIES_BY_OWNER: &str = r#"
    SELECT id, owner_id, summary, language, consent_id,
           shared_with_doctor, is_synced, created_at, synced_at
    FROM logbook_entries
    WHERE owner_id = ?1
    ORDER BY created_at DESC, rowid DESC
"#;

pub(super) const MARK_LOGBOOK_ENTRY_SYNCED: &str = r#"
    UPDATE logbook_entries
    SET is_synced = 1, synced_at = ?2
    WHERE id = ?1 AND is_synced = 0
"#;

pub(super) const SET_LOGBOOK_ENTRY_SHARED: &str = r#"
    UPDATE logbook_entries
    SET shared_with_doctor = ?2
    WHERE id = ?1
"#;

pub(super) const UPSERT_RETRY_ITEM: &str = r#"
    INSERT INTO retry_queue (id, record_kind, record_id, attempts, last_attempt_at, last_error, created_at)
    VALUES (?1, ?2, ?3, 1, ?4, ?5, ?4)
    ON CONFLICT(record_kind, record_id) DO UPDATE SET
        attempts = attempts + 1,
        last_attempt_at = excluded.last_attempt_at,
        last_error = excluded.last_error
"#;

pub(super) const SELECT_RETRY_ITEMS: &str = r#"
    SELECT id, record_kind, record_id, attempts, last_attempt_at, last_error, created_at
    FROM retry_queue
    ORDER BY created_at ASC
"#;

pub(super) const DELETE_RETRY_ITEM: &str = r#"
    DELETE FROM retry_queue
    WHERE id = ?1
"#;

pub(super) const COUNT_UNSYNCED: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM recordings WHERE is_synced = 0)
      + (SELECT COUNT(*) FROM symptoms WHERE is_synced = 0)
      + (SELECT COUNT(*) FROM vitals WHERE is_synced = 0)
      + (SELECT COUNT(*) FROM reports WHERE is_synced = 0)
      + (SELECT COUNT(*) FROM logbook_entries WHERE is_synced = 0)
      AS pending
"#;
