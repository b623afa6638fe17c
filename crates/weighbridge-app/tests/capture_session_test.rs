//! Capture session against a manual scale and a temp-dir store

use tempfile::{tempdir, TempDir};
use weighbridge_app::app::{CaptureServiceError, CaptureSession, Notice, SessionOptions};
use weighbridge_app::repository::open_transaction_repo_at;
use weighbridge_domain::repository::TransactionRepository;
use weighbridge_domain::CaptureState;
use weighbridge_infra::master_data_loader::MasterDataLoader;
use weighbridge_infra::persistence::FileTransactionRepository;
use weighbridge_scale::ManualScale;
use weighbridge_types::{RequiredField, TransactionStatus, ValidationError};

type Session = CaptureSession<ManualScale, FileTransactionRepository>;

fn open_session(options: SessionOptions) -> (TempDir, Session) {
    let dir = tempdir().unwrap();
    let repo = open_transaction_repo_at(dir.path().to_path_buf()).unwrap();
    let session = CaptureSession::open(ManualScale::new(), repo, options);
    (dir, session)
}

#[test]
fn test_full_weighing_scenario() {
    let (_dir, mut session) = open_session(SessionOptions::new());

    session.source_mut().set_stable(35420.0);
    assert_eq!(session.capture_first_mass(), Some(35420.0));

    session.flow_mut().set_vehicle_registration("ABC123GP");
    session.flow_mut().set_customer("acme");

    session.source_mut().set_stable(12500.0);
    assert_eq!(session.capture_second_mass().unwrap(), Some(12500.0));
    assert_eq!(session.flow().net_mass(), Some(22920.0));

    let record = session.save().unwrap();
    assert_eq!(record.transaction_no, "000001");
    assert_eq!(record.transaction.net_mass(), Some(22920.0));
    assert_eq!(record.transaction.status(), TransactionStatus::Complete);
    assert_eq!(Notice::saved(&record).title, "Transaction Saved");

    assert_eq!(session.flow().state(), &CaptureState::Empty);
    assert_eq!(session.flow().form().vehicle_registration, "");
    assert_eq!(session.repository().find_all().unwrap().len(), 1);
}

#[test]
fn test_capture_while_reading_is_noop() {
    let (_dir, mut session) = open_session(SessionOptions::new());

    session.source_mut().set_reading(20000.0);
    assert_eq!(session.capture_first_mass(), None);
    assert_eq!(session.flow().state(), &CaptureState::Empty);

    session.source_mut().set_stable(20000.0);
    assert_eq!(session.capture_first_mass(), Some(20000.0));
}

#[test]
fn test_second_before_first_is_rejected() {
    let (_dir, mut session) = open_session(SessionOptions::new());
    session.source_mut().set_stable(12500.0);

    let err = session.capture_second_mass().unwrap_err();
    assert!(matches!(
        err,
        CaptureServiceError::Validation(ValidationError::FirstMassMissing)
    ));
    assert_eq!(session.flow().second_mass(), None);
    assert!(Notice::from_error(&err).is_error());
}

#[test]
fn test_save_with_missing_fields_keeps_state() {
    let (_dir, mut session) = open_session(SessionOptions::new());
    session.source_mut().set_stable(35420.0);
    session.capture_first_mass();
    session.flow_mut().set_customer("acme");

    let err = session.save().unwrap_err();
    match err {
        CaptureServiceError::Validation(ValidationError::MissingFields(fields)) => {
            assert_eq!(fields, vec![RequiredField::VehicleRegistration]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.flow().first_mass(), Some(35420.0));
    assert_eq!(session.flow().form().customer_id, "acme");
    assert!(session.repository().find_all().unwrap().is_empty());
}

#[test]
fn test_unknown_customer_rejected_when_validating() {
    let master = MasterDataLoader::builtin().unwrap();
    let (_dir, mut session) = open_session(SessionOptions::new().with_customers_from(&master));

    session.source_mut().set_stable(18000.0);
    session.capture_first_mass();
    session.flow_mut().set_vehicle_registration("ABC123GP");
    session.flow_mut().set_customer("nobody");

    assert!(matches!(
        session.save(),
        Err(CaptureServiceError::Validation(ValidationError::UnknownCustomer(_)))
    ));
    assert_eq!(session.flow().first_mass(), Some(18000.0));

    session.flow_mut().set_customer("acme");
    assert!(session.save().is_ok());
}

#[test]
fn test_missing_fields_reported_before_unknown_customer() {
    let master = MasterDataLoader::builtin().unwrap();
    let (_dir, mut session) = open_session(SessionOptions::new().with_customers_from(&master));
    session.flow_mut().set_customer("nobody");

    match session.save().unwrap_err() {
        CaptureServiceError::Validation(ValidationError::MissingFields(fields)) => {
            assert_eq!(
                fields,
                vec![RequiredField::VehicleRegistration, RequiredField::FirstMass]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.flow().form().customer_id, "nobody");
}

#[test]
fn test_pending_transaction_completed_later() {
    let (dir, mut session) = open_session(SessionOptions::new());

    session.source_mut().set_stable(41000.0);
    session.capture_first_mass();
    session.flow_mut().set_vehicle_registration("DEF456GP");
    session.flow_mut().set_customer("global");
    let pending = session.save().unwrap();
    assert_eq!(pending.transaction.status(), TransactionStatus::Pending);

    // Vehicle returns after unloading
    let resumed = session.resume(&pending.transaction_no).unwrap();
    assert_eq!(resumed.transaction.id, pending.transaction.id);
    assert!(session.flow().is_resumed());

    session.source_mut().set_stable(15500.0);
    session.capture_second_mass().unwrap();
    let completed = session.save().unwrap();

    assert_eq!(completed.transaction_no, pending.transaction_no);
    assert_eq!(completed.transaction.net_mass(), Some(25500.0));

    let reopened = FileTransactionRepository::open(dir.path().to_path_buf()).unwrap();
    let all = reopened.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].transaction.status(), TransactionStatus::Complete);
}

#[test]
fn test_resume_unknown_number_is_not_found() {
    let (_dir, mut session) = open_session(SessionOptions::new());
    assert!(matches!(
        session.resume("999999"),
        Err(CaptureServiceError::NotFound(_))
    ));
}

#[test]
fn test_auto_capture_on_open() {
    let dir = tempdir().unwrap();
    let repo = open_transaction_repo_at(dir.path().to_path_buf()).unwrap();
    let mut scale = ManualScale::new();
    scale.set_stable(27300.0);

    let session = CaptureSession::open(
        scale,
        repo,
        SessionOptions::new().with_auto_capture_first(true),
    );
    assert_eq!(session.flow().first_mass(), Some(27300.0));
}

#[test]
fn test_auto_capture_skipped_on_zero_reading() {
    let (_dir, session) = open_session(SessionOptions::new().with_auto_capture_first(true));
    assert_eq!(session.flow().first_mass(), None);
}

#[test]
fn test_clear_keeps_live_reading() {
    let (_dir, mut session) = open_session(SessionOptions::new());
    session.source_mut().set_stable(35420.0);
    session.capture_first_mass();
    session.flow_mut().set_vehicle_registration("ABC123GP");

    session.clear();
    assert_eq!(session.flow().state(), &CaptureState::Empty);
    assert_eq!(session.flow().form().vehicle_registration, "");
    assert_eq!(session.reading().weight_kg, 35420.0);
}
