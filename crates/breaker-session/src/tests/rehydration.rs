//! Session restore tests: the one-time credential read at process start.

use std::sync::Arc;

use breaker_storage::{SessionVault, StorageKeys, StoredCredential};

use crate::controller::SessionController;
use crate::events::SessionEvent;
use crate::tests::harness::{
    ok_ack, profile_response, test_session, verified, MockApi, TestSession, TEST_IDENTITY,
    TEST_PHONE,
};
use crate::types::{Identity, RehydrateOutcome, SessionState};

fn seed_credential(session: &TestSession) {
    let credential = StoredCredential::new(TEST_IDENTITY, TEST_PHONE);
    let json = serde_json::to_string(&credential).unwrap();
    session.storage.seed(StorageKeys::SESSION, &json);
}

#[tokio::test]
async fn saved_credential_restores_the_session() {
    let session = test_session();
    seed_credential(&session);

    let outcome = session.controller.rehydrate();

    assert_eq!(
        outcome,
        RehydrateOutcome::Restored {
            identity: Identity::from_string(TEST_IDENTITY),
        }
    );
    assert!(session.controller.is_authenticated());
    assert_eq!(session.controller.state(), SessionState::Authenticated);
    assert_eq!(
        session.controller.phone_number().as_deref(),
        Some(TEST_PHONE)
    );
    assert!(!session.controller.pending_verification());
    // restore is local: the profile stays empty until a refresh
    assert!(session.controller.profile().is_none());
    assert_eq!(session.api.call_count(), 0);
    assert_eq!(
        session.sink.events(),
        vec![SessionEvent::SessionRestored {
            identity: Identity::from_string(TEST_IDENTITY),
        }]
    );
}

#[tokio::test]
async fn empty_store_starts_unauthenticated() {
    let session = test_session();

    let outcome = session.controller.rehydrate();

    assert_eq!(outcome, RehydrateOutcome::NoCredential);
    assert!(!session.controller.is_authenticated());
    assert_eq!(session.controller.state(), SessionState::Unauthenticated);
    assert!(session.sink.is_empty());
}

#[tokio::test]
async fn unreadable_store_reports_storage_unavailable() {
    let session = test_session();
    seed_credential(&session);
    session.storage.fail_reads(true);

    let outcome = session.controller.rehydrate();

    assert_eq!(outcome, RehydrateOutcome::StorageUnavailable);
    assert!(!session.controller.is_authenticated());
    assert!(session.sink.is_empty());
}

#[tokio::test]
async fn corrupt_credential_reads_as_absent_and_is_discarded() {
    let session = test_session();
    session.storage.seed(StorageKeys::SESSION, "not json at all");

    let outcome = session.controller.rehydrate();

    assert_eq!(outcome, RehydrateOutcome::NoCredential);
    assert!(!session.controller.is_authenticated());
    assert!(session.storage.raw(StorageKeys::SESSION).is_none());
}

#[tokio::test]
async fn rehydrate_runs_once_per_process() {
    let session = test_session();
    seed_credential(&session);

    assert_eq!(
        session.controller.rehydrate(),
        RehydrateOutcome::Restored {
            identity: Identity::from_string(TEST_IDENTITY),
        }
    );

    // the second call answers from memory even if the store breaks
    session.storage.fail_reads(true);
    assert_eq!(
        session.controller.rehydrate(),
        RehydrateOutcome::Restored {
            identity: Identity::from_string(TEST_IDENTITY),
        }
    );

    let restored = session
        .sink
        .events()
        .iter()
        .filter(|event| matches!(event, SessionEvent::SessionRestored { .. }))
        .count();
    assert_eq!(restored, 1);
}

#[tokio::test]
async fn repeat_rehydrate_without_credential_stays_unauthenticated() {
    let session = test_session();

    assert_eq!(session.controller.rehydrate(), RehydrateOutcome::NoCredential);
    assert_eq!(session.controller.rehydrate(), RehydrateOutcome::NoCredential);
}

#[tokio::test]
async fn refresh_after_restore_fills_the_profile() {
    let session = test_session();
    seed_credential(&session);
    session.api.queue_profile(profile_response(TEST_IDENTITY));

    session.controller.rehydrate();
    assert!(session.controller.profile().is_none());

    let outcome = session.controller.refresh_user().await;

    assert!(outcome.success);
    let cached = session.controller.profile().unwrap();
    assert_eq!(cached.id, TEST_IDENTITY);
}

#[tokio::test]
async fn login_survives_a_process_restart() {
    let session = test_session();
    session.api.queue_request_code(ok_ack());
    session.api.queue_verify(verified(TEST_IDENTITY));

    session.controller.request_code(TEST_PHONE).await;
    session.controller.login("654321").await;

    // a fresh controller over the same store stands in for the next launch
    let next_launch = SessionController::new(
        Arc::new(MockApi::default()),
        SessionVault::new(Box::new(session.storage.clone())),
    );

    assert_eq!(
        next_launch.rehydrate(),
        RehydrateOutcome::Restored {
            identity: Identity::from_string(TEST_IDENTITY),
        }
    );
    assert!(next_launch.is_authenticated());
    assert_eq!(next_launch.phone_number().as_deref(), Some(TEST_PHONE));
}

#[tokio::test]
async fn logout_does_not_survive_a_restart() {
    let session = test_session();
    session.api.queue_request_code(ok_ack());
    session.api.queue_verify(verified(TEST_IDENTITY));

    session.controller.request_code(TEST_PHONE).await;
    session.controller.login("654321").await;
    session.controller.logout();

    let next_launch = SessionController::new(
        Arc::new(MockApi::default()),
        SessionVault::new(Box::new(session.storage.clone())),
    );

    assert_eq!(next_launch.rehydrate(), RehydrateOutcome::NoCredential);
    assert!(!next_launch.is_authenticated());
}
