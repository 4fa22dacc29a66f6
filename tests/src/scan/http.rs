use std::time::Duration;

use sweepr_common::Config;
use sweepr_core::oracle::HttpOracleFactory;
use sweepr_core::{ScanPhase, SessionController};
use tokio::net::TcpListener;

use crate::responder::Responder;

fn config(keyspace_len: u32) -> Config {
    Config {
        keyspace_len,
        fill_step: Duration::ZERO,
        probe_cooldown: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

fn session(template: &str, cfg: Config) -> SessionController {
    let factory = HttpOracleFactory::new(template.parse().unwrap(), &cfg).unwrap();
    SessionController::new(factory, cfg)
}

/// Two oversized responses in range; whichever lands second is committed.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn http_scan_commits_second_oversized_response() {
    let responder = Responder::start(&["0042", "0077"], 200).await.unwrap();
    let session = session(&responder.template(), config(500));

    let last = session.run_scan("R1").unwrap().finished().await.unwrap();

    assert!(last.done);
    assert_eq!(last.percent, 100);
    let found = last.found.map(|c| c.to_string());
    assert!(
        matches!(found.as_deref(), Some("0042") | Some("0077")),
        "unexpected committed value {found:?}"
    );
    assert_eq!(session.publisher().phase(), ScanPhase::Done);
    assert!(session.publisher().counters().attempts < 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn http_scan_without_match_exhausts() {
    let responder = Responder::start(&[], 200).await.unwrap();
    let session = session(&responder.template(), config(60));

    let last = session.run_scan("R1").unwrap().finished().await.unwrap();

    assert!(last.done);
    assert_eq!(last.found, None);
    assert_eq!(last.percent, 0);

    let counters = session.publisher().counters();
    assert_eq!(counters.requests_completed, 60);
    assert_eq!(counters.failures, 0);
}

/// A single oversized response is treated as noise.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn http_scan_ignores_a_lone_match() {
    let responder = Responder::start(&["0005"], 200).await.unwrap();
    let session = session(&responder.template(), config(40));

    let last = session.run_scan("R1").unwrap().finished().await.unwrap();

    assert!(last.done);
    assert_eq!(last.found, None);
    assert_eq!(session.publisher().counters().matches, 1);
}

/// Status codes are not inspected; only body length counts.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn http_scan_ignores_status_codes() {
    let responder = Responder::start(&["0003", "0011"], 404).await.unwrap();
    let session = session(&responder.template(), config(100));

    let last = session.run_scan("R1").unwrap().finished().await.unwrap();

    assert!(last.found.is_some());
    assert_eq!(last.percent, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn http_scan_against_dead_port_fails_every_probe() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let template = format!("http://127.0.0.1:{port}/check?id={{target}}&otp={{candidate}}");
    let session = session(&template, config(30));

    let last = session.run_scan("R1").unwrap().finished().await.unwrap();

    assert!(last.done);
    assert_eq!(last.found, None);
    let counters = session.publisher().counters();
    assert_eq!(counters.failures, 30);
    assert_eq!(counters.requests_completed, 0);
    assert_eq!(counters.matches, 0);
}

#[tokio::test]
async fn blank_target_is_rejected_before_any_request() {
    let responder = Responder::start(&[], 200).await.unwrap();
    let session = session(&responder.template(), config(10));

    assert!(session.run_scan("").is_err());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(responder.served(), 0);
    assert_eq!(session.publisher().phase(), ScanPhase::Idle);
}
