//! End-to-end pipeline tests against a mock middleware

use prospector_config::{MiddlewareConfig, ProspectorConfig};
use prospector_core::{MiddlewarePipeline, NoticeCollector};
use prospector_http::MiddlewareClient;
use prospector_interfaces::{
    DeliveryClient, IntegrationConfig, MissingPrerequisite, PipelineReport, Submission,
    SubmissionHandler,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submission() -> Submission {
    Submission::from_export(json!({
        "sid": 42,
        "webform_id": "rfi",
        "remote_addr": "1.2.3.4",
        "in_draft": false,
        "data": {"email": "a@b.com", "name": "Jo"}
    }))
    .unwrap()
}

fn config(endpoint_url: Option<String>) -> ProspectorConfig {
    let mut config = ProspectorConfig::default();
    config.middleware = MiddlewareConfig {
        endpoint_url,
        ..Default::default()
    };
    config.middleware.auth.user = Some("user".to_string());
    config.middleware.auth.pass = Some("secret".to_string());
    config.integration = IntegrationConfig::new(["email"], "UUID-7");
    config
}

const FAILURE_NOTICE: &str =
    "AIS RFI Middleware: An error occurred while posting the webform submission to the middleware.";

fn pipeline(config: &ProspectorConfig, reporter: Arc<NoticeCollector>) -> MiddlewarePipeline {
    let client = MiddlewareClient::new().unwrap();
    MiddlewarePipeline::from_config(config, Arc::new(client)).with_reporter(reporter)
}

#[tokio::test]
async fn test_submission_is_posted_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rfi"))
        .and(header("authorization", "Basic dXNlcjpzZWNyZXQ="))
        .and(body_json(json!({
            "email": "a@b.com",
            "webform_id": "rfi",
            "remote_addr": "1.2.3.4",
            "siteInteractionUuid": "UUID-7",
            "clientKey": "prospector"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reporter = Arc::new(NoticeCollector::new());
    let config = config(Some(format!("{}/api/rfi", mock_server.uri())));
    let report = pipeline(&config, reporter.clone())
        .on_submission_saved(&submission(), false)
        .await;

    assert_eq!(
        report,
        PipelineReport::Delivered {
            status: 200,
            response: "accepted".to_string()
        }
    );
    assert!(reporter.take_notices().is_empty());
}

#[tokio::test]
async fn test_missing_endpoint_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let reporter = Arc::new(NoticeCollector::new());
    let report = pipeline(&config(None), reporter.clone())
        .on_submission_saved(&submission(), false)
        .await;

    assert_eq!(
        report,
        PipelineReport::Skipped {
            reason: MissingPrerequisite::EndpointUrl
        }
    );
    assert!(reporter.take_notices().is_empty());
}

#[tokio::test]
async fn test_middleware_error_raises_one_notice() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reporter = Arc::new(NoticeCollector::new());
    let report = pipeline(&config(Some(mock_server.uri())), reporter.clone())
        .on_submission_saved(&submission(), false)
        .await;

    match report {
        PipelineReport::Failed { error } => assert!(error.contains("500")),
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(reporter.take_notices(), vec![FAILURE_NOTICE]);
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = config(Some(mock_server.uri()));
    let pipeline = Arc::new(MiddlewarePipeline::from_config(
        &config,
        Arc::new(MiddlewareClient::new().unwrap()),
    ));

    let handles: Vec<_> = (1..=3u64)
        .map(|sid| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let submission =
                    Submission::new(sid).with_data("email", format!("{}@example.edu", sid));
                pipeline.on_submission_saved(&submission, false).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_delivered());
    }
}

#[tokio::test]
async fn test_notices_stay_with_their_own_run() {
    let failing = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&failing)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&healthy)
        .await;

    let client: Arc<dyn DeliveryClient> = Arc::new(MiddlewareClient::new().unwrap());
    let failing_notices = Arc::new(NoticeCollector::new());
    let healthy_notices = Arc::new(NoticeCollector::new());
    let failing_run = MiddlewarePipeline::from_config(&config(Some(failing.uri())), client.clone())
        .with_reporter(failing_notices.clone());
    let healthy_run = MiddlewarePipeline::from_config(&config(Some(healthy.uri())), client)
        .with_reporter(healthy_notices.clone());

    let submission = submission();
    let (failed, delivered) = tokio::join!(
        failing_run.on_submission_saved(&submission, false),
        healthy_run.on_submission_saved(&submission, false)
    );

    assert!(matches!(failed, PipelineReport::Failed { .. }));
    assert!(delivered.is_delivered());
    assert_eq!(failing_notices.take_notices(), vec![FAILURE_NOTICE]);
    assert!(healthy_notices.take_notices().is_empty());
}

#[tokio::test]
async fn test_default_reporter_retains_nothing_across_runs() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&mock_server)
        .await;

    let config = config(Some(mock_server.uri()));
    let collector = Arc::new(NoticeCollector::new());
    let pipeline =
        MiddlewarePipeline::from_config(&config, Arc::new(MiddlewareClient::new().unwrap()));

    for _ in 0..5 {
        let report = pipeline.on_submission_saved(&submission(), false).await;
        assert!(matches!(report, PipelineReport::Failed { .. }));
    }

    // A collector only sees the runs it was handed to
    let pipeline = pipeline.with_reporter(collector.clone());
    pipeline.on_submission_saved(&submission(), false).await;
    assert_eq!(collector.take_notices(), vec![FAILURE_NOTICE]);
}
