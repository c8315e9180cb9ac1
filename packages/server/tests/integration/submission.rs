use serde_json::json;
use uuid::Uuid;

use crate::common::{StubBehavior, TestApp, routes, submit_body};

const PASSING_CODE: &str = "#include <iostream>\nint main() { return 0; }";

mod submitting {
    use super::*;

    #[tokio::test]
    async fn accepted_solution_round_trip() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "Accepted");
        assert_eq!(res.body["test_cases_passed"], 2);
        assert_eq!(res.body["total_test_cases"], 2);
        assert_eq!(res.body["test_cases"][0]["passed"], true);
        assert_eq!(res.body["test_cases"][0]["number"], 1);
        assert_eq!(res.body["test_cases"][0]["verdict"], "Accepted");

        let id: Uuid = body["submission_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(
            app.submission_status(id).await,
            ::common::SubmissionStatus::Accepted
        );
        assert_eq!(app.result_rows(id).await, 2);
    }

    #[tokio::test]
    async fn failing_case_is_reported_with_its_verdict() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 3).await;

        let body = submit_body("sum-pairs", "u_1", "// fail:2");
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "Rejected");
        assert_eq!(res.body["test_cases_passed"], 2);
        assert_eq!(res.body["total_test_cases"], 3);
        assert_eq!(res.body["test_cases"][1]["number"], 2);
        assert_eq!(res.body["test_cases"][1]["passed"], false);
        assert_eq!(res.body["test_cases"][1]["verdict"], "Wrong Answer");
    }

    #[tokio::test]
    async fn persists_one_result_row_per_test_case_even_on_rejection() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 4).await;

        let body = submit_body("sum-pairs", "u_1", "// fail:1");
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 200);
        let id: Uuid = body["submission_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(app.result_rows(id).await, 4);
    }

    #[tokio::test]
    async fn duplicate_submission_id_replays_the_recorded_result() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        let first = app.post(routes::SUBMISSIONS, &body).await;
        let second = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);
        assert_eq!(second.body["status"], "Accepted");
        assert_eq!(second.body["total_test_cases"], 2);

        let id: Uuid = body["submission_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(app.result_rows(id).await, 2);
        assert_eq!(app.solved_count("sum-pairs").await, 1);
    }

    #[tokio::test]
    async fn missing_field_is_rejected_before_any_judging() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let body = json!({
            "submission_id": Uuid::new_v4().to_string(),
            "problem_id": "sum-pairs",
            "user_id": "u_1",
            "language": "cpp",
        });
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_required_field_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let body = submit_body("  ", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unsupported_language_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let mut body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        body["language"] = json!("cobol");
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_problem_is_not_found() {
        let app = TestApp::spawn().await;

        let body = submit_body("no-such-problem", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn problem_without_test_cases_cannot_be_judged() {
        let app = TestApp::spawn().await;
        app.create_problem("untestable", 0).await;

        let body = submit_body("untestable", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMPTY_TEST_SET");
    }
}

mod execution_failures {
    use super::*;

    #[tokio::test]
    async fn poll_bound_exhaustion_reports_timeout_and_records_no_verdict() {
        let app = TestApp::spawn_with(StubBehavior::NeverTerminal).await;
        app.create_problem("sum-pairs", 2).await;

        let body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 504);
        assert_eq!(res.body["code"], "EXECUTION_TIMEOUT");

        let id: Uuid = body["submission_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(
            app.submission_status(id).await,
            ::common::SubmissionStatus::Pending
        );
        assert_eq!(app.result_rows(id).await, 0);
        assert_eq!(app.solved_count("sum-pairs").await, 0);
    }

    #[tokio::test]
    async fn backend_failure_is_surfaced_as_bad_gateway() {
        let app = TestApp::spawn_with(StubBehavior::RejectSubmit).await;
        app.create_problem("sum-pairs", 2).await;

        let body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "EXECUTION_BACKEND_ERROR");

        let id: Uuid = body["submission_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(
            app.submission_status(id).await,
            ::common::SubmissionStatus::Pending
        );
    }

    #[tokio::test]
    async fn unrecognized_backend_status_fails_the_case() {
        let app = TestApp::spawn_with(StubBehavior::FixedStatus(42, "Mystery")).await;
        app.create_problem("sum-pairs", 1).await;

        let body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        let res = app.post(routes::SUBMISSIONS, &body).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "Rejected");
        assert_eq!(res.body["test_cases"][0]["passed"], false);
        assert_eq!(res.body["test_cases"][0]["verdict"], "Mystery");
    }
}

mod reading {
    use super::*;

    #[tokio::test]
    async fn stored_submission_detail_is_readable() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let body = submit_body("sum-pairs", "u_1", PASSING_CODE);
        app.post(routes::SUBMISSIONS, &body).await;

        let id = body["submission_id"].as_str().unwrap();
        let res = app.get(&routes::submission(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["problem_id"], "sum-pairs");
        assert_eq!(res.body["user_id"], "u_1");
        assert_eq!(res.body["language"], "cpp");
        assert_eq!(res.body["status"], "Accepted");
        assert_eq!(res.body["test_cases"].as_array().unwrap().len(), 2);
        assert!(res.body["judged_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&routes::submission(&Uuid::new_v4().to_string()))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
