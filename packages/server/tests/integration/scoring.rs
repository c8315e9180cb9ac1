use crate::common::{TestApp, contest_submit_body, routes, submit_body};

const PASSING_CODE: &str = "#include <iostream>\nint main() { return 0; }";

mod solved_counting {
    use super::*;

    #[tokio::test]
    async fn repeated_accepted_submissions_count_a_user_once() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        for _ in 0..3 {
            let res = app
                .post(routes::SUBMISSIONS, &submit_body("sum-pairs", "u_1", PASSING_CODE))
                .await;
            assert_eq!(res.status, 200);
        }

        assert_eq!(app.solved_count("sum-pairs").await, 1);
    }

    #[tokio::test]
    async fn distinct_users_each_count() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        for user in ["u_1", "u_2", "u_3"] {
            let res = app
                .post(routes::SUBMISSIONS, &submit_body("sum-pairs", user, PASSING_CODE))
                .await;
            assert_eq!(res.status, 200);
        }

        assert_eq!(app.solved_count("sum-pairs").await, 3);
    }

    #[tokio::test]
    async fn rejected_submissions_do_not_count() {
        let app = TestApp::spawn().await;
        app.create_problem("sum-pairs", 2).await;

        let res = app
            .post(routes::SUBMISSIONS, &submit_body("sum-pairs", "u_1", "// fail:all"))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "Rejected");

        assert_eq!(app.solved_count("sum-pairs").await, 0);
    }
}

mod contest_scoring {
    use super::*;

    /// C1 has P1 (100 pts) and P2 (200 pts); an accepted P1 and a rejected P2
    /// score exactly 100.
    #[tokio::test]
    async fn only_accepted_problems_score() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 2).await;
        app.create_problem("p2", 2).await;
        app.create_active_contest("c1", &[("p1", 100), ("p2", 200)])
            .await;

        let res = app
            .post(
                routes::SUBMISSIONS,
                &contest_submit_body("p1", "u_1", PASSING_CODE, "c1"),
            )
            .await;
        assert_eq!(res.body["status"], "Accepted");

        let res = app
            .post(
                routes::SUBMISSIONS,
                &contest_submit_body("p2", "u_1", "// fail:all", "c1"),
            )
            .await;
        assert_eq!(res.body["status"], "Rejected");

        assert_eq!(app.total_score("c1", "u_1").await, Some(100));
    }

    #[tokio::test]
    async fn resubmitting_an_accepted_problem_does_not_inflate_the_score() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 2).await;
        app.create_active_contest("c1", &[("p1", 100)]).await;

        for _ in 0..3 {
            let res = app
                .post(
                    routes::SUBMISSIONS,
                    &contest_submit_body("p1", "u_1", PASSING_CODE, "c1"),
                )
                .await;
            assert_eq!(res.status, 200);
        }

        assert_eq!(app.total_score("c1", "u_1").await, Some(100));
    }

    #[tokio::test]
    async fn score_is_independent_of_submission_order() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 2).await;
        app.create_problem("p2", 2).await;
        app.create_active_contest("c1", &[("p1", 100), ("p2", 200)])
            .await;

        for problem in ["p2", "p1"] {
            let res = app
                .post(
                    routes::SUBMISSIONS,
                    &contest_submit_body(problem, "u_1", PASSING_CODE, "c1"),
                )
                .await;
            assert_eq!(res.status, 200);
        }

        assert_eq!(app.total_score("c1", "u_1").await, Some(300));
    }

    #[tokio::test]
    async fn untagged_submissions_never_touch_the_scoreboard() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 2).await;
        app.create_active_contest("c1", &[("p1", 100)]).await;

        let res = app
            .post(routes::SUBMISSIONS, &submit_body("p1", "u_1", PASSING_CODE))
            .await;
        assert_eq!(res.body["status"], "Accepted");

        assert_eq!(app.total_score("c1", "u_1").await, None);
    }

    #[tokio::test]
    async fn submissions_outside_the_contest_window_are_rejected() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 2).await;
        app.create_contest_with_window("upcoming", 30, 90, &[("p1", 100)])
            .await;
        app.create_contest_with_window("ended", -90, -30, &[("p1", 100)])
            .await;

        for contest in ["upcoming", "ended"] {
            let res = app
                .post(
                    routes::SUBMISSIONS,
                    &contest_submit_body("p1", "u_1", PASSING_CODE, contest),
                )
                .await;
            assert_eq!(res.status, 400);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
            assert_eq!(app.total_score(contest, "u_1").await, None);
        }
    }

    #[tokio::test]
    async fn unknown_contest_tag_is_not_found() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 2).await;

        let res = app
            .post(
                routes::SUBMISSIONS,
                &contest_submit_body("p1", "u_1", PASSING_CODE, "no-such-contest"),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod standings {
    use super::*;

    #[tokio::test]
    async fn scoreboard_orders_participants_by_score() {
        let app = TestApp::spawn().await;
        app.create_problem("p1", 1).await;
        app.create_problem("p2", 1).await;
        app.create_active_contest("c1", &[("p1", 100), ("p2", 200)])
            .await;

        for problem in ["p1", "p2"] {
            app.post(
                routes::SUBMISSIONS,
                &contest_submit_body(problem, "u_1", PASSING_CODE, "c1"),
            )
            .await;
        }
        app.post(
            routes::SUBMISSIONS,
            &contest_submit_body("p1", "u_2", PASSING_CODE, "c1"),
        )
        .await;

        let res = app.get(&routes::standings("c1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["contest_id"], "c1");
        let rows = res.body["standings"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["user_id"], "u_1");
        assert_eq!(rows[0]["total_score"], 300);
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[1]["user_id"], "u_2");
        assert_eq!(rows[1]["total_score"], 100);
        assert_eq!(rows[1]["rank"], 2);
    }

    #[tokio::test]
    async fn unknown_contest_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::standings("no-such-contest")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
