use axum::http::StatusCode;
use axum_test::TestServer;
use phase_planner::api::{create_router, create_router_with_config, DeleteResult};
use phase_planner::config::PlannerConfig;
use phase_planner::db::Database;
use phase_planner::models::*;
use phase_planner::planner::grid::{ArrowView, BoardView};
use phase_planner::planner::{Planner, PlannerState};
use phase_planner::share;

fn setup() -> TestServer {
    let app = create_router(share(Planner::default()));
    TestServer::new(app).expect("Failed to create test server")
}

fn setup_with_db() -> (TestServer, Database) {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let planner = Planner::with_store(db.load_state(), db.clone());
    let app = create_router(share(planner));
    (TestServer::new(app).expect("Failed to create test server"), db)
}

fn arrow_input(month: &str, start: Phase, end: Phase) -> CreateArrowInput {
    CreateArrowInput {
        month: month.to_string(),
        start_phase: start,
        end_phase: end,
    }
}

async fn create_arrow(server: &TestServer, month: &str) -> Arrow {
    let response = server
        .post("/api/v1/arrows")
        .json(&arrow_input(month, Phase::Define, Phase::Test))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Arrow>()
}

mod board {
    use super::*;

    #[tokio::test]
    async fn returns_the_seeded_board() {
        let server = setup();

        let response = server.get("/api/v1/board").await;

        response.assert_status_ok();
        let board: BoardView = response.json();
        assert_eq!(board.phases.len(), 6);
        assert_eq!(board.months.len(), 5);
        assert_eq!(board.cells.len(), 30);
        assert!(board.arrows.is_empty());
        assert!(board.months.iter().all(|m| m.can_add_arrow));
    }

    #[tokio::test]
    async fn renders_the_board_as_text() {
        let server = setup();

        let response = server
            .get("/api/v1/board/text")
            .add_query_param("width", 12)
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.starts_with("Phases"));
        assert!(text.contains("September"));
        assert!(text.contains("Problem Sta…"));
    }

    #[tokio::test]
    async fn reset_restores_the_seed() {
        let server = setup();
        create_arrow(&server, "October").await;

        let response = server.post("/api/v1/board/reset").await;

        response.assert_status_ok();
        let board: BoardView = response.json();
        assert!(board.arrows.is_empty());
        assert_eq!(board.months[0].label, "September");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = setup();
        server.get("/api/v1/health").await.assert_status_ok();
    }
}

mod activities {
    use super::*;

    #[tokio::test]
    async fn creates_an_activity_in_a_cell() {
        let server = setup();

        let response = server
            .post("/api/v1/activities")
            .json(&CreateActivityInput {
                phase: Phase::Test,
                month: "December".to_string(),
                text: "Usability study".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let activity: Activity = response.json();
        assert_eq!(activity.phase, Phase::Test);
        assert_eq!(activity.month, "December");

        let all: Vec<Activity> = server.get("/api/v1/activities").await.json();
        assert_eq!(all.len(), 5);
        assert_eq!(all.last().map(|a| a.id), Some(activity.id));
    }

    #[tokio::test]
    async fn rejects_blank_text() {
        let server = setup();

        let response = server
            .post("/api/v1/activities")
            .json(&CreateActivityInput {
                phase: Phase::Test,
                month: "December".to_string(),
                text: "   ".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_an_unknown_month() {
        let server = setup();

        let response = server
            .post("/api/v1/activities")
            .json(&CreateActivityInput {
                phase: Phase::Test,
                month: "Smarch".to_string(),
                text: "Nope".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_an_unknown_id_reports_not_removed() {
        let server = setup();

        let response = server
            .delete(&format!("/api/v1/activities/{}", uuid::Uuid::new_v4()))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<DeleteResult>(), DeleteResult { removed: false });
        let all: Vec<Activity> = server.get("/api/v1/activities").await.json();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn deletes_an_existing_activity() {
        let server = setup();
        let id = uuid::Uuid::from_u128(1);

        let response = server.delete(&format!("/api/v1/activities/{}", id)).await;

        assert_eq!(response.json::<DeleteResult>(), DeleteResult { removed: true });
        let all: Vec<Activity> = server.get("/api/v1/activities").await.json();
        assert!(all.iter().all(|a| a.id != id));
    }
}

mod arrows {
    use super::*;

    #[tokio::test]
    async fn rejects_a_fourth_arrow_with_conflict() {
        let server = setup();
        for _ in 0..3 {
            create_arrow(&server, "November").await;
        }

        let response = server
            .post("/api/v1/arrows")
            .json(&arrow_input("November", Phase::Empathize, Phase::Define))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let arrows: Vec<Arrow> = server.get("/api/v1/arrows").await.json();
        assert_eq!(arrows.len(), 3);
    }

    #[tokio::test]
    async fn rejects_a_same_phase_arrow() {
        let server = setup();

        let response = server
            .post("/api/v1/arrows")
            .json(&arrow_input("November", Phase::Ideate, Phase::Ideate))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn accepts_camel_case_phase_fields() {
        let server = setup();

        let response = server
            .post("/api/v1/arrows")
            .json(&serde_json::json!({
                "month": "October",
                "startPhase": "Test",
                "endPhase": "Define"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let arrow: Arrow = response.json();
        assert_eq!(arrow.start_phase, Phase::Test);
        assert!(!arrow.is_down());
    }

    #[tokio::test]
    async fn lays_out_a_cohort_symmetrically() {
        let server = setup();
        let first = create_arrow(&server, "October").await;
        create_arrow(&server, "October").await;

        let layout: Vec<ArrowView> = server.get("/api/v1/arrows/layout").await.json();

        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].arrow.id, first.id);
        assert!((layout[0].geometry.start.x - 0.25).abs() < 1e-9);
        assert!((layout[1].geometry.start.x - 0.75).abs() < 1e-9);
        assert_eq!(layout[0].column, Some(3));
    }

    #[tokio::test]
    async fn deleting_an_arrow_frees_capacity() {
        let server = setup();
        let first = create_arrow(&server, "November").await;
        create_arrow(&server, "November").await;
        create_arrow(&server, "November").await;

        let response = server.delete(&format!("/api/v1/arrows/{}", first.id)).await;
        assert_eq!(response.json::<DeleteResult>(), DeleteResult { removed: true });

        create_arrow(&server, "November").await;
    }
}

mod months {
    use super::*;

    #[tokio::test]
    async fn renames_a_month_and_moves_its_items() {
        let server = setup();
        create_arrow(&server, "October").await;

        let response = server
            .put("/api/v1/months/1")
            .json(&RenameMonthInput {
                label: "Oct-Revised".to_string(),
            })
            .await;

        response.assert_status_ok();
        let result: RenameMonthResult = response.json();
        assert!(result.renamed);
        assert_eq!(result.months[1], "Oct-Revised");

        let activities: Vec<Activity> = server.get("/api/v1/activities").await.json();
        assert!(activities.iter().all(|a| a.month != "October"));
        let arrows: Vec<Arrow> = server.get("/api/v1/arrows").await.json();
        assert_eq!(arrows[0].month, "Oct-Revised");
    }

    #[tokio::test]
    async fn ignores_an_out_of_range_index() {
        let server = setup();

        let response = server
            .put("/api/v1/months/9")
            .json(&RenameMonthInput {
                label: "Later".to_string(),
            })
            .await;

        response.assert_status_ok();
        let result: RenameMonthResult = response.json();
        assert!(!result.renamed);
        assert_eq!(result.months.len(), 5);
    }

    #[tokio::test]
    async fn persists_the_rename() {
        let (server, db) = setup_with_db();

        server
            .put("/api/v1/months/0")
            .json(&RenameMonthInput {
                label: "Sept".to_string(),
            })
            .await
            .assert_status_ok();

        let reloaded = db.load_state();
        assert_eq!(reloaded.months[0], "Sept");
        assert!(reloaded.activities.iter().any(|a| a.month == "Sept"));
    }
}

mod auth {
    use super::*;

    fn setup_secured() -> TestServer {
        let config = PlannerConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let planner = share(Planner::new(PlannerState::seeded()));
        TestServer::new(create_router_with_config(planner, &config))
            .expect("Failed to create test server")
    }

    #[tokio::test]
    async fn rejects_requests_without_a_token() {
        let server = setup_secured();
        server
            .get("/api/v1/board")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_a_wrong_token() {
        let server = setup_secured();
        server
            .get("/api/v1/board")
            .authorization_bearer("wrong")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn accepts_the_configured_token() {
        let server = setup_secured();
        server
            .get("/api/v1/board")
            .authorization_bearer("secret")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn leaves_health_open() {
        let server = setup_secured();
        server.get("/api/v1/health").await.assert_status_ok();
    }
}
