mod support;

#[cfg(test)]
mod tests {
    use crate::support::{client, response, FakeTransport, TOKEN};
    use chrono::{NaiveDate, NaiveDateTime};
    use punchclock::api::ApiError;
    use punchclock::libs::attendance::RecordId;
    use punchclock::libs::duration::WorkedDuration;
    use punchclock::libs::session::{SessionReconciler, SessionState};
    use reqwest::Method;
    use serde_json::json;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use test_context::{test_context, AsyncTestContext};
    use tokio::task::LocalSet;

    const CURRENT: &str = "/attendance/current";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(17, 30, 0).unwrap()
    }

    fn nine_am() -> NaiveDateTime {
        today().and_hms_opt(9, 0, 0).unwrap()
    }

    struct SessionTestContext {
        fake: FakeTransport,
        reconciler: SessionReconciler<FakeTransport>,
    }

    impl AsyncTestContext for SessionTestContext {
        async fn setup() -> Self {
            let fake = FakeTransport::new();
            let reconciler = SessionReconciler::new(client(&fake)).with_clock(today, now);
            SessionTestContext { fake, reconciler }
        }
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_absent_session_is_not_clocked_in(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::GET, CURRENT, 404, json!({ "message": "No attendance today" }));
        assert_eq!(ctx.reconciler.refresh().await.unwrap(), SessionState::NotClockedIn);

        ctx.fake.reply(Method::GET, "/attendance/current", 200, json!(null));
        let state = ctx.reconciler.refresh().await;
        assert_eq!(state, Ok(SessionState::NotClockedIn));
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_missing_route_is_an_error(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::GET, CURRENT, 200, json!({ "id": 7, "clock_in": "2024-03-05 09:00:00" }));
        ctx.reconciler.refresh().await.unwrap();

        ctx.fake.reply(Method::GET, CURRENT, 404, json!(null));
        let err = ctx.reconciler.refresh().await.unwrap_err();
        assert_eq!(err, ApiError::Network("HTTP 404 Not Found".into()));

        ctx.fake.reply(Method::GET, CURRENT, 404, json!("<html>Not Found</html>"));
        assert!(ctx.reconciler.refresh().await.unwrap_err().is_network());

        ctx.fake.reply(Method::GET, CURRENT, 404, json!({ "id": 7, "message": "Route not found" }));
        assert!(matches!(
            ctx.reconciler.refresh().await,
            Err(ApiError::ServerRejected { status: 404, .. })
        ));
        assert!(matches!(ctx.reconciler.state(), SessionState::ClockedIn { .. }));
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_refresh_maps_server_state(ctx: &mut SessionTestContext) {
        ctx.fake.reply(
            Method::GET,
            CURRENT,
            200,
            json!({ "id": 7, "clock_in": "2024-03-05T09:00:00", "clock_out": null }),
        );
        assert_eq!(
            ctx.reconciler.refresh().await.unwrap(),
            SessionState::ClockedIn {
                attendance_id: RecordId::from("7"),
                clock_in_at: nine_am(),
            }
        );
        assert_eq!(ctx.fake.requests()[0].bearer.as_deref(), Some(TOKEN));
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_network_failure_keeps_state(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::GET, CURRENT, 200, json!({ "id": 7, "clock_in": "2024-03-05 09:00:00" }));
        ctx.reconciler.refresh().await.unwrap();

        ctx.fake.fail(Method::GET, CURRENT, "connection reset");
        let err = ctx.reconciler.refresh().await.unwrap_err();
        assert_eq!(err, ApiError::Network("connection reset".into()));
        assert!(matches!(ctx.reconciler.state(), SessionState::ClockedIn { .. }));
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_malformed_body_is_decode_error(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::GET, CURRENT, 200, json!({ "id": 7, "clock_in": "nine o'clock" }));
        assert!(matches!(ctx.reconciler.refresh().await, Err(ApiError::Decode(_))));
        assert_eq!(ctx.reconciler.state(), SessionState::NotClockedIn);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_state_machine(ctx: &mut SessionTestContext) {
        let id = RecordId::from("11");

        let err = ctx.reconciler.clock_out(&id).await.unwrap_err();
        assert!(matches!(err, ApiError::Precondition { operation: "clock_out", .. }));
        assert_eq!(ctx.reconciler.state(), SessionState::NotClockedIn);
        assert!(ctx.fake.requests().is_empty());

        ctx.fake.reply(
            Method::POST,
            "/clock_in",
            201,
            json!({ "attendance_id": 11, "clock_in": "2024-03-05 09:00:00" }),
        );
        let outcome = ctx.reconciler.clock_in().await.unwrap();
        assert_eq!(outcome.attendance_id, id);
        assert_eq!(outcome.clock_in_at, nine_am());
        assert!(matches!(ctx.reconciler.state(), SessionState::ClockedIn { .. }));

        ctx.fake.reply(Method::POST, "/clock_out/11", 200, json!({ "message": "Clocked out" }));
        ctx.reconciler.clock_out(&id).await.unwrap();
        let state = ctx.reconciler.state();
        assert_eq!(
            state,
            SessionState::Completed {
                clock_in_at: Some(nine_am()),
                clock_out_at: now(),
            }
        );
        assert_eq!(state.worked(), Some(WorkedDuration { hours: 8, minutes: 30 }));

        let err = ctx.reconciler.clock_in().await.unwrap_err();
        assert!(matches!(err, ApiError::Precondition { operation: "clock_in", .. }));
        assert_eq!(ctx.fake.paths(), vec!["/clock_in", "/clock_out/11"]);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_clock_in_without_server_time_uses_now(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::POST, "/clock_in", 200, json!({ "data": { "attendance_id": "a-1" } }));
        let outcome = ctx.reconciler.clock_in().await.unwrap();
        assert_eq!(outcome.attendance_id.as_str(), "a-1");
        assert_eq!(outcome.clock_in_at, now());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_rejected_clock_in_keeps_state(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::POST, "/clock_in", 409, json!({ "message": "Already clocked in today" }));
        let err = ctx.reconciler.clock_in().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::ServerRejected {
                status: 409,
                message: "Already clocked in today".into()
            }
        );
        assert_eq!(ctx.reconciler.state(), SessionState::NotClockedIn);

        ctx.fake.reply(Method::POST, "/clock_in", 200, json!({ "attendance_id": 3 }));
        assert!(ctx.reconciler.clock_in().await.is_ok());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_failed_clock_out_without_message_is_network(ctx: &mut SessionTestContext) {
        ctx.fake.reply(Method::POST, "/clock_in", 200, json!({ "attendance_id": 3 }));
        ctx.reconciler.clock_in().await.unwrap();

        ctx.fake.reply(Method::POST, "/clock_out/3", 502, json!(null));
        let err = ctx.reconciler.clock_out(&RecordId::from("3")).await.unwrap_err();
        assert!(err.is_network());
        assert!(matches!(ctx.reconciler.state(), SessionState::ClockedIn { .. }));

        let err = ctx.reconciler.clock_out(&RecordId::from("4")).await.unwrap_err();
        assert!(matches!(err, ApiError::Precondition { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_clock_in_honours_precondition() {
        let fake = FakeTransport::new();
        let reconciler = SessionReconciler::new(client(&fake)).with_clock(today, now);
        let gate = fake.gate(Method::POST, "/clock_in");

        let release = async {
            fake.wait_for_requests(1).await;
            gate.send(Ok(response(200, json!({ "attendance_id": 5 })))).unwrap();
        };
        let (first, second, _) = tokio::join!(reconciler.clock_in(), reconciler.clock_in(), release);

        let results = [first, second];
        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|result| matches!(result, Err(ApiError::Precondition { operation: "clock_in", .. }))));
        assert_eq!(fake.requests().len(), 1);
        assert!(matches!(reconciler.state(), SessionState::ClockedIn { .. }));
    }

    #[tokio::test]
    async fn test_overtaken_refresh_is_discarded() {
        let fake = FakeTransport::new();
        let reconciler = Rc::new(SessionReconciler::new(client(&fake)).with_clock(today, now));
        let stale = fake.gate(Method::GET, CURRENT);
        fake.reply(Method::GET, CURRENT, 200, json!({ "id": 7, "clock_in": "2024-03-05 09:00:00" }));

        LocalSet::new()
            .run_until(async move {
                let older = tokio::task::spawn_local({
                    let reconciler = Rc::clone(&reconciler);
                    async move { reconciler.refresh().await }
                });
                fake.wait_for_requests(1).await;

                let newer = reconciler.refresh().await.unwrap();
                assert!(matches!(newer, SessionState::ClockedIn { .. }));

                let completed = json!({ "id": 7, "clock_in": "2024-03-05 09:00:00", "clock_out": "2024-03-05 17:00:00" });
                stale.send(Ok(response(200, completed))).unwrap();
                assert_eq!(older.await.unwrap(), Ok(newer.clone()));
                assert_eq!(reconciler.state(), newer);
            })
            .await;
    }

    static DAY: AtomicU32 = AtomicU32::new(5);

    fn moving_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, DAY.load(Ordering::SeqCst)).unwrap()
    }

    #[tokio::test]
    async fn test_regression_ignored_within_day_accepted_on_new_day() {
        let fake = FakeTransport::new();
        let reconciler = SessionReconciler::new(client(&fake)).with_clock(moving_today, now);

        fake.reply(
            Method::GET,
            CURRENT,
            200,
            json!({ "id": 7, "clock_in": "2024-03-05 09:00:00", "clock_out": "2024-03-05 17:00:00" }),
        );
        reconciler.refresh().await.unwrap();

        fake.reply(Method::GET, CURRENT, 404, json!({ "message": "No attendance today" }));
        fake.reply(Method::GET, CURRENT, 200, json!({ "id": 8, "clock_in": "2024-03-06 09:00:00" }));
        let state = reconciler.refresh().await.unwrap();
        assert!(matches!(state, SessionState::Completed { .. }));

        DAY.store(6, Ordering::SeqCst);
        assert_eq!(reconciler.state(), SessionState::NotClockedIn);
        let state = reconciler.refresh().await.unwrap();
        assert!(matches!(state, SessionState::ClockedIn { .. }));
    }
}
