//! 现场排队流程集成测试
//!
//! 通过 oneshot 直接调用完整应用 (不经过网络栈), 覆盖
//! 加入/排位/取消重排/过滤排序/更新等排队语义。
//!
//! Run: cargo test -p saffron-server --test queue_flow

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;

use saffron_server::core::build_app;
use saffron_server::{Config, OneshotRouter, ServerState};

/// 初始化测试应用, 工作目录指向临时目录
async fn setup() -> (Router<ServerState>, ServerState, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    (build_app(), state, tmp)
}

/// 发送一个请求, 返回 (状态码, JSON body)
async fn request(
    app: &mut Router<ServerState>,
    state: &ServerState,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(state, request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// 组装一份完整的加入排队请求
fn join_payload(id: &str, name: &str, guests: i64, hall: &str, segment: &str, date: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "guests": guests,
        "notificationMethod": "sms",
        "contact": "13800001111",
        "hall": hall,
        "segment": segment,
        "queueDate": date,
    })
}

async fn join(
    app: &mut Router<ServerState>,
    state: &ServerState,
    payload: Value,
) -> (StatusCode, Value) {
    request(app, state, Method::POST, "/queue/join", Some(payload)).await
}

#[tokio::test]
async fn join_assigns_sequential_positions() {
    let (mut app, state, _tmp) = setup().await;

    for (i, id) in ["q1", "q2", "q3"].iter().enumerate() {
        let payload = join_payload(id, "张三", 4, "main", "dinner", "2025-06-01");
        let (status, body) = join(&mut app, &state, payload).await;

        let position = (i + 1) as i64;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], json!(*id));
        assert_eq!(body["position"], json!(position));
        assert_eq!(
            body["estimatedWaitMinutes"],
            json!(position as f64 * 60.0),
            "wait = position x 60"
        );
        assert_eq!(body["notifiedAt5Min"], json!(false));
        assert!(body["joinedAt"].is_string());
    }
}

#[tokio::test]
async fn join_reports_first_missing_field() {
    let (mut app, state, _tmp) = setup().await;

    let required = [
        "id",
        "name",
        "guests",
        "notificationMethod",
        "contact",
        "hall",
        "segment",
        "queueDate",
    ];

    for field in required {
        let mut payload = join_payload("q1", "李四", 2, "main", "lunch", "2025-06-01");
        payload.as_object_mut().unwrap().remove(field);

        let (status, body) = join(&mut app, &state, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(body["error"], json!(format!("{field}_required")));
    }

    // 同时缺失多个字段时, 报告固定顺序里的第一个
    let mut payload = join_payload("q1", "李四", 2, "main", "lunch", "2025-06-01");
    payload.as_object_mut().unwrap().remove("guests");
    payload.as_object_mut().unwrap().remove("contact");
    let (status, body) = join(&mut app, &state, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("guests_required"));
}

#[tokio::test]
async fn join_accepts_empty_values() {
    let (mut app, state, _tmp) = setup().await;

    // 只检查字段是否出现: 空字符串和 0 都是有效值
    let mut payload = join_payload("q-empty", "王五", 0, "main", "lunch", "2025-06-01");
    payload["contact"] = json!("");

    let (status, body) = join(&mut app, &state, payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["contact"], json!(""));
    assert_eq!(body["guests"], json!(0));
    assert_eq!(body["position"], json!(1));
}

#[tokio::test]
async fn groups_queue_independently() {
    let (mut app, state, _tmp) = setup().await;

    // (queueDate, guests, hall, segment) 任一不同即为不同组
    let variants = [
        ("g1", 2, "main", "dinner", "2025-06-01"),
        ("g2", 4, "main", "dinner", "2025-06-01"),
        ("g3", 2, "terrace", "dinner", "2025-06-01"),
        ("g4", 2, "main", "lunch", "2025-06-01"),
        ("g5", 2, "main", "dinner", "2025-06-02"),
    ];
    for (id, guests, hall, segment, date) in variants {
        let (status, body) = join(&mut app, &state, join_payload(id, "客人", guests, hall, segment, date)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["position"], json!(1), "{id} should start its own group");
    }

    // 与 g1 同组的第二位排在后面
    let (_, body) = join(
        &mut app,
        &state,
        join_payload("g6", "客人", 2, "main", "dinner", "2025-06-01"),
    )
    .await;
    assert_eq!(body["position"], json!(2));
    assert_eq!(body["estimatedWaitMinutes"], json!(120.0));
}

#[tokio::test]
async fn cancel_renumbers_remaining_group_members() {
    let (mut app, state, _tmp) = setup().await;

    for id in ["a", "b", "c", "d"] {
        join(&mut app, &state, join_payload(id, "组员", 4, "main", "dinner", "2025-06-01")).await;
    }

    // 取消第二位
    let (status, body) = request(&mut app, &state, Method::DELETE, "/queue/b", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    // 剩余成员按加入顺序重排为 1..N, 等待时间同步更新
    let (_, list) = request(&mut app, &state, Method::GET, "/queue", None).await;
    let entries = list["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);

    let ids: Vec<&str> = entries.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["a", "c", "d"]);
    for (i, entry) in entries.iter().enumerate() {
        let position = (i + 1) as i64;
        assert_eq!(entry["position"], json!(position));
        assert_eq!(entry["estimatedWaitMinutes"], json!(position as f64 * 60.0));
    }

    // 未知 id → 404
    let (status, body) = request(&mut app, &state, Method::DELETE, "/queue/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn cancel_does_not_touch_other_groups() {
    let (mut app, state, _tmp) = setup().await;

    join(&mut app, &state, join_payload("x1", "甲", 2, "main", "dinner", "2025-06-01")).await;
    join(&mut app, &state, join_payload("x2", "乙", 2, "main", "dinner", "2025-06-01")).await;
    join(&mut app, &state, join_payload("y1", "丙", 6, "main", "dinner", "2025-06-01")).await;
    join(&mut app, &state, join_payload("y2", "丁", 6, "main", "dinner", "2025-06-01")).await;

    request(&mut app, &state, Method::DELETE, "/queue/x1", None).await;

    let (_, list) = request(&mut app, &state, Method::GET, "/queue", None).await;
    let entries = list["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);

    for entry in entries {
        match entry["id"].as_str().unwrap() {
            // x 组重排
            "x2" => assert_eq!(entry["position"], json!(1)),
            // y 组不受影响
            "y1" => assert_eq!(entry["position"], json!(1)),
            "y2" => assert_eq!(entry["position"], json!(2)),
            other => panic!("unexpected entry {other}"),
        }
    }
}

#[tokio::test]
async fn list_orders_by_date_hall_segment_position() {
    let (mut app, state, _tmp) = setup().await;

    // 乱序插入两天的排队
    join(&mut app, &state, join_payload("j1", "客", 2, "terrace", "dinner", "2025-06-01")).await;
    join(&mut app, &state, join_payload("j2", "客", 2, "main", "lunch", "2025-06-02")).await;
    join(&mut app, &state, join_payload("j3", "客", 2, "main", "dinner", "2025-06-01")).await;
    join(&mut app, &state, join_payload("j4", "客", 2, "main", "lunch", "2025-06-02")).await;
    join(&mut app, &state, join_payload("j5", "客", 2, "terrace", "brunch", "2025-06-02")).await;
    join(&mut app, &state, join_payload("j6", "客", 2, "main", "brunch", "2025-06-02")).await;

    // 日期降序 → 厅升序 → 时段升序 → 排位升序
    let (status, body) = request(&mut app, &state, Method::GET, "/queue", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["j6", "j2", "j4", "j5", "j3", "j1"]);

    // 按日期过滤
    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/queue?queueDate=2025-06-01",
        None,
    )
    .await;
    let ids: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["j3", "j1"]);

    // 空 queueDate 等同未过滤
    let (_, body) = request(&mut app, &state, Method::GET, "/queue?queueDate=", None).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn patch_updates_notification_and_wait() {
    let (mut app, state, _tmp) = setup().await;

    join(&mut app, &state, join_payload("p1", "客", 3, "main", "dinner", "2025-06-01")).await;

    // 更新通知标记
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/queue/p1",
        Some(json!({ "notifiedAt5Min": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notifiedAt5Min"], json!(true));
    assert_eq!(body["estimatedWaitMinutes"], json!(60.0));

    // 更新等待时间, 之前的通知标记保留
    let (_, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/queue/p1",
        Some(json!({ "estimatedWaitMinutes": 15.5 })),
    )
    .await;
    assert_eq!(body["estimatedWaitMinutes"], json!(15.5));
    assert_eq!(body["notifiedAt5Min"], json!(true));

    // 空 body 不修改任何字段
    let (status, body) = request(&mut app, &state, Method::PATCH, "/queue/p1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimatedWaitMinutes"], json!(15.5));
    assert_eq!(body["notifiedAt5Min"], json!(true));

    // 未知 id → 404
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/queue/none",
        Some(json!({ "notifiedAt5Min": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn rejoin_with_same_id_replaces_entry() {
    let (mut app, state, _tmp) = setup().await;

    let (_, body) = join(
        &mut app,
        &state,
        join_payload("r1", "客", 4, "main", "dinner", "2025-06-01"),
    )
    .await;
    assert_eq!(body["position"], json!(1));

    // 相同 id 再次加入会覆盖旧记录, 排位按覆盖前的组内人数计算
    let (status, body) = join(
        &mut app,
        &state,
        join_payload("r1", "客", 4, "main", "dinner", "2025-06-01"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["position"], json!(2));

    let (_, list) = request(&mut app, &state, Method::GET, "/queue", None).await;
    let entries = list["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], json!("r1"));
    assert_eq!(entries[0]["position"], json!(2));
}
