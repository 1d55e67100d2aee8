//! 文档存储资源集成测试
//!
//! 覆盖用户/菜单/反馈/订单/预订/候补名单的 CRUD 语义和健康检查。
//!
//! Run: cargo test -p saffron-server --test store_crud

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

/// 取列表响应中的 id 序列, 字段名由调用方指定
fn ids(body: &Value, key: &str) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e[key].as_str().unwrap().to_string())
        .collect()
}

// ========== 用户 ==========

#[tokio::test]
async fn user_crud_roundtrip() {
    let (mut app, state, _tmp) = setup().await;

    // 创建 (显式 id)
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "id": "u1", "name": "Asha", "email": "asha@example.com", "phone": "555-0100" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!("u1"));
    assert!(body["createdAt"].is_string());

    // 创建 (自动生成 id)
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ravi", "email": "ravi@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"].as_str().unwrap().len(), 32);

    // 读取
    let (status, body) = request(&mut app, &state, Method::GET, "/users/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Asha"));
    assert_eq!(body["phone"], json!("555-0100"));

    // 列表按创建时间升序
    let (_, body) = request(&mut app, &state, Method::GET, "/users", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["id"], json!("u1"));

    // 按邮箱精确查找
    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/users?email=ravi@example.com",
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], json!("Ravi"));

    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/users?email=nobody@example.com",
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // 部分更新: 未提交的字段保持不变
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/users/u1",
        Some(json!({ "name": "Asha K" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Asha K"));
    assert_eq!(body["email"], json!("asha@example.com"));

    // 删除
    let (status, body) = request(&mut app, &state, Method::DELETE, "/users/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (status, body) = request(&mut app, &state, Method::GET, "/users/u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));

    let (status, _) = request(&mut app, &state, Method::DELETE, "/users/u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_duplicates_conflict() {
    let (mut app, state, _tmp) = setup().await;

    let (status, _) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "id": "dup", "name": "A", "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // id 重复 → 409
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "id": "dup", "name": "B", "email": "b@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("already_exists"));

    // email 重复 → 409
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "name": "C", "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("already_exists"));

    // 更新到已占用的 email → 409
    request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "id": "u2", "name": "D", "email": "d@example.com" })),
    )
    .await;
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/users/u2",
        Some(json!({ "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("already_exists"));

    // 缺失必填字段 → 400
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "email": "x@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("name_required"));

    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/users",
        Some(json!({ "name": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("email_required"));
}

// ========== 菜单 ==========

#[tokio::test]
async fn menu_item_filters() {
    let (mut app, state, _tmp) = setup().await;

    let seed = [
        json!({ "id": "m1", "name": "Paneer Tikka", "category": "starters", "price": 8.5, "isVeg": true }),
        json!({ "id": "m2", "name": "Chicken 65", "category": "starters", "price": 9.0, "isVeg": false }),
        json!({ "id": "m3", "name": "Dal Makhani", "category": "mains", "price": 11.0, "isVeg": true }),
    ];
    for item in seed {
        let (status, _) = request(&mut app, &state, Method::POST, "/menu", Some(item)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // 全量列表按 category, name 升序
    let (_, body) = request(&mut app, &state, Method::GET, "/menu", None).await;
    assert_eq!(ids(&body, "id"), ["m3", "m2", "m1"]);
    // available 默认 true
    assert_eq!(body[0]["available"], json!(true));

    // category 过滤
    let (_, body) = request(&mut app, &state, Method::GET, "/menu?category=starters", None).await;
    assert_eq!(ids(&body, "id"), ["m2", "m1"]);

    // isVeg 过滤
    let (_, body) = request(&mut app, &state, Method::GET, "/menu?isVeg=true", None).await;
    assert_eq!(ids(&body, "id"), ["m3", "m1"]);

    // 组合过滤
    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/menu?category=starters&isVeg=true",
        None,
    )
    .await;
    assert_eq!(ids(&body, "id"), ["m1"]);

    // 更新
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/menu/m2",
        Some(json!({ "available": false, "price": 7.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], json!(false));
    assert_eq!(body["price"], json!(7.5));

    // price 必填
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/menu",
        Some(json!({ "name": "X", "category": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("price_required"));

    // 未知 id → 404
    let (status, _) = request(&mut app, &state, Method::GET, "/menu/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== 反馈 ==========

#[tokio::test]
async fn feedback_rating_bounds_and_listing() {
    let (mut app, state, _tmp) = setup().await;

    // 评分越界 → 400 rating_invalid
    for rating in [0, 6] {
        let (status, body) = request(
            &mut app,
            &state,
            Method::POST,
            "/feedback",
            Some(json!({ "userId": "u1", "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {rating}");
        assert_eq!(body["error"], json!("rating_invalid"));
    }

    // 必填字段
    let (status, body) = request(&mut app, &state, Method::POST, "/feedback", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("rating_required"));

    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/feedback",
        Some(json!({ "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("userId_required"));

    // 有效创建 x3
    let seed = [
        json!({ "id": "f1", "userId": "u1", "rating": 5, "comment": "很好" }),
        json!({ "id": "f2", "userId": "u2", "orderId": "o1", "rating": 3 }),
        json!({ "id": "f3", "userId": "u1", "rating": 4 }),
    ];
    for entry in seed {
        let (status, _) = request(&mut app, &state, Method::POST, "/feedback", Some(entry)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // 列表按创建时间降序
    let (_, body) = request(&mut app, &state, Method::GET, "/feedback", None).await;
    assert_eq!(ids(&body, "id"), ["f3", "f2", "f1"]);

    // 过滤
    let (_, body) = request(&mut app, &state, Method::GET, "/feedback?userId=u1", None).await;
    assert_eq!(ids(&body, "id"), ["f3", "f1"]);

    let (_, body) = request(&mut app, &state, Method::GET, "/feedback?orderId=o1", None).await;
    assert_eq!(ids(&body, "id"), ["f2"]);

    // PATCH 同样校验评分范围
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/feedback/f1",
        Some(json!({ "rating": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("rating_invalid"));

    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/feedback/f1",
        Some(json!({ "comment": "回头客" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"], json!("回头客"));
    assert_eq!(body["rating"], json!(5));

    // 删除
    let (status, body) = request(&mut app, &state, Method::DELETE, "/feedback/f2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
    let (status, _) = request(&mut app, &state, Method::GET, "/feedback/f2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== 订单 ==========

#[tokio::test]
async fn order_lifecycle() {
    let (mut app, state, _tmp) = setup().await;

    let items = json!([{ "menuItemId": "m1", "name": "Dal Makhani", "quantity": 2, "price": 11.0 }]);
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/orders",
        Some(json!({ "id": "o1", "userId": "u1", "items": items, "total": 22.0, "date": "2025-06-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("pending"), "status defaults to pending");
    assert_eq!(body["total"], json!(22.0));

    // items 不能为空
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/orders",
        Some(json!({ "userId": "u1", "items": [], "total": 0.0, "date": "2025-06-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("items_required"));

    // item quantity 默认 1
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/orders",
        Some(json!({
            "id": "o2",
            "userId": "u2",
            "items": [{ "menuItemId": "m2", "price": 3.0 }],
            "total": 3.0,
            "date": "2025-06-02"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["items"][0]["quantity"], json!(1));

    // 状态流转
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/orders/o1",
        Some(json!({ "status": "served" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("served"));
    assert_eq!(body["total"], json!(22.0));

    // 列表按日期降序
    let (_, body) = request(&mut app, &state, Method::GET, "/orders", None).await;
    assert_eq!(ids(&body, "id"), ["o2", "o1"]);

    // 过滤
    let (_, body) = request(&mut app, &state, Method::GET, "/orders?userId=u1", None).await;
    assert_eq!(ids(&body, "id"), ["o1"]);
    let (_, body) = request(&mut app, &state, Method::GET, "/orders?date=2025-06-02", None).await;
    assert_eq!(ids(&body, "id"), ["o2"]);

    // 删除
    let (status, _) = request(&mut app, &state, Method::DELETE, "/orders/o1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&mut app, &state, Method::GET, "/orders/o1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== 预订与候补名单 ==========

#[tokio::test]
async fn reservation_and_waiting_flow() {
    let (mut app, state, _tmp) = setup().await;

    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/reservations",
        Some(json!({
            "reservationId": "r1",
            "userId": "u1",
            "name": "Asha",
            "guests": 4,
            "date": "2025-06-05",
            "timeSlot": "19:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("confirmed"), "status defaults to confirmed");
    assert!(body["tableNumber"].is_null());

    // guests 必须为正数
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/reservations",
        Some(json!({
            "userId": "u1",
            "name": "Noone",
            "guests": 0,
            "date": "2025-06-05",
            "timeSlot": "19:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("guests_required"));

    // 入座: 分配桌号
    let (status, body) = request(
        &mut app,
        &state,
        Method::PATCH,
        "/reservations/r1",
        Some(json!({ "tableNumber": 12, "status": "seated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tableNumber"], json!(12));
    assert_eq!(body["status"], json!("seated"));

    // 列表按日期和时段升序
    request(
        &mut app,
        &state,
        Method::POST,
        "/reservations",
        Some(json!({
            "reservationId": "r2",
            "userId": "u2",
            "name": "Ravi",
            "guests": 2,
            "date": "2025-06-04",
            "timeSlot": "20:00"
        })),
    )
    .await;
    let (_, body) = request(&mut app, &state, Method::GET, "/reservations", None).await;
    assert_eq!(ids(&body, "reservationId"), ["r2", "r1"]);

    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/reservations?date=2025-06-05",
        None,
    )
    .await;
    assert_eq!(ids(&body, "reservationId"), ["r1"]);

    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/reservations?timeSlot=20:00",
        None,
    )
    .await;
    assert_eq!(ids(&body, "reservationId"), ["r2"]);

    // ── 候补名单 ──
    let (status, body) = request(
        &mut app,
        &state,
        Method::POST,
        "/reservations/waiting",
        Some(json!({
            "queueId": "w1",
            "userId": "u3",
            "name": "Meera",
            "guests": 3,
            "date": "2025-06-05",
            "timeSlot": "19:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["queueId"], json!("w1"));

    request(
        &mut app,
        &state,
        Method::POST,
        "/reservations/waiting",
        Some(json!({
            "queueId": "w2",
            "userId": "u4",
            "name": "Dev",
            "guests": 2,
            "date": "2025-06-05",
            "timeSlot": "20:00"
        })),
    )
    .await;

    // 加入顺序即列表顺序
    let (_, body) = request(&mut app, &state, Method::GET, "/reservations/waiting", None).await;
    assert_eq!(ids(&body, "queueId"), ["w1", "w2"]);

    // 过滤
    let (_, body) = request(
        &mut app,
        &state,
        Method::GET,
        "/reservations/waiting?timeSlot=20:00",
        None,
    )
    .await;
    assert_eq!(ids(&body, "queueId"), ["w2"]);

    // 退出
    let (status, body) = request(
        &mut app,
        &state,
        Method::DELETE,
        "/reservations/waiting/w1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (status, _) = request(
        &mut app,
        &state,
        Method::DELETE,
        "/reservations/waiting/w1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 预订删除
    let (status, _) = request(&mut app, &state, Method::DELETE, "/reservations/r1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&mut app, &state, Method::GET, "/reservations/r1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== 健康检查 ==========

#[tokio::test]
async fn health_reports_subsystem_status() {
    let (mut app, state, _tmp) = setup().await;

    let (status, body) = request(&mut app, &state, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert!(body["version"].is_string());

    let (status, body) = request(&mut app, &state, Method::GET, "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["checks"]["store"]["ok"], json!(true));
    assert_eq!(body["checks"]["queue"]["ok"], json!(true));
    assert!(body["uptime_seconds"].is_number());
}
