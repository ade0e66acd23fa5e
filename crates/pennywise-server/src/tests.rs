//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use pennywise_core::db::Database;
use pennywise_core::models::{Category, NewExpense};
use tower::ServiceExt;

fn setup_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_defaults().unwrap();
    db
}

fn app_with_db(db: Database) -> Router {
    let classifier = Arc::new(ExpenseClassifier::new().unwrap());
    create_router(db, classifier, None, ServerConfig::default())
}

fn setup_test_app() -> Router {
    app_with_db(setup_db())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let response = setup_test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["status"], "ok");
}

// ========== Salary API Tests ==========

#[tokio::test]
async fn test_get_salary_defaults_to_zero() {
    let response = setup_test_app().oneshot(get("/salary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["monthly_salary"], 0.0);
}

#[tokio::test]
async fn test_set_salary() {
    let db = setup_db();
    let app = app_with_db(db.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/salary",
            serde_json::json!({ "monthly_salary": 4500.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["monthly_salary"], 4500.0);
    assert_eq!(db.get_salary().unwrap(), 4500.0);
}

#[tokio::test]
async fn test_negative_salary_rejected() {
    let db = setup_db();
    db.set_salary(2500.0).unwrap();
    let app = app_with_db(db.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/salary",
            serde_json::json!({ "monthly_salary": -10.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("negative"));
    assert_eq!(db.get_salary().unwrap(), 2500.0);
}

#[tokio::test]
async fn test_salary_missing_field() {
    let response = setup_test_app()
        .oneshot(json_request("POST", "/salary", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/salary")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "Invalid JSON");
}

// ========== Expense API Tests ==========

#[tokio::test]
async fn test_create_and_list_expenses() {
    let db = setup_db();
    let app = app_with_db(db.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            serde_json::json!({
                "description": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "confidence": 0.85
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    let id = json["id"].as_i64().unwrap();
    assert!(id > 0);

    let response = app.oneshot(get("/expenses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let expenses = json["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["id"], id);
    assert_eq!(expenses[0]["description"], "Coffee");
    assert_eq!(expenses[0]["amount"], 4.5);
    assert_eq!(expenses[0]["category"], "Food");
    assert_eq!(expenses[0]["confidence"], 0.85);
}

#[tokio::test]
async fn test_create_expense_defaults() {
    let db = setup_db();
    let app = app_with_db(db.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/expenses",
            serde_json::json!({ "description": "Mystery", "amount": 12.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = &db.list_expenses().unwrap()[0];
    assert_eq!(stored.category, Category::Other);
    assert_eq!(stored.confidence, 0.8);
}

#[tokio::test]
async fn test_create_expense_validation() {
    let db = setup_db();
    let app = app_with_db(db.clone());

    let cases = [
        serde_json::json!({ "amount": 10.0 }),
        serde_json::json!({ "description": "", "amount": 10.0 }),
        serde_json::json!({ "description": "Lunch" }),
        serde_json::json!({ "description": "Lunch", "amount": 0 }),
        serde_json::json!({ "description": "Lunch", "amount": -3.0 }),
        serde_json::json!({ "description": "Lunch", "amount": 3.0, "category": "Travel" }),
        serde_json::json!({ "description": "Lunch", "amount": 3.0, "confidence": 1.5 }),
    ];

    for body in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/expenses", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        assert!(get_body_json(response).await["error"].is_string());
    }

    assert_eq!(db.count_expenses().unwrap(), 0);
}

// ========== Analytics API Tests ==========

#[tokio::test]
async fn test_category_analytics() {
    let db = setup_db();
    db.add_expense(&NewExpense::new("Lunch", 12.5, Category::Food))
        .unwrap();
    db.add_expense(&NewExpense::new("Dinner", 20.0, Category::Food))
        .unwrap();
    db.add_expense(&NewExpense::new("Taxi", 7.5, Category::Transportation))
        .unwrap();

    let response = app_with_db(db)
        .oneshot(get("/analytics/categories"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["category_totals"]["Food"], 32.5);
    assert_eq!(json["category_totals"]["Transportation"], 7.5);
    assert_eq!(json["total_spending"], 40.0);
}

#[tokio::test]
async fn test_monthly_analytics() {
    let db = setup_db();
    db.add_expense_on(&NewExpense::new("Lunch", 10.0, Category::Food), date(2024, 1, 5))
        .unwrap();
    db.add_expense_on(&NewExpense::new("Movie", 14.0, Category::Entertainment), date(2024, 2, 9))
        .unwrap();

    let response = app_with_db(db)
        .oneshot(get("/analytics/monthly"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["monthly_data"]["2024-01"]["Food"], 10.0);
    assert_eq!(json["monthly_data"]["2024-02"]["Entertainment"], 14.0);
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_budget_suggestions() {
    let db = setup_db();
    db.set_salary(1000.0).unwrap();
    // Food limit = 200
    db.add_expense(&NewExpense::new("Groceries", 170.0, Category::Food))
        .unwrap();

    let response = app_with_db(db)
        .oneshot(get("/budget/suggestions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 8);

    let food = suggestions
        .iter()
        .find(|s| s["category"] == "Food")
        .unwrap();
    assert_eq!(food["budget_limit"], 200.0);
    assert_eq!(food["current_spending"], 170.0);
    assert_eq!(food["status"], "warning");

    let summary = suggestions.last().unwrap();
    assert_eq!(summary["category"], "Monthly Summary");
    assert_eq!(summary["status"], "info");
    assert_eq!(
        summary["suggestion"],
        "Total spent: ₹170.00 | Remaining: ₹830.00"
    );
}

#[tokio::test]
async fn test_budget_suggestions_without_salary() {
    let response = setup_test_app()
        .oneshot(get("/budget/suggestions"))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["category"], "Monthly Summary");
}

#[tokio::test]
async fn test_budget_goals() {
    let db = setup_db();
    let app = app_with_db(db.clone());

    let response = app.clone().oneshot(get("/budget/goals")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["goals"]["Food"], 20.0);
    assert_eq!(json["goals"]["Other"], 30.0);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/budget/goals/Healthcare",
            serde_json::json!({ "percentage": 15.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Healthcare");
    assert_eq!(json["percentage"], 15.0);
    assert_eq!(db.get_budget_goals().unwrap()[&Category::Healthcare], 15.0);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/budget/goals/Healthcare",
            serde_json::json!({ "percentage": 150.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/budget/goals/Travel",
            serde_json::json!({ "percentage": 5.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Categorization API Tests ==========

#[tokio::test]
async fn test_categorize_simple() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/categorize",
            serde_json::json!({ "description": "Doctor appointment" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Healthcare");
    assert_eq!(json["confidence"], 0.85);

    let response = app
        .oneshot(json_request("POST", "/categorize", serde_json::json!({})))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Other");
    assert_eq!(json["confidence"], 0.5);
}

#[tokio::test]
async fn test_classify_cascade() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/classify",
            serde_json::json!({ "description": "I love coffee" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Food");
    assert_eq!(json["confidence"], 0.85);
    assert_eq!(json["all_probabilities"]["Food"], 0.85);

    let response = app
        .oneshot(json_request("POST", "/classify", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_classify_degraded_without_model() {
    let classifier = Arc::new(ExpenseClassifier::untrained().unwrap());
    let app = create_router(setup_db(), classifier, None, ServerConfig::default());

    let response = app
        .oneshot(json_request(
            "POST",
            "/classify",
            serde_json::json!({ "description": "123 !!!" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Other");
    assert_eq!(json["confidence"], 0.5);
    assert!(json["all_probabilities"].as_object().unwrap().is_empty());
}

// ========== Prediction API Tests ==========

#[tokio::test]
async fn test_predict_next_month_no_data() {
    let response = setup_test_app()
        .oneshot(get("/predict/next-month"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["prediction"]["predicted_amount"], 0.0);
    assert_eq!(json["prediction"]["confidence"], 0.0);
    assert_eq!(json["prediction"]["trend"], "Insufficient data");
}

#[tokio::test]
async fn test_predict_next_month() {
    let db = setup_db();
    db.add_expense_on(&NewExpense::new("Rent", 300.0, Category::Utilities), date(2024, 1, 1))
        .unwrap();
    db.add_expense_on(&NewExpense::new("Rent", 100.0, Category::Utilities), date(2024, 2, 1))
        .unwrap();

    let response = app_with_db(db)
        .oneshot(get("/predict/next-month"))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["prediction"]["predicted_amount"], 200.0);
    assert_eq!(json["prediction"]["confidence"], "75%");
    assert_eq!(json["prediction"]["trend"], "Decreasing");
}

#[tokio::test]
async fn test_forecast() {
    let db = setup_db();
    db.add_expense_on(&NewExpense::new("Lunch", 100.0, Category::Food), date(2024, 1, 10))
        .unwrap();
    db.add_expense_on(&NewExpense::new("Lunch", 200.0, Category::Food), date(2024, 2, 10))
        .unwrap();

    let response = app_with_db(db)
        .oneshot(get("/predict/forecast"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["predicted_amount"], 150.0);
    assert_eq!(json["confidence"], "low");
    assert_eq!(json["trend"], "increasing");
    assert_eq!(json["months_used"], serde_json::json!(["2024-01", "2024-02"]));
    assert_eq!(json["monthly_sums"]["2024-02"], 200.0);
}

#[tokio::test]
async fn test_forecast_no_data() {
    let response = setup_test_app()
        .oneshot(get("/predict/forecast"))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["predicted_amount"], 0.0);
    assert_eq!(json["prediction"], "Insufficient data");
}

// ========== Export API Tests ==========

#[tokio::test]
async fn test_export_csv() {
    let db = setup_db();
    db.add_expense_on(
        &NewExpense::new("Bus, downtown", 2.75, Category::Transportation).with_confidence(0.9),
        date(2024, 3, 4),
    )
    .unwrap();

    let response = app_with_db(db.clone())
        .oneshot(get("/export/csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[axum::http::header::CONTENT_DISPOSITION],
        "attachment; filename=expenses.csv"
    );
    assert!(response.headers()[axum::http::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let body = get_body_text(response).await;
    let expense = &db.list_expenses().unwrap()[0];
    assert_eq!(
        body,
        format!(
            "ID,Description,Amount,Category,Date,Confidence\n{},\"Bus, downtown\",2.75,Transportation,2024-03-04,0.9\n",
            expense.id
        )
    );
}

// ========== Routing ==========

#[tokio::test]
async fn test_unknown_route_without_static_dir() {
    let response = setup_test_app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Pennywise</h1>").unwrap();

    let classifier = Arc::new(ExpenseClassifier::new().unwrap());
    let app = create_router(
        setup_db(),
        classifier,
        dir.path().to_str(),
        ServerConfig::default(),
    );

    let response = app.clone().oneshot(get("/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_text(response).await, "<h1>Pennywise</h1>");

    let response = app.oneshot(get("/missing.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_parse_origins() {
    assert_eq!(
        parse_origins(" http://localhost:3000, ,https://example.com "),
        vec!["http://localhost:3000", "https://example.com"]
    );
    assert!(parse_origins("").is_empty());

    let config = ServerConfig::default().with_origins(parse_origins("http://a.test"));
    assert_eq!(config.allowed_origins, vec!["http://a.test"]);
}
