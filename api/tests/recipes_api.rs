use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_test::TestServer;
use clap::Parser;
use nutrifilter_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use test_context::{AsyncTestContext, test_context};

/// Stand-in for the zero-shot inference endpoint. Decisions are keyed on
/// words in the recipe summary so each fixture has a predictable verdict.
async fn fake_zero_shot(
    State(calls): State<Arc<AtomicUsize>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    calls.fetch_add(1, Ordering::SeqCst);

    let text = body["inputs"].as_str().unwrap_or_default().to_string();
    let labels: Vec<String> = body["parameters"]["candidate_labels"]
        .as_array()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| label.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    if text.contains("Kaputt") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
    }

    let (top, score) = if labels.iter().any(|label| label == "vegetarian") {
        if text.contains("Speck") {
            ("non-vegetarian".to_string(), 0.9)
        } else {
            ("vegetarian".to_string(), 0.85)
        }
    } else if let Some(condition) = labels
        .first()
        .and_then(|label| label.strip_prefix("suitable for "))
    {
        if condition.contains("diabetes") && text.contains("Zucker") {
            (format!("not suitable for {}", condition), 0.8)
        } else if text.contains("Linsen") {
            (format!("suitable for {}", condition), 0.9)
        } else {
            (format!("suitable for {}", condition), 0.7)
        }
    } else {
        (labels.first().cloned().unwrap_or_default(), 0.5)
    };

    let other: Vec<&String> = labels.iter().filter(|label| **label != top).collect();
    let mut ranked = vec![json!(top)];
    ranked.extend(other.iter().map(|label| json!(label)));
    let mut scores = vec![json!(score)];
    scores.extend(other.iter().map(|_| json!(1.0 - score)));

    Json(json!({ "sequence": text, "labels": ranked, "scores": scores })).into_response()
}

async fn spawn_fake_classifier(calls: Arc<AtomicUsize>) -> SocketAddr {
    let app = Router::new()
        .route("/models/{*model}", post(fake_zero_shot))
        .with_state(calls);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn recipe(title: &str, summary: &str) -> Value {
    json!({
        "title": title,
        "ingredients": ["Zutat"],
        "instructions": [{"@type": "HowToStep", "text": "Kochen."}],
        "nutrition": {"calories": "400 kcal"},
        "image_url": null,
        "source_link": format!("https://rezepte.example/{}", title.to_lowercase()),
        "duration": "PT30M",
        "summary_text": summary
    })
}

fn catalog() -> Value {
    json!([
        recipe("Kuchen", "Ingredients: Mehl, Zucker. Nutrition: 500 kcal."),
        recipe("Linseneintopf", "Ingredients: Linsen, Karotten. Nutrition: 300 kcal."),
        recipe("Speckknödel", "Ingredients: Speck, Brot. Nutrition: 600 kcal."),
        recipe(
            "Die gewünschte Seite ist leider nicht vorhanden",
            "Ingredients: Linsen. Nutrition: 100 kcal."
        ),
        {
            "title": "Ohne Zusammenfassung",
            "ingredients": ["Reis"],
            "instructions": "Kochen.",
            "nutrition": {"calories": "200 kcal"},
            "source_link": "https://rezepte.example/ohne"
        }
    ])
}

struct RecipeApiContext {
    server: TestServer,
    oracle_calls: Arc<AtomicUsize>,
    _catalog: NamedTempFile,
}

impl RecipeApiContext {
    async fn with_catalog(catalog: Value, extra_args: &[&str]) -> Self {
        let oracle_calls = Arc::new(AtomicUsize::new(0));
        let addr = spawn_fake_classifier(oracle_calls.clone()).await;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(catalog.to_string().as_bytes()).unwrap();

        let catalog_path = file.path().display().to_string();
        let classifier_url = format!("http://{}", addr);
        let mut argv = vec![
            "nutrifilter-api",
            "--catalog-path",
            catalog_path.as_str(),
            "--classifier-url",
            classifier_url.as_str(),
        ];
        argv.extend_from_slice(extra_args);

        let args = Arc::new(Args::parse_from(argv));
        let app_state = state(args).await.unwrap();
        let server = TestServer::new(router(app_state).unwrap()).unwrap();

        // The startup probe is not part of any request.
        oracle_calls.store(0, Ordering::SeqCst);

        Self {
            server,
            oracle_calls,
            _catalog: file,
        }
    }

    fn oracle_calls(&self) -> usize {
        self.oracle_calls.load(Ordering::SeqCst)
    }
}

impl AsyncTestContext for RecipeApiContext {
    async fn setup() -> Self {
        Self::with_catalog(catalog(), &[]).await
    }
}

fn titles(body: &[Value]) -> Vec<&str> {
    body.iter()
        .map(|recipe| recipe["title"].as_str().unwrap_or_default())
        .collect()
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_single_condition_ranks_by_score(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .await;

    response.assert_status_ok();
    let body = response.json::<Vec<Value>>();
    assert_eq!(titles(&body), vec!["Linseneintopf", "Kuchen", "Speckknödel"]);
    assert_eq!(body[0]["classification_label"], "suitable");
    assert_eq!(body[0]["classification_score"], 0.9);
    assert_eq!(body[1]["classification_score"], 0.7);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_conditions_are_a_conjunction(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_raw_query_param("condition=gout&condition=diabetes")
        .await;

    response.assert_status_ok();
    let body = response.json::<Vec<Value>>();
    assert_eq!(titles(&body), vec!["Linseneintopf", "Speckknödel"]);
    assert_eq!(body[0]["classification_score"], 0.9);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_no_conditions_returns_empty_list(ctx: &mut RecipeApiContext) {
    let response = ctx.server.get("/recipes").await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
    assert_eq!(ctx.oracle_calls(), 0);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_vegetarian_diet_excludes_meat(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .add_query_param("diet", "vegetarian")
        .await;

    response.assert_status_ok();
    let body = response.json::<Vec<Value>>();
    assert_eq!(titles(&body), vec!["Linseneintopf", "Kuchen"]);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_non_vegetarian_diet_keeps_only_meat(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .add_query_param("diet", "non-vegetarian")
        .await;

    response.assert_status_ok();
    assert_eq!(titles(&response.json::<Vec<Value>>()), vec!["Speckknödel"]);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_min_score_override(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .add_query_param("min_score", "0.8")
        .await;

    response.assert_status_ok();
    assert_eq!(titles(&response.json::<Vec<Value>>()), vec!["Linseneintopf"]);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_repeated_request_hits_cache(ctx: &mut RecipeApiContext) {
    let first = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .await;
    let calls_after_first = ctx.oracle_calls();

    let second = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .await;

    assert_eq!(calls_after_first, 3);
    assert_eq!(ctx.oracle_calls(), calls_after_first);
    assert_eq!(
        first.json::<Vec<Value>>(),
        second.json::<Vec<Value>>()
    );
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_unknown_diet_is_rejected(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .add_query_param("diet", "pescatarian")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["status"], 400);
    assert_eq!(body["code"], "E_BAD_REQUEST");
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_out_of_range_min_score_is_rejected(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .add_query_param("min_score", "1.5")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.oracle_calls(), 0);
}

#[tokio::test]
async fn test_classifier_failure_is_bad_gateway() {
    let mut catalog = catalog();
    catalog
        .as_array_mut()
        .unwrap()
        .push(recipe("Kaputt", "Ingredients: Kaputt. Nutrition: 1 kcal."));
    let ctx = RecipeApiContext::with_catalog(catalog, &[]).await;

    let response = ctx
        .server
        .get("/recipes")
        .add_query_param("condition", "gout")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "E_CLASSIFIER_UNAVAILABLE");
}

#[tokio::test]
async fn test_combined_mode_asks_once_per_recipe() {
    let ctx = RecipeApiContext::with_catalog(catalog(), &["--evaluation-mode", "combined"]).await;

    let response = ctx
        .server
        .get("/recipes")
        .add_raw_query_param("condition=gout&condition=celiac%20disease")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 3);
    assert_eq!(ctx.oracle_calls(), 3);
}

#[tokio::test]
async fn test_startup_fails_without_catalog() {
    let calls = Arc::new(AtomicUsize::new(0));
    let addr = spawn_fake_classifier(calls).await;
    let classifier_url = format!("http://{}", addr);

    let args = Arc::new(Args::parse_from([
        "nutrifilter-api",
        "--catalog-path",
        "/nonexistent/recipes_with_summary.json",
        "--classifier-url",
        classifier_url.as_str(),
    ]));

    assert!(state(args).await.is_err());
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_health_endpoints(ctx: &mut RecipeApiContext) {
    ctx.server.get("/health/live").await.assert_status_ok();

    let ready = ctx.server.get("/health/ready").await;
    ready.assert_status_ok();
    let body = ready.json::<Value>();
    assert_eq!(body["recipes"], 5);
    assert_eq!(body["servable_recipes"], 3);
    assert_eq!(body["evaluation_mode"], "per-condition");
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_openapi_document_lists_recipes(ctx: &mut RecipeApiContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["paths"]["/recipes"].is_object());
    assert!(body["paths"]["/health/ready"].is_object());
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_unknown_route_is_json_not_found(ctx: &mut RecipeApiContext) {
    let response = ctx.server.get("/nope").expect_failure().await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "E_NOT_FOUND");
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_nan_min_score_is_rejected(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_raw_query_param("condition=gout&min_score=NaN")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "E_BAD_REQUEST");
    assert_eq!(ctx.oracle_calls(), 0);
}

#[test_context(RecipeApiContext)]
#[tokio::test]
async fn test_condition_spellings_can_be_mixed(ctx: &mut RecipeApiContext) {
    let response = ctx
        .server
        .get("/recipes")
        .add_raw_query_param("condition=gout&conditions=diabetes")
        .await;

    response.assert_status_ok();
    assert_eq!(
        titles(&response.json::<Vec<Value>>()),
        vec!["Linseneintopf", "Speckknödel"]
    );
}
