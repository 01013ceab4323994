mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use berco_backend::routes::build_router;
use common::{setup_test_db, test_state, ADMIN_PASSWORD, PRODUCT_A, VOLUNTEER_PASSWORD};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn setup_test_app() -> Router {
    let db = setup_test_db().await.unwrap();
    build_router(test_state(db), &["http://localhost:3000".to_string()])
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({"password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_login_and_session() {
    let app = setup_test_app().await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"password": VOLUNTEER_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["expires_at"].as_i64().unwrap() > chrono::Utc::now().timestamp());
    let token = body["token"].as_str().unwrap();

    let (status, body) = call(&app, Method::GET, "/login", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logged_in"], true);

    let (status, _) = call(&app, Method::GET, "/login", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, Method::GET, "/login", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_product_crud_requires_auth_for_writes() {
    let app = setup_test_app().await;
    let new_product = json!({"id": "TEST0001", "name": "Feijão Preto", "unit": "KG"});

    let (status, _) = call(
        &app,
        Method::POST,
        "/products",
        None,
        Some(new_product.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(new_product.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "TEST0001");

    let (status, _) = call(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(new_product),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({"id": "TEST0002", "name": "", "unit": "KG"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, Method::GET, "/products/TEST0001", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Feijão Preto");
    assert_eq!(body["position_x"], 0);

    let (status, body) = call(
        &app,
        Method::PUT,
        "/products/TEST0001",
        Some(&token),
        Some(json!({"name": "Feijão Vermelho", "unit": "KG", "position_x": 3, "position_y": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Feijão Vermelho");
    assert_eq!(body["position_y"], 4);

    let (status, body) = call(
        &app,
        Method::GET,
        "/search/products?name=FEIJAO%20VERMELHO",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, _) = call(&app, Method::DELETE, "/products/TEST0001", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, "/products/TEST0001", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::GET, "/products/TEST0001", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_donor_crud() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/donors",
        Some(&token),
        Some(json!({"id": "9001", "name": "Padaria São João"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        Method::PUT,
        "/donors/9001",
        Some(&token),
        Some(json!({"name": "Padaria Central"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Padaria Central");

    let (status, _) = call(
        &app,
        Method::PUT,
        "/donors/does-not-exist",
        Some(&token),
        Some(json!({"name": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, "/donors/9001", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&app, Method::DELETE, "/donors/9001", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_search_normalizes_names_and_prefers_id() {
    let app = setup_test_app().await;

    let (status, body) = call(&app, Method::GET, "/search/products?name=acucar", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&PRODUCT_A));
    assert_eq!(body["count"], ids.len());

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/search/products?id={}&name=zzzz-nothing", PRODUCT_A),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], PRODUCT_A);

    let (status, body) = call(&app, Method::GET, "/search/donors?name=NESTL%C3%89", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() >= 1);

    let (status, _) = call(&app, Method::GET, "/search/products", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, Method::GET, "/search/donors?name=", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_car_http_flow() {
    let app = setup_test_app().await;

    // Type is validated before the password
    let (status, _) = call(
        &app,
        Method::POST,
        "/cars/create",
        None,
        Some(json!({"password": "wrong", "type": "Sideways"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/cars/create",
        None,
        Some(json!({"password": "wrong", "type": "Entrada"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, created) = call(
        &app,
        Method::POST,
        "/cars/create",
        None,
        Some(json!({"password": ADMIN_PASSWORD, "type": "Entrada"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["type"], "Entrada");
    assert_eq!(created["date_export"], "0");
    assert_eq!(created["products"], json!([]));
    let id_car = created["id_car"].as_str().unwrap().to_string();

    let token = login(&app).await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/cars/create",
        None,
        Some(json!({"password": token, "type": "Saída"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "Saída");

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/cars/get?id={}", id_car),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id_car"], id_car.as_str());

    let (status, _) = call(&app, Method::GET, "/cars/get", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, Method::GET, "/cars/get?id=NOPE00", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, "/cars", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = call(&app, Method::GET, "/cars", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_map_upload_and_serve() {
    let app = setup_test_app().await;

    let (status, body) = call(&app, Method::GET, "/map", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/assets/mapa.png");

    let boundary = "berco-test-boundary";
    let image = b"\x89PNG fake map bytes";
    let mut payload = Vec::new();
    payload.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"mapa\"; filename=\"mapa.png\"\r\nContent-Type: image/png\r\n\r\n",
            b = boundary
        )
        .as_bytes(),
    );
    payload.extend_from_slice(image);
    payload.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let upload = |token: Option<String>| {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/map")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(payload.clone())).unwrap()
    };

    let response = app.clone().oneshot(upload(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let response = app.clone().oneshot(upload(Some(token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/assets/mapa.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let served = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&served[..], &image[..]);
}
