//! End-to-end requests through the router.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;

use common::{TestApp, TEST_PASSWORD};

const BODY_LIMIT: usize = 1024 * 1024;

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The `name=value` pair of a cookie set by the response.
fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(str::to_string)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn login_cookie(app: &TestApp, username: &str) -> String {
    let response = app
        .router()
        .oneshot(post_form(
            "/login",
            &format!("username={}&password={}", username, TEST_PASSWORD),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    set_cookie(&response, "kisan_session").expect("session cookie")
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.router().oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_public_pages_render() {
    let app = TestApp::new().await;

    for uri in ["/", "/login", "/register"] {
        let response = app.router().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app.router().oneshot(get("/dashboard", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fdashboard");
}

#[tokio::test]
async fn test_weather_api_is_public_json() {
    let app = TestApp::new().await;

    let response = app
        .router()
        .oneshot(get("/api/weather/Pune", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["location"], "Pune");
    assert_eq!(json["is_mock"], true);
}

#[tokio::test]
async fn test_register_login_and_browse() {
    let app = TestApp::new().await;

    let response = app
        .router()
        .oneshot(post_form(
            "/register",
            &format!(
                "username=ravi&email=ravi%40example.com&password={0}&confirm_password={0}",
                TEST_PASSWORD
            ),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response, "kisan_flash").is_some());

    let session = login_cookie(&app, "ravi").await;

    for uri in [
        "/dashboard",
        "/cart",
        "/shop",
        "/orders",
        "/forum",
        "/forum/create",
        "/profile",
        "/weather?location=Pune",
        "/diseases",
        "/crop_calendar?crop=rice",
        "/market_prices?crop=onion",
        "/government_schemes",
        "/expert_advice",
        "/soil-testing",
        "/loan_calculator",
    ] {
        let response = app
            .router()
            .oneshot(get(uri, Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }

    let response = app
        .router()
        .oneshot(get("/cart", Some(&session)))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("ravi"));
}

#[tokio::test]
async fn test_failed_login_flashes_and_retries() {
    let app = TestApp::new().await;
    app.register("ravi").await;

    let response = app
        .router()
        .oneshot(post_form(
            "/login",
            "username=ravi&password=wrong-password&next=%2Fcart",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fcart");
    assert!(set_cookie(&response, "kisan_session").is_none());
    assert!(set_cookie(&response, "kisan_flash").is_some());
}

#[tokio::test]
async fn test_login_honours_local_next_only() {
    let app = TestApp::new().await;
    app.register("ravi").await;

    let response = app
        .router()
        .oneshot(post_form(
            "/login",
            &format!("username=ravi&password={}&next=%2Fcart", TEST_PASSWORD),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/cart");

    let response = app
        .router()
        .oneshot(post_form(
            "/login",
            &format!(
                "username=ravi&password={}&next=%2F%2Fevil.example.com",
                TEST_PASSWORD
            ),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_loan_calculation_renders_emi() {
    let app = TestApp::new().await;
    app.register("ravi").await;
    let session = login_cookie(&app, "ravi").await;

    let response = app
        .router()
        .oneshot(post_form(
            "/loan_calculator",
            "loan_amount=100000&interest_rate=0&loan_tenure=1",
            Some(&session),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("₹8,333.33"));
}

#[tokio::test]
async fn test_malformed_forum_id_is_not_found() {
    let app = TestApp::new().await;
    app.register("ravi").await;
    let session = login_cookie(&app, "ravi").await;

    let response = app
        .router()
        .oneshot(get("/forum/post/not-a-uuid", Some(&session)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("does not exist"));
    assert!(body.contains("ravi"));
    assert!(body.contains("/logout"));
}

#[tokio::test]
async fn test_add_to_cart_and_checkout() {
    let app = TestApp::new().await;
    app.register("ravi").await;
    let session = login_cookie(&app, "ravi").await;
    let npk = app.product("NPK Fertilizer 10-10-10").await;

    let response = app
        .router()
        .oneshot(post_form(&format!("/add_to_cart/{}", npk.id), "", Some(&session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shop");

    let response = app
        .router()
        .oneshot(get("/cart", Some(&session)))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("₹499"));

    let response = app
        .router()
        .oneshot(post_form("/checkout", "", Some(&session)))
        .await
        .unwrap();
    assert_eq!(location(&response), "/orders");

    let response = app
        .router()
        .oneshot(post_form("/checkout", "", Some(&session)))
        .await
        .unwrap();
    assert_eq!(location(&response), "/shop");
}

#[tokio::test]
async fn test_logout_invalidates_cookie() {
    let app = TestApp::new().await;
    app.register("ravi").await;
    let session = login_cookie(&app, "ravi").await;

    let response = app
        .router()
        .oneshot(post_form("/logout", "", Some(&session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .router()
        .oneshot(get("/cart", Some(&session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fcart");
}

#[tokio::test]
async fn test_openapi_document_lists_weather() {
    let app = TestApp::new().await;

    let response = app
        .router()
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/api/weather/{location}"));
}
