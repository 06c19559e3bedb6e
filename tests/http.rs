use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use seat_picker::{app, config::Config, models::Layout, AppState};
use serde_json::Value;
use tower::ServiceExt;

fn test_app() -> Router {
    let layout = Layout::new(vec![vec![true, false, true], vec![true, true, false]]);
    app(AppState::new(Config::default(), layout))
}

fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

// "selectedChairs=[1,3]; Expires=...; Path=/" -> "selectedChairs=[1,3]"
fn cookie_pair(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the selection cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.ends_with("; Path=/"), "{set_cookie}");
    set_cookie.split(';').next().unwrap().to_string()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = test_app().oneshot(request("GET", "/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_page_renders_grid_and_counter() {
    let response = test_app().oneshot(request("GET", "/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cookie_pair(&response), "selectedChairs=[]");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<span class=\"counter\">0/4</span>"));
    assert_eq!(html.matches("class=\"row\"").count(), 2);
    assert_eq!(html.matches("chair available").count(), 4);
    assert_eq!(html.matches("chair empty").count(), 2);
    assert!(html.contains("formaction=\"/seats/3/toggle\""));
    assert!(html.contains("src=\"/static/icons/armchair.svg\""));
}

#[tokio::test]
async fn test_form_click_redirects_and_sets_cookie() {
    let response = test_app()
        .oneshot(request("POST", "/seats/1/toggle", Some("selectedChairs=[3]")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION].to_str().unwrap(), "/");
    assert_eq!(cookie_pair(&response), "selectedChairs=[3,1]");
}

#[tokio::test]
async fn test_selection_survives_reload() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(request("POST", "/api/seats/1/toggle", None))
        .await
        .unwrap();
    let cookie = cookie_pair(&first);

    let second = app
        .clone()
        .oneshot(request("POST", "/api/seats/3/toggle", Some(cookie.as_str())))
        .await
        .unwrap();
    let cookie = cookie_pair(&second);
    assert_eq!(cookie, "selectedChairs=[1,3]");

    let reload = app.oneshot(request("GET", "/api/room", Some(cookie.as_str()))).await.unwrap();
    let body = json_body(reload).await;
    assert_eq!(body["counter"], "2/4");
    assert_eq!(body["selected"], serde_json::json!([1, 3]));
    assert_eq!(body["seats"][1]["selected"], true);
    assert_eq!(body["seats"][0]["selected"], false);
}

#[tokio::test]
async fn test_toggle_twice_clears_selection() {
    let response = test_app()
        .oneshot(request("POST", "/api/seats/2/toggle", Some("selectedChairs=[2]")))
        .await
        .unwrap();
    assert_eq!(cookie_pair(&response), "selectedChairs=[]");
    let body = json_body(response).await;
    assert_eq!(body["counter"], "0/4");
}

#[tokio::test]
async fn test_unknown_seat_is_not_found() {
    let response = test_app()
        .oneshot(request("POST", "/api/seats/40/toggle", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_malformed_cookie_is_ignored() {
    let response = test_app()
        .oneshot(request("GET", "/api/room", Some("selectedChairs=oops")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cookie_pair(&response), "selectedChairs=[]");
    let body = json_body(response).await;
    assert_eq!(body["selected"], serde_json::json!([]));
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_stale_ids_are_dropped_on_reload() {
    let response = test_app()
        .oneshot(request("GET", "/api/room", Some("theme=dark; selectedChairs=[0,17]")))
        .await
        .unwrap();
    assert_eq!(cookie_pair(&response), "selectedChairs=[0]");
}
