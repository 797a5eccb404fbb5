use axum::body::to_bytes;
use axum::Router;

use todo_web::application::todo_service::TodoServiceImpl;
use todo_web::domain::repository::TodoRepository;
use todo_web::http::flash::FlashStore;
use todo_web::http::routing::{self, todo};
use todo_web::infrastructure::sqlite_repo::SqliteTodoRepository;

async fn app() -> Router {
    // use in-memory sqlite for tests
    let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    let service = TodoServiceImpl::new(repo);
    routing::app(todo::router(todo::AppState { service, flash: FlashStore::default() }))
}

#[tokio::test]
async fn acceptance_create_finish_delete_cycle() {
    let app = app().await;

    let res = get(&app, "/health").await;
    assert_eq!(res.status(), 200);

    let res = get(&app, "/").await;
    assert_eq!(res.status(), 302);
    assert_eq!(res.headers().get("location").unwrap(), "/todo/list");

    // empty list, no pending messages
    let body = body_string(get(&app, "/todo/list").await).await;
    assert!(!body.contains("resultMessages"), "{body}");

    // create
    let res = post_form(&app, "/todo/create", "todoTitle=one").await;
    assert_eq!(res.status(), 302);
    let body = body_string(get(&app, "/todo/list").await).await;
    assert!(body.contains("Created successfully!"), "{body}");
    let id = extract_todo_id(&body);

    // finish
    let res = post_form(&app, "/todo/finish", &format!("todoId={id}&todoTitle=one")).await;
    assert_eq!(res.status(), 302);
    assert_eq!(res.headers().get("location").unwrap(), "/todo/list");
    let body = body_string(get(&app, "/todo/list").await).await;
    assert!(body.contains("Finished successfully!"), "{body}");
    assert!(body.contains("<s>one</s>"), "{body}");

    // finishing again violates the business rule; no redirect this time
    let res = post_form(&app, "/todo/finish", &format!("todoId={id}&todoTitle=one")).await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(
        body.contains(&format!("[E002]The requested Todo is already finished. (id={id})")),
        "{body}"
    );

    // delete
    let res = post_form(&app, "/todo/delete", &format!("todoId={id}&todoTitle=one")).await;
    assert_eq!(res.status(), 302);
    let body = body_string(get(&app, "/todo/list").await).await;
    assert!(body.contains("Deleted successfully!"), "{body}");
    assert!(!body.contains("<s>one</s>"), "{body}");

    // the id is gone now
    let res = post_form(&app, "/todo/finish", &format!("todoId={id}&todoTitle=one")).await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(
        body.contains(&format!("[E004]The requested Todo is not found. (id={id})")),
        "{body}"
    );
}

#[tokio::test]
async fn finish_unknown_id_shows_not_found_message() {
    let app = app().await;

    let res = post_form(
        &app,
        "/todo/finish",
        "todoId=cceae402-c5b1-440f-bae2-7bee19dc17fb&todoTitle=one",
    )
    .await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(
        body.contains(
            "<li>[E004]The requested Todo is not found. (id=cceae402-c5b1-440f-bae2-7bee19dc17fb)</li>"
        ),
        "{body}"
    );
}

#[tokio::test]
async fn finish_malformed_id_shows_not_found_message() {
    let app = app().await;

    let res = post_form(&app, "/todo/finish", "todoId=not-a-uuid&todoTitle=one").await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(
        body.contains("[E004]The requested Todo is not found. (id=not-a-uuid)"),
        "{body}"
    );
}

#[tokio::test]
async fn create_is_rejected_beyond_five_unfinished() {
    let app = app().await;

    for i in 0..5 {
        let res = post_form(&app, "/todo/create", &format!("todoTitle=todo-{i}")).await;
        assert_eq!(res.status(), 302);
    }

    let res = post_form(&app, "/todo/create", "todoTitle=todo-5").await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(
        body.contains("[E001]The count of un-finished Todo must not be over 5."),
        "{body}"
    );
}

#[tokio::test]
async fn create_validates_title_length() {
    let app = app().await;

    let res = post_form(&app, "/todo/create", "todoTitle=").await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(body.contains("between 1 and 30 characters"), "{body}");

    let long = "x".repeat(31);
    let res = post_form(&app, "/todo/create", &format!("todoTitle={long}")).await;
    assert_eq!(res.status(), 200);
    let body = body_string(res).await;
    assert!(body.contains("between 1 and 30 characters"), "{body}");

    // nothing was stored
    let body = body_string(get(&app, "/todo/list").await).await;
    assert!(!body.contains("todoId"), "{body}");
}

fn extract_todo_id(body: &str) -> String {
    let marker = "name=\"todoId\" value=\"";
    let start = body.find(marker).expect("list page should carry a todoId") + marker.len();
    body[start..start + 36].to_string()
}

async fn get(app: &Router, path: &str) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let req = Request::builder().method("GET").uri(path).body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn post_form(app: &Router, path: &str, body: &str) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn body_string(res: hyper::Response<axum::body::Body>) -> String {
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
