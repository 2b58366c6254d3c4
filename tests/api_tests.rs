//! End-to-end flows through the router: login, settings and movie CRUD.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use watchlist::api::AppState;
use watchlist::config::{Config, SecurityConfig};

struct TestApp {
    state: Arc<AppState>,
    router: Router,
    cookie: Option<String>,
    _db: TempDatabase,
}

/// A uuid-named SQLite file in the temp dir, removed on drop
struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}-{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm", "-journal"] {
            let mut sidecar = self.path.clone().into_os_string();
            sidecar.push(suffix);
            let _ = std::fs::remove_file(sidecar);
        }
    }
}

async fn spawn_app() -> TestApp {
    let db = TempDatabase::new("watchlist-api-test");

    let mut config = Config::default();
    config.general.database_path = db.url();
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };

    let state = watchlist::api::create_app_state_from_config(config.clone())
        .await
        .expect("failed to create app state");

    state
        .store()
        .upsert_owner_credentials("test", "123", "Test", &config.security)
        .await
        .expect("failed to create user");
    state
        .store()
        .add_movie("Test movie title", "1234")
        .await
        .expect("failed to add movie");

    let router = watchlist::api::router(state.clone());
    TestApp {
        state,
        router,
        cookie: None,
        _db: db,
    }
}

impl TestApp {
    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            self.cookie = if pair.ends_with('=') { None } else { Some(pair) };
        }

        response
    }

    async fn get_raw(&mut self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn post_raw(&mut self, uri: &str, form: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Follow 302s the way a browser would and return the final page
    async fn follow(&mut self, mut response: Response) -> (StatusCode, String) {
        while response.status() == StatusCode::FOUND {
            let location = response
                .headers()
                .get(header::LOCATION)
                .unwrap()
                .to_str()
                .unwrap()
                .to_string();
            response = self.get_raw(&location).await;
        }

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get(&mut self, uri: &str) -> (StatusCode, String) {
        let response = self.get_raw(uri).await;
        self.follow(response).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> (StatusCode, String) {
        let response = self.post_raw(uri, form).await;
        self.follow(response).await
    }

    async fn login(&mut self) {
        let (_, body) = self.post("/login", "username=test&password=123").await;
        assert!(body.contains("Login success."));
    }
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_404_page() {
    let mut app = spawn_app().await;

    let (status, body) = app.get("/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found - 404"));
    assert!(body.contains("Go Back"));
}

#[tokio::test]
async fn test_index_page() {
    let mut app = spawn_app().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Test's Watchlist"));
    assert!(body.contains("Test movie title"));

    // anonymous visitors see no edit controls
    assert!(!body.contains("Settings"));
    assert!(!body.contains("Logout"));
    assert!(!body.contains("Edit"));
    assert!(!body.contains("Delete"));
    assert!(!body.contains(r#"<form method="post">"#));
}

#[tokio::test]
async fn test_login() {
    let mut app = spawn_app().await;

    let (_, body) = app.get("/login").await;
    assert!(body.contains("username"));
    assert!(body.contains("password"));

    let (_, body) = app.post("/login", "username=test&password=123").await;
    assert!(body.contains("Login success."));
    assert!(body.contains("Settings"));
    assert!(body.contains("Logout"));
    assert!(body.contains("Edit"));
    assert!(body.contains("Delete"));
    assert!(body.contains(r#"<form method="post">"#));
}

#[tokio::test]
async fn test_login_rejections() {
    let mut app = spawn_app().await;

    let (_, body) = app.post("/login", "username=&password=123").await;
    assert!(!body.contains("Login success."));
    assert!(body.contains("Invalid input."));

    let (_, body) = app.post("/login", "username=naive&password=").await;
    assert!(!body.contains("Login success."));
    assert!(body.contains("Invalid input."));

    let (_, body) = app.post("/login", "username=wrong&password=123").await;
    assert!(!body.contains("Login success."));
    assert!(body.contains("Invalid username or password."));

    let (_, body) = app.post("/login", "username=test&password=wrong").await;
    assert!(!body.contains("Login success."));
    assert!(body.contains("Invalid username or password."));

    // no identity was stored by any of the attempts
    let (_, body) = app.get("/").await;
    assert!(!body.contains("Logout"));
}

#[tokio::test]
async fn test_login_failure_redirects_to_login() {
    let mut app = spawn_app().await;

    let response = app.post_raw("/login", "username=test&password=nope").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let mut app = spawn_app().await;
    app.login().await;

    let (_, body) = app.get("/").await;
    assert!(!body.contains("Login success."));
}

#[tokio::test]
async fn test_settings() {
    let mut app = spawn_app().await;
    app.login().await;

    let (_, body) = app.get("/settings").await;
    assert!(body.contains("User settings"));
    assert!(body.contains("Name"));

    let (_, body) = app.post("/settings", "name=naive").await;
    assert!(body.contains("Settings updated successfully."));
    assert!(body.contains("naive"));

    let (_, body) = app.post("/settings", "name=").await;
    assert!(!body.contains("Settings updated successfully."));
    assert!(body.contains("Invalid input."));

    let too_long = "x".repeat(21);
    let (_, body) = app.post("/settings", &format!("name={too_long}")).await;
    assert!(body.contains("Invalid input."));

    let owner = app.state.store().get_owner().await.unwrap().unwrap();
    assert_eq!(owner.name, "naive");
}

#[tokio::test]
async fn test_logout() {
    let mut app = spawn_app().await;
    app.login().await;

    let (_, body) = app.get("/logout").await;
    assert!(body.contains("Goodbye."));
    assert!(!body.contains("Settings"));
    assert!(!body.contains("Logout"));
    assert!(!body.contains("Edit"));
    assert!(!body.contains("Delete"));
    assert!(!body.contains(r#"<form method="post">"#));
}

#[tokio::test]
async fn test_create_item() {
    let mut app = spawn_app().await;
    app.login().await;

    let (_, body) = app.post("/", "title=Add+test+movie+title&year=5678").await;
    assert!(body.contains("Item created successfully."));
    assert!(body.contains("Add test movie title"));

    let (_, body) = app.post("/", "title=&year=5678").await;
    assert!(body.contains("Invalid input."));
    assert!(!body.contains("Item created successfully."));

    let (_, body) = app.post("/", "title=Add+test+movie+title&year=").await;
    assert!(body.contains("Invalid input."));
    assert!(!body.contains("Item created successfully."));

    let (_, body) = app.post("/", "title=Only+a+title").await;
    assert!(body.contains("Invalid input."));

    assert_eq!(app.state.store().count_movies().await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_rejects_long_title_and_bad_year() {
    let mut app = spawn_app().await;
    app.login().await;

    let title = "t".repeat(61);
    let (_, body) = app.post("/", &format!("title={title}&year=2000")).await;
    assert!(body.contains("Invalid input."));

    let (_, body) = app.post("/", "title=Short&year=20000").await;
    assert!(body.contains("Invalid input."));

    assert_eq!(app.state.store().count_movies().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_item() {
    let mut app = spawn_app().await;
    app.login().await;

    let (_, body) = app.get("/movie/edit/1").await;
    assert!(body.contains("Edit item"));
    assert!(body.contains("Test movie title"));
    assert!(body.contains("1234"));

    let (_, body) = app
        .post("/movie/edit/1", "title=Update+test+movie+title&year=1234")
        .await;
    assert!(body.contains("Item updated successfully."));
    assert!(body.contains("Update test movie title"));

    let (_, body) = app.post("/movie/edit/1", "title=&year=1234").await;
    assert!(body.contains("Invalid input."));
    assert!(!body.contains("Item updated successfully."));

    let (_, body) = app
        .post("/movie/edit/1", "title=Update+test+movie+title+again&year=")
        .await;
    assert!(body.contains("Invalid input."));
    assert!(!body.contains("Item updated successfully."));
    assert!(!body.contains("Update test movie title again"));

    let movie = app.state.store().get_movie(1).await.unwrap().unwrap();
    assert_eq!(movie.title, "Update test movie title");
    assert_eq!(movie.year, "1234");
}

#[tokio::test]
async fn test_invalid_edit_redirects_back_to_form() {
    let mut app = spawn_app().await;
    app.login().await;

    let response = app.post_raw("/movie/edit/1", "title=&year=1999").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/movie/edit/1");
}

#[tokio::test]
async fn test_delete_item() {
    let mut app = spawn_app().await;
    app.login().await;

    let (_, body) = app.post("/movie/delete/1", "").await;
    assert!(body.contains("Item deleted successfully."));
    assert!(!body.contains("Test movie title"));

    assert_eq!(app.state.store().count_movies().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_movie_is_not_found() {
    let mut app = spawn_app().await;
    app.login().await;

    let (status, body) = app.get("/movie/edit/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found - 404"));

    let (status, _) = app.post("/movie/delete/999", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/movie/edit/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_mutations_are_rejected() {
    let mut app = spawn_app().await;

    let response = app.post_raw("/", "title=Sneaky&year=2000").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let response = app
        .post_raw("/movie/edit/1", "title=Sneaky&year=2000")
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");

    let response = app.post_raw("/movie/delete/1", "").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");

    let (_, body) = app.get("/settings").await;
    assert!(body.contains("Please log in to access this page."));

    let movies = app.state.store().list_movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Test movie title");
}

#[tokio::test]
async fn test_malformed_form_is_bad_request() {
    let mut app = spawn_app().await;
    app.login().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("title=x"))
        .unwrap();
    let response = app.send(request).await;
    let (status, body) = app.follow(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Bad Request - 400"));
}
