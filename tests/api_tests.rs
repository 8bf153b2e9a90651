use crm_shell::{AppConfig, AppState, auth::SESSION_COOKIE, create_router};
use reqwest::{StatusCode, header, redirect::Policy};
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

async fn spawn_app() -> TestApp {
    let router = create_router(AppState::new(AppConfig::default()));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Redirects are asserted on, not followed.
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();

    TestApp { address, client }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_login_logout_lifecycle() {
    let app = spawn_app().await;

    // Signed out: the landing page is the login form.
    let landing = app
        .client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(landing.status(), StatusCode::OK);
    assert!(landing.text().await.unwrap().contains(r#"action="/session""#));

    // Sign in.
    let login = app
        .client
        .post(format!("{}/session", app.address))
        .form(&[("email", "admin@crm.local"), ("password", "admin")])
        .send()
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    let session_cookie = login.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert!(session_cookie.starts_with(SESSION_COOKIE));

    // Signed in: same path, private page inside the shell.
    let home = app
        .client
        .get(format!("{}/", app.address))
        .header(header::COOKIE, &session_cookie)
        .send()
        .await
        .unwrap();
    let html = home.text().await.unwrap();
    assert!(html.contains("sidebar"));
    assert!(html.contains(r#"href="/customers""#));

    let customer = app
        .client
        .get(format!("{}/customers/c-17", app.address))
        .header(header::COOKIE, &session_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(customer.status(), StatusCode::OK);
    assert!(customer.text().await.unwrap().contains("c-17"));

    // Sign out.
    let logout = app
        .client
        .post(format!("{}/session/logout", app.address))
        .header(header::COOKIE, &session_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    assert_eq!(logout.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_failed_login_shows_error_on_form() {
    let app = spawn_app().await;

    let login = app
        .client
        .post(format!("{}/session", app.address))
        .form(&[("email", "admin@crm.local"), ("password", "nope")])
        .send()
        .await
        .unwrap();
    let location = login.headers()[header::LOCATION].to_str().unwrap().to_string();

    let form = app
        .client
        .get(format!("{}{}", app.address, location))
        .send()
        .await
        .unwrap();

    assert!(form.text().await.unwrap().contains(r#"role="alert""#));
}
