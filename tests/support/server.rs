use std::sync::Arc;

use registrar::adapter::inbound::http::antiforgery::{COOKIE_NAME, FIELD_NAME};
use registrar::adapter::inbound::http::{router, serve};
use registrar::application::student::StudentRecords;
use registrar::port::StudentStore;
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A router served on an ephemeral local port for the lifetime of the value.
pub struct TestServer {
    base: String,
    client: Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start(store: Arc<dyn StudentStore>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();
        let app = router(StudentRecords::new(store));

        tokio::spawn(async move {
            let _ = serve(listener, app, async move {
                let _ = rx.await;
            })
            .await;
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("client");

        Self {
            base: format!("http://{addr}"),
            client,
            shutdown: Some(tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.expect("GET")
    }

    /// Fetch a form page and return the anti-forgery token it issued.
    pub async fn token_from(&self, path: &str) -> String {
        let response = self.get(path).await;
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| v.strip_prefix(&format!("{COOKIE_NAME}=")).map(str::to_string))
            .expect("anti-forgery cookie");
        let token = cookie.split(';').next().unwrap_or_default().to_string();

        let body = response.text().await.expect("body");
        assert!(
            body.contains(&format!("name=\"{FIELD_NAME}\" value=\"{token}\"")),
            "form should embed the cookie token"
        );
        token
    }

    /// POST a form with the token in both the cookie and the body.
    pub async fn post_form(&self, path: &str, token: &str, fields: &[(&str, &str)]) -> Response {
        self.post_with_tokens(path, token, token, fields).await
    }

    /// POST a form with independent cookie and body tokens.
    pub async fn post_with_tokens(
        &self,
        path: &str,
        cookie: &str,
        field: &str,
        fields: &[(&str, &str)],
    ) -> Response {
        let mut body: Vec<(&str, &str)> = vec![(FIELD_NAME, field)];
        body.extend_from_slice(fields);
        self.client
            .post(self.url(path))
            .header(COOKIE, format!("{COOKIE_NAME}={cookie}"))
            .form(&body)
            .send()
            .await
            .expect("POST")
    }

    /// POST a form without any anti-forgery token.
    pub async fn post_form_without_token(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
