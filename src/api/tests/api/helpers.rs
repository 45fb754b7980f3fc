use design_labs::configuration::get_configuration;
use design_labs::startup::Application;
use once_cell::sync::Lazy;
use telemetry::{get_subscriber, init_subscriber, init_tracer};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let mut configuration = get_configuration().expect("Failed to read configuration");
    let default_filter = "info".to_string();
    let subscriber_name = "test".to_string();
    configuration.telemetry.otlp_endpoint = String::new();
    configuration.telemetry.dataset_name = format!("test-{}", configuration.telemetry.dataset_name);

    let trace_provider =
        init_tracer(&configuration.telemetry).expect("Failed to build the test tracer");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter,
            std::io::stdout,
            &configuration.telemetry,
            &trace_provider,
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter,
            std::io::sink,
            &configuration.telemetry,
            &trace_provider,
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub recipient: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw_contact(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/contact", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Make the stand-in provider accept every message with the given id.
    pub async fn accept_emails_with_id(&self, id: &str) {
        Mock::given(path("/emails"))
            .and(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id })),
            )
            .mount(&self.email_server)
            .await;
    }

    /// The JSON body of the single request the provider received.
    pub async fn sent_email(&self) -> serde_json::Value {
        let requests = self.email_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        serde_json::from_slice(&requests[0].body).unwrap()
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    // Launch a mock server to stand in for the email provider's API
    let email_server = MockServer::start().await;

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.application_port = 0;
        // Use the mock server as email API
        c.email_settings.base_url = email_server.uri();
        c.email_settings.timeout_milliseconds = 500;
        c
    };
    let recipient = configuration.email_settings.recipient.clone();

    // Launch the application as a background task
    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        recipient,
        api_client: reqwest::Client::new(),
    }
}

pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@co.com",
        "company": "Acme",
        "message": "Hello"
    })
}
