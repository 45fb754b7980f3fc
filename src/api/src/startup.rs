use crate::adapters::resend_email_client::ResendEmailClient;
use crate::configuration::{EmailClientSettings, Settings};
use crate::domain::EmailClient;
use crate::routes::{health_check, submit_contact_form};
use actix_web::dev::{Server, Service};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::Data;
use actix_web::{web, App, HttpMessage, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use telemetry::CustomLevelRootSpanBuilder;
use tracing_actix_web::{RequestId, TracingLogger};

/// Address that receives contact form notifications.
pub struct ContactInbox(pub String);

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host_name, configuration.application.application_port
        ))?;

        let port = listener.local_addr()?.port();
        let server = run(listener, configuration.email_settings)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_settings: EmailClientSettings,
) -> Result<Server, anyhow::Error> {
    let email_adapter = ResendEmailClient::new(
        email_settings.base_url.clone(),
        email_settings.sender.clone(),
        email_settings.authorization_token.clone(),
        email_settings.timeout(),
    )?;

    let email_client_arc: Arc<dyn EmailClient> = Arc::new(email_adapter);
    let email_client_data: Data<dyn EmailClient> = Data::from(email_client_arc);
    let inbox = Data::new(ContactInbox(email_settings.recipient));

    let server = HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                let request_id = req.extensions().get::<RequestId>().copied();
                let res = srv.call(req);
                async move {
                    let mut res = res.await?;
                    if let Some(request_id) = request_id {
                        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                            res.headers_mut()
                                .insert(HeaderName::from_static("x-request-id"), value);
                        }
                    }
                    Ok(res)
                }
            })
            .wrap(TracingLogger::<CustomLevelRootSpanBuilder>::new())
            .route("/health_check", web::get().to(health_check))
            .route("/api/contact", web::post().to(submit_contact_form))
            .app_data(email_client_data.clone())
            .app_data(inbox.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
