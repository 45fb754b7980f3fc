use crate::helpers::spawn_app;
use contact_form::{ContactForm, Field, FormController, FormStatus, HttpContactSubmitter, SubmitOutcome};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

fn controller_for(address: &str) -> FormController<HttpContactSubmitter> {
    let controller = FormController::new(HttpContactSubmitter::new(address));
    controller.update_field(Field::Name, "Jane Doe");
    controller.update_field(Field::Company, "Acme");
    controller.update_field(Field::Message, "Hello");
    controller
}

#[tokio::test]
async fn the_form_controller_relays_a_submission_end_to_end() {
    let app = spawn_app().await;
    app.accept_emails_with_id("abc123").await;
    let controller = controller_for(&app.address);
    controller.update_field(Field::Email, "jane@co.com");

    let outcome = controller.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Completed(FormStatus::Succeeded(_))
    ));
    assert_eq!(controller.form(), ContactForm::default());
    assert_eq!(app.sent_email().await["reply_to"], "jane@co.com");
}

#[tokio::test]
async fn the_form_controller_shows_the_reason_given_by_the_endpoint() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let controller = controller_for(&app.address);
    controller.update_field(Field::Email, "not-an-email");

    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Completed(FormStatus::Failed("Invalid email format".into()))
    );
    assert_eq!(controller.form().email, "not-an-email");
}
