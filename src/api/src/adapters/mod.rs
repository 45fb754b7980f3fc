pub mod resend_email_client;
