mod form_controller;
mod health_check;
mod helpers;
