//! Notes REST API - JSON list/create/delete over the note service.

use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use notes_types::{CreateNoteRequest, CreateNoteResponse, ErrorResponse, MessageResponse};

use crate::notes::validation::MAX_BODY_BYTES;
use crate::notes::NoteError;
use crate::AppState;

/// Map a note failure to its status code and `{error}` body
pub fn error_response(err: &NoteError) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(ErrorResponse::new(err.public_message()))
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new(format!("Invalid request body: {}", err));
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// GET /api/notes
async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    match data.notes.list_notes().await {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => error_response(&e),
    }
}

/// POST /api/notes
async fn create_note(
    data: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    let body = body.into_inner();

    match data
        .notes
        .create_note(body.text.as_deref(), body.color.as_deref())
        .await
    {
        Ok(note) => HttpResponse::Created().json(CreateNoteResponse {
            message: "Note created successfully".to_string(),
            note,
        }),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/notes/{id}
async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match data.notes.delete_note(Some(&id)).await {
        Ok(_) => HttpResponse::Ok().json(MessageResponse {
            message: "Note deleted successfully".to_string(),
        }),
        Err(e) => error_response(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .app_data(
                web::JsonConfig::default()
                    .limit(MAX_BODY_BYTES)
                    .error_handler(json_error_handler),
            )
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use notes_types::Note;

    #[actix_web::test]
    async fn test_note_lifecycle_scenario() {
        let (_dir, state) = crate::test_support::app_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        // Create
        let req = test::TestRequest::post()
            .uri("/api/notes")
            .set_json(CreateNoteRequest::new("Buy milk", "#ffcc00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: CreateNoteResponse = test::read_body_json(resp).await;
        assert_eq!(created.note.text, "Buy milk");
        assert_eq!(created.note.color, "#ffcc00");

        // List contains it
        let req = test::TestRequest::get().uri("/api/notes").to_request();
        let notes: Vec<Note> = test::call_and_read_body_json(&app, req).await;
        assert!(notes.contains(&created.note));

        // Delete
        let uri = format!("/api/notes/{}", created.note.id);
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert!(!body.message.is_empty());

        // Gone from the list
        let req = test::TestRequest::get().uri("/api/notes").to_request();
        let notes: Vec<Note> = test::call_and_read_body_json(&app, req).await;
        assert!(notes.iter().all(|n| n.id != created.note.id));

        // Second delete is a 404
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Note not found");
    }

    #[actix_web::test]
    async fn test_create_rejects_blank_text() {
        let (_dir, state) = crate::test_support::app_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/notes")
            .set_json(CreateNoteRequest::new("   ", "#ffcc00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Note text is required");

        let req = test::TestRequest::get().uri("/api/notes").to_request();
        let notes: Vec<Note> = test::call_and_read_body_json(&app, req).await;
        assert!(notes.is_empty());
    }

    #[actix_web::test]
    async fn test_create_rejects_missing_color() {
        let (_dir, state) = crate::test_support::app_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/notes")
            .set_json(serde_json::json!({ "text": "hello" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Note color is required");
    }

    #[actix_web::test]
    async fn test_create_rejects_malformed_json() {
        let (_dir, state) = crate::test_support::app_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/notes")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Invalid request body"));
    }

    #[actix_web::test]
    async fn test_delete_rejects_malformed_id() {
        let (_dir, state) = crate::test_support::app_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::delete()
            .uri("/api/notes/not-a-real-id")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("Invalid note ID"));
    }

    #[actix_web::test]
    async fn test_list_is_empty_array_initially() {
        let (_dir, state) = crate::test_support::app_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/notes").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }
}
