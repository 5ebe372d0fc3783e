//! Server-rendered page and the form + redirect flow.
//!
//! `/add-note` and `/delete-note` go through the same `NoteService` calls as
//! the JSON API, so both surfaces accept and reject exactly the same input.
//! Outcomes come back to the page as flash messages.

use actix_web::http::header::ContentType;
use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use notes_types::Note;
use serde::Deserialize;

use super::flash::{redirect_with_flash, removal_cookie, FlashMessage, FLASH_COOKIE};
use crate::notes::validation::MAX_BODY_BYTES;
use crate::AppState;

pub const NOTE_ADDED: &str = "Note added successfully!";
pub const NOTE_DELETED: &str = "Note deleted successfully!";

#[derive(Debug, Deserialize)]
pub struct AddNoteForm {
    pub text: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNoteForm {
    pub id: Option<String>,
}

fn form_error_handler(err: error::UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("[PAGES] Rejected form submission: {}", err);
    let resp = redirect_with_flash(FlashMessage::error("Invalid form submission."));
    error::InternalError::from_response(err, resp).into()
}

/// GET /
async fn index(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let notes = match data.notes.list_notes().await {
        Ok(notes) => notes,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Error fetching notes");
        }
    };

    let flash = FlashMessage::from_request(&req);
    let html = render_index(&notes, &data.config.note_colors, flash.as_ref());

    let mut resp = HttpResponse::Ok().content_type(ContentType::html()).body(html);
    // Clear any flash cookie, including one that failed to decode
    if req.cookie(FLASH_COOKIE).is_some() {
        if let Err(e) = resp.add_removal_cookie(&removal_cookie()) {
            log::warn!("[PAGES] Failed to clear flash cookie: {}", e);
        }
    }
    resp
}

/// POST /add-note
async fn add_note(data: web::Data<AppState>, form: web::Form<AddNoteForm>) -> impl Responder {
    let form = form.into_inner();

    let flash = match data
        .notes
        .create_note(form.text.as_deref(), form.color.as_deref())
        .await
    {
        Ok(_) => FlashMessage::success(NOTE_ADDED),
        Err(e) => FlashMessage::error(e.public_message()),
    };

    redirect_with_flash(flash)
}

/// POST /delete-note
async fn delete_note(data: web::Data<AppState>, form: web::Form<DeleteNoteForm>) -> impl Responder {
    let form = form.into_inner();

    let flash = match data.notes.delete_note(form.id.as_deref()).await {
        Ok(_) => FlashMessage::success(NOTE_DELETED),
        Err(e) => FlashMessage::error(e.public_message()),
    };

    redirect_with_flash(flash)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(MAX_BODY_BYTES)
            .error_handler(form_error_handler),
    )
        .route("/", web::get().to(index))
        .route("/add-note", web::post().to(add_note))
        .route("/delete-note", web::post().to(delete_note));
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_index(notes: &[Note], colors: &[String], flash: Option<&FlashMessage>) -> String {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.kind.as_str(),
                escape_html(&f.message)
            )
        })
        .unwrap_or_default();

    let color_inputs: String = colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let color = escape_html(color);
            format!(
                r#"<label class="color-option" style="background-color: {color}"><input type="radio" name="color" value="{color}"{checked}></label>"#,
                checked = if i == 0 { " checked" } else { "" },
            )
        })
        .collect();

    let note_cards: String = notes
        .iter()
        .map(|note| {
            format!(
                r#"<div class="note" style="background-color: {color}"><p>{text}</p><form method="post" action="/delete-note"><input type="hidden" name="id" value="{id}"><button type="submit" class="delete-note">X</button></form></div>"#,
                color = escape_html(&note.color),
                text = escape_html(&note.text),
                id = escape_html(note.id.as_str()),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Notes</title>
</head>
<body>
{flash_html}
<form method="post" action="/add-note">
<textarea name="text" placeholder="Write a note..."></textarea>
<div class="colors">{color_inputs}</div>
<button type="submit" class="create-note">Add note</button>
</form>
<div class="notes-container">{note_cards}</div>
</body>
</html>
"#
    )
}
