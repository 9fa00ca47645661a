use crate::application::CsvImportUseCase;
use crate::domain::csv::ImportSchema;
use crate::domain::error::AppError;
use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::csv::ensure_csv_file_name;
use actix_cors::Cors;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{
    dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub import_use_case: CsvImportUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    /// Largest request body accepted by the import route
    pub fn payload_limit(&self) -> usize {
        usize::try_from(self.import_use_case.config().max_file_bytes).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportTypeInfo {
    pub kind: String,
    pub label: String,
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub filename: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) | AppError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.message(),
        }))
    }
}

#[get("/import/types")]
async fn import_types() -> impl Responder {
    let types: Vec<ImportTypeInfo> = ImportSchema::ALL
        .iter()
        .map(|schema| ImportTypeInfo {
            kind: schema.kind().to_string(),
            label: schema.label().to_string(),
            template: schema.template().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(types)
}

#[get("/import/templates/{kind}")]
async fn download_template(
    data: web::Data<HttpState>,
    kind: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let schema: ImportSchema = kind
        .parse()
        .map_err(|_| AppError::NotFound(format!("No template for import type {}", kind)))?;

    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!("Template downloaded for {}", schema),
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(schema.template_file_name())],
        })
        .body(schema.template()))
}

#[post("/import/{kind}")]
async fn import_csv(
    data: web::Data<HttpState>,
    kind: web::Path<String>,
    query: web::Query<ImportQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let file_name = query
        .filename
        .clone()
        .unwrap_or_else(|| format!("{}.csv", kind));
    ensure_csv_file_name(&file_name).map_err(|e| {
        add_log(
            &data.logs,
            "ERROR",
            "Import",
            &format!("Rejected upload {}: {}", file_name, e),
        );
        e
    })?;

    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!("Importing {} as {} ({} bytes)", file_name, kind, body.len()),
    );

    let source = data.import_use_case.bytes_source(&file_name, body.to_vec());
    let outcome = data
        .import_use_case
        .process_import_kind(&source, &kind)
        .await;

    if outcome.success {
        add_log(
            &data.logs,
            "INFO",
            "Import",
            &format!("Successfully imported {} records", outcome.records_imported),
        );
    } else {
        add_log(
            &data.logs,
            "ERROR",
            "Import",
            &format!("Import failed: {}", outcome.errors.join("; ")),
        );
    }

    Ok(HttpResponse::Ok().json(outcome))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> MutexGuard<'_, Vec<LogEntry>> {
    // A panic mid-push leaves the buffer usable
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
}

/// Registers the `/api` routes with the upload size limit; shared by the
/// server and tests
pub fn configure(payload_limit: usize) -> impl Fn(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/api")
                .app_data(web::PayloadConfig::new(payload_limit))
                .service(import_types)
                .service(download_template)
                .service(import_csv)
                .service(get_logs),
        );
    }
}

pub fn start_server(state: HttpState, server: &ServerConfig) -> std::io::Result<Server> {
    let payload_limit = state.payload_limit();
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure(payload_limit))
    })
    .bind((server.host.as_str(), server.port))?
    .run();

    Ok(server)
}
