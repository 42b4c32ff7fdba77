use std::convert::TryFrom;

use actix_web::{error, web, HttpResponse, Result};
use iengine::{parse::problem::split_sentences, MethodKind, Settings};
use log::debug;

use crate::AskForm;

fn method_from_path(name: &str) -> Result<MethodKind> {
    MethodKind::try_from(name).map_err(error::ErrorNotFound)
}

pub(crate) async fn method(path: web::Path<String>) -> Result<HttpResponse> {
    let method = method_from_path(&path)?;

    Ok(HttpResponse::Ok().body(format!(
        "Method {} loaded: {}.
Interact via the /ask endpoint",
        method,
        method.description()
    )))
}

pub(crate) async fn ask(path: web::Path<String>, form: web::Form<AskForm>) -> Result<HttpResponse> {
    let method = method_from_path(&path)?;

    let AskForm { kb, query, params } = form.0;
    let settings: Settings = match params {
        Some(p) => serde_json::from_str(&p)?,
        None => Settings::default(),
    };

    let kb = split_sentences(&kb);
    debug!("{} request with {} sentences", method, kb.len());

    let answer = iengine::ask(method, &kb, &query, &settings).map_err(error::ErrorBadRequest)?;

    Ok(HttpResponse::Ok().json(answer))
}
