use actix_web::{middleware, web, App, HttpResponse, HttpServer, Responder};

use iengine::MethodKind;
use serde::Deserialize;

mod ask;

const DEFAULT_ADDR: &str = "127.0.0.1:7000";

#[derive(Deserialize)]
struct AskForm {
    kb: String,
    query: String,
    params: Option<String>,
}

async fn index() -> impl Responder {
    let mut body = "Inference Engine API Server

Available method endpoints:"
        .to_string();
    for m in MethodKind::ALL {
        body.push('\n');
        body.push_str(m.to_str());
    }
    HttpResponse::Ok().body(body)
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/{method}", web::get().to(ask::method))
        .route("/{method}/ask", web::post().to(ask::ask));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = std::env::var("IENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    log::info!("Listening on {}", addr);

    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")),
            )
            .configure(routes)
    })
    .bind(addr)?
    .run()
    .await
}
