use crate::lobby::Lobby;
use crate::room::Room;
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use dk_config::RoomConfiguration;
use dk_core::ID;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct StartRequest {
    #[serde(flatten)]
    pub config: RoomConfiguration,
    #[serde(default)]
    pub seed: u64,
}

pub async fn start(lobby: web::Data<Lobby>, body: web::Json<StartRequest>) -> impl Responder {
    let request = body.into_inner();
    match lobby.start(request.config, request.seed).await {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "room_id": id.to_string() })),
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

pub async fn leave(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.close(ID::<Room>::from(path.into_inner())).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "left" })),
        Err(e) => HttpResponse::NotFound().body(e.to_string()),
    }
}

#[derive(Deserialize)]
pub struct EnterQuery {
    name: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    chair: Option<dk_core::Chair>,
}

pub async fn enter(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    query: web::Query<EnterQuery>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let id: ID<Room> = ID::from(path.into_inner());
    let query = query.into_inner();
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            match lobby
                .bridge(id, query.name, query.password, query.chair, session, stream)
                .await
            {
                Ok(()) => response.map_into_left_body(),
                Err(e) => HttpResponse::NotFound().body(e.to_string()).map_into_right_body(),
            }
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}
