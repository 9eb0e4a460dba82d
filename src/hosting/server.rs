use crate::HELLO_TIMEOUT;
use crate::gameplay::EngineError;
use crate::gameplay::TableConfig;
use crate::gameroom::ClientMessage;
use crate::gameroom::ErrorCode;
use crate::gameroom::Outbound;
use crate::gameroom::Room;
use crate::gameroom::ServerMessage;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use futures::StreamExt;
use tokio::sync::mpsc::unbounded_channel;

pub struct Server;

impl Server {
    /// Binds the arena: websocket upgrade at `/ws` plus a health probe.
    /// One table per process.
    pub async fn run(bind: (String, u16), config: TableConfig) -> Result<(), std::io::Error> {
        let state = web::Data::new(Room::new("T-1", config));
        log::info!("arena listening on {}:{}", bind.0, bind.1);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .route("/ws", web::get().to(connect))
                .route("/healthz", web::get().to(healthz))
        })
        .workers(2)
        .bind(bind)?
        .run()
        .await
    }
}

async fn healthz() -> impl Responder {
    HttpResponse::Ok().body("ok\n")
}

async fn connect(room: web::Data<Room>, body: web::Payload, req: HttpRequest) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            let room = room.get_ref().clone();
            actix_web::rt::spawn(bridge(room, session, stream));
            response
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// What a valid opening hello resolved to.
enum Greeting {
    Player(String),
    Watcher { control: bool },
}

/// Pumps one websocket: handshake, then frames in and out until either side
/// drops. The room holds all game state; this task owns the socket.
async fn bridge(room: Room, mut session: actix_ws::Session, mut stream: actix_ws::MessageStream) {
    match hello(&mut session, &mut stream).await {
        Some(Greeting::Player(team)) => player(room, session, stream, team).await,
        Some(Greeting::Watcher { control }) => watcher(room, session, stream, control).await,
        None => {}
    }
}

/// Reads the opening hello within its deadline. Fatal handshake failures
/// get an error frame and a closed socket.
async fn hello(
    session: &mut actix_ws::Session,
    stream: &mut actix_ws::MessageStream,
) -> Option<Greeting> {
    let text = match tokio::time::timeout(HELLO_TIMEOUT, stream.next()).await {
        Ok(Some(Ok(actix_ws::Message::Text(text)))) => text.to_string(),
        _ => {
            fail(session, ErrorCode::BadHello, "expected hello").await;
            return None;
        }
    };
    match ClientMessage::try_from(text.as_str()) {
        Ok(ClientMessage::Hello { team, role }) => {
            match role.as_deref().map(str::to_lowercase).as_deref() {
                Some("spectator") => Some(Greeting::Watcher { control: false }),
                Some("operator") => Some(Greeting::Watcher { control: true }),
                _ => match team.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
                    Some(team) => Some(Greeting::Player(team)),
                    None => {
                        fail(session, ErrorCode::BadSchema, "team required").await;
                        None
                    }
                },
            }
        }
        _ => {
            fail(session, ErrorCode::BadHello, "expected hello").await;
            None
        }
    }
}

async fn fail(session: &mut actix_ws::Session, code: ErrorCode, msg: &str) {
    let _ = session.text(ServerMessage::error(code, msg).to_frame()).await;
    let _ = session.clone().close(None).await;
}

async fn player(
    room: Room,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
    team: String,
) {
    let (tx, mut rx) = unbounded_channel();
    let seat = match room.join(&team, tx.clone()).await {
        Ok(seat) => seat,
        Err(e) => {
            let code = match e {
                EngineError::TeamRequired => ErrorCode::TeamRequired,
                EngineError::TableFull => ErrorCode::TableFull,
                _ => ErrorCode::InvalidAction,
            };
            fail(&mut session, code, &e.to_string()).await;
            return;
        }
    };
    'sesh: loop {
        tokio::select! {
            biased;
            out = rx.recv() => match out {
                Some(Outbound::Frame(frame)) => if session.text(frame).await.is_err() { break 'sesh },
                Some(Outbound::Close(reason)) => {
                    log::info!("[bridge P{}] closing: {}", seat, reason);
                    break 'sesh;
                }
                None => break 'sesh,
            },
            msg = stream.next() => match msg {
                Some(Ok(actix_ws::Message::Text(text))) => room.handle(seat, &text).await,
                Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                Some(Err(_)) => break 'sesh,
                None => break 'sesh,
                _ => continue 'sesh,
            },
        }
    }
    room.leave(seat, &tx).await;
    let _ = session.close(None).await;
}

async fn watcher(
    room: Room,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
    control: bool,
) {
    let (tx, mut rx) = unbounded_channel();
    let id = room.spectate(tx).await;
    'sesh: loop {
        tokio::select! {
            biased;
            out = rx.recv() => match out {
                Some(Outbound::Frame(frame)) => if session.text(frame).await.is_err() { break 'sesh },
                Some(Outbound::Close(_)) => break 'sesh,
                None => break 'sesh,
            },
            msg = stream.next() => match msg {
                Some(Ok(actix_ws::Message::Text(text))) => {
                    match ClientMessage::try_from(&*text) {
                        Ok(ClientMessage::Control { command }) if control => match command.as_deref() {
                            Some("SKIP_ACTION") => room.skip().await,
                            _ => {
                                let frame = ServerMessage::error(ErrorCode::UnknownType, "unknown command").to_frame();
                                let _ = session.text(frame).await;
                            }
                        },
                        // spectators are read-only
                        _ => break 'sesh,
                    }
                }
                Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                Some(Err(_)) => break 'sesh,
                None => break 'sesh,
                _ => continue 'sesh,
            },
        }
    }
    room.unspectate(id).await;
    let _ = session.close(None).await;
}
