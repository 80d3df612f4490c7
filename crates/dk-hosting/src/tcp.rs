use crate::lobby::Lobby;
use crate::protocol::Protocol;
use crate::room::Room;
use dk_core::Chair;
use dk_core::Millis;
use dk_core::ID;
use dk_transport::encode_frame;
use dk_transport::CompressionMode;
use dk_transport::FrameReassembler;
use dk_transport::HeaderMode;
use dk_transport::InactivityWatchdog;
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::Mutex;

/// First frame a raw-TCP client sends, identifying which room to join
/// before the connection switches to `ClientMessage`/`ServerMessage` frames.
#[derive(Deserialize)]
struct JoinHandshake {
    room_id: uuid::Uuid,
    name: String,
    #[serde(default)]
    password: Option<String>,
}

/// Accept raw framed-TCP connections on `listener` until it errors, handing
/// each one a handshake frame naming its room before bridging it in.
/// Companion to the actix-ws HTTP entry point for clients that speak the
/// length-prefixed wire format directly over a socket.
pub async fn accept_loop(lobby: Arc<Lobby>, listener: TcpListener, watchdog_millis: Millis) {
    loop {
        let (mut stream, peer) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("tcp accept failed: {e}");
                continue;
            }
        };
        let lobby = lobby.clone();
        tokio::spawn(async move {
            let handshake = match read_handshake_frame(&mut stream).await {
                Ok(h) => h,
                Err(e) => {
                    log::warn!("tcp {peer}: handshake failed: {e}");
                    return;
                }
            };
            let room = match lobby.get(ID::<Room>::from(handshake.room_id)).await {
                Ok(room) => room,
                Err(e) => {
                    log::warn!("tcp {peer}: {e}");
                    return;
                }
            };
            if let Err(e) = serve_room_tcp(room, stream, handshake.name, handshake.password, watchdog_millis).await {
                log::warn!("tcp {peer}: {e}");
            }
        });
    }
}

async fn read_handshake_frame(stream: &mut TcpStream) -> std::io::Result<JoinHandshake> {
    let mut reassembler = FrameReassembler::new(64 * 1024);
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection closed before handshake"));
        }
        let payloads = reassembler
            .push(&buf[..n])
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        if let Some(payload) = payloads.into_iter().next() {
            return serde_json::from_slice(&payload)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    }
}

/// Bridges one raw framed-TCP connection to a Room, for clients that speak
/// the length-prefixed wire format directly rather than WebSocket. Mirrors
/// the original socket transport: a single message per frame, inactivity
/// watchdog reset on every successful read, connection aborted on timeout.
pub async fn serve_room_tcp(
    room: Arc<Mutex<Room>>,
    mut stream: TcpStream,
    name: String,
    password: Option<String>,
    watchdog_millis: Millis,
) -> std::io::Result<()> {
    let (tx, mut rx) = unbounded_channel::<String>();
    let chair: Chair = {
        let mut room = room.lock().await;
        match room.join(name, password.as_deref(), tx) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("tcp join rejected: {e}");
                return Ok(());
            }
        }
    };

    let mut reassembler = FrameReassembler::new(16 * 1024 * 1024);
    let started = std::time::Instant::now();
    let now = || started.elapsed().as_millis() as Millis;
    let mut watchdog = InactivityWatchdog::new(now(), watchdog_millis);
    let mut read_buf = [0u8; 4096];

    loop {
        tokio::select! {
            biased;
            outgoing = rx.recv() => match outgoing {
                Some(json) => {
                    let frame = encode_frame(json.as_bytes(), CompressionMode::Auto, HeaderMode::Auto)
                        .unwrap_or_default();
                    if stream.write_all(&frame).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            read = stream.read(&mut read_buf) => {
                match read {
                    Ok(0) => break,
                    Ok(n) => {
                        watchdog.restart(now());
                        match reassembler.push(&read_buf[..n]) {
                            Ok(payloads) => {
                                for payload in payloads {
                                    let text = String::from_utf8_lossy(&payload);
                                    match Protocol::decode(&text) {
                                        Ok(message) => {
                                            let mut room = room.lock().await;
                                            if let Err(e) = room.handle(chair, message) {
                                                log::warn!("chair {chair}: {e}");
                                            }
                                        }
                                        Err(e) => log::warn!("chair {chair}: {e}"),
                                    }
                                }
                            }
                            Err(e) => {
                                log::warn!("chair {chair}: framing error: {e}");
                                break;
                            }
                        }
                    }
                    Err(_) => break,
                }
            }
        }
        if watchdog.expired(now()) {
            log::debug!("chair {chair}: inactivity watchdog expired");
            break;
        }
    }

    let mut room = room.lock().await;
    let _ = room.disconnect(chair);
    Ok(())
}
