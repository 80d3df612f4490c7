use crate::protocol::Protocol;
use crate::room::Room;
use dk_config::RoomConfiguration;
use dk_config::SetCatalog;
use dk_core::Millis;
use dk_core::ID;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Registry of live rooms, keyed by ID. Owns room lifecycle (open, tick,
/// close) and bridges WebSocket connections onto a room's synchronous API.
pub struct Lobby {
    catalog: Arc<dyn SetCatalog + Send + Sync>,
    mythic_rare_probability: f64,
    rooms: RwLock<HashMap<ID<Room>, Arc<Mutex<Room>>>>,
}

impl Lobby {
    pub fn new(catalog: Arc<dyn SetCatalog + Send + Sync>, mythic_rare_probability: f64) -> Self {
        Self {
            catalog,
            mythic_rare_probability,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Validate and open a new room, then spawn its background timer tick
    /// loop. Returns the new room's id.
    pub async fn start(self: &Arc<Self>, config: RoomConfiguration, seed: u64) -> anyhow::Result<ID<Room>> {
        dk_config::validate(&config, &*self.catalog).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let dispensers = dk_config::build_dispensers(&config, &*self.catalog, self.mythic_rare_probability, seed)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let id = ID::default();
        let room = Room::new(id, &config, dispensers, SmallRng::seed_from_u64(seed));
        self.rooms.write().await.insert(id, Arc::new(Mutex::new(room)));
        log::debug!("lobby: opened room {id}");

        let lobby = self.clone();
        tokio::spawn(async move { lobby.tick_loop(id).await });
        Ok(id)
    }

    pub async fn close(&self, id: ID<Room>) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }

    pub async fn get(&self, id: ID<Room>) -> anyhow::Result<Arc<Mutex<Room>>> {
        self.rooms
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }

    /// Drive a room's logical clock forward roughly once a second until it's
    /// closed. Stops once the room is removed from the registry, or removes
    /// it itself once the draft reaches a terminal state.
    async fn tick_loop(self: Arc<Self>, id: ID<Room>) {
        let started = std::time::Instant::now();
        let mut interval = tokio::time::interval(Duration::from_millis(1000));
        loop {
            interval.tick().await;
            let room = match self.rooms.read().await.get(&id).cloned() {
                Some(room) => room,
                None => break,
            };
            let now: Millis = started.elapsed().as_millis() as Millis;
            let terminal = {
                let mut room = room.lock().await;
                room.tick(now);
                room.is_terminal()
            };
            if terminal {
                log::debug!("lobby: room {id} reached a terminal state, tearing down");
                let _ = self.close(id).await;
                break;
            }
        }
    }

    /// Spawn a WebSocket bridge between a joined chair and its room. Joins
    /// (or reconnects, when `reconnect_chair` is given) the chair before
    /// returning so the caller can report seat assignment immediately; the
    /// bridge itself runs in a background task.
    pub async fn bridge(
        &self,
        id: ID<Room>,
        name: String,
        password: Option<String>,
        reconnect_chair: Option<dk_core::Chair>,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) -> anyhow::Result<()> {
        use futures::StreamExt;

        let room = self.get(id).await?;
        let (tx, mut rx) = unbounded_channel::<String>();
        let chair = {
            let mut room = room.lock().await;
            match reconnect_chair {
                Some(chair) => {
                    room.reconnect(chair, password.as_deref(), tx)
                        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                    chair
                }
                None => room
                    .join(name, password.as_deref(), tx)
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?,
            }
        };
        log::debug!("bridge {id}: chair {chair} connected");

        actix_web::rt::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    outgoing = rx.recv() => match outgoing {
                        Some(json) => if session.text(json).await.is_err() { break },
                        None => break,
                    },
                    incoming = stream.next() => match incoming {
                        Some(Ok(actix_ws::Message::Text(text))) => match Protocol::decode(&text) {
                            Ok(message) => {
                                let mut room = room.lock().await;
                                if let Err(e) = room.handle(chair, message) {
                                    log::warn!("bridge {id}: chair {chair}: {e}");
                                }
                            }
                            Err(e) => log::warn!("bridge {id}: chair {chair}: {e}"),
                        },
                        Some(Ok(actix_ws::Message::Close(_))) => break,
                        Some(Err(_)) => break,
                        None => break,
                        _ => continue,
                    },
                }
            }
            let mut room = room.lock().await;
            let _ = room.disconnect(chair);
            log::debug!("bridge {id}: chair {chair} disconnected");
        });
        Ok(())
    }
}
