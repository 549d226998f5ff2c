use std::sync::Arc;

use fxhash::FxHashMap;
use jiff::{SignedDuration, Timestamp};
use rideshare_providers::{geocoding::Geocoder, routing::RouteDistanceProvider};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument};

use crate::{
    allocator::{self, CostBreakdown, PassengerQuote},
    error::{SessionError, StoreError},
    metrics::RideMetrics,
    model::{Passenger, Vehicle},
    resolution::SegmentResolver,
    session::RideSession,
    store::RideStore,
};

#[derive(Debug, Clone, Serialize)]
pub struct PassengerAdded {
    pub passenger: Passenger,
    pub breakdown: CostBreakdown,
}

/// `None` once the session was saved or discarded. A caller that cloned the slot before
/// that happened must not see the session anymore.
type SessionSlot = Arc<Mutex<Option<RideSession>>>;

/// Keeps the open ride sessions. Each session has its own lock, held for the whole
/// resolve-then-price sequence of a passenger addition, so additions to one session are
/// applied one at a time while other sessions are not blocked.
pub struct SessionManager<G, R> {
    resolver: SegmentResolver<G, R>,
    sessions: RwLock<FxHashMap<String, SessionSlot>>,
}

impl<G, R> SessionManager<G, R>
where
    G: Geocoder,
    R: RouteDistanceProvider,
{
    pub fn new(resolver: SegmentResolver<G, R>) -> Self {
        Self {
            resolver,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn resolver(&self) -> &SegmentResolver<G, R> {
        &self.resolver
    }

    #[instrument(skip(self))]
    pub async fn open_session(
        &self,
        vehicle: Vehicle,
        start: &str,
        end: &str,
    ) -> Result<RideSession, SessionError> {
        allocator::validate_vehicle(&vehicle)?;

        let primary = self.resolver.resolve_segment(start, end).await?;
        let session = RideSession::new(vehicle, primary)?;

        info!("Opened session {}", session.id());
        self.sessions.write().await.insert(
            session.id().to_string(),
            Arc::new(Mutex::new(Some(session.clone()))),
        );

        Ok(session)
    }

    async fn slot(&self, session_id: &str) -> Result<SessionSlot, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    pub async fn get(&self, session_id: &str) -> Result<RideSession, SessionError> {
        let slot = self.slot(session_id).await?;
        let mut slot = slot.lock().await;
        Ok(open(&mut slot, session_id)?.clone())
    }

    pub async fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn breakdown(&self, session_id: &str) -> Result<CostBreakdown, SessionError> {
        let slot = self.slot(session_id).await?;
        let mut slot = slot.lock().await;
        Ok(open(&mut slot, session_id)?.breakdown()?)
    }

    /// Prices a passenger segment against the session without adding it.
    pub async fn quote_passenger(
        &self,
        session_id: &str,
        pickup: &str,
        drop: &str,
    ) -> Result<PassengerQuote, SessionError> {
        let slot = self.slot(session_id).await?;
        let mut slot = slot.lock().await;
        open(&mut slot, session_id)?;

        let segment = self.resolver.resolve_segment(pickup, drop).await?;
        Ok(open(&mut slot, session_id)?.quote(&segment)?)
    }

    #[instrument(skip(self))]
    pub async fn add_passenger(
        &self,
        session_id: &str,
        name: &str,
        pickup: &str,
        drop: &str,
    ) -> Result<PassengerAdded, SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::EmptyPassengerName);
        }

        let slot = self.slot(session_id).await?;
        let mut slot = slot.lock().await;
        open(&mut slot, session_id)?;

        let segment = self.resolver.resolve_segment(pickup, drop).await?;
        let session = open(&mut slot, session_id)?;
        let passenger = session.add_passenger(name, segment)?.clone();

        Ok(PassengerAdded {
            passenger,
            breakdown: session.breakdown()?,
        })
    }

    pub async fn discard(&self, session_id: &str) -> Result<(), SessionError> {
        let slot = self.slot(session_id).await?;
        let mut slot = slot.lock().await;
        if slot.take().is_none() {
            return Err(SessionError::SessionNotFound(session_id.to_string()));
        }

        self.sessions.write().await.remove(session_id);
        info!("Discarded session {}", session_id);

        Ok(())
    }

    /// Stores the session as a finalized ride and closes it. The store runs on the blocking
    /// pool; the session stays open when it fails.
    pub async fn save(
        &self,
        session_id: &str,
        store: Arc<dyn RideStore>,
    ) -> Result<RideMetrics, SessionError> {
        let slot = self.slot(session_id).await?;
        let mut slot = slot.lock().await;

        let metrics = open(&mut slot, session_id)?.to_metrics()?;
        let ride = metrics.clone();
        tokio::task::spawn_blocking(move || store.save(&ride))
            .await
            .map_err(|err| StoreError::Io(std::io::Error::other(err)))??;

        slot.take();
        self.sessions.write().await.remove(session_id);
        info!("Saved session {} as a ride", session_id);

        Ok(metrics)
    }

    /// Closes the sessions opened more than `max_age` ago and returns how many were closed.
    /// Sessions busy with a request are left for the next sweep.
    pub async fn sweep_expired(&self, max_age: SignedDuration) -> usize {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|session_id, slot| {
            let Ok(mut slot) = slot.try_lock() else {
                return true;
            };

            let expired = match &*slot {
                Some(session) => now.duration_since(session.created_at()) >= max_age,
                None => return false,
            };
            if expired {
                info!("Session {} expired", session_id);
                slot.take();
            }

            !expired
        });

        before - sessions.len()
    }
}

fn open<'a>(
    slot: &'a mut Option<RideSession>,
    session_id: &str,
) -> Result<&'a mut RideSession, SessionError> {
    slot.as_mut()
        .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
}
