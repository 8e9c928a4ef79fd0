//! Plan execution
//!
//! `Engine` owns the I/O side of event handling: it holds the per-user
//! lock, runs `dispatch`, performs place-source calls, and mutates the
//! session and cursor stores. Session deletions happen only after the
//! terminal search succeeds, so an upstream failure leaves the user
//! exactly where they were.

use super::dispatch::{dispatch, Plan, SearchTarget, SessionUpdate};
use super::event::InboundEvent;
use super::filter::filter_candidates;
use super::response::{prompts, Response};
use super::session::{DialogSession, DialogStep, Preferences, UserId};
use super::store::{CursorStore, SessionStore, UserLocks};
use crate::config;
use crate::places::PlaceSource;

pub struct Engine<P, S, C> {
    places: P,
    sessions: S,
    cursors: C,
    locks: UserLocks,
}

impl<P, S, C> Engine<P, S, C>
where
    P: PlaceSource,
    S: SessionStore,
    C: CursorStore,
{
    pub fn new(places: P, sessions: S, cursors: C) -> Self {
        Self {
            places,
            sessions,
            cursors,
            locks: UserLocks::new(),
        }
    }

    /// Handle one inbound event and produce exactly one response.
    ///
    /// Events for the same user are serialized; distinct users run in
    /// parallel. Every path returns a response, failures included.
    pub async fn handle_event(&self, user: &UserId, event: InboundEvent) -> Response {
        let _guard = self.locks.acquire(user).await;

        let session = self.sessions.get(user).await;
        let result = dispatch(&event, &session);

        match result.session {
            SessionUpdate::Keep => {}
            SessionUpdate::Store(next) => self.sessions.put(user, next).await,
            SessionUpdate::Clear => self.sessions.delete(user).await,
        }

        match result.plan {
            Plan::Reply(response) => response,
            Plan::MoreResults => self.more_results(user).await,
            Plan::Search { target, prefs } => self.run_search(user, &session, target, prefs).await,
        }
    }

    async fn run_search(
        &self,
        user: &UserId,
        session: &DialogSession,
        target: SearchTarget,
        prefs: Preferences,
    ) -> Response {
        let origin = match target {
            SearchTarget::Coordinate(coordinate) => coordinate,
            SearchTarget::Query(query) => match self.places.geocode(&query).await {
                Ok(Some(coordinate)) => coordinate,
                Ok(None) => return self.geocode_miss(user, session).await,
                Err(e) => {
                    tracing::warn!(
                        user = %user,
                        error = %e,
                        retryable = e.kind.is_retryable(),
                        "geocoding failed"
                    );
                    return Response::text(prompts::UPSTREAM_FAILURE);
                }
            },
        };

        let candidates = match self
            .places
            .nearby_search(origin, prefs.radius_m, config::PLACE_CATEGORY)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                // Session left untouched: the user can simply retry.
                tracing::warn!(
                    user = %user,
                    error = %e,
                    retryable = e.kind.is_retryable(),
                    "nearby search failed"
                );
                return Response::text(prompts::UPSTREAM_FAILURE);
            }
        };

        // The search succeeded, so the dialog (if any) is complete.
        if !session.is_idle() {
            self.sessions.delete(user).await;
        }

        let filtered = filter_candidates(&candidates, &prefs);
        if filtered.is_empty() {
            tracing::info!(
                user = %user,
                raw = candidates.len(),
                cuisine = prefs.cuisine.label(),
                "no candidates passed the filter"
            );
            return Response::text(prompts::EMPTY_RESULT);
        }

        let total = filtered.len();
        let batch = self.cursors.seed(user, origin, filtered).await;
        tracing::info!(
            user = %user,
            total,
            shown = batch.places.len(),
            "seeded recommendations"
        );

        Response::Places {
            more_available: batch.remaining > 0,
            places: batch.places,
        }
    }

    async fn geocode_miss(&self, user: &UserId, session: &DialogSession) -> Response {
        if session.step != DialogStep::AwaitingLocation {
            // Idle free text that resolved to nothing: not a place name.
            return Response::text(prompts::WELCOME);
        }

        let mut next = session.clone();
        next.geocode_attempts += 1;
        if next.geocode_attempts >= config::MAX_GEOCODE_ATTEMPTS {
            tracing::info!(user = %user, "geocode attempts exhausted, abandoning flow");
            self.sessions.delete(user).await;
            Response::text(prompts::GEOCODE_GIVE_UP)
        } else {
            self.sessions.put(user, next).await;
            Response::text(prompts::GEOCODE_RETRY)
        }
    }

    async fn more_results(&self, user: &UserId) -> Response {
        match self.cursors.next(user).await {
            None => Response::text(prompts::NO_SEED),
            Some(batch) if batch.places.is_empty() => Response::Exhausted,
            Some(batch) => Response::Places {
                more_available: batch.remaining > 0,
                places: batch.places,
            },
        }
    }
}
