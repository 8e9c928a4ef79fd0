//! Pure event routing
//!
//! `dispatch` maps (inbound event, current session) to a session update
//! plus a plan, with no I/O. The executor performs the plan's place-source
//! calls and cursor mutations, and applies the session update only once
//! those succeed.

use super::event::{ActionPayload, InboundEvent};
use super::response::{prompts, Response};
use super::session::{parse_rating, parse_radius, Cuisine, DialogSession, DialogStep, Preferences};
use crate::config;
use crate::places::Coordinate;

/// What the executor should do with the stored session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Keep,
    Store(DialogSession),
    Clear,
}

/// Where a search should happen.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTarget {
    Coordinate(Coordinate),
    /// Free text to be resolved through geocoding first.
    Query(String),
}

/// The I/O (or lack of it) an event calls for.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Reply immediately.
    Reply(Response),
    /// Resolve the target if needed, search, filter, seed the cursor, and
    /// reply with the first batch.
    Search {
        target: SearchTarget,
        prefs: Preferences,
    },
    /// Pull the next unshown batch from the cursor.
    MoreResults,
}

/// Result of routing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    pub session: SessionUpdate,
    pub plan: Plan,
}

impl DispatchResult {
    fn reply(response: Response) -> Self {
        Self {
            session: SessionUpdate::Keep,
            plan: Plan::Reply(response),
        }
    }
}

/// Route one inbound event against the user's current session.
pub fn dispatch(event: &InboundEvent, session: &DialogSession) -> DispatchResult {
    match event {
        // A location pin always searches. With no open dialog it uses the
        // unconditional defaults; mid-dialog it completes the flow with
        // whatever was accumulated (uncollected fields are still defaults).
        InboundEvent::Location { coordinate } => {
            let prefs = if session.is_idle() {
                Preferences::immediate()
            } else {
                session.prefs
            };
            DispatchResult {
                session: SessionUpdate::Keep,
                plan: Plan::Search {
                    target: SearchTarget::Coordinate(*coordinate),
                    prefs,
                },
            }
        }

        InboundEvent::Text { text } => dispatch_text(text.trim(), session),

        InboundEvent::Action(ActionPayload::Navigate {
            name,
            address,
            latitude,
            longitude,
        }) => match Coordinate::new(*latitude, *longitude) {
            // Pure pass-through, no state mutation.
            Some(coordinate) => DispatchResult::reply(Response::Navigation {
                name: name.clone(),
                address: address.clone(),
                coordinate,
            }),
            None => DispatchResult::reply(Response::text(prompts::UNSUPPORTED)),
        },

        InboundEvent::Action(ActionPayload::Recommend) => DispatchResult {
            session: SessionUpdate::Keep,
            plan: Plan::MoreResults,
        },

        InboundEvent::Unsupported => DispatchResult::reply(Response::text(prompts::UNSUPPORTED)),
    }
}

fn dispatch_text(text: &str, session: &DialogSession) -> DispatchResult {
    match session.step {
        DialogStep::Idle => dispatch_idle_text(text),

        DialogStep::AwaitingCuisine => {
            let mut next = session.clone();
            next.prefs.cuisine = Cuisine::from_input(text);
            next.step = DialogStep::AwaitingRating;
            DispatchResult {
                session: SessionUpdate::Store(next),
                plan: Plan::Reply(Response::text(prompts::ASK_RATING)),
            }
        }

        DialogStep::AwaitingRating => {
            let mut next = session.clone();
            next.prefs.min_rating = parse_rating(text);
            next.step = DialogStep::AwaitingRadius;
            DispatchResult {
                session: SessionUpdate::Store(next),
                plan: Plan::Reply(Response::text(prompts::ASK_RADIUS)),
            }
        }

        DialogStep::AwaitingRadius => {
            let mut next = session.clone();
            next.prefs.radius_m = parse_radius(text);
            next.step = DialogStep::AwaitingLocation;
            DispatchResult {
                session: SessionUpdate::Store(next),
                plan: Plan::Reply(Response::text(prompts::ASK_LOCATION)),
            }
        }

        // The terminal step. Session bookkeeping (clear on success, retry
        // counter on geocode miss) belongs to the executor.
        DialogStep::AwaitingLocation => DispatchResult {
            session: SessionUpdate::Keep,
            plan: Plan::Search {
                target: SearchTarget::Query(text.to_string()),
                prefs: session.prefs,
            },
        },
    }
}

fn dispatch_idle_text(text: &str) -> DispatchResult {
    if text.contains(config::TRIGGER_PHRASE) {
        return DispatchResult {
            session: SessionUpdate::Store(DialogSession::starting()),
            plan: Plan::Reply(Response::text(prompts::ASK_CUISINE)),
        };
    }

    if config::HINT_KEYWORDS.iter().any(|k| text.contains(k)) {
        return DispatchResult::reply(Response::text(prompts::SEND_LOCATION_HINT));
    }

    // Anything else might be a place name; the executor geocodes it and
    // falls back to the welcome prompt when nothing resolves.
    DispatchResult {
        session: SessionUpdate::Keep,
        plan: Plan::Search {
            target: SearchTarget::Query(text.to_string()),
            prefs: Preferences::immediate(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_event(s: &str) -> InboundEvent {
        InboundEvent::Text { text: s.to_string() }
    }

    #[test]
    fn trigger_phrase_starts_the_flow() {
        let result = dispatch(&text_event("我想開始找餐廳！"), &DialogSession::idle());
        let SessionUpdate::Store(session) = &result.session else {
            panic!("expected a stored session");
        };
        assert_eq!(session.step, DialogStep::AwaitingCuisine);
        assert_eq!(
            result.plan,
            Plan::Reply(Response::text(prompts::ASK_CUISINE))
        );
    }

    #[test]
    fn hint_keywords_get_a_location_hint() {
        let result = dispatch(&text_event("附近有什麼美食"), &DialogSession::idle());
        assert_eq!(result.session, SessionUpdate::Keep);
        assert_eq!(
            result.plan,
            Plan::Reply(Response::text(prompts::SEND_LOCATION_HINT))
        );
    }

    #[test]
    fn idle_free_text_becomes_a_default_query_search() {
        let result = dispatch(&text_event("台北車站"), &DialogSession::idle());
        let Plan::Search { target, prefs } = result.plan else {
            panic!("expected a search plan");
        };
        assert_eq!(target, SearchTarget::Query("台北車站".to_string()));
        assert!((prefs.min_rating - 3.5).abs() < f32::EPSILON);
    }

    #[test]
    fn location_with_no_session_uses_immediate_defaults() {
        let coordinate = Coordinate::new(25.04, 121.56).unwrap();
        let result = dispatch(
            &InboundEvent::Location { coordinate },
            &DialogSession::idle(),
        );
        assert_eq!(result.session, SessionUpdate::Keep);
        let Plan::Search { prefs, .. } = result.plan else {
            panic!("expected a search plan");
        };
        assert_eq!(prefs, Preferences::immediate());
    }

    #[test]
    fn location_mid_dialog_uses_accumulated_preferences() {
        let mut session = DialogSession::starting();
        session.step = DialogStep::AwaitingRadius;
        session.prefs.cuisine = Cuisine::Korean;
        session.prefs.min_rating = 4.0;

        let coordinate = Coordinate::new(25.04, 121.56).unwrap();
        let result = dispatch(&InboundEvent::Location { coordinate }, &session);
        let Plan::Search { prefs, .. } = result.plan else {
            panic!("expected a search plan");
        };
        assert_eq!(prefs.cuisine, Cuisine::Korean);
    }

    #[test]
    fn collector_walks_the_fixed_order_with_fallbacks() {
        // 日式 → valid cuisine
        let result = dispatch(&text_event("日式"), &DialogSession::starting());
        let SessionUpdate::Store(session) = result.session else {
            panic!()
        };
        assert_eq!(session.step, DialogStep::AwaitingRating);
        assert_eq!(session.prefs.cuisine, Cuisine::Japanese);

        // 9 → out of range, default 3, still advances
        let result = dispatch(&text_event("9"), &session);
        let SessionUpdate::Store(session) = result.session else {
            panic!()
        };
        assert_eq!(session.step, DialogStep::AwaitingRadius);
        assert!((session.prefs.min_rating - 3.0).abs() < f32::EPSILON);

        // abc → invalid, default 2000, still advances
        let result = dispatch(&text_event("abc"), &session);
        let SessionUpdate::Store(session) = result.session else {
            panic!()
        };
        assert_eq!(session.step, DialogStep::AwaitingLocation);
        assert_eq!(session.prefs.radius_m, 2000);

        // free text at the terminal step becomes a query search with the
        // accumulated preferences
        let result = dispatch(&text_event("台北車站"), &session);
        assert_eq!(result.session, SessionUpdate::Keep);
        let Plan::Search { target, prefs } = result.plan else {
            panic!()
        };
        assert_eq!(target, SearchTarget::Query("台北車站".to_string()));
        assert_eq!(prefs.cuisine, Cuisine::Japanese);
        assert_eq!(prefs.radius_m, 2000);
    }

    #[test]
    fn navigate_is_a_pure_pass_through() {
        let mut session = DialogSession::starting();
        session.step = DialogStep::AwaitingRating;

        let event = InboundEvent::Action(ActionPayload::Navigate {
            name: "好吃拉麵".to_string(),
            address: "台北市".to_string(),
            latitude: 25.0,
            longitude: 121.5,
        });
        let result = dispatch(&event, &session);
        assert_eq!(result.session, SessionUpdate::Keep);
        assert!(matches!(
            result.plan,
            Plan::Reply(Response::Navigation { .. })
        ));
    }

    #[test]
    fn recommend_asks_the_cursor() {
        let result = dispatch(
            &InboundEvent::Action(ActionPayload::Recommend),
            &DialogSession::idle(),
        );
        assert_eq!(result.plan, Plan::MoreResults);
        assert_eq!(result.session, SessionUpdate::Keep);
    }

    #[test]
    fn unsupported_events_never_touch_the_session() {
        let mut session = DialogSession::starting();
        session.step = DialogStep::AwaitingRadius;
        let result = dispatch(&InboundEvent::Unsupported, &session);
        assert_eq!(result.session, SessionUpdate::Keep);
        assert_eq!(
            result.plan,
            Plan::Reply(Response::text(prompts::UNSUPPORTED))
        );
    }
}
