//! Intent Dispatching
//!
//! Maps an inbound envelope to directory, gateway, aggregator, and formatter
//! calls and produces the spoken response. Every path, including every
//! failure path, returns a well-formed envelope so the conversation stays
//! usable for the next turn.

use crate::models::{Intent, Request, RequestEnvelope, ResponseEnvelope};
use crate::state::AppState;
use headway_core::arrivals::{self, ArrivalBoard};
use headway_core::{advisories, speech};
use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

/// Session-attribute key holding the arrival board between turns.
const ARRIVALS_ATTRIBUTE: &str = "arrivals";

/// Slot carrying the departure station name on `GetStation`.
const STATION_SLOT: &str = "station";
/// Slot carrying the destination name on `GetDestinationStation`.
const DESTINATION_SLOT: &str = "destinationStation";

/// Produces the response for one inbound envelope.
#[instrument(skip_all, fields(session_id = %envelope.session.session_id))]
pub async fn dispatch(state: &AppState, envelope: &RequestEnvelope) -> ResponseEnvelope {
    match &envelope.request {
        Request::LaunchRequest { request_id } => {
            info!(%request_id, "Session launched");
            ResponseEnvelope::ask(speech::LAUNCH_PROMPT, speech::LAUNCH_REPROMPT, Map::new())
        }
        Request::SessionEndedRequest { request_id, reason } => {
            info!(%request_id, ?reason, "Session ended");
            ResponseEnvelope::empty()
        }
        Request::IntentRequest { request_id, intent } => {
            info!(%request_id, intent = %intent.name, "Dispatching intent");
            match intent.name.as_str() {
                "GetHelp" => get_help(),
                "GetStation" => get_station(state, intent).await,
                "GetDestinationStation" => {
                    get_destination_station(&envelope.session.attributes, intent)
                }
                "GetServiceAdvisories" => get_service_advisories(state).await,
                other => {
                    warn!(intent = %other, "Unknown intent");
                    ResponseEnvelope::tell(speech::HELP_TEXT)
                }
            }
        }
    }
}

fn get_help() -> ResponseEnvelope {
    ResponseEnvelope::tell_with_card(
        speech::HELP_TEXT,
        speech::HELP_CARD_TITLE,
        speech::HELP_CARD_TEXT,
    )
}

/// Answers a station query: resolve the spoken name, fetch predictions,
/// and either finish ("no arrivals") or ask the user to pick a destination,
/// caching the board for that follow-up turn.
async fn get_station(state: &AppState, intent: &Intent) -> ResponseEnvelope {
    let Some(spoken_name) = intent.slot_value(STATION_SLOT) else {
        warn!("GetStation request without a station slot value");
        return ResponseEnvelope::tell(speech::STATION_NOT_HEARD);
    };

    let corrected = state.directory.correct(spoken_name);
    info!(station = %corrected, "Station requested");

    let Some(station) = state.directory.lookup(spoken_name) else {
        warn!(station = %corrected, "Spoken station not in directory");
        return ResponseEnvelope::tell(speech::station_not_understood(corrected));
    };

    let payload = match state.transit.station_arrivals(&station.code).await {
        Ok(payload) => payload,
        Err(e) => {
            error!(station = %station.code, error = %e, "Arrivals fetch failed");
            return ResponseEnvelope::tell(speech::SERVICE_UNAVAILABLE);
        }
    };

    let board = arrivals::aggregate(&payload.trains, &state.directory);
    if board.is_empty() {
        return ResponseEnvelope::tell(speech::NO_ARRIVALS);
    }

    let destinations: Vec<&str> = board.keys().map(String::as_str).collect();
    let prompt = speech::destination_prompt(&destinations);
    ResponseEnvelope::ask(&prompt, &prompt, board_attributes(&board))
}

/// Answers the follow-up turn against the board cached by `GetStation`.
fn get_destination_station(
    attributes: &Map<String, Value>,
    intent: &Intent,
) -> ResponseEnvelope {
    let Some(spoken_name) = intent.slot_value(DESTINATION_SLOT) else {
        warn!("GetDestinationStation request without a destination slot value");
        return ResponseEnvelope::tell(speech::DESTINATION_NOT_HEARD);
    };
    info!(destination = %spoken_name, "Destination requested");

    let board = cached_board(attributes);
    match board.get(spoken_name) {
        Some(countdowns) => {
            ResponseEnvelope::tell(speech::arrival_sentence(spoken_name, countdowns))
        }
        None => {
            warn!(destination = %spoken_name, "Destination not in cached arrival board");
            ResponseEnvelope::tell(speech::destination_not_recognized(spoken_name))
        }
    }
}

async fn get_service_advisories(state: &AppState) -> ResponseEnvelope {
    let payload = match state.transit.service_incidents().await {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Incidents fetch failed");
            return ResponseEnvelope::tell(speech::SERVICE_UNAVAILABLE);
        }
    };

    // An absent incident list is an upstream contract violation, reported
    // differently from a present-but-empty one.
    let Some(incidents) = payload.incidents else {
        error!("Incidents payload missing its incident list");
        return ResponseEnvelope::tell(speech::ADVISORIES_UNAVAILABLE);
    };

    ResponseEnvelope::tell(advisories::format_advisories(&incidents))
}

/// Wraps the board into the session-attribute map for the next turn.
fn board_attributes(board: &ArrivalBoard) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(
        ARRIVALS_ATTRIBUTE.to_string(),
        serde_json::to_value(board).unwrap_or_default(),
    );
    attributes
}

/// Reads the arrival board cached by the previous `GetStation` turn, if any.
fn cached_board(attributes: &Map<String, Value>) -> ArrivalBoard {
    attributes
        .get(ARRIVALS_ATTRIBUTE)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}
