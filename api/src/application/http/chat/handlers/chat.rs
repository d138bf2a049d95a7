use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        IntoResponse, Response as AxumResponse,
        sse::{Event, Sse},
    },
};
use futures::StreamExt;

use crate::application::http::{
    chat::validators::ChatRequest,
    server::{
        api_entities::{
            api_error::{ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};
use healthscan_core::domain::chat::{
    entities::ChatCompletion,
    ports::ChatService,
    value_objects::{ChatInput, DEFAULT_CHAT_MAX_TOKENS, DEFAULT_CHAT_TEMPERATURE},
};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    summary = "Chat about nutrition",
    description = "Streams the reply as server-sent events (`data: {\"content\": ...}` frames closed by `data: [DONE]`) unless `stream` is false, in which case the whole reply is returned at once. Model failures are reported inside the reply text.",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Buffered reply, or an event stream when `stream` is true", body = ChatCompletion),
        (status = 422, description = "Invalid request", body = ApiErrorResponse)
    ),
)]
pub async fn chat(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ChatRequest>,
) -> AxumResponse {
    let input = ChatInput {
        messages: payload.messages,
        context: payload.context,
        temperature: payload.temperature.unwrap_or(DEFAULT_CHAT_TEMPERATURE),
        max_tokens: payload.max_tokens.unwrap_or(DEFAULT_CHAT_MAX_TOKENS),
    };

    if !payload.stream {
        let completion = state.service.complete_chat(input).await;
        return Response::OK(completion).into_response();
    }

    let events = state
        .service
        .chat(input)
        .await
        .into_events()
        .map(|envelope| Ok::<Event, Infallible>(Event::default().data(envelope.to_frame())));

    // Stops reverse proxies from holding back frames.
    ([("x-accel-buffering", "no")], Sse::new(events)).into_response()
}
