use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crowns_bot::{AdviceError, MeldStrategy, RandomStrategy, Strategy, StrategyKind};
use crowns_core::model::codec::DecodeError;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::ServerSettings;
use crate::wire::{Action, BotRequest, DiscardResponse, DrawResponse, ErrorBody, ScoreResponse};

const BOTS_PREFIX: &str = "/bots/";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("malformed request body: {0}")]
    BadRequest(#[source] serde_json::Error),
    #[error("invalid card: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Advice(#[from] AdviceError),
    #[error("no strategy named '{0}'")]
    UnknownStrategy(String),
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },
    #[error("{method} is not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ServiceError {
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) | ServiceError::Decode(_) => 400,
            ServiceError::Advice(err) if err.is_client_error() => 400,
            ServiceError::UnknownStrategy(_) | ServiceError::NotFound { .. } => 404,
            ServiceError::MethodNotAllowed { .. } => 405,
            ServiceError::Advice(_) | ServiceError::Encode(_) => 500,
        }
    }

    /// Message safe to hand back to the caller. Internal faults stay opaque.
    fn public_message(&self) -> String {
        if self.status() >= 500 {
            "internal error while computing advice".to_string()
        } else {
            self.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: TEXT,
            body: body.as_bytes().to_vec(),
        }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, ServiceError> {
        let body = serde_json::to_vec(value).map_err(ServiceError::Encode)?;
        Ok(Self {
            status,
            content_type: JSON,
            body,
        })
    }

    fn from_error(err: &ServiceError) -> Self {
        let body = ErrorBody {
            error: err.public_message(),
        };
        let bytes = serde_json::to_vec(&body).unwrap_or_else(|_| b"{}".to_vec());
        Self {
            status: err.status(),
            content_type: JSON,
            body: bytes,
        }
    }
}

/// Routes requests to named strategies. Holds no per-request state, so one
/// instance is shared by every worker.
#[derive(Default, Clone)]
pub struct AdviceService {
    strategies: BTreeMap<String, Arc<dyn Strategy>>,
}

impl AdviceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &ServerSettings) -> Self {
        let params = settings.engine.params();
        settings
            .strategies
            .iter()
            .fold(Self::new(), |service, entry| {
                let strategy: Arc<dyn Strategy> = match entry.kind {
                    StrategyKind::Meld => Arc::new(MeldStrategy::new(params)),
                    StrategyKind::Random => Arc::new(match entry.seed {
                        Some(seed) => RandomStrategy::with_seed(seed),
                        None => RandomStrategy::new(),
                    }),
                };
                service.with_strategy(entry.name.clone(), strategy)
            })
    }

    pub fn with_strategy(mut self, name: impl Into<String>, strategy: Arc<dyn Strategy>) -> Self {
        self.strategies.insert(name.into(), strategy);
        self
    }

    pub fn strategy_names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    /// Answers one HTTP exchange. Pure apart from logging.
    pub fn handle(&self, method: &str, url: &str, body: &[u8]) -> ServiceResponse {
        let started = Instant::now();
        let path = url.split_once('?').map_or(url, |(path, _)| path);

        let mut strategy_name = None;
        let mut action = None;
        let outcome = if path == "/ping" {
            if method.eq_ignore_ascii_case("GET") {
                Ok(ServiceResponse::text(200, "pong"))
            } else {
                Err(ServiceError::MethodNotAllowed {
                    method: method.to_string(),
                    path: path.to_string(),
                })
            }
        } else if let Some(name) = path.strip_prefix(BOTS_PREFIX) {
            strategy_name = Some(name);
            if method.eq_ignore_ascii_case("POST") {
                self.advise(name, body, &mut action)
            } else {
                Err(ServiceError::MethodNotAllowed {
                    method: method.to_string(),
                    path: path.to_string(),
                })
            }
        } else {
            Err(ServiceError::NotFound {
                method: method.to_string(),
                path: path.to_string(),
            })
        };

        let response = match &outcome {
            Ok(response) => response.clone(),
            Err(err) => ServiceResponse::from_error(err),
        };
        log_exchange(
            method,
            path,
            strategy_name,
            action,
            &response,
            outcome.as_ref().err(),
            started,
        );
        response
    }

    fn advise(
        &self,
        name: &str,
        body: &[u8],
        action: &mut Option<Action>,
    ) -> Result<ServiceResponse, ServiceError> {
        let strategy = self
            .strategies
            .get(name)
            .ok_or_else(|| ServiceError::UnknownStrategy(name.to_string()))?;

        let request: BotRequest = serde_json::from_slice(body).map_err(ServiceError::BadRequest)?;
        *action = Some(request.action);
        let state = request.turn_state()?;

        match request.action {
            Action::Score => {
                ServiceResponse::json(200, &ScoreResponse::from(strategy.score(&state)?))
            }
            Action::Discard => {
                ServiceResponse::json(200, &DiscardResponse::from(strategy.discard(&state)?))
            }
            Action::Draw => ServiceResponse::json(200, &DrawResponse::from(strategy.draw(&state)?)),
        }
    }
}

fn log_exchange(
    method: &str,
    path: &str,
    strategy: Option<&str>,
    action: Option<Action>,
    response: &ServiceResponse,
    error: Option<&ServiceError>,
    started: Instant,
) {
    let elapsed_us = started.elapsed().as_micros() as u64;
    let strategy = strategy.unwrap_or("-");
    let action = action.map_or("-", Action::as_str);

    match error {
        None => event!(
            target: "crowns_server::http",
            Level::INFO,
            method,
            path,
            strategy,
            action,
            status = response.status,
            elapsed_us,
        ),
        Some(err) if response.status >= 500 => event!(
            target: "crowns_server::http",
            Level::ERROR,
            method,
            path,
            strategy,
            action,
            status = response.status,
            elapsed_us,
            error = %err,
        ),
        Some(err) => event!(
            target: "crowns_server::http",
            Level::WARN,
            method,
            path,
            strategy,
            action,
            status = response.status,
            elapsed_us,
            error = %err,
        ),
    }
}
