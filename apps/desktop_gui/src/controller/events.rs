//! UI/backend events and error modeling for the artwork viewer.

use client_core::{ArtworkPage, FetchError, PageRequest};

pub enum UiEvent {
    Info(String),
    PageFetched {
        request: PageRequest,
        result: Result<ArtworkPage, FetchError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadPage,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("malformed")
            || message_lower.contains("invalid")
            || message_lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("http 5")
            || message_lower.contains("http 4")
            || message_lower.contains("responded with")
        {
            UiErrorCategory::Server
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("dns")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short guidance line shown above the raw message in the error banner.
    pub fn headline(&self) -> &'static str {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => {
                "Backend worker failed to start; restart the viewer."
            }
            (_, UiErrorCategory::Transport) => {
                "Artworks API unreachable; check your network and retry."
            }
            (_, UiErrorCategory::Server) => "The artworks API returned an error; try again later.",
            (_, UiErrorCategory::Validation) => {
                "The artworks API sent data the viewer could not read."
            }
            (_, UiErrorCategory::Unknown) => "Could not load artworks.",
        }
    }
}
