//! Chat-style prediction replies.
//!
//! Wraps the predictor's rollup in a conversational summary for the chat
//! endpoint. Data-poor cases are answered in-band with a literal reply rather
//! than as HTTP errors, so the client always has something to render.

use serde::Serialize;

use crate::predictor::predict;
use crate::record::Record;

/// Reply returned by the chat endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    fn literal(text: &str) -> Self {
        Self {
            reply: text.to_string(),
        }
    }
}

/// Compose a conversational reply to a free-text prompt.
pub fn compose_reply(prompt: &str, offers: &[Record]) -> ChatReply {
    if prompt.trim().is_empty() {
        return ChatReply::literal("Please ask a valid question.");
    }

    let prediction = match predict(offers) {
        Ok(prediction) => prediction,
        Err(_) => {
            return ChatReply::literal(
                "I don't have enough historical offer data yet. Please upload offer data first.",
            )
        }
    };

    let confidence_pct = (prediction.confidence * 100.0).round() as i64;
    ChatReply {
        reply: format!(
            "Based on analysis of {} past offers:\n\n\
             - Expected clicks: {}\n\
             - Expected revenue: ${}\n\
             - Confidence level: {}%\n\n\
             This offer type is likely to perform well in the next 30-90 days.",
            prediction.based_on_records,
            prediction.predicted_clicks,
            prediction.predicted_revenue,
            confidence_pct,
        ),
    }
}
