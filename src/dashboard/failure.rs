//! Display-side classification of backend failure messages

use serde::{Deserialize, Serialize};

/// Category of a failed experiment run, for choosing a user-facing hint.
///
/// Classification only picks the hint; the original message is always
/// shown alongside it unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Anthropic client not initialised / key missing
    MissingAnthropicKey,
    /// OpenRouter key missing
    MissingOpenRouterKey,
    /// Every upstream provider failed
    AllProvidersFailed,
    /// Upstream account out of credit
    InsufficientCredit,
    /// Request or upstream call timed out
    Timeout,
    /// Anything else
    Other,
}

impl FailureKind {
    /// Classify a backend error message by its content.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        if message.contains("not initialized") || message.contains("ANTHROPIC_API_KEY") {
            Self::MissingAnthropicKey
        } else if message.contains("OPENROUTER_API_KEY") {
            Self::MissingOpenRouterKey
        } else if message.contains("Both") && message.contains("failed") {
            Self::AllProvidersFailed
        } else if message.contains("credit balance") || message.contains("too low") {
            Self::InsufficientCredit
        } else if message.to_lowercase().contains("timeout") || message.contains("timed out") {
            Self::Timeout
        } else {
            Self::Other
        }
    }

    /// Hint shown above the raw message.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::MissingAnthropicKey => {
                "Claude API key is missing or invalid. Please check your environment variables."
            }
            Self::MissingOpenRouterKey => {
                "OpenRouter API key is missing or invalid. Please check your environment variables."
            }
            Self::AllProvidersFailed => {
                "Both OpenRouter and Claude APIs failed. Please check your API keys."
            }
            Self::InsufficientCredit => {
                "Your API credit balance is too low. Please add credits to continue."
            }
            Self::Timeout => {
                "The experiment took too long. Try a narrower parameter range."
            }
            Self::Other => "Failed to run experiment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_kind() {
        assert_eq!(
            FailureKind::classify("Anthropic client not initialized"),
            FailureKind::MissingAnthropicKey
        );
        assert_eq!(
            FailureKind::classify("OPENROUTER_API_KEY is not set"),
            FailureKind::MissingOpenRouterKey
        );
        assert_eq!(
            FailureKind::classify("Both providers failed: 401, 401"),
            FailureKind::AllProvidersFailed
        );
        assert_eq!(
            FailureKind::classify("Your credit balance is too low"),
            FailureKind::InsufficientCredit
        );
        assert_eq!(
            FailureKind::classify("Request timeout after 120s"),
            FailureKind::Timeout
        );
        assert_eq!(FailureKind::classify("boom"), FailureKind::Other);
    }
}
