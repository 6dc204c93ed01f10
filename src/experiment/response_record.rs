//! Response Record - one scored model output per parameter tuple

use serde::{Deserialize, Serialize};

use super::MetricVector;

/// The generation parameters a response was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub top_p: f64,
    /// Token budget
    pub max_tokens: u32,
}

impl GenerationParameters {
    /// Create a parameter tuple.
    #[must_use]
    pub const fn new(temperature: f64, top_p: f64, max_tokens: u32) -> Self {
        Self {
            temperature,
            top_p,
            max_tokens,
        }
    }

    /// Label used for scatter tooltips, e.g. `"0.5/0.9"`.
    #[must_use]
    pub fn combo_label(&self) -> String {
        format!("{}/{}", self.temperature, self.top_p)
    }
}

/// A single scored response returned by the backend.
///
/// Produced by the execution backend and read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Generated text
    pub text: String,
    /// Parameters that produced the text
    pub parameters: GenerationParameters,
    /// Quality scores
    pub metrics: MetricVector,
}

impl ResponseRecord {
    /// Create a response record.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        parameters: GenerationParameters,
        metrics: MetricVector,
    ) -> Self {
        Self {
            text: text.into(),
            parameters,
            metrics,
        }
    }

    /// Length of the response text in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_label_uses_shortest_float_repr() {
        let p = GenerationParameters::new(0.5, 0.9, 500);
        assert_eq!(p.combo_label(), "0.5/0.9");
        let p = GenerationParameters::new(1.0, 0.1, 500);
        assert_eq!(p.combo_label(), "1/0.1");
    }

    #[test]
    fn test_response_record_wire_format() {
        let json = serde_json::json!({
            "text": "hello",
            "parameters": {"temperature": 0.3, "top_p": 0.7, "max_tokens": 500},
            "metrics": {
                "completeness": 0.9,
                "coherence": 0.8,
                "creativity": 0.4,
                "relevance": 0.95,
                "overall": 0.76
            }
        });
        let record: ResponseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.text, "hello");
        assert!((record.parameters.top_p - 0.7).abs() < f64::EPSILON);
        assert_eq!(record.parameters.max_tokens, 500);
        assert!((record.metrics.overall - 0.76).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_len_counts_chars() {
        let r = ResponseRecord::new(
            "héllo",
            GenerationParameters::new(0.1, 0.1, 500),
            MetricVector::default(),
        );
        assert_eq!(r.text_len(), 5);
    }
}
