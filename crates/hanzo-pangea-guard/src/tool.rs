//! Tool contract for agent runtimes

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// Tool trait for agent tools
///
/// Every guard takes one piece of text and returns one piece of text.
/// Agent runtimes call [`Tool::invoke`] with JSON arguments; direct callers
/// use [`Tool::run`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name of the tool
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters
    fn json_schema(&self) -> Value {
        input_text_schema()
    }

    /// Guard `input_text`, returning the text to pass on
    async fn run(&self, input_text: &str) -> Result<String>;

    /// Invoke the tool with JSON arguments
    ///
    /// Accepts `{"input_text": "..."}` or a bare JSON string.
    async fn invoke(&self, args: &str) -> Result<String> {
        let input = parse_input(args)?;
        self.run(&input).await
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToolInput {
    Object { input_text: String },
    Text(String),
}

fn parse_input(args: &str) -> Result<String> {
    let input: ToolInput = serde_json::from_str(args)?;
    Ok(match input {
        ToolInput::Object { input_text } => input_text,
        ToolInput::Text(text) => text,
    })
}

/// Schema shared by all guards: a single `input_text` string
pub fn input_text_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "input_text": {
                "type": "string",
                "description": "The text to check"
            }
        },
        "required": ["input_text"]
    })
}
