use async_trait::async_trait;
use rmcp::model::PromptMessage;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    capability::{assistant, user, Prompt},
    lib::errors::PromptError,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GreetingArguments {
    /// Name of the person to greet
    pub name: String,
    /// Use formal greeting style (optional, defaults to casual)
    pub formal: Option<bool>,
}

/// Two-message conversation starter.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingPrompt;

#[async_trait]
impl Prompt for GreetingPrompt {
    type Arguments = GreetingArguments;

    fn name(&self) -> &str {
        "greeting"
    }

    fn description(&self) -> Option<&str> {
        Some("A friendly greeting conversation starter")
    }

    async fn messages(
        &self,
        arguments: Self::Arguments,
    ) -> Result<Vec<PromptMessage>, PromptError> {
        let name = arguments.name;
        Ok(if arguments.formal == Some(true) {
            vec![
                user(format!("You are a formal assistant helping {name}.")),
                assistant(format!("Good day, {name}. How may I assist you today?")),
            ]
        } else {
            vec![
                user(format!("You are a friendly assistant helping {name}.")),
                assistant(format!("Hey {name}! What can I help you with?")),
            ]
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeReviewArguments {
    /// The programming language of the code
    pub language: String,
    /// Focus areas for the review (optional)
    pub focus_areas: Option<String>,
}

const REVIEW_CHECKLIST: &[&str] = &[
    "1. Code correctness and potential bugs",
    "2. Performance implications",
    "3. Security vulnerabilities",
    "4. Code style and best practices",
];

/// Multi-message code review workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeReviewPrompt;

#[async_trait]
impl Prompt for CodeReviewPrompt {
    type Arguments = CodeReviewArguments;

    fn name(&self) -> &str {
        "code_review"
    }

    fn description(&self) -> Option<&str> {
        Some("Guide the assistant through a code review")
    }

    async fn messages(
        &self,
        arguments: Self::Arguments,
    ) -> Result<Vec<PromptMessage>, PromptError> {
        let language = arguments.language;
        let focus = arguments
            .focus_areas
            .map(|areas| format!(", with focus on {areas}"))
            .unwrap_or_default();
        Ok(vec![
            user(format!("You are an expert {language} code reviewer.")),
            user("Please review the code I'm about to share. Focus on:"),
            user(REVIEW_CHECKLIST.join("\n")),
            assistant(format!(
                "I understand. Please share the {language} code you'd like me to review{focus}."
            )),
        ])
    }
}
