//! Sample tools, resources, and prompts served by `fast-mcp-example`.
mod greeting;
mod math;
mod prompts;
mod resources;
mod weather;

pub use greeting::{GreetingParameters, GreetingTool};
pub use math::{MathParameters, MathTool, Operation};
pub use prompts::{CodeReviewArguments, CodeReviewPrompt, GreetingArguments, GreetingPrompt};
pub use resources::{ConfigResource, SystemInfoResource};
pub use weather::{TemperatureUnit, WeatherParameters, WeatherTool};

#[cfg(test)]
pub(crate) fn text_of(content: &[rmcp::model::Content]) -> Vec<String> {
    content
        .iter()
        .filter_map(|item| item.as_text().map(|text| text.text.clone()))
        .collect()
}
