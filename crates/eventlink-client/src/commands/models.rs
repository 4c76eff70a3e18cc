//! Model listing command.

use eventlink_providers::Model;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Lists the supported models, marking the configured default.
pub fn list(config: &ClientConfig) -> ClientResult<()> {
    let current = Model::from_setting(config.default_model.as_deref()).ok();
    for line in model_lines(current) {
        println!("{}", line);
    }
    Ok(())
}

fn model_lines(current: Option<Model>) -> Vec<String> {
    Model::ALL
        .iter()
        .map(|model| {
            let marker = if Some(*model) == current { "*" } else { " " };
            format!(
                "{} {:<15} {}",
                marker,
                model.id(),
                model.adapter().name()
            )
        })
        .collect()
}
