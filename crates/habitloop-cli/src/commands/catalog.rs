use clap::Subcommand;
use habitloop_core::catalog::SUGGESTIONS;
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List suggested habits; add one with `habit add --from-catalog <n>`
    List,
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List => {
            let numbered: Vec<_> = SUGGESTIONS
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    json!({
                        "number": i + 1,
                        "name": s.name,
                        "description": s.description,
                        "icon": s.icon,
                    })
                })
                .collect();
            print_json(&numbered)?;
        }
    }
    Ok(())
}
