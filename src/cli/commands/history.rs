//! Search history command.

use console::style;

use covid_search::{HistoryStore, Settings};

use crate::cli::helpers::open_store;

/// List recent searches, newest first.
pub fn cmd_history(settings: &Settings, json: bool, limit: Option<usize>) -> anyhow::Result<()> {
    let history = HistoryStore::new(open_store(settings)?);

    let mut records = history.load();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No searches yet. Run 'covid-search search <city>' to start.");
        return Ok(());
    }

    for record in &records {
        let when = record
            .recorded_at()
            .map(|at| {
                at.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "{}  {}",
            style(when).dim(),
            style(&record.city).bold()
        );
        println!("    {}", record.params);
    }

    Ok(())
}
