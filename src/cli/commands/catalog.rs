//! Static lists: words, cities and project links.

use console::style;

use covid_search::{Config, Tag};

use super::SelectionArgs;
use crate::cli::helpers::{apply_selection, preview_session, render_tags};

/// Show the active include words and the remaining suggestions.
pub fn cmd_words(config: Config, selection: &SelectionArgs) -> anyhow::Result<()> {
    let mut session = preview_session(config);
    apply_selection(&mut session, selection);

    let active: Vec<Tag> = session
        .selection()
        .include_words()
        .iter()
        .map(|w| Tag::new(w, true))
        .collect();
    let suggested: Vec<Tag> = session
        .suggestions()
        .into_iter()
        .map(|w| Tag::new(w, false))
        .collect();

    println!("{}", style("Include words:").bold());
    if active.is_empty() {
        println!("  {}", style("(none)").dim());
    } else {
        println!("  {}", render_tags(&active));
    }

    if !suggested.is_empty() {
        println!("{}", style("Suggestions (--add WORD):").bold());
        println!("  {}", render_tags(&suggested));
    }

    let mapping = &session.config().term_mapping;
    let expanded: Vec<&String> = session
        .selection()
        .include_words()
        .iter()
        .filter(|w| mapping.contains_key(w))
        .collect();
    for word in expanded {
        println!(
            "  {} {} → {}",
            style("·").dim(),
            word,
            session.builder().expand_term(word).join(", ")
        );
    }

    Ok(())
}

/// List preset cities with their pick numbers.
pub fn cmd_cities(config: &Config) -> anyhow::Result<()> {
    for (i, city) in config.cities.iter().enumerate() {
        let tag = Tag::new(city, false).disable_toggle();
        println!("{:>3}  {}", style(i + 1).dim(), render_tags(&[tag]));
    }
    if config.search_on_city_select {
        println!(
            "\n{}",
            style("Run 'covid-search pick <name|number>' to search a city").dim()
        );
    }
    Ok(())
}

/// List project links.
pub fn cmd_about(config: &Config) -> anyhow::Result<()> {
    println!(
        "{} {}",
        style("covid-search").bold(),
        covid_search::VERSION
    );
    for link in &config.resources {
        println!("  {}: {}", link.name, link.link);
    }
    Ok(())
}
