//! Search, query preview and city pick commands.

use console::style;

use covid_search::selection::MIN_CITY_LEN;
use covid_search::{Config, NavigationOutcome, SearchOutcome, Settings};

use super::SelectionArgs;
use crate::cli::helpers::{apply_selection, open_session, preview_session, success, warning};

/// Build the search for a city, record it and open it.
pub fn cmd_search(
    settings: &Settings,
    config: Config,
    city: Option<&str>,
    selection: &SelectionArgs,
    print: bool,
    no_history: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(settings, config, print)?;
    apply_selection(&mut session, selection);
    session.set_record_history(!no_history);
    if let Some(city) = city {
        session.set_city(city);
    }

    let outcome = session.start_search();
    report_outcome(outcome.as_ref(), print);
    Ok(())
}

/// Print the query and URL only.
pub fn cmd_query(
    config: Config,
    city: Option<&str>,
    selection: &SelectionArgs,
    all_cities: bool,
) -> anyhow::Result<()> {
    let mut session = preview_session(config);
    apply_selection(&mut session, selection);

    if all_cities {
        let builder = session.builder();
        for (city, query) in builder.city_queries(session.selection(), &session.config().cities) {
            println!("{}", style(city).bold());
            println!("  {}", query);
            println!("  {}", style(builder.search_url(&query)).dim());
        }
        return Ok(());
    }

    if let Some(city) = city {
        session.set_city(city);
    }
    if !session.selection().can_search() {
        eprintln!("{} {}; the search would not run", warning(), short_city_hint());
    }

    let preview = session.preview();
    println!("{}", preview.query);
    println!("{}", preview.url);
    Ok(())
}

/// Pick a preset city; searches right away if the config says so.
pub fn cmd_pick(
    settings: &Settings,
    config: Config,
    city: &str,
    selection: &SelectionArgs,
    print: bool,
) -> anyhow::Result<()> {
    let city = config.find_city(city)?.to_string();

    let mut session = open_session(settings, config, print)?;
    apply_selection(&mut session, selection);

    match session.select_city(&city) {
        Some(outcome) => report_outcome(Some(&outcome), print),
        None => {
            eprintln!(
                "{} City set to {} (search on pick is disabled)",
                style("→").dim(),
                style(&city).bold()
            );
            let preview = session.preview();
            println!("{}", preview.query);
            println!("{}", preview.url);
        }
    }
    Ok(())
}

fn report_outcome(outcome: Option<&SearchOutcome>, print: bool) {
    let Some(outcome) = outcome else {
        eprintln!("{} {} to search", style("→").dim(), short_city_hint());
        return;
    };

    if let Some(ref err) = outcome.history_error {
        eprintln!("{} Search not saved to history: {}", warning(), err);
    }

    match &outcome.navigation {
        NavigationOutcome::Opened if print => {}
        NavigationOutcome::Opened => {
            eprintln!("{} Opened search in browser", success());
            eprintln!("  {} {}", style("→").dim(), outcome.query);
        }
        NavigationOutcome::Blocked(reason) => {
            eprintln!("{} Could not open the browser ({})", warning(), reason);
            println!("{}", outcome.url);
        }
    }
}

fn short_city_hint() -> String {
    format!("Enter a city name (at least {} characters)", MIN_CITY_LEN)
}
