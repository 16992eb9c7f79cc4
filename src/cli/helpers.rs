//! Shared helper functions for CLI commands.

use console::{style, StyledObject};

use covid_search::{
    BrowserNavigator, Config, KeyValueStore, MemoryStore, Navigator, PrintNavigator, SearchSession,
    Settings, SqliteStore, Tag,
};

use super::commands::SelectionArgs;

/// Session backed by the on-disk store.
pub type CliSession = SearchSession<SqliteStore, Box<dyn Navigator>>;

pub fn success() -> StyledObject<&'static str> {
    style("✓").green()
}

pub fn warning() -> StyledObject<&'static str> {
    style("!").yellow()
}

/// Open the local store under the data directory.
pub fn open_store(settings: &Settings) -> anyhow::Result<SqliteStore> {
    settings.ensure_directories()?;
    Ok(SqliteStore::open(&settings.database_path())?)
}

/// Start a session on the local store.
pub fn open_session(settings: &Settings, config: Config, print: bool) -> anyhow::Result<CliSession> {
    let store = open_store(settings)?;
    let navigator: Box<dyn Navigator> = if print {
        Box::new(PrintNavigator)
    } else {
        Box::new(BrowserNavigator)
    };
    Ok(SearchSession::new(config, store, navigator))
}

/// Session that never touches disk or the browser (previews only).
pub fn preview_session(config: Config) -> SearchSession<MemoryStore, PrintNavigator> {
    SearchSession::new(config, MemoryStore::new(), PrintNavigator)
}

/// Apply selection flags on top of the session defaults.
pub fn apply_selection<S: KeyValueStore, N: Navigator>(
    session: &mut SearchSession<S, N>,
    args: &SelectionArgs,
) {
    if args.no_defaults {
        session.clear_include_words();
    }
    // Each flag acts like a click on the word's chip, but only when the
    // chip is in the opposite state.
    for word in &args.add {
        let mut tag = word_tag(session, word);
        if tag.is_enabled() {
            continue;
        }
        let word = tag.activate();
        if !session.add_new_included_word(word) {
            eprintln!("{} Ignoring '{}' (too short)", warning(), word);
        }
    }
    for word in &args.drop {
        let mut tag = word_tag(session, word);
        if tag.is_enabled() {
            session.remove_include(tag.activate());
        }
    }
    if let Some(ref exclude) = args.exclude {
        session.set_exclude_words(exclude);
    }
    if args.all_posts {
        session.set_only_verified(false);
    }
    if args.include_requests {
        session.set_only_non_required(false);
    }
}

/// Chip for an include word, enabled when the word is selected.
fn word_tag<S: KeyValueStore, N: Navigator>(session: &SearchSession<S, N>, word: &str) -> Tag {
    let word = word.trim();
    Tag::new(word, session.selection().contains(word))
}

/// Render tags as a single line of chips.
pub fn render_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| {
            if tag.is_enabled() {
                style(format!("[{}]", tag.label())).green().bold().to_string()
            } else {
                style(format!(" {} ", tag.label())).dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
