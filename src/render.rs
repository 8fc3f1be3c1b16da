use std::fmt::Write;

use crate::session::ViewState;
use crate::types::SearchResult;

pub const SEARCH_FAILED: &str = "An error occurred while searching. Please try again.";
pub const NO_RESULTS: &str = "No results found. Try a different search query.";

pub fn card(repo: &SearchResult) -> String {
    let mut out = String::new();
    let title = repo.full_name.as_deref().unwrap_or(&repo.name);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "    {}", repo.url);
    if let Some(desc) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "    {}", desc);
    }
    let _ = writeln!(
        out,
        "    ⭐ {} stars | 🍴 {} forks | 👀 {} watchers",
        repo.stars, repo.forks, repo.watchers
    );
    let language = repo.language.as_deref().unwrap_or("N/A");
    let license = repo.license.as_deref().unwrap_or("No license");
    let _ = write!(out, "    {} | {}", language, license);
    if let Some(updated) = repo.updated_at {
        let _ = write!(out, " | Updated: {}", updated.format("%Y-%m-%d"));
    }
    out.push('\n');
    if !repo.topics.is_empty() {
        let tags: Vec<String> = repo.topics.iter().map(|t| format!("[{}]", t)).collect();
        let _ = writeln!(out, "    Topics: {}", tags.join(" "));
    }
    out
}

/// Whole-screen rendering of a session state.
pub fn view(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading { query } => format!("Searching for '{}'...\n", query),
        ViewState::Failed { kind, .. } => format!("{} ({})\n", SEARCH_FAILED, kind),
        ViewState::Loaded { results, .. } if results.is_empty() => format!("{}\n", NO_RESULTS),
        ViewState::Loaded {
            results, elapsed, ..
        } => {
            let mut out = format!(
                "\nFound {} repositories ({} ms):\n\n",
                results.len(),
                elapsed.as_millis()
            );
            for repo in results {
                out.push_str(&card(repo));
                out.push('\n');
            }
            out
        }
    }
}
