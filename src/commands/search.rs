use crate::backend::SearchBackend;
use crate::render;
use crate::search;
use crate::session::{SearchSession, Submit};

pub async fn search_repos(backend: &dyn SearchBackend, raw_query: &str, json: bool) {
    let mut session = SearchSession::new();
    let ticket = match session.submit(raw_query) {
        Submit::Dispatch(ticket) => ticket,
        _ => {
            eprintln!("Give me something to search for.");
            std::process::exit(1);
        }
    };

    if !json {
        eprint!("{}", render::view(session.state()));
    }

    let result = search::run(backend, &ticket.query).await;
    if json {
        if let Ok(outcome) = &result {
            match serde_json::to_string_pretty(&outcome.results) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Failed to serialize results: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    let failed = result.is_err();
    session.complete(&ticket, result.map_err(|e| e.kind()));

    if failed {
        eprint!("{}", render::view(session.state()));
        std::process::exit(1);
    }
    if !json {
        print!("{}", render::view(session.state()));
    }
}
