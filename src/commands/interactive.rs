use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::backend::SearchBackend;
use crate::error::ErrorKind;
use crate::render;
use crate::search::{self, Outcome};
use crate::session::{Applied, SearchSession, Submit, Ticket};

type Completion = (Ticket, Result<Outcome, ErrorKind>);

fn prompt() {
    print!("> ");
    let _ = io::Write::flush(&mut io::stdout());
}

/// Prompt loop. Searches run in the background; typing a new query while one
/// is in flight supersedes it.
pub async fn interactive(backend: Arc<dyn SearchBackend>) {
    let mut session = SearchSession::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Searching via {}. Type a query and press enter, ':q' to quit.", backend.name());
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("Failed to read from stdin: {}", e);
                        break;
                    }
                };
                if line.trim() == ":q" {
                    break;
                }

                match session.submit(&line) {
                    Submit::Dispatch(ticket) => {
                        print!("{}", render::view(session.state()));
                        let backend = Arc::clone(&backend);
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let result = search::run(backend.as_ref(), &ticket.query)
                                .await
                                .map_err(|e| e.kind());
                            let _ = tx.send((ticket, result));
                        });
                    }
                    Submit::AlreadyLoading => println!("Already searching for that."),
                    Submit::Cleared => {}
                }
                prompt();
            }
            Some((ticket, result)) = rx.recv() => {
                if session.complete(&ticket, result) == Applied::Current {
                    print!("\n{}", render::view(session.state()));
                    prompt();
                }
            }
        }
    }

    // Only spawned tasks hold senders now, so a task that dies ends the drain.
    drop(tx);
    drain_pending(&mut session, &mut rx).await;
    println!();
}

/// Input closed with a search still running: show it before leaving.
async fn drain_pending(session: &mut SearchSession, rx: &mut mpsc::UnboundedReceiver<Completion>) {
    while session.is_loading() {
        let Some((ticket, result)) = rx.recv().await else {
            tracing::debug!("search task ended without reporting back");
            break;
        };
        if session.complete(&ticket, result) == Applied::Current {
            print!("\n{}", render::view(session.state()));
        }
    }
}
