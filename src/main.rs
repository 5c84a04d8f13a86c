use std::path::Path;
use std::{env, io, process};

use ctc_engine::Engine;
use ctc_engine::csv::{CsvSink, read_directory, read_edits};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ctc-engine <edits.csv> [directory.csv]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            "warn".parse().expect("static directive is valid"),
        ))
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let mut engine = Engine::new();
    if let Some(directory_path) = args.next() {
        match read_directory(&directory_path) {
            Ok(directory) => {
                info!(employees = directory.len(), "directory loaded");
                engine = engine.with_directory(directory);
            }
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }
    }

    let edits = match read_edits(Path::new(&path)) {
        Ok(edits) => edits,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let (edit_sender, edit_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in edits {
            match result {
                Ok(edit) => {
                    if edit_sender.send(edit).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    engine.run(ReceiverStream::new(edit_receiver)).await;

    let mut sink = CsvSink::new(io::stdout().lock());
    let committed = engine.commit_all(&mut sink);
    info!(committed, "drafts committed");
}
