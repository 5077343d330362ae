//! Handler for the `run` command.

use std::path::Path;

use tokio::net::TcpListener;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_student_records, open_database, seed_on_startup};
use crate::infrastructure::config::settings::Config;

/// Execute the run command: serve until Ctrl+C or SIGTERM.
pub async fn execute(config_path: &Path, args: &RunArgs) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.init_logging();

    let addr = config.server.addr()?;
    let pool = open_database(&config)?;
    if config.database.seed_on_startup && !args.no_seed {
        seed_on_startup(pool.clone()).await;
    } else {
        info!("Startup seeding disabled");
    }

    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", format!("http://{local}/Students"));
    output::field("Database", &config.database.url);

    let router = http::router(build_student_records(pool));
    http::serve(listener, router, http::shutdown_signal()).await
}
