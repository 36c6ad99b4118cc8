use std::process::ExitCode;

use ridebook::auth::{hash_password, AuthConfig};
use ridebook::config::Config;
use ridebook::engine::Engine;
use ridebook::error::Error;
use ridebook::server::serve;
use ridebook::store::CsvStore;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.as_slice() {
        [command, password] if command == "hash-password" => print_hash(password),
        [] => run().await,
        _ => {
            eprintln!("usage: ridebook [hash-password <password>]");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_hash(password: &str) -> Result<(), Error> {
    println!("{}", hash_password(password)?);
    Ok(())
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing::info!("using data directory {}", config.data_dir.display());

    let auth = AuthConfig::from_path(&config.auth_config)?;
    let engine = Engine::new(CsvStore::new(&config.data_dir), auth)?;

    serve(engine, config.addr).await
}
