// src/main.rs

use testwatch::errors::TestwatchError;
use testwatch::run;

#[tokio::main]
async fn main() {
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "testwatch".to_string());
    let args: Vec<String> = argv.collect();

    // Reruns go through the real executable, not whatever argv[0] says.
    let interpreter = std::env::current_exe()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or(program);

    let code = tokio::select! {
        res = run(interpreter, args) => match res {
            Ok(code) => code,
            Err(TestwatchError::CliError(err)) => err.exit(),
            Err(err) => {
                eprintln!("testwatch error: {err}");
                1
            }
        },
        _ = interrupted() => 130,
    };

    std::process::exit(code);
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves
/// and the default signal disposition applies.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
