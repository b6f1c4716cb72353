/// Meant to be called from a `#[ctor::ctor]` function in each test binary, so that it runs once
/// at load time (i.e. presumably before any test is run).
pub fn ctor_overall_init() {
    // Ignore errors, since there may not be a .env file (e.g. in docker image)
    let _ = dotenvy::dotenv();

    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    // try_init so that a second call (e.g. from a test binary that links this twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

/// Delete the file at the given path if it exists, so that a test can start from a blank database.
pub fn remove_file_if_exists(path: &str) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed existing file {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Produce a SQLite database URL for the given path which creates the database if it doesn't exist.
pub fn sqlite_url_for_path(path: &str) -> String {
    format!("sqlite://{}?mode=rwc", path)
}
