use env_logger::Env;

/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let env = Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
