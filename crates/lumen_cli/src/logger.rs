use log::LevelFilter;

/// Initialize the logger at `level`; `RUST_LOG` can still refine individual modules.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
