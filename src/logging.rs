use chrono::Local;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
///
/// `RUST_LOG` follows the usual `env_logger` filter syntax; without it only
/// `info` and above are shown.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        });

        // a logger installed by the host (e.g. a test harness) wins
        let _ = builder.try_init();

        log::debug!("logging initialized");
    });
}
