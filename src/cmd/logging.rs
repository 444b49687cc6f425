use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr subscriber filtered by `level`.
///
/// An unparsable filter falls back to `warn`.
pub fn init(level: &str) {
	let filter = EnvFilter::try_new(level).unwrap_or_else(|err| {
		eprintln!("invalid log level '{level}': {err}. Falling back to 'warn'");
		EnvFilter::new("warn")
	});

	let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
	if let Err(err) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
		eprintln!("logging already initialized: {err}");
	}
}
