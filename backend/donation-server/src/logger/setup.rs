//! Setup logging subsystem.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{Directive, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::config::{self, LogFormat};

/// Contains guards necessary for logging. Dropping it flushes pending lines.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Setup logging sub-system specifying the logging configuration, service (binary) name, and a
/// list of external crates for which a more verbose logging must be enabled. All crates within the
/// current cargo workspace are automatically considered for verbose logging.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> TelemetryGuard {
    let mut guards = Vec::new();

    let console_layer = if config.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let console_filter = get_envfilter(
            config.console.filtering_directive.as_ref(),
            config::Level::default(),
            config.console.level,
            crates_to_filter.as_ref(),
        );

        let layer = match config.console.log_format {
            LogFormat::Default => fmt::layer()
                .with_writer(console_writer)
                .with_target(true)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(console_writer)
                .boxed(),
        };
        Some(layer.with_filter(console_filter))
    } else {
        None
    };

    #[allow(clippy::print_stderr)]
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .inspect_err(|error| eprintln!("{service_name}: logger was already initialised: {error}"));

    TelemetryGuard {
        _log_guards: guards,
    }
}

fn get_envfilter(
    filtering_directive: Option<&String>,
    default_log_level: config::Level,
    filter_log_level: config::Level,
    crates_to_filter: &[&'static str],
) -> EnvFilter {
    filtering_directive
        .and_then(|filter| EnvFilter::try_new(filter).ok())
        .unwrap_or_else(|| {
            let default_level = LevelFilter::from_level(default_log_level.into_level());
            let filter_level = filter_log_level.into_level();

            crates_to_filter
                .iter()
                .filter_map(|krate| format!("{krate}={filter_level}").parse::<Directive>().ok())
                .fold(
                    EnvFilter::default().add_directive(default_level.into()),
                    |filter, directive| filter.add_directive(directive),
                )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directive_wins() {
        let directive = "donation_server=trace".to_string();
        let filter = get_envfilter(
            Some(&directive),
            config::Level::default(),
            config::Level::default(),
            &["tower_http"],
        );
        assert!(filter.to_string().contains("donation_server=trace"));
    }

    #[test]
    fn crates_get_the_configured_level() {
        let level: config::Level = serde_json::from_value(serde_json::json!("DEBUG")).unwrap();
        let filter = get_envfilter(None, config::Level::default(), level, &["donation_server"]);
        let rendered = filter.to_string();
        assert!(rendered.contains("donation_server=debug"));
        assert!(rendered.contains("info"));
    }
}
