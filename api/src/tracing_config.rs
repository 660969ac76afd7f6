use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

/// Install the global subscriber. Production logs are Bunyan JSON on stdout,
/// development logs are an indented tree. `LOG` overrides the filter.
pub fn configure(name: impl Into<String>, production: bool) -> Result<(), anyhow::Error> {
    LogTracer::builder()
        .ignore_crate("rustls")
        .with_max_level(log::LevelFilter::Debug)
        .init()?;

    let env_filter = EnvFilter::try_from_env("LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(ErrorLayer::default());

    if production {
        let formatting_layer = BunyanFormattingLayer::new(name.into(), std::io::stdout);
        set_global_default(subscriber.with(JsonStorageLayer).with(formatting_layer))?;
    } else {
        let tree = HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        set_global_default(subscriber.with(tree))?;
    }

    Ok(())
}
