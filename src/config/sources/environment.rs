//! Environment variable source: WP_SAC__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "WP_SAC";

/// Add environment variable overlay to builder.
/// Uses WP_SAC__ prefix and __ as separator for nested keys,
/// e.g. `WP_SAC__UID__STRATEGY=random`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
