use dsa_lib::Config;

/// Settings after merging CLI flags with the config file; CLI wins
/// when a flag is present.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSettings {
    pub batch_size: usize,
    pub large_frame_threshold: usize,
}

pub fn resolve_settings(cli_batch_size: Option<usize>, config: &Config) -> ResolvedSettings {
    ResolvedSettings {
        batch_size: cli_batch_size.unwrap_or(config.batch_size),
        large_frame_threshold: config.large_frame_threshold,
    }
}
