//! Command-line flags layered over the settings file.

use schext_core::config::{ConfigProvider, SchextConfig};

use super::RunArgs;

/// Settings view where flags win over the settings file. An explicit
/// `--manifest` disables the release list.
pub struct CliOverrides<'a> {
    pub args: &'a RunArgs,
    pub config: &'a SchextConfig,
}

impl ConfigProvider for CliOverrides<'_> {
    fn metadata_uri(&self) -> Option<String> {
        self.args
            .manifest
            .clone()
            .or_else(|| self.config.metadata_uri())
    }

    fn release_list(&self) -> Option<String> {
        if self.args.manifest.is_some() {
            return None;
        }
        self.args
            .release_list
            .clone()
            .or_else(|| self.config.release_list())
    }

    fn output(&self) -> Option<String> {
        self.args.output.clone().or_else(|| self.config.output())
    }
}
