mod config_content_provider;
mod config_file;
mod config_serializer;
mod validate;

pub use config_content_provider::{
    ConfigContentProvider, FileContentConfigProvider, InMemoryConfigProvider,
};
pub use config_file::ConfigFile;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use validate::Validate;
