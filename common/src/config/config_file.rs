use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Typed view over stored config content. Missing content loads as
/// `TConfig::default()`; anything stored must parse and validate.
pub struct ConfigFile<TConfig, TProvider = FileContentConfigProvider, TSerializer = YamlConfigSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<TConfig>,
{
    provider: TProvider,
    serializer: TSerializer,
    _config: PhantomData<TConfig>,
}

impl<TConfig> ConfigFile<TConfig>
where
    TConfig: DeserializeOwned + Serialize + Validate + Default,
{
    pub fn yaml(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfig, TProvider, TSerializer> ConfigFile<TConfig, TProvider, TSerializer>
where
    TConfig: Validate + Default,
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            provider,
            serializer,
            _config: PhantomData,
        }
    }

    pub fn source(&self) -> String {
        self.provider.describe()
    }

    pub fn exists(&self) -> Result<bool, String> {
        Ok(self.provider.get_config_content()?.is_some())
    }

    pub fn load(&self) -> Result<TConfig, String> {
        let Some(content) = self.provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }

    pub fn save(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = self.serializer.serialize(config)?;
        self.provider.set_config_content(&content)
    }
}
