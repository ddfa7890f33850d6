use tokio::{fs, io::AsyncWriteExt};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Read the configuration from the toml file, overridden by environment variables
///
/// The file is optional, every config section falls back to its default.
/// Nested keys are separated by a double underscore, e.g. `POKERROOM_SERVER_ROOMS__USER_TIMEOUT_SECS`
pub fn read_config<T>(file_name: &str, env_prefix: Option<&str>) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut config_builder =
        Config::builder().add_source(File::new(file_name, FileFormat::Toml).required(false));

    if let Some(env_prefix) = env_prefix {
        config_builder = config_builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    }

    config_builder.build()?.try_deserialize()
}

/// Ids that sort by creation time, e.g. `session_018d3b...`
pub fn generate_time_ordered_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::now_v7().as_simple())
}

pub fn generate_name() -> String {
    let random_name_generator = rnglib::RNG::from(&rnglib::Language::Fantasy);

    format!(
        "{} {}",
        random_name_generator.generate_name(),
        random_name_generator.generate_name()
    )
}

fn replace_home_dir(file_name: &str) -> String {
    let home_dir = std::env::var("HOME").unwrap_or_default();
    let path_buf = std::path::PathBuf::from(file_name);
    path_buf
        .iter()
        .map(|dir| {
            if dir == "~" {
                home_dir.clone()
            } else {
                dir.to_string_lossy().into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
        // Joining the root component produces a leading double slash
        .replacen("//", "/", 1)
}

/// Read a file from local storage
///
/// Return `None` if file is not present or cannot be parsed
pub async fn read_local_storage<T>(file_name: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
{
    let file_name = replace_home_dir(file_name);
    let file_contents = fs::read_to_string(&file_name).await.ok()?;

    match toml::from_str::<T>(&file_contents) {
        Ok(data) => Some(data),
        Err(error) => {
            log::warn!("Ignoring invalid local storage at {file_name}: {error}");
            None
        }
    }
}

/// Write the given data to file in local storage
///
/// Create the file and its parent directories if they do not exist
pub async fn write_local_storage<T>(file_name: &str, data: &T) -> std::io::Result<()>
where
    T: serde::Serialize,
{
    let file_name = replace_home_dir(file_name);
    let file_contents = toml::to_string(data)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;

    if let Some(parent) = std::path::Path::new(&file_name).parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(file_name).await?;
    file.write_all(file_contents.as_bytes()).await
}
