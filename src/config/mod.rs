mod filesystem;
mod loader;
mod model;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{CONFIG_FILE_NAME, ConfigLoader, FileConfigLoader, LoadResult};
pub use model::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_MIN_LEVEL, PillarsConfig, ScanConfig};
