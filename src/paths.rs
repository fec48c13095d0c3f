use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const GRID_CONFIG_FILE: &str = "grid.json";

pub struct AppPaths {
    pub config: PathBuf,
}

impl AppPaths {
    pub fn from_project_dirs() -> Option<Self> {
        ProjectDirs::from("com", "mablocks", "MaBlocksGrid").map(|dirs| Self {
            config: dirs.config_dir().to_path_buf(),
        })
    }

    pub fn grid_config_file(&self) -> PathBuf {
        self.config.join(GRID_CONFIG_FILE)
    }

    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config)
    }
}
