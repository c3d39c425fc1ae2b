//! Demo service - manage demo mode
//!
//! In demo mode the dashboard reads built-in sample data instead of calling
//! the transactions API.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;

pub struct DemoService {
    finboard_dir: PathBuf,
}

impl DemoService {
    pub fn new(finboard_dir: &Path) -> Self {
        Self {
            finboard_dir: finboard_dir.to_path_buf(),
        }
    }

    pub fn is_enabled(&self) -> Result<bool> {
        Ok(Config::load(&self.finboard_dir)?.demo_mode)
    }

    pub fn enable(&self) -> Result<()> {
        self.set(true)
    }

    pub fn disable(&self) -> Result<()> {
        self.set(false)
    }

    fn set(&self, enabled: bool) -> Result<()> {
        let mut config = Config::load(&self.finboard_dir)?;
        if enabled {
            config.enable_demo_mode();
        } else {
            config.disable_demo_mode();
        }
        config.save(&self.finboard_dir)
    }
}
