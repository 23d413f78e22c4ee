use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::Path;

use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::Manager;
use crate::smoothing::sampleseries::SampleSeries;
use crate::smoothing::smoothingprofile::SmoothingProfile;
use crate::smoothing::smoothingrequest::SmoothingRequest;


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    series: Vec<serde_json::Value>,
    #[serde(default)]
    profiles: Vec<serde_json::Value>
}

/// 由 JSON 資料檔載入的取樣序列與平滑設定。載入後唯讀，交給繪圖端使用。
pub struct Configuration {
    series_manager: Manager<SampleSeries>,
    profile_manager: Manager<SmoothingProfile>
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            series_manager: Manager::new(SampleSeries::from_json),
            profile_manager: Manager::new(SmoothingProfile::from_json)
        }
    }

    pub fn series_manager(&self) -> &Manager<SampleSeries> {
        &self.series_manager
    }

    pub fn profile_manager(&self) -> &Manager<SmoothingProfile> {
        &self.profile_manager
    }

    pub fn from_path<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ManagerError> {
        let file = File::open(file_path.as_ref())?;
        let config = Configuration::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded {} series and {} profiles from {}",
            config.series_manager.len(),
            config.profile_manager.len(),
            file_path.as_ref().display()
        );
        Ok(config)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        let mut config = Configuration::new();
        config.series_manager.insert_obj_from_json_vec(&json_prop.series)?;
        config.profile_manager.insert_obj_from_json_vec(&json_prop.profiles)?;
        Ok(config)
    }

    pub fn series(&self, name: &str) -> Result<&SampleSeries, ManagerError> {
        self.series_manager.get(name)
    }

    /// `None` 時使用預設的三次 spline 設定
    pub fn profile(&self, name: Option<&str>) -> Result<SmoothingProfile, ManagerError> {
        match name {
            Some(name) => self.profile_manager.get(name).cloned(),
            None => Ok(SmoothingProfile::default_profile()),
        }
    }

    pub fn request(&self, series_name: &str, profile_name: Option<&str>) -> Result<SmoothingRequest, ManagerError> {
        let series = self.series(series_name)?;
        let profile = self.profile(profile_name)?;
        Ok(profile.request(series.samples().to_vec()))
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration::new()
    }
}
