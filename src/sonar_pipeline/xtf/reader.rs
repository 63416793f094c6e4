use crate::sonar_pipeline::common::error::Result;
use crate::sonar_pipeline::xtf::types::SonarData;

pub trait SonarReader {
    fn read_xtf(&self, data: &[u8]) -> Result<SonarData>;
}
