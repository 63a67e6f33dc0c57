use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        let status_info = Status::new(self).initialize()?;

        status_info.print(self.writer().as_mut())
    }
}
