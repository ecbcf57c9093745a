use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.status_info(&index)?;

        let mut writer = self.writer();
        for (position, (title, entries)) in status.sections().into_iter().enumerate() {
            if position > 0 {
                writeln!(writer)?;
            }

            writeln!(writer, "=== {} ===", title)?;
            for entry in entries {
                writeln!(writer, "{}", entry)?;
            }
        }

        Ok(())
    }
}
