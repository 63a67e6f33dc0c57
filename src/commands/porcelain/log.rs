use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// History of the active branch, newest first.
    pub fn log(&mut self) -> anyhow::Result<()> {
        let head = self.head_oid()?.clone();

        self.print_history(head)
    }

    /// History of every branch, in branch-name order.
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        let branches = self
            .state()
            .branches
            .iter()
            .map(|(name, tip)| (name.clone(), tip.clone()))
            .collect::<Vec<_>>();

        for (name, tip) in branches {
            writeln!(self.writer(), "Branch: {name}")?;
            self.print_history(tip)?;
        }

        Ok(())
    }

    fn print_history(&self, tip: ObjectId) -> anyhow::Result<()> {
        for commit in RevList::new(self.database(), tip) {
            self.print_commit(&commit?)?;
        }

        Ok(())
    }

    fn print_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        write!(
            self.writer(),
            "===\ncommit {}\nDate: {}\n{}\n\n",
            commit.object_id(),
            commit.readable_timestamp(),
            commit.message()
        )?;

        Ok(())
    }
}
