use anyhow::{Context, Result, bail};
use clap::Args;

use crate::api::SearchClient;
use crate::factory::Factory;
use crate::types::{IndexSettings, is_virtual, remove_replica, unwrap_virtual, virtual_name};

#[derive(Args)]
pub struct DeleteCmd {
    /// Indices to delete
    #[arg(required = true)]
    pub indices: Vec<String>,

    /// Skip the delete index confirmation prompt
    #[arg(short = 'y', long)]
    pub confirm: bool,

    /// Delete replica indices too
    #[arg(short = 'r', long)]
    pub include_replicas: bool,

    /// Wait for the operation to complete
    #[arg(short, long)]
    pub wait: bool,
}

impl DeleteCmd {
    fn noun(&self) -> &'static str {
        if self.indices.len() > 1 {
            "indices"
        } else {
            "index"
        }
    }

    fn confirm_message(&self) -> String {
        let suffix = if self.include_replicas {
            " including their replicas"
        } else {
            ""
        };
        format!(
            "Are you sure you want to delete the {} \"{}\"{}?",
            self.noun(),
            self.indices.join(", "),
            suffix
        )
    }

    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        if !self.confirm {
            if !f.io.can_prompt() {
                bail!("--confirm required when non-interactive shell is detected");
            }
            if !f.prompter.confirm(&self.confirm_message())? {
                return Ok(());
            }
        }

        let client = f.search_client()?;
        let mut deleted = self.indices.clone();

        for index in &self.indices {
            let res = self.delete_one(f, &client, index, &mut deleted).await;
            f.io.stop_progress();
            res?;
        }

        if f.io.is_stdout_tty() {
            let cs = f.io.color_scheme();
            writeln!(
                f.io.out(),
                "{} Deleted {} {}",
                cs.success_icon(),
                self.noun(),
                deleted.join(", ")
            )?;
        }

        Ok(())
    }

    async fn delete_one(
        &self,
        f: &mut Factory,
        client: &SearchClient,
        index: &str,
        deleted: &mut Vec<String>,
    ) -> Result<()> {
        let settings = client
            .get_settings(index)
            .await
            .with_context(|| format!("can't get settings of index {}", index))?;

        // Detaching a replica whose primary is also going away would
        // recreate the primary as an empty index unless we wait.
        let mut wait = self.wait;
        if settings
            .replicas()
            .iter()
            .any(|r| self.indices.iter().any(|i| i == unwrap_virtual(r).unwrap_or(r)))
        {
            wait = true;
        }

        if let Some(primary) = settings.primary() {
            f.io.start_progress(format!("Detaching replica index {} from its primary", index));
            detach_replica(client, index, primary)
                .await
                .with_context(|| format!("can't detach index {}", index))?;
            f.io.stop_progress();
        }

        f.io.start_progress(format!("Deleting index {}", index));
        let res = client
            .delete_index(index)
            .await
            .with_context(|| format!("can't delete index {}", index))?;

        if !self.include_replicas && wait {
            f.io.update_progress("Waiting for the task to complete");
            client.wait_for_task(index, res.task_id).await?;
        }

        if self.include_replicas && settings.has_replicas() {
            f.io.update_progress("Waiting for the primary index to be deleted");
            client
                .wait_for_task(index, res.task_id)
                .await
                .with_context(|| format!("error while waiting for index {} to be deleted", index))?;

            for replica in settings.replicas() {
                let name = match unwrap_virtual(replica) {
                    Some(bare) => {
                        deleted.push(bare.to_string());
                        bare
                    }
                    None => replica.as_str(),
                };

                f.io.update_progress(format!("Deleting replica {}", name));
                let res = client
                    .delete_index(name)
                    .await
                    .with_context(|| format!("can't delete replica {}", name))?;
                if wait {
                    client.wait_for_task(name, res.task_id).await?;
                }
            }
        }

        Ok(())
    }
}

/// Remove `replica` from the `replicas` setting of its primary.
async fn detach_replica(client: &SearchClient, replica: &str, primary: &str) -> Result<()> {
    let settings = client
        .get_settings(primary)
        .await
        .with_context(|| format!("can't get settings of primary index {}", primary))?;

    let listed = if is_virtual(settings.replicas(), replica) {
        virtual_name(replica)
    } else {
        replica.to_string()
    };

    let update = IndexSettings::with_replicas(remove_replica(settings.replicas(), &listed));
    let res = client.set_settings(primary, &update).await.with_context(|| {
        format!("can't detach replica {} from its primary {}", listed, primary)
    })?;

    client
        .wait_for_task(primary, res.task_id)
        .await
        .context("can't wait for updating the primary's settings")?;

    Ok(())
}
